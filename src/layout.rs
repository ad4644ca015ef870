//! Geometry of the active picture area and the banked frame-memory layout.
//!
//! Both halves of the pipeline go through this module: the addressing engine
//! uses it to place decoded samples, the scanout controller uses the same
//! math in read direction. Keeping it in one place is what makes the
//! write/read coupling a contract rather than a coincidence.

/// Leftmost display column of the visible window.
pub const VIEW_AREA_LEFT: usize = 160;
/// One past the rightmost display column of the visible window.
pub const VIEW_AREA_RIGHT: usize = 480;
/// Topmost display row of the visible window.
pub const VIEW_AREA_TOP: usize = 120;
/// One past the bottommost display row of the visible window.
pub const VIEW_AREA_BOTTOM: usize = 360;

/// Width of the active picture area in pixels.
pub const ACTIVE_WIDTH: usize = VIEW_AREA_RIGHT - VIEW_AREA_LEFT;
/// Height of the active picture area in pixels.
pub const ACTIVE_HEIGHT: usize = VIEW_AREA_BOTTOM - VIEW_AREA_TOP;

/// Width of one ingest tile in pixels.
pub const TILE_WIDTH: usize = 40;
/// Height of one ingest tile in pixels.
pub const TILE_HEIGHT: usize = 30;
/// Tiles per tile row.
pub const TILE_GRID_COLS: usize = ACTIVE_WIDTH / TILE_WIDTH;
/// Tile rows in the active area.
pub const TILE_GRID_ROWS: usize = ACTIVE_HEIGHT / TILE_HEIGHT;

/// Pixels in one tile.
pub const TILE_PIXELS: usize = TILE_WIDTH * TILE_HEIGHT;
/// Vertical pixel pairs in one tile.
pub const TILE_PAIRS: usize = TILE_PIXELS / 2;

/// Pixels in the active area.
pub const FRAME_PIXELS: usize = ACTIVE_WIDTH * ACTIVE_HEIGHT;
/// Vertical pixel pairs in the active area. One codeword decodes one pair.
pub const FRAME_PAIRS: usize = FRAME_PIXELS / 2;

/// Bytes per chroma bank: one 4-bit sample per pair, two samples per byte.
pub const CHROMA_REGION_BYTES: usize = FRAME_PAIRS / 2;
/// Bytes in the red region: one byte per pixel, both row parities.
pub const RED_REGION_BYTES: usize = FRAME_PIXELS;

/// Total frame-memory size in bytes.
pub const FRAME_MEMORY_BYTES: usize = 4 * CHROMA_REGION_BYTES + RED_REGION_BYTES;

/// The five storage banks of the frame memory.
///
/// Green and blue are held at half vertical resolution, split by row parity;
/// red covers both parities at full resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Green samples for even active rows
    GreenEven,

    /// Blue samples for even active rows
    BlueEven,

    /// Green samples for odd active rows
    GreenOdd,

    /// Blue samples for odd active rows
    BlueOdd,

    /// Red samples for all rows
    Red,
}

impl Region {
    /// Byte offset of this region within the frame memory
    pub fn base(self) -> usize {
        match self {
            Region::GreenEven => 0,
            Region::BlueEven => CHROMA_REGION_BYTES,
            Region::GreenOdd => 2 * CHROMA_REGION_BYTES,
            Region::BlueOdd => 3 * CHROMA_REGION_BYTES,
            Region::Red => 4 * CHROMA_REGION_BYTES,
        }
    }

    /// Size of this region in bytes
    pub fn len(self) -> usize {
        match self {
            Region::GreenEven | Region::BlueEven | Region::GreenOdd | Region::BlueOdd => {
                CHROMA_REGION_BYTES
            }
            Region::Red => RED_REGION_BYTES,
        }
    }

    /// Select the green bank for a row parity
    pub fn green(odd_row: bool) -> Region {
        if odd_row { Region::GreenOdd } else { Region::GreenEven }
    }

    /// Select the blue bank for a row parity
    pub fn blue(odd_row: bool) -> Region {
        if odd_row { Region::BlueOdd } else { Region::BlueEven }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        use Region::*;

        [GreenEven, BlueEven, GreenOdd, BlueOdd, Red]
    }
}

/// Linear index of a vertical pixel pair in ingest traversal order.
///
/// Traversal is tile-major (row-major over the 8x8 tile grid), raster within
/// a tile. `row` is the even row of the pair; the caller must have validated
/// the coordinate against the active area.
pub fn pair_index(row: usize, col: usize) -> usize {
    debug_assert!(row % 2 == 0);
    debug_assert!(row < ACTIVE_HEIGHT && col < ACTIVE_WIDTH);

    let tile = (row / TILE_HEIGHT) * TILE_GRID_COLS + col / TILE_WIDTH;
    let local = (row % TILE_HEIGHT) / 2 * TILE_WIDTH + col % TILE_WIDTH;

    tile * TILE_PAIRS + local
}

/// Inverse of [`pair_index`]: the (even row, col) origin of pair `index`.
///
/// Indices past the last pair map past the active area; the addressing
/// engine rejects them as out of range rather than wrapping.
pub fn pair_origin(index: usize) -> (usize, usize) {
    let tile = index / TILE_PAIRS;
    let local = index % TILE_PAIRS;

    let row = (tile / TILE_GRID_COLS) * TILE_HEIGHT + (local / TILE_WIDTH) * 2;
    let col = (tile % TILE_GRID_COLS) * TILE_WIDTH + local % TILE_WIDTH;

    (row, col)
}
