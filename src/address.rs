//! The frame-memory addressing engine.
//!
//! Maps one decoded pixel pair to its five bank addresses and issues the
//! writes. The linear index is the tile-major pair index from [`layout`],
//! matching the decoder's emission order exactly; the scanout controller
//! mirrors the same mapping in read direction.
//!
//! [`layout`]: crate::layout

use crate::decoder::DecodedPair;
use crate::error::IngestError;
use crate::layout::{ACTIVE_HEIGHT, ACTIVE_WIDTH, Region, pair_index};
use crate::memory::FrameMemory;

/// Validate a pair origin against the active picture area.
///
/// A malformed stream that drives the cursor past the last tile shows up
/// here; coordinates are never clamped.
pub fn check_pair_origin(row: usize, col: usize) -> Result<(), IngestError> {
    if row % 2 == 0 && row + 1 < ACTIVE_HEIGHT && col < ACTIVE_WIDTH {
        Ok(())
    } else {
        Err(IngestError::AddressOutOfRange { row, col })
    }
}

/// Store one decoded pair into the frame memory.
///
/// Chroma goes to the parity-split banks at nibble `index`, the red pair to
/// the two adjacent full-resolution addresses `2*index` and `2*index + 1`
/// (the two red write sub-steps). Rewriting the same pair is idempotent.
pub fn store_pair(mem: &mut FrameMemory, pair: &DecodedPair) -> Result<(), IngestError> {
    check_pair_origin(pair.row, pair.col)?;

    let index = pair_index(pair.row, pair.col);

    mem.write_chroma(Region::GreenEven, index, pair.even.g);
    mem.write_chroma(Region::BlueEven, index, pair.even.b);
    mem.write_chroma(Region::GreenOdd, index, pair.odd.g);
    mem.write_chroma(Region::BlueOdd, index, pair.odd.b);

    mem.write_red(2 * index, pair.even.r);
    mem.write_red(2 * index + 1, pair.odd.r);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb4;
    use crate::layout::FRAME_PAIRS;

    fn pair(row: usize, col: usize) -> DecodedPair {
        DecodedPair {
            row,
            col,
            even: Rgb4 { r: 1, g: 2, b: 3 },
            odd: Rgb4 { r: 4, g: 5, b: 6 },
        }
    }

    #[test]
    fn writes_all_five_banks() {
        let mut mem = FrameMemory::new();

        store_pair(&mut mem, &pair(0, 0)).unwrap();

        assert_eq!(mem.read_chroma(Region::GreenEven, 0), 2);
        assert_eq!(mem.read_chroma(Region::BlueEven, 0), 3);
        assert_eq!(mem.read_chroma(Region::GreenOdd, 0), 5);
        assert_eq!(mem.read_chroma(Region::BlueOdd, 0), 6);
        assert_eq!(mem.read_red(0), 1);
        assert_eq!(mem.read_red(1), 4);
    }

    #[test]
    fn last_pair_is_in_bounds_and_the_row_after_is_not() {
        let mut mem = FrameMemory::new();

        store_pair(&mut mem, &pair(238, 319)).unwrap();

        let index = pair_index(238, 319);
        assert_eq!(index, FRAME_PAIRS - 1);
        assert_eq!(mem.read_red(2 * index + 1), 4);

        assert_eq!(
            store_pair(&mut mem, &pair(240, 0)),
            Err(IngestError::AddressOutOfRange { row: 240, col: 0 })
        );
    }

    #[test]
    fn odd_pair_origin_is_rejected() {
        let mut mem = FrameMemory::new();

        assert_eq!(
            store_pair(&mut mem, &pair(1, 0)),
            Err(IngestError::AddressOutOfRange { row: 1, col: 0 })
        );
    }

    #[test]
    fn rewriting_a_pair_is_idempotent() {
        let mut mem = FrameMemory::new();

        store_pair(&mut mem, &pair(28, 39)).unwrap();
        let first = mem.bytes().to_vec();

        store_pair(&mut mem, &pair(28, 39)).unwrap();
        assert_eq!(mem.bytes(), &first[..]);
    }
}
