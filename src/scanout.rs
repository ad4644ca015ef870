use crate::Rgb4;
use crate::layout::{
    ACTIVE_WIDTH, Region, VIEW_AREA_BOTTOM, VIEW_AREA_TOP, pair_index,
};
use crate::memory::FrameMemory;

/// Ticks between a new-row pulse and the first valid pixel of that row
pub const ROW_START_DELAY: usize = 5;

/// Fetch states per pixel: read green, read blue, read red, commit and
/// advance the column cursor
pub const FETCH_STEPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    WaitNewRow,
    RowDelay { step: usize },
    Fetch { step: usize },
}

/// The raster scanout controller.
///
/// Re-reads the frame memory in display order, driven purely by the external
/// timing source: [`new_row`] on each horizontal sync, [`tick`] on each
/// memory-clock step. A `tick` always produces a value — the latch of the
/// last committed pixel inside the visible window, the blanking level
/// outside it. Data availability never stalls the controller; an
/// unpopulated or mid-write frame simply reads as stale bytes.
///
/// The row-parity flag toggles on every new-row pulse and selects the even
/// or odd chroma banks; red is read at full resolution.
///
/// [`new_row`]: Self::new_row
/// [`tick`]: Self::tick
#[derive(Debug, Clone)]
pub struct Scanout {
    phase: Phase,
    display_row: usize,
    col: usize,
    row_parity: bool,
    pending: Rgb4,
    latch: Rgb4,
}

impl Scanout {
    pub fn new() -> Self {
        Self {
            phase: Self::row_phase(0),
            display_row: 0,
            col: 0,
            row_parity: false,
            pending: Rgb4::BLANK,
            latch: Rgb4::BLANK,
        }
    }

    /// Vertical re-sync: rebase to display row 0. Also the reset hook when
    /// the ingest side starts over on a new frame.
    pub fn new_frame(&mut self) {
        self.phase = Self::row_phase(0);
        self.display_row = 0;
        self.col = 0;
        self.row_parity = false;
    }

    /// Horizontal sync pulse: advance to the next display row
    pub fn new_row(&mut self) {
        self.display_row += 1;
        self.row_parity = !self.row_parity;
        self.col = 0;
        self.phase = Self::row_phase(self.display_row);
    }

    pub fn display_row(&self) -> usize {
        self.display_row
    }

    /// One memory-clock step. Never blocks, never misses: the return value
    /// is valid for the current tick whatever the memory holds.
    pub fn tick(&mut self, mem: &FrameMemory) -> Rgb4 {
        match self.phase {
            Phase::WaitNewRow => Rgb4::BLANK,
            Phase::RowDelay { step } => {
                self.phase = if step + 1 < ROW_START_DELAY {
                    Phase::RowDelay { step: step + 1 }
                } else {
                    Phase::Fetch { step: 0 }
                };

                Rgb4::BLANK
            }
            Phase::Fetch { step } => {
                self.fetch_step(step, mem);
                self.latch
            }
        }
    }

    fn fetch_step(&mut self, step: usize, mem: &FrameMemory) {
        let active_row = self.display_row - VIEW_AREA_TOP;
        let index = pair_index(active_row - active_row % 2, self.col);

        match step {
            0 => self.pending.g = mem.read_chroma(Region::green(self.row_parity), index),
            1 => self.pending.b = mem.read_chroma(Region::blue(self.row_parity), index),
            2 => self.pending.r = mem.read_red(2 * index + self.row_parity as usize),
            _ => {
                self.latch = self.pending;
                self.col += 1;
            }
        }

        self.phase = if step + 1 < FETCH_STEPS {
            Phase::Fetch { step: step + 1 }
        } else if self.col < ACTIVE_WIDTH {
            Phase::Fetch { step: 0 }
        } else {
            Phase::WaitNewRow
        };
    }

    fn row_phase(display_row: usize) -> Phase {
        if (VIEW_AREA_TOP..VIEW_AREA_BOTTOM).contains(&display_row) {
            Phase::RowDelay { step: 0 }
        } else {
            Phase::WaitNewRow
        }
    }
}

impl Default for Scanout {
    fn default() -> Self {
        Self::new()
    }
}
