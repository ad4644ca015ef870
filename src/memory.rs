use crate::layout::{CHROMA_REGION_BYTES, FRAME_MEMORY_BYTES, RED_REGION_BYTES, Region};

/// The banked frame memory shared by the two halves of the pipeline.
///
/// One flat byte buffer partitioned into the five [`Region`]s. The addressing
/// engine is the only writer, the scanout controller the only reader; the
/// partition makes the steady-state path safe without any locking.
///
/// Chroma banks pack two 4-bit samples per byte (even sample index in the low
/// nibble); the red region holds one sample per byte.
#[derive(Debug, Clone)]
pub struct FrameMemory {
    bytes: Vec<u8>,
    frame_ready: bool,
}

impl FrameMemory {
    /// A zeroed frame memory. Zero is the blanking level, so scanning out an
    /// unwritten frame shows black rather than garbage.
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; FRAME_MEMORY_BYTES],
            frame_ready: false,
        }
    }

    /// Zero all banks and drop the frame-ready flag
    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.frame_ready = false;
    }

    /// The bytes of one region
    pub fn region(&self, region: Region) -> &[u8] {
        &self.bytes[region.base()..region.base() + region.len()]
    }

    /// Whole backing buffer, all regions in layout order
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Set once the lead-out of a frame completes, cleared when the next
    /// frame's first byte arrives. Readers may consult it; the reference
    /// behavior is to scan out regardless and tolerate stale data.
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub(crate) fn set_frame_ready(&mut self, ready: bool) {
        self.frame_ready = ready;
    }

    /// Read the 4-bit sample `index` from a chroma bank
    pub fn read_chroma(&self, region: Region, index: usize) -> u8 {
        debug_assert!(index < 2 * CHROMA_REGION_BYTES);

        let byte = self.bytes[region.base() + index / 2];

        if index % 2 == 0 { byte & 0x0F } else { byte >> 4 }
    }

    /// Read the 4-bit red sample `index`
    pub fn read_red(&self, index: usize) -> u8 {
        debug_assert!(index < RED_REGION_BYTES);

        self.bytes[Region::Red.base() + index] & 0x0F
    }

    pub(crate) fn write_chroma(&mut self, region: Region, index: usize, value: u8) {
        debug_assert!(index < 2 * CHROMA_REGION_BYTES);
        debug_assert!(value <= 0x0F);

        let byte = &mut self.bytes[region.base() + index / 2];

        if index % 2 == 0 {
            *byte = (*byte & 0xF0) | value;
        } else {
            *byte = (*byte & 0x0F) | (value << 4);
        }
    }

    pub(crate) fn write_red(&mut self, index: usize, value: u8) {
        debug_assert!(index < RED_REGION_BYTES);
        debug_assert!(value <= 0x0F);

        self.bytes[Region::Red.base() + index] = value;
    }
}

impl Default for FrameMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_samples_pack_two_per_byte() {
        let mut mem = FrameMemory::new();

        mem.write_chroma(Region::GreenEven, 0, 0x9);
        mem.write_chroma(Region::GreenEven, 1, 0x4);

        assert_eq!(mem.region(Region::GreenEven)[0], 0x49);
        assert_eq!(mem.read_chroma(Region::GreenEven, 0), 0x9);
        assert_eq!(mem.read_chroma(Region::GreenEven, 1), 0x4);

        // neighboring banks untouched
        assert!(mem.region(Region::BlueEven).iter().all(|b| *b == 0));
        assert!(mem.region(Region::Red).iter().all(|b| *b == 0));
    }

    #[test]
    fn red_writes_do_not_alias_chroma() {
        let mut mem = FrameMemory::new();

        mem.write_red(0, 0x5);
        mem.write_red(RED_REGION_BYTES - 1, 0xF);

        assert_eq!(mem.read_red(0), 0x5);
        assert_eq!(mem.read_red(RED_REGION_BYTES - 1), 0xF);

        for region in [
            Region::GreenEven,
            Region::BlueEven,
            Region::GreenOdd,
            Region::BlueOdd,
        ] {
            assert!(mem.region(region).iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn clear_resets_data_and_ready_flag() {
        let mut mem = FrameMemory::new();

        mem.write_red(7, 0xA);
        mem.set_frame_ready(true);

        mem.clear();

        assert!(!mem.frame_ready());
        assert!(mem.bytes().iter().all(|b| *b == 0));
    }
}
