use crate::Rgb4;
use crate::layout::FRAME_PAIRS;

/// Bytes in one codeword.
///
/// A codeword decodes one vertical pixel pair: byte 0 packs green (high
/// nibble) and blue (low nibble) for the even row, byte 1 the same for the
/// odd row, bytes 2 and 3 carry the red pair. The high nibble of a red byte
/// must be zero.
pub const BYTES_PER_CODEWORD: usize = 4;

/// File-header length of the reference encoder
pub const REFERENCE_HEADER_LEN: usize = 2;

/// Synchronization pattern opening the body of a reference frame
pub const REFERENCE_LEAD_IN: [u8; 18] = [
    0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A,
    0xF0, 0x0F,
];

/// Flush pattern closing the body of a reference frame
pub const REFERENCE_LEAD_OUT: [u8; 11] = [
    0x0F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF,
];

/// Bytes discarded between the two codeword runs of the extended variant
pub const REFERENCE_TRANSITION_LEN: usize = 4;

/// Wire format of one encoded frame.
///
/// `[header][lead-in][codeword run 1][transition][codeword run 2][lead-out]`,
/// with the transition and second run only present in the extended variant.
/// The near-identical protocol variants differ only in these parameters, so
/// they share a single decoder.
///
/// The patterns are compatibility constants fixed by the encoder side; both
/// ends must agree byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFormat {
    /// Leading bytes discarded before the lead-in begins
    pub header_len: usize,

    /// Exact-match synchronization pattern
    pub lead_in: Vec<u8>,

    /// Codewords in the first run
    pub run1: usize,

    /// Discarded bytes between the runs; unused when `run2` is zero
    pub transition: usize,

    /// Codewords in the second run, zero for single-run variants
    pub run2: usize,

    /// Exact-match flush pattern
    pub lead_out: Vec<u8>,
}

impl FrameFormat {
    /// The single-run reference variant: one codeword per pixel pair of a
    /// full 320x240 frame.
    pub fn baseline() -> Self {
        Self {
            header_len: REFERENCE_HEADER_LEN,
            lead_in: REFERENCE_LEAD_IN.to_vec(),
            run1: FRAME_PAIRS,
            transition: 0,
            run2: 0,
            lead_out: REFERENCE_LEAD_OUT.to_vec(),
        }
    }

    /// The extended reference variant: the frame split into two codeword
    /// runs around a discarded transition gap. The pair cursor continues
    /// across the gap, so the decoded image is identical to [`baseline`].
    ///
    /// [`baseline`]: Self::baseline
    pub fn extended() -> Self {
        Self {
            header_len: REFERENCE_HEADER_LEN,
            lead_in: REFERENCE_LEAD_IN.to_vec(),
            run1: FRAME_PAIRS / 2,
            transition: REFERENCE_TRANSITION_LEN,
            run2: FRAME_PAIRS - FRAME_PAIRS / 2,
            lead_out: REFERENCE_LEAD_OUT.to_vec(),
        }
    }

    /// Codewords in a whole frame, both runs
    pub fn codewords(&self) -> usize {
        self.run1 + self.run2
    }

    /// Exact byte count of one encoded frame, header included
    pub fn frame_len(&self) -> usize {
        let transition = if self.run2 > 0 { self.transition } else { 0 };

        self.header_len
            + self.lead_in.len()
            + self.codewords() * BYTES_PER_CODEWORD
            + transition
            + self.lead_out.len()
    }
}

/// Encode one codeword from the two pixels of a vertical pair.
///
/// This is the byte-exact inverse of the decoder's codeword consumption and
/// doubles as the executable definition of the payload encoding. Channel
/// values are masked to 4 bits.
pub fn encode_codeword(even: Rgb4, odd: Rgb4) -> [u8; BYTES_PER_CODEWORD] {
    [
        (even.g << 4) | (even.b & 0x0F),
        (odd.g << 4) | (odd.b & 0x0F),
        even.r & 0x0F,
        odd.r & 0x0F,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_frame_lengths_are_exact() {
        let baseline = FrameFormat::baseline();
        assert_eq!(baseline.frame_len(), 2 + 18 + 4 * FRAME_PAIRS + 11);

        let extended = FrameFormat::extended();
        assert_eq!(extended.codewords(), FRAME_PAIRS);
        assert_eq!(
            extended.frame_len(),
            2 + 18 + 4 * FRAME_PAIRS + REFERENCE_TRANSITION_LEN + 11
        );
    }

    #[test]
    fn transition_ignored_without_a_second_run() {
        let mut format = FrameFormat::baseline();
        format.transition = 7;

        assert_eq!(format.frame_len(), FrameFormat::baseline().frame_len());
    }

    #[test]
    fn codeword_packs_nibbles() {
        let even = Rgb4 { r: 5, g: 9, b: 12 };
        let odd = Rgb4 { r: 3, g: 1, b: 2 };

        assert_eq!(encode_codeword(even, odd), [0x9C, 0x12, 0x05, 0x03]);
    }
}
