use std::fmt;

/// Framing phase in which a mismatch was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    LeadIn,
    LeadOut,
}

impl fmt::Display for FramePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramePhase::LeadIn => f.write_str("lead-in"),
            FramePhase::LeadOut => f.write_str("lead-out"),
        }
    }
}

/// Everything that can go wrong on the ingest path.
///
/// All of these are local to the frame being received: the ingest state
/// machine returns to idle and the next lead-in starts fresh. None of them
/// ever reach the scanout path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("stream ended after {got} of {expected} header bytes")]
    IncompleteHeader { expected: usize, got: usize },

    #[error("{phase} mismatch at step {step}: expected {expected:#04x}, got {got:#04x}")]
    FramingMismatch {
        phase: FramePhase,
        step: usize,
        expected: u8,
        got: u8,
    },

    #[error("codeword {index} carries nonzero high bits in a red byte: {got:#04x}")]
    CorruptCodeword { index: usize, got: u8 },

    #[error("decoded coordinate ({row}, {col}) lies outside the active area")]
    AddressOutOfRange { row: usize, col: usize },
}
