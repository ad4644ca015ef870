use crate::Rgb4;
use crate::error::{FramePhase, IngestError};
use crate::format::{BYTES_PER_CODEWORD, FrameFormat};
use crate::layout::pair_origin;

/// One reconstructed vertical pixel pair.
///
/// `row` is the even row of the pair; the pair also covers `row + 1` at the
/// same column. Pairs are emitted in tile-major traversal order, which the
/// addressing engine relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPair {
    pub row: usize,
    pub col: usize,
    pub even: Rgb4,
    pub odd: Rgb4,
}

/// Which codeword run is active. The extended protocol variant splits the
/// body into two runs around a discarded transition gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    First,
    Second,
}

/// Framing phase of the decoder. Every transition is explicit; there are no
/// don't-care states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    LeadIn {
        step: usize,
    },
    Codewords {
        run: Run,
        index: usize,
        buf: [u8; BYTES_PER_CODEWORD],
        filled: usize,
    },
    Transition {
        step: usize,
    },
    LeadOut {
        step: usize,
    },
}

/// Outcome of feeding one byte to the [`Decoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEvent {
    /// Byte consumed, nothing to hand on yet
    Consumed,

    /// A codeword completed and decoded to a pixel pair
    Pair(DecodedPair),

    /// The lead-out completed; the decoder is idle again
    FrameComplete,
}

/// The bitstream framing state machine.
///
/// Consumes one post-header byte per [`feed`] call and walks
/// lead-in → codewords (→ transition → codewords) → lead-out as declared by
/// its [`FrameFormat`]. Any unexpected byte aborts the current frame: the
/// decoder drops back to idle and the error is returned to the caller. There
/// is no in-frame retry; the next byte is treated as the start of a fresh
/// lead-in.
///
/// The decoder suspends simply by not being fed; it holds its state until
/// the next byte arrives.
///
/// [`feed`]: Self::feed
#[derive(Debug, Clone)]
pub struct Decoder {
    format: FrameFormat,
    phase: Phase,
    cursor: usize,
}

impl Decoder {
    pub fn new(format: FrameFormat) -> Self {
        debug_assert!(!format.lead_in.is_empty());
        debug_assert!(!format.lead_out.is_empty());

        Self {
            format,
            phase: Phase::Idle,
            cursor: 0,
        }
    }

    pub fn format(&self) -> &FrameFormat {
        &self.format
    }

    /// Waiting for the first byte of a lead-in
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Abandon the current frame, if any
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Consume one byte of the framed body.
    ///
    /// On error the frame is already abandoned and the decoder idle; no
    /// partial frame survives.
    pub fn feed(&mut self, byte: u8) -> Result<DecodeEvent, IngestError> {
        match self.advance(byte) {
            Ok(event) => Ok(event),
            Err(err) => {
                self.phase = Phase::Idle;
                Err(err)
            }
        }
    }

    fn advance(&mut self, byte: u8) -> Result<DecodeEvent, IngestError> {
        match self.phase {
            Phase::Idle => {
                // first post-header byte starts the lead-in
                self.cursor = 0;
                self.lead_in_step(0, byte)
            }
            Phase::LeadIn { step } => self.lead_in_step(step, byte),
            Phase::Codewords {
                run,
                index,
                mut buf,
                filled,
            } => {
                buf[filled] = byte;

                if filled + 1 < BYTES_PER_CODEWORD {
                    self.phase = Phase::Codewords {
                        run,
                        index,
                        buf,
                        filled: filled + 1,
                    };

                    return Ok(DecodeEvent::Consumed);
                }

                let pair = self.decode_codeword(buf)?;

                self.cursor += 1;

                let run_len = match run {
                    Run::First => self.format.run1,
                    Run::Second => self.format.run2,
                };

                self.phase = if index + 1 < run_len {
                    Phase::Codewords {
                        run,
                        index: index + 1,
                        buf: [0; BYTES_PER_CODEWORD],
                        filled: 0,
                    }
                } else {
                    match run {
                        Run::First => self.after_first_run(),
                        Run::Second => Phase::LeadOut { step: 0 },
                    }
                };

                Ok(DecodeEvent::Pair(pair))
            }
            Phase::Transition { step } => {
                // gap bytes are discarded, not matched
                self.phase = if step + 1 < self.format.transition {
                    Phase::Transition { step: step + 1 }
                } else {
                    Self::codewords(Run::Second)
                };

                Ok(DecodeEvent::Consumed)
            }
            Phase::LeadOut { step } => {
                let expected = self.format.lead_out[step];

                if byte != expected {
                    return Err(IngestError::FramingMismatch {
                        phase: FramePhase::LeadOut,
                        step,
                        expected,
                        got: byte,
                    });
                }

                if step + 1 < self.format.lead_out.len() {
                    self.phase = Phase::LeadOut { step: step + 1 };
                    Ok(DecodeEvent::Consumed)
                } else {
                    self.phase = Phase::Idle;
                    Ok(DecodeEvent::FrameComplete)
                }
            }
        }
    }

    fn lead_in_step(&mut self, step: usize, byte: u8) -> Result<DecodeEvent, IngestError> {
        let expected = self.format.lead_in[step];

        if byte != expected {
            return Err(IngestError::FramingMismatch {
                phase: FramePhase::LeadIn,
                step,
                expected,
                got: byte,
            });
        }

        self.phase = if step + 1 < self.format.lead_in.len() {
            Phase::LeadIn { step: step + 1 }
        } else if self.format.run1 > 0 {
            Self::codewords(Run::First)
        } else {
            self.after_first_run()
        };

        Ok(DecodeEvent::Consumed)
    }

    fn after_first_run(&self) -> Phase {
        if self.format.run2 == 0 {
            Phase::LeadOut { step: 0 }
        } else if self.format.transition > 0 {
            Phase::Transition { step: 0 }
        } else {
            Self::codewords(Run::Second)
        }
    }

    fn codewords(run: Run) -> Phase {
        Phase::Codewords {
            run,
            index: 0,
            buf: [0; BYTES_PER_CODEWORD],
            filled: 0,
        }
    }

    fn decode_codeword(&self, buf: [u8; BYTES_PER_CODEWORD]) -> Result<DecodedPair, IngestError> {
        for red in [buf[2], buf[3]] {
            if red & 0xF0 != 0 {
                return Err(IngestError::CorruptCodeword {
                    index: self.cursor,
                    got: red,
                });
            }
        }

        let (row, col) = pair_origin(self.cursor);

        Ok(DecodedPair {
            row,
            col,
            even: Rgb4 {
                r: buf[2],
                g: buf[0] >> 4,
                b: buf[0] & 0x0F,
            },
            odd: Rgb4 {
                r: buf[3],
                g: buf[1] >> 4,
                b: buf[1] & 0x0F,
            },
        })
    }
}
