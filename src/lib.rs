//! Ingest, decode and scanout core of a serial-link video peripheral.
//!
//! A serial byte stream carrying a framed, chroma-subsampled image is
//! reconstructed into 4-bit RGB samples and stored in a banked
//! [`FrameMemory`]; an independent raster [`Scanout`] controller re-reads
//! the banks in display-timing order within a fixed visible window.
//!
//! The two halves are plain state machines advanced by caller-driven ticks
//! (one per received byte, one per display clock step) and share nothing
//! but the frame memory, whose banks are written only by the ingest path
//! and read only by the scanout path. Framing errors abandon the frame
//! being received and never disturb scanout.

mod address;
mod decoder;
mod error;
mod format;
pub mod layout;
mod memory;
mod scanout;
mod stripper;

pub use address::{check_pair_origin, store_pair};
pub use decoder::{DecodeEvent, DecodedPair, Decoder};
pub use error::{FramePhase, IngestError};
pub use format::{
    BYTES_PER_CODEWORD, FrameFormat, REFERENCE_HEADER_LEN, REFERENCE_LEAD_IN, REFERENCE_LEAD_OUT,
    REFERENCE_TRANSITION_LEN, encode_codeword,
};
pub use memory::FrameMemory;
pub use scanout::{FETCH_STEPS, ROW_START_DELAY, Scanout};
pub use stripper::HeaderStripper;

/// One pixel's channel intensities, 4 bits each (16 levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb4 {
    /// The blanking level emitted outside the visible window
    pub const BLANK: Rgb4 = Rgb4 { r: 0, g: 0, b: 0 };
}

/// Outcome of feeding one byte to [`Ingest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestEvent {
    /// Byte consumed; header, framing or pixel data
    Consumed,

    /// A whole frame landed in memory and the frame-ready flag is set
    FrameComplete,
}

/// The complete ingest path: header stripper, bitstream decoder and
/// addressing engine over a [`FrameMemory`].
///
/// Feed it one byte per ingest tick. Errors are frame-local: the offending
/// frame is dropped, the state machine returns to idle and the next byte is
/// treated as the start of a new frame's header. Requesting retransmission
/// is the caller's business.
#[derive(Debug)]
pub struct Ingest {
    stripper: HeaderStripper,
    decoder: Decoder,
    in_frame: bool,
    frames_completed: u64,
    frames_dropped: u64,
}

impl Ingest {
    pub fn new(format: FrameFormat) -> Self {
        Self {
            stripper: HeaderStripper::new(format.header_len),
            decoder: Decoder::new(format),
            in_frame: false,
            frames_completed: 0,
            frames_dropped: 0,
        }
    }

    /// Consume one byte from the serial source.
    ///
    /// On error the frame is already abandoned; the error is reported once
    /// and the next call starts a fresh frame.
    pub fn feed_byte(
        &mut self,
        byte: u8,
        mem: &mut FrameMemory,
    ) -> Result<IngestEvent, IngestError> {
        if !self.in_frame {
            // first byte of a new frame invalidates the previous ready flag
            self.in_frame = true;
            mem.set_frame_ready(false);
        }

        if !self.stripper.is_done() {
            self.stripper.feed(byte);
            return Ok(IngestEvent::Consumed);
        }

        match self.decode_byte(byte, mem) {
            Ok(event) => Ok(event),
            Err(err) => {
                self.frames_dropped += 1;
                log::warn!("frame dropped: {err}");
                self.restart();
                Err(err)
            }
        }
    }

    fn decode_byte(&mut self, byte: u8, mem: &mut FrameMemory) -> Result<IngestEvent, IngestError> {
        match self.decoder.feed(byte)? {
            DecodeEvent::Consumed => Ok(IngestEvent::Consumed),
            DecodeEvent::Pair(pair) => {
                store_pair(mem, &pair)?;
                Ok(IngestEvent::Consumed)
            }
            DecodeEvent::FrameComplete => {
                mem.set_frame_ready(true);
                self.frames_completed += 1;
                log::debug!("frame {} complete", self.frames_completed);
                self.restart();
                Ok(IngestEvent::FrameComplete)
            }
        }
    }

    /// Feed a whole slice, stopping at the first error. Returns the number
    /// of frames completed by these bytes.
    pub fn feed(&mut self, bytes: &[u8], mem: &mut FrameMemory) -> Result<usize, IngestError> {
        let mut frames = 0;

        for byte in bytes {
            if self.feed_byte(*byte, mem)? == IngestEvent::FrameComplete {
                frames += 1;
            }
        }

        Ok(frames)
    }

    /// Check for truncation once the source reports end of stream
    pub fn end_of_stream(&self) -> Result<(), IngestError> {
        if self.in_frame {
            self.stripper.finish()
        } else {
            Ok(())
        }
    }

    /// Abandon whatever is in flight and await the next frame. The external
    /// mode sequencer calls this on re-sync; scanout is unaffected.
    pub fn abort(&mut self) {
        if self.in_frame {
            self.frames_dropped += 1;
        }

        self.restart();
    }

    /// Between frames, waiting for the next header byte
    pub fn is_idle(&self) -> bool {
        !self.in_frame
    }

    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    fn restart(&mut self) {
        self.stripper.reset();
        self.decoder.reset();
        self.in_frame = false;
    }
}
