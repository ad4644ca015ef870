use crate::error::IngestError;

/// Discards the fixed-length file header in front of each encoded frame.
///
/// Pure byte counting; the header content is never inspected. If the stream
/// ends before the header is complete the frame never reaches the decoder.
#[derive(Debug, Clone)]
pub struct HeaderStripper {
    expected: usize,
    seen: usize,
}

impl HeaderStripper {
    pub fn new(header_len: usize) -> Self {
        Self {
            expected: header_len,
            seen: 0,
        }
    }

    /// Consume one header byte. Returns `true` once the header is complete;
    /// further bytes belong to the decoder.
    pub fn feed(&mut self, _byte: u8) -> bool {
        if self.seen < self.expected {
            self.seen += 1;
        }

        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.seen >= self.expected
    }

    /// Check at end of stream: a partially stripped header means the frame
    /// was truncated before any decode began.
    pub fn finish(&self) -> Result<(), IngestError> {
        if self.is_done() {
            Ok(())
        } else {
            Err(IngestError::IncompleteHeader {
                expected: self.expected,
                got: self.seen,
            })
        }
    }

    pub fn reset(&mut self) {
        self.seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_exactly_the_header_length() {
        let mut stripper = HeaderStripper::new(2);

        assert!(!stripper.feed(0x12));
        assert!(stripper.feed(0x34));
        assert!(stripper.is_done());
        assert!(stripper.finish().is_ok());
    }

    #[test]
    fn truncated_header_is_reported() {
        let mut stripper = HeaderStripper::new(3);
        stripper.feed(0x00);

        assert_eq!(
            stripper.finish(),
            Err(IngestError::IncompleteHeader {
                expected: 3,
                got: 1
            })
        );
    }

    #[test]
    fn zero_length_header_is_immediately_done() {
        let stripper = HeaderStripper::new(0);

        assert!(stripper.is_done());
        assert!(stripper.finish().is_ok());
    }
}
