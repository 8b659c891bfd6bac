//! Bounds-checked reads over untrusted advertisement bytes.
//!
//! Every read returns an error instead of indexing past the end, so
//! adversarial input degrades to rejection.

use crate::error::{ElementError, Result};
use crate::header::DataElementHeader;

/// A read position over a borrowed byte slice.
///
/// Reads consume from the front; [`ByteCursor::take_tail`] consumes from the
/// back. The two ends never cross.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
        }
    }

    /// Offset of the next front read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the front and back read positions.
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    /// Read exactly `len` bytes from the front.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(ElementError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Consume exactly `len` bytes from the back.
    pub fn take_tail(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(ElementError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        self.end -= len;
        Ok(&self.buf[self.end..self.end + len])
    }

    /// Consume everything left between the front and back positions.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos..self.end];
        self.pos = self.end;
        out
    }

    /// Read a data element header, returning it with its raw bytes.
    pub fn read_header(&mut self) -> Result<(DataElementHeader, &'a [u8])> {
        let (header, consumed) = DataElementHeader::decode(&self.buf[self.pos..self.end])?;
        let raw = self.read_slice(consumed)?;
        Ok((header, raw))
    }

    /// Read a full data element: header followed by its value.
    pub fn read_element(&mut self) -> Result<RawElement<'a>> {
        let start = self.pos;
        let (header, header_bytes) = self.read_header()?;
        let value = match self.read_slice(header.length()) {
            Ok(value) => value,
            Err(err) => {
                self.pos = start;
                return Err(err);
            }
        };
        Ok(RawElement {
            header,
            header_bytes,
            value,
        })
    }
}

/// A data element as it appeared on the wire, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawElement<'a> {
    pub header: DataElementHeader,
    pub header_bytes: &'a [u8],
    pub value: &'a [u8],
}

impl RawElement<'_> {
    pub fn data_type(&self) -> u32 {
        self.header.data_type()
    }
}

/// Iterates the data elements packed back to back in a buffer.
///
/// Yields an error once on the first malformed element and then stops.
#[derive(Debug, Clone)]
pub struct ElementReader<'a> {
    cursor: ByteCursor<'a>,
    failed: bool,
}

impl<'a> ElementReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(buf),
            failed: false,
        }
    }
}

impl<'a> Iterator for ElementReader<'a> {
    type Item = Result<RawElement<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_empty() {
            return None;
        }
        match self.cursor.read_element() {
            Ok(element) => Some(Ok(element)),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_front_and_tail() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_eq!(cursor.take_tail(2).unwrap(), &[5, 6]);
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.read_rest(), &[2, 3, 4]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn overlong_reads_fail_without_moving() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(
            cursor.read_slice(4).unwrap_err(),
            ElementError::Truncated {
                needed: 4,
                remaining: 3
            }
        );
        assert!(cursor.take_tail(4).is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.remaining(), 3);
    }

    #[test]
    fn front_reads_stop_at_tail() {
        let data = [0x53u8, 1, 2, 3, 4, 5, 9, 9];
        let mut cursor = ByteCursor::new(&data);
        cursor.take_tail(3).unwrap();
        // header says 5 bytes of value, only 4 remain before the tail
        assert!(matches!(
            cursor.read_element(),
            Err(ElementError::Truncated { needed: 5, remaining: 4 })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn reads_elements_in_sequence() {
        // salt (type 0, len 2), then identity header (type 1, len 16) + value
        let mut data = vec![0b0010_0000, 0xAA, 0xBB, 0b1001_0000, 0b0000_0001];
        data.extend_from_slice(&[7u8; 16]);

        let elements: Vec<_> = ElementReader::new(&data)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].data_type(), 0);
        assert_eq!(elements[0].value, &[0xAA, 0xBB]);
        assert_eq!(elements[0].header_bytes, &[0b0010_0000]);
        assert_eq!(elements[1].data_type(), 1);
        assert_eq!(elements[1].value, &[7u8; 16]);
    }

    #[test]
    fn reader_stops_after_first_error() {
        let data = [0b0001_0110, 1, 0x8A];
        let mut reader = ElementReader::new(&data);
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(
            reader.next().unwrap().unwrap_err(),
            ElementError::MalformedHeader
        );
        assert!(reader.next().is_none());
    }
}
