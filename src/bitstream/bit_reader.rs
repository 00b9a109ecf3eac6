// src/bitstream/bit_reader.rs

use byteorder::ReadBytesExt;
use std::io::{ErrorKind, Read};

use crate::bitstream::BitSource;
use crate::utils::error::Result;

/// A bit-level reader over any byte reader, most significant bit first.
pub struct BitReader<R: Read> {
    reader: R,
    current_byte: u8,
    bits_remaining: u8,
    bits_read: u64,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_byte: 0,
            bits_remaining: 0,
            bits_read: 0,
            exhausted: false,
        }
    }

    /// Number of bits handed out so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Drops any unread bits of the current byte and returns the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_remaining == 0 {
            if self.exhausted {
                return Ok(None);
            }
            match self.reader.read_u8() {
                Ok(byte) => {
                    self.current_byte = byte;
                    self.bits_remaining = 8;
                }
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.bits_remaining -= 1;
        self.bits_read += 1;
        Ok(Some((self.current_byte >> self.bits_remaining) & 1 == 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_msb_first() {
        let mut reader = BitReader::new(Cursor::new(vec![0b1000_0001]));
        assert_eq!(reader.read_bit().unwrap(), Some(true));
        for _ in 0..6 {
            assert_eq!(reader.read_bit().unwrap(), Some(false));
        }
        assert_eq!(reader.read_bit().unwrap(), Some(true));
        assert_eq!(reader.read_bit().unwrap(), None);
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_fields_span_bytes() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFA, 0xCE, 0x82, 0x00, 0xC0]));
        assert_eq!(reader.read_bits(32).unwrap(), Some(0xFACE_8200));
        assert_eq!(reader.read_bits(2).unwrap(), Some(0b11));
        assert_eq!(reader.read_bits(6).unwrap(), Some(0));
        assert_eq!(reader.read_bits(1).unwrap(), None);
    }

    #[test]
    fn test_incomplete_field_is_end_of_input() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        assert_eq!(reader.read_bits(9).unwrap(), None);
        // Once exhausted it stays exhausted.
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(std::io::empty());
        assert_eq!(reader.read_bits(0).unwrap(), Some(0));
        assert_eq!(reader.read_bit().unwrap(), None);
    }
}
