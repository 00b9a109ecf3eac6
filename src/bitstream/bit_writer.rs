// src/bitstream/bit_writer.rs

use byteorder::WriteBytesExt;
use std::io::Write;

use crate::bitstream::BitSink;
use crate::utils::error::Result;

/// A bit-level writer over any byte writer.
///
/// Bits fill each byte from the most significant end. `close` (or
/// `into_inner`) pads the final partial byte with zeros.
pub struct BitWriter<W: Write> {
    writer: W,
    current_byte: u8,
    bits_in_current: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Creates a new BitWriter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_byte: 0,
            bits_in_current: 0,
            bits_written: 0,
        }
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Pads and flushes the final byte, then hands back the writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.close()?;
        Ok(self.writer)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_current);
        }
        self.bits_in_current += 1;
        self.bits_written += 1;

        if self.bits_in_current == 8 {
            self.writer.write_u8(self.current_byte)?;
            self.current_byte = 0;
            self.bits_in_current = 0;
        }
        Ok(())
    }

    fn bits_written(&self) -> u64 {
        self.bits_written
    }

    fn close(&mut self) -> Result<()> {
        if self.bits_in_current > 0 {
            self.writer.write_u8(self.current_byte)?;
            self.current_byte = 0;
            self.bits_in_current = 0;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_bytes() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(8, 0xA5).unwrap();
        writer.write_bits(16, 0x0102).unwrap();
        assert_eq!(writer.bits_written(), 24);
        assert_eq!(writer.into_inner().unwrap(), vec![0xA5, 0x01, 0x02]);
    }

    #[test]
    fn test_partial_byte_is_zero_padded() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bits(2, 0b01).unwrap();
        assert_eq!(writer.bits_written(), 3);
        // Nothing reaches the writer until the byte is full or closed.
        assert!(writer.get_ref().is_empty());
        assert_eq!(writer.into_inner().unwrap(), vec![0b1010_0000]);
    }

    #[test]
    fn test_magic_number_layout() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(32, 0xFACE_8200).unwrap();
        assert_eq!(writer.into_inner().unwrap(), vec![0xFA, 0xCE, 0x82, 0x00]);
    }
}
