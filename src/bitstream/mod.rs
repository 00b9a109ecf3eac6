//! Bit-granular sources and sinks.
//!
//! The codec never touches bytes directly. It reads through a [`BitSource`]
//! and writes through a [`BitSink`]; [`BitReader`] and [`BitWriter`] adapt any
//! `std::io::Read` / `std::io::Write` to those traits, most significant bit
//! first.

pub mod bit_reader;
pub mod bit_writer;

pub use bit_reader::BitReader;
pub use bit_writer::BitWriter;

use bitvec::prelude::*;

use crate::utils::error::{HuffError, Result};

/// Widest field a single `read_bits` / `write_bits` call can carry.
pub const MAX_FIELD_BITS: u8 = 32;

/// A destination for individual bits.
pub trait BitSink {
    /// Writes a single bit.
    fn write_bit(&mut self, bit: bool) -> Result<()>;

    /// Total number of bits accepted so far, padding excluded.
    fn bits_written(&self) -> u64;

    /// Flushes a partial final byte, padding it with zeros.
    fn close(&mut self) -> Result<()>;

    /// Writes `value` as a `count`-bit field, most significant bit first.
    ///
    /// Fails with `InvalidArgument` if `value` needs more than `count` bits.
    fn write_bits(&mut self, count: u8, value: u32) -> Result<()> {
        check_field_width(count)?;
        if count < MAX_FIELD_BITS && value >> count != 0 {
            return Err(HuffError::InvalidArgument(format!(
                "value {:#x} does not fit in {} bits",
                value, count
            )));
        }
        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Writes every bit of a code in order.
    fn write_code(&mut self, code: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in code.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }
}

/// A source of individual bits. `Ok(None)` is the end-of-input signal.
pub trait BitSource {
    /// Reads a single bit.
    fn read_bit(&mut self) -> Result<Option<bool>>;

    /// Reads a `count`-bit field, most significant bit first.
    ///
    /// Returns `Ok(None)` if the input ends before the whole field is read;
    /// the bits of an incomplete field are lost.
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        check_field_width(count)?;
        let mut value = 0u32;
        for _ in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        (**self).write_bit(bit)
    }

    fn bits_written(&self) -> u64 {
        (**self).bits_written()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn read_bit(&mut self) -> Result<Option<bool>> {
        (**self).read_bit()
    }
}

/// An in-memory sink, handy for codes and for sizing a header without I/O.
impl BitSink for BitVec<u8, Msb0> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.push(bit);
        Ok(())
    }

    fn bits_written(&self) -> u64 {
        self.len() as u64
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

fn check_field_width(count: u8) -> Result<()> {
    if count > MAX_FIELD_BITS {
        return Err(HuffError::InvalidArgument(format!(
            "bit field of {} bits is wider than {}",
            count, MAX_FIELD_BITS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitvec_sink_collects_msb_first() {
        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        bits.write_bits(3, 0b101).unwrap();
        bits.write_bit(false).unwrap();
        assert_eq!(bits.bits_written(), 4);
        assert_eq!(bits, bitvec![u8, Msb0; 1, 0, 1, 0]);
    }

    #[test]
    fn test_field_wider_than_32_bits_is_rejected() {
        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        assert!(matches!(
            bits.write_bits(33, 0),
            Err(HuffError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_value_wider_than_field_is_rejected() {
        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        assert!(matches!(
            bits.write_bits(4, 0x1F),
            Err(HuffError::InvalidArgument(_))
        ));
        assert!(matches!(
            bits.write_bits(0, 1),
            Err(HuffError::InvalidArgument(_))
        ));
        assert!(bits.is_empty());

        bits.write_bits(4, 0xF).unwrap();
        bits.write_bits(32, u32::MAX).unwrap();
        assert_eq!(bits.bits_written(), 36);
    }

    #[test]
    fn test_write_code() {
        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        let code = bitvec![u8, Msb0; 0, 1, 1];
        bits.write_code(&code).unwrap();
        bits.write_code(&code).unwrap();
        assert_eq!(bits, bitvec![u8, Msb0; 0, 1, 1, 0, 1, 1]);
    }
}
