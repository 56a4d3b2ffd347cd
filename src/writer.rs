use std::io;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

use crate::bits::{Bits, BITS_PER_BYTE};
use crate::config::Endianness;
use crate::error::{Error, WriteError};

const MAX_UINT_WIDTH: usize = u64::BITS as usize;

/// One argument of `Writer::write_values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bit(bool),
    Byte(u8),
    Bytes(Vec<u8>),
    Bits(Bits),
    /// The low `width` bits of `value`, least-significant first.
    Uint { value: u64, width: usize },
}

impl From<bool> for Value {
    fn from(bit: bool) -> Self {
        Value::Bit(bit)
    }
}

impl From<u8> for Value {
    fn from(byte: u8) -> Self {
        Value::Byte(byte)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl From<Bits> for Value {
    fn from(bits: Bits) -> Self {
        Value::Bits(bits)
    }
}

/// Packs bits into bytes.
///
/// Bits fill a pending byte in the order set by the endianness; the byte is
/// committed once all 8 bits are placed. Bits of the pending byte that have
/// not been written are always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Writer {
    bytes: Vec<u8>,
    bit_buffer: u8,
    bit_offset: u8,
    endianness: Endianness,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    pub fn with_endianness(endianness: Endianness) -> Self {
        Writer {
            endianness,
            ..Writer::default()
        }
    }

    /// Continues from committed `bytes` plus a pending byte of which
    /// `pending_bits` bits are already placed. Bits of `pending` beyond
    /// those are cleared.
    pub fn resume(
        bytes: Vec<u8>,
        pending: u8,
        pending_bits: u8,
        endianness: Endianness,
    ) -> Result<Self, Error> {
        if pending_bits as usize >= BITS_PER_BYTE {
            return Err(Error::InvalidBitOffset(pending_bits));
        }
        let mask = match endianness {
            Endianness::LittleEndian => (1u8 << pending_bits).wrapping_sub(1),
            Endianness::BigEndian => !(0xFFu8 >> pending_bits),
        };
        if pending & !mask != 0 {
            debug!(
                "resume dropped unwritten bits {:#010b} of pending byte",
                pending & !mask
            );
        }
        Ok(Writer {
            bytes,
            bit_buffer: pending & mask,
            bit_offset: pending_bits,
            endianness,
        })
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bits placed in the pending byte, in `0..8`.
    pub fn pending_bits(&self) -> u8 {
        self.bit_offset
    }

    /// Total number of bits written.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * BITS_PER_BYTE + self.bit_offset as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len() == 0
    }

    /// Writes one bit. Returns the number of bits written, always 1.
    pub fn write_bit(&mut self, bit: bool) -> usize {
        if bit {
            self.bit_buffer |= 1 << self.endianness.shift(self.bit_offset);
        }
        self.bit_offset += 1;

        if self.bit_offset as usize == BITS_PER_BYTE {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_offset = 0;
        }
        1
    }

    pub fn write_bool(&mut self, bit: bool) -> usize {
        self.write_bit(bit)
    }

    /// Writes bits in sequence order.
    pub fn write_bits(&mut self, bits: &[bool]) -> usize {
        bits.iter().map(|&bit| self.write_bit(bit)).sum()
    }

    /// Writes the 8 bits of `byte`, least-significant first.
    pub fn write_byte(&mut self, byte: u8) -> usize {
        self.write_bits(&Bits::from_byte(byte))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&byte| self.write_byte(byte)).sum()
    }

    /// Writes the low `width` bits of `value`, least-significant first.
    pub fn write_uint(&mut self, value: u64, width: usize) -> Result<usize, Error> {
        if width > MAX_UINT_WIDTH {
            return Err(Error::InvalidWidth(width));
        }
        Ok(self.write_bits(&Bits::from_uint(value, width)))
    }

    /// Writes `value` as two little-endian bytes.
    pub fn write_u16_le(&mut self, value: u16) -> usize {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.write_bytes(&buf)
    }

    /// Writes `value` as four little-endian bytes.
    pub fn write_u32_le(&mut self, value: u32) -> usize {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.write_bytes(&buf)
    }

    /// Writes `value` as eight little-endian bytes.
    pub fn write_u64_le(&mut self, value: u64) -> usize {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        self.write_bytes(&buf)
    }

    pub fn write_value(&mut self, value: &Value) -> Result<usize, Error> {
        match value {
            Value::Bit(bit) => Ok(self.write_bit(*bit)),
            Value::Byte(byte) => Ok(self.write_byte(*byte)),
            Value::Bytes(bytes) => Ok(self.write_bytes(bytes)),
            Value::Bits(bits) => Ok(self.write_bits(bits)),
            Value::Uint { value, width } => self.write_uint(*value, *width),
        }
    }

    /// Writes each value in order and returns the total bits written.
    ///
    /// Stops at the first rejected value. Everything written for earlier
    /// values stays in the writer; the rejected value writes nothing.
    pub fn write_values<I>(&mut self, values: I) -> Result<usize, WriteError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut bits_written = 0;
        for (index, value) in values.into_iter().enumerate() {
            match self.write_value(&value.into()) {
                Ok(count) => bits_written += count,
                Err(source) => {
                    warn!("write argument {} rejected: {}", index, source);
                    return Err(WriteError {
                        index,
                        bits_written,
                        source,
                    });
                }
            }
        }
        Ok(bits_written)
    }

    /// Snapshot of the output. A pending partial byte is included as the
    /// last element; the writer state is unchanged.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = self.bytes.clone();
        if self.bit_offset != 0 {
            bytes.push(self.bit_buffer);
        }
        bytes
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.bit_offset != 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
