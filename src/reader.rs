use std::io::{self, SeekFrom};

use log::{debug, trace};

use crate::bits::{Bits, BITS_PER_BYTE};
use crate::config::{Endianness, ReaderConfig};
use crate::error::Error;
use crate::outcome::ReadOutcome;
use crate::source::{ByteSource, MemorySource};

/// Bit cursor over a byte source.
///
/// The cursor is a byte position plus a bit index in `0..8` within that
/// byte. Which physical bit the index selects depends on the configured
/// endianness. Positioning never fails: out-of-range requests are clamped.
#[derive(Debug)]
pub struct Reader<S = MemorySource> {
    source: Option<S>,
    byte_position: usize,
    bit_position: u8,
    bits_read: usize,
    config: ReaderConfig,
    // Last byte pulled from the source, keyed by its position.
    cached: Option<(usize, u8)>,
}

impl Reader<MemorySource> {
    /// Cursor over an in-memory copy of `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Reader::new(MemorySource::new(bytes))
    }

    /// Cursor with no source at all. Every read is exhausted.
    pub fn detached() -> Self {
        Reader::from_parts(None, ReaderConfig::default())
    }
}

impl<S: ByteSource> Reader<S> {
    pub fn new(source: S) -> Self {
        Reader::from_parts(Some(source), ReaderConfig::default())
    }

    fn from_parts(source: Option<S>, config: ReaderConfig) -> Self {
        Reader {
            source,
            byte_position: 0,
            bit_position: 0,
            bits_read: 0,
            config,
            cached: None,
        }
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ReaderConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn into_source(self) -> Option<S> {
        self.source
    }

    pub fn endianness(&self) -> Endianness {
        self.config.endianness
    }

    pub fn set_endianness(&mut self, endianness: Endianness) -> &mut Self {
        self.config.endianness = endianness;
        self
    }

    /// Read bits of each byte from least- to most-significant.
    pub fn set_little_endian(&mut self) -> &mut Self {
        self.set_endianness(Endianness::LittleEndian)
    }

    /// Read bits of each byte from most- to least-significant.
    pub fn set_big_endian(&mut self) -> &mut Self {
        self.set_endianness(Endianness::BigEndian)
    }

    pub fn allows_read_past_end(&self) -> bool {
        self.config.allow_read_past_end
    }

    pub fn set_allow_read_past_end(&mut self, allow: bool) -> &mut Self {
        self.config.allow_read_past_end = allow;
        self
    }

    /// Bits produced since the last repositioning.
    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    pub fn reset_bits_read(&mut self) -> &mut Self {
        self.bits_read = 0;
        self
    }

    /// Byte position of the cursor.
    pub fn position(&self) -> usize {
        self.byte_position
    }

    /// Moves to byte `index`, keeping the bit index. Negative requests clamp to 0.
    pub fn set_position(&mut self, index: isize) -> &mut Self {
        if index < 0 {
            debug!("byte position {} clamped to 0", index);
        }
        self.byte_position = usize::try_from(index).unwrap_or(0);
        self.bits_read = 0;
        self
    }

    /// Moves the byte position by `delta` and returns the new position.
    pub fn offset_position(&mut self, delta: isize) -> usize {
        let target = self.byte_position.saturating_add_signed(delta);
        if delta < 0 && delta.unsigned_abs() > self.byte_position {
            debug!("byte offset {} from {} clamped to 0", delta, self.byte_position);
        }
        self.byte_position = target;
        self.bits_read = 0;
        self.byte_position
    }

    /// Bit index within the current byte, always in `0..8`.
    pub fn bit_position(&self) -> u8 {
        self.bit_position
    }

    /// Absolute offset of the cursor in bits from the start of the source.
    pub fn absolute_bit_position(&self) -> usize {
        self.byte_position
            .saturating_mul(BITS_PER_BYTE)
            .saturating_add(self.bit_position as usize)
    }

    /// Sets the bit index, counted from bit 0 of the current byte.
    ///
    /// Indices past 7 move forward `index / 8` bytes. Negative indices move
    /// back a byte for every 8 bits, so `-1` is bit 7 of the previous byte.
    /// The cursor never moves before bit 0 of byte 0.
    pub fn set_bit_position(&mut self, index: isize) -> &mut Self {
        let bits_per_byte = BITS_PER_BYTE as isize;
        let mut index = index;
        let mut position = self.byte_position;

        if index < 0 {
            let wanted = index.unsigned_abs().div_ceil(BITS_PER_BYTE);
            let back = std::cmp::min(wanted, position);
            position -= back;
            let restored = isize::try_from(back)
                .unwrap_or(isize::MAX)
                .saturating_mul(bits_per_byte);
            index = index.saturating_add(restored);
            if index < 0 {
                debug!("bit position clamped to bit 0 of byte {}", position);
                index = 0;
            }
        }

        self.byte_position = position.saturating_add((index / bits_per_byte) as usize);
        self.bit_position = (index % bits_per_byte) as u8;
        self.bits_read = 0;
        self
    }

    /// Shifts the bit index by `delta`, carrying into the byte position.
    pub fn offset_bit_position(&mut self, delta: isize) -> &mut Self {
        self.set_bit_position((self.bit_position as isize).saturating_add(delta))
    }

    fn current_byte(&mut self) -> Result<u8, Error> {
        if let Some((position, byte)) = self.cached {
            if position == self.byte_position {
                return Ok(byte);
            }
        }

        let source = self.source.as_mut().ok_or(Error::Exhausted)?;
        source.seek(SeekFrom::Start(self.byte_position as u64))?;

        let mut buf = [0u8; 1];
        source.read(&mut buf)?;
        self.cached = Some((self.byte_position, buf[0]));
        Ok(buf[0])
    }

    fn advance(&mut self) {
        self.bit_position += 1;
        if self.bit_position as usize == BITS_PER_BYTE {
            self.bit_position = 0;
            self.byte_position += 1;
        }
    }

    fn next_bit(&mut self, pad_past_end: bool) -> Result<bool, Error> {
        let byte = match self.current_byte() {
            Ok(byte) => byte,
            Err(Error::Exhausted) if pad_past_end => return Ok(false),
            Err(err) => {
                trace!(
                    "read failed at byte {} bit {}: {}",
                    self.byte_position,
                    self.bit_position,
                    err
                );
                return Err(err);
            }
        };

        let bit = (byte >> self.config.endianness.shift(self.bit_position)) & 1 == 1;
        self.advance();
        self.bits_read += 1;
        Ok(bit)
    }

    /// Reads the bit under the cursor and advances by one.
    ///
    /// Past the end of the source this yields `false` without moving when
    /// reading past the end is allowed, and `Error::Exhausted` otherwise.
    pub fn read_bit(&mut self) -> Result<bool, Error> {
        self.next_bit(self.config.allow_read_past_end)
    }

    /// Reads `count` bits; the first bit read is the least significant.
    ///
    /// In strict mode the outcome holds only the bits obtained before the
    /// source ran out, alongside the error.
    pub fn read_bits(&mut self, count: usize) -> ReadOutcome {
        let mut bits = Bits::with_capacity(count);
        for _ in 0..count {
            match self.read_bit() {
                Ok(bit) => bits.push(bit),
                Err(err) => return ReadOutcome::new(bits, Some(err)),
            }
        }
        ReadOutcome::complete(bits)
    }

    /// Reads `count * 8` bits.
    pub fn read_bytes(&mut self, count: usize) -> ReadOutcome {
        self.read_bits(count.saturating_mul(BITS_PER_BYTE))
    }

    // Eight bits or nothing: a failed byte leaves the cursor where it was.
    fn read_whole_byte(&mut self) -> Result<u8, Error> {
        let saved = (self.byte_position, self.bit_position, self.bits_read);
        let mut value = 0u8;
        for idx in 0..BITS_PER_BYTE {
            match self.next_bit(false) {
                Ok(bit) => value |= (bit as u8) << idx,
                Err(err) => {
                    (self.byte_position, self.bit_position, self.bits_read) = saved;
                    return Err(err);
                }
            }
        }
        Ok(value)
    }

    /// Independent cursor over a copy of the source content, at the same
    /// bit offset and with the same configuration.
    ///
    /// The original cursor and its source offset are left untouched. The
    /// copy counts its own bits from zero.
    pub fn duplicate(&mut self) -> Result<Reader<MemorySource>, Error> {
        let source = match self.source.as_mut() {
            Some(source) => Some(MemorySource::new(source.read_all()?)),
            None => None,
        };
        trace!(
            "duplicating cursor at byte {} bit {}",
            self.byte_position,
            self.bit_position
        );

        let mut copy = Reader::from_parts(source, self.config);
        copy.byte_position = self.byte_position;
        copy.bit_position = self.bit_position;
        Ok(copy)
    }
}

impl<S: ByteSource> io::Read for Reader<S> {
    /// Reads whole bytes from the cursor, whatever its bit alignment, until
    /// the source runs out. Zero padding is never produced here.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.read_whole_byte() {
                Ok(byte) => {
                    *slot = byte;
                    count += 1;
                }
                Err(Error::Exhausted) => break,
                Err(err) if count == 0 => return Err(err.into()),
                Err(_) => break,
            }
        }
        Ok(count)
    }
}
