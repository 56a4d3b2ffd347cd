use std::io::{self, Read, Seek, SeekFrom};

use crate::error::Error;

/// A seekable sequence of bytes that the bit cursor pulls from.
///
/// Seeking clamps instead of failing: the resulting offset is never negative,
/// and end-relative requests are capped at the source length. Offsets past
/// the end are allowed for start- and current-relative requests; reads there
/// report `Error::Exhausted`.
pub trait ByteSource {
    /// Fills `buf` from the current offset and advances past the bytes read.
    ///
    /// Returns `Ok(buf.len())` when the buffer was filled. When fewer bytes
    /// are available, the available prefix is still copied and
    /// `Err(Error::Exhausted)` is returned.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Repositions the source and returns the new absolute offset.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error>;

    /// Total length in bytes. The current offset is preserved.
    fn length(&mut self) -> Result<u64, Error> {
        let current = self.seek(SeekFrom::Current(0))?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(current))?;
        Ok(end)
    }

    /// Copies out the whole content. The current offset is preserved.
    fn read_all(&mut self) -> Result<Vec<u8>, Error> {
        let current = self.seek(SeekFrom::Current(0))?;
        let len = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(0))?;

        let mut buf = vec![0u8; len as usize];
        let result = self.read(&mut buf);
        self.seek(SeekFrom::Start(current))?;
        result?;
        Ok(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error> {
        (**self).seek(pos)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error> {
        (**self).seek(pos)
    }
}

// Applies a signed delta to an offset, saturating at zero.
fn offset_by(base: u64, delta: i64) -> u64 {
    if delta < 0 {
        base.saturating_sub(delta.unsigned_abs())
    } else {
        base.saturating_add(delta as u64)
    }
}

/// In-memory byte source over an owned buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    bytes: Vec<u8>,
    offset: u64,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            bytes: bytes.into(),
            offset: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let available = self.bytes.get(start..).unwrap_or(&[]);
        let count = std::cmp::min(buf.len(), available.len());

        buf[..count].copy_from_slice(&available[..count]);
        self.offset += count as u64;

        if count < buf.len() {
            return Err(Error::Exhausted);
        }
        Ok(count)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error> {
        let len = self.bytes.len() as u64;
        self.offset = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => offset_by(self.offset, delta),
            SeekFrom::End(delta) => std::cmp::min(offset_by(len, delta), len),
        };
        Ok(self.offset)
    }

    fn length(&mut self) -> Result<u64, Error> {
        Ok(self.bytes.len() as u64)
    }
}

/// Byte source wrapping an externally owned seekable stream.
#[derive(Debug)]
pub struct StreamSource<T> {
    inner: T,
}

impl<T: Read + Seek> StreamSource<T> {
    pub fn new(inner: T) -> Self {
        StreamSource { inner }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Seek> ByteSource for StreamSource<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => return Err(Error::Exhausted),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error> {
        let target = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => offset_by(self.inner.stream_position()?, delta),
            SeekFrom::End(delta) => {
                let len = self.inner.seek(SeekFrom::End(0))?;
                std::cmp::min(offset_by(len, delta), len)
            }
        };
        Ok(self.inner.seek(SeekFrom::Start(target))?)
    }
}
