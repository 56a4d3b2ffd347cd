// config.rs - Cursor configuration

/// Which physical bit of a byte is consumed (or filled) first.
///
/// This is bit order within a byte, not the byte order of multi-byte words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// Least-significant bit first.
    #[default]
    LittleEndian,
    /// Most-significant bit first.
    BigEndian,
}

impl Endianness {
    /// Shift of the physical bit holding logical bit `index` (0..8) of a byte.
    #[inline]
    pub(crate) fn shift(self, index: u8) -> u8 {
        match self {
            Endianness::LittleEndian => index,
            Endianness::BigEndian => 7 - index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    pub endianness: Endianness,

    // Reads past the end of the source yield zero bits instead of
    // reporting `Error::Exhausted`.
    pub allow_read_past_end: bool,
}

impl ReaderConfig {
    /// Configuration for parsers that must detect truncated input.
    pub fn strict() -> Self {
        Self {
            allow_read_past_end: false,
            ..Self::default()
        }
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            endianness: Endianness::LittleEndian,
            allow_read_past_end: true,
        }
    }
}
