use std::ops::{Deref, DerefMut};

pub(crate) const BITS_PER_BYTE: usize = 8;

const MAX_WIDTH: usize = u64::BITS as usize;

/// An ordered sequence of bits. Index 0 is the least-significant bit of
/// every integer interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bits(Vec<bool>);

/// Unsigned value of `bits`, index 0 least significant. Bits at index 64 and
/// above do not fit and are ignored.
fn unsigned(bits: &[bool]) -> u64 {
    bits.iter()
        .take(MAX_WIDTH)
        .enumerate()
        .fold(0u64, |acc, (idx, &bit)| if bit { acc | (1 << idx) } else { acc })
}

/// Sign-extends the low `width` bits of `value`.
fn sign_extend(value: u64, width: usize) -> i64 {
    match width {
        0 => 0,
        w if w >= MAX_WIDTH => value as i64,
        w => {
            let shift = (MAX_WIDTH - w) as u32;
            ((value << shift) as i64) >> shift
        }
    }
}

macro_rules! impl_unsigned {
    ($($name:ident -> $t:ty),*) => {
        $(
            #[doc = concat!("Unsigned value truncated to `", stringify!($t), "`.")]
            pub fn $name(&self) -> $t {
                self.as_u64() as $t
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($name:ident -> $t:ty),*) => {
        $(
            #[doc = concat!("Two's-complement value of the whole sequence, wrapped to `", stringify!($t), "`.")]
            pub fn $name(&self) -> $t {
                self.as_signed(self.len()) as $t
            }
        )*
    };
}

impl Bits {
    pub fn new() -> Self {
        Bits(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Bits(Vec::with_capacity(capacity))
    }

    /// The low `width` bits of `value`, least-significant first. Widths past
    /// 64 are padded with `false`.
    pub fn from_uint(value: u64, width: usize) -> Self {
        (0..width)
            .map(|idx| idx < MAX_WIDTH && (value >> idx) & 1 == 1)
            .collect()
    }

    /// The 8 bits of `byte`, least-significant first.
    pub fn from_byte(byte: u8) -> Self {
        Self::from_uint(byte as u64, BITS_PER_BYTE)
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Sum of `2^i` over every set bit `i`.
    pub fn as_u64(&self) -> u64 {
        unsigned(&self.0)
    }

    /// The low `width` bits read as a `width`-bit two's-complement number,
    /// sign-extended to 64 bits.
    ///
    /// A single set bit at width 1 is `-1`. Width 0 is always 0.
    pub fn as_signed(&self, width: usize) -> i64 {
        sign_extend(self.as_u64(), width)
    }

    impl_unsigned!(as_u8 -> u8, as_u16 -> u16, as_u32 -> u32, as_usize -> usize);

    impl_signed!(as_i8 -> i8, as_i16 -> i16, as_i32 -> i32, as_i64 -> i64, as_isize -> isize);

    /// True when the signed value over the whole sequence is positive. A
    /// sequence whose top bit is set is negative and reads as `false`.
    pub fn as_bool(&self) -> bool {
        self.as_signed(self.len()) > 0
    }

    /// Repacks the sequence into bytes, 8 bits per byte with the same bit
    /// order. A trailing group shorter than 8 bits forms its own byte.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.0
            .chunks(BITS_PER_BYTE)
            .map(|chunk| unsigned(chunk) as u8)
            .collect()
    }
}

impl Deref for Bits {
    type Target = Vec<bool>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bits {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<bool>> for Bits {
    fn from(bits: Vec<bool>) -> Self {
        Bits(bits)
    }
}

impl From<&[bool]> for Bits {
    fn from(bits: &[bool]) -> Self {
        Bits(bits.to_vec())
    }
}

impl<const N: usize> From<[bool; N]> for Bits {
    fn from(bits: [bool; N]) -> Self {
        Bits(bits.to_vec())
    }
}

impl From<Bits> for Vec<bool> {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Bits(iter.into_iter().collect())
    }
}

impl Extend<bool> for Bits {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Bits {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bits {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
