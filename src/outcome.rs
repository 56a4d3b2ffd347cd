use crate::bits::Bits;
use crate::error::{Error, PartialRead};

/// The bits produced by one read, plus the error that stopped it early.
///
/// Each interpretation decodes whatever bits were obtained (an empty
/// sequence decodes as 0). On a clean read the value comes back as `Ok`; on
/// a short read it comes back inside `PartialRead` next to the error, so a
/// caller can either propagate with `?` or keep the partial value.
#[derive(Debug)]
pub struct ReadOutcome {
    bits: Bits,
    error: Option<Error>,
}

macro_rules! impl_interpret {
    ($($name:ident -> $t:ty),*) => {
        $(
            pub fn $name(&self) -> Result<$t, PartialRead<$t>> {
                self.interpret(self.bits.$name())
            }
        )*
    };
}

impl ReadOutcome {
    pub fn new(bits: Bits, error: Option<Error>) -> Self {
        ReadOutcome { bits, error }
    }

    pub fn complete(bits: Bits) -> Self {
        ReadOutcome { bits, error: None }
    }

    pub fn bits(&self) -> &Bits {
        &self.bits
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Number of bits actually obtained.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Bits, Option<Error>) {
        (self.bits, self.error)
    }

    pub fn into_bits(self) -> Result<Bits, PartialRead<Bits>> {
        match self.error {
            None => Ok(self.bits),
            Some(error) => Err(PartialRead::new(self.bits, error)),
        }
    }

    fn interpret<T: std::fmt::Debug>(&self, value: T) -> Result<T, PartialRead<T>> {
        match &self.error {
            None => Ok(value),
            Some(error) => Err(PartialRead::new(value, error.duplicate())),
        }
    }

    pub fn as_signed(&self, width: usize) -> Result<i64, PartialRead<i64>> {
        self.interpret(self.bits.as_signed(width))
    }

    pub fn as_bytes(&self) -> Result<Vec<u8>, PartialRead<Vec<u8>>> {
        self.interpret(self.bits.as_bytes())
    }

    impl_interpret!(
        as_bool -> bool,
        as_u8 -> u8,
        as_u16 -> u16,
        as_u32 -> u32,
        as_u64 -> u64,
        as_usize -> usize,
        as_i8 -> i8,
        as_i16 -> i16,
        as_i32 -> i32,
        as_i64 -> i64,
        as_isize -> isize
    );
}
