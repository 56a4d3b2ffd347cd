//! Bit-addressable reading and writing over byte-oriented sources.
//!
//! A [`Reader`] walks a [`ByteSource`] one bit at a time and hands back the
//! bits it read as a [`ReadOutcome`], which interprets them as signed or
//! unsigned integers of any width. A [`Writer`] packs bits back into bytes.
//!
//! ```
//! use bitcursor::Reader;
//!
//! let mut reader = Reader::from_bytes([128, 1, 15, 204]);
//! reader.set_bit_position(22);
//! assert_eq!(reader.read_bytes(1).as_u8().unwrap(), 0b0011_0000);
//! ```

use log::info;

mod bits;
mod config;
mod error;
mod outcome;
mod reader;
mod source;
mod writer;

#[cfg(test)]
mod tests;

pub use bits::Bits;
pub use config::{Endianness, ReaderConfig};
pub use error::{Error, PartialRead, WriteError};
pub use outcome::ReadOutcome;
pub use reader::Reader;
pub use source::{ByteSource, MemorySource, StreamSource};
pub use writer::{Value, Writer};

// Initializes logging for the library
pub fn init() {
    let installed = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .is_ok();
    if installed {
        info!("bitcursor logging initialized");
    }
}
