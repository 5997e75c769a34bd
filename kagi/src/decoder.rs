//! Decoder trait for type-safe conversions between key representations.
//!
//! A conversion is declared with two impls:
//!
//! 1. `DecodableFrom<T>` on the destination type, marking the pair as valid.
//! 2. `Decoder<T, D>` on the source type, doing the work.
//!
//! ```no_run
//! use kagi::decoder::{DecodableFrom, Decoder};
//!
//! struct Armored(String);
//! struct Payload(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct EmptyInput;
//!
//! impl DecodableFrom<Armored> for Payload {}
//!
//! impl Decoder<Armored, Payload> for Armored {
//!     type Error = EmptyInput;
//!
//!     fn decode(&self) -> Result<Payload, Self::Error> {
//!         if self.0.is_empty() {
//!             return Err(EmptyInput);
//!         }
//!         Ok(Payload(self.0.as_bytes().to_vec()))
//!     }
//! }
//! ```
//!
//! When a source type decodes into several destinations, the caller picks one
//! with a type annotation:
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use kagi_der::Der;
//!
//! let der: Der = vec![0x05, 0x00].decode()?;
//! ```

/// Converts `self` (a `T`) into a `D`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not a valid encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that `Self` can be decoded from a `T`.
///
/// It carries no methods. Without it any type could claim to decode into any
/// other type; with it the compiler rejects undeclared conversions.
pub trait DecodableFrom<T> {}
