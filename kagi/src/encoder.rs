//! Encoder trait, the mirror image of [`Decoder`](crate::decoder::Decoder).

/// Encoder trait for converting from type `T` to type `E`.
///
/// Implemented by the source type `T`. The destination type must implement
/// `EncodableTo<T>`.
///
/// ```no_run
/// use kagi::encoder::{EncodableTo, Encoder};
///
/// struct Bytes(Vec<u8>);
/// struct Text(String);
///
/// impl EncodableTo<Text> for Bytes {}
///
/// impl Encoder<Text, Bytes> for Text {
///     type Error = std::convert::Infallible;
///
///     fn encode(&self) -> Result<Bytes, Self::Error> {
///         Ok(Bytes(self.0.as_bytes().to_vec()))
///     }
/// }
/// ```
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that `Self` can be produced by encoding a `T`.
pub trait EncodableTo<T> {}
