//! RSA key codec.
//!
//! Reads RSA keys from PKCS#1, PKCS#8, SubjectPublicKeyInfo and X.509
//! certificates, as DER, PEM or transport text, and writes them back out.
//!
//! ```no_run
//! use kagi_rsa::{EncodingVariant, parse_private_key_file, private_key_to_pem};
//!
//! # fn run() -> kagi_rsa::Result<()> {
//! let (key, variant) = parse_private_key_file("server.key")?;
//! if variant == EncodingVariant::Pkcs1 {
//!     println!("{}", private_key_to_pem(&key, EncodingVariant::Pkcs8)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod file;
pub mod key;
pub mod transport;

pub use codec::{
    decode_pkcs1_public_key, decode_private_key, decode_public_key, encode_private_key,
    encode_public_key, encode_public_key_spki, private_key_to_pem, public_key_to_pem,
    public_key_to_pkcs1_pem,
};
pub use error::{EncodingError, Error, KeyError, Result, ValidationError};
pub use file::{
    parse_private_key_file, parse_private_key_pem, parse_public_key_file, parse_public_key_pem,
};
pub use key::{EncodingVariant, RsaPrivateKey, RsaPublicKey};
