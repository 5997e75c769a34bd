//! PKCS#1 (RFC 8017) and PKCS#8 (RFC 5958) key structures.
//!
//! [`PrivateKey`] and [`PublicKey`] open the algorithm-agnostic containers
//! (PKCS#8 and SubjectPublicKeyInfo) so callers can match on the algorithm.

pub mod error;
pub mod pkcs1;
pub mod pkcs8;
pub mod private_key;
pub mod public_key;

pub use error::{Error, Result};
pub use private_key::{KeyAlgorithm, PrivateKey};
pub use public_key::PublicKey;
