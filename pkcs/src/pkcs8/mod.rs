//! PKCS#8: Private-Key Information Syntax
//!
//! [RFC 5958](https://datatracker.ietf.org/doc/html/rfc5958) (Asymmetric Key
//! Packages), which obsoletes RFC 5208. Encrypted keys are not handled.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use kagi_pkix_types::{AlgorithmIdentifier, AlgorithmParameters};
pub use types::{OneAsymmetricKey, PrivateKeyInfo, Version};
