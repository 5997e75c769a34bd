//! PKIX types shared by X.509 certificates and PKCS key containers.
//!
//! - [`AlgorithmIdentifier`] (RFC 5280 4.1.1.2)
//! - [`SubjectPublicKeyInfo`] (RFC 5280 4.1.2.7)
//! - [`Name`] (RFC 5280 4.1.2.4)

pub mod algorithm;
pub mod error;
pub mod name;
pub mod oid_name;
pub mod subject_public_key_info;

pub use algorithm::{AlgorithmIdentifier, AlgorithmParameters};
pub use error::{Error, Result};
pub use name::{AttributeTypeAndValue, Name, RelativeDistinguishedName};
pub use oid_name::OidName;
pub use subject_public_key_info::SubjectPublicKeyInfo;
