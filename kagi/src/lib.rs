//! # kagi
//!
//! Core traits for encoding and decoding in the kagi key-material toolkit.
//!
//! This crate defines the `Decoder` and `Encoder` traits that every layer of
//! kagi implements. A key travels through the layers like this:
//! ```text
//! PEM → Vec<u8> → Der → ASN1Object → Element → RSAPrivateKey
//! ```
//!
//! Each step uses `Decoder` to move one layer up and `Encoder` to move one
//! layer down.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) so that
//! only conversions declared by a crate can be called.
//!
//! ## Example
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use kagi_der::Der;
//! use kagi_asn1::ASN1Object;
//!
//! let der: Der = std::fs::read("key.der")?.decode()?;
//! let asn1: ASN1Object = der.decode()?;
//! ```
//!
//! Encoding works in the reverse direction:
//!
//! ```ignore
//! use kagi::encoder::Encoder;
//! use kagi_der::Der;
//! use kagi_asn1::ASN1Object;
//!
//! let der: Der = asn1.encode()?;
//! let bytes: Vec<u8> = der.encode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
