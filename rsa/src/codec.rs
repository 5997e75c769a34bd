//! DER encoders and format-detecting decoders for RSA keys.
//!
//! Private keys are read as PKCS#1 first. When the PKCS#1 layer reports that
//! the bytes are a PKCS#8 `PrivateKeyInfo`, they are read again as PKCS#8.
//! Public keys are read as SubjectPublicKeyInfo, then as an X.509
//! certificate, then as a bare PKCS#1 `RSAPublicKey`.
//!
//! `encode_public_key` writes PKCS#1 while `decode_public_key` prefers SPKI;
//! the PKCS#1 attempt at the end is what lets the two round-trip.

use kagi::decoder::Decoder;
use kagi::encoder::Encoder;
use kagi_asn1::ASN1Object;
use kagi_der::{PrimitiveTag, Tag, Tlv};
use kagi_pem::{Label, Pem};
use kagi_pkcs::pkcs1::{self, RSAPrivateKey, RSAPublicKey};
use kagi_pkcs::pkcs8::OneAsymmetricKey;
use kagi_pkcs::{PrivateKey, PublicKey};
use kagi_pkix_types::SubjectPublicKeyInfo;
use kagi_x509::Certificate;
use num_bigint::{BigInt, BigUint};
use tracing::{debug, trace};

use crate::error::{Error, KeyError, Result};
use crate::key::{EncodingVariant, RsaPrivateKey, RsaPublicKey};

/// Decodes a DER private key, reporting which container it came in.
pub fn decode_private_key(der: &[u8]) -> Result<(RsaPrivateKey, EncodingVariant)> {
    trace!(len = der.len(), "decoding private key");

    let attempt: pkcs1::Result<RSAPrivateKey> = der.decode();
    let (key, variant) = match attempt {
        Ok(key) => (key, EncodingVariant::Pkcs1),
        Err(pkcs1::Error::Pkcs8Detected) => {
            debug!("private key is PKCS#8, decoding as PrivateKeyInfo");
            let info: OneAsymmetricKey = der.decode().map_err(KeyError::from)?;
            match PrivateKey::try_from(&info).map_err(KeyError::from)? {
                PrivateKey::Rsa(key) => (key, EncodingVariant::Pkcs8),
                other => return Err(Error::WrongKeyType(other.algorithm())),
            }
        }
        Err(e) => return Err(KeyError::from(e).into()),
    };

    let key = RsaPrivateKey::try_from(&key).map_err(KeyError::from)?;
    Ok((key, variant))
}

fn parse_spki(der: &[u8]) -> kagi_pkix_types::Result<SubjectPublicKeyInfo> {
    let obj = ASN1Object::try_from(der)?;
    obj.decode()
}

/// Decodes a DER public key from a SubjectPublicKeyInfo, a certificate or a
/// PKCS#1 `RSAPublicKey`, in that order.
pub fn decode_public_key(der: &[u8]) -> Result<RsaPublicKey> {
    trace!(len = der.len(), "decoding public key");

    let spki = match parse_spki(der) {
        Ok(spki) => spki,
        Err(spki_err) => {
            debug!(error = %spki_err, "not a SubjectPublicKeyInfo, trying certificate");
            let cert: kagi_x509::error::Result<Certificate> = der.decode();
            match cert {
                Ok(cert) => cert.into_subject_public_key_info(),
                Err(cert_err) => {
                    debug!(error = %cert_err, "not a certificate, trying PKCS#1");
                    let attempt: pkcs1::Result<RSAPublicKey> = der.decode();
                    let Ok(key) = attempt else {
                        return Err(KeyError::Certificate(cert_err).into());
                    };
                    return Ok(RsaPublicKey::try_from(&key).map_err(KeyError::from)?);
                }
            }
        }
    };

    match PublicKey::try_from(&spki).map_err(KeyError::from)? {
        PublicKey::Rsa(key) => Ok(RsaPublicKey::try_from(&key).map_err(KeyError::from)?),
        other => Err(Error::WrongKeyType(other.algorithm())),
    }
}

/// Decodes a DER PKCS#1 `RSAPublicKey` and nothing else.
pub fn decode_pkcs1_public_key(der: &[u8]) -> Result<RsaPublicKey> {
    let key: RSAPublicKey = der.decode().map_err(KeyError::from)?;
    Ok(RsaPublicKey::try_from(&key).map_err(KeyError::from)?)
}

/// Encodes a private key as PKCS#1 or PKCS#8 DER.
pub fn encode_private_key(key: &RsaPrivateKey, variant: EncodingVariant) -> Result<Vec<u8>> {
    let pkcs1 = RSAPrivateKey::from(key);
    let der = match variant {
        EncodingVariant::Pkcs1 => {
            Encoder::<RSAPrivateKey, Vec<u8>>::encode(&pkcs1).map_err(kagi_pkcs::Error::from)?
        }
        EncodingVariant::Pkcs8 => {
            let info = PrivateKey::Rsa(pkcs1).to_pkcs8()?;
            Encoder::<OneAsymmetricKey, Vec<u8>>::encode(&info).map_err(kagi_pkcs::Error::from)?
        }
    };
    trace!(len = der.len(), %variant, "encoded private key");
    Ok(der)
}

fn integer_tlv(value: &BigUint) -> Tlv {
    let bytes = BigInt::from(value.clone()).to_signed_bytes_be();
    Tlv::new_primitive(Tag::universal(PrimitiveTag::Integer), bytes)
}

/// Encodes a public key as PKCS#1 `RSAPublicKey` DER.
pub fn encode_public_key(key: &RsaPublicKey) -> Vec<u8> {
    Tlv::new_constructed(
        Tag::universal(PrimitiveTag::Sequence),
        vec![integer_tlv(key.n()), integer_tlv(key.e())],
    )
    .to_bytes()
}

/// Encodes a public key as a SubjectPublicKeyInfo with `rsaEncryption`.
pub fn encode_public_key_spki(key: &RsaPublicKey) -> Result<Vec<u8>> {
    let spki = SubjectPublicKeyInfo::try_from(&RSAPublicKey::from(key))?;
    let element = spki.encode().map_err(kagi_pkcs::Error::from)?;
    let der: Vec<u8> = element.encode().map_err(kagi_pkcs::Error::from)?;
    Ok(der)
}

/// `RSA PRIVATE KEY` or `PRIVATE KEY` armor, depending on `variant`.
pub fn private_key_to_pem(key: &RsaPrivateKey, variant: EncodingVariant) -> Result<String> {
    let label = match variant {
        EncodingVariant::Pkcs1 => Label::RSAPrivateKey,
        EncodingVariant::Pkcs8 => Label::PrivateKey,
    };
    let der = encode_private_key(key, variant)?;
    Ok(Pem::from_bytes(label, &der).to_string())
}

/// `PUBLIC KEY` armor around a SubjectPublicKeyInfo.
pub fn public_key_to_pem(key: &RsaPublicKey) -> Result<String> {
    let der = encode_public_key_spki(key)?;
    Ok(Pem::from_bytes(Label::PublicKey, &der).to_string())
}

/// `RSA PUBLIC KEY` armor around a PKCS#1 `RSAPublicKey`.
pub fn public_key_to_pkcs1_pem(key: &RsaPublicKey) -> String {
    Pem::from_bytes(Label::RSAPublicKey, &encode_public_key(key)).to_string()
}
