use std::fmt;
use std::str::FromStr;

use kagi_asn1::Integer;
use kagi_pkcs::pkcs1::{RSAPrivateKey, RSAPublicKey, Version};
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{Error, ValidationError};

/// Which container a private key was read from or is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingVariant {
    /// `RSAPrivateKey`, armored as `RSA PRIVATE KEY`.
    Pkcs1,
    /// `PrivateKeyInfo` around the PKCS#1 key, armored as `PRIVATE KEY`.
    Pkcs8,
}

impl EncodingVariant {
    pub fn number(&self) -> u8 {
        match self {
            EncodingVariant::Pkcs1 => 1,
            EncodingVariant::Pkcs8 => 8,
        }
    }
}

impl fmt::Display for EncodingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingVariant::Pkcs1 => write!(f, "pkcs1"),
            EncodingVariant::Pkcs8 => write!(f, "pkcs8"),
        }
    }
}

impl TryFrom<u8> for EncodingVariant {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EncodingVariant::Pkcs1),
            8 => Ok(EncodingVariant::Pkcs8),
            other => Err(Error::UnsupportedVariant(other)),
        }
    }
}

impl FromStr for EncodingVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pkcs1" => Ok(EncodingVariant::Pkcs1),
            "pkcs8" => Ok(EncodingVariant::Pkcs8),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

// 2^31
const PUBLIC_EXPONENT_LIMIT: u64 = 1 << 31;

fn check_public(n: &BigUint, e: &BigUint) -> Result<(), ValidationError> {
    if n.is_zero() {
        return Err(ValidationError::ZeroModulus);
    }
    if *e <= BigUint::one() || *e >= BigUint::from(PUBLIC_EXPONENT_LIMIT) {
        return Err(ValidationError::PublicExponentOutOfRange);
    }
    Ok(())
}

fn unsigned(value: &Integer, field: &'static str) -> Result<BigUint, ValidationError> {
    value.to_biguint().ok_or(ValidationError::Negative(field))
}

/// An RSA public key. Every value has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

impl RsaPublicKey {
    pub fn new(n: BigUint, e: BigUint) -> Result<Self, ValidationError> {
        check_public(&n, &e)?;
        Ok(Self { n, e })
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Modulus length in bits.
    pub fn size(&self) -> u64 {
        self.n.bits()
    }
}

impl TryFrom<&RSAPublicKey> for RsaPublicKey {
    type Error = ValidationError;

    fn try_from(key: &RSAPublicKey) -> Result<Self, Self::Error> {
        let n = unsigned(&key.modulus, "modulus")?;
        let e = unsigned(&key.public_exponent, "publicExponent")?;
        RsaPublicKey::new(n, e)
    }
}

impl From<&RsaPublicKey> for RSAPublicKey {
    fn from(key: &RsaPublicKey) -> Self {
        RSAPublicKey {
            modulus: Integer::from(&key.n),
            public_exponent: Integer::from(&key.e),
        }
    }
}

/// A two-prime RSA private key with its CRT values.
///
/// Values only come out of [`RsaPrivateKey::new`],
/// [`RsaPrivateKey::from_components`] or a decoder, all of which run
/// [`RsaPrivateKey::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    public: RsaPublicKey,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

impl RsaPrivateKey {
    /// Builds a key from every stored field, checking them all.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
        dp: BigUint,
        dq: BigUint,
        qinv: BigUint,
    ) -> Result<Self, ValidationError> {
        check_public(&n, &e)?;
        let key = Self {
            public: RsaPublicKey { n, e },
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        };
        key.validate()?;
        Ok(key)
    }

    /// Builds a key from `n`, `e`, `d` and the primes, computing the CRT
    /// values.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self, ValidationError> {
        let one = BigUint::one();
        if p <= one {
            return Err(ValidationError::PrimeTooSmall("prime1"));
        }
        if q <= one {
            return Err(ValidationError::PrimeTooSmall("prime2"));
        }
        let dp = &d % (&p - &one);
        let dq = &d % (&q - &one);
        let qinv = q
            .modinv(&p)
            .ok_or(ValidationError::CrtMismatch("coefficient"))?;
        Self::new(n, e, d, p, q, dp, dq, qinv)
    }

    /// Checks the RSA key relation on the stored numbers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_public(&self.public.n, &self.public.e)?;

        let one = BigUint::one();
        if self.p <= one {
            return Err(ValidationError::PrimeTooSmall("prime1"));
        }
        if self.q <= one {
            return Err(ValidationError::PrimeTooSmall("prime2"));
        }
        if &self.p * &self.q != self.public.n {
            return Err(ValidationError::ModulusMismatch);
        }

        let p1 = &self.p - &one;
        let q1 = &self.q - &one;
        let de = &self.d * &self.public.e;
        if &de % &p1 != one || &de % &q1 != one {
            return Err(ValidationError::PrivateExponentMismatch);
        }

        if self.dp != &self.d % &p1 {
            return Err(ValidationError::CrtMismatch("exponent1"));
        }
        if self.dq != &self.d % &q1 {
            return Err(ValidationError::CrtMismatch("exponent2"));
        }
        if self.qinv >= self.p || (&self.qinv * &self.q) % &self.p != one {
            return Err(ValidationError::CrtMismatch("coefficient"));
        }
        Ok(())
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.public.clone()
    }

    pub fn n(&self) -> &BigUint {
        &self.public.n
    }

    pub fn e(&self) -> &BigUint {
        &self.public.e
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    pub fn primes(&self) -> [&BigUint; 2] {
        [&self.p, &self.q]
    }

    pub fn dp(&self) -> &BigUint {
        &self.dp
    }

    pub fn dq(&self) -> &BigUint {
        &self.dq
    }

    pub fn qinv(&self) -> &BigUint {
        &self.qinv
    }

    /// Modulus length in bits.
    pub fn size(&self) -> u64 {
        self.public.size()
    }
}

impl TryFrom<&RSAPrivateKey> for RsaPrivateKey {
    type Error = ValidationError;

    fn try_from(key: &RSAPrivateKey) -> Result<Self, Self::Error> {
        RsaPrivateKey::new(
            unsigned(&key.modulus, "modulus")?,
            unsigned(&key.public_exponent, "publicExponent")?,
            unsigned(&key.private_exponent, "privateExponent")?,
            unsigned(&key.prime1, "prime1")?,
            unsigned(&key.prime2, "prime2")?,
            unsigned(&key.exponent1, "exponent1")?,
            unsigned(&key.exponent2, "exponent2")?,
            unsigned(&key.coefficient, "coefficient")?,
        )
    }
}

impl From<&RsaPrivateKey> for RSAPrivateKey {
    fn from(key: &RsaPrivateKey) -> Self {
        RSAPrivateKey {
            version: Version::TwoPrime,
            modulus: Integer::from(&key.public.n),
            public_exponent: Integer::from(&key.public.e),
            private_exponent: Integer::from(&key.d),
            prime1: Integer::from(&key.p),
            prime2: Integer::from(&key.q),
            exponent1: Integer::from(&key.dp),
            exponent2: Integer::from(&key.dq),
            coefficient: Integer::from(&key.qinv),
        }
    }
}
