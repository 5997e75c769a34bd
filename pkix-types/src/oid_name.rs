/// Conventional name of a well-known OID, such as `rsaEncryption` for
/// `1.2.840.113549.1.1.1` or `CN` for `2.5.4.3`.
pub trait OidName {
    fn oid_name(&self) -> Option<&'static str>;
}
