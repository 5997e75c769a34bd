use std::io::Write;

use kagi_rsa::{
    EncodingVariant, Error, parse_private_key_file, parse_public_key_file, private_key_to_pem,
    public_key_to_pem, public_key_to_pkcs1_pem,
};
use rstest::rstest;
use tempfile::{NamedTempFile, TempDir};

const RSA2048_PKCS8: &str = include_str!("../../testdata/keys/rsa2048_pkcs8.pem");
const RSA1024_CERT: &str = include_str!("../../testdata/keys/rsa1024_cert.pem");
const RSA1024_PKCS1: &str = include_str!("../../testdata/keys/rsa1024_pkcs1.pem");

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn read_private_key_file() {
    let file = write_temp(RSA2048_PKCS8);
    let (key, variant) = parse_private_key_file(file.path()).unwrap();
    assert_eq!(EncodingVariant::Pkcs8, variant);
    assert_eq!(2048, key.size());
}

#[test]
fn read_certificate_as_public_key() {
    let file = write_temp(RSA1024_CERT);
    let public = parse_public_key_file(file.path()).unwrap();

    let (private, _) = parse_private_key_file(write_temp(RSA1024_PKCS1).path()).unwrap();
    assert_eq!(private.public_key(), public);
}

#[rstest]
#[case(EncodingVariant::Pkcs1)]
#[case(EncodingVariant::Pkcs8)]
fn written_private_pem_reads_back(#[case] variant: EncodingVariant) {
    let (key, _) = parse_private_key_file(write_temp(RSA1024_PKCS1).path()).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("key.pem");
    std::fs::write(&path, private_key_to_pem(&key, variant).unwrap()).unwrap();

    assert_eq!((key, variant), parse_private_key_file(&path).unwrap());
}

#[test]
fn written_public_pem_reads_back() {
    let (key, _) = parse_private_key_file(write_temp(RSA1024_PKCS1).path()).unwrap();
    let public = key.public_key();

    for text in [public_key_to_pem(&public).unwrap(), public_key_to_pkcs1_pem(&public)] {
        let file = write_temp(&text);
        assert_eq!(public, parse_public_key_file(file.path()).unwrap());
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.pem");
    assert!(matches!(parse_private_key_file(&path), Err(Error::Io(_))));
    assert!(matches!(parse_public_key_file(&path), Err(Error::Io(_))));
}

#[test]
fn file_without_block() {
    let file = write_temp("just some notes, no key\n");
    assert!(matches!(
        parse_private_key_file(file.path()),
        Err(Error::NoBlockFound)
    ));
}

#[test]
fn truncated_block_is_not_found() {
    let truncated: String = RSA1024_PKCS1.lines().take(5).collect::<Vec<_>>().join("\n");
    let file = write_temp(&truncated);
    assert!(matches!(
        parse_private_key_file(file.path()),
        Err(Error::NoBlockFound)
    ));
}
