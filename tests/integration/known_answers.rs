//! Known-answer tests: digests must match reference implementations byte for byte.

use super::test_utils::{walk_collect, SHA256_EMPTY, SHA256_HELLO};
use recsum::hash::{build_file_hash, Algorithm};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_empty_file_sha256() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("empty");
    fs::write(&file, "").unwrap();

    assert_eq!(build_file_hash(&Algorithm::Sha256, &file).unwrap(), SHA256_EMPTY);
}

#[test]
fn test_empty_file_every_algorithm() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("empty");
    fs::write(&file, "").unwrap();

    let expected = [
        (Algorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e"),
        (Algorithm::Sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        (Algorithm::Sha256, SHA256_EMPTY),
        (
            Algorithm::Sha512,
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        ),
        (
            Algorithm::Blake3,
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
        ),
    ];
    for (algo, digest) in expected {
        assert_eq!(build_file_hash(&algo, &file).unwrap(), digest, "{}", algo);
    }
}

#[test]
fn test_hello_vectors() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("hello");
    fs::write(&file, "hello").unwrap();

    assert_eq!(
        build_file_hash(&Algorithm::Md5, &file).unwrap(),
        "5d41402abc4b2a76b9719d911017c592"
    );
    assert_eq!(
        build_file_hash(&Algorithm::Sha1, &file).unwrap(),
        "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
    );
    assert_eq!(build_file_hash(&Algorithm::Sha256, &file).unwrap(), SHA256_HELLO);
}

#[test]
fn test_blake3_matches_reference_crate() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("content.bin");
    let content: Vec<u8> = (0..200_000u32).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(&file, &content).unwrap();

    let ours = build_file_hash(&Algorithm::Blake3, &file).unwrap();
    assert_eq!(ours, blake3::hash(&content).to_hex().as_str());
}

#[test]
fn test_walk_digest_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("hello"), "hello").unwrap();

    for _ in 0..3 {
        let (outcome, results) = walk_collect(temp_dir.path(), Algorithm::Sha256, 2);
        outcome.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hash(), SHA256_HELLO);
    }
}
