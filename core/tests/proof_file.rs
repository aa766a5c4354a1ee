//! Integration tests for reading `post.bin` files from disk.

use std::fs;

use smtool_core::codec::{self, checksum, CodecError};
use smtool_core::config::PROOF_FILE_NAME;
use smtool_core::proof::ProofRecord;

fn sample() -> ProofRecord {
    ProofRecord {
        nonce: 12,
        indices: (0u8..=63).collect(),
        pow: 0xFEED_FACE,
    }
}

#[test]
fn stored_proof_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROOF_FILE_NAME);

    codec::store(&path, &sample()).unwrap();
    assert_eq!(ProofRecord::load(&path).unwrap(), sample());
}

#[test]
fn go_node_file_decodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROOF_FILE_NAME);

    let mut payload = Vec::new();
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.push(2 << 2);
    payload.extend_from_slice(&[0xCA, 0xFE]);
    payload.extend_from_slice(&99u64.to_le_bytes());

    let mut file = payload.clone();
    file.extend_from_slice(&checksum(&payload).to_be_bytes());
    fs::write(&path, file).unwrap();

    let proof = ProofRecord::load(&path).unwrap();
    assert_eq!(
        proof,
        ProofRecord {
            nonce: 1,
            indices: vec![0xCA, 0xFE],
            pow: 99,
        }
    );
}

#[test]
fn flipped_payload_byte_is_a_checksum_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROOF_FILE_NAME);
    codec::store(&path, &sample()).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[5] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        ProofRecord::load(&path),
        Err(CodecError::ChecksumMismatch { .. })
    ));
}

#[test]
fn length_prefix_past_payload_end_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROOF_FILE_NAME);

    // Announces 40 index bytes but carries two.
    let mut payload = 1u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&[40 << 2, 0xCA, 0xFE]);
    let mut file = payload.clone();
    file.extend_from_slice(&checksum(&payload).to_be_bytes());
    fs::write(&path, file).unwrap();

    assert!(matches!(
        ProofRecord::load(&path),
        Err(CodecError::Decode { record: "proof", .. })
    ));
}

#[test]
fn error_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    fs::write(&path, [0u8; 3]).unwrap();

    let msg = ProofRecord::load(&path).unwrap_err().to_string();
    assert!(msg.contains("short.bin"), "{msg}");
    assert!(msg.contains("too small"), "{msg}");
}
