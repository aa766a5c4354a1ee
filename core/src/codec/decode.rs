// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Payload Encoding
//!
//! Payloads are SCALE, the encoding the Go node uses for `post.bin`:
//! fields in declaration order, `u32`/`u64` fixed-width little-endian, byte
//! sequences prefixed by a compact (variable-width) length. There is no
//! schema on the wire and no versioning, so encoder and decoder must agree
//! on the struct exactly.
//!
//! Decoding is strict: trailing bytes are an error, and payloads larger than
//! [`MAX_DECODE_BYTES`] are refused before the decoder sees them.

use std::path::Path;

use parity_scale_codec::{Decode, DecodeAll, Encode};

use super::checksum::{read_checksummed, write_checksummed};
use super::error::{CodecError, CodecResult};
use crate::config::MAX_DECODE_BYTES;

/// A record that can travel through a checksummed file.
pub trait Record: Encode + Decode {
    /// Name used in error messages.
    const NAME: &'static str;
}

/// Decode a verified payload into `T`. Nothing is returned on failure.
pub fn decode<T: Record>(bytes: &[u8]) -> CodecResult<T> {
    let size = bytes.len() as u64;
    if size > MAX_DECODE_BYTES {
        return Err(CodecError::TooLarge {
            record: T::NAME,
            size,
        });
    }
    T::decode_all(&mut &bytes[..]).map_err(|source| CodecError::Decode {
        record: T::NAME,
        source,
    })
}

/// Encode `value` in the layout [`decode`] expects.
pub fn encode<T: Record>(value: &T) -> Vec<u8> {
    value.encode()
}

/// Read a checksummed file and decode its payload.
pub fn load<T: Record>(path: impl AsRef<Path>) -> CodecResult<T> {
    let payload = read_checksummed(path)?;
    decode(&payload)
}

/// Encode `value` and write it as a checksummed file.
pub fn store<T: Record>(path: impl AsRef<Path>, value: &T) -> CodecResult<()> {
    write_checksummed(path, &encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Encode, Decode)]
    struct Sample {
        tag: u32,
        body: Vec<u8>,
    }

    impl Record for Sample {
        const NAME: &'static str = "sample";
    }

    #[test]
    fn layout_uses_compact_length_prefix() {
        let bytes = encode(&Sample {
            tag: 7,
            body: vec![0xAA, 0xBB],
        });
        // 2 in single-byte compact mode is 2 << 2.
        assert_eq!(bytes, vec![7, 0, 0, 0, 0x08, 0xAA, 0xBB]);
    }

    #[test]
    fn long_body_switches_compact_mode() {
        let bytes = encode(&Sample {
            tag: 0,
            body: vec![0; 64],
        });
        // 64 needs the two-byte mode: (64 << 2) | 0b01, little-endian.
        assert_eq!(&bytes[4..6], &[0x01, 0x01]);
        assert_eq!(decode::<Sample>(&bytes).unwrap().body.len(), 64);
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode(&Sample { tag: 1, body: vec![] });
        bytes.push(0);
        let err = decode::<Sample>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::Decode { record: "sample", .. }));
    }

    #[test]
    fn absurd_length_prefix_is_rejected() {
        let mut bytes = 1u32.to_le_bytes().to_vec();
        // Four-byte compact mode announcing 2^29 bytes, followed by nothing.
        bytes.extend_from_slice(&(((1u32 << 29) << 2) | 0b10).to_le_bytes());
        assert!(matches!(
            decode::<Sample>(&bytes),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn oversized_payload_is_refused() {
        let bytes = vec![0u8; MAX_DECODE_BYTES as usize + 1];
        assert!(matches!(
            decode::<Sample>(&bytes),
            Err(CodecError::TooLarge { record: "sample", .. })
        ));
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bin");
        let value = Sample {
            tag: 42,
            body: b"labels".to_vec(),
        };
        store(&path, &value).unwrap();
        assert_eq!(load::<Sample>(&path).unwrap(), value);
    }
}
