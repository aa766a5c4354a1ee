// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! Session inputs the post protocol derives from metadata.

use sha2::{Digest, Sha256};

/// `SHA-256(node_id || commitment_atx_id)`.
pub fn commitment(node_id: &[u8], commitment_atx_id: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(node_id);
    hasher.update(commitment_atx_id);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// `2^256 / num_labels` as a 32-byte big-endian target, so that one label
/// in the whole data set is expected to fall below it. Zero or one label
/// saturate to the maximum target.
pub fn pow_difficulty(num_labels: u64) -> [u8; 32] {
    if num_labels <= 1 {
        return [0xFF; 32];
    }

    // Long division of 2^256 (a 1 followed by 32 zero bytes), byte by byte.
    let divisor = u128::from(num_labels);
    let mut rem: u128 = 1;
    let mut out = [0u8; 32];
    for byte in out.iter_mut() {
        let cur = rem << 8;
        *byte = (cur / divisor) as u8;
        rem = cur % divisor;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_matches_concatenated_sha256() {
        let expected = Sha256::digest(b"nodeatx");
        assert_eq!(commitment(b"node", b"atx").as_slice(), expected.as_slice());
    }

    #[test]
    fn difficulty_for_two_labels_is_half_range() {
        let mut expected = [0u8; 32];
        expected[0] = 0x80;
        assert_eq!(pow_difficulty(2), expected);
    }

    #[test]
    fn difficulty_for_power_of_two() {
        // 2^256 / 2^32 = 2^224 -> byte 3 (from the left) is 0x01.
        let mut expected = [0u8; 32];
        expected[3] = 0x01;
        assert_eq!(pow_difficulty(1 << 32), expected);
    }

    #[test]
    fn difficulty_tightens_with_more_labels() {
        let mut prev = pow_difficulty(1);
        for n in [2u64, 3, 100, 1 << 20, 1 << 40, u64::MAX] {
            let next = pow_difficulty(n);
            assert!(next < prev, "target must shrink at n = {n}");
            prev = next;
        }
    }
}
