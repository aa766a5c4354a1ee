// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Constants
//!
//! File names, widths and defaults shared between the codec, the metadata
//! store and the nonce search. These mirror what the post tooling writes to
//! disk, so changing any of them means the files stop being interchangeable.

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Name of the metadata file inside a post data directory.
pub const METADATA_FILE_NAME: &str = "postdata_metadata.json";

/// Conventional name of the proof file.
pub const PROOF_FILE_NAME: &str = "post.bin";

/// Suffix used for the scratch file written before an atomic rename.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Width of the trailing CRC-64 checksum in bytes.
pub const CHECKSUM_SIZE: usize = 8;

/// Upper bound on a decoded payload. A corrupt length prefix must not be
/// able to make the decoder allocate gigabytes.
pub const MAX_DECODE_BYTES: u64 = 64 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Number of label positions handed to the oracle per call.
pub const DEFAULT_BATCH_SIZE: u64 = 1 << 14;

/// Provider id that selects the CPU implementation in the native library.
pub const CPU_PROVIDER_ID: u32 = u32::MAX;

/// Default scrypt cost parameter `N` for label computation.
pub const DEFAULT_SCRYPT_N: u64 = 8192;

/// Default scrypt block size `r`.
pub const DEFAULT_SCRYPT_R: u32 = 1;

/// Default scrypt parallelism `p`.
pub const DEFAULT_SCRYPT_P: u32 = 1;

/// Size of one computed label in bytes.
pub const LABEL_SIZE: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_is_non_zero_power_of_two() {
        assert!(DEFAULT_BATCH_SIZE > 0);
        assert!(DEFAULT_BATCH_SIZE.is_power_of_two());
    }

    #[test]
    fn scrypt_n_is_power_of_two() {
        // scrypt rejects any other N.
        assert!(DEFAULT_SCRYPT_N.is_power_of_two());
        assert!(DEFAULT_SCRYPT_N > 1);
    }

    #[test]
    fn checksum_matches_crc64_width() {
        assert_eq!(CHECKSUM_SIZE, std::mem::size_of::<u64>());
    }
}
