// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! Error type for checksummed file access and payload decoding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, verifying, writing or decoding a
/// checksummed file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An open, stat, read or write on the file failed.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Which operation failed ("open file", "read checksum", ...).
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The file cannot even hold the trailing checksum.
    #[error("file {} is too small ({size} bytes)", .path.display())]
    TooSmall { path: PathBuf, size: u64 },

    /// The stored checksum disagrees with the payload.
    #[error("wrong checksum 0x{stored:X}, computed 0x{computed:X} in {}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        stored: u64,
        computed: u64,
    },

    /// The verified payload is larger than any record this tool reads.
    #[error("{record} payload of {size} bytes exceeds the decode limit")]
    TooLarge { record: &'static str, size: u64 },

    /// The verified payload is not a valid encoding of the record.
    #[error("decoding {record}: {source}")]
    Decode {
        /// Short name of the record type being decoded.
        record: &'static str,
        #[source]
        source: parity_scale_codec::Error,
    },
}

impl CodecError {
    pub(crate) fn io(path: impl Into<PathBuf>, op: &'static str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            op,
            source,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
