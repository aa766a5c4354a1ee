// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Checksummed Files
//!
//! Every binary artifact smtool reads is laid out as:
//!
//! ```text
//! ┌───────────────────────────┬──────────────────────────┐
//! │ payload (size - 8 bytes)  │ BE64(crc64-iso(payload)) │
//! └───────────────────────────┴──────────────────────────┘
//! ```
//!
//! The CRC uses the ISO polynomial with the reflected, all-ones
//! init/xorout variant that Go's `hash/crc64` ships as `crc64.ISO`.
//! Files written by the Go node tooling verify here unchanged.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crc::{Crc, CRC_64_GO_ISO};
use tracing::{debug, trace};

use super::error::{CodecError, CodecResult};
use crate::config::{CHECKSUM_SIZE, TEMP_FILE_SUFFIX};

const CRC64_ISO: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);

/// CRC-64/ISO of `data`, as stored in the trailer of a checksummed file.
pub fn checksum(data: &[u8]) -> u64 {
    CRC64_ISO.checksum(data)
}

/// Read `path`, verify its trailing checksum and return the payload.
///
/// The payload is exactly `size - 8` bytes and the checksum exactly the last
/// 8 bytes; both are filled with `read_exact`, so short reads from the
/// underlying file never leave part of a buffer unset.
pub fn read_checksummed(path: impl AsRef<Path>) -> CodecResult<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| CodecError::io(path, "open file", e))?;

    let size = file
        .metadata()
        .map_err(|e| CodecError::io(path, "get file info", e))?
        .len();
    if size < CHECKSUM_SIZE as u64 {
        return Err(CodecError::TooSmall {
            path: path.to_path_buf(),
            size,
        });
    }

    let payload_len = usize::try_from(size - CHECKSUM_SIZE as u64).map_err(|_| {
        CodecError::io(
            path,
            "read file",
            std::io::Error::new(std::io::ErrorKind::OutOfMemory, "file exceeds address space"),
        )
    })?;

    let mut payload = vec![0u8; payload_len];
    file.read_exact(&mut payload)
        .map_err(|e| CodecError::io(path, "read file", e))?;

    let mut trailer = [0u8; CHECKSUM_SIZE];
    file.read_exact(&mut trailer)
        .map_err(|e| CodecError::io(path, "read checksum", e))?;

    let stored = u64::from_be_bytes(trailer);
    let computed = checksum(&payload);
    if stored != computed {
        return Err(CodecError::ChecksumMismatch {
            path: path.to_path_buf(),
            stored,
            computed,
        });
    }

    trace!(path = %path.display(), bytes = payload.len(), "checksum verified");
    Ok(payload)
}

/// Write `payload || BE64(crc64(payload))` to `path`.
///
/// The bytes go to a sibling temp file that is synced and then renamed over
/// `path`, so readers see either the old file or the complete new one.
pub fn write_checksummed(path: impl AsRef<Path>, payload: &[u8]) -> CodecResult<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);

    {
        let mut file = File::create(&tmp).map_err(|e| CodecError::io(&tmp, "create file", e))?;
        file.write_all(payload)
            .map_err(|e| CodecError::io(&tmp, "write file", e))?;
        file.write_all(&checksum(payload).to_be_bytes())
            .map_err(|e| CodecError::io(&tmp, "write checksum", e))?;
        file.sync_all()
            .map_err(|e| CodecError::io(&tmp, "sync file", e))?;
    }

    fs::rename(&tmp, path).map_err(|e| CodecError::io(path, "rename file", e))?;
    debug!(path = %path.display(), bytes = payload.len(), "checksummed file written");
    Ok(())
}

pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(TEMP_FILE_SUFFIX);
    PathBuf::from(name)
}
