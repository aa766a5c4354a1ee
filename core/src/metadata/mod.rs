// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Metadata Store
//!
//! Loads and saves `postdata_metadata.json` inside a post data directory.
//!
//! Saves are atomic: the JSON is written to `postdata_metadata.json.tmp`,
//! synced, then renamed over the real file. Calling [`save`] repeatedly
//! with the same record leaves the same bytes on disk.
//!
//! A save failure is returned, never swallowed. The caller decides whether
//! it is fatal; for a finished search it is not, since the nonce is still
//! held in memory and can be written again.

mod types;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::codec::checksum::temp_path;
use crate::config::METADATA_FILE_NAME;

pub use types::ProofMetadata;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors raised by the metadata store.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("{op} {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("encoding metadata: {0}")]
    Encode(#[source] serde_json::Error),

    /// Not a failure: the directory already has its nonce.
    #[error("nonce {nonce} is already recorded in {}", METADATA_FILE_NAME)]
    NonceAlreadyExists { nonce: u64 },
}

pub type MetadataResult<T> = Result<T, MetadataError>;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Location of the metadata file inside `dir`.
pub fn metadata_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(METADATA_FILE_NAME)
}

/// Load the metadata record from `dir`.
pub fn load(dir: impl AsRef<Path>) -> MetadataResult<ProofMetadata> {
    let path = metadata_path(dir);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MetadataError::NotFound { path });
        }
        Err(source) => {
            return Err(MetadataError::Io {
                path,
                op: "read",
                source,
            })
        }
    };

    let meta = serde_json::from_slice(&bytes)
        .map_err(|source| MetadataError::Decode { path: path.clone(), source })?;
    debug!(path = %path.display(), "metadata loaded");
    Ok(meta)
}

/// Write `meta` to the metadata file in `dir`, replacing any previous one.
pub fn save(dir: impl AsRef<Path>, meta: &ProofMetadata) -> MetadataResult<()> {
    let dir = dir.as_ref();
    let io = |path: &Path, op: &'static str| {
        let path = path.to_path_buf();
        move |source: std::io::Error| MetadataError::Io { path, op, source }
    };

    fs::create_dir_all(dir).map_err(io(dir, "create dir"))?;

    let path = metadata_path(dir);
    let tmp = temp_path(&path);
    let json = serde_json::to_vec(meta).map_err(MetadataError::Encode)?;

    {
        let mut file = File::create(&tmp).map_err(io(&tmp, "create"))?;
        file.write_all(&json).map_err(io(&tmp, "write"))?;
        file.sync_all().map_err(io(&tmp, "sync"))?;
    }
    fs::rename(&tmp, &path).map_err(io(&path, "rename"))?;

    info!(
        path = %path.display(),
        last_position = ?meta.last_position,
        nonce = ?meta.nonce,
        "metadata saved"
    );
    Ok(())
}

/// Refuse to go on when `meta` already carries a nonce.
pub fn ensure_no_nonce(meta: &ProofMetadata) -> MetadataResult<()> {
    match meta.nonce {
        Some(nonce) => Err(MetadataError::NonceAlreadyExists { nonce }),
        None => Ok(()),
    }
}
