// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Native post Library Binding
//!
//! Binds the initializer API exported by `libpost` (`post.h`):
//!
//! ```text
//! new_initializer(provider_id, n, commitment, vrf_difficulty) -> *Initializer
//! initialize(init, start, end, out_labels, out_nonce)         -> InitializeResult
//! free_initializer(init)
//! ```
//!
//! `build.rs` links the library when the `libpost` feature is on; set
//! `POST_LIB_DIR` if it lives outside the default search path.

use std::ffi::c_int;

use tracing::debug;

use super::{Oracle, OracleError, OracleResult, OracleSession, ScanResult, SessionParams};
use crate::config::LABEL_SIZE;

#[repr(C)]
struct Initializer {
    _private: [u8; 0],
}

// InitializeResult values from post.h.
const INITIALIZE_OK: c_int = 0;
const INITIALIZE_OK_NONCE_NOT_FOUND: c_int = 1;
const INITIALIZE_INVALID_LABELS_RANGE: c_int = 2;
const INITIALIZE_ERROR: c_int = 3;
const INITIALIZE_INVALID_ARGUMENT: c_int = 4;
const INITIALIZE_FAILED_TO_GET_PROVIDERS: c_int = 5;

extern "C" {
    fn new_initializer(
        provider_id: u32,
        n: usize,
        commitment: *const u8,
        vrf_difficulty: *const u8,
    ) -> *mut Initializer;

    fn initialize(
        initializer: *mut Initializer,
        start: u64,
        end: u64,
        out_buffer: *mut u8,
        out_nonce: *mut u64,
    ) -> c_int;

    fn free_initializer(initializer: *mut Initializer);
}

/// Oracle backed by the native post library.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibPost;

impl Oracle for LibPost {
    fn open(&self, params: &SessionParams) -> OracleResult<Box<dyn OracleSession>> {
        let n = usize::try_from(params.scrypt.n)
            .map_err(|_| OracleError::InvalidArgument(format!("scrypt n {}", params.scrypt.n)))?;

        // SAFETY: both pointers reference 32-byte arrays that outlive the
        // call; the library copies what it keeps.
        let raw = unsafe {
            new_initializer(
                params.provider_id,
                n,
                params.commitment.as_ptr(),
                params.difficulty.as_ptr(),
            )
        };
        if raw.is_null() {
            return Err(OracleError::Unavailable(format!(
                "failed to create initializer for provider {}",
                params.provider_id
            )));
        }

        debug!(provider = params.provider_id, n, "libpost initializer created");
        Ok(Box::new(LibPostSession { raw }))
    }
}

struct LibPostSession {
    raw: *mut Initializer,
}

impl OracleSession for LibPostSession {
    fn scan_range(&mut self, start: u64, end: u64) -> OracleResult<ScanResult> {
        let count = end
            .checked_sub(start)
            .and_then(|d| d.checked_add(1))
            .and_then(|c| usize::try_from(c).ok())
            .and_then(|c| c.checked_mul(LABEL_SIZE))
            .ok_or(OracleError::InvalidRange { start, end })?;

        let mut labels = vec![0u8; count];
        let mut nonce = u64::MAX;

        // SAFETY: `raw` is a live initializer owned by this session and
        // `labels` holds exactly `(end - start + 1) * LABEL_SIZE` bytes.
        let rc = unsafe { initialize(self.raw, start, end, labels.as_mut_ptr(), &mut nonce) };

        match rc {
            INITIALIZE_OK => {
                let value = nonce
                    .checked_sub(start)
                    .filter(|_| nonce <= end)
                    .and_then(|idx| usize::try_from(idx).ok())
                    .map(|idx| labels[idx * LABEL_SIZE..(idx + 1) * LABEL_SIZE].to_vec());
                Ok(ScanResult::found(nonce, value))
            }
            INITIALIZE_OK_NONCE_NOT_FOUND => Ok(ScanResult::not_found()),
            INITIALIZE_INVALID_LABELS_RANGE => Err(OracleError::InvalidRange { start, end }),
            INITIALIZE_INVALID_ARGUMENT => {
                Err(OracleError::InvalidArgument("rejected by initializer".into()))
            }
            INITIALIZE_FAILED_TO_GET_PROVIDERS => {
                Err(OracleError::Unavailable("no compute providers".into()))
            }
            INITIALIZE_ERROR => Err(OracleError::Backend("initialize failed".into())),
            other => Err(OracleError::Backend(format!("unknown result code {other}"))),
        }
    }
}

impl Drop for LibPostSession {
    fn drop(&mut self) {
        // SAFETY: `raw` came from `new_initializer` and is freed only here.
        unsafe { free_initializer(self.raw) };
        debug!("libpost initializer freed");
    }
}
