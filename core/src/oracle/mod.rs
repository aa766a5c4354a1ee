// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Oracle Boundary
//!
//! The oracle is whatever computes labels and checks them against the
//! proof-of-work target: in production the native post library, in tests a
//! scripted stub. smtool never evaluates a label itself.
//!
//! A session is opened once per search with everything the backend needs
//! up front (provider, commitment, difficulty, scrypt cost) and is then
//! asked to scan inclusive position ranges. Dropping the session releases
//! the backend resources; there is no separate close call to forget.

pub mod derive;
#[cfg(feature = "libpost")]
pub mod libpost;

use thiserror::Error;

use crate::config::{CPU_PROVIDER_ID, DEFAULT_SCRYPT_N, DEFAULT_SCRYPT_P, DEFAULT_SCRYPT_R};

#[cfg(feature = "libpost")]
pub use libpost::LibPost;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Failures reported by an oracle backend.
#[derive(Debug, Error)]
pub enum OracleError {
    /// No backend is available for the requested provider.
    #[error("oracle backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the position range.
    #[error("invalid label range [{start}, {end}]")]
    InvalidRange { start: u64, end: u64 },

    /// The backend rejected the session parameters.
    #[error("invalid oracle argument: {0}")]
    InvalidArgument(String),

    /// The backend failed while computing.
    #[error("oracle failure: {0}")]
    Backend(String),
}

pub type OracleResult<T> = Result<T, OracleError>;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// scrypt cost parameters used for label computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScryptParams {
    pub n: u64,
    pub r: u32,
    pub p: u32,
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self {
            n: DEFAULT_SCRYPT_N,
            r: DEFAULT_SCRYPT_R,
            p: DEFAULT_SCRYPT_P,
        }
    }
}

/// Everything a backend needs to open a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionParams {
    /// Compute provider to run on ([`CPU_PROVIDER_ID`] for the CPU).
    pub provider_id: u32,
    /// Binding of the labels to node and commitment ATX.
    pub commitment: [u8; 32],
    /// Proof-of-work target; a label below it yields a nonce.
    pub difficulty: [u8; 32],
    pub scrypt: ScryptParams,
}

impl SessionParams {
    pub fn new(commitment: [u8; 32], difficulty: [u8; 32]) -> Self {
        Self {
            provider_id: CPU_PROVIDER_ID,
            commitment,
            difficulty,
            scrypt: ScryptParams::default(),
        }
    }
}

/// Result of scanning one range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Position whose label met the target, if any.
    pub nonce: Option<u64>,
    /// Label bytes at `nonce`, when the backend returns them.
    pub value: Option<Vec<u8>>,
}

impl ScanResult {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(nonce: u64, value: Option<Vec<u8>>) -> Self {
        Self {
            nonce: Some(nonce),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// An open oracle session. Resources are released on drop.
pub trait OracleSession {
    /// Compute labels for positions `start..=end` and report the first one
    /// that meets the difficulty target.
    fn scan_range(&mut self, start: u64, end: u64) -> OracleResult<ScanResult>;
}

/// A label/proof-of-work backend.
pub trait Oracle {
    /// Open a session configured with `params`.
    fn open(&self, params: &SessionParams) -> OracleResult<Box<dyn OracleSession>>;

    /// Commitment for a node and commitment ATX.
    fn commitment(&self, node_id: &[u8], commitment_atx_id: &[u8]) -> [u8; 32] {
        derive::commitment(node_id, commitment_atx_id)
    }

    /// Proof-of-work target for a data set of `num_labels` labels.
    fn pow_difficulty(&self, num_labels: u64) -> [u8; 32] {
        derive::pow_difficulty(num_labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_targets_cpu() {
        let params = SessionParams::new([1; 32], [2; 32]);
        assert_eq!(params.provider_id, CPU_PROVIDER_ID);
        assert_eq!(params.scrypt, ScryptParams { n: 8192, r: 1, p: 1 });
    }

    #[test]
    fn scan_result_constructors() {
        assert_eq!(ScanResult::not_found().nonce, None);
        let hit = ScanResult::found(12, Some(vec![1]));
        assert_eq!(hit.nonce, Some(12));
        assert_eq!(hit.value, Some(vec![1]));
    }
}
