// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Nonce Search Controller
//!
//! Walks label positions in fixed-size batches until the oracle reports a
//! label under the proof-of-work target.
//!
//! ## Loop
//!
//! ```text
//! start = max(last_position, num_labels)
//! for i in start, start + batch, ...:
//!     last_position = i            (checkpoint before the call)
//!     oracle.scan_range(i, i + batch - 1)
//!         error  -> stop, report
//!         nonce  -> record, stop
//!         none   -> continue
//! save metadata                    (every exit path, exactly once)
//! ```
//!
//! The checkpoint is the batch *start*, so a run that dies mid-batch resumes
//! by scanning that batch again. Positions are never skipped.
//!
//! ## Exit Paths
//!
//! The oracle session is a `Box<dyn OracleSession>` released when it goes
//! out of scope. Metadata is saved by `PersistOnExit`: explicitly once the
//! loop returns, or from `Drop` if the loop unwinds.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::state::SearchProgress;
use crate::config::{CPU_PROVIDER_ID, DEFAULT_BATCH_SIZE};
use crate::metadata::{self, MetadataError, MetadataResult, ProofMetadata};
use crate::oracle::{Oracle, OracleError, ScryptParams, SessionParams};

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Why a search did not complete normally.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The metadata already holds a nonce; nothing was scanned.
    #[error("nonce {nonce} already exists, search skipped")]
    NonceAlreadyExists { nonce: u64 },

    /// Metadata could not be loaded before the search.
    #[error("loading metadata: {0}")]
    Load(#[source] MetadataError),

    #[error("invalid search parameters: {0}")]
    InvalidParams(String),

    /// The oracle failed; progress up to the failing batch was saved.
    #[error("oracle: {0}")]
    Oracle(#[from] OracleError),

    /// The search finished but its result could not be written. `nonce`
    /// still carries whatever was found.
    #[error("saving metadata (nonce {nonce:?}): {source}")]
    Persist {
        nonce: Option<u64>,
        #[source]
        source: MetadataError,
    },
}

impl SearchError {
    /// Whether this is the benign "already done" signal.
    pub fn is_nonce_already_exists(&self) -> bool {
        matches!(self, Self::NonceAlreadyExists { .. })
    }
}

// ---------------------------------------------------------------------------
// Configuration & Outcome
// ---------------------------------------------------------------------------

/// Runtime knobs for a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Positions per oracle call. Must be non-zero.
    pub batch_size: u64,
    /// Compute provider handed to the oracle.
    pub provider_id: u32,
    pub scrypt: ScryptParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            provider_id: CPU_PROVIDER_ID,
            scrypt: ScryptParams::default(),
        }
    }
}

/// How a search that did not fail ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The batch starting at `last_position` contained `nonce`.
    Found { nonce: u64, last_position: u64 },
    /// The position space ran out before a nonce turned up.
    Exhausted { last_position: u64 },
}

impl SearchOutcome {
    pub fn nonce(&self) -> Option<u64> {
        match self {
            Self::Found { nonce, .. } => Some(*nonce),
            Self::Exhausted { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives one oracle through a resumable nonce search.
pub struct NonceSearch<'a, O: Oracle + ?Sized> {
    oracle: &'a O,
    config: SearchConfig,
    progress: SearchProgress,
}

impl<'a, O: Oracle + ?Sized> NonceSearch<'a, O> {
    pub fn new(oracle: &'a O, config: SearchConfig) -> Self {
        Self {
            oracle,
            config,
            progress: SearchProgress::new(),
        }
    }

    /// Publish progress through an existing handle instead of a fresh one.
    pub fn with_progress(mut self, progress: SearchProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Handle onto the live progress of this controller.
    pub fn progress(&self) -> SearchProgress {
        self.progress.clone()
    }

    /// Load the metadata in `dir` and search.
    pub fn run_dir(&self, dir: &Path) -> Result<SearchOutcome, SearchError> {
        let meta = metadata::load(dir).map_err(SearchError::Load)?;
        self.run(dir, meta)
    }

    /// Search for a nonce for `meta` and save the result to `dir`.
    ///
    /// Refuses without touching the oracle when `meta` already has a nonce.
    /// Otherwise the metadata file is written exactly once before this
    /// returns, whatever the outcome, rejected parameters included.
    pub fn run(&self, dir: &Path, meta: ProofMetadata) -> Result<SearchOutcome, SearchError> {
        if let Err(MetadataError::NonceAlreadyExists { nonce }) = metadata::ensure_no_nonce(&meta) {
            info!(nonce, "nonce already recorded, skipping search");
            return Err(SearchError::NonceAlreadyExists { nonce });
        }

        let num_labels = meta.num_labels();
        let start = meta
            .last_position
            .unwrap_or(0)
            .max(num_labels.unwrap_or(0));
        self.progress.reset(start);

        let guard = PersistOnExit::new(dir, meta, &self.progress);
        let result = self
            .validate(guard.meta(), num_labels)
            .and_then(|num_labels| {
                self.search(guard.meta(), num_labels, start)
                    .map_err(SearchError::from)
            });
        let saved = guard.finish();

        match (result, saved) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(outcome), Err(source)) => {
                error!(nonce = ?outcome.nonce(), error = %source, "search finished but metadata was not saved");
                Err(SearchError::Persist {
                    nonce: outcome.nonce(),
                    source,
                })
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(source)) => {
                error!(error = %source, "metadata save failed after search error");
                Err(e)
            }
        }
    }

    fn validate(&self, meta: &ProofMetadata, num_labels: Option<u64>) -> Result<u64, SearchError> {
        if self.config.batch_size == 0 {
            return Err(SearchError::InvalidParams("batch size must be non-zero".into()));
        }
        num_labels.ok_or_else(|| {
            SearchError::InvalidParams(format!(
                "{} units x {} labels overflows u64",
                meta.num_units, meta.labels_per_unit
            ))
        })
    }

    fn search(
        &self,
        meta: &ProofMetadata,
        num_labels: u64,
        start: u64,
    ) -> Result<SearchOutcome, OracleError> {
        let params = SessionParams {
            provider_id: self.config.provider_id,
            commitment: self.oracle.commitment(&meta.node_id, &meta.commitment_atx_id),
            difficulty: self.oracle.pow_difficulty(num_labels),
            scrypt: self.config.scrypt,
        };
        let mut session = self.oracle.open(&params)?;

        let batch = self.config.batch_size;
        info!(
            provider = params.provider_id,
            num_labels,
            start,
            batch_size = batch,
            "searching for nonce"
        );

        let started = Instant::now();
        let mut position = start;
        let outcome = loop {
            let Some(end) = position.checked_add(batch - 1) else {
                warn!(position, "label positions exhausted without a nonce");
                break SearchOutcome::Exhausted {
                    last_position: self.progress.last_position(),
                };
            };

            self.progress.checkpoint(position);
            debug!(start = position, end, "scanning batch");

            let res = session.scan_range(position, end)?;
            if let Some(nonce) = res.nonce {
                self.progress.record_nonce(nonce, res.value);
                info!(nonce, batch_start = position, "found nonce");
                break SearchOutcome::Found {
                    nonce,
                    last_position: position,
                };
            }

            match position.checked_add(batch) {
                Some(next) => position = next,
                None => {
                    warn!(position, "label positions exhausted without a nonce");
                    break SearchOutcome::Exhausted {
                        last_position: position,
                    };
                }
            }
        };

        info!(elapsed = ?started.elapsed(), "nonce search finished");
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Save-on-exit guard
// ---------------------------------------------------------------------------

/// Owns the metadata for the duration of a search and writes it back with
/// the current progress exactly once.
struct PersistOnExit<'a> {
    dir: &'a Path,
    meta: ProofMetadata,
    progress: &'a SearchProgress,
    armed: bool,
}

impl<'a> PersistOnExit<'a> {
    fn new(dir: &'a Path, meta: ProofMetadata, progress: &'a SearchProgress) -> Self {
        Self {
            dir,
            meta,
            progress,
            armed: true,
        }
    }

    fn meta(&self) -> &ProofMetadata {
        &self.meta
    }

    fn finish(mut self) -> MetadataResult<()> {
        self.armed = false;
        self.persist()
    }

    fn persist(&mut self) -> MetadataResult<()> {
        self.progress.apply_to(&mut self.meta);
        metadata::save(self.dir, &self.meta)
    }
}

impl Drop for PersistOnExit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(e) = self.persist() {
            error!(error = %e, dir = %self.dir.display(), "failed to save metadata on unwind");
        }
    }
}
