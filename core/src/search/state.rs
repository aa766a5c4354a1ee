// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! In-memory search progress shared between the batch loop and whoever
//! needs to persist it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::metadata::ProofMetadata;

/// Where the search stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Start of the batch most recently handed to the oracle.
    pub last_position: u64,
    pub nonce: Option<u64>,
    pub nonce_value: Option<Vec<u8>>,
}

/// Cloneable handle onto the live [`SearchState`].
///
/// The controller is the only writer. Every read takes the lock and copies
/// the whole state, so a reader never sees `nonce` from one batch next to
/// `last_position` from another.
#[derive(Clone, Debug, Default)]
pub struct SearchProgress {
    inner: Arc<Mutex<SearchState>>,
}

impl SearchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> SearchState {
        self.inner.lock().clone()
    }

    pub fn last_position(&self) -> u64 {
        self.inner.lock().last_position
    }

    pub fn nonce(&self) -> Option<u64> {
        self.inner.lock().nonce
    }

    pub(crate) fn reset(&self, last_position: u64) {
        *self.inner.lock() = SearchState {
            last_position,
            ..SearchState::default()
        };
    }

    /// Record that the batch starting at `position` is about to be scanned.
    pub(crate) fn checkpoint(&self, position: u64) {
        let mut state = self.inner.lock();
        debug_assert!(position >= state.last_position, "progress moved backwards");
        state.last_position = position;
    }

    pub(crate) fn record_nonce(&self, nonce: u64, value: Option<Vec<u8>>) {
        let mut state = self.inner.lock();
        state.nonce = Some(nonce);
        state.nonce_value = value;
    }

    /// Copy the progress fields into `meta`.
    pub fn apply_to(&self, meta: &mut ProofMetadata) {
        let state = self.snapshot();
        meta.last_position = Some(state.last_position);
        meta.nonce = state.nonce;
        meta.nonce_value = state.nonce_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let progress = SearchProgress::new();
        let observer = progress.clone();

        progress.reset(100);
        progress.checkpoint(200);
        progress.record_nonce(250, Some(vec![7]));

        assert_eq!(
            observer.snapshot(),
            SearchState {
                last_position: 200,
                nonce: Some(250),
                nonce_value: Some(vec![7]),
            }
        );
    }

    #[test]
    fn reset_clears_previous_nonce() {
        let progress = SearchProgress::new();
        progress.record_nonce(1, None);
        progress.reset(64);
        assert_eq!(progress.nonce(), None);
        assert_eq!(progress.last_position(), 64);
    }

    #[test]
    fn apply_to_overwrites_progress_fields_only() {
        let progress = SearchProgress::new();
        progress.reset(300);
        progress.record_nonce(301, None);

        let mut meta = ProofMetadata {
            node_id: vec![1],
            num_units: 1,
            labels_per_unit: 100,
            ..Default::default()
        };
        progress.apply_to(&mut meta);

        assert_eq!(meta.last_position, Some(300));
        assert_eq!(meta.nonce, Some(301));
        assert_eq!(meta.node_id, vec![1]);
    }
}
