// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Nonce Search
//!
//! ```text
//! controller.rs: batch loop, save-on-exit, error policy
//! state.rs     : shared progress (last position, nonce)
//! ```

pub mod controller;
pub mod state;

pub use controller::{NonceSearch, SearchConfig, SearchError, SearchOutcome};
pub use state::{SearchProgress, SearchState};
