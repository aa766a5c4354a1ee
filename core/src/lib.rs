// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # smtool: Core Library
//!
//! Everything `smtool` does that is more than argument plumbing lives here:
//! reading checksummed proof-of-space files, keeping the
//! `postdata_metadata.json` record of a data directory up to date, and
//! driving the native proof-of-work oracle until it hands back a nonce.
//!
//! ## Architecture
//!
//! - **codec**: `payload || BE64(crc64)` files and the SCALE payload
//!   format. Integrity first, decoding second.
//! - **proof**: the `post.bin` record decoded for inspection.
//! - **metadata**: load/save of the per-directory metadata file.
//! - **oracle**: the seam to the external label/PoW backend. The work
//!   itself happens on the other side of this trait.
//! - **search**: the batch loop that walks label positions, checkpoints
//!   progress and persists it on every way out.
//! - **config**: constants shared by all of the above.
//!
//! ## Data Flow
//!
//! ```text
//! metadata::load ──► NonceSearch::run ──► Oracle::open ──► scan_range × N
//!                          │
//!                          └──► metadata::save (exactly once, any exit)
//! ```

pub mod codec;
pub mod config;
pub mod metadata;
pub mod oracle;
pub mod proof;
pub mod search;

pub use codec::CodecError;
pub use metadata::{MetadataError, ProofMetadata};
pub use oracle::{Oracle, OracleError, OracleSession, ScanResult, ScryptParams, SessionParams};
pub use proof::ProofRecord;
pub use search::{NonceSearch, SearchConfig, SearchError, SearchOutcome, SearchProgress};
