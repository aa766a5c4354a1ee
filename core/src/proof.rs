// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Proof Record
//!
//! The contents of `post.bin`: the proof a node generated for its latest
//! proof-of-space challenge. smtool only reads it back for inspection.
//! The payload is the Go node's SCALE encoding of its `Post` type:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┬──────────────┐
//! │ nonce: u32le │ indices: compact len + bytes │ pow: u64le   │
//! └──────────────┴──────────────────────────────┴──────────────┘
//! ```

use std::fmt;
use std::path::Path;

use parity_scale_codec::{Decode, Encode};

use crate::codec::{self, CodecResult, Record};

/// A decoded proof of space.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct ProofRecord {
    /// Nonce the proof was found with.
    pub nonce: u32,
    /// Packed label indices that satisfied the challenge.
    pub indices: Vec<u8>,
    /// Proof-of-work solution accompanying the proof.
    pub pow: u64,
}

impl Record for ProofRecord {
    const NAME: &'static str = "proof";
}

impl ProofRecord {
    /// Read, verify and decode a proof file.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        codec::load(path)
    }
}

impl fmt::Display for ProofRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ProofRecord {{")?;
        writeln!(f, "  Nonce:   {}", self.nonce)?;
        writeln!(f, "  Indices: ({} bytes)", self.indices.len())?;
        for (i, chunk) in self.indices.chunks(16).enumerate() {
            writeln!(f, "    {:08x}  {}", i * 16, hex::encode(chunk))?;
        }
        writeln!(f, "  Pow:     {}", self.pow)?;
        write!(f, "}}")
    }
}
