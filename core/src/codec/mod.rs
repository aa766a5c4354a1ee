// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Codec
//!
//! Checksummed files and the binary payloads inside them.
//!
//! ```text
//! checksum.rs: payload || BE64(crc64-iso) read/write
//! decode.rs  : SCALE payload <-> typed record
//! error.rs   : CodecError
//! ```
//!
//! Reading always verifies before decoding: a payload that fails its
//! checksum never reaches the decoder.

pub mod checksum;
pub mod decode;
pub mod error;

pub use checksum::{checksum, read_checksummed, write_checksummed};
pub use decode::{decode, encode, load, store, Record};
pub use error::{CodecError, CodecResult};
