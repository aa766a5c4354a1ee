// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # CLI Interface
//!
//! Defines the command-line argument structure for `smtool` using `clap`
//! derive. The Go tool spelled its command and flag names in camelCase
//! (`parsePost`, `--logLevel`); those spellings are kept as aliases so
//! existing scripts keep working.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use smtool_core::config::{CPU_PROVIDER_ID, DEFAULT_BATCH_SIZE};

use crate::logging::LogFormat;

/// Proof-of-space toolbox.
///
/// Decodes checksummed `post.bin` proof files and searches for the
/// proof-of-work nonce of a post data directory.
#[derive(Parser, Debug)]
#[command(
    name = "smtool",
    about = "Proof-of-space CLI toolbox",
    version,
    propagate_version = true
)]
pub struct SmtoolCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify and decode a proof file, then print it.
    #[command(alias = "parsePost")]
    ParsePost(ParsePostArgs),
    /// Search for the nonce of a post data directory and record it in
    /// its metadata file.
    Genonce(GenonceArgs),
    /// Print the metadata of a post data directory as JSON.
    Metadata(MetadataArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `parse-post` subcommand.
#[derive(Parser, Debug)]
pub struct ParsePostArgs {
    /// Path to the proof file (usually `post.bin`).
    #[arg(long)]
    pub path: PathBuf,
}

/// Arguments for the `genonce` subcommand.
#[derive(Parser, Debug)]
pub struct GenonceArgs {
    /// Post data directory holding `postdata_metadata.json`.
    #[arg(long, env = "SMTOOL_DATA_DIR")]
    pub path: PathBuf,

    /// Compute provider id. Defaults to the CPU provider.
    #[arg(long, env = "SMTOOL_PROVIDER", default_value_t = CPU_PROVIDER_ID)]
    pub provider: u32,

    /// Log level in zap numbering: -1 debug, 0 info, 1 warn, 2 error.
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, alias = "logLevel", default_value_t = 0, allow_negative_numbers = true)]
    pub log_level: i8,

    /// Label positions per oracle call.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,
}

/// Arguments for the `metadata` subcommand.
#[derive(Parser, Debug)]
pub struct MetadataArgs {
    /// Post data directory holding `postdata_metadata.json`.
    #[arg(long, env = "SMTOOL_DATA_DIR")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        SmtoolCli::command().debug_assert();
    }

    #[test]
    fn camel_case_spellings_still_parse() {
        let cli = SmtoolCli::try_parse_from([
            "smtool", "genonce", "--path", "/data", "--logLevel", "-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Genonce(args) => {
                assert_eq!(args.log_level, -1);
                assert_eq!(args.provider, CPU_PROVIDER_ID);
                assert_eq!(args.batch_size, DEFAULT_BATCH_SIZE);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = SmtoolCli::try_parse_from(["smtool", "parsePost", "--path", "post.bin"]).unwrap();
        assert!(matches!(cli.command, Commands::ParsePost(_)));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let res = SmtoolCli::try_parse_from([
            "smtool", "genonce", "--path", "/data", "--batch-size", "0",
        ]);
        assert!(res.is_err());
    }
}
