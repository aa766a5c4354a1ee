// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # smtool
//!
//! Entry point for the `smtool` binary. Parses CLI arguments, initializes
//! logging and dispatches to a subcommand:
//!
//! - `parse-post`: verify and dump a `post.bin` proof file
//! - `genonce`   : search for the nonce of a post data directory
//! - `metadata`  : print a data directory's metadata
//! - `version`   : print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

use smtool_core::metadata::{self, MetadataError};
use smtool_core::oracle::Oracle;
use smtool_core::search::{NonceSearch, SearchConfig, SearchError, SearchOutcome};
use smtool_core::ProofRecord;

use cli::{Commands, SmtoolCli};

fn main() -> Result<()> {
    let cli = SmtoolCli::parse();

    let filter = match &cli.command {
        Commands::Genonce(args) => logging::filter_for_level(args.log_level),
        _ => logging::filter_for_level(0),
    };
    logging::init_logging(&filter, cli.log_format);

    match cli.command {
        Commands::ParsePost(args) => parse_post(args),
        Commands::Genonce(args) => generate_nonce(args),
        Commands::Metadata(args) => show_metadata(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Reads, verifies and decodes a proof file, then prints it.
fn parse_post(args: cli::ParsePostArgs) -> Result<()> {
    let proof = ProofRecord::load(&args.path)
        .with_context(|| format!("loading post {}", args.path.display()))?;
    println!("{proof}");
    Ok(())
}

/// Loads the metadata of a data directory and, unless it already has a
/// nonce, runs the nonce search against the compiled-in oracle.
fn generate_nonce(args: cli::GenonceArgs) -> Result<()> {
    let meta = match metadata::load(&args.path) {
        Ok(meta) => meta,
        Err(e @ MetadataError::NotFound { .. }) => {
            return Err(e).context("postdata_metadata does not exist in directory");
        }
        Err(e) => return Err(e).context("failed to load metadata"),
    };

    if let Err(MetadataError::NonceAlreadyExists { nonce }) = metadata::ensure_no_nonce(&meta) {
        println!("nonce already exists: {nonce}");
        return Ok(());
    }

    let oracle = backend()?;
    let config = SearchConfig {
        batch_size: args.batch_size,
        provider_id: args.provider,
        ..SearchConfig::default()
    };

    tracing::info!(
        datadir = %args.path.display(),
        provider = args.provider,
        batch_size = args.batch_size,
        "starting nonce search"
    );

    match NonceSearch::new(oracle.as_ref(), config).run(&args.path, meta) {
        Ok(SearchOutcome::Found {
            nonce,
            last_position,
        }) => {
            println!("found nonce {nonce} (batch starting at {last_position})");
            Ok(())
        }
        Ok(SearchOutcome::Exhausted { last_position }) => {
            println!("no nonce found; scanned up to position {last_position}");
            Ok(())
        }
        Err(e) if e.is_nonce_already_exists() => {
            println!("{e}");
            Ok(())
        }
        Err(SearchError::Persist {
            nonce: Some(nonce),
            source,
        }) => {
            // The nonce only exists in this process now; make sure the
            // operator sees it even if logs are not kept.
            println!("found nonce {nonce} but could not record it");
            Err(source).context(format!(
                "saving nonce {nonce} to {}",
                metadata::metadata_path(&args.path).display()
            ))
        }
        Err(e) => Err(e).context("failed to generate nonce"),
    }
}

/// Prints the metadata of a data directory as pretty JSON.
fn show_metadata(args: cli::MetadataArgs) -> Result<()> {
    let meta = metadata::load(&args.path).context("failed to load metadata")?;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

/// The oracle compiled into this binary.
#[cfg(feature = "libpost")]
fn backend() -> Result<Box<dyn Oracle>> {
    Ok(Box::new(smtool_core::oracle::LibPost))
}

#[cfg(not(feature = "libpost"))]
fn backend() -> Result<Box<dyn Oracle>> {
    anyhow::bail!(
        "no oracle backend: rebuild smtool with `--features libpost` to link the native post library"
    )
}

/// Prints version information to stdout.
fn print_version() {
    println!("smtool {}", env!("CARGO_PKG_VERSION"));
    println!("rustc  {}", option_env!("RUSTC_VERSION").unwrap_or("unknown"));
}
