// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Parameter compiler - main entry point.
//!
//! Ties the scanning core to the outside world: CLI handling, the
//! external preprocessing step, output-file management and top-level
//! diagnostics.

pub mod cli;
pub mod error;
pub mod preprocess;


use std::fs::{self, File};
use std::io::BufWriter;

use clap::Parser;

use crate::compiler::cli::{resolve_outfile, validate_cli, Cli};
use crate::compiler::error::{CompileError, CompileErrorKind};
use crate::core::emit::{BlobStore, Sink};
use crate::core::parser as core_parser;
use tracing::debug;

// Re-export public types
pub use crate::compiler::error::{CompileError as RunError, CompileErrorKind as RunErrorKind};
pub use cli::VERSION;

/// Summary of a successful compilation run.
#[derive(Debug, Clone, Copy)]
pub struct CompileSummary {
    pub values: u64,
    pub bytes: u64,
}

/// Run the compiler with command-line arguments.
pub fn run() -> Result<CompileSummary, CompileError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    validate_cli(&cli)?;

    let source = if cli.no_preprocess {
        fs::read_to_string(&cli.infile).map_err(|err| {
            CompileError::new(
                CompileErrorKind::Io,
                format!("cannot read {}: {err}", cli.infile.display()),
            )
        })?
    } else {
        preprocess::expand(&cli.infile, &cli.defines, &cli.include_dirs)?
    };

    let out_path = resolve_outfile(&cli);
    let out = File::create(&out_path).map_err(|err| {
        CompileError::new(
            CompileErrorKind::Io,
            format!("cannot create {}: {err}", out_path.display()),
        )
    })?;
    let mut store = BlobStore::new(BufWriter::new(out));

    compile(&source, &mut store)?;

    let (values, bytes) = store.finish().map_err(|err| {
        CompileError::new(
            CompileErrorKind::Io,
            format!("cannot write {}: {err}", out_path.display()),
        )
    })?;
    debug!(values, bytes, out = %out_path.display(), "compiled");
    Ok(CompileSummary { values, bytes })
}

/// Compile preprocessed source text into `sink`.
pub fn compile(source: &str, sink: &mut dyn Sink) -> Result<(), CompileError> {
    let mut parser = core_parser::Parser::new();
    parser.process(source, sink)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "parc=debug",
        _ => "parc=trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
