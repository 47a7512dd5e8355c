// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::compiler::error::{CompileError, CompileErrorKind};

pub const VERSION: &str = "1.0";

const LONG_ABOUT: &str = "Parameter compiler producing flat binary blobs.

The input is a parameter description file: brace-delimited nodes hold
assignments whose expressions are evaluated and emitted as little-endian
values of 1, 2 or 4 bytes, in source order. The input is run through the
C preprocessor (cpp -P) first, so #define/#include/#if constructs may be
used for configuration variants.";

#[derive(Parser, Debug)]
#[command(
    name = "parc",
    version = VERSION,
    about = "Compiles parameter description files into flat binary blobs",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'i',
        long = "infile",
        value_name = "FILE",
        long_help = "Input parameter file."
    )]
    pub infile: PathBuf,
    #[arg(
        short = 'o',
        long = "outfile",
        value_name = "FILE",
        long_help = "Output binary file. Defaults to the input base name with a .bin extension."
    )]
    pub outfile: Option<PathBuf>,
    #[arg(
        short = 'D',
        long = "define",
        value_name = "NAME[=VAL]",
        action = ArgAction::Append,
        long_help = "Predefine a preprocessor macro (repeatable). Passed through to cpp."
    )]
    pub defines: Vec<String>,
    #[arg(
        short = 'I',
        long = "include",
        value_name = "DIR",
        action = ArgAction::Append,
        long_help = "Add a preprocessor include search directory (repeatable). Passed through to cpp."
    )]
    pub include_dirs: Vec<PathBuf>,
    #[arg(
        long = "no-preprocess",
        action = ArgAction::SetTrue,
        long_help = "Feed the input to the scanner verbatim, skipping cpp."
    )]
    pub no_preprocess: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        long_help = "Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides."
    )]
    pub verbose: u8,
}

/// Output path: explicit `-o`, or the input base with a `.bin`
/// extension.
pub fn resolve_outfile(cli: &Cli) -> PathBuf {
    match &cli.outfile {
        Some(path) => path.clone(),
        None => cli.infile.with_extension("bin"),
    }
}

/// Validate CLI arguments.
pub fn validate_cli(cli: &Cli) -> Result<(), CompileError> {
    if cli.no_preprocess && (!cli.defines.is_empty() || !cli.include_dirs.is_empty()) {
        return Err(CompileError::new(
            CompileErrorKind::Cli,
            "-D/--define and -I/--include require preprocessing; remove --no-preprocess",
        ));
    }
    if resolve_outfile(cli) == cli.infile {
        return Err(CompileError::new(
            CompileErrorKind::Cli,
            "output file would overwrite the input file; use -o/--outfile",
        ));
    }
    Ok(())
}
