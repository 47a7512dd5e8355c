// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types for the compiler driver.

use std::fmt;

use crate::core::parser::ParseError;

/// Categories of compiler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorKind {
    Cli,
    Io,
    Preprocess,
    Syntax,
}

/// A compiler error with a kind and message. The first error is the
/// terminal outcome of the whole run; there is no recovery.
#[derive(Debug, Clone)]
pub struct CompileError {
    kind: CompileErrorKind,
    message: String,
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> CompileErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        Self::new(CompileErrorKind::Syntax, err.to_string())
    }
}
