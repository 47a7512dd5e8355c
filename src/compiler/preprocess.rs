// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! External preprocessing step.
//!
//! The parameter language has no macro or include handling of its own;
//! the input is expanded by the system C preprocessor (`cpp -P`) before
//! the scanner ever sees it.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::compiler::error::{CompileError, CompileErrorKind};
use tracing::debug;

/// Run `cpp -P` over `input` and return its output as the scanner
/// source text.
pub fn expand(
    input: &Path,
    defines: &[String],
    include_dirs: &[PathBuf],
) -> Result<String, CompileError> {
    let mut cmd = Command::new("cpp");
    cmd.arg("-P");
    for def in defines {
        cmd.arg(format!("-D{def}"));
    }
    for dir in include_dirs {
        cmd.arg("-I").arg(dir);
    }
    cmd.arg(input);
    debug!(?cmd, "preprocess");

    let output = cmd.output().map_err(|err| {
        CompileError::new(
            CompileErrorKind::Preprocess,
            format!("cannot run cpp: {err}"),
        )
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CompileError::new(
            CompileErrorKind::Preprocess,
            format!(
                "cpp failed for {}: {}",
                input.display(),
                stderr.trim()
            ),
        ));
    }
    String::from_utf8(output.stdout).map_err(|_| {
        CompileError::new(
            CompileErrorKind::Preprocess,
            "cpp produced non-UTF-8 output",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn cpp_available() -> bool {
        Command::new("cpp").arg("--version").output().is_ok()
    }

    fn write_temp_file(label: &str, contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "parc-{label}-{}-{nanos}.par",
            process::id()
        ));
        fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn expands_defines() {
        if !cpp_available() {
            return;
        }
        let path = write_temp_file("defines", "#define REV 2\n= REV,u8;\n");
        let text = expand(&path, &[], &[]).expect("expand");
        let _ = fs::remove_file(&path);
        assert!(text.contains("= 2,u8;"), "{text}");
    }

    #[test]
    fn passes_command_line_defines() {
        if !cpp_available() {
            return;
        }
        let path = write_temp_file("cli-defines", "= REV,u8;\n");
        let text = expand(&path, &["REV=7".to_string()], &[]).expect("expand");
        let _ = fs::remove_file(&path);
        assert!(text.contains("= 7,u8;"), "{text}");
    }

    #[test]
    fn missing_input_is_a_preprocess_error() {
        if !cpp_available() {
            return;
        }
        let err = expand(Path::new("/nonexistent/params.par"), &[], &[]).unwrap_err();
        assert_eq!(err.kind(), CompileErrorKind::Preprocess);
    }
}
