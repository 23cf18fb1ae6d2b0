//! Transformation collaborator seam
//!
//! The engine that rewrites source text between languages is external to
//! this crate. The runner only needs the `Transform` trait: source text in,
//! produced text out, with the language pair as tags. Failure modes of the
//! collaborator (parse errors, unsupported constructs) surface as
//! `Error::Transform` and are reported per-case.

use crate::error::{Error, Result};
use crate::lang::Lang;
use std::io::Write;
use std::process::{Command, Stdio};

/// External transformation collaborator
pub trait Transform {
    /// Transform source text from one language to another
    fn apply(&self, input: &str, source: Lang, target: Lang) -> Result<String>;

    /// Name used in reports
    fn name(&self) -> &str;
}

/// Returns the input unchanged
///
/// Used to validate the comparator itself: an identity run over fixtures
/// whose input and expected output are the same file content must pass.
pub struct Identity;

impl Transform for Identity {
    fn apply(&self, input: &str, _source: Lang, _target: Lang) -> Result<String> {
        Ok(input.to_string())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Shells out to an external transformation program
///
/// The program is invoked as `<program> [args..] <source> <target>` with
/// the input text on stdin; the produced text is taken from stdout. A
/// non-zero exit status is a collaborator error carrying stderr.
pub struct CommandTransform {
    program: String,
    args: Vec<String>,
}

impl CommandTransform {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Transform for CommandTransform {
    fn apply(&self, input: &str, source: Lang, target: Lang) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(source.to_string())
            .arg(target.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Transform(format!("Failed to start '{}': {}", self.program, e)))?;

        child
            .stdin
            .take()
            .ok_or_else(|| Error::Transform("Failed to open collaborator stdin".into()))?
            .write_all(input.as_bytes())
            .map_err(|e| Error::Transform(format!("Failed to write to '{}': {}", self.program, e)))?;

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Transform(format!("Failed to wait for '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Transform(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Transform(format!("'{}' produced non-UTF8 output: {}", self.program, e)))
    }

    fn name(&self) -> &str {
        &self.program
    }
}
