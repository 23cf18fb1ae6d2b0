//! Text comparison with whitespace normalization
//!
//! Both sides are normalized identically before comparison: trailing
//! whitespace is stripped per line and the text ends in exactly one
//! newline. This keeps incidental formatting out of the verdict while
//! still catching every real divergence.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rendered difference between produced and expected text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diff {
    /// 1-based line number of the first mismatching line
    pub first_mismatch: usize,
    /// Unified-style excerpt: ' ' context, '-' expected, '+' produced
    pub rendered: String,
}

/// Normalize text for comparison
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    // Drop trailing blank lines so final-newline count never decides a case
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Compare produced text against expected text
///
/// Returns `None` when the normalized texts are equal, otherwise a diff
/// covering the diverging region.
pub fn compare(actual: &str, expected: &str) -> Option<Diff> {
    let actual = normalize(actual);
    let expected = normalize(expected);
    if actual == expected {
        return None;
    }
    Some(diff_lines(&actual, &expected))
}

/// Build a diff from two normalized texts that are known to differ
fn diff_lines(actual: &str, expected: &str) -> Diff {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    let prefix = actual_lines
        .iter()
        .zip(expected_lines.iter())
        .take_while(|(a, e)| a == e)
        .count();

    let mut suffix = 0;
    while suffix < actual_lines.len().min(expected_lines.len()) - prefix
        && actual_lines[actual_lines.len() - 1 - suffix]
            == expected_lines[expected_lines.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let mut rendered = String::new();
    // One line of leading context when available
    if prefix > 0 {
        rendered.push_str(&format!("  {}\n", expected_lines[prefix - 1]));
    }
    for line in &expected_lines[prefix..expected_lines.len() - suffix] {
        rendered.push_str(&format!("- {}\n", line));
    }
    for line in &actual_lines[prefix..actual_lines.len() - suffix] {
        rendered.push_str(&format!("+ {}\n", line));
    }
    if suffix > 0 {
        rendered.push_str(&format!("  {}\n", expected_lines[expected_lines.len() - suffix]));
    }

    Diff {
        first_mismatch: prefix + 1,
        rendered,
    }
}
