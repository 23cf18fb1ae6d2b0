//! Fixture discovery and pairing
//!
//! Fixtures follow the `<case>_input.<ext>` / `<case>_output.<ext>` naming
//! convention. Discovery scans a single directory, pairs files by case name,
//! and enforces the pairing invariant: every input has exactly one expected
//! output and vice versa. A broken pairing is a configuration error that
//! halts the run before any case executes.

use crate::error::{Error, Result};
use crate::lang::Lang;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One fixture file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub lang: Lang,
}

/// A paired fixture: source text plus its golden expected output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePair {
    pub case: String,
    pub input: Artifact,
    pub expected: Artifact,
}

/// Short content hash in `sha256:<hex>` form
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
}

/// Discover all fixture pairs in a directory
///
/// Files whose stem ends in neither `_input` nor `_output` are ignored,
/// so a `conforma.yaml` config can live alongside the fixtures.
/// Results are sorted by case name for deterministic ordering.
pub fn discover(dir: &Path) -> Result<Vec<FixturePair>> {
    if !dir.is_dir() {
        return Err(Error::Config(format!(
            "Fixture directory not found: {}",
            dir.display()
        )));
    }

    let mut inputs: BTreeMap<String, Artifact> = BTreeMap::new();
    let mut outputs: BTreeMap<String, Artifact> = BTreeMap::new();

    for entry in std::fs::read_dir(dir).map_err(Error::Io)? {
        let entry = entry.map_err(Error::Io)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s,
            None => continue,
        };

        let (case, is_input) = if let Some(case) = stem.strip_suffix("_input") {
            (case, true)
        } else if let Some(case) = stem.strip_suffix("_output") {
            (case, false)
        } else {
            continue;
        };

        if case.is_empty() {
            return Err(Error::Config(format!(
                "Fixture file has no case name: {}",
                path.display()
            )));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let lang = Lang::from_extension(ext).ok_or_else(|| {
            Error::Config(format!(
                "Unknown language extension '{}' on fixture {}",
                ext,
                path.display()
            ))
        })?;

        let artifact = Artifact {
            path: path.clone(),
            lang,
        };

        let bucket = if is_input { &mut inputs } else { &mut outputs };
        if let Some(previous) = bucket.insert(case.to_string(), artifact) {
            return Err(Error::Config(format!(
                "Duplicate fixture for case '{}': {} and {}",
                case,
                previous.path.display(),
                path.display()
            )));
        }
    }

    // Pairing invariant: inputs and outputs must match one-to-one
    let orphan_inputs: Vec<&String> = inputs
        .keys()
        .filter(|case| !outputs.contains_key(*case))
        .collect();
    let orphan_outputs: Vec<&String> = outputs
        .keys()
        .filter(|case| !inputs.contains_key(*case))
        .collect();

    if !orphan_inputs.is_empty() || !orphan_outputs.is_empty() {
        let mut parts = Vec::new();
        for case in &orphan_inputs {
            parts.push(format!("'{}' has an input but no expected output", case));
        }
        for case in &orphan_outputs {
            parts.push(format!("'{}' has an expected output but no input", case));
        }
        return Err(Error::Config(format!(
            "Broken fixture pairing in {}: {}",
            dir.display(),
            parts.join("; ")
        )));
    }

    let pairs = inputs
        .into_iter()
        .map(|(case, input)| {
            let expected = outputs.remove(&case).unwrap();
            FixturePair {
                case,
                input,
                expected,
            }
        })
        .collect();

    Ok(pairs)
}
