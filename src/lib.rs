// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # Conforma — golden-fixture conformance runner
//!
//! Validates an external source-to-source transformation tool against a
//! directory of golden fixtures. Fixtures are file pairs named
//! `<case>_input.<ext>` / `<case>_output.<ext>`; the extensions carry the
//! source and target language tags.
//!
//! For each pair, the runner feeds the input text to a transformation
//! collaborator (any [`Transform`] implementation — typically a
//! [`CommandTransform`] wrapping the tool under test) and compares the
//! produced text against the expected output, after normalizing trailing
//! whitespace and the final newline on both sides.
//!
//! ```rust,no_run
//! use conforma::{run, Identity};
//! use std::path::Path;
//!
//! let report = run(Path::new("tests/files"), &Identity)?;
//! if report.passed() {
//!     println!("all {} case(s) passed", report.summary.total);
//! } else {
//!     println!("{}", report.to_report());
//! }
//! # Ok::<(), conforma::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! FIXTURE DIR
//!      │
//!      ├──► discover(dir) ──► Vec<FixturePair>     (pairing invariant)
//!      │
//!      ├──► transform.apply(input, src, dst)       (opaque collaborator)
//!      │
//!      └──► compare(produced, expected) ──► Option<Diff>
//!                      │
//!                      └──► RunReport (per-case status + summary)
//! ```
//!
//! The transformation engine itself is out of scope: the runner treats it
//! as an opaque collaborator and only distinguishes "transform errored"
//! from "transform produced wrong output".

// Core modules
pub mod compare;
pub mod config;
pub mod error;
pub mod fixture;
pub mod lang;
pub mod runner;
pub mod transform;

// Re-exports
pub use compare::{compare, normalize, Diff};
pub use config::{RunConfig, CONFIG_FILE};
pub use error::{Error, Result};
pub use fixture::{content_hash, discover, Artifact, FixturePair};
pub use lang::Lang;
pub use runner::{run, CaseResult, CaseStatus, RunReport, RunSummary, Runner};
pub use transform::{CommandTransform, Identity, Transform};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
