//! Integration tests over the golden fixtures in tests/files

use conforma::{
    discover, run, CaseStatus, Error, Identity, Lang, Result, RunConfig, Runner, Transform,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::Path;

const FILES: &str = "tests/files";

/// Stand-in for the real migration tool: produces the golden Swift text
/// for Kotlin inputs and echoes everything else.
struct GoldenTransform {
    swift_output: String,
}

impl GoldenTransform {
    fn new() -> Self {
        let swift_output =
            fs::read_to_string(Path::new(FILES).join("field_multiline_deref_output.swift"))
                .expect("golden swift fixture");
        Self { swift_output }
    }
}

impl Transform for GoldenTransform {
    fn apply(&self, input: &str, source: Lang, target: Lang) -> Result<String> {
        if source == Lang::Kotlin && target == Lang::Swift {
            Ok(self.swift_output.clone())
        } else {
            Ok(input.to_string())
        }
    }

    fn name(&self) -> &str {
        "golden"
    }
}

#[rstest]
#[case::func_call("func_call", Lang::Kotlin, Lang::Kotlin)]
#[case::field_multiline_deref("field_multiline_deref", Lang::Kotlin, Lang::Swift)]
fn fixture_pair_discovered(#[case] name: &str, #[case] source: Lang, #[case] target: Lang) {
    let pairs = discover(Path::new(FILES)).unwrap();
    let pair = pairs.iter().find(|p| p.case == name).expect("pair present");
    assert_eq!(pair.input.lang, source);
    assert_eq!(pair.expected.lang, target);
}

#[test]
fn golden_transform_passes_all_cases() {
    let report = run(Path::new(FILES), &GoldenTransform::new()).unwrap();
    assert!(report.passed(), "{}", report.to_report());
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.passed, 2);
}

#[test]
fn chained_call_case_requires_exact_tokens() {
    // A single token off in the .sink closure must fail the case.
    let golden = GoldenTransform::new();
    let drifted = GoldenTransform {
        swift_output: golden.swift_output.replace("newEntries", "entries"),
    };

    let report = run(Path::new(FILES), &drifted).unwrap();
    let case = report
        .results
        .iter()
        .find(|r| r.case == "field_multiline_deref")
        .unwrap();
    assert_eq!(case.status, CaseStatus::Failed);
    let diff = case.diff.as_ref().unwrap();
    assert!(!diff.rendered.is_empty());
    assert!(diff.rendered.contains(".sink"));
}

#[test]
fn identity_case_passes() {
    // func_call has the same text as input and expected output, so the
    // identity transform must report a pass.
    let runner = Runner::with_config(RunConfig {
        cases: vec!["func_call".into()],
        ..Default::default()
    });
    let report = runner.run(Path::new(FILES), &Identity).unwrap();
    assert!(report.passed());
    assert_eq!(report.summary.total, 1);
}

#[test]
fn identity_still_catches_real_divergence() {
    // Over the full directory the identity transform must fail the
    // Kotlin-to-Swift case: normalization is not a free pass.
    let report = run(Path::new(FILES), &Identity).unwrap();
    assert!(!report.passed());
    let case = report
        .results
        .iter()
        .find(|r| r.case == "field_multiline_deref")
        .unwrap();
    assert_eq!(case.status, CaseStatus::Failed);
}

#[test]
fn runs_are_deterministic() {
    let transform = GoldenTransform::new();
    let first = run(Path::new(FILES), &transform).unwrap();
    let second = run(Path::new(FILES), &transform).unwrap();

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.results, second.results);
}

#[test]
fn deleting_expected_output_is_config_error() {
    let dir = tempfile::TempDir::new().unwrap();
    for name in ["func_call_input.kt", "func_call_output.kt"] {
        fs::copy(Path::new(FILES).join(name), dir.path().join(name)).unwrap();
    }
    fs::remove_file(dir.path().join("func_call_output.kt")).unwrap();

    let err = run(dir.path(), &Identity).unwrap_err();
    match err {
        Error::Config(msg) => assert!(msg.contains("func_call")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn single_char_divergence_in_expected_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let text = fs::read_to_string(Path::new(FILES).join("func_call_output.kt")).unwrap();
    fs::write(dir.path().join("func_call_input.kt"), &text).unwrap();
    fs::write(
        dir.path().join("func_call_output.kt"),
        text.replacen("maxLines = 1", "maxLines = 2", 1),
    )
    .unwrap();

    let report = run(dir.path(), &Identity).unwrap();
    let case = &report.results[0];
    assert_eq!(case.status, CaseStatus::Failed);
    assert!(!case.diff.as_ref().unwrap().rendered.is_empty());
}

#[test]
fn json_report_round_trips() {
    let report = run(Path::new(FILES), &GoldenTransform::new()).unwrap();
    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: conforma::RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.summary, report.summary);
    assert_eq!(parsed.results, report.results);
}
