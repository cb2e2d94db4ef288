//! Golden tests: run scripted backend issues through the checker and compare
//! the document ranges against tests/data/golden.json.
//!
//! Run: cargo test -p proofmap-check --test golden

use std::path::PathBuf;
use std::sync::Arc;

use proofmap_check::{
    BackendAdapter, BackendError, BackendHandle, BackendRegistry, CancellationToken, Checker,
    CheckerConfig, ChunkLimits, FixedLanguage, GrammarBackend, RegistryConfig,
};
use proofmap_core::{Language, RawIssue, SourceRef, TextRange, TextToken};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_golden(filename: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(filename);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn range(value: &Value) -> TextRange {
    let pair = value.as_array().expect("range must be [start, end]");
    let bound = |i: usize| pair[i].as_u64().expect("range bound must be a number") as usize;
    TextRange::new(bound(0), bound(1))
}

fn token(value: &Value) -> TextToken {
    let text = value["text"].as_str().expect("token text");
    let offset = value["offset"].as_u64().expect("token offset") as usize;
    match value["behavior"].as_str() {
        Some("stealth") => TextToken::stealth(text, offset),
        _ => TextToken::normal(text, offset),
    }
}

fn issue(value: &Value) -> RawIssue {
    RawIssue::new(
        range(&value["error"]),
        range(&value["pattern"]),
        value["rule_id"].as_str().expect("rule_id"),
        value["category"].as_str().expect("category"),
    )
}

/// Returns the scripted issues after checking that it received the expected
/// canonical text.
struct Scripted {
    canonical: String,
    issues: Vec<RawIssue>,
}

impl GrammarBackend for Scripted {
    fn check(&self, _language: &Language, text: &str) -> Result<Vec<RawIssue>, BackendError> {
        assert_eq!(text, self.canonical);
        Ok(self.issues.clone())
    }
}

fn checker_for(case: &Value) -> Checker {
    let backend: BackendHandle = Arc::new(Scripted {
        canonical: case["canonical"].as_str().expect("canonical").to_string(),
        issues: case["issues"].as_array().expect("issues").iter().map(issue).collect(),
    });
    let registry = BackendRegistry::new(
        RegistryConfig::with_languages(["en"]),
        move |_: &Language| -> Result<BackendHandle, BackendError> { Ok(backend.clone()) },
    );
    let adapter = BackendAdapter::new(FixedLanguage(Language::new("en")), Arc::new(registry));
    let config = CheckerConfig {
        chunking: ChunkLimits {
            min_words: 1,
            ..ChunkLimits::default()
        },
        ..CheckerConfig::default()
    };
    Checker::new(config, adapter).expect("valid config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn golden_cases() {
    let golden = load_golden("golden.json");
    let cases = golden["cases"].as_array().expect("cases");
    assert!(!cases.is_empty());

    for case in cases {
        let name = case["name"].as_str().expect("name");
        let root: SourceRef = serde_json::from_value(case["root"].clone())
            .unwrap_or_else(|e| panic!("{name}: bad root: {e}"));
        let tokens: Vec<TextToken> = case["tokens"].as_array().expect("tokens").iter().map(token).collect();

        let result = checker_for(case)
            .check(&root, &tokens, &CancellationToken::never())
            .unwrap_or_else(|e| panic!("{name}: check failed: {e}"));

        let actual: Vec<(TextRange, TextRange, &str)> = result
            .iter()
            .map(|t| (t.error_range, t.pattern_range, t.rule_id.as_str()))
            .collect();
        let expected: Vec<(TextRange, TextRange, &str)> = case["expected"]
            .as_array()
            .expect("expected")
            .iter()
            .map(|e| {
                (
                    range(&e["error"]),
                    range(&e["pattern"]),
                    e["rule_id"].as_str().expect("rule_id"),
                )
            })
            .collect();
        assert_eq!(actual, expected, "{name}");

        for typo in &result {
            assert_eq!(typo.root, root, "{name}");
            assert_eq!(typo.language, Language::new("en"), "{name}");
        }
    }
}

#[test]
fn remapped_typos_serialize_with_document_ranges() {
    let golden = load_golden("golden.json");
    let case = &golden["cases"][0];
    let root: SourceRef = serde_json::from_value(case["root"].clone()).unwrap();
    let tokens: Vec<TextToken> = case["tokens"].as_array().unwrap().iter().map(token).collect();

    let result = checker_for(case)
        .check(&root, &tokens, &CancellationToken::never())
        .unwrap();
    let json = serde_json::to_value(&result[0]).unwrap();

    assert_eq!(json["error_range"]["start"], 105);
    assert_eq!(json["error_range"]["end"], 107);
    assert_eq!(json["root"]["element_id"], "p1");
    assert_eq!(json["language"], "en");
}
