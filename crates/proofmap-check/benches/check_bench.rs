// Criterion benchmarks for proofmap-check.
//
// Uses a synthetic document of many small tokens with markup interleaved as
// stealth tokens, and a backend that flags every fifth word, so the numbers
// cover canonical text building, chunking, remapping and filtering.
//
// Run:
//   cargo bench -p proofmap-check

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use proofmap_check::canonical::CanonicalTextBuilder;
use proofmap_check::chunker::Chunker;
use proofmap_check::{
    BackendAdapter, BackendError, BackendHandle, BackendRegistry, CancellationToken, Checker,
    CheckerConfig, ChunkLimits, FixedLanguage, GrammarBackend, RegistryConfig,
};
use proofmap_core::{Language, RawIssue, SourceRef, TextRange, TextToken};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const SENTENCES: [&str; 4] = [
    "The report was written quickly and it show. ",
    "Several paragraphs repeat the the same idea! ",
    "Does every reader really needs this much detail? ",
    "Editors, however, rarely complain about brevity. ",
];

/// Flags every fifth word.
struct EveryFifthWord;

impl GrammarBackend for EveryFifthWord {
    fn check(&self, _language: &Language, text: &str) -> Result<Vec<RawIssue>, BackendError> {
        let mut issues = Vec::new();
        let mut word_start = None;
        let mut words = 0;
        for (pos, c) in text.chars().chain(std::iter::once(' ')).enumerate() {
            match (c.is_alphanumeric(), word_start) {
                (true, None) => word_start = Some(pos),
                (false, Some(start)) => {
                    words += 1;
                    if words % 5 == 0 {
                        let range = TextRange::new(start, pos);
                        issues.push(RawIssue::new(range, range, "FIFTH_WORD", "STYLE"));
                    }
                    word_start = None;
                }
                _ => {}
            }
        }
        Ok(issues)
    }
}

/// `paragraphs` paragraphs, each wrapped in `<p>` markup tokens.
fn document(paragraphs: usize) -> (SourceRef, Vec<TextToken>) {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut push = |token: TextToken, offset: &mut usize| {
        *offset += token.char_len();
        tokens.push(token);
    };
    for i in 0..paragraphs {
        push(TextToken::stealth("<p>", offset), &mut offset);
        for sentence in SENTENCES.iter().cycle().skip(i % SENTENCES.len()).take(6) {
            push(TextToken::normal(*sentence, offset), &mut offset);
        }
        push(TextToken::stealth("</p>", offset), &mut offset);
    }
    (SourceRef::new("body", TextRange::new(0, offset)), tokens)
}

fn checker(max_chars: usize) -> Checker {
    let backend: BackendHandle = Arc::new(EveryFifthWord);
    let registry = BackendRegistry::new(
        RegistryConfig::with_languages(["en"]),
        move |_: &Language| -> Result<BackendHandle, BackendError> { Ok(backend.clone()) },
    );
    let adapter = BackendAdapter::new(FixedLanguage(Language::new("en")), Arc::new(registry));
    let config = CheckerConfig {
        chunking: ChunkLimits {
            max_chars,
            too_big_chars: 1_000_000,
            ..ChunkLimits::default()
        },
        ..CheckerConfig::default()
    };
    match Checker::new(config, adapter) {
        Ok(checker) => checker,
        Err(e) => panic!("invalid bench config: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_canonical_text(c: &mut Criterion) {
    let (_, tokens) = document(200);
    let builder = CanonicalTextBuilder::new();
    c.bench_function("canonical_text_200_paragraphs", |b| {
        b.iter(|| builder.build(black_box(&tokens)))
    });
}

fn bench_chunking(c: &mut Criterion) {
    let (_, tokens) = document(200);
    let canonical = CanonicalTextBuilder::new().build(&tokens);
    let chunker = Chunker::new(ChunkLimits {
        too_big_chars: 1_000_000,
        ..ChunkLimits::default()
    });
    c.bench_function("chunk_200_paragraphs", |b| {
        b.iter(|| chunker.chunks(black_box(canonical.chars())))
    });
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");
    for paragraphs in [10, 200] {
        let (root, tokens) = document(paragraphs);
        let checker = checker(10_000);
        let cancel = CancellationToken::never();
        group.bench_function(format!("{paragraphs}_paragraphs"), |b| {
            b.iter(|| checker.check(&root, black_box(&tokens), &cancel))
        });
    }
    group.finish();
}

fn bench_check_small_chunks(c: &mut Criterion) {
    let (root, tokens) = document(200);
    let checker = checker(120);
    let cancel = CancellationToken::never();
    c.bench_function("check_200_paragraphs_sentence_chunks", |b| {
        b.iter(|| checker.check(&root, black_box(&tokens), &cancel))
    });
}

criterion_group!(
    benches,
    bench_canonical_text,
    bench_chunking,
    bench_check,
    bench_check_small_chunks
);
criterion_main!(benches);
