//! Criterion benchmarks for ftmark.
//!
//! Covers the hot paths of full-text matching:
//! - Porter stemming of analyzed text
//! - Score combination
//! - Snippet building over recorded positions

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use ftmark::analysis::token_filter::{Filter, LowercaseFilter, StemFilter};
use ftmark::analysis::tokenizer::{FullTextLexer, Tokenizer};
use ftmark::analysis::{PorterStemmer, Stemmer};
use ftmark::full_text::{MatchPositionStore, MemoryNodeStore, NodeStore, SourceId};
use ftmark::full_text_search::SnippetBuilder;
use ftmark::scoring;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "searching",
        "engines",
        "relational",
        "conditional",
        "hopefulness",
        "generalization",
        "indexing",
        "queries",
        "documents",
        "happily",
        "ponies",
        "caresses",
        "running",
        "electricity",
        "adjustment",
        "tokenization",
        "stemming",
        "normalization",
        "highlighting",
        "databases",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100);
        let mut doc_words = Vec::with_capacity(doc_length);
        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len();
            doc_words.push(words[word_idx]);
        }
        documents.push(doc_words.join(" "));
    }

    documents
}

/// Benchmark stemming alone and as part of the analysis chain.
fn bench_stemming(c: &mut Criterion) {
    let mut group = c.benchmark_group("stemming");

    let stemmer = PorterStemmer::new();
    let texts = generate_test_documents(100);
    let words: Vec<&str> = texts[0].split(' ').collect();

    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("porter_words", |b| {
        b.iter(|| {
            for word in &words {
                black_box(stemmer.stem(black_box(word)));
            }
        })
    });

    let lexer = FullTextLexer::new();
    let lowercase = LowercaseFilter::new();
    let stem = StemFilter::new();
    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_documents", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens = lexer.tokenize(black_box(text)).unwrap();
                let tokens = stem.filter(lowercase.filter(tokens).unwrap()).unwrap();
                black_box(tokens.count());
            }
        })
    });

    group.finish();
}

/// Benchmark score combination.
fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    let scores: Vec<f64> = (1..=1000).map(|i| scoring::word(i % 7 + 1, 50.0)).collect();
    group.bench_function("combine_all", |b| {
        b.iter(|| black_box(scoring::combine_all(black_box(scores.iter().copied()))))
    });
    group.bench_function("decay", |b| b.iter(|| black_box(scoring::decay(black_box(0.9), 25))));

    group.finish();
}

/// Benchmark snippet building with and without a length budget.
fn bench_snippets(c: &mut Criterion) {
    let mut group = c.benchmark_group("snippets");

    let texts = generate_test_documents(10);
    let mut nodes = MemoryNodeStore::new(SourceId(0));
    let doc = nodes.add_document();
    let para = nodes.add_element(doc);
    nodes.add_text(para, &texts[9]);

    let mut positions = MatchPositionStore::new();
    positions.insert(nodes.node_ref(para), [3, 4, 40, 41, 42, 90]);
    let builder = SnippetBuilder::new(&positions);

    group.bench_function("mark", |b| {
        b.iter(|| black_box(builder.mark(&nodes, para).unwrap()))
    });
    group.bench_function("extract_150", |b| {
        b.iter(|| black_box(builder.build(&nodes, para, 150).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_stemming, bench_scoring, bench_snippets);
criterion_main!(benches);
