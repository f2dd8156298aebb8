//! Classification benchmarks.
//!
//! Measures rule compilation and per-issue classification for rule sets of
//! increasing size, mixing regex and literal patterns.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use issue_labeler::{parse_rules, IssueContext, LabelClassifier, LabelerConfig};

fn generate_config(rule_count: usize) -> String {
    let mut yaml = String::new();
    for i in 0..rule_count {
        match i % 3 {
            0 => yaml.push_str(&format!("label-{i}: \"/crash-{i}|exception-{i}/i\"\n")),
            1 => yaml.push_str(&format!(
                "label-{i}:\n  - \"keyword-{i}\"\n  - \"/^panic-{i}$/m\"\n"
            )),
            _ => yaml.push_str(&format!("label-{i}: \"literal text {i}\"\n")),
        }
    }
    yaml
}

fn issue_body(rule_count: usize) -> String {
    let mut body = String::from("Steps to reproduce:\n");
    for i in (0..rule_count).step_by(7) {
        body.push_str(&format!("saw Crash-{i} after keyword-{i}\n"));
    }
    body.push_str("Is this expected?");
    body
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let config = LabelerConfig::default();

    for rule_count in [10, 100, 1000] {
        let rules = parse_rules(&generate_config(rule_count)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rules,
            |b, rules| b.iter(|| LabelClassifier::from_rule_set(black_box(rules), &config)),
        );
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let config = LabelerConfig::default();

    for rule_count in [10, 100, 1000] {
        let rules = parse_rules(&generate_config(rule_count)).unwrap();
        let classifier = LabelClassifier::from_rule_set(&rules, &config);
        let issue = IssueContext::new(1, issue_body(rule_count));

        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &issue,
            |b, issue| b.iter(|| classifier.classify(black_box(issue))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_classify);
criterion_main!(benches);
