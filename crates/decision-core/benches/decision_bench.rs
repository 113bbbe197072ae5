// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the argmax rule and the full
//! feature-buffer-to-prediction path.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use decision_core::{decide, decide_array, Classifier, LinearModel, TreeEnsemble, TreeNode};
use decision_types::KernelConfig;

const N_FEAT: usize = 13;
const N_CLASS: usize = 3;

fn linear_model() -> LinearModel {
    let weights = (0..N_CLASS)
        .map(|c| (0..N_FEAT).map(|f| ((c * N_FEAT + f) as f64).sin()).collect())
        .collect();
    LinearModel::new(weights, vec![0.0; N_CLASS]).expect("valid linear model")
}

/// 32 depth-1 trees, one split each, cycling through the features.
fn forest() -> TreeEnsemble {
    let trees = (0..32)
        .map(|t| {
            let mut left = vec![0.1; N_CLASS];
            let mut right = vec![0.1; N_CLASS];
            left[t % N_CLASS] = 0.8;
            right[(t + 1) % N_CLASS] = 0.8;
            vec![
                TreeNode::Split {
                    feature: t % N_FEAT,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { values: left },
                TreeNode::Leaf { values: right },
            ]
        })
        .collect();
    TreeEnsemble::new(N_FEAT, N_CLASS, trees).expect("valid ensemble")
}

// ── Decision rule ───────────────────────────────────────────────────

fn bench_decide_3(c: &mut Criterion) {
    let scores = [0.2, 0.9, 0.9];
    c.bench_function("decide_3", |b| b.iter(|| decide(black_box(&scores))));
}

fn bench_decide_array_3(c: &mut Criterion) {
    let scores = [0.2, 0.9, 0.9];
    c.bench_function("decide_array_3", |b| {
        b.iter(|| decide_array(black_box(&scores)))
    });
}

fn bench_decide_1000(c: &mut Criterion) {
    let scores: Vec<f64> = (0..1000).map(|i| ((i * 7919) % 1000) as f64).collect();
    c.bench_function("decide_1000", |b| b.iter(|| decide(black_box(&scores))));
}

// ── Full pipeline ───────────────────────────────────────────────────

fn bench_classify_linear(c: &mut Criterion) {
    let classifier = Classifier::new(
        KernelConfig::new(N_FEAT, N_CLASS),
        Arc::new(linear_model()),
    )
    .expect("dimensions agree");
    let x = [0.5; N_FEAT];
    c.bench_function("classify_linear", |b| {
        b.iter(|| classifier.classify(black_box(&x)))
    });
}

fn bench_decide_into_forest(c: &mut Criterion) {
    let classifier = Classifier::new(KernelConfig::new(N_FEAT, N_CLASS), Arc::new(forest()))
        .expect("dimensions agree");
    let x = [0.5; N_FEAT];
    let mut scores = [0.0; N_CLASS];
    c.bench_function("decide_into_forest_32", |b| {
        b.iter(|| classifier.decide_into(black_box(&x), &mut scores))
    });
}

criterion_group!(
    benches,
    bench_decide_3,
    bench_decide_array_3,
    bench_decide_1000,
    bench_classify_linear,
    bench_decide_into_forest,
);
criterion_main!(benches);
