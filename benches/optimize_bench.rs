use criterion::{criterion_group, criterion_main, Criterion};

use context_optimizer::{ContextOptimizer, OptimizeOptions};

/// A synthetic module-summary document: headed prose with embedded files.
fn synthetic_document(modules: usize) -> String {
    let mut text = String::from("# Project Overview\n\nGenerated module summaries.\n\n");
    for m in 0..modules {
        text.push_str(&format!("## Module {}\n\nWhat module {} does.\n\n", m, m));
        text.push_str(&format!("```ts\n// src/modules/module{}/service.ts\n", m));
        text.push_str(&format!("export class Service{} {{\n", m));
        for i in 0..20 {
            text.push_str(&format!(
                "  // step {} of the pipeline\n  run{}(input: Input): Output {{\n    return transform(input, {});\n  }}\n",
                i, i, i
            ));
        }
        text.push_str("}\n```\n\n");
    }
    text
}

fn bench_light_pass(c: &mut Criterion) {
    let optimizer = ContextOptimizer::default();
    let text = synthetic_document(10);
    let original = optimizer.estimate_tokens(&text, false);
    let budget = original - original / 10;

    c.bench_function("optimize_light_10_modules", |b| {
        b.iter(|| optimizer.optimize_context(&text, budget, &OptimizeOptions::default()));
    });
}

fn bench_aggressive_pass(c: &mut Criterion) {
    let optimizer = ContextOptimizer::default();
    let text = synthetic_document(10);
    let original = optimizer.estimate_tokens(&text, false);

    c.bench_function("optimize_aggressive_10_modules", |b| {
        b.iter(|| optimizer.optimize_context(&text, original / 4, &OptimizeOptions::default()));
    });
}

criterion_group!(benches, bench_light_pass, bench_aggressive_pass);
criterion_main!(benches);
