//! Benchmarks for window function descriptor planning.

#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use windlass_core::{CapabilityClient, EvalContext, Expr, FieldType, StoreEngine, TypeKind};
use windlass_plan::aggregation::{needs_frame, window_func_to_wire};
use windlass_plan::{PlanContext, WindowFuncDesc};

fn column(index: usize) -> Expr {
    Expr::column(index, format!("c{index}"), FieldType::new(TypeKind::BigInt))
}

/// Benchmark building descriptors for typical calls.
fn bench_new_descriptor(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_desc_new");
    group.throughput(Throughput::Elements(1));
    let ctx = EvalContext::new();

    let calls: [(&str, fn() -> Vec<Expr>); 4] = [
        ("row_number", Vec::new),
        ("sum", || vec![column(0)]),
        ("lead", || vec![column(0), Expr::literal(1i64), Expr::literal(0i64)]),
        ("ntile", || vec![Expr::literal(4i64)]),
    ];
    for (name, args) in calls {
        group.bench_function(name, |b| {
            b.iter_batched(
                args,
                |args| WindowFuncDesc::new(&ctx, black_box(name), args, false).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark frame policy lookups.
fn bench_needs_frame(c: &mut Criterion) {
    c.bench_function("needs_frame", |b| {
        b.iter(|| needs_frame(black_box("Percent_Rank")));
    });
}

/// Benchmark the push-down check followed by wire conversion.
fn bench_push_down(c: &mut Criterion) {
    let ctx = PlanContext::default();
    let client = CapabilityClient::columnar();
    let args = vec![column(2), Expr::literal(3i64)];
    let desc = WindowFuncDesc::new(ctx.eval_ctx(), "lag", args, false).unwrap().accepted().unwrap();

    c.bench_function("push_down_and_wire", |b| {
        b.iter(|| {
            let desc = black_box(&desc);
            if desc.can_push_down(&ctx, StoreEngine::Columnar) {
                window_func_to_wire(ctx.eval_ctx(), &client, desc)
            } else {
                None
            }
        });
    });
}

criterion_group!(benches, bench_new_descriptor, bench_needs_frame, bench_push_down);

criterion_main!(benches);
