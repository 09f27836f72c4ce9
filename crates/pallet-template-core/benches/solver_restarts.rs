use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pallet_template_core::prelude::*;

fn bench_solver_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_worker_scaling");

    let pallet = PalletDims::new(1200, 1000);
    let box_dims = BoxDims::new(300, 200, 150);

    for workers in [1u32, 2, 4, 8] {
        group.throughput(Throughput::Elements(workers as u64));
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &workers,
            |b, &workers| {
                b.iter(|| {
                    let req = SolveRequest {
                        pallet,
                        box_dims,
                        time_limit: Duration::from_millis(200),
                        workers,
                        seed: Some(1),
                        obstacle: None,
                    };
                    black_box(solve_layer(&req).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_generate_end_to_end(c: &mut Criterion) {
    let pallet = PalletDims::new(1200, 1000);
    let box_dims = BoxDims::new(300, 200, 150);
    let cfg = EngineConfig::builder()
        .num_solutions(2)
        .workers(4)
        .seed(Some(7))
        .base_time_limit(Duration::from_millis(300))
        .upper_time_limit(Duration::from_millis(150))
        .build();

    c.bench_function("generate_end_to_end", |b| {
        b.iter(|| black_box(generate(pallet, box_dims, &cfg).unwrap()));
    });
}

criterion_group!(benches, bench_solver_worker_scaling, bench_generate_end_to_end);
criterion_main!(benches);
