/*!
# Performance Benchmarks for Hyperstar

Criterion-based benchmarks for the heap backends and the two routing
engines, used to detect performance regressions.
*/

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use hyperstar::core::dijkstra::Dijkstra;
use hyperstar::core::generators::gnp_interval_network;
use hyperstar::core::heap::{FibonacciHeap, Heap, RadixHeap};
use hyperstar::core::hyperpath::Hyperpath;

// ============================================================================
// Heap Benchmarks
// ============================================================================

fn bench_radix_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix_heap_insert_drain");

    for size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut heap = RadixHeap::with_max_key(size, size as u64);
                for item in 0..size {
                    heap.insert(item, ((item * 7919) % size) as f64);
                }
                while let Some(item) = heap.delete_min() {
                    black_box(item);
                }
            });
        });
    }
    group.finish();
}

fn bench_fibonacci_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci_heap_insert_decrease_drain");

    for size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new(size);
                for item in 0..size {
                    heap.insert(item, (size + (item * 7919) % size) as f64);
                }
                for item in (0..size).step_by(5) {
                    heap.decrease_key(item, (item % 17) as f64);
                }
                while let Some(item) = heap.delete_min() {
                    black_box(item);
                }
            });
        });
    }
    group.finish();
}

// ============================================================================
// Engine Benchmarks
// ============================================================================

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_run");

    for size in [100, 500, 1_000].iter() {
        let net = gnp_interval_network(*size, 0.05, 100.0, 42).unwrap();
        group.throughput(Throughput::Elements(net.graph.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut engine = Dijkstra::new(&net.graph);
            engine.set_weights(&net.wmin).unwrap();
            b.iter(|| {
                engine.run("v0").unwrap();
                black_box(engine.potentials()[net.graph.vertex_count() - 1]);
                engine.recover();
            });
        });
    }
    group.finish();
}

fn bench_hyperpath(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperpath_run");

    for size in [50, 200, 500].iter() {
        let net = gnp_interval_network(*size, 0.05, 100.0, 42).unwrap();
        let destination = format!("v{}", size - 1);
        group.throughput(Throughput::Elements(net.graph.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut engine = Hyperpath::new(&net.graph);
            engine.set_weights(&net.wmin, &net.wmax).unwrap();
            b.iter(|| {
                engine.run("v0", &destination).unwrap();
                black_box(engine.hyperpath().len());
                engine.recover();
            });
        });
    }
    group.finish();
}

fn bench_hyperpath_with_potentials(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperpath_run_with_potentials");

    for size in [50, 200, 500].iter() {
        let net = gnp_interval_network(*size, 0.05, 100.0, 42).unwrap();
        let destination = format!("v{}", size - 1);

        let reversed = net.graph.reverse();
        let mut dijkstra = Dijkstra::new(&reversed);
        dijkstra.set_weights(&net.wmin).unwrap();
        dijkstra.run(&destination).unwrap();

        group.throughput(Throughput::Elements(net.graph.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut engine = Hyperpath::new(&net.graph);
            engine.set_weights(&net.wmin, &net.wmax).unwrap();
            engine.set_potentials(dijkstra.potentials()).unwrap();
            b.iter(|| {
                engine.run("v0", &destination).unwrap();
                black_box(engine.hyperpath().len());
                engine.recover();
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_radix_heap,
    bench_fibonacci_heap,
    bench_dijkstra,
    bench_hyperpath,
    bench_hyperpath_with_potentials,
);
criterion_main!(benches);
