//! 中国邮递员回路性能基准
//!
//! 运行: cargo bench --bench cpt

use cptgraph::algorithm::{ChinesePostman, CostClosure, CostModel};
use cptgraph::graph::{DiGraph, Edge, NodeId};
use cptgraph::types::EdgeCost;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

// ==================== 随机图生成 ====================

/// 环 + 随机弦，保证强连通且大多不平衡
fn random_postman(n: usize, chords: usize, seed: u64) -> ChinesePostman {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();

    let mut graph = DiGraph::new();
    for name in &names {
        graph.ensure_node(name.as_str());
    }

    let mut edges: Vec<Edge> = (0..n)
        .map(|i| Edge::new(names[i].as_str(), names[(i + 1) % n].as_str()))
        .collect();
    for _ in 0..chords {
        let tail = rng.gen_range(0..n);
        let head = rng.gen_range(0..n);
        let edge = Edge::new(names[tail].as_str(), names[head].as_str());
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    let costs: Vec<EdgeCost> = edges
        .iter()
        .map(|e| EdgeCost::new(e.tail().clone(), e.head().clone(), rng.gen_range(1..10)))
        .collect();

    let mut postman = ChinesePostman::new(graph, CostModel::default().with_overrides(costs));
    postman
        .connect_nodes(edges)
        .expect("generated edges are unique");
    postman
}

// ==================== 基准 ====================

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");
    for n in [16usize, 64, 128] {
        let postman = random_postman(n, n * 2, 7);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &postman, |b, postman| {
            b.iter(|| CostClosure::compute(black_box(postman.weighted())))
        });
    }
    group.finish();
}

fn bench_compute_cpt(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_cpt");
    group.sample_size(20);
    for n in [16usize, 64, 128] {
        let postman = random_postman(n, n * 2, 42);
        let start = NodeId::from("n0");
        group.throughput(Throughput::Elements(postman.graph().edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &postman, |b, postman| {
            b.iter(|| postman.compute_cpt(black_box(&start)).expect("strongly connected"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_closure, bench_compute_cpt);
criterion_main!(benches);
