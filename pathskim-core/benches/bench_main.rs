use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pathskim_core::prelude::*;
use pathskim_core::routing::LabelCorrecting;
use pathskim_core::{CostKey, GraphView};

/// Bidirectional grid with a zone on every fifth node and alternating
/// auto/walk street tags
fn grid(side: usize) -> Network {
    let id = |row: usize, col: usize| (row * side + col).to_string();
    let mut builder = NetworkBuilder::new();

    for row in 0..side {
        for col in 0..side {
            let no = row * side + col;
            if no % 5 == 0 {
                builder.add_zone(id(row, col), no.to_string());
            } else {
                builder.add_node(id(row, col));
            }
        }
    }

    let mut link = 0;
    let mut connect = |builder: &mut NetworkBuilder, a: String, b: String, uses: &str| {
        let length = 0.1 + (link % 7) as f64 * 0.05;
        builder.add_link(link.to_string(), a.clone(), b.clone(), length, length * 2.0, uses);
        builder.add_link((link + 1).to_string(), b, a, length, length * 2.0, uses);
        link += 2;
    };
    for row in 0..side {
        for col in 0..side {
            let uses = if (row + col) % 2 == 0 { "auto" } else { "walk" };
            if col + 1 < side {
                connect(&mut builder, id(row, col), id(row, col + 1), uses);
            }
            if row + 1 < side {
                connect(&mut builder, id(row, col), id(row + 1, col), "");
            }
        }
    }

    builder.build().expect("grid network is valid")
}

fn single_source_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_source");
    for side in [50, 100] {
        let network = grid(side);
        let view = GraphView::with_costs(&network, &CostKey::default());
        let mut engine = LabelCorrecting::new(&view);
        let origin = network.node_count() / 2;

        group.bench_with_input(BenchmarkId::from_parameter(side), &origin, |b, &origin| {
            b.iter(|| {
                engine
                    .run(&view, black_box(origin), UseMask::ALL)
                    .map(|tree| tree.cost(0))
                    .expect("origin is in range")
            });
        });
    }
    group.finish();
}

fn skim_benchmark(c: &mut Criterion) {
    let network = grid(60);
    let zones = network.centroid_ids();
    let mut group = c.benchmark_group("skim");
    group.sample_size(10);

    for mode in [ModeProfile::all(), ModeProfile::walk()] {
        let view = GraphView::with_costs(&network, &CostKey::new(CostType::Time, mode.clone()));
        group.bench_function(mode.name.as_str(), |b| {
            b.iter(|| {
                compute_skim(&network, &view, black_box(&zones), UNREACHABLE_COST)
                    .expect("zones are network nodes")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, single_source_benchmark, skim_benchmark);
criterion_main!(benches);
