use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use sweepfield_core::*;

const TIERS: [(Coord, CellCount); 3] = [(10, 15), (25, 94), (50, 375)];

fn gen_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (side, mines) in TIERS {
        let config = BoardConfig::new((side, side), Some(mines)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                RandomBoardGenerator::new(seed).generate(black_box(config), &[(side / 2, side / 2)])
            });
        });
    }

    let saturated = BoardConfig::new((50, 50), Some(2495)).unwrap();
    group.bench_function("saturated", |b| {
        b.iter(|| RandomBoardGenerator::new(1).generate(black_box(saturated), &[(25, 25)]));
    });
    group.finish();
}

fn flood_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for (side, _) in TIERS {
        let board = Board::from_mine_coords((side, side), &[(side / 2, side / 2)]).unwrap();
        let revealed: Array2<bool> = Array2::default([usize::from(side); 2]);
        group.bench_with_input(BenchmarkId::from_parameter(side), &board, |b, board| {
            let engine = RevealEngine::new(board, &revealed).unwrap();
            b.iter(|| engine.reveal(black_box((0, 0))));
        });
    }
    group.finish();
}

criterion_group!(benches, gen_tiers, flood_tiers);
criterion_main!(benches);
