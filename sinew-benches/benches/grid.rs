//! Lattice adjacency benchmarks.
//!
//! Measures four-neighbour and square-neighbourhood generation on square
//! sheets, where every row is an independent kernel.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sinew_benches::params::{RadiusParams, SheetParams};
use sinew_core::{GridFour, GridN};

/// Sheet sides to benchmark.
const SIDES: &[usize] = &[32, 128, 256];

/// Neighbourhood radii for the square-neighbourhood group.
const RADII: &[usize] = &[1, 3];

fn grid_four(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_four");
    for &side in SIDES {
        let params = SheetParams { side };
        let sheet = params.population();
        group.bench_with_input(BenchmarkId::from_parameter(params), &sheet, |b, sheet| {
            b.iter(|| GridFour::default().connect_within(sheet));
        });
    }
    group.finish();
}

fn grid_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_n");
    group.sample_size(20);
    for &side in SIDES {
        for &radius in RADII {
            let params = RadiusParams {
                sheet: SheetParams { side },
                radius,
            };
            let sheet = params.sheet.population();
            group.bench_with_input(BenchmarkId::from_parameter(params), &sheet, |b, sheet| {
                b.iter(|| GridN::new(radius, false).connect_within(sheet));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, grid_four, grid_n);
criterion_main!(benches);
