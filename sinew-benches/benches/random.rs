//! Random sampler benchmarks.
//!
//! Each iteration draws a full pre × post uniform matrix; the fixed-degree
//! samplers additionally rank every column or row.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use sinew_benches::{error::BenchSetupError, params::SheetParams};
use sinew_core::{Degree, FixedPostNum, FixedPreNum, FixedProb};

/// Seed for every random stream in this benchmark.
const SEED: u64 = 42;

/// Sheet sides to benchmark.
const SIDES: &[usize] = &[16, 32, 64];

fn random_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let fixed_prob = FixedProb::new(0.1)?.with_include_self(false);
    let fixed_pre = FixedPreNum::new(Degree::Fraction(0.1))?;
    let fixed_post = FixedPostNum::new(Degree::Fraction(0.1))?;

    let mut group = c.benchmark_group("random");
    group.sample_size(20);
    for &side in SIDES {
        let params = SheetParams { side };
        let sheet = params.population();
        group.bench_with_input(BenchmarkId::new("fixed_prob", params), &sheet, |b, sheet| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| fixed_prob.connect_with_rng(sheet, sheet, &mut rng));
        });
        group.bench_with_input(BenchmarkId::new("fixed_pre_num", params), &sheet, |b, sheet| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| fixed_pre.connect_with_rng(sheet, sheet, &mut rng));
        });
        group.bench_with_input(BenchmarkId::new("fixed_post_num", params), &sheet, |b, sheet| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| fixed_post.connect_with_rng(sheet, sheet, &mut rng));
        });
    }
    group.finish();
    Ok(())
}

fn random(c: &mut Criterion) {
    if let Err(err) = random_impl(c) {
        panic!("random benchmark setup failed: {err}");
    }
}

criterion_group!(benches, random);
criterion_main!(benches);
