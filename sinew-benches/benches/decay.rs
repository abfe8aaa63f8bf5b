//! Distance-decay benchmarks.
//!
//! Every pre neuron scans every post neuron, so cost grows with the square of
//! the sheet size; sides stay small.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sinew_benches::{error::BenchSetupError, params::SheetParams};
use sinew_core::{Connector, Dog, GaussianProb, GaussianWeight};

/// Seed for the Bernoulli trials of the probabilistic generator.
const SEED: u64 = 42;

/// Sheet sides to benchmark.
const SIDES: &[usize] = &[16, 32, 48];

fn decay_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let rules: [Box<dyn Connector>; 3] = [
        Box::new(GaussianWeight::new(0.1, 1.0)?),
        Box::new(GaussianProb::new(0.1)?.with_seed(SEED)),
        Box::new(Dog::new((0.05, 0.2), (1.0, 0.6))?),
    ];

    for rule in &rules {
        let mut group = c.benchmark_group(rule.name());
        group.sample_size(10);
        for &side in SIDES {
            let params = SheetParams { side };
            let sheet = params.population();
            group.bench_with_input(BenchmarkId::from_parameter(params), &sheet, |b, sheet| {
                b.iter(|| rule.connect(sheet, sheet));
            });
        }
        group.finish();
    }
    Ok(())
}

fn decay(c: &mut Criterion) {
    if let Err(err) = decay_impl(c) {
        panic!("decay benchmark setup failed: {err}");
    }
}

criterion_group!(benches, decay);
criterion_main!(benches);
