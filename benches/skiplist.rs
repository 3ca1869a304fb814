//! Benchmarks for this crate's [`SkipList`].

use coinflip_skiplist::{Geometric, SkipList};
use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Benchmarking sizes.
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Build a list of `size` random entries.
fn random_list(rng: &mut StdRng, size: usize) -> SkipList<u64, u64> {
    let mut sl = SkipList::with_seed(0x1234_abcd);
    sl.extend(std::iter::repeat_with(|| (rng.random(), rng.random())).take(size));
    sl
}

/// Benchmarking insertion.
#[inline]
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sl = random_list(&mut rng, size);

            b.iter(|| {
                sl.insert(rng.random(), rng.random());
            });
        });
    }

    for size in SIZES {
        group.bench_function(BenchmarkId::new("geometric p=0.25", size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let generator = Geometric::seeded(32, 0.25, 0x1234_abcd).expect("valid parameters");
            let mut sl = SkipList::with_level_generator(generator);
            sl.extend(std::iter::repeat_with(|| (rng.random::<u64>(), rng.random::<u64>())).take(size));

            b.iter(|| {
                sl.insert(rng.random(), rng.random());
            });
        });
    }
}

/// Benchmarking random access.
#[inline]
pub fn rand_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Random Access");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let sl = random_list(&mut rng, size);
            let keys: Vec<u64> = sl.keys().copied().collect();
            let lookups: Vec<u64> = std::iter::repeat_with(|| keys[rng.random_range(0..keys.len())])
                .take(10)
                .collect();

            b.iter(|| {
                for key in &lookups {
                    black_box(sl.get(key));
                }
            });
        });
    }
}

/// Benchmarking deletion followed by re-insertion of the same key.
#[inline]
pub fn delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Delete");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sl = random_list(&mut rng, size);
            let keys: Vec<u64> = sl.keys().copied().collect();

            b.iter(|| {
                let key = keys[rng.random_range(0..keys.len())];
                if let Some(value) = sl.delete(&key) {
                    sl.insert(key, value);
                }
            });
        });
    }
}

/// Benchmarking iteration.
#[inline]
pub fn iter(c: &mut Criterion) {
    c.bench_function("SkipList Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let sl = random_list(&mut rng, 100_000);

        b.iter(|| {
            for el in &sl {
                black_box(el);
            }
        });
    });
}
