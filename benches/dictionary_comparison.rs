use core::hint::black_box;
use core::num::NonZeroUsize;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use direct_dict::Addressing;
use direct_dict::DictConfig;
use direct_dict::Dictionary;
use hashbrown::HashMap as HashbrownMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;

const SIZES: &[usize] = &[(1 << 8), (1 << 9), (1 << 10), (1 << 11), (1 << 12)];

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

fn key(i: u64) -> String {
    format!("key_{:08X}", i)
}

fn direct() -> Dictionary {
    Dictionary::new()
}

fn modulo(size: usize) -> Dictionary {
    let buckets = NonZeroUsize::new(size.next_power_of_two()).unwrap();
    Dictionary::with_config(DictConfig::new().addressing(Addressing::Modulo(buckets)))
}

fn keys_for(size: usize) -> Vec<(String, String)> {
    (0..size as u64)
        .map(|i| (key(i), format!("value_{i}")))
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let pairs = keys_for(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("direct/{size}"), |b| {
            b.iter_batched(
                || pairs.clone(),
                |pairs| {
                    let mut dict = direct();
                    for (k, v) in pairs {
                        black_box(dict.upsert(k, v));
                    }
                    black_box(dict)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("modulo/{size}"), |b| {
            b.iter_batched(
                || pairs.clone(),
                |pairs| {
                    let mut dict = modulo(size);
                    for (k, v) in pairs {
                        black_box(dict.upsert(k, v));
                    }
                    black_box(dict)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || pairs.clone(),
                |pairs| {
                    let mut map = HashbrownMap::new();
                    for (k, v) in pairs {
                        black_box(map.insert(k, v));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let pairs = keys_for(size);
        let mut probes: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
        probes.shuffle(&mut SmallRng::seed_from_u64(size as u64));

        let dict: Dictionary = pairs.iter().cloned().collect();
        let map: HashbrownMap<String, String> = pairs.iter().cloned().collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("direct/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(dict.lookup(probe).ok());
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(map.get(probe));
                }
            })
        });
    }

    group.finish();
}

/// Removing from the front moves every remaining key down one registry
/// position; removing from the back moves none.
fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let pairs = keys_for(size);
        let dict: Dictionary = pairs.iter().cloned().collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("front/{size}"), |b| {
            b.iter_batched(
                || dict.clone(),
                |mut dict| {
                    for (k, _) in &pairs {
                        black_box(dict.remove(k).ok());
                    }
                    black_box(dict)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("back/{size}"), |b| {
            b.iter_batched(
                || dict.clone(),
                |mut dict| {
                    for (k, _) in pairs.iter().rev() {
                        black_box(dict.remove(k).ok());
                    }
                    black_box(dict)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_mixed_zipf(c: &mut Criterion) {
    for exponent in [1.0, 1.3] {
        let mut group = c.benchmark_group(format!("mixed_zipf_{:.01}", exponent));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for &size in SIZES {
            let mut rng = SmallRng::from_os_rng();
            let op_distr = Zipf::new(3.0, exponent).unwrap();
            let operations = (0..size * 3)
                .map(|_| {
                    let op_choice: f64 = rng.sample(op_distr);
                    if op_choice <= 1.0 {
                        Operation::Find
                    } else if op_choice <= 2.0 {
                        Operation::Insert
                    } else {
                        Operation::Remove
                    }
                })
                .collect::<Vec<Operation>>();

            let key_distr = Zipf::new(size as f64 * 2.0 - 1.0, 1.0).unwrap();
            let keys = (0..size * 3)
                .map(|_| key(rng.sample(key_distr) as u64))
                .collect::<Vec<String>>();

            group.throughput(Throughput::Elements(size as u64 * 3));
            group.bench_function(format!("direct/{size}"), |b| {
                b.iter(|| {
                    let mut dict = direct();
                    for (operation, k) in operations.iter().zip(&keys) {
                        match operation {
                            Operation::Insert => {
                                black_box(dict.upsert(k.as_str(), "value"));
                            }
                            Operation::Remove => {
                                black_box(dict.remove(k).ok());
                            }
                            Operation::Find => {
                                black_box(dict.get(k));
                            }
                        }
                    }
                    black_box(dict)
                })
            });
            group.bench_function(format!("hashbrown/{size}"), |b| {
                b.iter(|| {
                    let mut map = HashbrownMap::new();
                    for (operation, k) in operations.iter().zip(&keys) {
                        match operation {
                            Operation::Insert => {
                                black_box(map.insert(k.clone(), "value".to_string()));
                            }
                            Operation::Remove => {
                                black_box(map.remove(k));
                            }
                            Operation::Find => {
                                black_box(map.get(k));
                            }
                        }
                    }
                    black_box(map)
                })
            });
        }

        group.finish();
    }
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_remove,
    bench_mixed_zipf
);
criterion_main!(benches);
