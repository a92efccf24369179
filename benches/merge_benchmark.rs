use std::fs::File;
use std::io::Write;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

use redund_core::canon::canonicalize;
use redund_core::merge::{MergeConfig, run_with_codec};
use redund_core::profile::{LebTextCodec, Profile, ProfilePair};

fn make_profile_pair(len: usize, seed: i32) -> ProfilePair {
    let fwd: Vec<i32> = (0..len).map(|i| (i as i32 * 7 + seed) % 37).collect();
    let rc: Vec<i32> = (0..len).map(|i| (i as i32 * 11 + seed) % 37).collect();
    ProfilePair {
        forward: Profile::new(seed as i64, fwd),
        reverse_complement: Profile::new(seed as i64, rc),
    }
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize_rotation_search");
    for len in [8usize, 32, 128] {
        let pair = make_profile_pair(len, 3);
        group.bench_with_input(BenchmarkId::new("rotation_search", len), &pair, |b, pair| {
            b.iter(|| black_box(canonicalize(black_box(pair), false)));
        });
    }
    group.finish();
}

fn write_sorted_fixture(path: &std::path::Path, n: usize, offset: i64) {
    let mut f = File::create(path).unwrap();
    for i in 0..n {
        let key = offset + i as i64;
        writeln!(f, "{key} {key} {}", key + 10_000_000).unwrap();
    }
}

fn bench_merge_driver(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_driver");
    group.sample_size(10);

    for (files, records_per_file) in [(2usize, 5_000usize), (8, 5_000)] {
        let label = format!("{files}files_x{records_per_file}");
        group.bench_with_input(BenchmarkId::new("k_way_merge", &label), &(files, records_per_file), |b, &(files, records_per_file)| {
            b.iter_batched(
                || {
                    let dir = tempdir().unwrap();
                    let indir = dir.path().join("in");
                    std::fs::create_dir(&indir).unwrap();
                    for f in 0..files {
                        let path = indir.join(format!("{f:03}.leb36.renumbered"));
                        write_sorted_fixture(&path, records_per_file, (f * records_per_file) as i64);
                    }
                    (dir, indir)
                },
                |(dir, indir)| {
                    let output = dir.path().join("out.leb36");
                    let cfg = MergeConfig {
                        input: indir,
                        output,
                        identical_only: true,
                        single_file: true,
                        verbose: false,
                    };
                    run_with_codec(black_box(&cfg), &LebTextCodec).unwrap();
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_merge_driver);
criterion_main!(benches);
