//! Benchmarks for shard scans, OUI search, input expansion and batch lookups.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use netlookup::binary::{ip_index, mac_index};
use netlookup::{expand_ip, Database, Locator, LookupConfig, MemorySource};
use std::net::Ipv4Addr;

#[path = "../tests/common/mod.rs"]
mod common;

/// Shard with one record per second octet, each covering 256 /24 blocks.
fn generate_shard() -> Vec<u8> {
    let ranges: Vec<common::Range> = (0..=255u8)
        .map(|mid| {
            let mut r = common::range([0, mid], [255, mid], "US", ["Bench Org", "City", "--"]);
            r.coords = (40.0 + mid as f32 / 100.0, -74.0);
            r
        })
        .collect();
    common::ip_shard(&ranges)
}

fn generate_mac_db(count: u32) -> Vec<u8> {
    let names: Vec<String> = (0..count).map(|i| format!("Vendor {}", i)).collect();
    let entries: Vec<(u32, &str)> = (0..count)
        .map(|i| (i * 16 + 1, names[i as usize].as_str()))
        .collect();
    common::mac_db(&entries)
}

/// Benchmark the linear shard scan at the front, middle and end of a shard.
fn bench_ip_scan(c: &mut Criterion) {
    let shard = Database::from_bytes("ip/10.bin", generate_shard()).unwrap();

    let mut group = c.benchmark_group("ip_scan");
    for mid in [0u8, 128, 255] {
        let ip = Ipv4Addr::new(10, mid, 7, 7);
        group.bench_with_input(BenchmarkId::new("second_octet", mid), &ip, |b, ip| {
            b.iter(|| black_box(ip_index::lookup(&shard, *ip)))
        });
    }
    group.bench_function("miss", |b| {
        let empty = Database::from_bytes("ip/11.bin", common::ip_shard(&[])).unwrap();
        b.iter(|| black_box(ip_index::lookup(&empty, Ipv4Addr::new(11, 0, 0, 1))))
    });
    group.finish();
}

/// Benchmark OUI binary search with different table sizes.
fn bench_mac_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mac_search");

    for size in [1_000u32, 10_000, 50_000] {
        let db = Database::from_bytes("mac.bin", generate_mac_db(size)).unwrap();
        let prefixes: Vec<u32> = (0..100).map(|i| (i * (size / 100)) * 16 + 1).collect();

        group.throughput(Throughput::Elements(prefixes.len() as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &size, |b, _| {
            b.iter(|| {
                for prefix in &prefixes {
                    black_box(mac_index::lookup(&db, *prefix).ok());
                }
            })
        });
    }

    group.finish();
}

/// Benchmark input expansion.
fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    group.bench_function("cidr_24", |b| b.iter(|| black_box(expand_ip("192.168.0.0/24"))));
    group.bench_function("range", |b| {
        b.iter(|| black_box(expand_ip("10.0.0.1 - 10.0.0.200")))
    });
    group.bench_function("list", |b| {
        b.iter(|| black_box(expand_ip("1.1.1.1; 8.8.8.8, 9.9.9.9; 10.0.0.0/28")))
    });

    group.finish();
}

/// Benchmark whole batches through the locator, cold and cached.
fn bench_locator_batch(c: &mut Criterion) {
    let source = || MemorySource::new().with_file("ip/10.bin", generate_shard());
    let input = "10.20.0.0/24";

    let mut group = c.benchmark_group("locator_batch");
    group.throughput(Throughput::Elements(256));

    for jobs in [1usize, 4] {
        let locator = Locator::with_config(
            source(),
            LookupConfig::no_cache().max_concurrency(jobs),
        );
        group.bench_with_input(BenchmarkId::new("no_cache_jobs", jobs), &jobs, |b, _| {
            b.iter(|| black_box(locator.lookup_ip(input)))
        });
    }

    let cached = Locator::with_config(source(), LookupConfig::default());
    let _ = cached.lookup_ip(input);
    group.bench_function("cache_hit", |b| b.iter(|| black_box(cached.lookup_ip(input))));

    group.bench_function("cache_miss", |b| {
        b.iter_batched(
            || cached.clear_cache(),
            |_| black_box(cached.lookup_ip(input)),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_ip_scan,
    bench_mac_search,
    bench_expand,
    bench_locator_batch,
);

criterion_main!(benches);
