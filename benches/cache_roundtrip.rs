//! Benchmarks for the playlist cache
//!
//! This benchmark measures:
//! - Key derivation for short and long identifiers
//! - Cache hit latency (memory and file backends) for growing playlists
//! - Duration parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ytvp::cache::{CacheBackend, CacheConfig, CacheStore, FileCache, KeyDeriver, MemoryCache};
use ytvp::types::{duration_to_seconds, ItemRecord};

fn playlist(len: usize) -> Vec<ItemRecord> {
    (0..len)
        .map(|i| {
            ItemRecord::new(format!("video{:05}", i), format!("Episode {}", i))
                .with_thumbnail_url(format!("https://i.ytimg.com/vi/video{:05}/hqdefault.jpg", i))
                .with_duration_seconds(600 + i as i64)
        })
        .collect()
}

fn bench_key_derivation(c: &mut Criterion) {
    let deriver = KeyDeriver::new();
    let long_id = "PL".repeat(512);

    let mut group = c.benchmark_group("key_derivation");
    group.bench_function("playlist_id", |b| {
        b.iter(|| deriver.derive(black_box("PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf")))
    });
    group.bench_function("long_id", |b| b.iter(|| deriver.derive(black_box(&long_id))));
    group.finish();
}

fn bench_cache_hit(c: &mut Criterion) {
    let tmp = std::env::temp_dir().join("ytvp-bench");
    let mut group = c.benchmark_group("cache_hit");

    for len in [10usize, 200, 2000] {
        let items = playlist(len);
        group.throughput(Throughput::Elements(len as u64));

        let backends: [(&str, Box<dyn CacheBackend>); 2] = [
            ("memory", Box::new(MemoryCache::new())),
            ("file", Box::new(FileCache::new(tmp.join(len.to_string())))),
        ];
        for (name, backend) in backends {
            let store = CacheStore::new(CacheConfig::default(), backend);
            let id = format!("PLbench{}", len);
            let _ = store.write(&id, &items);
            group.bench_with_input(BenchmarkId::new(name, len), &id, |b, id| {
                b.iter(|| store.read(black_box(id)))
            });
        }
    }
    group.finish();
}

fn bench_duration_parsing(c: &mut Criterion) {
    c.bench_function("duration_to_seconds", |b| {
        b.iter(|| duration_to_seconds(black_box("P1DT2H3M4S")))
    });
}

criterion_group!(
    benches,
    bench_key_derivation,
    bench_cache_hit,
    bench_duration_parsing
);
criterion_main!(benches);
