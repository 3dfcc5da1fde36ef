use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use selectrank::search::sort::compare_score_cards;
use selectrank::{
    Build, HeaderGroup, RawEntry, ScoreCard, SearchConfig, SelectConfig, SelectOption, normalize,
    rank_options, select_default,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate `n` options: "Item 0", "Item 1", ... with values "item_0", ...
fn generate_options(n: usize) -> Vec<SelectOption> {
    (0..n)
        .map(|i| {
            SelectOption::new(format!("Item {i}"), format!("item_{i}"))
                .with_description(format!("description number {i}"))
                .with_index(i)
        })
        .collect()
}

/// Generate `n` primitive entries grouped ten to a header.
fn generate_grouped_entries(n: usize) -> Vec<RawEntry> {
    (0..n)
        .collect::<Vec<_>>()
        .chunks(10)
        .map(|chunk| {
            RawEntry::Header(HeaderGroup::new(
                chunk.iter().map(|i| RawEntry::from(format!("v{i}"))).collect(),
            ))
        })
        .collect()
}

/// Generate `n` diacritic-heavy options.
fn generate_diacritics_options(n: usize) -> Vec<SelectOption> {
    (0..n)
        .map(|i| {
            let text = if i % 2 == 0 {
                format!("caf\u{00e9} {i}")
            } else {
                format!("cafe {i}")
            };
            SelectOption::new(text, i.to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Normalization
// ---------------------------------------------------------------------------

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [100, 10_000] {
        let entries = generate_grouped_entries(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| normalize(black_box(entries)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// 2. Ranking throughput at dataset sizes
// ---------------------------------------------------------------------------

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    let config = SearchConfig::default();

    for size in [100, 10_000] {
        let options = generate_options(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            b.iter(|| rank_options(&config, black_box(options), black_box("item 5")));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// 3. Cold cache vs. warm cache
// ---------------------------------------------------------------------------

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_fields_cache");
    let config = SearchConfig::default();
    let warm = generate_options(10_000);
    let _ = rank_options(&config, &warm, "warm");

    group.bench_function("warm", |b| {
        b.iter(|| rank_options(&config, black_box(&warm), black_box("item")));
    });

    group.bench_function("cold", |b| {
        b.iter_batched(
            || generate_options(10_000),
            |options| rank_options(&config, &options, black_box("item")),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 4. Diacritics overhead
// ---------------------------------------------------------------------------

fn bench_diacritics(c: &mut Criterion) {
    let mut group = c.benchmark_group("diacritics");

    group.bench_function("keep_diacritics", |b| {
        let config = SearchConfig::default();
        b.iter_batched(
            || generate_diacritics_options(10_000),
            |options| rank_options(&config, &options, black_box("cafe")),
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("strip_diacritics", |b| {
        let config = SearchConfig::default().with_keep_diacritics(false);
        b.iter_batched(
            || generate_diacritics_options(10_000),
            |options| rank_options(&config, &options, black_box("cafe")),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 5. Sort and default selection
// ---------------------------------------------------------------------------

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let cards: Vec<ScoreCard> = generate_options(10_000)
        .into_iter()
        .enumerate()
        .map(|(i, item)| ScoreCard {
            index: i,
            item,
            score: (i % 7) as i64 * 10,
        })
        .collect();

    group.bench_function("sort_10k_cards", |b| {
        b.iter_batched(
            || cards.clone(),
            |mut data| {
                data.sort_by(compare_score_cards);
                data
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("select_default_by_value", |b| {
        let config = SelectConfig::default().with_default_value("item_9999");
        b.iter_batched(
            || generate_options(10_000),
            |options| select_default(&config, options, Build::Initial),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_normalize,
    bench_throughput,
    bench_cache,
    bench_diacritics,
    bench_sort,
);
criterion_main!(benches);
