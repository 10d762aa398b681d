//! Filtering Benchmark Tool
//!
//! Loads a creature dataset and measures the engine end to end: index build,
//! a spread of filter evaluations, and a round of predictive counts such as a
//! sidebar would issue when rendering one multi-select option list.
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/bestiary_bench /path/to/creatures.json
//!
//! # Restrict free-text search to names
//! ./target/release/bestiary_bench /path/to/creatures.json names
//!
//! # Show build summaries
//! RUST_LOG=debug ./target/release/bestiary_bench /path/to/creatures.json
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Build ===
//! --------------------------------
//! Mode        : Build
//! Elapsed     : 12.841 ms
//! Queries     : 1
//! --------------------------------
//! ```

use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bestiary_core::{build_indexes, load_creatures, FacetOrder, Indexes, LoadError};
use bestiary_types::catalog::keys;
use bestiary_types::{Creature, EngineConfig, FilterCatalog, FilterState, MatchMode, RangeBound};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> Result<(), LoadError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: bestiary_bench <dataset.json> [names]");
        std::process::exit(1);
    }

    let config = match args.get(2).map(String::as_str) {
        Some("names") => EngineConfig::names_only(),
        _ => EngineConfig::default(),
    };

    println!("Loading dataset...");
    let records = load_creatures(&args[1])?;
    println!("Records:   {}\n", fmt_count(records.len() as u64));

    let catalog = Arc::new(FilterCatalog::standard());
    let indexes = bench_build(&records, &catalog, &config);
    println!("{}\n", indexes.stats());

    bench_evaluate(&records, &indexes);
    bench_predict(&records, &indexes);

    Ok(())
}

fn bench_build(
    records: &[Creature],
    catalog: &Arc<FilterCatalog>,
    config: &EngineConfig,
) -> Indexes {
    println!("=== Build ===");

    warmup(|| {
        std::hint::black_box(build_indexes(records, Arc::clone(catalog), config));
    });

    let elapsed = measure(|| {
        std::hint::black_box(build_indexes(records, Arc::clone(catalog), config));
    });

    print_perf("Build", elapsed, 1, None);
    build_indexes(records, Arc::clone(catalog), config)
}

fn sample_states() -> Vec<(&'static str, FilterState)> {
    let mut states = vec![("empty", FilterState::new())];

    let mut state = FilterState::new();
    state.select(keys::TYPE, "dragon");
    states.push(("type", state.clone()));

    state.set_range(keys::CR, RangeBound::between(5.0, 15.0));
    states.push(("type+cr", state.clone()));

    state.set_range(keys::STR, RangeBound::at_least(20.0));
    states.push(("type+cr+str", state));

    let mut state = FilterState::new();
    state.select(keys::LANGUAGES, "common");
    state.select(keys::LANGUAGES, "draconic");
    state.set_match_mode(keys::LANGUAGES, MatchMode::All);
    states.push(("languages-all", state));

    let mut state = FilterState::new();
    state.select(keys::SUBTYPES, "evil");
    state.set_exclude(keys::SUBTYPES, true);
    state.set_flag(keys::HAS_SPELLS, Some(false));
    states.push(("exclude+flag", state));

    let mut state = FilterState::new();
    state.set_search("dragon");
    states.push(("search", state));

    states
}

fn bench_evaluate(records: &[Creature], indexes: &Indexes) {
    println!("=== Evaluate ===");

    for (label, state) in sample_states() {
        warmup(|| {
            std::hint::black_box(indexes.evaluate(records, &state));
        });

        let mut hits = 0u64;
        let elapsed = measure(|| {
            hits = indexes.evaluate(records, &state).len() as u64;
            std::hint::black_box(hits);
        });

        print_perf(label, elapsed, 1, Some(hits));
    }
}

fn bench_predict(records: &[Creature], indexes: &Indexes) {
    println!("=== Predict ===");

    let Some(table) = indexes.facet(keys::TYPE, None, FacetOrder::CountDescending) else {
        return;
    };

    let mut state = FilterState::new();
    state.set_range(keys::CR, RangeBound::at_most(10.0));

    warmup(|| {
        for value in &table.values {
            let count = indexes.predicted_count(records, &state, keys::TYPE, &value.key);
            std::hint::black_box(count);
        }
    });

    let elapsed = measure(|| {
        for value in &table.values {
            let count = indexes.predicted_count(records, &state, keys::TYPE, &value.key);
            std::hint::black_box(count);
        }
    });

    print_perf(
        "Predict (type options)",
        elapsed,
        table.values.len() as u64,
        None,
    );
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, elapsed: Duration, queries: u64, hits: Option<u64>) {
    let secs = elapsed.as_secs_f64();

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} ms", secs * 1000.0);
    println!("Queries     : {}", fmt_count(queries));

    if let Some(hits) = hits {
        println!("Matches     : {}", fmt_count(hits));
    }
    if queries > 1 && secs > 0.0 {
        println!("Queries/sec : {}", fmt_count((queries as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
