//! Criterion benchmarks for the cine crates.
//!
//! The benchmarks live in `benches/cine_bench.rs`; run them with `cargo bench -p cine-bench`.
