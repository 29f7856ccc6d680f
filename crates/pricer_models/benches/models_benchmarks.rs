//! Criterion benchmarks for the Black-Scholes engine and payoff curves.
//!
//! Measures premium, Greeks and combined valuation for a single contract,
//! a moneyness sweep, and curve generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionContract, OptionSide};
use pricer_models::payoff::PayoffCurve;

fn atm_call() -> OptionContract<f64> {
    OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionSide::Call)
}

/// Benchmark single-contract pricing entry points.
fn bench_single_contract(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_scholes");
    let contract = atm_call();

    group.bench_function("price", |b| {
        b.iter(|| BlackScholes::price(black_box(&contract)))
    });
    group.bench_function("greeks", |b| {
        b.iter(|| BlackScholes::greeks(black_box(&contract)))
    });
    group.bench_function("value", |b| {
        b.iter(|| BlackScholes::value(black_box(&contract)))
    });

    // Degenerate path returns before any transcendental call
    let expired = contract.with_expiry(0.0);
    group.bench_function("price_degenerate", |b| {
        b.iter(|| BlackScholes::price(black_box(&expired)))
    });

    group.finish();
}

/// Benchmark a strike sweep of valuations.
fn bench_strike_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("strike_sweep");

    for size in [10, 100, 1000] {
        let contracts: Vec<OptionContract<f64>> = (0..size)
            .map(|i| {
                let strike = 50.0 + 100.0 * i as f64 / size as f64;
                OptionContract::new(100.0, strike, 0.5, 0.6, 0.03, OptionSide::Put)
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("value", size), &contracts, |b, cs| {
            b.iter(|| {
                for c in cs {
                    black_box(BlackScholes::value(c));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark payoff curve generation and rounding.
fn bench_payoff_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("payoff_curve");
    let contract = atm_call();
    let premium = BlackScholes::price(&contract);

    group.bench_function("generate", |b| {
        b.iter(|| PayoffCurve::for_contract(black_box(&contract), black_box(premium)))
    });

    let curve = PayoffCurve::for_contract(&contract, premium);
    group.bench_function("rounded", |b| b.iter(|| black_box(&curve).rounded()));

    group.finish();
}

criterion_group!(
    benches,
    bench_single_contract,
    bench_strike_sweep,
    bench_payoff_curve
);
criterion_main!(benches);
