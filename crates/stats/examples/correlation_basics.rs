//! Correlation Basics
//!
//! Run with: cargo run -p causal-stats --example correlation_basics
//!
//! This example demonstrates:
//! - Pearson correlation coefficients and their p-values
//! - Least-squares lines of best fit
//! - Why a near-zero coefficient with a large p-value means "no evidence"

use causal_stats::{fit_line, pearson};

fn main() {
    println!("=== Correlation Basics ===\n");

    // -------------------------------------------------------------------------
    // 1. A strong positive relationship
    // -------------------------------------------------------------------------
    println!("1. A strong positive relationship");
    println!("----------------------------------");

    let hours: Vec<f64> = (0..30).map(|i| i as f64 / 2.0).collect();
    let score: Vec<f64> = hours
        .iter()
        .enumerate()
        .map(|(i, &h)| 4.0 * h + 50.0 + if i % 3 == 0 { 3.0 } else { -1.5 })
        .collect();

    let corr = pearson(&hours, &score).expect("valid series");
    let line = fit_line(&hours, &score).expect("valid series");
    println!("  study hours vs test score: {corr}");
    println!("  best fit: {line}\n");

    // -------------------------------------------------------------------------
    // 2. No relationship at all
    // -------------------------------------------------------------------------
    println!("2. No relationship at all");
    println!("--------------------------");

    let shoe_size: Vec<f64> = (0..30).map(|i| 36.0 + (i % 10) as f64).collect();
    let luck: Vec<f64> = (0..30)
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();

    let corr = pearson(&shoe_size, &luck).expect("valid series");
    println!("  shoe size vs luck: {corr}");
    println!("  (large p-value: the data cannot distinguish this from noise)\n");

    // -------------------------------------------------------------------------
    // 3. Correlation is symmetric, slopes are not
    // -------------------------------------------------------------------------
    println!("3. Correlation is symmetric, slopes are not");
    println!("--------------------------------------------");

    let forward = fit_line(&hours, &score).expect("valid series");
    let backward = fit_line(&score, &hours).expect("valid series");
    println!("  score ~ hours: {forward}");
    println!("  hours ~ score: {backward}");
    println!("  r is the same in both directions; the regression slope is not.");
}
