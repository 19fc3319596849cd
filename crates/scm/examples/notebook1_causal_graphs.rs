//! Notebook 1: Causal Graphs and Stratification
//!
//! Run with: cargo run -p causal-scm --example notebook1_causal_graphs
//!
//! This example demonstrates:
//! - Building structural causal models and simulating data from them
//! - Confounding: a common cause makes price look good for business
//! - Colliders: conditioning on a common effect invents an association
//! - Mediators: conditioning on one hides a real effect
//! - A larger graph where all three patterns coexist
//!
//! Key insight: whether you should stratify depends on the graph, not the data!

use causal_scm::{Scm, VariableSpec};
use causal_stats::{fit_line, pearson};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("=== Notebook 1: Causal Graphs and Stratification ===\n");

    let mut rng = StdRng::seed_from_u64(42);

    // -------------------------------------------------------------------------
    // 1. Confounding: Does raising hotel prices raise bookings?
    // -------------------------------------------------------------------------
    println!("1. Confounding: Does raising hotel prices raise bookings?");
    println!("----------------------------------------------------------");
    println!();
    println!("Causal structure:");
    println!("       Temperature");
    println!("       ↙        ↘");
    println!("  Price (+2)    (+5)");
    println!("       ↘        ↙");
    println!("       Bookings  (price enters with weight -1)");
    println!();

    let hotel = Scm::from_specs(vec![
        ("temperature", VariableSpec::normal(23.0, 3.0)),
        ("price", VariableSpec::linear(&["temperature"], &[2.0], 5.0)),
        (
            "bookings",
            VariableSpec::linear(&["price", "temperature"], &[-1.0, 5.0], 5.0),
        ),
    ])
    .unwrap();

    println!("As a graph:\n{}", hotel.to_dot());

    let data = hotel.simulate(10_000, &mut rng).unwrap();
    let raw = pearson(data.column("price").unwrap(), data.column("bookings").unwrap()).unwrap();
    let raw_fit = fit_line(data.column("price").unwrap(), data.column("bookings").unwrap()).unwrap();

    println!("Raw association between price and bookings:");
    println!("  {raw}");
    println!("  {raw_fit}");
    println!();
    println!("Positive! Ship it? Not so fast: temperature drives both columns.");
    println!();

    // Hold the confounder (nearly) fixed and look again.
    let stratum = data.stratify_range("temperature", 22.5, 23.5).unwrap();
    let adj = pearson(
        stratum.column("price").unwrap(),
        stratum.column("bookings").unwrap(),
    )
    .unwrap();
    let adj_fit = fit_line(
        stratum.column("price").unwrap(),
        stratum.column("bookings").unwrap(),
    )
    .unwrap();

    println!(
        "Within temperature ∈ [22.5, 23.5) ({} of {} rows):",
        stratum.n_rows(),
        data.n_rows()
    );
    println!("  {adj}");
    println!("  {adj_fit}");
    println!();
    println!("The sign flips: holding temperature fixed, higher prices mean");
    println!("FEWER bookings. Stratifying on a confounder was the right move.");
    println!();

    // -------------------------------------------------------------------------
    // 2. Colliders: When stratifying manufactures an association
    // -------------------------------------------------------------------------
    println!("2. Colliders: When stratifying manufactures an association");
    println!("-----------------------------------------------------------");
    println!();
    println!("Causal structure (an online clothing shop):");
    println!("  RatedItems → Purchases");
    println!("       ↘          ↓");
    println!("        ↘    UnrelatedVariable");
    println!("         ↘        ↓");
    println!("          → Emails ← (logistic: many ratings and purchases,");
    println!("                      few of the unrelated thing → email sent)");
    println!();

    let shop = Scm::from_specs(vec![
        ("number_rated_items", VariableSpec::normal(30.0, 5.0)),
        (
            "number_purchases",
            VariableSpec::linear(&["number_rated_items"], &[1.0], 5.0),
        ),
        ("some_unrelated_variable", VariableSpec::normal(100.0, 20.0)),
        (
            "number_emails",
            VariableSpec::logistic(
                &[
                    "number_rated_items",
                    "number_purchases",
                    "some_unrelated_variable",
                ],
                &[1.2, 1.5, -1.0],
            ),
        ),
    ])
    .unwrap();

    let mut shop_data = shop.simulate(10_000, &mut rng).unwrap();
    shop_data.standardize_column("number_purchases").unwrap();
    shop_data
        .standardize_column("some_unrelated_variable")
        .unwrap();

    let before = pearson(
        shop_data.column("number_purchases").unwrap(),
        shop_data.column("some_unrelated_variable").unwrap(),
    )
    .unwrap();
    println!("Purchases vs the unrelated variable, all customers:");
    println!("  {before}");

    let emailed = shop_data.stratify("number_emails", 1.0).unwrap();
    let after = pearson(
        emailed.column("number_purchases").unwrap(),
        emailed.column("some_unrelated_variable").unwrap(),
    )
    .unwrap();
    println!("Same pair, but only customers who got an email:");
    println!("  {after}");
    println!();
    println!("An association appeared out of thin air. Email sending is a");
    println!("COLLIDER: both variables feed into it, and conditioning on a");
    println!("common effect makes its causes trade off against each other.");
    println!("Here, stratifying was exactly the wrong move.");
    println!();

    // -------------------------------------------------------------------------
    // 3. Mediators: Stratifying away the thing you wanted to measure
    // -------------------------------------------------------------------------
    println!("3. Mediators: Stratifying away the thing you wanted to measure");
    println!("---------------------------------------------------------------");
    println!();
    println!("Causal structure (a ride-sharing app):");
    println!("  AdSpend → Subscribers → Rides");
    println!();

    let rides = Scm::from_specs(vec![
        ("advertise", VariableSpec::normal(30.0, 5.0)),
        ("subscribers", VariableSpec::linear(&["advertise"], &[0.75], 5.0)),
        ("rides", VariableSpec::linear(&["subscribers"], &[0.75], 5.0)),
    ])
    .unwrap();

    let mut ride_data = rides.simulate(10_000, &mut rng).unwrap();

    let total = pearson(
        ride_data.column("advertise").unwrap(),
        ride_data.column("rides").unwrap(),
    )
    .unwrap();
    println!("Ad spend vs rides, everyone:");
    println!("  {total}");

    // Round the mediator so exact-equality strata have members.
    ride_data.round_column("subscribers", 0).unwrap();
    let stratum = ride_data.stratify("subscribers", 23.0).unwrap();
    let within = pearson(
        stratum.column("advertise").unwrap(),
        stratum.column("rides").unwrap(),
    )
    .unwrap();
    println!(
        "Ad spend vs rides among accounts with exactly 23 subscribers ({} rows):",
        stratum.n_rows()
    );
    println!("  {within}");
    println!();
    println!("The association vanishes, but the ads DO work: every effect of");
    println!("advertising flows THROUGH subscribers. Stratifying on a mediator");
    println!("blocks the causal path you were trying to measure.");
    println!();

    // -------------------------------------------------------------------------
    // 4. All three at once
    // -------------------------------------------------------------------------
    println!("4. All three at once");
    println!("--------------------");
    println!();
    println!("  A → B → C → D,  A → C,  B → E ← C → F");
    println!();

    let complex = Scm::from_specs(vec![
        ("a", VariableSpec::normal(0.0, 1.0)),
        ("b", VariableSpec::linear(&["a"], &[1.0], 0.5)),
        ("c", VariableSpec::linear(&["a", "b"], &[0.8, 1.0], 0.5)),
        ("d", VariableSpec::linear(&["c"], &[1.0], 0.5)),
        ("e", VariableSpec::logistic(&["b", "c"], &[1.0, 1.0])),
        ("f", VariableSpec::linear(&["c"], &[-1.0], 0.5)),
    ])
    .unwrap();

    println!("{}", complex.to_dot());

    let complex_data = complex.simulate(10_000, &mut rng).unwrap();
    let bd = pearson(
        complex_data.column("b").unwrap(),
        complex_data.column("d").unwrap(),
    )
    .unwrap();
    println!("For the b → d relationship:");
    println!("  raw: {bd}");
    println!("  - a is a confounder of b and c: stratify on it");
    println!("  - c is a mediator of b → d: leave it alone");
    println!("  - e is a collider of b and c: leave it alone");
    println!();

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("=== Notebook 1 Complete ===");
    println!();
    println!("We simulated data from known causal structures:");
    println!("  • Scm + VariableSpec: exogenous draws and linear/logistic links");
    println!("  • Dataset::stratify / stratify_range: conditioning by filtering");
    println!("  • to_dot: the graph, for your eyes");
    println!();
    println!("Key insight: the same operation (stratifying) fixes a confounder,");
    println!("fabricates an association on a collider, and erases a real effect");
    println!("on a mediator. You cannot read the right choice off the data.");
    println!();
    println!("Next: Notebook 2 - estimating effects with a model instead of a filter.");
}
