//! End-to-end stratification scenarios: what conditioning does to a
//! measured association, for a confounder and for a collider.

use causal_scm::{Scm, VariableSpec};
use causal_stats::pearson;
use rand::rngs::StdRng;
use rand::SeedableRng;

const N: usize = 20_000;

/// Temperature drives both price and bookings; price lowers bookings.
fn hotel_model() -> Scm {
    Scm::from_specs(vec![
        ("temperature", VariableSpec::normal(23.0, 3.0)),
        ("price", VariableSpec::linear(&["temperature"], &[2.0], 5.0)),
        (
            "bookings",
            VariableSpec::linear(&["price", "temperature"], &[-1.0, 5.0], 5.0),
        ),
    ])
    .expect("valid model")
}

#[test]
fn confounded_association_flips_sign_once_confounder_is_held_fixed() {
    let mut rng = StdRng::seed_from_u64(2024);
    let data = hotel_model().simulate(N, &mut rng).expect("simulation");

    // Raw association looks positive: hotter days raise both price and
    // bookings, and that swamps the true negative price effect.
    let raw = pearson(
        data.column("price").expect("column"),
        data.column("bookings").expect("column"),
    )
    .expect("correlation");
    assert!(raw.r > 0.2, "raw r = {}", raw.r);

    // Holding temperature (nearly) fixed exposes the direct effect.
    let narrow = data
        .stratify_range("temperature", 22.7, 23.3)
        .expect("stratify");
    assert!(narrow.n_rows() < data.n_rows() / 10);
    let adjusted = pearson(
        narrow.column("price").expect("column"),
        narrow.column("bookings").expect("column"),
    )
    .expect("correlation");
    assert!(adjusted.r < -0.5, "adjusted r = {}", adjusted.r);
}

#[test]
fn narrower_confounder_buckets_move_the_association_further_toward_truth() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = hotel_model().simulate(N, &mut rng).expect("simulation");

    let r = |dataset: &causal_scm::Dataset| {
        pearson(
            dataset.column("price").expect("column"),
            dataset.column("bookings").expect("column"),
        )
        .expect("correlation")
        .r
    };

    let raw = r(&data);
    let wide = r(&data.stratify_range("temperature", 21.0, 25.0).expect("stratify"));
    let narrow = r(&data.stratify_range("temperature", 22.9, 23.1).expect("stratify"));

    // The direct price effect is negative; each narrowing step should move
    // the measured association further below the confounded raw value.
    assert!(wide < raw, "wide {wide} vs raw {raw}");
    assert!(narrow < wide, "narrow {narrow} vs wide {wide}");
}

#[test]
fn stratifying_on_a_collider_induces_association_between_independent_causes() {
    let model = Scm::from_specs(vec![
        ("x", VariableSpec::normal(0.0, 1.0)),
        ("y", VariableSpec::normal(0.0, 1.0)),
        ("z", VariableSpec::logistic(&["x", "y"], &[1.5, 1.5])),
    ])
    .expect("valid model");

    let mut rng = StdRng::seed_from_u64(31);
    let data = model.simulate(N, &mut rng).expect("simulation");

    let raw = pearson(data.column("x").expect("column"), data.column("y").expect("column"))
        .expect("correlation");
    assert!(raw.r.abs() < 0.05, "x and y should start independent, r = {}", raw.r);

    let conditioned = data.stratify("z", 1.0).expect("stratify");
    let induced = pearson(
        conditioned.column("x").expect("column"),
        conditioned.column("y").expect("column"),
    )
    .expect("correlation");

    // Among rows selected by the collider, the causes trade off against
    // each other: a spurious negative association appears.
    assert!(induced.r < -0.05, "induced r = {}", induced.r);
    assert!(induced.r.abs() > raw.r.abs());
}

#[test]
fn stratifying_on_a_value_that_never_occurs_is_empty_not_an_error() {
    let model = Scm::from_specs(vec![("flag", VariableSpec::bernoulli(0.5))]).expect("valid model");
    let mut rng = StdRng::seed_from_u64(1);
    let data = model.simulate(100, &mut rng).expect("simulation");

    let empty = data.stratify("flag", 2.0).expect("stratify");
    assert_eq!(empty.n_rows(), 0);
    assert_eq!(empty.names(), data.names());
}
