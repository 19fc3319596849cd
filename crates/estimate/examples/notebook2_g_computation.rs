//! Notebook 2: G-Computation and Refutation
//!
//! Run with: cargo run -p causal-estimate --example notebook2_g_computation
//!
//! This example demonstrates:
//! - Estimating a treatment effect with one outcome model (the S-learner)
//! - Why the unadjusted estimate is wrong under confounding
//! - Bootstrap confidence intervals for the ATE
//! - Refutation: placebo treatment and random common cause
//!
//! Key insight: stratification throws rows away; a model adjusts with all of them.

use causal_estimate::{
    bootstrap_ate, placebo_treatment, random_common_cause, s_learner_ate, TrainConfig,
};
use causal_scm::{Scm, VariableSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("=== Notebook 2: G-Computation and Refutation ===\n");

    // -------------------------------------------------------------------------
    // 1. Simulate confounded subscription data
    // -------------------------------------------------------------------------
    println!("1. Simulate confounded subscription data");
    println!("-----------------------------------------");
    println!();
    println!("Causal structure:");
    println!("        Age");
    println!("       ↙    ↘");
    println!("  PremiumPlan → Churn   (plan weight +1.5 on the log-odds scale)");
    println!();
    println!("Older customers pick the premium plan more AND churn more, so the");
    println!("raw churn gap between plans overstates what the plan itself does.");
    println!();

    let model = Scm::from_specs(vec![
        ("age", VariableSpec::normal(0.0, 1.0)),
        ("plan", VariableSpec::logistic(&["age"], &[1.0])),
        ("churn", VariableSpec::logistic(&["plan", "age"], &[1.5, 0.8])),
    ])
    .unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let data = model.simulate(5_000, &mut rng).unwrap();
    println!("Simulated {} customers:", data.n_rows());
    println!("{data}");
    println!();

    // -------------------------------------------------------------------------
    // 2. Naive vs adjusted estimate
    // -------------------------------------------------------------------------
    println!("2. Naive vs adjusted estimate");
    println!("------------------------------");
    println!();

    let config = TrainConfig {
        learning_rate: 0.5,
        n_iterations: 2000,
    };

    let naive = s_learner_ate(&data, "plan", "churn", &[], config).unwrap();
    println!("No covariates (treatment only):");
    println!("{naive}");
    println!();

    let adjusted = s_learner_ate(&data, "plan", "churn", &["age"], config).unwrap();
    println!("Adjusting for age:");
    println!("{adjusted}");
    println!();
    println!(
        "The naive estimate is {:.3} higher: that surplus is age's work,",
        naive.ate - adjusted.ate
    );
    println!("not the plan's. G-computation fits churn ~ plan + age once, then");
    println!("asks the fitted model two questions: what if EVERYONE had the");
    println!("plan (do(T=1)), and what if NO ONE did (do(T=0))?");
    println!();

    // -------------------------------------------------------------------------
    // 3. How sure are we? Bootstrap the interval
    // -------------------------------------------------------------------------
    println!("3. How sure are we? Bootstrap the interval");
    println!("-------------------------------------------");
    println!();

    let mut boot_rng = StdRng::seed_from_u64(7);
    let interval = bootstrap_ate(
        &data,
        "plan",
        "churn",
        &["age"],
        TrainConfig {
            learning_rate: 0.5,
            n_iterations: 800,
        },
        50,
        &mut boot_rng,
    )
    .unwrap();

    println!("ATE = {:.3}, {interval}", adjusted.ate);
    println!();
    println!("Resample rows with replacement, refit, re-estimate, repeat; the");
    println!("middle 95% of replicate ATEs is the interval. Zero is well outside");
    println!("it, so the effect is not a sampling accident.");
    println!();

    // -------------------------------------------------------------------------
    // 4. Refutation: try to break the estimate
    // -------------------------------------------------------------------------
    println!("4. Refutation: try to break the estimate");
    println!("-----------------------------------------");
    println!();

    let mut refute_rng = StdRng::seed_from_u64(11);
    let placebo =
        placebo_treatment(&data, "plan", "churn", &["age"], config, &mut refute_rng).unwrap();
    println!("Placebo treatment (shuffle the plan column):");
    println!("  {placebo}");
    println!("  A shuffled treatment can cause nothing; the ATE collapses. Good.");
    println!();

    let common_cause =
        random_common_cause(&data, "plan", "churn", &["age"], config, &mut refute_rng).unwrap();
    println!("Random common cause (append an unrelated covariate):");
    println!("  {common_cause}");
    println!("  An irrelevant covariate barely moves the estimate. Good.");
    println!();

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("=== Notebook 2 Complete ===");
    println!();
    println!("We estimated and stress-tested a treatment effect:");
    println!("  • s_learner_ate: one logistic outcome model, two counterfactual passes");
    println!("  • bootstrap_ate: percentile intervals from resampled refits");
    println!("  • placebo_treatment / random_common_cause: refutation checks");
    println!();
    println!("Key insight: the covariate list is a causal claim. The estimator");
    println!("computes; the graph (notebook 1) is what justifies.");
}
