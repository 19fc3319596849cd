//! The structural causal model: an ordered mapping from variable name to
//! generating rule.
//!
//! Declaration order doubles as the topological order: an endogenous variable
//! may only reference parents declared before it, which is checked at
//! insertion and reported at the offending variable. Simulation then walks
//! the declaration order once, materializing one column per variable.

use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::ScmError;
use crate::variable::{sigmoid, Link, VariableSpec};

/// A structural causal model: named variables in dependency order.
///
/// # Example
///
/// ```rust
/// use causal_scm::{Scm, VariableSpec};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut model = Scm::new();
/// model.push("x", VariableSpec::normal(0.0, 1.0)).unwrap();
/// model.push("y", VariableSpec::linear(&["x"], &[2.0], 0.0)).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let data = model.simulate(5, &mut rng).unwrap();
/// let x = data.column("x").unwrap();
/// let y = data.column("y").unwrap();
/// for i in 0..5 {
///     assert!((y[i] - 2.0 * x[i]).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(String, VariableSpec)>",
    into = "Vec<(String, VariableSpec)>"
)]
pub struct Scm {
    variables: Vec<(String, VariableSpec)>,
}

/// Deserialization funnels through [`Scm::push`], so a serialized model is
/// held to the same checks as one built in code.
impl TryFrom<Vec<(String, VariableSpec)>> for Scm {
    type Error = ScmError;

    fn try_from(variables: Vec<(String, VariableSpec)>) -> Result<Self, ScmError> {
        let mut model = Scm::new();
        for (name, spec) in variables {
            model.push(name, spec)?;
        }
        Ok(model)
    }
}

impl From<Scm> for Vec<(String, VariableSpec)> {
    fn from(model: Scm) -> Self {
        model.variables
    }
}

impl Scm {
    /// Create an empty model.
    pub fn new() -> Self {
        Scm {
            variables: Vec::new(),
        }
    }

    /// Build a model from `(name, spec)` pairs in declaration order.
    ///
    /// This is the closest analogue to the dict literal the source notebooks
    /// pass to `StructuralCausalModel`.
    pub fn from_specs(specs: Vec<(&str, VariableSpec)>) -> Result<Self, ScmError> {
        let mut model = Scm::new();
        for (name, spec) in specs {
            model.push(name, spec)?;
        }
        Ok(model)
    }

    /// Declare a variable.
    ///
    /// # Errors
    ///
    /// Fails at this variable if its name repeats, its parameters are out of
    /// range, or it references a parent not declared earlier.
    pub fn push(&mut self, name: impl Into<String>, spec: VariableSpec) -> Result<(), ScmError> {
        let name = name.into();
        if self.variables.iter().any(|(n, _)| *n == name) {
            return Err(ScmError::DuplicateVariable { name });
        }
        spec.validate(&name)?;
        for parent in spec.parents() {
            if !self.variables.iter().any(|(n, _)| n == parent) {
                return Err(ScmError::UnknownParent {
                    variable: name,
                    parent: parent.clone(),
                });
            }
        }
        self.variables.push((name, spec));
        Ok(())
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the model has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variable names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Look up a variable's spec.
    pub fn get(&self, name: &str) -> Option<&VariableSpec> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Simulate a dataset with one column per variable and `n_samples` rows.
    ///
    /// Pure in `(self, n_samples)` and the state of `rng`: seed the generator
    /// to make a whole notebook run reproducible.
    pub fn simulate<R: Rng>(&self, n_samples: usize, rng: &mut R) -> Result<Dataset, ScmError> {
        if n_samples == 0 {
            return Err(ScmError::ZeroSamples);
        }

        let mut dataset = Dataset::empty();
        for (name, spec) in &self.variables {
            let column = match spec {
                VariableSpec::Exogenous(dist) => dist.sample_column(name, n_samples, rng)?,
                VariableSpec::Endogenous {
                    parents,
                    weights,
                    noise_scale,
                    link,
                } => {
                    // Weights apply elementwise to the realized parent
                    // columns, so children are exact functions of the drawn
                    // values, not merely correlated noise.
                    let mut sum = vec![0.0; n_samples];
                    for (parent, &weight) in parents.iter().zip(weights.iter()) {
                        let parent_column = dataset.column(parent)?;
                        for (acc, &v) in sum.iter_mut().zip(parent_column.iter()) {
                            *acc += weight * v;
                        }
                    }
                    match link {
                        Link::Identity => {
                            // noise_scale == 0 keeps the column an exact
                            // weighted sum and draws nothing from the RNG.
                            if *noise_scale > 0.0 {
                                let noise = Normal::new(0.0, *noise_scale).map_err(|e| {
                                    ScmError::InvalidParameter {
                                        variable: name.clone(),
                                        reason: e.to_string(),
                                    }
                                })?;
                                for v in &mut sum {
                                    *v += noise.sample(rng);
                                }
                            }
                            sum
                        }
                        Link::Logistic => sum
                            .into_iter()
                            .map(|z| {
                                if rng.gen::<f64>() < sigmoid(z) {
                                    1.0
                                } else {
                                    0.0
                                }
                            })
                            .collect(),
                    }
                }
            };
            dataset.push_column(name.clone(), column)?;
        }
        Ok(dataset)
    }

    /// The causal DAG implied by the declarations.
    pub fn graph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::new();
        let indices: Vec<_> = self
            .variables
            .iter()
            .map(|(name, _)| graph.add_node(name.clone()))
            .collect();
        for (child, (_, spec)) in self.variables.iter().enumerate() {
            for parent in spec.parents() {
                if let Some(p) = self.variables.iter().position(|(n, _)| n == parent) {
                    graph.add_edge(indices[p], indices[child], ());
                }
            }
        }
        graph
    }

    /// Graphviz DOT rendering of the causal DAG, for the `cgm.draw()` step
    /// of the notebooks.
    pub fn to_dot(&self) -> String {
        let graph = self.graph();
        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_exogenous_only_model_column_set() {
        let model = Scm::from_specs(vec![
            ("a", VariableSpec::normal(0.0, 1.0)),
            ("b", VariableSpec::uniform(0.0, 10.0)),
            ("c", VariableSpec::bernoulli(0.5)),
        ])
        .unwrap();

        let data = model.simulate(250, &mut rng(1)).unwrap();
        assert_eq!(data.names(), &["a", "b", "c"]);
        for name in ["a", "b", "c"] {
            assert_eq!(data.column(name).unwrap().len(), 250);
        }
    }

    #[test]
    fn test_zero_noise_child_is_exact_weighted_sum() {
        let model = Scm::from_specs(vec![
            ("x", VariableSpec::normal(0.0, 1.0)),
            ("y", VariableSpec::linear(&["x"], &[2.0], 0.0)),
        ])
        .unwrap();

        let data = model.simulate(5, &mut rng(3)).unwrap();
        let x = data.column("x").unwrap();
        let y = data.column("y").unwrap();
        for i in 0..5 {
            assert_eq!(y[i], 2.0 * x[i]);
        }
    }

    #[test]
    fn test_multi_parent_weighted_sum() {
        let model = Scm::from_specs(vec![
            ("a", VariableSpec::normal(10.0, 2.0)),
            ("b", VariableSpec::normal(-3.0, 1.0)),
            ("y", VariableSpec::linear(&["a", "b"], &[1.5, -0.5], 0.0)),
        ])
        .unwrap();

        let data = model.simulate(20, &mut rng(4)).unwrap();
        let a = data.column("a").unwrap();
        let b = data.column("b").unwrap();
        let y = data.column("y").unwrap();
        for i in 0..20 {
            assert!((y[i] - (1.5 * a[i] - 0.5 * b[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_logistic_outputs_are_binary() {
        let model = Scm::from_specs(vec![
            ("x", VariableSpec::normal(0.0, 1.0)),
            ("flag", VariableSpec::logistic(&["x"], &[1.2])),
        ])
        .unwrap();

        let data = model.simulate(500, &mut rng(5)).unwrap();
        assert!(data
            .column("flag")
            .unwrap()
            .iter()
            .all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_unknown_parent_reported_at_offending_variable() {
        let mut model = Scm::new();
        model.push("x", VariableSpec::normal(0.0, 1.0)).unwrap();
        let err = model
            .push("y", VariableSpec::linear(&["z"], &[1.0], 0.0))
            .unwrap_err();
        match err {
            ScmError::UnknownParent { variable, parent } => {
                assert_eq!(variable, "y");
                assert_eq!(parent, "z");
            }
            other => panic!("unexpected error: {other}"),
        }
        // The model is unchanged after the failed insertion.
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_forward_reference_only_even_if_declared_later() {
        // "price" is declared after "bookings" tries to use it.
        let result = Scm::from_specs(vec![
            ("temperature", VariableSpec::normal(23.0, 3.0)),
            ("bookings", VariableSpec::linear(&["price"], &[-1.0], 5.0)),
            ("price", VariableSpec::linear(&["temperature"], &[2.0], 5.0)),
        ]);
        assert!(matches!(result, Err(ScmError::UnknownParent { .. })));
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let result = Scm::from_specs(vec![
            ("x", VariableSpec::normal(0.0, 1.0)),
            ("x", VariableSpec::normal(0.0, 1.0)),
        ]);
        assert!(matches!(result, Err(ScmError::DuplicateVariable { .. })));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let model = Scm::from_specs(vec![("x", VariableSpec::normal(0.0, 1.0))]).unwrap();
        assert!(matches!(
            model.simulate(0, &mut rng(0)),
            Err(ScmError::ZeroSamples)
        ));
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let model = Scm::from_specs(vec![
            ("x", VariableSpec::normal(0.0, 1.0)),
            ("y", VariableSpec::linear(&["x"], &[1.0], 2.0)),
            ("flag", VariableSpec::logistic(&["x", "y"], &[0.5, 0.5])),
        ])
        .unwrap();

        let a = model.simulate(100, &mut rng(99)).unwrap();
        let b = model.simulate(100, &mut rng(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_graph_has_one_edge_per_parent() {
        let model = Scm::from_specs(vec![
            ("temperature", VariableSpec::normal(23.0, 3.0)),
            ("price", VariableSpec::linear(&["temperature"], &[2.0], 5.0)),
            (
                "bookings",
                VariableSpec::linear(&["price", "temperature"], &[-1.0, 5.0], 5.0),
            ),
        ])
        .unwrap();

        let graph = model.graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let dot = model.to_dot();
        assert!(dot.contains("temperature"));
        assert!(dot.contains("bookings"));
    }

    #[test]
    fn test_model_serde_round_trip() {
        let model = Scm::from_specs(vec![
            ("x", VariableSpec::normal(0.0, 1.0)),
            ("y", VariableSpec::linear(&["x"], &[2.0], 0.5)),
            ("flag", VariableSpec::logistic(&["y"], &[1.0])),
        ])
        .unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let back: Scm = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }

    #[test]
    fn test_deserializing_arity_mismatch_rejected() {
        // Two parents, one weight: must fail at deserialization rather than
        // simulate with the second parent silently dropped.
        let json = serde_json::json!([
            ["a", {"Exogenous": {"Normal": {"mean": 5.0, "std_dev": 0.0}}}],
            ["b", {"Exogenous": {"Normal": {"mean": 100.0, "std_dev": 0.0}}}],
            ["y", {"Endogenous": {
                "parents": ["a", "b"],
                "weights": [1.0],
                "noise_scale": 0.0,
                "link": "Identity"
            }}]
        ]);
        let err = serde_json::from_value::<Scm>(json).unwrap_err();
        assert!(err.to_string().contains("2 parents but 1 weights"));
    }

    #[test]
    fn test_deserializing_unknown_parent_rejected() {
        let json = serde_json::json!([
            ["y", {"Endogenous": {
                "parents": ["ghost"],
                "weights": [1.0],
                "noise_scale": 0.0,
                "link": "Identity"
            }}]
        ]);
        let err = serde_json::from_value::<Scm>(json).unwrap_err();
        assert!(err.to_string().contains("unknown parent 'ghost'"));
    }
}
