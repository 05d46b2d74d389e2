//! Solver request model.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Min,
    Max,
}

/// Inclusive bounds of one constraint row. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64, eps: f64) -> bool {
        self.min.is_none_or(|min| value >= min - eps) && self.max.is_none_or(|max| value <= max + eps)
    }
}

/// A linear program in "column" form: each variable lists the constraints it takes part in.
///
/// Maps are insertion-ordered so the same model always serializes (and is searched) the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// variable name -> (constraint name -> coefficient)
    #[serde(default)]
    pub variables: IndexMap<String, IndexMap<String, f64>>,
    /// constraint name -> bounds
    #[serde(default)]
    pub constraints: IndexMap<String, Bounds>,
    #[serde(rename = "opType", default)]
    pub direction: Direction,
    /// variable name -> objective coefficient
    #[serde(default)]
    pub objective: IndexMap<String, f64>,
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub binaries: IndexSet<String>,
}

impl Model {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// Registers a 0/1 variable. Re-adding an existing name is a no-op.
    pub fn add_binary(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.variables.entry(name.clone()).or_default();
        self.binaries.insert(name);
    }

    pub fn set_coefficient(
        &mut self,
        variable: impl Into<String>,
        constraint: impl Into<String>,
        coefficient: f64,
    ) {
        self.variables
            .entry(variable.into())
            .or_default()
            .insert(constraint.into(), coefficient);
    }

    pub fn set_bounds(&mut self, constraint: impl Into<String>, bounds: Bounds) {
        self.constraints.insert(constraint.into(), bounds);
    }

    /// Adds `coefficient` to the objective term of `variable`.
    pub fn add_objective(&mut self, variable: impl Into<String>, coefficient: f64) {
        *self.objective.entry(variable.into()).or_insert(0.0) += coefficient;
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_binary(&self, variable: &str) -> bool {
        self.binaries.contains(variable)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
