use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Solver response: `{ feasible, bounded, result, <variable>: value, ... }`.
///
/// Values are untrusted when `feasible` is false. Individual values may be `NaN` when a remote
/// solver reports an unreachable variable; callers decide how to treat those.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub feasible: bool,
    #[serde(default = "default_bounded")]
    pub bounded: bool,
    #[serde(default)]
    pub result: f64,
    #[serde(flatten)]
    pub values: IndexMap<String, f64>,
}

fn default_bounded() -> bool {
    true
}

impl Solution {
    pub fn infeasible() -> Self {
        Self {
            feasible: false,
            bounded: true,
            result: 0.0,
            values: IndexMap::new(),
        }
    }

    /// Value of `variable`; solvers commonly omit zero-valued variables, so absent means `0`.
    pub fn value(&self, variable: &str) -> f64 {
        self.values.get(variable).copied().unwrap_or(0.0)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
