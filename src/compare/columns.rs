//! Which summary columns feed the comparison

use serde::{Deserialize, Serialize};

/// Names of the aggregate columns read from each side of the join
///
/// Defaults match the column names produced by the built-in experiment
/// plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonColumns {
    /// Mean cardinality estimate, approximate side
    pub estimate: String,
    /// Mean latency, approximate side
    pub approx_duration: String,
    /// Mean ground-truth cardinality, exact side
    pub exact_count: String,
    /// Mean latency, exact side
    pub exact_duration: String,
    /// Sketch storage in bytes, approximate side
    pub storage: Option<String>,
    /// Grouping factor holding the HLL precision
    pub precision_factor: Option<String>,
}

impl Default for ComparisonColumns {
    fn default() -> Self {
        Self {
            estimate: "avg_estimate".into(),
            approx_duration: "approx_time_ms".into(),
            exact_count: "exact_count".into(),
            exact_duration: "exact_time_ms".into(),
            storage: Some("storage_bytes".into()),
            precision_factor: Some("precision".into()),
        }
    }
}

impl ComparisonColumns {
    /// Set the approximate-side estimate column
    pub fn with_estimate(mut self, column: impl Into<String>) -> Self {
        self.estimate = column.into();
        self
    }

    /// Set the approximate-side latency column
    pub fn with_approx_duration(mut self, column: impl Into<String>) -> Self {
        self.approx_duration = column.into();
        self
    }

    /// Set the exact-side count column
    pub fn with_exact_count(mut self, column: impl Into<String>) -> Self {
        self.exact_count = column.into();
        self
    }

    /// Set the exact-side latency column
    pub fn with_exact_duration(mut self, column: impl Into<String>) -> Self {
        self.exact_duration = column.into();
        self
    }

    /// Set the approximate-side storage column; `None` disables `storage_kb`
    pub fn with_storage(mut self, column: Option<&str>) -> Self {
        self.storage = column.map(str::to_owned);
        self
    }

    /// Set the precision factor; `None` disables `theoretical_error_pct`
    pub fn with_precision_factor(mut self, factor: Option<&str>) -> Self {
        self.precision_factor = factor.map(str::to_owned);
        self
    }
}
