//! Aggregation specifications
//!
//! An [`AggSpec`] is an ordered list of named aggregations, each reducing one
//! input field of a group to one output column.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::statistics::RunningStats;

/// Reduction applied to one field within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggOp {
    /// Arithmetic mean
    Mean,
    /// Sample (n - 1) standard deviation; `None` for one-member groups
    Stddev,
    /// Maximum, used for values that are constant within a group
    Max,
}

impl AggOp {
    /// Suffix used for derived output names
    pub fn name(&self) -> &'static str {
        match self {
            AggOp::Mean => "mean",
            AggOp::Stddev => "stddev",
            AggOp::Max => "max",
        }
    }

    pub(crate) fn apply(&self, stats: &RunningStats) -> Option<f64> {
        match self {
            AggOp::Mean => stats.mean(),
            AggOp::Stddev => stats.sample_stddev(),
            AggOp::Max => stats.max(),
        }
    }
}

/// One output column: `output = op(field)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub field: String,
    pub op: AggOp,
    pub output: String,
}

impl Aggregation {
    /// Aggregation whose output column is named `{field}_{op}`
    pub fn new(field: impl Into<String>, op: AggOp) -> Self {
        let field = field.into();
        let output = format!("{}_{}", field, op.name());
        Self { field, op, output }
    }

    /// Aggregation with an explicit output column name
    pub fn named(output: impl Into<String>, field: impl Into<String>, op: AggOp) -> Self {
        Self {
            field: field.into(),
            op,
            output: output.into(),
        }
    }
}

/// Ordered set of aggregations applied to every group
///
/// ```
/// use sketchcmp::summarize::{AggOp, AggSpec};
///
/// let spec = AggSpec::new()
///     .named("exact_time_ms", "duration_ms", AggOp::Mean)
///     .named("exact_stddev_ms", "duration_ms", AggOp::Stddev)
///     .mean("exact_count");
///
/// let outputs: Vec<&str> = spec.outputs().collect();
/// assert_eq!(outputs, ["exact_time_ms", "exact_stddev_ms", "exact_count_mean"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggSpec {
    aggregations: Vec<Aggregation>,
}

impl AggSpec {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an aggregation
    pub fn push(mut self, aggregation: Aggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    /// Append `op(field)` under the default `{field}_{op}` name
    pub fn add(self, field: impl Into<String>, op: AggOp) -> Self {
        self.push(Aggregation::new(field, op))
    }

    /// Append `op(field)` under the given output name
    pub fn named(self, output: impl Into<String>, field: impl Into<String>, op: AggOp) -> Self {
        self.push(Aggregation::named(output, field, op))
    }

    /// Append the mean of `field`
    pub fn mean(self, field: impl Into<String>) -> Self {
        self.add(field, AggOp::Mean)
    }

    /// Append the sample standard deviation of `field`
    pub fn stddev(self, field: impl Into<String>) -> Self {
        self.add(field, AggOp::Stddev)
    }

    /// Append the maximum of `field`
    pub fn max(self, field: impl Into<String>) -> Self {
        self.add(field, AggOp::Max)
    }

    /// Aggregations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Aggregation> {
        self.aggregations.iter()
    }

    /// Get the number of aggregations
    pub fn len(&self) -> usize {
        self.aggregations.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.aggregations.is_empty()
    }

    /// Output column names in declaration order
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.aggregations.iter().map(|a| a.output.as_str())
    }

    /// Reject specs where an output column would be written twice or would
    /// shadow a grouping factor
    pub(crate) fn check_columns(&self, group_by: &[String]) -> Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(group_by.len() + self.len());
        for name in group_by.iter().map(String::as_str).chain(self.outputs()) {
            if seen.contains(&name) {
                return Err(AnalysisError::DuplicateColumn(name.to_owned()));
            }
            seen.push(name);
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, AggOp)> for AggSpec {
    fn from_iter<I: IntoIterator<Item = (S, AggOp)>>(iter: I) -> Self {
        iter.into_iter().fold(AggSpec::new(), |spec, (field, op)| spec.add(field, op))
    }
}
