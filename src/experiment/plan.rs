//! Experiment configuration

use log::debug;
use serde::{Deserialize, Serialize};

use super::report::ExperimentReport;
use crate::compare::{ComparisonColumns, ComparisonJoiner};
use crate::error::{AnalysisError, Result};
use crate::record::{fields, Record};
use crate::summarize::{AggOp, AggSpec, GroupSummarizer};

/// How to summarize and compare one experiment's two measurement tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    /// Label carried into the report and log lines
    pub name: String,
    /// Grouping factors for the approximate-method table
    pub approx_group_by: Vec<String>,
    /// Grouping factors for the exact-method table
    pub exact_group_by: Vec<String>,
    /// Factors shared by both summaries; empty joins every approximate row
    /// to a single exact row
    #[serde(default)]
    pub join_keys: Vec<String>,
    pub approx_aggregations: AggSpec,
    pub exact_aggregations: AggSpec,
    /// Summary columns the joiner reads
    #[serde(default)]
    pub columns: ComparisonColumns,
}

/// Input field names the presets read from the two measurement tables
///
/// Grouping factors (`dataset_size`, `precision`, `num_days`) share one
/// name across every table layout; only the measured quantities differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFields {
    /// Cardinality estimate on the approximate side
    pub estimate: String,
    /// Distinct count on the exact side
    pub exact_count: String,
    /// Query latency in milliseconds, on both sides
    pub duration: String,
    /// Sketch size in bytes on the approximate side
    pub storage: String,
}

impl TableFields {
    /// Field names written by [`RawMeasurement::to_record`](crate::record::RawMeasurement)
    pub fn measurement() -> Self {
        Self::new(
            fields::ESTIMATED_COUNT,
            fields::EXACT_COUNT,
            fields::DURATION_MS,
            fields::STORAGE_BYTES,
        )
    }

    /// Per-size count benchmark tables: `hll_estimate` against
    /// `distinct_count`
    pub fn count_tables() -> Self {
        Self::new("hll_estimate", "distinct_count", fields::DURATION_MS, fields::STORAGE_BYTES)
    }

    /// Multi-day union benchmark tables: `union.csv` against `exact.csv`
    pub fn union_tables() -> Self {
        Self::new(
            fields::ESTIMATED_COUNT,
            fields::EXACT_COUNT,
            "query_time_ms",
            "total_sketch_size_bytes",
        )
    }

    /// Create a field mapping from explicit names
    pub fn new(
        estimate: impl Into<String>,
        exact_count: impl Into<String>,
        duration: impl Into<String>,
        storage: impl Into<String>,
    ) -> Self {
        Self {
            estimate: estimate.into(),
            exact_count: exact_count.into(),
            duration: duration.into(),
            storage: storage.into(),
        }
    }
}

impl Default for TableFields {
    fn default() -> Self {
        Self::measurement()
    }
}

impl ExperimentPlan {
    /// Latency, accuracy, and storage across dataset sizes and precisions,
    /// reading [`TableFields::measurement`] names
    pub fn scaling() -> Self {
        Self::scaling_for(&TableFields::measurement())
    }

    /// [`ExperimentPlan::scaling`] over tables with the given field names
    pub fn scaling_for(input: &TableFields) -> Self {
        Self {
            name: "scaling".into(),
            approx_group_by: vec![fields::DATASET_SIZE.into(), fields::PRECISION.into()],
            exact_group_by: vec![fields::DATASET_SIZE.into()],
            join_keys: vec![fields::DATASET_SIZE.into()],
            approx_aggregations: approx_aggregations(input, "approx_time_ms", "approx_stddev_ms").named(
                "storage_bytes",
                input.storage.as_str(),
                AggOp::Mean,
            ),
            exact_aggregations: exact_aggregations(input),
            columns: ComparisonColumns::default(),
        }
    }

    /// Sketch unions over growing time windows, reading
    /// [`TableFields::measurement`] names
    pub fn union() -> Self {
        Self::union_for(&TableFields::measurement())
    }

    /// [`ExperimentPlan::union`] over tables with the given field names
    ///
    /// Sketch size is fixed per window so it is taken with `max`.
    pub fn union_for(input: &TableFields) -> Self {
        Self {
            name: "union".into(),
            approx_group_by: vec![fields::PRECISION.into(), fields::NUM_DAYS.into()],
            exact_group_by: vec![fields::NUM_DAYS.into()],
            join_keys: vec![fields::NUM_DAYS.into()],
            approx_aggregations: approx_aggregations(input, "union_time_ms", "union_stddev_ms").named(
                "total_sketch_bytes",
                input.storage.as_str(),
                AggOp::Max,
            ),
            exact_aggregations: exact_aggregations(input),
            columns: ComparisonColumns::default()
                .with_approx_duration("union_time_ms")
                .with_storage(Some("total_sketch_bytes")),
        }
    }

    /// Precision sweep against a single exact baseline, reading
    /// [`TableFields::measurement`] names
    pub fn precision_sweep() -> Self {
        Self::precision_sweep_for(&TableFields::measurement())
    }

    /// [`ExperimentPlan::precision_sweep`] over tables with the given field
    /// names
    pub fn precision_sweep_for(input: &TableFields) -> Self {
        Self {
            name: "precision_sweep".into(),
            approx_group_by: vec![fields::PRECISION.into()],
            exact_group_by: Vec::new(),
            join_keys: Vec::new(),
            approx_aggregations: approx_aggregations(input, "approx_time_ms", "approx_stddev_ms").named(
                "storage_bytes",
                input.storage.as_str(),
                AggOp::Mean,
            ),
            exact_aggregations: exact_aggregations(input),
            columns: ComparisonColumns::default(),
        }
    }

    /// Parse and validate a JSON plan
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: Self = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every join key must be a grouping factor on both sides
    pub fn validate(&self) -> Result<()> {
        for key in &self.join_keys {
            if !self.approx_group_by.contains(key) {
                return Err(AnalysisError::InvalidPlan(format!(
                    "join key '{}' is not in approx_group_by {:?}",
                    key, self.approx_group_by
                )));
            }
            if !self.exact_group_by.contains(key) {
                return Err(AnalysisError::InvalidPlan(format!(
                    "join key '{}' is not in exact_group_by {:?}",
                    key, self.exact_group_by
                )));
            }
        }
        Ok(())
    }

    /// Summarizer for the approximate-method table
    pub fn approx_summarizer(&self) -> GroupSummarizer {
        GroupSummarizer::new(self.approx_group_by.iter().cloned(), self.approx_aggregations.clone())
    }

    /// Summarizer for the exact-method table
    pub fn exact_summarizer(&self) -> GroupSummarizer {
        GroupSummarizer::new(self.exact_group_by.iter().cloned(), self.exact_aggregations.clone())
    }

    /// Joiner configured with this plan's keys and columns
    pub fn joiner(&self) -> ComparisonJoiner {
        ComparisonJoiner::new(self.join_keys.iter().cloned()).with_columns(self.columns.clone())
    }

    /// Summarize both tables and compare them
    pub fn run(&self, approx: &[Record], exact: &[Record]) -> Result<ExperimentReport> {
        self.validate()?;

        let approx_summary = self.approx_summarizer().summarize(approx)?;
        let exact_summary = self.exact_summarizer().summarize(exact)?;
        let comparison = self.joiner().compare(&approx_summary, &exact_summary)?;

        debug!(
            "experiment '{}': {} approximate and {} exact groups, {} comparison rows",
            self.name,
            approx_summary.len(),
            exact_summary.len(),
            comparison.len()
        );

        Ok(ExperimentReport {
            name: self.name.clone(),
            approx_summary,
            exact_summary,
            comparison,
        })
    }
}

fn approx_aggregations(input: &TableFields, time: &str, stddev: &str) -> AggSpec {
    AggSpec::new()
        .named("avg_estimate", input.estimate.as_str(), AggOp::Mean)
        .named(time, input.duration.as_str(), AggOp::Mean)
        .named(stddev, input.duration.as_str(), AggOp::Stddev)
}

fn exact_aggregations(input: &TableFields) -> AggSpec {
    AggSpec::new()
        .named("exact_count", input.exact_count.as_str(), AggOp::Mean)
        .named("exact_time_ms", input.duration.as_str(), AggOp::Mean)
        .named("exact_stddev_ms", input.duration.as_str(), AggOp::Stddev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for plan in [
            ExperimentPlan::scaling(),
            ExperimentPlan::union(),
            ExperimentPlan::precision_sweep(),
        ] {
            plan.validate().unwrap();
        }
    }

    #[test]
    fn test_field_mappings_only_change_inputs() {
        let default = ExperimentPlan::union();
        let tables = ExperimentPlan::union_for(&TableFields::union_tables());

        assert_eq!(default, ExperimentPlan::union_for(&TableFields::default()));
        assert_eq!(tables.columns, default.columns);
        assert_eq!(
            tables.approx_aggregations.outputs().collect::<Vec<_>>(),
            default.approx_aggregations.outputs().collect::<Vec<_>>()
        );
        let read: Vec<&str> = tables.approx_aggregations.iter().map(|a| a.field.as_str()).collect();
        assert_eq!(
            read,
            ["estimated_count", "query_time_ms", "query_time_ms", "total_sketch_size_bytes"]
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let plan = ExperimentPlan::union();
        let parsed = ExperimentPlan::from_json(&plan.to_json().unwrap()).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_minimal_json_uses_default_columns() {
        let plan = ExperimentPlan::from_json(
            r#"{
                "name": "overall",
                "approx_group_by": ["precision"],
                "exact_group_by": [],
                "approx_aggregations": [
                    {"field": "estimated_count", "op": "mean", "output": "avg_estimate"}
                ],
                "exact_aggregations": []
            }"#,
        )
        .unwrap();

        assert!(plan.join_keys.is_empty());
        assert_eq!(plan.columns, ComparisonColumns::default());
    }

    #[test]
    fn test_join_key_must_be_grouped() {
        let mut plan = ExperimentPlan::scaling();
        plan.exact_group_by.clear();

        let err = plan.validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPlan(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = ExperimentPlan::from_json("{\"name\": 3}").unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
