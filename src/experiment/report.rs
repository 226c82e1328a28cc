//! Output of one experiment run

use serde::Serialize;

use crate::compare::ComparisonRow;
use crate::error::Result;
use crate::record::Record;
use crate::summarize::{summarize, AggSpec, GroupSummary};
use crate::traits::to_records;

/// Both summary tables and the comparison table of one experiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub name: String,
    pub approx_summary: Vec<GroupSummary>,
    pub exact_summary: Vec<GroupSummary>,
    pub comparison: Vec<ComparisonRow>,
}

impl ExperimentReport {
    /// Comparison table as flat records
    pub fn comparison_records(&self) -> Vec<Record> {
        to_records(&self.comparison)
    }

    /// Re-summarize the comparison table, e.g. mean `error_pct` per precision
    ///
    /// Undefined metrics are skipped rather than poisoning the aggregate.
    pub fn rollup(&self, group_by: &[&str], aggregations: &AggSpec) -> Result<Vec<GroupSummary>> {
        summarize(&self.comparison_records(), group_by, aggregations)
    }

    /// Rows where at least one derived ratio is undefined
    pub fn undefined_rows(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.comparison.iter().filter(|row| !row.is_fully_defined())
    }
}
