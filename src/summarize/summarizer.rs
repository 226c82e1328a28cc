//! Grouping and reduction of raw measurement tables

use std::collections::BTreeMap;

use log::debug;

use super::aggregation::AggSpec;
use super::summary::GroupSummary;
use crate::error::{AnalysisError, Result};
use crate::record::{Factor, Record, Value};
use crate::statistics::RunningStats;

/// Reduces a table to one [`GroupSummary`] per distinct grouping-key tuple
///
/// Output rows are sorted ascending by the key tuple, compared
/// lexicographically in `group_by` order. An empty `group_by` list produces
/// a single summary over the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummarizer {
    group_by: Vec<String>,
    aggregations: AggSpec,
}

struct Group {
    members: usize,
    stats: Vec<RunningStats>,
}

impl GroupSummarizer {
    /// Create a summarizer grouping by `group_by` and applying `aggregations`
    pub fn new<S: Into<String>>(group_by: impl IntoIterator<Item = S>, aggregations: AggSpec) -> Self {
        Self {
            group_by: group_by.into_iter().map(Into::into).collect(),
            aggregations,
        }
    }

    /// Grouping factors in key order
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// Aggregations applied to every group
    pub fn aggregations(&self) -> &AggSpec {
        &self.aggregations
    }

    /// Summarize `records`
    ///
    /// # Errors
    ///
    /// Fails without partial output if any record lacks a grouping or
    /// aggregated field, holds a non-integer grouping factor, or holds text
    /// in an aggregated field. Null cells in aggregated fields are skipped.
    pub fn summarize(&self, records: &[Record]) -> Result<Vec<GroupSummary>> {
        self.aggregations.check_columns(&self.group_by)?;

        let mut groups: BTreeMap<Vec<Factor>, Group> = BTreeMap::new();
        for (row, record) in records.iter().enumerate() {
            let key = self
                .group_by
                .iter()
                .map(|field| read_factor(record, field, row))
                .collect::<Result<Vec<_>>>()?;
            let values = self
                .aggregations
                .iter()
                .map(|agg| read_number(record, &agg.field, row))
                .collect::<Result<Vec<_>>>()?;

            let group = groups.entry(key).or_insert_with(|| Group {
                members: 0,
                stats: vec![RunningStats::new(); self.aggregations.len()],
            });
            group.members += 1;
            for (stats, value) in group.stats.iter_mut().zip(values) {
                if let Some(v) = value {
                    stats.add(v);
                }
            }
        }

        debug!(
            "summarized {} records into {} groups by {:?}",
            records.len(),
            groups.len(),
            self.group_by
        );

        Ok(groups
            .into_iter()
            .map(|(key, group)| self.finish(key, group))
            .collect())
    }

    fn finish(&self, key: Vec<Factor>, group: Group) -> GroupSummary {
        let key = self.group_by.iter().cloned().zip(key).collect();
        let columns = self
            .aggregations
            .iter()
            .zip(&group.stats)
            .map(|(agg, stats)| (agg.output.clone(), agg.op.apply(stats)))
            .collect();

        GroupSummary {
            key,
            members: group.members,
            columns,
        }
    }
}

/// Summarize `records` grouped by `group_by`
///
/// Shorthand for [`GroupSummarizer::summarize`].
///
/// ```
/// use sketchcmp::record::Record;
/// use sketchcmp::summarize::{summarize, AggSpec};
///
/// let records: Vec<Record> = [10.0, 20.0, 30.0]
///     .iter()
///     .map(|&ms| Record::new().with("dataset_size", 100i64).with("duration_ms", ms))
///     .collect();
///
/// let summary = summarize(&records, &["dataset_size"], &AggSpec::new().mean("duration_ms")).unwrap();
/// assert_eq!(summary.len(), 1);
/// assert_eq!(summary[0].get("duration_ms_mean"), Some(20.0));
/// ```
pub fn summarize(records: &[Record], group_by: &[&str], aggregations: &AggSpec) -> Result<Vec<GroupSummary>> {
    GroupSummarizer::new(group_by.iter().copied(), aggregations.clone()).summarize(records)
}

fn read_factor(record: &Record, field: &str, row: usize) -> Result<Factor> {
    let value = record.get(field).ok_or_else(|| AnalysisError::MissingField {
        field: field.to_owned(),
        row,
    })?;
    value.to_factor().ok_or_else(|| AnalysisError::InvalidFactor {
        field: field.to_owned(),
        row,
    })
}

fn read_number(record: &Record, field: &str, row: usize) -> Result<Option<f64>> {
    match record.get(field) {
        None => Err(AnalysisError::MissingField {
            field: field.to_owned(),
            row,
        }),
        Some(Value::Text(_)) => Err(AnalysisError::NonNumericField {
            field: field.to_owned(),
            row,
        }),
        Some(value) => Ok(value.as_number()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::AggOp;

    fn run(size: i64, precision: i64, ms: f64) -> Record {
        Record::new()
            .with("dataset_size", size)
            .with("precision", precision)
            .with("duration_ms", ms)
    }

    #[test]
    fn test_mean_stddev_max() {
        let records = vec![run(100, 10, 10.0), run(100, 10, 20.0), run(100, 10, 30.0)];
        let spec = AggSpec::new().mean("duration_ms").stddev("duration_ms").max("duration_ms");

        let out = summarize(&records, &["dataset_size"], &spec).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].members(), 3);
        assert_eq!(out[0].get("duration_ms_mean"), Some(20.0));
        assert_eq!(out[0].get("duration_ms_stddev"), Some(10.0));
        assert_eq!(out[0].get("duration_ms_max"), Some(30.0));
    }

    #[test]
    fn test_sorted_by_key_tuple() {
        let records = vec![
            run(200, 10, 1.0),
            run(100, 14, 1.0),
            run(100, 10, 1.0),
            run(200, 12, 1.0),
        ];

        let out = summarize(&records, &["dataset_size", "precision"], &AggSpec::new()).unwrap();
        let keys: Vec<(i64, i64)> = out
            .iter()
            .map(|s| {
                (
                    s.factor("dataset_size").and_then(Factor::as_int).unwrap(),
                    s.factor("precision").and_then(Factor::as_int).unwrap(),
                )
            })
            .collect();

        assert_eq!(keys, vec![(100, 10), (100, 14), (200, 10), (200, 12)]);
    }

    #[test]
    fn test_single_member_stddev_is_none() {
        let records = vec![run(100, 10, 5.0)];
        let spec = AggSpec::new().stddev("duration_ms");

        let out = summarize(&records, &["dataset_size"], &spec).unwrap();
        assert!(out[0].has_column("duration_ms_stddev"));
        assert_eq!(out[0].get("duration_ms_stddev"), None);
    }

    #[test]
    fn test_missing_group_field() {
        let records = vec![run(100, 10, 1.0), Record::new().with("duration_ms", 1.0)];

        let err = summarize(&records, &["dataset_size"], &AggSpec::new()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingField { ref field, row: 1 } if field == "dataset_size"
        ));
    }

    #[test]
    fn test_missing_measure_field() {
        let records = vec![Record::new().with("dataset_size", 1i64)];

        let err = summarize(&records, &["dataset_size"], &AggSpec::new().mean("duration_ms")).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingField { row: 0, .. }));
    }

    #[test]
    fn test_text_measure_rejected() {
        let records = vec![Record::new().with("k", 1i64).with("duration_ms", "fast")];

        let err = summarize(&records, &["k"], &AggSpec::new().mean("duration_ms")).unwrap_err();
        assert!(matches!(err, AnalysisError::NonNumericField { .. }));
    }

    #[test]
    fn test_fractional_factor_rejected() {
        let records = vec![Record::new().with("k", 1.5).with("duration_ms", 1.0)];

        let err = summarize(&records, &["k"], &AggSpec::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidFactor { .. }));
    }

    #[test]
    fn test_null_measure_skipped() {
        let records = vec![
            Record::new().with("k", 1i64).with("v", 4.0),
            Record::new().with("k", 1i64).with("v", None::<f64>),
        ];

        let out = summarize(&records, &["k"], &AggSpec::new().named("v_mean", "v", AggOp::Mean)).unwrap();
        assert_eq!(out[0].members(), 2);
        assert_eq!(out[0].get("v_mean"), Some(4.0));
    }

    #[test]
    fn test_empty_group_by_is_one_group() {
        let records = vec![run(100, 10, 2.0), run(200, 12, 4.0)];

        let out = summarize(&records, &[], &AggSpec::new().mean("duration_ms")).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].key().is_empty());
        assert_eq!(out[0].get("duration_ms_mean"), Some(3.0));
    }

    #[test]
    fn test_empty_input() {
        let out = summarize(&[], &["dataset_size"], &AggSpec::new().mean("duration_ms")).unwrap();
        assert!(out.is_empty());
    }
}
