//! Inner join of approximate and exact summaries

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use super::columns::ComparisonColumns;
use super::row::{ComparisonRow, Derived, BYTES_PER_KB};
use crate::cardinality::theoretical_error_pct;
use crate::error::{AnalysisError, Result};
use crate::record::Factor;
use crate::summarize::GroupSummary;

const APPROX: &str = "approximate";
const EXACT: &str = "exact";

/// Joins approximate-method summaries to exact-method summaries and derives
/// comparative metrics
///
/// The exact side must hold at most one row per join-key tuple; this is
/// checked up front and reported as [`AnalysisError::AmbiguousJoin`].
/// Approximate rows without an exact counterpart are dropped. Output order
/// follows the approximate input.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonJoiner {
    join_keys: Vec<String>,
    columns: ComparisonColumns,
}

impl ComparisonJoiner {
    /// Create a joiner over `join_keys` with the default column names
    pub fn new<S: Into<String>>(join_keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            join_keys: join_keys.into_iter().map(Into::into).collect(),
            columns: ComparisonColumns::default(),
        }
    }

    /// Replace the column names read from each summary
    pub fn with_columns(mut self, columns: ComparisonColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Factors rows are matched on
    pub fn join_keys(&self) -> &[String] {
        &self.join_keys
    }

    /// Column names read from each summary
    pub fn columns(&self) -> &ComparisonColumns {
        &self.columns
    }

    /// Join and derive
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::AmbiguousJoin`] if two exact rows share a join key
    /// - [`AnalysisError::MissingField`] if a summary row lacks a join key
    /// - [`AnalysisError::MissingColumn`] if a configured column is absent
    /// - [`AnalysisError::DuplicateColumn`] if a joined row would flatten two
    ///   values into one column name
    pub fn compare(&self, approx: &[GroupSummary], exact: &[GroupSummary]) -> Result<Vec<ComparisonRow>> {
        let index = self.index_exact(exact)?;

        let mut rows = Vec::with_capacity(approx.len());
        for (row, summary) in approx.iter().enumerate() {
            let key = join_key(summary, &self.join_keys, row)?;
            let inputs = self.approx_inputs(summary)?;
            match index.get(&key) {
                Some(&matched) => rows.push(self.build(summary, &exact[matched], inputs)?),
                None => trace!("no exact group for {}; dropped", describe(self.join_keys.iter().zip(&key))),
            }
        }

        debug!(
            "joined {} of {} approximate groups on {:?} ({} dropped)",
            rows.len(),
            approx.len(),
            self.join_keys,
            approx.len() - rows.len()
        );
        Ok(rows)
    }

    fn index_exact(&self, exact: &[GroupSummary]) -> Result<BTreeMap<Vec<Factor>, usize>> {
        let mut matches: BTreeMap<Vec<Factor>, Vec<usize>> = BTreeMap::new();
        for (row, summary) in exact.iter().enumerate() {
            let key = join_key(summary, &self.join_keys, row)?;
            matches.entry(key).or_default().push(row);
        }

        let mut index = BTreeMap::new();
        for (key, rows) in matches {
            if rows.len() > 1 {
                return Err(AnalysisError::AmbiguousJoin {
                    key: describe(self.join_keys.iter().zip(&key)),
                    matches: rows.len(),
                });
            }
            index.insert(key, rows[0]);
        }
        Ok(index)
    }

    fn approx_inputs(&self, summary: &GroupSummary) -> Result<ApproxInputs> {
        let estimate = column_value(summary, &self.columns.estimate, APPROX)?;
        let duration = column_value(summary, &self.columns.approx_duration, APPROX)?;
        let storage = match &self.columns.storage {
            Some(column) => column_value(summary, column, APPROX)?,
            None => None,
        };
        Ok(ApproxInputs {
            estimate,
            duration,
            storage,
        })
    }

    fn build(&self, approx: &GroupSummary, exact: &GroupSummary, inputs: ApproxInputs) -> Result<ComparisonRow> {
        let exact_count = column_value(exact, &self.columns.exact_count, EXACT)?;
        let exact_duration = column_value(exact, &self.columns.exact_duration, EXACT)?;

        let mut key = approx.key().to_vec();
        for (name, factor) in exact.key() {
            if approx.factor(name).is_none() {
                key.push((name.clone(), factor.clone()));
            }
        }

        let derived = Derived::compute(inputs.estimate, exact_count, exact_duration, inputs.duration);
        if exact_count == Some(0.0) || inputs.duration == Some(0.0) || derived.error_pct == Some(0.0) {
            let label = describe(key.iter().map(|(n, f)| (n, f)));
            if exact_count == Some(0.0) {
                warn!("exact count is zero for {}; error_pct undefined", label);
            }
            if inputs.duration == Some(0.0) {
                warn!("approximate duration is zero for {}; speedup_factor undefined", label);
            }
            if derived.error_pct == Some(0.0) {
                warn!("estimate is exact for {}; efficiency_score undefined", label);
            }
        }

        let theoretical = self
            .columns
            .precision_factor
            .as_deref()
            .and_then(|name| approx.factor(name))
            .and_then(Factor::as_int)
            .and_then(theoretical_error_pct);

        let row = ComparisonRow {
            key,
            approx_members: approx.members(),
            exact_members: exact.members(),
            estimate_mean: inputs.estimate,
            exact_count_mean: exact_count,
            approx_duration_mean: inputs.duration,
            exact_duration_mean: exact_duration,
            storage_bytes: inputs.storage,
            error_absolute: derived.error_absolute,
            error_pct: derived.error_pct,
            speedup_factor: derived.speedup_factor,
            efficiency_score: derived.efficiency_score,
            storage_kb: inputs.storage.map(|b| b / BYTES_PER_KB),
            theoretical_error_pct: theoretical,
            approx_columns: approx.columns().map(|(k, v)| (k.to_owned(), v)).collect(),
            exact_columns: exact.columns().map(|(k, v)| (k.to_owned(), v)).collect(),
        };
        row.check_flat_columns()?;
        Ok(row)
    }
}

struct ApproxInputs {
    estimate: Option<f64>,
    duration: Option<f64>,
    storage: Option<f64>,
}

/// Join `approx` to `exact` on `join_keys` using the default column names
///
/// Shorthand for [`ComparisonJoiner::compare`].
pub fn compare(approx: &[GroupSummary], exact: &[GroupSummary], join_keys: &[&str]) -> Result<Vec<ComparisonRow>> {
    ComparisonJoiner::new(join_keys.iter().copied()).compare(approx, exact)
}

fn join_key(summary: &GroupSummary, join_keys: &[String], row: usize) -> Result<Vec<Factor>> {
    join_keys
        .iter()
        .map(|name| {
            summary.factor(name).cloned().ok_or_else(|| AnalysisError::MissingField {
                field: name.clone(),
                row,
            })
        })
        .collect()
}

fn column_value(summary: &GroupSummary, column: &str, side: &'static str) -> Result<Option<f64>> {
    if !summary.has_column(column) {
        return Err(AnalysisError::MissingColumn {
            column: column.to_owned(),
            side,
        });
    }
    Ok(summary.get(column))
}

fn describe<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a Factor)>) -> String {
    let parts: Vec<String> = pairs.into_iter().map(|(n, v)| format!("{}={}", n, v)).collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::summarize::{summarize, AggOp, AggSpec};

    fn approx_spec() -> AggSpec {
        AggSpec::new()
            .named("avg_estimate", "estimated_count", AggOp::Mean)
            .named("approx_time_ms", "duration_ms", AggOp::Mean)
            .named("storage_bytes", "storage_bytes", AggOp::Mean)
    }

    fn exact_spec() -> AggSpec {
        AggSpec::new()
            .named("exact_count", "exact_count", AggOp::Mean)
            .named("exact_time_ms", "duration_ms", AggOp::Mean)
    }

    fn approx_row(size: i64, precision: i64, estimate: i64, ms: f64) -> Record {
        Record::new()
            .with("dataset_size", size)
            .with("precision", precision)
            .with("estimated_count", estimate)
            .with("duration_ms", ms)
            .with("storage_bytes", 1i64 << precision)
    }

    fn exact_row(size: i64, count: i64, ms: f64) -> Record {
        Record::new()
            .with("dataset_size", size)
            .with("exact_count", count)
            .with("duration_ms", ms)
    }

    fn approx_summary(rows: &[Record]) -> Vec<GroupSummary> {
        summarize(rows, &["dataset_size", "precision"], &approx_spec()).unwrap()
    }

    fn exact_summary(rows: &[Record]) -> Vec<GroupSummary> {
        summarize(rows, &["dataset_size"], &exact_spec()).unwrap()
    }

    #[test]
    fn test_basic_join() {
        let approx = approx_summary(&[approx_row(100_000, 12, 99_500, 49.0)]);
        let exact = exact_summary(&[exact_row(100_000, 100_000, 245.0)]);

        let rows = compare(&approx, &exact, &["dataset_size"]).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.error_absolute, Some(500.0));
        assert!((row.error_pct.unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(row.speedup_factor, Some(5.0));
        assert_eq!(row.storage_kb, Some(4.0));
        assert!((row.theoretical_error_pct.unwrap() - 1.625).abs() < 1e-9);
        assert_eq!(row.factor("precision"), Some(&Factor::Int(12)));
    }

    #[test]
    fn test_unmatched_rows_dropped() {
        let approx = approx_summary(&[
            approx_row(100, 10, 99, 1.0),
            approx_row(200, 10, 190, 1.0),
        ]);
        let exact = exact_summary(&[exact_row(100, 100, 2.0)]);

        let rows = compare(&approx, &exact, &["dataset_size"]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].factor("dataset_size"), Some(&Factor::Int(100)));
    }

    #[test]
    fn test_ambiguous_join() {
        let approx = approx_summary(&[approx_row(100, 10, 99, 1.0)]);
        // grouped by precision too, so two exact rows share dataset_size=100
        let exact = summarize(
            &[
                exact_row(100, 100, 2.0).with("precision", 10i64),
                exact_row(100, 100, 2.0).with("precision", 12i64),
            ],
            &["dataset_size", "precision"],
            &exact_spec(),
        )
        .unwrap();

        let err = compare(&approx, &exact, &["dataset_size"]).unwrap_err();
        match err {
            AnalysisError::AmbiguousJoin { key, matches } => {
                assert_eq!(key, "(dataset_size=100)");
                assert_eq!(matches, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_column() {
        let approx = summarize(
            &[approx_row(100, 10, 99, 1.0)],
            &["dataset_size", "precision"],
            &AggSpec::new().named("approx_time_ms", "duration_ms", AggOp::Mean),
        )
        .unwrap();
        let exact = exact_summary(&[exact_row(100, 100, 2.0)]);

        let err = compare(&approx, &exact, &["dataset_size"]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumn { ref column, side: "approximate" } if column == "avg_estimate"
        ));
    }

    #[test]
    fn test_missing_join_key() {
        let approx = approx_summary(&[approx_row(100, 10, 99, 1.0)]);
        let exact = exact_summary(&[exact_row(100, 100, 2.0)]);

        let err = compare(&approx, &exact, &["num_days"]).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingField { ref field, .. } if field == "num_days"));
    }

    #[test]
    fn test_empty_join_keys_match_single_exact_row() {
        let approx = approx_summary(&[approx_row(100, 10, 99, 1.0), approx_row(100, 14, 100, 4.0)]);
        let exact = summarize(&[exact_row(100, 100, 8.0)], &[], &exact_spec()).unwrap();

        let rows = compare(&approx, &exact, &[]).unwrap();
        let speedups: Vec<Option<f64>> = rows.iter().map(|r| r.speedup_factor).collect();
        assert_eq!(speedups, vec![Some(8.0), Some(2.0)]);
    }

    #[test]
    fn test_without_storage_or_precision() {
        let approx = approx_summary(&[approx_row(100, 10, 99, 1.0)]);
        let exact = exact_summary(&[exact_row(100, 100, 2.0)]);
        let columns = ComparisonColumns::default()
            .with_storage(None)
            .with_precision_factor(None);

        let rows = ComparisonJoiner::new(["dataset_size"])
            .with_columns(columns)
            .compare(&approx, &exact)
            .unwrap();
        assert_eq!(rows[0].storage_kb, None);
        assert_eq!(rows[0].theoretical_error_pct, None);
    }

    #[test]
    fn test_approx_column_named_like_derived_metric() {
        let spec = approx_spec().named("speedup_factor", "duration_ms", AggOp::Max);
        let approx = summarize(&[approx_row(100, 10, 99, 1.0)], &["dataset_size", "precision"], &spec).unwrap();
        let exact = exact_summary(&[exact_row(100, 100, 2.0)]);

        let err = compare(&approx, &exact, &["dataset_size"]).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateColumn(ref c) if c == "speedup_factor"));
    }

    #[test]
    fn test_prefixed_exact_column_already_taken() {
        let spec = approx_spec()
            .named("runs", "duration_ms", AggOp::Max)
            .named("exact_runs", "duration_ms", AggOp::Stddev);
        let approx = summarize(&[approx_row(100, 10, 99, 1.0)], &["dataset_size", "precision"], &spec).unwrap();
        let exact = summarize(
            &[exact_row(100, 100, 2.0)],
            &["dataset_size"],
            &exact_spec().named("runs", "duration_ms", AggOp::Max),
        )
        .unwrap();

        let err = compare(&approx, &exact, &["dataset_size"]).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateColumn(ref c) if c == "exact_runs"));
    }

    #[test]
    fn test_empty_inputs() {
        let exact = exact_summary(&[exact_row(100, 100, 2.0)]);

        assert!(compare(&[], &exact, &["dataset_size"]).unwrap().is_empty());
        let approx = approx_summary(&[approx_row(100, 10, 99, 1.0)]);
        assert!(compare(&approx, &[], &["dataset_size"]).unwrap().is_empty());
    }
}
