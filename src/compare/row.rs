//! Comparison rows and the derived accuracy/performance metrics

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

use crate::error::{AnalysisError, Result};
use crate::record::{Factor, Record};
use crate::traits::Row;

/// Bytes per normalized storage unit
pub const BYTES_PER_KB: f64 = 1024.0;

/// Names the flattened row reserves for derived metrics
const DERIVED_COLUMNS: [&str; 6] = [
    "error_absolute",
    "error_pct",
    "speedup_factor",
    "efficiency_score",
    "storage_kb",
    "theoretical_error_pct",
];

/// One approximate-method group joined with its exact-method counterpart
///
/// Every `Option<f64>` is `None` when the value is undefined: a zero
/// denominator in one of the derived ratios, or an undefined input it was
/// computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Full grouping key of the approximate group, followed by any exact-side
    /// factors it does not already carry
    pub key: Vec<(String, Factor)>,
    pub approx_members: usize,
    pub exact_members: usize,

    pub estimate_mean: Option<f64>,
    pub exact_count_mean: Option<f64>,
    pub approx_duration_mean: Option<f64>,
    pub exact_duration_mean: Option<f64>,
    pub storage_bytes: Option<f64>,

    /// `|estimate_mean - exact_count_mean|`
    pub error_absolute: Option<f64>,
    /// `error_absolute / exact_count_mean * 100`
    pub error_pct: Option<f64>,
    /// `exact_duration_mean / approx_duration_mean`
    pub speedup_factor: Option<f64>,
    /// `speedup_factor / error_pct`
    ///
    /// Mixes a unitless ratio with a percentage; kept as the established
    /// ranking metric for precision trade-offs.
    pub efficiency_score: Option<f64>,
    /// `storage_bytes / 1024`
    pub storage_kb: Option<f64>,
    /// `1.04 / sqrt(2^p) * 100` when the key carries a valid precision
    pub theoretical_error_pct: Option<f64>,

    /// All aggregate columns of the approximate group
    pub approx_columns: BTreeMap<String, Option<f64>>,
    /// All aggregate columns of the exact group
    pub exact_columns: BTreeMap<String, Option<f64>>,
}

impl ComparisonRow {
    /// Grouping factor by name, from either side of the join
    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.key.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// True when none of the derived ratios hit the undefined sentinel
    pub fn is_fully_defined(&self) -> bool {
        self.error_pct.is_some() && self.speedup_factor.is_some() && self.efficiency_score.is_some()
    }

    /// Fails if flattening would write one column name twice
    ///
    /// Follows the naming of [`Row::to_record`]: key factors, approximate
    /// columns, exact columns (`exact_` prefixed once when taken), then the
    /// reserved derived names.
    pub(crate) fn check_flat_columns(&self) -> Result<()> {
        let mut taken: BTreeSet<String> = self.key.iter().map(|(n, _)| n.clone()).collect();
        for column in self.approx_columns.keys() {
            if !taken.insert(column.clone()) {
                return Err(AnalysisError::DuplicateColumn(column.clone()));
            }
        }
        for column in self.exact_columns.keys() {
            let name = if taken.contains(column) {
                format!("exact_{}", column)
            } else {
                column.clone()
            };
            if !taken.insert(name.clone()) {
                return Err(AnalysisError::DuplicateColumn(name));
            }
        }
        match DERIVED_COLUMNS.iter().find(|name| taken.contains(**name)) {
            Some(name) => Err(AnalysisError::DuplicateColumn((*name).to_owned())),
            None => Ok(()),
        }
    }
}

/// Derived metrics, computed in dependency order
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Derived {
    pub error_absolute: Option<f64>,
    pub error_pct: Option<f64>,
    pub speedup_factor: Option<f64>,
    pub efficiency_score: Option<f64>,
}

impl Derived {
    pub fn compute(
        estimate: Option<f64>,
        exact_count: Option<f64>,
        exact_duration: Option<f64>,
        approx_duration: Option<f64>,
    ) -> Self {
        let error_absolute = match (estimate, exact_count) {
            (Some(a), Some(e)) => Some((a - e).abs()),
            _ => None,
        };
        let error_pct = ratio(error_absolute, exact_count).map(|r| r * 100.0);
        let speedup_factor = ratio(exact_duration, approx_duration);
        let efficiency_score = ratio(speedup_factor, error_pct);

        Self {
            error_absolute,
            error_pct,
            speedup_factor,
            efficiency_score,
        }
    }
}

/// Division that yields `None` for a zero or undefined denominator
pub(crate) fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

impl Row for ComparisonRow {
    /// Key factors, then approximate columns, then exact columns (prefixed
    /// with `exact_` where a name is already taken), then derived metrics
    fn to_record(&self) -> Record {
        let mut record: Record = self.key.iter().map(|(n, f)| (n.clone(), f.clone())).collect();
        for (column, value) in &self.approx_columns {
            record.insert(column.clone(), *value);
        }
        for (column, value) in &self.exact_columns {
            if record.contains(column) {
                record.insert(format!("exact_{}", column), *value);
            } else {
                record.insert(column.clone(), *value);
            }
        }

        record.insert("error_absolute", self.error_absolute);
        record.insert("error_pct", self.error_pct);
        record.insert("speedup_factor", self.speedup_factor);
        record.insert("efficiency_score", self.efficiency_score);
        if self.storage_bytes.is_some() {
            record.insert("storage_kb", self.storage_kb);
        }
        if self.theoretical_error_pct.is_some() {
            record.insert("theoretical_error_pct", self.theoretical_error_pct);
        }
        record
    }
}

impl Serialize for ComparisonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}
