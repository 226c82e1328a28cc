//! Group summary rows

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::record::{Factor, Record};
use crate::traits::Row;

/// Aggregated values for one distinct grouping-key tuple
///
/// Column values are `None` when the statistic is undefined for the group
/// (for example the standard deviation of a single run).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub(crate) key: Vec<(String, Factor)>,
    pub(crate) members: usize,
    pub(crate) columns: BTreeMap<String, Option<f64>>,
}

impl GroupSummary {
    /// Grouping factors in `group_by` order
    pub fn key(&self) -> &[(String, Factor)] {
        &self.key
    }

    /// Grouping factor by name
    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.key.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Number of input records that formed this group
    pub fn members(&self) -> usize {
        self.members
    }

    /// Aggregated value; `None` if the column is absent or undefined
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns.get(column).copied().flatten()
    }

    /// Check if the aggregate column exists, defined or not
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Aggregate columns in name order
    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Row for GroupSummary {
    fn to_record(&self) -> Record {
        let mut record: Record = self.key.iter().map(|(n, f)| (n.clone(), f.clone())).collect();
        for (column, value) in &self.columns {
            record.insert(column.clone(), *value);
        }
        record
    }
}

impl Serialize for GroupSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}
