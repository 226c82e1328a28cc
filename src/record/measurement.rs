//! Typed benchmark trials
//!
//! [`RawMeasurement`] is a convenience for callers that build tables in code;
//! the analysis stages operate on [`Record`]s, so a measurement is flattened
//! with [`RawMeasurement::to_record`] before summarization.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fields;
use super::value::Record;

/// How a cardinality was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Full distinct count over the raw data
    Exact,
    /// HyperLogLog estimate
    Approximate,
}

impl Method {
    /// Label written to the `method` field
    pub fn label(&self) -> &'static str {
        match self {
            Method::Exact => "exact",
            Method::Approximate => "approximate",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One benchmark trial
///
/// Grouping factors are optional because each experiment varies a different
/// subset of them (dataset size, precision, or time window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub method: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_days: Option<u32>,
    pub duration_ms: f64,
    /// Ground-truth cardinality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bytes: Option<u64>,
}

impl RawMeasurement {
    /// An exact-count trial
    pub fn exact(duration_ms: f64, exact_count: u64) -> Self {
        Self {
            method: Method::Exact,
            dataset_size: None,
            precision: None,
            num_days: None,
            duration_ms,
            exact_count: Some(exact_count),
            estimated_count: None,
            storage_bytes: None,
        }
    }

    /// A sketch-based trial at the given precision
    pub fn approximate(duration_ms: f64, precision: u8, estimated_count: u64, storage_bytes: u64) -> Self {
        Self {
            method: Method::Approximate,
            dataset_size: None,
            precision: Some(precision),
            num_days: None,
            duration_ms,
            exact_count: None,
            estimated_count: Some(estimated_count),
            storage_bytes: Some(storage_bytes),
        }
    }

    /// Set the number of rows the trial ran over
    pub fn with_dataset_size(mut self, dataset_size: u64) -> Self {
        self.dataset_size = Some(dataset_size);
        self
    }

    /// Set the time window, in days, the trial covered
    pub fn with_num_days(mut self, num_days: u32) -> Self {
        self.num_days = Some(num_days);
        self
    }

    /// Set the true distinct count
    pub fn with_exact_count(mut self, exact_count: u64) -> Self {
        self.exact_count = Some(exact_count);
        self
    }

    /// Flatten into a row; absent optional fields are omitted, not nulled
    pub fn to_record(&self) -> Record {
        let mut record = Record::new()
            .with(fields::METHOD, self.method.label())
            .with(fields::DURATION_MS, self.duration_ms);

        if let Some(v) = self.dataset_size {
            record.insert(fields::DATASET_SIZE, v);
        }
        if let Some(v) = self.precision {
            record.insert(fields::PRECISION, v);
        }
        if let Some(v) = self.num_days {
            record.insert(fields::NUM_DAYS, v);
        }
        if let Some(v) = self.exact_count {
            record.insert(fields::EXACT_COUNT, v);
        }
        if let Some(v) = self.estimated_count {
            record.insert(fields::ESTIMATED_COUNT, v);
        }
        if let Some(v) = self.storage_bytes {
            record.insert(fields::STORAGE_BYTES, v);
        }
        record
    }
}

/// Split mixed trials into `(exact, approximate)` tables, preserving order
pub fn split_by_method(measurements: &[RawMeasurement]) -> (Vec<Record>, Vec<Record>) {
    let mut exact = Vec::new();
    let mut approx = Vec::new();
    for m in measurements {
        match m.method {
            Method::Exact => exact.push(m.to_record()),
            Method::Approximate => approx.push(m.to_record()),
        }
    }
    (exact, approx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    #[test]
    fn test_to_record_omits_absent_fields() {
        let record = RawMeasurement::exact(245.0, 100_000).with_dataset_size(100_000).to_record();

        assert_eq!(record.get(fields::METHOD), Some(&Value::from("exact")));
        assert_eq!(record.get(fields::EXACT_COUNT), Some(&Value::Int(100_000)));
        assert!(!record.contains(fields::PRECISION));
        assert!(!record.contains(fields::STORAGE_BYTES));
    }

    #[test]
    fn test_split_by_method() {
        let runs = vec![
            RawMeasurement::exact(10.0, 5),
            RawMeasurement::approximate(1.0, 10, 5, 1024),
            RawMeasurement::exact(11.0, 5),
        ];

        let (exact, approx) = split_by_method(&runs);
        assert_eq!(exact.len(), 2);
        assert_eq!(approx.len(), 1);
        assert_eq!(exact[1].get(fields::DURATION_MS), Some(&Value::Float(11.0)));
    }

    #[test]
    fn test_deserialize_method() {
        let m: RawMeasurement = serde_json::from_str(
            r#"{"method": "approximate", "precision": 12, "duration_ms": 3.5, "estimated_count": 990}"#,
        )
        .unwrap();

        assert_eq!(m.method, Method::Approximate);
        assert_eq!(m.precision, Some(12));
        assert_eq!(m.storage_bytes, None);
    }
}
