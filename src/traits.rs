//! Shared row behaviour
//!
//! Derived tables (group summaries, comparison rows) flatten back into
//! [`Record`]s so that they can be serialized as plain mappings or fed into
//! another round of summarization.

use crate::record::Record;

/// A row of a derived table
pub trait Row {
    /// Flatten into a string-keyed record; undefined values become nulls
    fn to_record(&self) -> Record;
}

/// Flatten every row of a derived table
pub fn to_records<R: Row>(rows: &[R]) -> Vec<Record> {
    rows.iter().map(Row::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    struct Pair(i64, Option<f64>);

    impl Row for Pair {
        fn to_record(&self) -> Record {
            Record::new().with("k", self.0).with("v", self.1)
        }
    }

    #[test]
    fn test_to_records() {
        let records = to_records(&[Pair(1, Some(2.0)), Pair(2, None)]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("v"), Some(&Value::Float(2.0)));
        assert_eq!(records[1].get("v"), Some(&Value::Null));
    }
}
