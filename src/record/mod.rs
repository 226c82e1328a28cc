//! Tabular records exchanged with the loading and reporting layers
//!
//! Input tables arrive as sequences of [`Record`]s: string-keyed rows of
//! numeric or categorical [`Value`]s. Grouping factors are read out of a row
//! as a [`Factor`], which is always an integer or a label so that group keys
//! compare by exact equality.
//!
//! # Example
//!
//! ```
//! use sketchcmp::record::{fields, Method, RawMeasurement, Record};
//!
//! let run = RawMeasurement::approximate(12.5, 14, 99_500, 16_384).with_dataset_size(100_000);
//! let row: Record = run.to_record();
//!
//! assert_eq!(row.get(fields::METHOD).and_then(|v| v.as_text()), Some(Method::Approximate.label()));
//! assert_eq!(row.get(fields::PRECISION).and_then(|v| v.as_number()), Some(14.0));
//! ```

mod measurement;
mod value;

pub use measurement::{split_by_method, Method, RawMeasurement};
pub use value::{Factor, Record, Value};

/// Field names written by [`RawMeasurement::to_record`]
pub mod fields {
    pub const METHOD: &str = "method";
    pub const DATASET_SIZE: &str = "dataset_size";
    pub const PRECISION: &str = "precision";
    pub const NUM_DAYS: &str = "num_days";
    pub const DURATION_MS: &str = "duration_ms";
    pub const EXACT_COUNT: &str = "exact_count";
    pub const ESTIMATED_COUNT: &str = "estimated_count";
    pub const STORAGE_BYTES: &str = "storage_bytes";
}
