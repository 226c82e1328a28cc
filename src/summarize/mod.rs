//! Group-by summarization of measurement tables
//!
//! Each experiment is expressed as a list of grouping factors plus an
//! [`AggSpec`]; one generic [`GroupSummarizer`] serves all of them.
//!
//! # Example
//!
//! ```
//! use sketchcmp::record::RawMeasurement;
//! use sketchcmp::summarize::{AggOp, AggSpec, GroupSummarizer};
//!
//! let runs: Vec<_> = [(100_000, 240.0), (100_000, 250.0), (200_000, 480.0)]
//!     .iter()
//!     .map(|&(size, ms)| RawMeasurement::exact(ms, size).with_dataset_size(size).to_record())
//!     .collect();
//!
//! let summarizer = GroupSummarizer::new(
//!     ["dataset_size"],
//!     AggSpec::new()
//!         .named("exact_time_ms", "duration_ms", AggOp::Mean)
//!         .named("exact_stddev_ms", "duration_ms", AggOp::Stddev),
//! );
//!
//! let summary = summarizer.summarize(&runs).unwrap();
//! assert_eq!(summary.len(), 2);
//! assert_eq!(summary[0].get("exact_time_ms"), Some(245.0));
//! // one run only: no sample deviation
//! assert_eq!(summary[1].get("exact_stddev_ms"), None);
//! ```

mod aggregation;
mod summarizer;
mod summary;

pub use aggregation::{AggOp, AggSpec, Aggregation};
pub use summarizer::{summarize, GroupSummarizer};
pub use summary::GroupSummary;
