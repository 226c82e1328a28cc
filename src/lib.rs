//! # sketchcmp
//!
//! Analysis of exact-versus-HyperLogLog cardinality benchmarks.
//!
//! Given raw per-run measurements for an exact distinct count and for an
//! HLL estimator at several precisions and data scales, sketchcmp produces
//! the derived tables a report is built from: per-group summaries and an
//! exact/approximate comparison with speedup, relative error, normalized
//! storage, and efficiency.
//!
//! ## Features
//!
//! - **Group summaries**: one generic group-by with mean, sample standard
//!   deviation, and max, sorted by key
//! - **Comparison join**: inner join on shared factors with explicit
//!   handling of ambiguous keys and zero denominators
//! - **Experiment plans**: each experiment is a small serde-configurable plan
//! - **Tabular boundary**: rows in and rows out, serializable as flat maps
//!
//! ## Quick Start
//!
//! ```rust
//! use sketchcmp::prelude::*;
//!
//! let runs = vec![
//!     RawMeasurement::exact(240.0, 100_000).with_dataset_size(100_000),
//!     RawMeasurement::exact(250.0, 100_000).with_dataset_size(100_000),
//!     RawMeasurement::approximate(48.0, 14, 99_500, 16_384).with_dataset_size(100_000),
//!     RawMeasurement::approximate(50.0, 14, 99_500, 16_384).with_dataset_size(100_000),
//! ];
//! let (exact, approx) = split_by_method(&runs);
//!
//! let exact_summary = GroupSummarizer::new(
//!     ["dataset_size"],
//!     AggSpec::new()
//!         .named("exact_count", "exact_count", AggOp::Mean)
//!         .named("exact_time_ms", "duration_ms", AggOp::Mean),
//! )
//! .summarize(&exact)
//! .unwrap();
//!
//! let approx_summary = GroupSummarizer::new(
//!     ["dataset_size", "precision"],
//!     AggSpec::new()
//!         .named("avg_estimate", "estimated_count", AggOp::Mean)
//!         .named("approx_time_ms", "duration_ms", AggOp::Mean)
//!         .named("storage_bytes", "storage_bytes", AggOp::Mean),
//! )
//! .summarize(&approx)
//! .unwrap();
//!
//! let rows = compare(&approx_summary, &exact_summary, &["dataset_size"]).unwrap();
//! assert_eq!(rows[0].speedup_factor, Some(5.0));
//! assert_eq!(rows[0].storage_kb, Some(16.0));
//! ```
//!
//! ## Undefined values
//!
//! `None` is the single sentinel for values that cannot be computed: the
//! standard deviation of a one-run group, and any derived ratio whose
//! denominator is exactly zero. Such rows stay in the output so a report
//! can flag them; the rest of the batch is unaffected.

pub mod cardinality;
pub mod compare;
pub mod error;
pub mod experiment;
pub mod record;
pub mod statistics;
pub mod summarize;
pub mod traits;

pub mod prelude {
    pub use crate::compare::{compare, ComparisonColumns, ComparisonJoiner, ComparisonRow};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::experiment::{ExperimentPlan, ExperimentReport, TableFields};
    pub use crate::record::{split_by_method, Factor, Method, RawMeasurement, Record, Value};
    pub use crate::summarize::{summarize, AggOp, AggSpec, GroupSummarizer, GroupSummary};
    pub use crate::traits::*;
}

pub use compare::{compare, ComparisonJoiner, ComparisonRow};
pub use error::{AnalysisError, Result};
pub use summarize::{summarize, GroupSummarizer, GroupSummary};
