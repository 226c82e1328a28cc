//! Experiments as configuration
//!
//! An [`ExperimentPlan`] names the grouping factors and aggregations for each
//! measurement method and how the two summaries are joined. Running it yields
//! an [`ExperimentReport`] for the reporting layer. The presets read the
//! fields named by a [`TableFields`] mapping, so they run on
//! [`RawMeasurement`](crate::record::RawMeasurement) records and on the
//! benchmark tables alike.
//!
//! # Example
//!
//! ```
//! use sketchcmp::experiment::ExperimentPlan;
//! use sketchcmp::record::{split_by_method, RawMeasurement};
//!
//! let runs = vec![
//!     RawMeasurement::exact(245.0, 100_000).with_dataset_size(100_000),
//!     RawMeasurement::approximate(49.0, 12, 99_500, 4096).with_dataset_size(100_000),
//! ];
//! let (exact, approx) = split_by_method(&runs);
//!
//! let report = ExperimentPlan::scaling().run(&approx, &exact).unwrap();
//! assert_eq!(report.comparison.len(), 1);
//! assert_eq!(report.comparison[0].speedup_factor, Some(5.0));
//! ```

mod plan;
mod report;

pub use plan::{ExperimentPlan, TableFields};
pub use report::ExperimentReport;
