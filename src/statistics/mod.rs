//! Per-group running statistics
//!
//! Group summaries are built in a single pass over the input table, with one
//! accumulator per (group, aggregation) pair.
//!
//! # Example
//!
//! ```
//! use sketchcmp::statistics::RunningStats;
//!
//! let mut stats = RunningStats::new();
//!
//! for value in [10.0, 20.0, 30.0] {
//!     stats.add(value);
//! }
//!
//! assert_eq!(stats.mean(), Some(20.0));
//! assert_eq!(stats.sample_stddev(), Some(10.0));
//! assert_eq!(stats.max(), Some(30.0));
//! ```

mod moments;

pub use moments::RunningStats;
