//! Exact-versus-approximate comparison
//!
//! Joins an approximate-method summary table with an exact-method summary
//! table and derives, in order:
//!
//! 1. `error_absolute = |estimate - exact_count|`
//! 2. `error_pct = error_absolute / exact_count * 100`
//! 3. `speedup_factor = exact_duration / approx_duration`
//! 4. `efficiency_score = speedup_factor / error_pct`
//!
//! A zero denominator makes the affected metric (and anything computed from
//! it) `None`; the rest of the batch is unaffected.
//!
//! # Example
//!
//! ```
//! use sketchcmp::compare::compare;
//! use sketchcmp::record::Record;
//! use sketchcmp::summarize::{summarize, AggOp, AggSpec};
//!
//! let hll = vec![Record::new()
//!     .with("precision", 12i64)
//!     .with("estimated_count", 99_500i64)
//!     .with("duration_ms", 49.0)
//!     .with("storage_bytes", 4096i64)];
//! let exact = vec![Record::new().with("exact_count", 100_000i64).with("duration_ms", 245.0)];
//!
//! let approx_summary = summarize(
//!     &hll,
//!     &["precision"],
//!     &AggSpec::new()
//!         .named("avg_estimate", "estimated_count", AggOp::Mean)
//!         .named("approx_time_ms", "duration_ms", AggOp::Mean)
//!         .named("storage_bytes", "storage_bytes", AggOp::Mean),
//! )
//! .unwrap();
//! let exact_summary = summarize(
//!     &exact,
//!     &[],
//!     &AggSpec::new()
//!         .named("exact_count", "exact_count", AggOp::Mean)
//!         .named("exact_time_ms", "duration_ms", AggOp::Mean),
//! )
//! .unwrap();
//!
//! let rows = compare(&approx_summary, &exact_summary, &[]).unwrap();
//! assert_eq!(rows[0].speedup_factor, Some(5.0));
//! assert_eq!(rows[0].error_absolute, Some(500.0));
//! ```

mod columns;
mod joiner;
mod row;

pub use columns::ComparisonColumns;
pub use joiner::{compare, ComparisonJoiner};
pub use row::{ComparisonRow, BYTES_PER_KB};
