//! # Analytics Engine
//!
//! This crate turns normalized trade logs into per-open-time performance
//! statistics. It acts as the "unbiased judge" of a session's edge.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files or spreadsheets. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every entry point is a plain function over an
//!   in-memory slice of trades. Given a well-formed input it never errors;
//!   degenerate numeric cases (zero trading days, zero drawdown) resolve to
//!   `None` instead of panicking.
//! - **Numeric Internals:** summaries carry `Option<f64>` metrics. The "N/A"
//!   sentinels and percentage strings live in the `report` formatting module
//!   only, right at the export boundary.
//!
//! ## Public API
//!
//! - `compute_group_summaries`: grouping plus per-group metrics for one table.
//! - `sweep_all_weekdays`: the same analysis repeated per weekday.
//! - `report`: fixed column orders and string rendering for the exporter.

pub mod engine;
pub mod report;
pub mod sweep;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{EngineSettings, compute_group_summaries, dataset_total_days, summarize_groups};
pub use sweep::{summarize_weekday, sweep_all_weekdays};
