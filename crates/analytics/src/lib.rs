//! # GDP Aggregation Engine
//!
//! This crate turns a loaded GDP [`Dataset`](core_types::Dataset) and a user's
//! [`FilterSelection`](core_types::FilterSelection) into everything the
//! dashboard displays.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   terminals or configuration. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `AggregationEngine` holds no state. The same
//!   inputs always give the same outputs, so it is safe to call on every user
//!   interaction and from many threads at once.
//!
//! ## Public API
//!
//! - `AggregationEngine`: `filter`, `summarize`, `to_exportable_rows`.
//! - `Summary` / `MaxRecord`: KPI figures. An empty selection has no summary.
//! - `growth`, `ranking`, `overview`: derived views for the dashboard tabs.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod growth;
pub mod overview;
pub mod ranking;
pub mod report;
pub mod rows;
pub mod summation;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AggregationEngine;
pub use growth::{annual_growth, top_growth, GrowthPoint};
pub use overview::{overview, Overview};
pub use ranking::{rank_by_value, shares, CountryShare};
pub use report::{MaxRecord, Summary};
pub use rows::{ExportRow, ExportRows};
pub use summation::{compensated_sum, CompensatedSum};
