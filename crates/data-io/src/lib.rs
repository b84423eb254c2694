//! # GDP Data I/O
//!
//! Everything that crosses the process boundary for the dashboard's data:
//! reading the source CSV, holding the live dataset, and writing exports.
//!
//! ## Architectural Principles
//!
//! - **Validate at the boundary:** every row passes through
//!   `GdpRecord::new` before it can reach a `Dataset`. The analytics layer
//!   never re-checks records.
//! - **Replace, never mutate:** `DatasetStore` swaps whole `Arc<Dataset>`s,
//!   so concurrent readers need no coordination.
//!
//! ## Public API
//!
//! - `load_csv` / `parse_csv`: parse-and-validate loaders.
//! - `DatasetStore`: the process-wide dataset with atomic reload.
//! - `write_csv` / `export_to_path`: CSV export of filtered rows.
//! - `IngestError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod export;
pub mod loader;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::IngestError;
pub use export::{export_to_path, write_csv};
pub use loader::{load_csv, parse_csv, LoadOptions, LoadOutcome, LoadReport};
pub use store::DatasetStore;
