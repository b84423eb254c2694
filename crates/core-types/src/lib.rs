pub mod dataset;
pub mod enums;
pub mod error;
pub mod record;
pub mod selection;

// Re-export the core types to provide a clean public API.
pub use dataset::Dataset;
pub use enums::Region;
pub use error::CoreError;
pub use record::GdpRecord;
pub use selection::FilterSelection;
