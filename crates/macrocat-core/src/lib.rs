// Core of the macro data catalog - the data model, the built-in catalog
// and the filter engine the browser runs on every keystroke
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod explorer;
pub mod export;
pub mod filter;
pub mod models;
pub mod tags;
pub mod validate;

pub use config::Config;
pub use error::Error;
pub use explorer::CatalogExplorer;
pub use export::{ExportFormat, Exporter};
pub use filter::{count_matches, filter, FilteredCatalog, SourceFilter};
pub use models::{AccessEndpoint, AccessType, Catalog, Category, Indicator, Source};
pub use tags::{collect_tags, tag_counts};
pub use validate::CatalogIssue;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
