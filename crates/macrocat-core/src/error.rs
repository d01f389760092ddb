use thiserror::Error;

/// All the ways loading, exporting or configuring the catalog can go wrong
///
/// Filtering never shows up here - it works on data that already loaded,
/// so it can't fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to parse catalog: {0}")]
    CatalogParse(String),

    #[error("Catalog failed validation:\n{}", .0.join("\n"))]
    InvalidCatalog(Vec<String>),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
