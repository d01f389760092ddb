use crate::{models::Catalog, Error, Result};
use std::path::Path;

/// The curated catalog that ships with the binary
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

impl Catalog {
    /// Parse the built-in catalog
    ///
    /// Call this once at startup and hand `&Catalog` to whoever needs it.
    /// Nothing downstream ever gets a mutable handle.
    pub fn builtin() -> Result<Self> {
        let catalog = Self::from_toml_str(BUILTIN_CATALOG)?;
        tracing::info!(
            categories = catalog.categories.len(),
            sources = catalog.source_count(),
            "Loaded built-in catalog"
        );
        Ok(catalog)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::CatalogParse(e.to_string()))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::CatalogParse(e.to_string()))
    }

    /// Load an external catalog file (.toml or .json) and validate it
    ///
    /// Hand-authored catalogs get checked here since nobody reviewed them
    /// the way the built-in one was.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let catalog = match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => {
                return Err(Error::CatalogParse(format!(
                    "Unsupported catalog file {}. Use .toml or .json",
                    path.display()
                )))
            }
        };

        catalog.ensure_valid()?;
        tracing::info!(
            path = %path.display(),
            sources = catalog.source_count(),
            "Loaded catalog file"
        );
        Ok(catalog)
    }

    /// Built-in catalog unless a path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_parses_and_validates() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.categories.is_empty());
        assert!(catalog.source_count() > 20);
        assert!(catalog.validate().is_empty(), "{:?}", catalog.validate());
    }

    #[test]
    fn test_builtin_catalog_covers_desk_categories() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<_> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        for expected in [
            "policy",
            "profits",
            "liquidity",
            "growth",
            "markets",
            "employment",
            "credit",
            "inflation",
        ] {
            assert!(ids.contains(&expected), "missing category {}", expected);
        }
    }

    #[test]
    fn test_from_path_json_round_trip() {
        let catalog = Catalog::builtin().unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&catalog).unwrap().as_bytes())
            .unwrap();

        let loaded = Catalog::from_path(file.path()).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = Catalog::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::CatalogParse(_)));
    }

    #[test]
    fn test_from_path_rejects_invalid_catalog() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            br#"
[[categories]]
id = "policy"
title = "Policy"
description = "Rates"

[[categories.indicators]]
id = "ff"
title = "Fed Funds"
summary = "Overnight rate"

[[categories.indicators.sources]]
id = "fred"
name = "FRED"
provider = "St. Louis Fed"
description = "EFFR"
coverage = "1954-present"
frequency = "Daily"
typical_lag = "1 day"
formats = "CSV"
access = []
"#,
        )
        .unwrap();

        let err = Catalog::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog(_)));
    }
}
