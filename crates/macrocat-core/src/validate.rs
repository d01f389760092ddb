use crate::{models::Catalog, Error, Result};
use std::collections::HashSet;

/// Something a catalog author got wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    DuplicateCategory {
        category: String,
    },
    DuplicateIndicator {
        category: String,
        indicator: String,
    },
    DuplicateSource {
        category: String,
        indicator: String,
        source: String,
    },
    MissingAccess {
        category: String,
        indicator: String,
        source: String,
    },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::DuplicateCategory { category } => {
                write!(f, "duplicate category id '{}'", category)
            }
            CatalogIssue::DuplicateIndicator { category, indicator } => {
                write!(f, "duplicate indicator id '{}' in {}", indicator, category)
            }
            CatalogIssue::DuplicateSource {
                category,
                indicator,
                source,
            } => write!(
                f,
                "duplicate source id '{}' in {}/{}",
                source, category, indicator
            ),
            CatalogIssue::MissingAccess {
                category,
                indicator,
                source,
            } => write!(
                f,
                "source {}/{}/{} has no access endpoints",
                category, indicator, source
            ),
        }
    }
}

impl Catalog {
    /// Check the structural rules data authors are expected to follow
    ///
    /// Category ids are unique in the catalog, indicator ids within their
    /// category, source ids within their indicator, and every source has at
    /// least one access endpoint.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut category_ids = HashSet::new();

        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                issues.push(CatalogIssue::DuplicateCategory {
                    category: category.id.clone(),
                });
            }

            let mut indicator_ids = HashSet::new();
            for indicator in &category.indicators {
                if !indicator_ids.insert(indicator.id.as_str()) {
                    issues.push(CatalogIssue::DuplicateIndicator {
                        category: category.id.clone(),
                        indicator: indicator.id.clone(),
                    });
                }

                let mut source_ids = HashSet::new();
                for source in &indicator.sources {
                    if !source_ids.insert(source.id.as_str()) {
                        issues.push(CatalogIssue::DuplicateSource {
                            category: category.id.clone(),
                            indicator: indicator.id.clone(),
                            source: source.id.clone(),
                        });
                    }
                    if source.access.is_empty() {
                        issues.push(CatalogIssue::MissingAccess {
                            category: category.id.clone(),
                            indicator: indicator.id.clone(),
                            source: source.id.clone(),
                        });
                    }
                }
            }
        }

        issues
    }

    pub fn ensure_valid(&self) -> Result<()> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            for issue in &issues {
                tracing::warn!("Catalog issue: {}", issue);
            }
            Err(Error::InvalidCatalog(
                issues.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessEndpoint, AccessType, Category, Indicator, Source};

    fn source(id: &str, with_access: bool) -> Source {
        Source {
            id: id.to_string(),
            name: id.to_string(),
            provider: String::new(),
            description: String::new(),
            coverage: String::new(),
            frequency: String::new(),
            typical_lag: String::new(),
            formats: String::new(),
            access: if with_access {
                vec![AccessEndpoint {
                    url: "https://fred.stlouisfed.org".to_string(),
                    kind: AccessType::Api,
                    label: None,
                }]
            } else {
                Vec::new()
            },
            notes: None,
            tags: None,
        }
    }

    fn category(id: &str, indicators: Vec<Indicator>) -> Category {
        Category {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            indicators,
        }
    }

    fn indicator(id: &str, sources: Vec<Source>) -> Indicator {
        Indicator {
            id: id.to_string(),
            title: id.to_string(),
            summary: String::new(),
            sources,
        }
    }

    #[test]
    fn test_valid_catalog_has_no_issues() {
        let catalog = Catalog::new(vec![
            category("a", vec![indicator("x", vec![source("s", true)])]),
            // Same indicator and source ids are fine under a different parent
            category("b", vec![indicator("x", vec![source("s", true)])]),
        ]);
        assert!(catalog.validate().is_empty());
        assert!(catalog.ensure_valid().is_ok());
    }

    #[test]
    fn test_reports_every_issue() {
        let catalog = Catalog::new(vec![
            category(
                "a",
                vec![
                    indicator("x", vec![source("s", true), source("s", false)]),
                    indicator("x", vec![source("t", true)]),
                ],
            ),
            category("a", vec![]),
        ]);

        let issues = catalog.validate();
        assert_eq!(
            issues,
            vec![
                CatalogIssue::DuplicateSource {
                    category: "a".into(),
                    indicator: "x".into(),
                    source: "s".into(),
                },
                CatalogIssue::MissingAccess {
                    category: "a".into(),
                    indicator: "x".into(),
                    source: "s".into(),
                },
                CatalogIssue::DuplicateIndicator {
                    category: "a".into(),
                    indicator: "x".into(),
                },
                CatalogIssue::DuplicateCategory {
                    category: "a".into(),
                },
            ]
        );

        match catalog.ensure_valid() {
            Err(Error::InvalidCatalog(messages)) => assert_eq!(messages.len(), 4),
            other => panic!("expected InvalidCatalog, got {:?}", other),
        }
    }
}
