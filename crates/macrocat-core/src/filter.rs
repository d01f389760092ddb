// Filter engine - search box + tag facet over the static catalog
use crate::models::{Catalog, Category, Indicator, Source};

/// Trim and lowercase. An empty result means "match everything".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// The per-source predicate: tag facet AND free-text search
///
/// Both `filter` and `count_matches` go through this, so the tree and the
/// headline count can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceFilter {
    query: String,
    tag: Option<String>,
}

impl SourceFilter {
    pub fn new(query: &str, active_tag: Option<&str>) -> Self {
        Self {
            query: normalize_query(query),
            tag: active_tag.map(str::to_string),
        }
    }

    /// Normalized query text
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// No query and no tag - every source passes
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && self.tag.is_none()
    }

    pub fn matches(&self, category: &Category, indicator: &Indicator, source: &Source) -> bool {
        if let Some(tag) = &self.tag {
            if !source.has_tag(tag) {
                return false;
            }
        }

        if self.query.is_empty() {
            return true;
        }

        haystack(category, indicator, source).contains(&self.query)
    }

    /// Prune the catalog bottom-up: sources that match, indicators with at
    /// least one surviving source, categories with at least one surviving
    /// indicator. Order is preserved at every level.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> FilteredCatalog<'a> {
        let categories = catalog
            .categories
            .iter()
            .filter_map(|category| {
                let indicators: Vec<_> = category
                    .indicators
                    .iter()
                    .filter_map(|indicator| {
                        let sources: Vec<_> = indicator
                            .sources
                            .iter()
                            .filter(|source| self.matches(category, indicator, source))
                            .collect();

                        (!sources.is_empty()).then_some(IndicatorView { indicator, sources })
                    })
                    .collect();

                (!indicators.is_empty()).then_some(CategoryView {
                    category,
                    indicators,
                })
            })
            .collect();

        FilteredCatalog { categories }
    }

    /// Count matching sources over the flattened catalog
    pub fn count(&self, catalog: &Catalog) -> usize {
        if self.is_unfiltered() {
            return catalog.source_count();
        }

        catalog
            .iter_sources()
            .filter(|(category, indicator, source)| self.matches(category, indicator, source))
            .count()
    }
}

/// Lowercased text searched for the query
///
/// typical_lag and formats are display-only and never searched.
fn haystack(category: &Category, indicator: &Indicator, source: &Source) -> String {
    [
        source.name.as_str(),
        source.provider.as_str(),
        source.description.as_str(),
        source.coverage.as_str(),
        source.frequency.as_str(),
        source.notes(),
        indicator.title.as_str(),
        indicator.summary.as_str(),
        category.title.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Filtered view of a catalog
///
/// Containers are new, leaves are borrowed from the catalog that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredCatalog<'a> {
    pub categories: Vec<CategoryView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView<'a> {
    pub category: &'a Category,
    pub indicators: Vec<IndicatorView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorView<'a> {
    pub indicator: &'a Indicator,
    pub sources: Vec<&'a Source>,
}

impl<'a> FilteredCatalog<'a> {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn source_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.indicators)
            .map(|i| i.sources.len())
            .sum()
    }

    pub fn indicator_count(&self) -> usize {
        self.categories.iter().map(|c| c.indicators.len()).sum()
    }

    /// Surviving sources with their parents, in display order
    pub fn iter_sources(&self) -> impl Iterator<Item = (&'a Category, &'a Indicator, &'a Source)> + '_ {
        self.categories.iter().flat_map(|c| {
            c.indicators.iter().flat_map(move |i| {
                i.sources
                    .iter()
                    .map(move |source| (c.category, i.indicator, *source))
            })
        })
    }

    /// Owned copy of the surviving tree, for export and serialization
    pub fn to_catalog(&self) -> Catalog {
        Catalog::new(
            self.categories
                .iter()
                .map(|c| Category {
                    indicators: c
                        .indicators
                        .iter()
                        .map(|i| Indicator {
                            sources: i.sources.iter().map(|s| (*s).clone()).collect(),
                            ..i.indicator.clone()
                        })
                        .collect(),
                    ..c.category.clone()
                })
                .collect(),
        )
    }
}

/// Filter the catalog by search text and an optional tag
pub fn filter<'a>(catalog: &'a Catalog, query: &str, active_tag: Option<&str>) -> FilteredCatalog<'a> {
    SourceFilter::new(query, active_tag).apply(catalog)
}

/// Number of sources matching the same filter, computed straight off the
/// flattened catalog
pub fn count_matches(catalog: &Catalog, query: &str, active_tag: Option<&str>) -> usize {
    SourceFilter::new(query, active_tag).count(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessEndpoint, AccessType};
    use pretty_assertions::assert_eq;

    fn source(id: &str, name: &str, tags: &[&str]) -> Source {
        Source {
            id: id.to_string(),
            name: name.to_string(),
            provider: "Federal Reserve".to_string(),
            description: format!("{} data", name),
            coverage: "2018-present".to_string(),
            frequency: "Daily".to_string(),
            typical_lag: "1 business day".to_string(),
            formats: "CSV, JSON".to_string(),
            access: vec![AccessEndpoint {
                url: format!("https://example.com/{}", id),
                kind: AccessType::Api,
                label: None,
            }],
            notes: None,
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect())
            },
        }
    }

    /// Policy -> Fed Funds -> [FRED (rates), SOFR (liquidity)]
    fn policy_catalog() -> Catalog {
        Catalog::new(vec![Category {
            id: "policy".to_string(),
            title: "Policy".to_string(),
            description: "Monetary policy".to_string(),
            indicators: vec![Indicator {
                id: "fed-funds".to_string(),
                title: "Fed Funds".to_string(),
                summary: "Overnight benchmark".to_string(),
                sources: vec![
                    source("a", "FRED", &["rates"]),
                    source("b", "SOFR", &["liquidity"]),
                ],
            }],
        }])
    }

    fn source_ids(view: &FilteredCatalog<'_>) -> Vec<String> {
        view.iter_sources().map(|(_, _, s)| s.id.clone()).collect()
    }

    #[test]
    fn test_search_picks_single_source() {
        let catalog = policy_catalog();
        let view = filter(&catalog, "sofr", None);

        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.categories[0].category.title, "Policy");
        assert_eq!(view.categories[0].indicators[0].indicator.title, "Fed Funds");
        assert_eq!(source_ids(&view), vec!["b"]);
        assert_eq!(count_matches(&catalog, "sofr", None), 1);
    }

    #[test]
    fn test_tag_only() {
        let catalog = policy_catalog();
        let view = filter(&catalog, "", Some("rates"));

        assert_eq!(source_ids(&view), vec!["a"]);
        assert_eq!(count_matches(&catalog, "", Some("rates")), 1);
    }

    #[test]
    fn test_no_match_prunes_everything() {
        let catalog = policy_catalog();
        let view = filter(&catalog, "zzz", None);

        assert!(view.is_empty());
        assert_eq!(view.categories.len(), 0);
        assert_eq!(count_matches(&catalog, "zzz", None), 0);
    }

    #[test]
    fn test_empty_query_is_identity() {
        let catalog = policy_catalog();
        let view = filter(&catalog, "   ", None);

        assert_eq!(view.to_catalog(), catalog);
        assert_eq!(count_matches(&catalog, "", None), 2);
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let catalog = policy_catalog();
        assert_eq!(source_ids(&filter(&catalog, "  SoF ", None)), vec!["b"]);
        assert_eq!(source_ids(&filter(&catalog, "fre", None)), vec!["a"]);
    }

    #[test]
    fn test_tag_is_case_sensitive() {
        let catalog = policy_catalog();
        assert!(filter(&catalog, "", Some("Rates")).is_empty());
        assert_eq!(count_matches(&catalog, "", Some("Rates")), 0);
    }

    #[test]
    fn test_tag_and_query_combine() {
        let catalog = policy_catalog();
        // "federal reserve" hits both providers, the tag narrows it down
        assert_eq!(
            source_ids(&filter(&catalog, "federal reserve", Some("liquidity"))),
            vec!["b"]
        );
        assert!(filter(&catalog, "fred", Some("liquidity")).is_empty());
    }

    #[test]
    fn test_indicator_fields_are_searched() {
        let catalog = policy_catalog();
        assert_eq!(source_ids(&filter(&catalog, "overnight", None)), vec!["a", "b"]);
    }

    #[test]
    fn test_notes_searched_when_present() {
        let mut catalog = policy_catalog();
        catalog.categories[0].indicators[0].sources[1].notes =
            Some("Published by the NY Fed at 8am".to_string());

        assert_eq!(source_ids(&filter(&catalog, "8am", None)), vec!["b"]);
    }

    #[test]
    fn test_lag_and_formats_not_searched() {
        let catalog = policy_catalog();
        assert!(filter(&catalog, "business day", None).is_empty());
        assert!(filter(&catalog, "json", None).is_empty());
    }

    #[test]
    fn test_bottom_up_pruning_keeps_order() {
        let mut catalog = policy_catalog();
        catalog.categories.push(Category {
            id: "inflation".to_string(),
            title: "Inflation".to_string(),
            description: String::new(),
            indicators: vec![
                Indicator {
                    id: "cpi".to_string(),
                    title: "CPI".to_string(),
                    summary: "Consumer prices".to_string(),
                    sources: vec![source("c", "BLS CPI", &["inflation"])],
                },
                Indicator {
                    id: "pce".to_string(),
                    title: "PCE".to_string(),
                    summary: "Consumption deflator".to_string(),
                    sources: vec![
                        source("d", "BEA PCE", &["inflation", "rates"]),
                        source("e", "Cleveland Nowcast", &["inflation"]),
                    ],
                },
            ],
        });

        let view = filter(&catalog, "", Some("rates"));
        assert_eq!(source_ids(&view), vec!["a", "d"]);
        assert_eq!(view.categories.len(), 2);
        assert_eq!(view.categories[1].indicators.len(), 1);
        assert_eq!(view.categories[1].indicators[0].indicator.id, "pce");

        let view = filter(&catalog, "nowcast", None);
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.categories[0].category.id, "inflation");
        assert_eq!(view.indicator_count(), 1);
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let catalog = policy_catalog();
        let before = catalog.clone();
        let _ = filter(&catalog, "sofr", Some("liquidity"));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_views_borrow_catalog_leaves() {
        let catalog = policy_catalog();
        let view = filter(&catalog, "sofr", None);
        let original = &catalog.categories[0].indicators[0].sources[1];
        assert!(std::ptr::eq(view.categories[0].indicators[0].sources[0], original));
    }

    #[test]
    fn test_source_filter_accessors() {
        let f = SourceFilter::new("  GDPNow ", None);
        assert_eq!(f.query(), "gdpnow");
        assert_eq!(f.tag(), None);
        assert!(!f.is_unfiltered());
        assert!(SourceFilter::new(" ", None).is_unfiltered());
        assert!(!SourceFilter::new("", Some("rates")).is_unfiltered());
    }
}
