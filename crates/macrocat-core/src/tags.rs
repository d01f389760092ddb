use crate::models::Catalog;
use std::collections::{BTreeMap, BTreeSet};

/// Every tag used anywhere in the catalog, deduplicated and sorted
///
/// Always computed from the full catalog, so the tag bar doesn't shrink
/// while the user filters.
pub fn collect_tags(catalog: &Catalog) -> Vec<&str> {
    catalog
        .iter_sources()
        .flat_map(|(_, _, source)| source.tags())
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// How many sources carry each tag
pub fn tag_counts(catalog: &Catalog) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for (_, _, source) in catalog.iter_sources() {
        for tag in source.tags() {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    counts
}
