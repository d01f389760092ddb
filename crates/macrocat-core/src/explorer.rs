use crate::filter::{FilteredCatalog, SourceFilter};
use crate::models::Catalog;
use crate::tags::collect_tags;

/// Interactive filter state over a catalog
///
/// Holds the raw search text and the active tag the way a UI sees them,
/// and keeps the filtered view for the latest (query, tag) pair. Setting the
/// same input twice (or text that normalizes the same) skips the rescan.
#[derive(Debug, Clone)]
pub struct CatalogExplorer<'a> {
    catalog: &'a Catalog,
    tags: Vec<&'a str>,
    total: usize,
    search: String,
    active_tag: Option<String>,
    filter: SourceFilter,
    view: FilteredCatalog<'a>,
    count: usize,
}

impl<'a> CatalogExplorer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let filter = SourceFilter::default();
        let view = filter.apply(catalog);
        let total = catalog.source_count();

        Self {
            catalog,
            tags: collect_tags(catalog),
            total,
            search: String::new(),
            active_tag: None,
            filter,
            view,
            count: total,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The full tag universe, independent of the current filter
    pub fn tags(&self) -> &[&'a str] {
        &self.tags
    }

    pub fn total_sources(&self) -> usize {
        self.total
    }

    /// Raw search text as typed
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }

    pub fn view(&self) -> &FilteredCatalog<'a> {
        &self.view
    }

    pub fn match_count(&self) -> usize {
        self.count
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refresh();
    }

    pub fn push_char(&mut self, c: char) {
        self.search.push(c);
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        self.search.pop();
        self.refresh();
    }

    pub fn set_active_tag(&mut self, tag: Option<&str>) {
        self.active_tag = tag.map(str::to_string);
        self.refresh();
    }

    /// Select a tag, or clear it if it's already the active one
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.active_tag.as_deref() == Some(tag) {
            self.set_active_tag(None);
        } else {
            self.set_active_tag(Some(tag));
        }
    }

    pub fn clear_tag(&mut self) {
        self.set_active_tag(None);
    }

    /// Drop both the search text and the tag
    pub fn reset(&mut self) {
        self.search.clear();
        self.active_tag = None;
        self.refresh();
    }

    fn refresh(&mut self) {
        let filter = SourceFilter::new(&self.search, self.active_tag.as_deref());
        if filter == self.filter {
            return;
        }

        self.view = filter.apply(self.catalog);
        self.count = filter.count(self.catalog);
        tracing::debug!(
            query = filter.query(),
            tag = ?filter.tag(),
            matches = self.count,
            "Recomputed filtered catalog"
        );
        self.filter = filter;
    }
}
