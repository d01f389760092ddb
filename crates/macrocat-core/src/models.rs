use serde::{Deserialize, Serialize};

/// The whole catalog - categories, each with indicators, each with sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A top-level grouping like "Policy" or "Inflation"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

/// One macro series a desk cares about (fed funds, payrolls, breakevens...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// A concrete place to get the data for an indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
    pub coverage: String,
    pub frequency: String,
    pub typical_lag: String,
    pub formats: String,
    pub access: Vec<AccessEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One way to reach a source - an API, a CSV download, a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEndpoint {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AccessType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Api,
    Csv,
    Excel,
    Json,
    Dashboard,
    Pdf,
    Web,
}

impl AccessType {
    pub fn label(&self) -> &'static str {
        match self {
            AccessType::Api => "API",
            AccessType::Csv => "CSV",
            AccessType::Excel => "EXCEL",
            AccessType::Json => "JSON",
            AccessType::Dashboard => "DASHBOARD",
            AccessType::Pdf => "PDF",
            AccessType::Web => "WEB",
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Total number of sources across every category and indicator
    pub fn source_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|category| &category.indicators)
            .map(Indicator::source_count)
            .sum()
    }

    pub fn indicator_count(&self) -> usize {
        self.categories.iter().map(|c| c.indicators.len()).sum()
    }

    /// Flattened walk over every source along with its parents, in catalog order
    pub fn iter_sources(&self) -> impl Iterator<Item = (&Category, &Indicator, &Source)> + '_ {
        self.categories.iter().flat_map(|category| {
            category.indicators.iter().flat_map(move |indicator| {
                indicator
                    .sources
                    .iter()
                    .map(move |source| (category, indicator, source))
            })
        })
    }
}

impl Indicator {
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl Source {
    /// Exact, case-sensitive tag membership. Untagged sources never match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .map_or(false, |tags| tags.iter().any(|t| t == tag))
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}
