// Presentation helpers shared by the TUI and the plain-text CLI output
use crate::models::{AccessEndpoint, Source};

/// Placeholder for fields the catalog left blank
pub const EMPTY_FIELD: &str = "—";

/// Detail fields shown on every source card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Coverage,
    Frequency,
    TypicalLag,
    Formats,
}

impl SourceField {
    pub const CARD: [SourceField; 4] = [
        SourceField::Coverage,
        SourceField::Frequency,
        SourceField::TypicalLag,
        SourceField::Formats,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SourceField::Coverage => "Coverage",
            SourceField::Frequency => "Update Frequency",
            SourceField::TypicalLag => "Typical Lag",
            SourceField::Formats => "Formats",
        }
    }

    pub fn value<'a>(&self, source: &'a Source) -> &'a str {
        let raw = match self {
            SourceField::Coverage => &source.coverage,
            SourceField::Frequency => &source.frequency,
            SourceField::TypicalLag => &source.typical_lag,
            SourceField::Formats => &source.formats,
        };
        if raw.trim().is_empty() {
            EMPTY_FIELD
        } else {
            raw
        }
    }
}

/// Text for an access link: explicit label, else the bare host
///
/// URLs that don't parse or have no host come back as-is. This never fails.
pub fn link_label(endpoint: &AccessEndpoint) -> String {
    match &endpoint.label {
        Some(label) => label.clone(),
        None => host_label(&endpoint.url),
    }
}

/// Host of a URL without a leading "www.", or the raw string if that's not possible
pub fn host_label(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|parsed| {
            parsed
                .host_str()
                .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
        })
        .unwrap_or_else(|| raw.to_string())
}

/// "1 source" / "3 sources"
pub fn pluralize_sources(n: usize) -> String {
    if n == 1 {
        "1 source".to_string()
    } else {
        format!("{} sources", n)
    }
}

/// Status line under the search box
pub fn match_summary(n: usize) -> String {
    format!(
        "Showing {} data source{} matching your filters.",
        n,
        if n == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccessType;

    fn endpoint(url: &str, label: Option<&str>) -> AccessEndpoint {
        AccessEndpoint {
            url: url.to_string(),
            kind: AccessType::Api,
            label: label.map(String::from),
        }
    }

    #[test]
    fn test_link_label_prefers_explicit_label() {
        let e = endpoint("https://fred.stlouisfed.org/series/DFF", Some("FRED series"));
        assert_eq!(link_label(&e), "FRED series");
    }

    #[test]
    fn test_link_label_strips_www() {
        let e = endpoint("https://www.newyorkfed.org/markets/reference-rates/sofr", None);
        assert_eq!(link_label(&e), "newyorkfed.org");

        let e = endpoint("https://api.stlouisfed.org/fred/series/observations", None);
        assert_eq!(link_label(&e), "api.stlouisfed.org");
    }

    #[test]
    fn test_link_label_falls_back_to_raw_url() {
        assert_eq!(link_label(&endpoint("not a url", None)), "not a url");
        assert_eq!(
            link_label(&endpoint("/relative/path.csv", None)),
            "/relative/path.csv"
        );
    }

    #[test]
    fn test_field_values_and_placeholder() {
        let mut source = Source {
            id: "s".into(),
            name: "S".into(),
            provider: "P".into(),
            description: String::new(),
            coverage: "1954-present".into(),
            frequency: "Daily".into(),
            typical_lag: "  ".into(),
            formats: String::new(),
            access: vec![endpoint("https://example.com", None)],
            notes: None,
            tags: None,
        };

        assert_eq!(SourceField::Coverage.value(&source), "1954-present");
        assert_eq!(SourceField::TypicalLag.value(&source), EMPTY_FIELD);
        assert_eq!(SourceField::Formats.value(&source), EMPTY_FIELD);
        source.formats = "CSV".into();
        assert_eq!(SourceField::Formats.value(&source), "CSV");
        assert_eq!(SourceField::Frequency.label(), "Update Frequency");
    }

    #[test]
    fn test_plural_text() {
        assert_eq!(pluralize_sources(1), "1 source");
        assert_eq!(pluralize_sources(0), "0 sources");
        assert_eq!(match_summary(1), "Showing 1 data source matching your filters.");
        assert_eq!(match_summary(12), "Showing 12 data sources matching your filters.");
    }
}
