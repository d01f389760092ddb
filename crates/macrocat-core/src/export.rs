use crate::display::{link_label, pluralize_sources, SourceField};
use crate::filter::FilteredCatalog;
use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Writes a (possibly filtered) catalog out as JSON, CSV or Markdown
pub struct Exporter;

impl Exporter {
    /// Export to a file, format picked from the extension
    pub fn export_to_file<P: AsRef<Path>>(view: &FilteredCatalog<'_>, path: P) -> Result<()> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .json, .csv, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(view, path, format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        view: &FilteredCatalog<'_>,
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let content = Self::render(view, format)?;

        let mut file = File::create(path.as_ref())
            .map_err(|e| Error::ExportError(format!("Failed to create file: {}", e)))?;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(format!("Failed to write file: {}", e)))?;

        tracing::info!(
            path = %path.as_ref().display(),
            format = format.extension(),
            sources = view.source_count(),
            "Exported catalog"
        );
        Ok(())
    }

    pub fn render(view: &FilteredCatalog<'_>, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(view),
            ExportFormat::Csv => Ok(Self::to_csv(view)),
            ExportFormat::Markdown => Ok(Self::to_markdown(view)),
        }
    }

    /// Same shape as the catalog files, so an export can be loaded back
    pub fn to_json(view: &FilteredCatalog<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&view.to_catalog())?)
    }

    /// One row per source
    pub fn to_csv(view: &FilteredCatalog<'_>) -> String {
        let mut output = String::new();

        output.push_str(
            "Category,Indicator,Source,Provider,Frequency,Typical Lag,Formats,Tags,Access\n",
        );

        for (category, indicator, source) in view.iter_sources() {
            let access = source
                .access
                .iter()
                .map(|a| a.url.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            output.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                Self::escape_csv(&category.title),
                Self::escape_csv(&indicator.title),
                Self::escape_csv(&source.name),
                Self::escape_csv(&source.provider),
                Self::escape_csv(&source.frequency),
                Self::escape_csv(&source.typical_lag),
                Self::escape_csv(&source.formats),
                Self::escape_csv(&source.tags().join(";")),
                Self::escape_csv(&access),
            ));
        }

        output
    }

    pub fn to_markdown(view: &FilteredCatalog<'_>) -> String {
        let mut output = String::new();

        output.push_str("# US Macro Data Catalog\n\n");
        output.push_str(&format!(
            "{} across {} indicators\n\n",
            pluralize_sources(view.source_count()),
            view.indicator_count()
        ));

        for c in &view.categories {
            output.push_str(&format!("## {}\n\n", c.category.title));
            if !c.category.description.is_empty() {
                output.push_str(&format!("{}\n\n", c.category.description));
            }

            for i in &c.indicators {
                output.push_str(&format!(
                    "### {} ({})\n\n",
                    i.indicator.title,
                    pluralize_sources(i.sources.len())
                ));
                output.push_str(&format!("{}\n\n", i.indicator.summary));

                for source in &i.sources {
                    output.push_str(&format!("#### {} - {}\n\n", source.name, source.provider));
                    output.push_str(&format!("{}\n\n", source.description));

                    output.push_str("| Field | Value |\n");
                    output.push_str("|-------|-------|\n");
                    for field in SourceField::CARD {
                        output.push_str(&format!(
                            "| {} | {} |\n",
                            field.label(),
                            field.value(source)
                        ));
                    }
                    output.push('\n');

                    for endpoint in &source.access {
                        output.push_str(&format!(
                            "- `{}` [{}]({})\n",
                            endpoint.kind,
                            link_label(endpoint),
                            endpoint.url
                        ));
                    }

                    if let Some(notes) = &source.notes {
                        output.push_str(&format!("\n> {}\n", notes));
                    }

                    if !source.tags().is_empty() {
                        let tags: Vec<_> = source.tags().iter().map(|t| format!("`#{}`", t)).collect();
                        output.push_str(&format!("\n**Tags:** {}\n", tags.join(", ")));
                    }

                    output.push('\n');
                }
            }
        }

        if view.is_empty() {
            output.push_str("_No matches found._\n");
        }

        output
    }

    /// Escape CSV special characters
    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
