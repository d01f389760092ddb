use clap::Parser;
use macrocat_core::display::{link_label, match_summary, pluralize_sources, SourceField};
use macrocat_core::{
    collect_tags, count_matches, filter, tag_counts, Catalog, Config, ExportFormat, Exporter,
    FilteredCatalog,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "macrocat")]
#[command(version, about = "Browse a curated catalog of free US macro and market data sources", long_about = None)]
struct Cli {
    /// Catalog file (.toml or .json) to use instead of the built-in one
    #[arg(long, global = true, env = "MACROCAT_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive browser (default)
    Browse,
    /// Print sources matching a query and/or tag
    Search {
        /// Free-text query (case-insensitive)
        #[arg(default_value = "")]
        query: String,
        /// Only sources carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List every tag with its source count
    Tags,
    /// Write the (filtered) catalog to .json, .csv or .md
    Export {
        /// Output file, format taken from the extension
        path: PathBuf,
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Check a catalog file for duplicate ids and missing access links
    Validate {
        /// Catalog file; defaults to the active catalog
        path: Option<PathBuf>,
    },
    /// Show catalog totals
    Stats,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macrocat=info,macrocat_core=warn,macrocat_tui=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    let catalog_path = cli.catalog.as_deref().or(config.catalog.path.as_deref());

    match cli.command {
        None | Some(Commands::Browse) => {
            let catalog = Catalog::load(catalog_path)?;
            let app = macrocat_tui::App::new(&catalog, &config.ui);
            macrocat_tui::run_tui(app)?;
        }
        Some(Commands::Search { query, tag, format }) => {
            let catalog = Catalog::load(catalog_path)?;
            tracing::info!(%query, ?tag, "Searching catalog");

            let view = filter(&catalog, &query, tag.as_deref());
            match format {
                OutputFormat::Text => {
                    let count = count_matches(&catalog, &query, tag.as_deref());
                    print_view(&view);
                    println!("{}", match_summary(count));
                }
                OutputFormat::Json => println!("{}", Exporter::to_json(&view)?),
            }
        }
        Some(Commands::Tags) => {
            let catalog = Catalog::load(catalog_path)?;
            let counts = tag_counts(&catalog);
            for tag in collect_tags(&catalog) {
                println!("{:<20} {}", tag, counts.get(tag).copied().unwrap_or(0));
            }
        }
        Some(Commands::Export { path, query, tag }) => {
            let catalog = Catalog::load(catalog_path)?;
            let view = filter(&catalog, &query, tag.as_deref());
            Exporter::export_to_file(&view, &path)?;

            let format = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(ExportFormat::from_extension)
                .map(|f| f.extension())
                .unwrap_or("?");
            println!(
                "Wrote {} to {} ({})",
                pluralize_sources(view.source_count()),
                path.display(),
                format
            );
        }
        Some(Commands::Validate { path }) => {
            validate(path.as_deref().or(catalog_path))?;
        }
        Some(Commands::Stats) => {
            let catalog = Catalog::load(catalog_path)?;
            println!("Categories: {}", catalog.categories.len());
            println!("Indicators: {}", catalog.indicator_count());
            println!("Sources:    {}", catalog.source_count());
            println!("Tags:       {}", collect_tags(&catalog).len());
            for category in &catalog.categories {
                let sources: usize = category.indicators.iter().map(|i| i.source_count()).sum();
                println!("  {:<14} {}", category.title, pluralize_sources(sources));
            }
        }
    }

    Ok(())
}

/// Parse a catalog without bailing on the first problem, then list every issue
fn validate(path: Option<&Path>) -> anyhow::Result<()> {
    let catalog = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            match path.extension().and_then(|e| e.to_str()) {
                Some("json") => Catalog::from_json_str(&contents)?,
                _ => Catalog::from_toml_str(&contents)?,
            }
        }
        None => Catalog::builtin()?,
    };

    let issues = catalog.validate();
    if issues.is_empty() {
        println!(
            "OK: {} categories, {} indicators, {}",
            catalog.categories.len(),
            catalog.indicator_count(),
            pluralize_sources(catalog.source_count())
        );
        Ok(())
    } else {
        for issue in &issues {
            println!("- {}", issue);
        }
        anyhow::bail!("{} issue(s) found", issues.len())
    }
}

fn print_view(view: &FilteredCatalog<'_>) {
    if view.is_empty() {
        println!("No matches found");
        println!("Try adjusting your search or clearing the tag filter to see more sources.");
        return;
    }

    for c in &view.categories {
        println!("{}", c.category.title);
        println!("  {}", c.category.description);

        for i in &c.indicators {
            println!();
            println!("  {} ({})", i.indicator.title, pluralize_sources(i.sources.len()));

            for source in &i.sources {
                println!("    * {} [{}]", source.name, source.provider);
                for field in SourceField::CARD {
                    println!("        {:<17} {}", field.label(), field.value(source));
                }
                for endpoint in &source.access {
                    println!(
                        "        {:<9} {} <{}>",
                        endpoint.kind,
                        link_label(endpoint),
                        endpoint.url
                    );
                }
                if !source.tags().is_empty() {
                    let tags: Vec<_> = source.tags().iter().map(|t| format!("#{}", t)).collect();
                    println!("        {}", tags.join(" "));
                }
            }
        }
        println!();
    }
}
