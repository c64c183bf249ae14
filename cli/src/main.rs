use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::{load_catalog, FilterSelection, SearchEngine, DEFAULT_SUGGESTION_LIMIT};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Query a course catalog: full-text search, suggestions and facets", long_about = None)]
struct Cli {
    /// Catalog file (.json/.jsonl) or directory of catalog files
    #[arg(long, global = true, default_value = "./catalog.json")]
    catalog: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search titles, categories and instructors, optionally narrowed by facets
    Search {
        /// Free-text query; empty lists everything that passes the filters
        #[arg(default_value = "")]
        query: String,
        /// Category facet id (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Duration bucket: short, medium or long (repeatable)
        #[arg(long = "duration")]
        durations: Vec<String>,
        /// Level: beginner, intermediate or advanced (repeatable)
        #[arg(long = "level")]
        levels: Vec<String>,
    },
    /// Suggest course titles for a partial query
    Suggest {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
    /// List facet options with corpus-wide counts
    Facets,
    /// Print catalog statistics
    Stats,
}

#[derive(Serialize)]
struct Stats {
    documents: usize,
    categories: usize,
    total_minutes: u64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let engine = SearchEngine::new(load_catalog(&cli.catalog)?);

    let output = match cli.command {
        Commands::Search { query, categories, durations, levels } => {
            tracing::debug!(%query, "running search");
            let selection = FilterSelection::new()
                .with_categories(categories)
                .with_durations(durations)
                .with_levels(levels);
            serde_json::to_string_pretty(&engine.search(&query, &selection))?
        }
        Commands::Suggest { query, limit } => serde_json::to_string_pretty(&engine.suggestions(&query, limit))?,
        Commands::Facets => serde_json::to_string_pretty(&serde_json::json!({
            "categories": engine.categories(),
            "durations": engine.durations(),
            "levels": engine.levels(),
        }))?,
        Commands::Stats => serde_json::to_string_pretty(&stats(&engine))?,
    };
    println!("{output}");
    Ok(())
}

fn stats(engine: &SearchEngine) -> Stats {
    Stats {
        documents: engine.len(),
        categories: engine.categories().len(),
        total_minutes: engine.documents().iter().map(|d| u64::from(d.duration_minutes())).sum(),
    }
}
