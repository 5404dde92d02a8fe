use chrono::Utc;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use html_index_core::config::node_name;
use html_index_core::{
    build_document, extract_file, run, tokenize, top_terms, word_frequencies, ElasticsearchSink,
    Extraction, FixedDelay, IndexerConfig, Publisher, PublishTarget, TokenBucket, UrlMap,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "html-index", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the corpus and publish one document per page.
    Run {
        /// Set to false (or no, off, 0) to skip indexing entirely.
        #[arg(
            long,
            env = "RUN_INDEX",
            default_value_t = true,
            action = clap::ArgAction::Set,
            value_parser = BoolishValueParser::new()
        )]
        run_index: bool,

        /// Root directory of the stored pages.
        #[arg(long, env = "WEBPAGE_DIR")]
        dir: PathBuf,

        /// Url map file name, relative to the corpus root.
        #[arg(long, env = "WEBPAGE_JSON", default_value = "bookkeeping.json")]
        json: String,

        /// Index backend base URL
        #[arg(long, env = "INDEX_URL", default_value = "http://localhost:9200")]
        index_url: String,

        /// Index name
        #[arg(long, env = "INDEX_NAME", default_value = "html_index")]
        index_name: String,

        /// Pause after every publish, in milliseconds.
        #[arg(long, env = "INDEX_THROTTLE_MS", default_value = "100")]
        throttle_ms: u64,

        /// Burst size; when set, publishes share a token bucket refilled every `throttle_ms`.
        #[arg(long, env = "INDEX_BURST")]
        burst: Option<u32>,
    },
    /// Extract one page and print the document it would produce, without publishing.
    Inspect {
        /// HTML file to inspect.
        #[arg(long)]
        file: PathBuf,
        /// Optional url map used to resolve the page's url.
        #[arg(long)]
        url_map: Option<PathBuf>,
        /// Number of most frequent terms to print.
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "html-index boot"
    );

    match cli.command {
        Command::Run {
            run_index,
            dir,
            json,
            index_url,
            index_name,
            throttle_ms,
            burst,
        } => {
            let config = IndexerConfig::new(run_index, dir, json, &index_url)?
                .with_index_name(index_name)
                .with_throttle(Duration::from_millis(throttle_ms));
            let sink = ElasticsearchSink::new(config.index_endpoint.clone(), &config.index_name);

            let result = match burst {
                Some(capacity) => {
                    let publisher = Publisher::new(sink, TokenBucket::new(capacity, config.throttle));
                    run(&config, &publisher).await
                }
                None => {
                    let publisher = Publisher::new(sink, FixedDelay::new(config.throttle));
                    run(&config, &publisher).await
                }
            };

            let summary = result.map_err(|err| {
                error!(error = %err, "could not load url map, nothing indexed");
                anyhow::anyhow!(err.to_string())
            })?;

            info!(
                corpus = %config.corpus_dir.display(),
                files_visited = summary.files_visited,
                documents_published = summary.documents_published,
                finished_at = %Utc::now().to_rfc3339(),
                "indexing finished"
            );
        }
        Command::Inspect { file, url_map, top } => {
            inspect(&file, url_map.as_deref(), top).await?;
        }
    }

    Ok(())
}

async fn inspect(file: &Path, url_map: Option<&Path>, top: usize) -> anyhow::Result<()> {
    let url_map = match url_map {
        Some(path) => UrlMap::load(path)?,
        None => UrlMap::default(),
    };

    let fields = match extract_file(file).await? {
        Extraction::Extracted(fields) => fields,
        Extraction::Skipped(reason) => {
            println!("skipped: {reason}");
            return Ok(());
        }
    };

    let dir_name = file.parent().map(node_name).unwrap_or_default();
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let target = PublishTarget::new(dir_name, file_name);

    for (region, span) in fields.spans() {
        println!("{region}: {} tokens", tokenize(span).len());
    }

    let document = build_document(&fields, &target, &url_map);
    println!("target: {target}");
    println!("{}", serde_json::to_string_pretty(&document)?);

    let frequencies = word_frequencies(&document.tokens);
    for (term, count) in top_terms(&frequencies, top) {
        println!("  {count:>5}  {term}");
    }

    Ok(())
}
