//! Charnet CLI: build a character network from a Fandom wiki.
//!
//! Usage:
//!   charnet <wiki-domain> [--cache-dir dir] [--clear-cache] [--output file]

use charnet::{JsonFileCache, OpenCache, PipelineConfig, WikiClient, WikiConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "charnet",
    version,
    about = "Character co-occurrence networks from wiki biographies"
)]
struct Cli {
    /// Fandom subdomain, e.g. "harrypotter" for harrypotter.fandom.com
    wiki_domain: String,

    /// Directory holding cached responses and the built network
    #[arg(long, default_value = ".cache")]
    cache_dir: PathBuf,

    /// Remove cached entries before running
    #[arg(long)]
    clear_cache: bool,

    /// Where to write the network view
    #[arg(long, short, default_value = "network.json")]
    output: PathBuf,

    /// Delay between successive wiki requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Full api.php URL, overriding the one derived from the domain
    #[arg(long)]
    api_url: Option<String>,

    /// Category listing the characters
    #[arg(long, default_value = "Category:Characters")]
    category: String,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn title_for(domain: &str) -> String {
    let mut chars = domain.chars();
    match chars.next() {
        Some(first) => format!("{}{} Character Network", first.to_uppercase(), chars.as_str()),
        None => charnet::render::DEFAULT_TITLE.to_string(),
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut wiki = WikiConfig::for_domain(&cli.wiki_domain).with_category(cli.category);
    if let Some(api_url) = cli.api_url {
        wiki = wiki.with_api_url(api_url);
    }
    let client = WikiClient::new(wiki).map_err(|e| format!("Failed to create wiki client: {}", e))?;

    let cache = JsonFileCache::open(&cli.cache_dir)
        .map_err(|e| format!("Failed to open cache at {}: {}", cli.cache_dir.display(), e))?;

    let config = PipelineConfig::default()
        .with_clear_cache(cli.clear_cache)
        .with_delay(Duration::from_millis(cli.delay_ms))
        .with_title(title_for(&cli.wiki_domain));

    let view = charnet::run(&cache, &client, &config).map_err(|e| e.to_string())?;
    view.write_to(&cli.output)
        .map_err(|e| format!("Failed to write {}: {}", cli.output.display(), e))?;

    println!(
        "Wrote {} characters and {} connections to {}",
        view.node_count,
        view.edge_count,
        cli.output.display()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
