//! Card Enrich
//!
//! Enriches the devotional card spreadsheet with icons and verse text and
//! writes the cards as JSON for the site build.

use card_enrich::config::{
    DEFAULT_BIBLE_API_URL, DEFAULT_CACHE_DIR, DEFAULT_IMAGE_SEARCH_URL, DEFAULT_NOUN_PROJECT_URL,
};
use card_enrich::{CacheStore, Config, Credentials, Endpoints, FileCache, RecordAssembler};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Resolve icons and verses for every card in a CSV spreadsheet
#[derive(Parser, Debug)]
#[command(name = "card_enrich")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the source CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for cached provider responses
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Enable diagnostic logging
    #[arg(long, env = "CARD_ENRICH_DEBUG")]
    debug: bool,

    /// Per-request timeout in seconds (0 waits indefinitely)
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum rows resolved at once (default: all rows together)
    #[arg(long)]
    max_concurrent_rows: Option<usize>,

    #[arg(long, env = "NOUN_PROJECT_KEY", hide_env_values = true)]
    noun_project_key: Option<String>,

    #[arg(long, env = "NOUN_PROJECT_SECRET", hide_env_values = true)]
    noun_project_secret: Option<String>,

    #[arg(long, env = "BIBLE_API_KEY", hide_env_values = true)]
    bible_api_key: Option<String>,

    #[arg(long, env = "RAPID_API_KEY", hide_env_values = true)]
    rapid_api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_NOUN_PROJECT_URL)]
    noun_project_url: String,

    #[arg(long, default_value = DEFAULT_IMAGE_SEARCH_URL)]
    image_search_url: String,

    #[arg(long, default_value = DEFAULT_BIBLE_API_URL)]
    bible_api_url: String,
}

impl Args {
    /// Validate secrets and build the run configuration
    fn config(&self) -> card_enrich::Result<Config> {
        let credentials = Credentials::new(
            self.noun_project_key.clone(),
            self.noun_project_secret.clone(),
            self.bible_api_key.clone(),
            self.rapid_api_key.clone(),
        )?;

        let mut config = Config::new(credentials);
        config.endpoints = Endpoints {
            noun_project: self.noun_project_url.clone(),
            image_search: self.image_search_url.clone(),
            bible: self.bible_api_url.clone(),
        };
        config.cache_dir = self.cache_dir.clone();
        config.request_timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        config.max_concurrent_rows = self.max_concurrent_rows;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> card_enrich::Result<()> {
    let config = args.config()?;

    log::info!("Starting card_enrich...");
    log::info!("Cache directory: {}", config.cache_dir.display());

    let cache: Arc<dyn CacheStore> = Arc::new(FileCache::new(&config.cache_dir));
    let assembler = RecordAssembler::from_config(&config, cache)?;
    let records = assembler.assemble_file(&args.input).await?;

    let with_icons = records.iter().filter(|r| r.icon_url.is_some()).count();
    log::info!(
        "Enriched {} cards ({} with icons)",
        records.len(),
        with_icons
    );

    let json = serde_json::to_string_pretty(&records)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Wrote cards to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
