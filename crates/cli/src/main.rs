use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{load_trending, EngineConfig, RecommendationAggregator, RecommendationReport};
use rand::seq::IndexedRandom;
use sources::SnapshotCatalog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};
use watch_history::codec::{self, Decoded};
use watch_history::{HistoryStore, InMemoryHistoryStore, Title};

/// Content Advisor - movie and series recommendations from watch history
#[derive(Parser)]
#[command(name = "content-advisor")]
#[command(about = "Recommends movies and series based on what a user has watched", long_about = None)]
struct Cli {
    /// JSON file mapping user keys to encoded watch lines
    #[arg(long, default_value = "data/history.json")]
    history_file: PathBuf,

    /// Catalog snapshot JSON used to answer lookups
    #[arg(long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Per-lookup timeout in milliseconds (overrides ADVISOR_LOOKUP_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get personalized recommendations for a user
    Recommend {
        /// User key (e.g. an email address)
        #[arg(long)]
        user: String,

        /// Print the ranked lists as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the trending movies and series
    Trending {
        /// Print the trending lists as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's decoded watch history
    History {
        #[arg(long)]
        user: String,
    },

    /// Add an encoded watch line to a user's history
    Watch {
        #[arg(long)]
        user: String,

        /// Line in `id:title:poster:rating:overview:year:kind` form
        #[arg(long)]
        record: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_lookup_timeout(Duration::from_millis(timeout_ms));
    }

    match cli.command {
        Commands::Recommend { user, json } => {
            let store = load_store(&cli.history_file)?;
            let catalog = load_catalog(&cli.catalog)?;
            handle_recommend(&store, catalog, config, &user, json).await?
        }
        Commands::Trending { json } => {
            let catalog = load_catalog(&cli.catalog)?;
            handle_trending(&catalog, &config, json).await?
        }
        Commands::History { user } => {
            let store = load_store(&cli.history_file)?;
            handle_history(&store, &user)?
        }
        Commands::Watch { user, record } => handle_watch(&cli.history_file, &user, &record)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let store = Arc::new(load_store(&cli.history_file)?);
            let catalog = load_catalog(&cli.catalog)?;
            handle_benchmark(store, catalog, config, requests, concurrent).await?
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<InMemoryHistoryStore> {
    InMemoryHistoryStore::load_from_file(path)
        .with_context(|| format!("Failed to load history file {}", path.display()))
}

fn load_catalog(path: &Path) -> Result<Arc<SnapshotCatalog>> {
    let start = Instant::now();
    let catalog = SnapshotCatalog::load_from_file(path)?;
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());
    Ok(Arc::new(catalog))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    store: &InMemoryHistoryStore,
    catalog: Arc<SnapshotCatalog>,
    config: EngineConfig,
    user: &str,
    json: bool,
) -> Result<()> {
    let aggregator = RecommendationAggregator::new(catalog, config);
    let report = aggregator.recommend_for_user(store, user).await?;
    debug!(
        "{} seeds, {} failed lookups",
        report.seeds.len(),
        report.failures.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report.ranked)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

/// Handle the 'trending' command
async fn handle_trending(catalog: &SnapshotCatalog, config: &EngineConfig, json: bool) -> Result<()> {
    let (trending, error) = load_trending(catalog, config).await;
    if let Some(e) = error {
        println!("{} Popular titles unavailable: {}", "!".yellow(), e);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&trending)?);
        return Ok(());
    }

    print_titles("Trending Movies", &trending.movies);
    print_titles("Trending Series", &trending.series);
    Ok(())
}

/// Handle the 'history' command
fn handle_history(store: &InMemoryHistoryStore, user: &str) -> Result<()> {
    let batch = store.decode_user(user)?;

    println!("{}", format!("Watch history for {}", user).bold().blue());
    if batch.records.is_empty() {
        println!("  (nothing watched yet)");
    }
    for (idx, record) in batch.records.iter().enumerate() {
        let year = if record.year.is_empty() { "-" } else { record.year.as_str() };
        println!(
            "{}. [{}] {} ({}) - {:.1}",
            (idx + 1).to_string().green(),
            record.kind,
            record.title,
            year,
            record.rating
        );
    }

    if batch.legacy_count > 0 {
        println!("{}Legacy lines: {}", "• ".cyan(), batch.legacy_count);
    }
    for (line, reason) in &batch.skipped {
        println!("{}Skipped line {}: {}", "• ".yellow(), line + 1, reason);
    }
    Ok(())
}

/// Handle the 'watch' command
fn handle_watch(history_file: &Path, user: &str, line: &str) -> Result<()> {
    let record = match codec::decode(line) {
        Decoded::Full(record) | Decoded::Legacy(record) => record,
        Decoded::Malformed(e) => bail!("Cannot add watch line: {}", e),
    };

    let store = load_store(history_file)?;
    if store.mark_watched(user, &record)? {
        store
            .save_to_file(history_file)
            .with_context(|| format!("Failed to save history file {}", history_file.display()))?;
        info!("Saved {} after adding title {}", history_file.display(), record.id);
        println!("{} Added '{}' to {}'s history", "✓".green(), record.title, user);
    } else {
        println!("'{}' is already in {}'s history", record.title, user);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    store: Arc<InMemoryHistoryStore>,
    catalog: Arc<SnapshotCatalog>,
    config: EngineConfig,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let users = store.user_keys()?;
    if users.is_empty() {
        return Err(anyhow!("History file has no users to benchmark with"));
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let aggregator = RecommendationAggregator::new(catalog, config);
    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));

    // Pick random users from the history file
    let picks: Vec<String> = {
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| users.choose(&mut rng).cloned())
            .collect()
    };

    info!(
        "Benchmarking {} requests over {} users ({} concurrent)",
        picks.len(),
        users.len(),
        concurrent.max(1)
    );
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for user in picks {
        let aggregator = aggregator.clone();
        let store = store.clone();
        let limiter = limiter.clone();
        let handle = tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let start = Instant::now();
            aggregator.recommend_for_user(store.as_ref(), &user).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    let percentile = |p: f64| {
        let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[idx]
    };
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_report(report: &RecommendationReport) {
    for seed in [report.last_watched.movie, report.last_watched.series]
        .into_iter()
        .flatten()
    {
        println!("{}Last watched {}: {}", "• ".cyan(), seed.kind, seed.id);
    }

    if let Some(unavailable) = &report.unavailable {
        println!("{} {}", "!".red(), unavailable);
    } else if let Some(e) = report.last_error() {
        println!(
            "{} {} of {} lookups failed (last: {})",
            "!".yellow(),
            report.failures.len(),
            report.seeds.len(),
            e
        );
    }

    print_titles("Recommended Movies", &report.ranked.movies);
    print_titles("Recommended Series", &report.ranked.series);
}

/// Helper function to format and print a title list
fn print_titles(header: &str, titles: &[Title]) {
    println!("{}", format!("{}:", header).bold().blue());
    if titles.is_empty() {
        println!("  (none)");
        return;
    }
    for (idx, title) in titles.iter().enumerate() {
        let year = title.year();
        println!(
            "{}. {} ({}) - Rating: {:.1}",
            (idx + 1).to_string().green(),
            title.name,
            if year.is_empty() { "-" } else { year },
            title.rating
        );
    }
}
