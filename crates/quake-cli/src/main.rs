//! Quake CLI - query the USGS earthquake feeds through the feed cache.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quake_core::{CacheSettings, FeedCache, Magnitude, Past, TtlPolicy, UsgsFeedSource};
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "quake")]
#[command(about = "Cached access to the USGS earthquake feeds")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Base URL of the GeoJSON summary feeds
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the per-window cache TTL with one value, in seconds
    #[arg(long, global = true)]
    ttl_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the earthquakes of one feed
    List {
        /// Magnitude filter (significant, 4.5, 2.5, 1.0, all)
        #[arg(short, long, default_value = "all")]
        magnitude: Magnitude,

        /// Recency window (hour, day, week, month)
        #[arg(short, long, default_value = "day")]
        past: Past,

        /// Print at most this many earthquakes
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Look up a single earthquake by identifier
    Get {
        /// Event identifier, e.g. us7000abcd
        id: String,
    },

    /// Repeatedly query one feed and report cache statistics
    Watch {
        #[arg(short, long, default_value = "all")]
        magnitude: Magnitude,

        #[arg(short, long, default_value = "hour")]
        past: Past,

        /// Seconds between rounds
        #[arg(long, default_value = "30")]
        interval_secs: u64,

        /// Number of rounds (0 = until interrupted)
        #[arg(long, default_value = "10")]
        rounds: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let source = match &args.base_url {
        Some(url) => UsgsFeedSource::with_base_url(url),
        None => UsgsFeedSource::new(),
    }
    .context("Failed to create feed source")?;
    let mut settings = CacheSettings::default();
    if let Some(secs) = args.ttl_secs {
        settings = settings.with_ttl_policy(TtlPolicy::uniform(Duration::from_secs(secs)));
    }
    let cache = FeedCache::builder(source).settings(settings).build();

    match args.command {
        Command::List {
            magnitude,
            past,
            limit,
        } => {
            let collection = cache.get_collection(magnitude, past).await?;
            info!(
                "{} earthquakes ({} / {})",
                collection.len(),
                magnitude.feed_segment(),
                past.feed_segment()
            );
            let shown = limit.unwrap_or(collection.len());
            for eq in collection.features.iter().take(shown) {
                println!(
                    "{:<14} {:>5} {} {}",
                    eq.id,
                    eq.magnitude
                        .map(|m| format!("{:.1}", m))
                        .unwrap_or_else(|| "-".to_string()),
                    eq.time.format("%Y-%m-%d %H:%M:%S"),
                    eq.place.as_deref().unwrap_or("")
                );
            }
        }
        Command::Get { id } => {
            let eq = cache
                .get_by_id(&id)
                .await
                .with_context(|| format!("Lookup of {} failed", id))?;
            println!("{}", serde_json::to_string_pretty(&eq)?);
        }
        Command::Watch {
            magnitude,
            past,
            interval_secs,
            rounds,
        } => {
            let interval = Duration::from_secs(interval_secs);
            let mut round = 0;
            while rounds == 0 || round < rounds {
                round += 1;
                match cache.get_collection(magnitude, past).await {
                    Ok(collection) => info!(round, count = collection.len(), "Collection ready"),
                    Err(e) => {
                        let status = cache.breaker_status(magnitude, past).await?;
                        let breaker = serde_json::to_string(&status)?;
                        info!(
                            round,
                            error = %e,
                            retryable = e.is_retryable(),
                            %breaker,
                            "Collection unavailable"
                        );
                    }
                }
                let stats = cache.get_stats(magnitude, past);
                info!(
                    round,
                    fetches = stats.fetch_count,
                    hits = stats.hit_count,
                    "Cache statistics"
                );
                if rounds == 0 || round < rounds {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    Ok(())
}
