use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use playlist_overlap::{AppState, ComparisonResult, Config, PlaylistComparator, create_router};

#[derive(Parser)]
#[command(name = "playlist-overlap")]
#[command(about = "Compare the track sets of two Yandex Music playlists")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (defaults to BIND_ADDR or 127.0.0.1:8000)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Compare two playlists once and print the result
    Compare {
        /// First playlist URL
        url_a: String,

        /// Second playlist URL
        url_b: String,

        /// Maximum number of shared tracks to list
        #[arg(long)]
        limit: Option<usize>,

        /// Print the raw JSON result instead of a summary
        #[arg(long)]
        json: bool,

        /// Save the JSON result under comparison_results/
        #[arg(long)]
        save: bool,
    },
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let mut config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            serve(&config).await?;
        }
        Commands::Compare {
            url_a,
            url_b,
            limit,
            json,
            save,
        } => {
            compare(&config, &url_a, &url_b, limit, json, save).await?;
        }
    }

    Ok(())
}

async fn serve(config: &Config) -> Result<()> {
    let comparator =
        PlaylistComparator::from_config(config).context("Failed to initialize comparator")?;
    let app = create_router(AppState::new(Arc::new(comparator)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn compare(
    config: &Config,
    url_a: &str,
    url_b: &str,
    limit: Option<usize>,
    json: bool,
    save: bool,
) -> Result<()> {
    let comparator =
        PlaylistComparator::from_config(config).context("Failed to initialize comparator")?;

    let result = comparator
        .compare_urls(url_a, url_b, limit)
        .await
        .context("Comparison failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    if save {
        save_comparison_result(&result)?;
    }

    Ok(())
}

fn save_comparison_result(result: &ComparisonResult) -> Result<()> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let results_dir = Path::new("comparison_results");

    fs::create_dir_all(results_dir)?;

    let filename = results_dir.join(format!("comparison_{}.json", timestamp));
    let json = serde_json::to_string_pretty(result)?;

    fs::write(&filename, json)?;

    println!("\n{} {}", "Saved to".cyan(), filename.display());

    Ok(())
}

fn print_summary(result: &ComparisonResult) {
    println!("{}", "Playlist Comparison".cyan().bold());
    println!("{}", "=".repeat(60));

    for (label, playlist) in [("A", &result.playlist_a), ("B", &result.playlist_b)] {
        println!(
            "{}: {} by {} (kind {}, {} tracks)",
            label,
            playlist.title.green(),
            playlist.owner,
            playlist.kind,
            playlist.track_count
        );
    }

    println!("{}", "=".repeat(60));
    println!(
        "Shared tracks: {} of {} distinct",
        result.counts.intersection.to_string().green(),
        result.counts.union
    );

    let metrics = &result.metrics;
    let jaccard = format!("{:.1}%", metrics.jaccard * 100.0);
    let jaccard = if metrics.jaccard >= 0.5 {
        jaccard.green()
    } else if metrics.jaccard >= 0.2 {
        jaccard.yellow()
    } else {
        jaccard.red()
    };
    println!("Jaccard:        {}", jaccard);
    println!("Overlap:        {:.1}%", metrics.overlap * 100.0);
    println!("Containment A:  {:.1}%", metrics.containment_a * 100.0);
    println!("Containment B:  {:.1}%", metrics.containment_b * 100.0);

    if result.common_tracks.is_empty() {
        println!("\n{}", "No tracks in common".yellow());
        return;
    }

    println!("\nCommon tracks:");
    for (i, track) in result.common_tracks.iter().enumerate() {
        let artists = if track.artists.is_empty() {
            "Unknown artist".to_string()
        } else {
            track.artists.join(", ")
        };
        println!("{:4}. {} - {}", i + 1, artists.cyan(), track.title);
    }

    if result.total_common > result.common_tracks.len() {
        println!(
            "{}",
            format!(
                "... and {} more",
                result.total_common - result.common_tracks.len()
            )
            .yellow()
        );
    }
}
