//! Sentiment CLI: print the dashboard screens from the configured CSV snapshots.
//!
//! Commands:
//! - `home`: sector heatmap plus the latest bullish and bearish news
//! - `sector`: deep-dive for one sector with per-model verdicts
//! - `news`: filtered news browser
//!
//! Every command accepts `--json` to print the view model instead of text.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentiment_core::dashboard::{HomeView, NewsCard, NewsCenterView, SectorDetailView};
use sentiment_core::{Dashboard, DashboardConfig, NewsQuery, SentimentBucket};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentiment", about = "Market sentiment dashboard in the terminal")]
struct Cli {
    /// Path to a TOML config file. Defaults to the built-in layout.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the view as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sector heatmap and market movers.
    Home {
        /// Case-insensitive keyword matched against title and content.
        #[arg(long)]
        keyword: Option<String>,

        /// Sector tags to keep (any match).
        #[arg(long = "sector")]
        sectors: Vec<String>,
    },
    /// Sector deep-dive. Defaults to the first sector alphabetically.
    Sector {
        name: Option<String>,
    },
    /// News center.
    News {
        #[arg(long)]
        keyword: Option<String>,

        #[arg(long = "sector")]
        sectors: Vec<String>,

        /// all, bullish, bearish or neutral.
        #[arg(long, default_value = "all")]
        bucket: SentimentBucket,

        /// Maximum number of cards. Defaults to the configured limit.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(config = ?cli.config, json = cli.json, "starting");

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let dashboard = Dashboard::new(config);

    match cli.command {
        Commands::Home { keyword, sectors } => {
            let view = dashboard.home(&build_query(keyword, sectors, SentimentBucket::All));
            emit(cli.json, &view, print_home)
        }
        Commands::Sector { name } => match dashboard.sector_detail(name.as_deref()) {
            Some(view) => emit(cli.json, &view, print_sector),
            None => {
                if let Some(message) = dashboard.sector_detail_diagnostic() {
                    eprintln!("Warning: {message}");
                }
                println!("No sector history available.");
                Ok(())
            }
        },
        Commands::News {
            keyword,
            sectors,
            bucket,
            limit,
        } => {
            let view = dashboard.news_center(&build_query(keyword, sectors, bucket), limit);
            emit(cli.json, &view, print_news_center)
        }
    }
}

fn build_query(keyword: Option<String>, sectors: Vec<String>, bucket: SentimentBucket) -> NewsQuery {
    NewsQuery {
        keyword,
        sectors,
        bucket,
    }
}

fn emit<T: Serialize>(json: bool, view: &T, print: fn(&T)) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(view).context("Failed to serialize view")?;
        println!("{out}");
    } else {
        print(view);
    }
    Ok(())
}

fn warn_all(diagnostics: &[String]) {
    for message in diagnostics {
        eprintln!("Warning: {message}");
    }
}

fn print_home(view: &HomeView) {
    warn_all(&view.diagnostics);

    match view.as_of {
        Some(date) => println!("Sector heatmap (as of {})", date.format("%d %b %Y")),
        None => println!("Sector heatmap"),
    }
    if view.heatmap.is_empty() {
        println!("  No sector data.");
    }
    println!("{:<24} {:>6} {:>7}  {:<10} {}", "Sector", "Score", "Volume", "Outlook", "Color");
    println!("{}", "-".repeat(60));
    for tile in &view.heatmap {
        println!(
            "{:<24} {:>6.2} {:>7}  {:<10} {}",
            tile.sector,
            tile.health_score,
            tile.news_volume,
            tile.outlook.as_str(),
            tile.color
        );
    }

    println!();
    println!("Found {} news items.", view.match_count);
    print_movers("Bullish", &view.bullish);
    print_movers("Bearish", &view.bearish);
}

fn print_movers(title: &str, cards: &[NewsCard]) {
    println!();
    println!("{title}");
    if cards.is_empty() {
        println!("  No news in this category.");
    }
    for card in cards {
        print_card(card, "%d %b %H:%M");
    }
}

fn print_card(card: &NewsCard, date_format: &str) {
    let date = card
        .published_at
        .map(|d| d.format(date_format).to_string())
        .unwrap_or_default();
    let source = if card.source.is_empty() { "Unknown" } else { card.source.as_str() };
    println!("  [{:.1}] {}", card.sentiment_score, card.title);
    println!("        {source} • {date} • {}", card.sectors.join(", "));
    if !card.excerpt.is_empty() {
        println!("        {}", card.excerpt);
    }
    if let Some(summary) = &card.ai_summary {
        println!("        AI: {summary}");
    }
}

fn print_sector(view: &SectorDetailView) {
    let date = view
        .as_of
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "undated".to_string());
    println!("{} ({date})", view.sector);
    println!(
        "  Health {:.2} ({:?}, {})  Outlook {}  Volume {}",
        view.health_score, view.band, view.band_color, view.outlook, view.news_volume
    );

    println!();
    println!("Trend");
    for point in &view.trend {
        let date = point.date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  {date:<12} {:>5.2}", point.health_score);
    }

    println!();
    println!("AI investment strategy");
    if view.verdicts.is_empty() {
        println!("  No model verdicts.");
    }
    for card in &view.verdicts {
        println!("  {:<12} {:<12} {:>4.1}  {}", card.nickname, card.label, card.score, card.full_name);
        let reason = card.reason.as_deref().unwrap_or("No analysis provided by this model.");
        println!("      {reason}");
    }
}

fn print_news_center(view: &NewsCenterView) {
    warn_all(&view.diagnostics);
    println!("Latest news ({} items)", view.total);
    for card in &view.items {
        print_card(card, "%d %b %Y %H:%M");
    }
}
