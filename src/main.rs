// src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use seo_compare::config::Config;
use seo_compare::lifecycle::{build_analyzer, init_logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "On-page SEO analysis with competitor comparison", long_about = None)]
struct Args {
    /// Page to analyze; https:// is assumed when no scheme is given
    url: String,

    /// Competitor page to compare against
    #[arg(short, long)]
    competitor: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the PageSpeed Insights call
    #[arg(long)]
    no_performance: bool,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if args.no_performance {
        config.pagespeed.enabled = false;
    }

    let analyzer = build_analyzer(&config)?;
    let report = analyzer
        .analyze(&args.url, args.competitor.as_deref())
        .await
        .with_context(|| format!("Could not analyze {}", args.url))?;

    let json = if args.compact {
        serde_json::to_string(report.as_ref())
    } else {
        serde_json::to_string_pretty(report.as_ref())
    }
    .context("Failed to serialize report")?;
    println!("{}", json);

    Ok(())
}
