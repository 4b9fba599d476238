mod aggregate;
mod config;
mod lexicon;
mod load;
mod models;
mod normalize;
mod orchestrator;
mod rank;
mod render;
mod report;
mod scoring;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use config::{load_config, resolve_config_path, ReportConfig};
use orchestrator::{run_report, RunPaths};

/// Tweet Vibes - lexicon sentiment report over geotagged tweets
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Keyword lexicon, one `word<TAB>weight` per line (.tsv)
    #[arg(short, long)]
    keywords: Option<PathBuf>,

    /// Tweets, 11 comma-separated fields per line (.csv)
    #[arg(short, long)]
    tweets: Option<PathBuf>,

    /// Where to write the text report (.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the report and per-country table as JSON (.json)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Path to config file (overrides TWEET_VIBES_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Score tweets in parallel
    #[arg(long)]
    parallel: bool,
}

fn check_extension(path: &Path, ext: &str) -> Result<()> {
    let ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == ext);
    if !ok {
        bail!("Must have {} file extension!", ext);
    }
    Ok(())
}

fn prompt_path(input: &mut impl BufRead, label: &str) -> Result<PathBuf> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("reading file name")?;
    Ok(PathBuf::from(line.trim()))
}

/// Takes the path from the flag if given, otherwise asks on stdin, then checks the extension.
fn pick_path(
    given: Option<PathBuf>,
    input: &mut impl BufRead,
    label: &str,
    ext: &str,
) -> Result<PathBuf> {
    let path = match given {
        Some(p) => p,
        None => prompt_path(input, label)?,
    };
    check_extension(&path, ext)?;
    Ok(path)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!("Arguments - {:?}", args);

    let mut cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => {
            if !path.exists() {
                bail!(
                    "config not found at {}\n\
                     Use --config to specify a config file, or set TWEET_VIBES_CONFIG.\n\
                     Example config.yaml:\n\
                     sentinel_country: \"NULL\"\ntop_countries: 5\ntie_break: insertion\nparallel: false\n",
                    path.display()
                );
            }
            load_config(&path)?
        }
        None => {
            debug!("No config file, using defaults");
            ReportConfig::default()
        }
    };
    if args.parallel {
        cfg.parallel = true;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let keywords = pick_path(args.keywords, &mut input, "Input keyword filename (.tsv file): ", "tsv")?;
    let tweets = pick_path(args.tweets, &mut input, "Input tweet filename (.csv file): ", "csv")?;
    let output = pick_path(
        args.output,
        &mut input,
        "Input filename to output report in (.txt file): ",
        "txt",
    )?;
    if let Some(json) = &args.json {
        check_extension(json, "json")?;
    }

    let paths = RunPaths {
        keywords,
        tweets,
        output,
        json: args.json,
    };
    run_report(&cfg, &paths)?;

    info!("Report written - path={}", paths.output.display());
    println!("Wrote report to {}", paths.output.display());
    Ok(())
}
