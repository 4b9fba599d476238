use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::aggregate::{aggregate, aggregate_parallel};
use crate::config::ReportConfig;
use crate::load::{read_lexicon, read_posts};
use crate::render::{write_report_json, write_report_text};
use crate::report::{Report, ReportError};

#[derive(Debug, Clone)]
pub struct RunPaths {
    pub keywords: PathBuf,
    pub tweets: PathBuf,
    pub output: PathBuf,
    pub json: Option<PathBuf>,
}

pub fn run_report(cfg: &ReportConfig, paths: &RunPaths) -> Result<Report> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - keywords={}, tweets={}, output={}",
        paths.keywords.display(),
        paths.tweets.display(),
        paths.output.display()
    );

    // 1) load inputs
    let lexicon = read_lexicon(&paths.keywords).context("loading keywords")?;
    let posts = read_posts(&paths.tweets).context("loading tweets")?;

    // 2) caller preconditions: nothing to divide by
    if lexicon.is_empty() || posts.is_empty() {
        error!(
            "Empty input - keywords={}, tweets={}",
            lexicon.len(),
            posts.len()
        );
        let why = if posts.is_empty() {
            ReportError::NoPosts
        } else {
            ReportError::EmptyLexicon
        };
        bail!("Tweet list or keyword dictionary is empty! ({})", why);
    }

    // 3) score + aggregate
    let agg_start = std::time::Instant::now();
    let opts = cfg.rank_options();
    debug!(
        "Aggregating - parallel={}, top={}, sentinel={}, tie_break={:?}",
        cfg.parallel, opts.limit, opts.sentinel, opts.tie_break
    );
    let outcome = if cfg.parallel {
        aggregate_parallel(&posts, &lexicon, &opts)
    } else {
        aggregate(&posts, &lexicon, &opts)
    };
    let (report, countries) = match outcome {
        Ok(v) => v,
        Err(e) => {
            error!("Aggregation failed - {}", e);
            return Err(e).context("building report");
        }
    };
    if let Some(unknown) = countries.get(&opts.sentinel) {
        debug!(
            "Unranked sentinel country - country={}, posts={}",
            unknown.country, unknown.post_count
        );
    }
    info!(
        "Aggregation completed - duration={:.2}s, posts={}, countries={}, avg={}",
        agg_start.elapsed().as_secs_f32(),
        report.total_posts,
        countries.len(),
        report.average_sentiment
    );

    // 4) persist
    write_report_text(&report, &paths.output)?;
    debug!("Wrote {}", paths.output.display());
    if let Some(json_path) = &paths.json {
        write_report_json(&report, &countries, cfg.decimals, json_path)?;
        debug!("Wrote {}", json_path.display());
    }

    info!(
        "Pipeline completed successfully - total_duration={:.2}s",
        pipeline_start.elapsed().as_secs_f32()
    );
    Ok(report)
}
