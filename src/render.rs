// src/render.rs
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::{fs, path::Path};

use crate::models::CountryTable;
use crate::report::{format_average, round_to, Report};

pub fn render_report_text(r: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("Average sentiment of all tweets: {}\n", format_average(r.average_sentiment)));
    out.push_str(&format!("Total number of tweets: {}\n", r.total_posts));
    out.push_str(&format!("Number of positive tweets: {}\n", r.positive_count));
    out.push_str(&format!("Number of negative tweets: {}\n", r.negative_count));
    out.push_str(&format!("Number of neutral tweets: {}\n", r.neutral_count));
    out.push_str(&format!("Number of favorited tweets: {}\n", r.favorited_count));
    out.push_str(&format!(
        "Average sentiment of favorited tweets: {}\n",
        format_average(r.average_sentiment_favorited)
    ));
    out.push_str(&format!("Number of retweeted tweets: {}\n", r.retweeted_count));
    out.push_str(&format!(
        "Average sentiment of retweeted tweets: {}\n",
        format_average(r.average_sentiment_retweeted)
    ));
    out.push_str(&format!(
        "Top five countries by average sentiment: {}\n",
        r.top_five_countries.join(", ")
    ));
    out
}

pub fn write_report_text(r: &Report, path: &Path) -> Result<()> {
    fs::write(path, render_report_text(r)).with_context(|| format!("write report {}", path.display()))
}

#[derive(Serialize)]
struct VCountry<'a> {
    country: &'a str,
    cumulative_score: i128,
    post_count: u64,
    average_score: f64,
}

#[derive(Serialize)]
struct VExport<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a Report,
    countries: Vec<VCountry<'a>>, // first-appearance order, sentinel included
}

pub fn render_report_json(r: &Report, countries: &CountryTable, decimals: u32) -> Result<String> {
    let export = VExport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        report: r,
        countries: countries
            .iter()
            .map(|s| VCountry {
                country: &s.country,
                cumulative_score: s.cumulative_score,
                post_count: s.post_count,
                average_score: round_to(s.average_score(), decimals),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn write_report_json(r: &Report, countries: &CountryTable, decimals: u32, path: &Path) -> Result<()> {
    let json = render_report_json(r, countries, decimals)?;
    fs::write(path, json).with_context(|| format!("write json {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report {
            average_sentiment: 0.33,
            total_posts: 3,
            positive_count: 1,
            negative_count: 1,
            neutral_count: 1,
            favorited_count: 1,
            average_sentiment_favorited: -1.0,
            retweeted_count: 1,
            average_sentiment_retweeted: 2.0,
            top_five_countries: vec!["US".into(), "CA".into()],
        }
    }

    #[test]
    fn text_report_has_ten_labelled_lines() {
        let text = render_report_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Average sentiment of all tweets: 0.33",
                "Total number of tweets: 3",
                "Number of positive tweets: 1",
                "Number of negative tweets: 1",
                "Number of neutral tweets: 1",
                "Number of favorited tweets: 1",
                "Average sentiment of favorited tweets: -1.0",
                "Number of retweeted tweets: 1",
                "Average sentiment of retweeted tweets: 2.0",
                "Top five countries by average sentiment: US, CA",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn json_export_lists_every_country() {
        let mut table = CountryTable::new();
        table.record("US", 2);
        table.record("NULL", 5);
        table.record("US", -1);

        let json = render_report_json(&sample(), &table, 2).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["total_posts"], 3);
        assert_eq!(v["top_five_countries"][0], "US");
        assert_eq!(v["countries"][0]["country"], "US");
        assert_eq!(v["countries"][0]["average_score"], 0.5);
        assert_eq!(v["countries"][1]["country"], "NULL");
        assert!(v["generated_at"].is_string());
    }

    #[test]
    fn writes_text_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report_text(&sample(), &path).unwrap();
        let back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(back.lines().count(), 10);
    }
}
