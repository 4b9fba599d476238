use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::lexicon::Lexicon;
use crate::models::{Post, SENTINEL_COUNTRY};

/// Number of positional fields in a post line.
pub const POST_FIELDS: usize = 11;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses each non-blank physical line as one record, tagged with its 1-based line number.
fn records<R: Read>(
    reader: R,
    builder: &ReaderBuilder,
    path: &Path,
) -> Result<Vec<(u64, StringRecord)>, LoadError> {
    let mut out = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let mut rdr = builder.from_reader(line.as_bytes());
        if let Some(rec) = rdr.records().next() {
            let rec = rec.map_err(|source| LoadError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            out.push((idx as u64 + 1, rec));
        }
    }
    Ok(out)
}

/// Reads a `word<TAB>weight` file into a [`Lexicon`].
pub fn read_lexicon(path: &Path) -> Result<Lexicon, LoadError> {
    let start = std::time::Instant::now();
    let lex = parse_lexicon(open(path)?, path)?;
    info!(
        "Lexicon loaded - path={}, words={}, duration={:.2}s",
        path.display(),
        lex.len(),
        start.elapsed().as_secs_f32()
    );
    Ok(lex)
}

pub fn parse_lexicon<R: Read>(reader: R, path: &Path) -> Result<Lexicon, LoadError> {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);

    let mut entries: Vec<(String, i64)> = Vec::new();
    for (line, rec) in records(reader, &builder, path)? {
        let malformed = |reason: String| LoadError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let (word, weight) = match (rec.get(0), rec.get(1)) {
            (Some(w), Some(v)) if !w.is_empty() => (w, v),
            _ => return Err(malformed("expected `word<TAB>weight`".into())),
        };
        let weight: i64 = weight
            .parse()
            .map_err(|_| malformed(format!("weight {:?} is not an integer", weight)))?;
        entries.push((word.to_string(), weight));
    }

    let total = entries.len();
    let lex = Lexicon::from_entries(entries);
    if lex.len() < total {
        debug!("Duplicate lexicon words replaced - count={}", total - lex.len());
    }
    Ok(lex)
}

/// Reads the 11-field comma-separated post file.
pub fn read_posts(path: &Path) -> Result<Vec<Post>, LoadError> {
    let start = std::time::Instant::now();
    let posts = parse_posts(open(path)?, path)?;
    let unknown = posts.iter().filter(|p| p.country == SENTINEL_COUNTRY).count();
    info!(
        "Posts loaded - path={}, posts={}, unknown_country={}, duration={:.2}s",
        path.display(),
        posts.len(),
        unknown,
        start.elapsed().as_secs_f32()
    );
    Ok(posts)
}

pub fn parse_posts<R: Read>(reader: R, path: &Path) -> Result<Vec<Post>, LoadError> {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true);

    let mut posts = Vec::new();
    for (line, rec) in records(reader, &builder, path)? {
        let malformed = |reason: String| LoadError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        if rec.len() != POST_FIELDS {
            warn!("Post line has wrong field count - line={}, fields={}", line, rec.len());
            return Err(malformed(format!(
                "expected {} fields, found {}",
                POST_FIELDS,
                rec.len()
            )));
        }

        let count = |idx: usize, name: &str| -> Result<u64, LoadError> {
            let raw = rec[idx].trim();
            raw.parse()
                .map_err(|_| malformed(format!("{} {:?} is not a non-negative integer", name, raw)))
        };
        let coord = |idx: usize, name: &str| -> Result<Option<f64>, LoadError> {
            let raw = rec[idx].trim();
            if raw == SENTINEL_COUNTRY {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|_| malformed(format!("{} {:?} is not a number", name, raw)))
        };

        posts.push(Post {
            timestamp: rec[0].to_string(),
            raw_text: rec[1].to_string(),
            author: rec[2].to_string(),
            retweet_count: count(3, "retweet count")?,
            favorite_count: count(4, "favorite count")?,
            language: rec[5].to_string(),
            country: rec[6].trim().to_string(),
            region: rec[7].to_string(),
            locality: rec[8].to_string(),
            latitude: coord(9, "latitude")?,
            longitude: coord(10, "longitude")?,
        });
    }
    Ok(posts)
}
