// Offline batch mode: score every row of a CSV export.
//
// The input must have a `content` column; every other column is passed
// through untouched. Six columns are appended: cleaned_text,
// sentiment_compound, sentiment_positive, sentiment_negative,
// sentiment_neutral and sentiment. Rows whose text normalizes to nothing
// are dropped from the output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::analysis::aggregate::summary_stats;
use crate::analysis::models::{Distribution, Percentages};
use crate::sentiment::scorer::SentimentScorer;
use crate::text::normalize::{normalize_str, remove_stopwords};

/// Columns appended to every output row, in order.
pub const ADDED_COLUMNS: [&str; 6] = [
    "cleaned_text",
    "sentiment_compound",
    "sentiment_positive",
    "sentiment_negative",
    "sentiment_neutral",
    "sentiment",
];

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub remove_stopwords: bool,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

/// What a batch run did.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_written: usize,
    pub distribution: Distribution,
    pub percentages: Percentages,
    pub average_compound: f64,
    pub median_compound: f64,
}

/// `<dir>/<stem>_analyzed.csv` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
    input.with_file_name(format!("{stem}_analyzed.csv"))
}

pub fn process_file(scorer: &SentimentScorer, opts: &BatchOptions) -> Result<BatchSummary> {
    let mut reader = csv::Reader::from_path(&opts.input)
        .with_context(|| format!("Failed to open {}", opts.input.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", opts.input.display()))?
        .clone();
    let Some(content_idx) = headers.iter().position(|h| h.trim() == "content") else {
        anyhow::bail!(
            "'content' column not found in {}. The input needs a column named content.",
            opts.input.display()
        );
    };

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse {}", opts.input.display()))?;
    info!(rows = rows.len(), input = %opts.input.display(), "Loaded batch input");

    if let Some(dir) = opts.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(&opts.output)
        .with_context(|| format!("Failed to create {}", opts.output.display()))?;

    let mut out_headers = headers.clone();
    for column in ADDED_COLUMNS {
        out_headers.push_field(column);
    }
    writer.write_record(&out_headers)?;

    let pb = if opts.show_progress {
        ProgressBar::new(rows.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(ProgressStyle::default_bar().template("  Scoring [{bar:30}] {pos}/{len} ({eta})")?);

    let mut distribution = Distribution::default();
    let mut compounds = Vec::with_capacity(rows.len());

    for row in &rows {
        pb.inc(1);
        let content = row.get(content_idx).unwrap_or_default();
        let mut cleaned = normalize_str(content);
        if opts.remove_stopwords {
            cleaned = remove_stopwords(&cleaned);
        }
        if cleaned.is_empty() {
            continue;
        }

        let fields = scorer.score(&cleaned)?;
        distribution.increment(fields.sentiment_label);
        compounds.push(fields.compound);

        let mut out = row.clone();
        out.push_field(&cleaned);
        out.push_field(&fields.compound.to_string());
        out.push_field(&fields.positive.to_string());
        out.push_field(&fields.negative.to_string());
        out.push_field(&fields.neutral.to_string());
        out.push_field(fields.sentiment_label.as_str());
        writer.write_record(&out)?;
    }

    pb.finish_and_clear();
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", opts.output.display()))?;

    let written = compounds.len();
    let stats = summary_stats(&distribution, &compounds);

    info!(
        read = rows.len(),
        written = written,
        output = %opts.output.display(),
        "Batch scoring complete"
    );

    Ok(BatchSummary {
        output: opts.output.clone(),
        rows_read: rows.len(),
        rows_written: written,
        distribution,
        percentages: stats.percentages,
        average_compound: stats.average_compound,
        median_compound: stats.median_compound,
    })
}
