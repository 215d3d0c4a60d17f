use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analysis::highlights::DEFAULT_HIGHLIGHTS;
use crate::analysis::pipeline::{AnalyzerOptions, DEFAULT_MAX_RECORDS_LIMIT};
use crate::records::bluesky::BlueskySearchSource;
use crate::records::client::DEFAULT_PUBLIC_API_URL;
use crate::records::csv::CsvSource;
use crate::records::sample::SampleSource;
use crate::records::RecordSource;

/// Records fetched per query when the caller doesn't say.
pub const DEFAULT_MAX_RECORDS: usize = 500;

/// Where topic queries get their records from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    /// Template-generated posts (default). No network, no files.
    Sample,
    /// Live public search on Bluesky.
    Bluesky,
    /// A local CSV export (SENTISCOPE_CSV_PATH).
    Csv,
}

impl std::str::FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "sample" => Ok(SourceKind::Sample),
            "bluesky" => Ok(SourceKind::Bluesky),
            "csv" => Ok(SourceKind::Csv),
            other => anyhow::bail!(
                "Unknown SENTISCOPE_SOURCE '{other}'. Expected sample, bluesky or csv."
            ),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so everything here can
/// also live there.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceKind,
    /// Public AT Protocol API endpoint (defaults to https://public.api.bsky.app).
    pub public_api_url: String,
    pub csv_path: Option<PathBuf>,
    pub remove_stopwords: bool,
    /// Highlights kept per sentiment label.
    pub highlights: usize,
    pub default_max_records: usize,
    /// Largest record count a single query may request.
    pub max_records_limit: usize,
    /// Fixes the sample generator's output when set.
    pub sample_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Sample,
            public_api_url: DEFAULT_PUBLIC_API_URL.to_string(),
            csv_path: None,
            remove_stopwords: false,
            highlights: DEFAULT_HIGHLIGHTS,
            default_max_records: DEFAULT_MAX_RECORDS,
            max_records_limit: DEFAULT_MAX_RECORDS_LIMIT,
            sample_seed: None,
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{name}='{v}' is invalid: {e}")),
        _ => Ok(None),
    }
}

fn parse_flag(name: &str) -> bool {
    matches!(
        env::var(name).map(|v| v.trim().to_lowercase()).as_deref(),
        Ok("1" | "true" | "yes" | "on")
    )
}

impl Config {
    /// Load configuration from environment variables. Unset values fall
    /// back to defaults; malformed values are errors.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let source = env::var("SENTISCOPE_SOURCE")
            .unwrap_or_default()
            .parse::<SourceKind>()?;

        Ok(Self {
            source,
            public_api_url: env::var("PUBLIC_API_URL").unwrap_or(defaults.public_api_url),
            csv_path: env::var("SENTISCOPE_CSV_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            remove_stopwords: parse_flag("SENTISCOPE_REMOVE_STOPWORDS"),
            highlights: parse_var("SENTISCOPE_HIGHLIGHTS")?.unwrap_or(defaults.highlights),
            default_max_records: parse_var("SENTISCOPE_DEFAULT_MAX_RECORDS")?
                .unwrap_or(defaults.default_max_records),
            max_records_limit: parse_var("SENTISCOPE_MAX_RECORDS_LIMIT")?
                .unwrap_or(defaults.max_records_limit),
            sample_seed: parse_var("SENTISCOPE_SAMPLE_SEED")?,
        })
    }

    /// Check that the CSV source has a readable file.
    pub fn require_csv(&self) -> Result<&PathBuf> {
        let Some(path) = self.csv_path.as_ref() else {
            anyhow::bail!(
                "SENTISCOPE_CSV_PATH not set. It is required when SENTISCOPE_SOURCE=csv.\n\
                 Add it to your .env file."
            );
        };
        if !path.is_file() {
            anyhow::bail!(
                "SENTISCOPE_CSV_PATH points to {}, which is not a readable file.",
                path.display()
            );
        }
        Ok(path)
    }

    /// Check that the default record count is usable and within the limit.
    pub fn require_max_records(&self) -> Result<()> {
        if self.default_max_records == 0 {
            anyhow::bail!("SENTISCOPE_DEFAULT_MAX_RECORDS must be at least 1.");
        }
        if self.default_max_records > self.max_records_limit {
            anyhow::bail!(
                "SENTISCOPE_DEFAULT_MAX_RECORDS ({}) exceeds SENTISCOPE_MAX_RECORDS_LIMIT ({}).",
                self.default_max_records,
                self.max_records_limit
            );
        }
        Ok(())
    }

    /// Build the configured record source.
    pub fn build_source(&self) -> Result<Arc<dyn RecordSource>> {
        let source: Arc<dyn RecordSource> = match self.source {
            SourceKind::Sample => Arc::new(match self.sample_seed {
                Some(seed) => SampleSource::seeded(seed),
                None => SampleSource::new(),
            }),
            SourceKind::Bluesky => Arc::new(
                BlueskySearchSource::new(&self.public_api_url)
                    .context("Failed to set up Bluesky search")?,
            ),
            SourceKind::Csv => Arc::new(CsvSource::new(self.require_csv()?.clone())),
        };
        Ok(source)
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            remove_stopwords: self.remove_stopwords,
            highlights: self.highlights,
            max_records_limit: self.max_records_limit,
        }
    }
}
