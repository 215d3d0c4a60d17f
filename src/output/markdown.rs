// Markdown report for a topic analysis.
//
// Written alongside the terminal display so results can be shared or
// committed. Tables only; charts are left to whatever renders the file.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::{single_line, truncate_chars};
use crate::analysis::models::AnalysisResult;
use crate::sentiment::scorer::Label;

/// Render the report as a Markdown string.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Sentiment report: {}\n", result.topic);
    let _ = writeln!(
        md,
        "Analyzed {} posts at {}. Dominant sentiment: **{}**.\n",
        result.total_count,
        result.analyzed_at.format("%Y-%m-%d %H:%M UTC"),
        result.dominant_sentiment
    );

    let _ = writeln!(md, "## Distribution\n");
    let _ = writeln!(md, "| Sentiment | Count | Share |");
    let _ = writeln!(md, "|---|---:|---:|");
    for label in Label::ALL {
        let _ = writeln!(
            md,
            "| {} | {} | {:.1}% |",
            label,
            result.distribution.get(label),
            result.percentages.get(label)
        );
    }
    let _ = writeln!(
        md,
        "\nAverage compound score: {:.4}. Median: {:.4}.\n",
        result.average_compound, result.median_compound
    );

    if !result.timeline.is_empty() {
        let _ = writeln!(md, "## Timeline\n");
        let _ = writeln!(md, "| Date | Positive | Negative | Neutral |");
        let _ = writeln!(md, "|---|---:|---:|---:|");
        for bucket in &result.timeline {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                bucket.date, bucket.positive_count, bucket.negative_count, bucket.neutral_count
            );
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## Highlights\n");
    for (label, records) in &result.highlights {
        let _ = writeln!(md, "### {}\n", capitalize(label.as_str()));
        if records.is_empty() {
            let _ = writeln!(md, "_None._\n");
            continue;
        }
        let _ = writeln!(md, "| User | Likes | Reposts | Score | Post |");
        let _ = writeln!(md, "|---|---:|---:|---:|---|");
        for record in records {
            let text = truncate_chars(&single_line(&record.record.content), 160).replace('|', "\\|");
            let _ = writeln!(
                md,
                "| {} | {} | {} | {:+.4} | {} |",
                record.record.username,
                record.record.like_count,
                record.record.retweet_count,
                record.scores.compound,
                text
            );
        }
        md.push('\n');
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(md, "## Suggestions\n");
        for suggestion in &result.suggestions {
            let _ = writeln!(md, "- {suggestion}");
        }
    }

    md
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Write the report to `path`, creating parent directories. Returns the path.
pub fn generate_report(result: &AnalysisResult, path: &str) -> Result<String> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    std::fs::write(path, render_report(result))
        .with_context(|| format!("Failed to write report to {path}"))?;
    Ok(path.to_string())
}
