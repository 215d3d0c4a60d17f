// Colored terminal output for analysis results, batch summaries and the
// topic catalog. main.rs delegates all display here.

use colored::{ColoredString, Colorize};

use super::{single_line, truncate_chars};
use crate::analysis::models::{AnalysisResult, Distribution, Percentages};
use crate::batch::BatchSummary;
use crate::catalog::TopicSuggestion;
use crate::sentiment::scorer::Label;

/// Width of the distribution bars, in characters.
const BAR_WIDTH: usize = 30;

fn colorize_label(label: Label) -> ColoredString {
    match label {
        Label::Positive => label.as_str().green().bold(),
        Label::Negative => label.as_str().red().bold(),
        Label::Neutral => label.as_str().yellow(),
    }
}

fn colorize_compound(compound: f64) -> ColoredString {
    let text = format!("{compound:+.4}");
    match Label::from_compound(compound) {
        Label::Positive => text.green(),
        Label::Negative => text.red(),
        Label::Neutral => text.normal(),
    }
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn display_distribution(distribution: &Distribution, percentages: &Percentages) {
    for label in Label::ALL {
        let pct = percentages.get(label);
        let bar = match label {
            Label::Positive => bar(pct).green(),
            Label::Negative => bar(pct).red(),
            Label::Neutral => bar(pct).yellow(),
        };
        println!(
            "  {:<10} {:>6}  {:>5.1}%  {}",
            colorize_label(label),
            distribution.get(label),
            pct,
            bar
        );
    }
}

/// Display a full topic analysis.
pub fn display_analysis(result: &AnalysisResult) {
    println!(
        "\n{}",
        format!("=== Sentiment for \"{}\" ({} posts) ===", result.topic, result.total_count).bold()
    );
    println!();

    display_distribution(&result.distribution, &result.percentages);
    println!();
    println!(
        "  Average compound: {}   Median compound: {}",
        colorize_compound(result.average_compound),
        colorize_compound(result.median_compound)
    );
    println!("  Dominant sentiment: {}", colorize_label(result.dominant_sentiment));

    if !result.timeline.is_empty() {
        println!("\n{}", "Timeline".bold());
        println!(
            "  {:<12} {:>8} {:>8} {:>8}",
            "Date".dimmed(),
            "Pos".dimmed(),
            "Neg".dimmed(),
            "Neu".dimmed()
        );
        for bucket in &result.timeline {
            println!(
                "  {:<12} {:>8} {:>8} {:>8}",
                bucket.date.to_string(),
                bucket.positive_count,
                bucket.negative_count,
                bucket.neutral_count
            );
        }
    }

    for (label, records) in &result.highlights {
        if records.is_empty() {
            continue;
        }
        println!("\n{} {}", "Top".bold(), colorize_label(*label));
        for record in records {
            let who = if record.record.username.is_empty() {
                "unknown".to_string()
            } else {
                format!("@{}", record.record.username)
            };
            println!(
                "  {} {}  {}",
                colorize_compound(record.scores.compound),
                format!("[{} likes, {} reposts]", record.record.like_count, record.record.retweet_count).dimmed(),
                who.cyan()
            );
            println!("    {}", truncate_chars(&single_line(&record.record.content), 120));
        }
    }

    if !result.suggestions.is_empty() {
        println!("\n{}", "Suggestions".bold());
        for suggestion in &result.suggestions {
            println!("  - {suggestion}");
        }
    }
    println!();
}

/// Display the outcome of a batch run.
pub fn display_batch_summary(summary: &BatchSummary) {
    println!("\n{}", "=== Batch Sentiment Summary ===".bold());
    println!(
        "  Rows read: {}   Rows scored: {}   Dropped (no text): {}",
        summary.rows_read,
        summary.rows_written,
        summary.rows_read.saturating_sub(summary.rows_written)
    );
    println!();
    display_distribution(&summary.distribution, &summary.percentages);
    println!();
    println!(
        "  Average compound: {}   Median compound: {}",
        colorize_compound(summary.average_compound),
        colorize_compound(summary.median_compound)
    );
    println!(
        "\n{}",
        format!("Scored records saved to: {}", summary.output.display()).bold()
    );
}

/// Display the suggested topic list.
pub fn display_topics(topics: &[TopicSuggestion]) {
    println!("\n{}", "Suggested topics".bold());
    for topic in topics {
        println!("  {}  {}", topic.icon, topic.name);
    }
    println!();
}
