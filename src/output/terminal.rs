// Colored terminal output for related-content lists and score diagnostics.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use std::collections::{BTreeSet, HashSet};

use colored::Colorize;

use super::RelatedLink;
use crate::relevance::scorer::ScoreBreakdown;

/// Display a ranked related-content list in the terminal.
pub fn display_related(heading: &str, links: &[RelatedLink]) {
    println!("\n{}", format!("=== {heading} ===").bold());

    if links.is_empty() {
        // Nothing related is a normal outcome: the page simply omits the section.
        println!("  {}", "No related content.".dimmed());
        return;
    }

    println!();
    println!(
        "  {:>4}  {:<48} {:>6}  {}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Score".dimmed(),
        "Link".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, link) in links.iter().enumerate() {
        println!(
            "  {:>4}. {:<48} {:>6}  {}",
            i + 1,
            super::truncate_chars(&link.title, 45),
            colorize_score(link.score),
            link.url.dimmed(),
        );
    }
    println!();
}

/// Display the per-signal breakdown of a weighted score.
pub fn display_breakdown(source_title: &str, candidate_title: &str, breakdown: &ScoreBreakdown) {
    println!(
        "\n{}",
        format!(
            "=== {} -> {} ===",
            super::truncate_chars(source_title, 40),
            super::truncate_chars(candidate_title, 40)
        )
        .bold()
    );
    println!("  Keywords:   {:>6.1}", breakdown.keywords);
    println!("  Tags:       {:>6.1}", breakdown.tags);
    println!("  Core terms: {:>6.1}", breakdown.core_terms);
    println!("  {}", "-".repeat(20).dimmed());
    println!("  Total:      {}", colorize_score(breakdown.total()));

    if breakdown.total() <= 0.0 {
        println!(
            "  {}",
            "Score is zero, so this pair is never shown as related.".dimmed()
        );
    }
}

/// Display an item's keyword set and detected phrases.
pub fn display_keywords(title: &str, keywords: &HashSet<String>, phrases: &BTreeSet<&str>) {
    println!("\n{}", format!("=== Keywords for \"{title}\" ===").bold());

    let mut sorted: Vec<&str> = keywords.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    println!("  {} keywords:", sorted.len());
    if !sorted.is_empty() {
        println!("    {}", sorted.join(", ").dimmed());
    }

    println!("  {} medical phrases:", phrases.len());
    for phrase in phrases {
        println!("    {}", phrase.bright_cyan());
    }
}

/// Colorize a relevance score: strong matches green, weak ones dimmed.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.2}")
    };

    if score >= 15.0 {
        text.bright_green().bold()
    } else if score >= 5.0 {
        text.bright_yellow()
    } else {
        text.dimmed()
    }
}
