// Crosslink: related-content matching for a medical education site
//
// This is the library root. Each module corresponds to a major piece of the
// related-content pipeline: load content, score relevance, render results.

pub mod config;
pub mod content;
pub mod linking;
pub mod output;
pub mod relevance;
