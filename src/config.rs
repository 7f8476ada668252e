use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::relevance::keywords::{KeywordExtractor, StopWords};
use crate::relevance::matcher::{RelevanceMatcher, Strategy};
use crate::relevance::ranker::DEFAULT_LIMIT;
use crate::relevance::scorer::{Scorer, TagMatching};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// setting has a default, so an empty environment gives the site's stock
/// related-content behavior.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the content tree (`articles/` and `videos/` live under it)
    pub content_dir: PathBuf,
    /// How many related items to return (default 3)
    pub related_limit: usize,
    /// How tag overlap is counted (default: every matching pair)
    pub tag_matching: TagMatching,
    /// Stop-word list for keyword extraction (default: the site list)
    pub stop_words: StopWords,
    /// Relatedness measure (default: weighted)
    pub strategy: Strategy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let related_limit = match env::var("CROSSLINK_RELATED_LIMIT") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("CROSSLINK_RELATED_LIMIT must be a number, got {value:?}"))?,
            Err(_) => DEFAULT_LIMIT,
        };

        let tag_matching = match env::var("CROSSLINK_TAG_MATCHING").as_deref() {
            Ok("candidate") => TagMatching::CandidateTags,
            // "pairs" or unset both default to pair counting
            _ => TagMatching::Pairs,
        };

        let stop_words = match env::var("CROSSLINK_STOP_WORDS").as_deref() {
            Ok("english") => StopWords::English,
            _ => StopWords::Site,
        };

        let strategy = match env::var("CROSSLINK_STRATEGY").as_deref() {
            Ok("jaccard") => Strategy::Jaccard,
            _ => Strategy::Weighted,
        };

        Ok(Self {
            content_dir: env::var("CROSSLINK_CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./content")),
            related_limit,
            tag_matching,
            stop_words,
            strategy,
        })
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.content_dir.join("articles")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.content_dir.join("videos")
    }

    /// Check that the content tree exists.
    /// Call this before any command that loads articles or videos.
    pub fn require_content(&self) -> Result<()> {
        if !self.content_dir.is_dir() {
            anyhow::bail!(
                "Content directory not found: {}\n\
                 Set CROSSLINK_CONTENT_DIR to the folder holding articles/ and videos/.",
                self.content_dir.display()
            );
        }
        if !self.articles_dir().is_dir() && !self.videos_dir().is_dir() {
            anyhow::bail!(
                "{} has neither an articles/ nor a videos/ directory",
                self.content_dir.display()
            );
        }
        Ok(())
    }

    /// Build the matcher described by this configuration.
    pub fn matcher(&self) -> RelevanceMatcher {
        RelevanceMatcher {
            scorer: Scorer {
                tag_matching: self.tag_matching,
                extractor: KeywordExtractor::new(self.stop_words),
                ..Scorer::default()
            },
            strategy: self.strategy,
            limit: self.related_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(content_dir: PathBuf) -> Config {
        Config {
            content_dir,
            related_limit: DEFAULT_LIMIT,
            tag_matching: TagMatching::Pairs,
            stop_words: StopWords::Site,
            strategy: Strategy::Weighted,
        }
    }

    #[test]
    fn test_require_content_missing_dir() {
        let cfg = config(PathBuf::from("/definitely/not/here"));
        assert!(cfg.require_content().is_err());
    }

    #[test]
    fn test_require_content_needs_a_library() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path().to_path_buf());
        assert!(cfg.require_content().is_err());

        std::fs::create_dir(dir.path().join("videos")).unwrap();
        assert!(cfg.require_content().is_ok());
    }

    #[test]
    fn test_matcher_carries_settings() {
        let mut cfg = config(PathBuf::from("content"));
        cfg.related_limit = 5;
        cfg.tag_matching = TagMatching::CandidateTags;
        cfg.stop_words = StopWords::English;
        cfg.strategy = Strategy::Jaccard;

        let matcher = cfg.matcher();
        assert_eq!(matcher.limit, 5);
        assert_eq!(matcher.strategy, Strategy::Jaccard);
        assert_eq!(matcher.scorer.tag_matching, TagMatching::CandidateTags);
        assert_eq!(matcher.scorer.extractor.stop_words, StopWords::English);
    }
}
