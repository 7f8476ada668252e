// Keyword extraction — the significant terms of a piece of content.
//
// Text is lowercased, punctuation becomes whitespace, and what survives the
// length and stop-word filters is collected into a set. Order is irrelevant:
// the scorer only asks whether each keyword shows up in the other item.

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{get, LANGUAGE};

/// Tokens must be longer than this to count as keywords.
pub const MIN_TOKEN_LEN: usize = 2;

/// The site's own list of common English function words.
pub const SITE_STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when",
    "make", "can", "like", "time", "no", "just", "him", "know", "take", "people", "into",
    "year", "your", "good", "some", "could", "them", "see", "other", "than", "then", "now",
    "look", "only", "come", "its", "over", "think", "also", "back", "after", "use", "two",
    "how", "our", "work", "first", "well", "way", "even", "new", "want", "because", "any",
    "these", "give", "day", "most", "us", "is", "was", "are", "been", "has", "had", "were",
    "said", "each", "much", "where", "those", "very", "through", "down", "many", "before",
    "here", "should", "between",
];

static SITE_STOP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SITE_STOP_WORDS.iter().copied().collect());

static ENGLISH_STOP_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| get(LANGUAGE::English).into_iter().collect());

/// Which stop-word list filters the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWords {
    /// The site's fixed list (default, matches existing related-content ordering)
    #[default]
    Site,
    /// The general English list shipped with the `stop-words` crate
    English,
}

impl StopWords {
    pub fn contains(&self, word: &str) -> bool {
        match self {
            StopWords::Site => SITE_STOP_SET.contains(word),
            StopWords::English => ENGLISH_STOP_SET.contains(word),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopWords::Site => "site",
            StopWords::English => "english",
        }
    }
}

/// Lowercase the text and turn everything except ASCII word characters and
/// whitespace into spaces.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}

/// Extracts keyword sets using a configurable stop-word list.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor {
    pub stop_words: StopWords,
}

impl KeywordExtractor {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Turn free text into its deduplicated set of significant terms.
    pub fn extract(&self, text: &str) -> HashSet<String> {
        normalize(text)
            .split_whitespace()
            .filter(|token| token.len() > MIN_TOKEN_LEN && !self.stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }
}

/// Extract keywords with the site's stop-word list.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    KeywordExtractor::default().extract(text)
}
