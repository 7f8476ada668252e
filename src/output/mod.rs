// Output formatting — terminal display and JSON for related-content lists.

pub mod terminal;

use serde::Serialize;

use crate::content::models::ContentItem;
use crate::relevance::ranker::Ranked;
use crate::relevance::Relevant;

/// One related-content link as the page would render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedLink {
    pub kind: &'static str,
    pub slug: String,
    pub title: String,
    pub url: String,
    pub score: f64,
}

impl RelatedLink {
    pub fn from_ranked<C>(ranked: &Ranked<'_, C>) -> Self
    where
        C: Clone + Into<ContentItem>,
    {
        let item: ContentItem = ranked.item.clone().into();
        Self {
            kind: item.kind(),
            slug: item.slug().to_string(),
            title: item.title().to_string(),
            url: item.url(),
            score: ranked.score,
        }
    }
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
