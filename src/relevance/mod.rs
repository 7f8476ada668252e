// Relevance matching — keyword, phrase, tag and core-term scoring between
// content items, plus the ranker that turns scores into "related content".

pub mod jaccard;
pub mod keywords;
pub mod matcher;
pub mod phrases;
pub mod ranker;
pub mod scorer;

/// The text-bearing view of a content item that the matchers work on.
///
/// Articles and videos both implement this, as does the `ContentItem` union.
pub trait Relevant {
    fn title(&self) -> &str;

    /// Article content or video description.
    fn body(&self) -> &str;

    fn tags(&self) -> &[String];

    /// Combined text the weighted scorer searches.
    fn match_text(&self) -> String {
        format!("{} {}", self.title(), self.body())
    }

    /// Shorter text used to build Jaccard keyword sets.
    fn summary_text(&self) -> String {
        format!("{} {} {}", self.title(), self.body(), self.tags().join(" "))
    }
}
