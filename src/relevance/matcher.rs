// Relevance matcher — picks a scoring strategy and ranks candidates with it.

use tracing::debug;

use super::jaccard;
use super::ranker::{self, Ranked, DEFAULT_LIMIT};
use super::scorer::Scorer;
use super::Relevant;

/// Which relatedness measure ranks candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Keyword, tag and core-term points (default)
    #[default]
    Weighted,
    /// Keyword-set Jaccard ratio with a medical-term bonus
    Jaccard,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Weighted => "weighted",
            Strategy::Jaccard => "jaccard",
        }
    }
}

/// Everything needed to turn one source item into a related-content list.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceMatcher {
    pub scorer: Scorer,
    pub strategy: Strategy,
    pub limit: usize,
}

impl Default for RelevanceMatcher {
    fn default() -> Self {
        Self {
            scorer: Scorer::default(),
            strategy: Strategy::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RelevanceMatcher {
    /// Same matcher with a different result limit.
    pub fn with_limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }

    /// Score `source` against a single candidate.
    pub fn score<S, C>(&self, source: &S, candidate: &C) -> f64
    where
        S: Relevant + ?Sized,
        C: Relevant + ?Sized,
    {
        match self.strategy {
            Strategy::Weighted => self.scorer.score(source, candidate),
            Strategy::Jaccard => jaccard::score(source, candidate),
        }
    }

    /// The most relevant candidates for `source`, best first.
    pub fn related<'a, S, C>(&self, source: &S, candidates: &'a [C]) -> Vec<Ranked<'a, C>>
    where
        S: Relevant + ?Sized,
        C: Relevant,
    {
        let ranked = match self.strategy {
            Strategy::Weighted => {
                ranker::rank_scored(&self.scorer, source, candidates, self.limit)
            }
            Strategy::Jaccard => {
                let source_set = jaccard::keyword_set(&source.summary_text());
                ranker::rank_by(candidates, self.limit, |candidate| {
                    jaccard::similarity(&source_set, &jaccard::keyword_set(&candidate.summary_text()))
                })
            }
        };

        debug!(
            source = source.title(),
            strategy = self.strategy.as_str(),
            candidates = candidates.len(),
            related = ranked.len(),
            "Ranked related content"
        );

        ranked
    }
}
