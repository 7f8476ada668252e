// Weighted relevance score between a source item and a candidate.
//
// Three additive signals:
//   keywords    source keywords and detected phrases found in the candidate's text
//   tags        source/candidate tags where one contains the other
//   core terms  fixed cardiology terms present in both texts
//
// The weights reproduce the site's existing "related content" ordering, so
// changing a default changes which items show up as related.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::keywords::KeywordExtractor;
use super::phrases;
use super::Relevant;

/// Terms that earn a bonus when both items mention them.
pub const CORE_TERMS: &[&str] = &[
    "ecg",
    "cardiac",
    "heart",
    "rhythm",
    "arrhythmia",
    "tachycardia",
    "bradycardia",
    "fibrillation",
    "flutter",
    "stemi",
    "mi",
    "infarction",
    "ischemia",
    "st segment",
    "qt",
    "qrs",
    "pr interval",
    "av block",
    "bundle",
    "pacemaker",
    "atrial",
    "ventricular",
];

/// Points awarded by each signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Keyword of at least `long_keyword_len` characters found in the candidate (default 3.0)
    pub long_keyword: f64,
    /// Shorter keyword found in the candidate (default 1.0)
    pub short_keyword: f64,
    /// Keywords this long or longer use `long_keyword` (default 4)
    pub long_keyword_len: usize,
    /// Per matching tag (default 5.0)
    pub tag_match: f64,
    /// Per core term present in both items (default 2.0)
    pub core_term: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            long_keyword: 3.0,
            short_keyword: 1.0,
            long_keyword_len: 4,
            tag_match: 5.0,
            core_term: 2.0,
        }
    }
}

/// How tag overlap is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMatching {
    /// Every matching (source tag, candidate tag) pair counts. Mutually
    /// matching tags count more than once, e.g. "MI" against "STEMI" and
    /// "NSTEMI" is two matches.
    #[default]
    Pairs,
    /// Each candidate tag counts once if it matches any source tag.
    CandidateTags,
}

impl TagMatching {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMatching::Pairs => "pairs",
            TagMatching::CandidateTags => "candidate",
        }
    }
}

/// The score split into its three contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub keywords: f64,
    pub tags: f64,
    pub core_terms: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.keywords + self.tags + self.core_terms
    }
}

/// Everything the scorer needs from the source item, computed once per ranking.
#[derive(Debug, Clone)]
pub struct SourceProfile {
    text: String,
    keywords: HashSet<String>,
    phrases: BTreeSet<&'static str>,
    tags: Vec<String>,
}

impl SourceProfile {
    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    pub fn phrases(&self) -> &BTreeSet<&'static str> {
        &self.phrases
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    pub weights: ScoreWeights,
    pub tag_matching: TagMatching,
    pub extractor: KeywordExtractor,
}

impl Scorer {
    pub fn profile<S: Relevant + ?Sized>(&self, source: &S) -> SourceProfile {
        let text = source.match_text().to_lowercase();
        let keywords = self.extractor.extract(&text);
        let phrases = phrases::detect_in_lowercase(&text);
        let tags = source.tags().iter().map(|t| t.to_lowercase()).collect();

        SourceProfile {
            text,
            keywords,
            phrases,
            tags,
        }
    }

    pub fn breakdown_against<C: Relevant + ?Sized>(
        &self,
        profile: &SourceProfile,
        candidate: &C,
    ) -> ScoreBreakdown {
        let candidate_text = candidate.match_text().to_lowercase();

        // Phrases go through the same weighting as keywords; a phrase that is
        // also a single-word keyword ("stemi") counts in both lists.
        let keywords: f64 = profile
            .keywords
            .iter()
            .map(String::as_str)
            .chain(profile.phrases.iter().copied())
            .filter(|kw| candidate_text.contains(kw))
            .map(|kw| self.keyword_points(kw))
            .sum();

        let candidate_tags: Vec<String> =
            candidate.tags().iter().map(|t| t.to_lowercase()).collect();
        let tag_matches = count_tag_matches(&profile.tags, &candidate_tags, self.tag_matching);

        let core_terms = CORE_TERMS
            .iter()
            .filter(|term| profile.text.contains(*term) && candidate_text.contains(*term))
            .count();

        ScoreBreakdown {
            keywords,
            tags: tag_matches as f64 * self.weights.tag_match,
            core_terms: core_terms as f64 * self.weights.core_term,
        }
    }

    pub fn breakdown<S, C>(&self, source: &S, candidate: &C) -> ScoreBreakdown
    where
        S: Relevant + ?Sized,
        C: Relevant + ?Sized,
    {
        self.breakdown_against(&self.profile(source), candidate)
    }

    pub fn score<S, C>(&self, source: &S, candidate: &C) -> f64
    where
        S: Relevant + ?Sized,
        C: Relevant + ?Sized,
    {
        self.breakdown(source, candidate).total()
    }

    fn keyword_points(&self, keyword: &str) -> f64 {
        if keyword.len() >= self.weights.long_keyword_len {
            self.weights.long_keyword
        } else {
            self.weights.short_keyword
        }
    }
}

/// Score a pair with default weights and pair-counted tags.
pub fn score<S, C>(source: &S, candidate: &C) -> f64
where
    S: Relevant + ?Sized,
    C: Relevant + ?Sized,
{
    Scorer::default().score(source, candidate)
}

/// Tags match when either lowercased tag contains the other.
fn tags_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn count_tag_matches(source: &[String], candidate: &[String], mode: TagMatching) -> usize {
    match mode {
        TagMatching::Pairs => source
            .iter()
            .map(|s| candidate.iter().filter(|c| tags_match(s, c)).count())
            .sum(),
        TagMatching::CandidateTags => candidate
            .iter()
            .filter(|c| source.iter().any(|s| tags_match(s, c)))
            .count(),
    }
}
