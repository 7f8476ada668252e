// Jaccard keyword-set similarity — the site's alternate relatedness measure.
//
// Each item is reduced to a keyword set built from its summary text (title,
// excerpt or description, and tags). Similarity is |A ∩ B| / |A ∪ B| plus a
// fixed bonus for every shared term on the medical bonus list. Unlike the
// weighted scorer this is symmetric in source and candidate.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::Relevant;

/// Terms always kept when present, even when shorter than four characters.
pub const PRIORITY_TERMS: &[&str] = &[
    "ecg", "ekg", "electrocardiogram", "arrhythmia", "rhythm", "heart", "cardiac",
    "atrial", "ventricular", "tachycardia", "bradycardia", "fibrillation",
    "stemi", "myocardial", "infarction", "ischemia", "coronary", "angina",
    "pacemaker", "conduction", "block", "bundle", "axis", "interval",
    "wave", "segment", "depression", "elevation", "st-segment", "qrs",
    "p-wave", "t-wave", "u-wave", "qt", "pr", "rr",
    "sinus", "atrial flutter", "atrial fibrillation", "supraventricular",
    "ventricular tachycardia", "ventricular fibrillation", "asystole",
    "pulseless electrical activity", "pea", "arrest", "resuscitation",
    "emergency", "critical", "interpretation", "diagnosis", "treatment",
];

/// Shared terms that add `MEDICAL_BONUS` on top of the Jaccard ratio.
pub const MEDICAL_BONUS_TERMS: &[&str] = &[
    "ecg",
    "ekg",
    "arrhythmia",
    "tachycardia",
    "bradycardia",
    "fibrillation",
    "stemi",
    "myocardial infarction",
    "atrial fibrillation",
    "ventricular tachycardia",
];

pub const MEDICAL_BONUS: f64 = 0.2;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
    "has", "he", "in", "is", "it", "its", "of", "on", "that", "the",
    "to", "was", "will", "with", "you", "your", "this", "these", "they",
    "have", "had", "what", "when", "where", "who", "which", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "can", "could", "should", "would", "may", "might", "must", "shall",
];

static STOP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

static PRIORITY_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PRIORITY_TERMS.iter().copied().collect());

/// Build the keyword set for a summary text.
///
/// Hyphens survive normalization here so "st-segment" and "p-wave" stay whole.
pub fn keyword_set(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    let cleaned: String = lower
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| w.len() > 2 && !STOP_SET.contains(*w))
        .collect();

    let mut keywords: HashSet<String> = words
        .iter()
        .copied()
        .filter(|w| PRIORITY_SET.contains(*w) || w.len() > 3)
        .map(|w| w.to_string())
        .collect();

    for term in PRIORITY_TERMS {
        if lower.contains(term) {
            keywords.insert(term.to_string());
        }
    }

    for pair in words.windows(2) {
        let bigram = format!("{} {}", pair[0], pair[1]);
        if PRIORITY_SET.contains(bigram.as_str()) {
            keywords.insert(bigram);
        }
    }

    keywords
}

/// Jaccard ratio of two keyword sets plus the medical-term bonus.
pub fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }

    let shared: Vec<&String> = a.intersection(b).collect();
    let bonus = shared
        .iter()
        .filter(|term| MEDICAL_BONUS_TERMS.contains(&term.as_str()))
        .count() as f64
        * MEDICAL_BONUS;

    shared.len() as f64 / union as f64 + bonus
}

/// Jaccard relatedness of two content items.
pub fn score<S, C>(source: &S, candidate: &C) -> f64
where
    S: Relevant + ?Sized,
    C: Relevant + ?Sized,
{
    similarity(
        &keyword_set(&source.summary_text()),
        &keyword_set(&candidate.summary_text()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_keyword_set_adds_priority_phrases() {
        let keywords = keyword_set("Atrial Fibrillation ECG");
        assert!(keywords.contains("atrial"));
        assert!(keywords.contains("fibrillation"));
        assert!(keywords.contains("ecg"));
        assert!(keywords.contains("atrial fibrillation"));
    }

    #[test]
    fn test_keyword_set_keeps_hyphenated_terms() {
        let keywords = keyword_set("Reading the ST-segment");
        assert!(keywords.contains("st-segment"));
        assert!(keywords.contains("reading"));
        assert!(!keywords.contains("the"));
    }

    #[test]
    fn test_short_non_priority_words_dropped() {
        // "lab" is three characters and not a priority term
        let keywords = keyword_set("lab");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        assert_eq!(similarity(&set(&["renal"]), &set(&["guitar"])), 0.0);
    }

    #[test]
    fn test_empty_sets_score_zero() {
        assert_eq!(similarity(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn test_bonus_for_shared_medical_terms() {
        let a = set(&["ecg", "axis"]);
        let b = set(&["ecg", "leads"]);
        // 1 shared of 3 total, plus one bonus term
        let expected = 1.0 / 3.0 + MEDICAL_BONUS;
        assert!((similarity(&a, &b) - expected).abs() < 1e-9);
    }
}
