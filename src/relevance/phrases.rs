// Medical phrase detection — a static dictionary of multi-word clinical terms.
//
// Phrases are matched by case-insensitive containment against the raw text,
// not the token stream, so they survive the keyword extractor's splitting.

use std::collections::BTreeSet;

/// Known clinical phrases checked against every item's text.
pub const MEDICAL_PHRASES: &[&str] = &[
    "st elevation",
    "st depression",
    "qt interval",
    "pr interval",
    "qrs complex",
    "atrial fibrillation",
    "atrial flutter",
    "ventricular tachycardia",
    "ventricular fibrillation",
    "supraventricular tachycardia",
    "av block",
    "bundle branch block",
    "heart block",
    "sinus rhythm",
    "sinus bradycardia",
    "sinus tachycardia",
    "myocardial infarction",
    "acute coronary syndrome",
    "stemi",
    "nstemi",
    "unstable angina",
    "heart failure",
    "cardiac arrest",
    "pacemaker rhythm",
    "junctional rhythm",
    "escape rhythm",
    "premature ventricular contraction",
    "premature atrial contraction",
    "wolff parkinson white",
    "long qt syndrome",
    "torsades de pointes",
    "brugada syndrome",
    "hypertrophic cardiomyopathy",
];

/// Return the known phrases contained in `text`.
pub fn detect_phrases(text: &str) -> BTreeSet<&'static str> {
    let lower = text.to_lowercase();
    detect_in_lowercase(&lower)
}

/// Same as `detect_phrases` for text that is already lowercased.
pub(crate) fn detect_in_lowercase(lower: &str) -> BTreeSet<&'static str> {
    MEDICAL_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lower.contains(phrase))
        .collect()
}
