// Term linking — turns known clinical terms in an article into links to the
// best matching video.
//
// Each mapped term carries a few related search terms ("pci" also looks for
// "angioplasty" and "stent"). A video's fit for a term is scored from the
// term and its related terms appearing in the video's title, description and
// category; the best video wins.

use regex_lite::Regex;
use tracing::{debug, warn};

use crate::content::models::Video;
use crate::relevance::ranker;

/// Clinical terms and the related terms searched alongside them.
pub const TERM_MAPPINGS: &[(&str, &[&str])] = &[
    // Procedures
    ("pci", &["percutaneous coronary intervention", "angioplasty", "stent", "catheterization"]),
    ("percutaneous coronary intervention", &["pci", "angioplasty", "stent"]),
    ("angioplasty", &["pci", "stent", "balloon"]),
    ("cardiac catheterization", &["cathlab", "angiogram", "coronary"]),
    // Infarct territories
    ("awmi", &["anterior wall myocardial infarction", "anterior mi", "lad"]),
    ("anterior wall myocardial infarction", &["awmi", "anterior mi", "lad"]),
    ("anterior mi", &["awmi", "anterior wall", "lad"]),
    ("lateral wall mi", &["lateral myocardial infarction", "circumflex"]),
    ("inferior wall mi", &["inferior myocardial infarction", "rca"]),
    ("posterior mi", &["posterior myocardial infarction", "posterior wall"]),
    // Coronary arteries
    ("lad", &["left anterior descending", "anterior wall", "septal"]),
    ("left anterior descending", &["lad", "anterior"]),
    ("lad occlusion", &["lad", "anterior wall mi", "proximal lad"]),
    ("rca", &["right coronary artery", "inferior wall"]),
    ("right coronary artery", &["rca", "inferior"]),
    ("circumflex", &["lcx", "lateral wall"]),
    ("lcx", &["circumflex", "lateral"]),
    // ECG findings
    ("st elevation", &["stemi", "st segment elevation"]),
    ("stemi", &["st elevation myocardial infarction", "st elevation"]),
    ("st depression", &["ischemia", "reciprocal changes"]),
    ("q waves", &["pathological q waves", "necrosis"]),
    ("t wave inversion", &["ischemia", "evolution"]),
    // Arrhythmias
    ("atrial fibrillation", &["afib", "irregular rhythm"]),
    ("afib", &["atrial fibrillation", "irregular"]),
    ("ventricular tachycardia", &["vtach", "wide complex"]),
    ("vtach", &["ventricular tachycardia", "wide complex"]),
    ("supraventricular tachycardia", &["svt", "narrow complex"]),
    ("svt", &["supraventricular tachycardia"]),
    // Conduction
    ("av block", &["heart block", "conduction block"]),
    ("heart block", &["av block", "conduction"]),
    ("bundle branch block", &["bbb", "conduction delay"]),
    ("lbbb", &["left bundle branch block"]),
    ("rbbb", &["right bundle branch block"]),
    // Biomarkers
    ("troponin", &["cardiac enzymes", "biomarkers"]),
    ("cardiac enzymes", &["troponin", "biomarkers"]),
    ("ck-mb", &["creatine kinase", "cardiac enzymes"]),
    // Medications
    ("aspirin", &["antiplatelet", "cardiology"]),
    ("clopidogrel", &["plavix", "antiplatelet"]),
    ("metoprolol", &["beta blocker", "cardiology"]),
    ("atorvastatin", &["statin", "cholesterol"]),
    ("nitroglycerin", &["nitrates", "chest pain"]),
    // Symptoms
    ("chest pain", &["angina", "acs", "cardiac"]),
    ("angina", &["chest pain", "ischemia"]),
    ("dyspnea", &["shortness of breath", "heart failure"]),
    ("palpitations", &["arrhythmia", "irregular heartbeat"]),
];

/// Term fragments that favour videos filed under particular categories.
pub const CATEGORY_MAPPINGS: &[(&str, &[&str])] = &[
    ("stemi", &["STEMI & MI", "Myocardial Infarction"]),
    ("mi", &["STEMI & MI", "Myocardial Infarction"]),
    ("infarction", &["STEMI & MI", "Myocardial Infarction"]),
    ("arrhythmia", &["Arrhythmias"]),
    ("fibrillation", &["Arrhythmias"]),
    ("tachycardia", &["Arrhythmias"]),
    ("block", &["Conduction Blocks"]),
    ("conduction", &["Conduction Blocks"]),
];

const EXACT_TEXT_POINTS: f64 = 10.0;
const SEARCH_TERM_POINTS: f64 = 5.0;
const TITLE_POINTS: f64 = 8.0;
const CATEGORY_POINTS: f64 = 3.0;

/// Related search terms for a mapped term, if it is mapped.
pub fn related_terms(term: &str) -> Option<&'static [&'static str]> {
    TERM_MAPPINGS
        .iter()
        .find(|(key, _)| *key == term)
        .map(|(_, related)| *related)
}

/// Pick the video that best covers `term`, or `None` if no video mentions it.
pub fn find_video_for_term<'a>(term: &str, videos: &'a [Video]) -> Option<&'a Video> {
    let term = term.to_lowercase();

    // An unmapped term searches for itself twice over, same as a mapped term
    // listing itself among its related terms.
    let mut search_terms = vec![term.clone()];
    match related_terms(&term) {
        Some(related) => search_terms.extend(related.iter().map(|t| t.to_string())),
        None => search_terms.push(term.clone()),
    }

    let best = ranker::rank_by(videos, 1, |video| {
        term_fit(&term, &search_terms, video)
    });
    best.into_iter().next().map(|r| r.item)
}

fn term_fit(term: &str, search_terms: &[String], video: &Video) -> f64 {
    let text = format!("{} {}", video.title, video.description).to_lowercase();
    let mut score = 0.0;

    if text.contains(term) {
        score += EXACT_TEXT_POINTS;
    }

    score += search_terms.iter().filter(|t| text.contains(t.as_str())).count() as f64
        * SEARCH_TERM_POINTS;

    if video.title.to_lowercase().contains(term) {
        score += TITLE_POINTS;
    }

    for (fragment, categories) in CATEGORY_MAPPINGS {
        if term.contains(fragment) && categories.contains(&video.category.as_str()) {
            score += CATEGORY_POINTS;
        }
    }

    score
}

/// Whole-word, case-insensitive matcher for a term.
fn term_regex(term: &str) -> Option<Regex> {
    match Regex::new(&format!(r"(?i)\b{}\b", regex_lite::escape(term))) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(term, error = %e, "Skipping term with an invalid pattern");
            None
        }
    }
}

/// Mapped terms that appear as whole words in `content`, in table order.
pub fn linkable_terms(content: &str) -> Vec<&'static str> {
    TERM_MAPPINGS
        .iter()
        .map(|(term, _)| *term)
        .filter(|term| term_regex(term).is_some_and(|re| re.is_match(content)))
        .collect()
}

/// Wrap every linkable term occurrence in a link to its best video.
///
/// Longer terms go first so "anterior wall myocardial infarction" is linked
/// before "anterior mi" gets a chance at part of it. Occurrences already
/// inside an `<a>` element, closed or not, are left alone, so links never nest.
pub fn add_internal_links(content: &str, videos: &[Video]) -> String {
    let mut terms: Vec<&'static str> = linkable_terms(content);
    terms.sort_by_key(|term| std::cmp::Reverse(term.len()));

    let mut linked = content.to_string();
    for term in terms {
        let Some(video) = find_video_for_term(term, videos) else {
            continue;
        };
        let Some(re) = term_regex(term) else {
            continue;
        };

        let mut out = String::with_capacity(linked.len());
        let mut last = 0;
        let mut count = 0;

        for m in re.find_iter(&linked) {
            if inside_anchor(&linked[..m.start()]) {
                continue;
            }
            out.push_str(&linked[last..m.start()]);
            out.push_str(&format!(
                r#"<a href="{}" class="medical-term-link" title="Watch: {}">{}</a>"#,
                video.url(),
                escape_attr(&video.title),
                m.as_str()
            ));
            last = m.end();
            count += 1;
        }

        if count > 0 {
            out.push_str(&linked[last..]);
            debug!(term, video = video.slug.as_str(), count, "Linked term");
            linked = out;
        }
    }

    linked
}

/// True when `prefix` leaves an `<a` element open: more `<a` openers than
/// `</a>` closers, case-insensitively. An unclosed opener counts as open.
fn inside_anchor(prefix: &str) -> bool {
    let lower = prefix.to_ascii_lowercase();
    let opens = lower
        .match_indices("<a")
        .filter(|(i, _)| {
            lower[i + 2..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_')
        })
        .count();
    let closes = lower.matches("</a>").count();
    opens > closes
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(slug: &str, title: &str, description: &str, category: &str) -> Video {
        Video {
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_related_terms_lookup() {
        assert_eq!(related_terms("svt"), Some(&["supraventricular tachycardia"][..]));
        assert!(related_terms("unknown").is_none());
    }

    #[test]
    fn test_term_fit_points() {
        let v = video("s", "STEMI basics", "ST elevation review", "STEMI & MI");
        let search: Vec<String> = ["stemi", "st elevation myocardial infarction", "st elevation"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // text hit 10, "stemi" and "st elevation" 5 each, title 8,
        // category via "stemi" and "mi" fragments 3 each
        assert_eq!(term_fit("stemi", &search, &v), 10.0 + 10.0 + 8.0 + 6.0);
    }

    #[test]
    fn test_linkable_terms_whole_words_only() {
        let terms = linkable_terms("Gave ASPIRIN; no lady involvement.");
        assert_eq!(terms, vec!["aspirin"]);
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"A "B" & C"#), "A &quot;B&quot; &amp; C");
    }

    #[test]
    fn test_inside_anchor() {
        assert!(!inside_anchor(r#"x <a href="/y">z</a> w <A HREF="/q">r</A> "#));
        assert!(inside_anchor(r#"x <a href="/y">z</a> w <A HREF="/q">"#));
        assert!(inside_anchor(r#"<a href="/x">"#));
        assert!(inside_anchor(r#"<a href="/wa"#));
        // Other tags starting with "a" are not anchors
        assert!(!inside_anchor("<abbr>ECG</abbr> <aside>"));
        assert!(!inside_anchor(""));
    }
}
