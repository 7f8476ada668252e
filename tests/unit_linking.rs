// Unit tests for clinical term linking.
//
// Covers video selection per term and the link rewriting pass over article
// bodies: whole-word matching, longest-term-first ordering and never nesting
// a link inside an existing one.

use crosslink::content::models::Video;
use crosslink::linking::{add_internal_links, find_video_for_term, linkable_terms};

fn video(slug: &str, title: &str, description: &str, category: &str) -> Video {
    Video {
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        ..Default::default()
    }
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ============================================================
// find_video_for_term
// ============================================================

#[test]
fn no_videos_means_no_match() {
    assert!(find_video_for_term("stemi", &[]).is_none());
}

#[test]
fn video_without_the_term_is_not_picked() {
    let videos = vec![video("sinus", "Normal sinus rhythm", "Rate and regularity", "Basics")];
    assert!(find_video_for_term("troponin", &videos).is_none());
}

#[test]
fn title_and_category_hits_beat_description_hits() {
    let videos = vec![
        video("review", "Weekly case review", "Includes a STEMI case", "Cases"),
        video("stemi", "Recognising STEMI", "Territories and reciprocal changes", "STEMI & MI"),
    ];
    let picked = find_video_for_term("STEMI", &videos).map(|v| v.slug.as_str());
    assert_eq!(picked, Some("stemi"));
}

#[test]
fn related_terms_find_videos_that_never_name_the_term() {
    // "pci" maps to "angioplasty" among others
    let videos = vec![video("cath", "Balloon angioplasty walkthrough", "", "Procedures")];
    let picked = find_video_for_term("pci", &videos).map(|v| v.slug.as_str());
    assert_eq!(picked, Some("cath"));
}

#[test]
fn unmapped_terms_still_match_on_their_own_text() {
    let videos = vec![
        video("other", "Long QT syndrome", "", "Arrhythmias"),
        video("brugada", "Brugada pattern", "Type 1 coved ST elevation", "Arrhythmias"),
    ];
    let picked = find_video_for_term("brugada", &videos).map(|v| v.slug.as_str());
    assert_eq!(picked, Some("brugada"));
}

#[test]
fn ties_go_to_the_first_video() {
    let videos = vec![
        video("first", "Aspirin dosing", "", "Pharmacology"),
        video("second", "Aspirin dosing", "", "Pharmacology"),
    ];
    let picked = find_video_for_term("aspirin", &videos).map(|v| v.slug.as_str());
    assert_eq!(picked, Some("first"));
}

// ============================================================
// linkable_terms
// ============================================================

#[test]
fn linkable_terms_follow_table_order() {
    let terms = linkable_terms("Chest pain with STEMI, given aspirin.");
    assert_eq!(terms, vec!["stemi", "aspirin", "chest pain"]);
}

#[test]
fn linkable_terms_ignore_partial_words() {
    // "ladder" must not match "lad", "nstemi" must not match "stemi"
    assert!(linkable_terms("A ladder in the NSTEMI ward").is_empty());
}

// ============================================================
// add_internal_links
// ============================================================

#[test]
fn content_without_terms_is_unchanged() {
    let videos = vec![video("v", "Anything", "", "")];
    let content = "Rate, rhythm and axis.";
    assert_eq!(add_internal_links(content, &videos), content);
}

#[test]
fn no_videos_leaves_content_unchanged() {
    let content = "STEMI with chest pain.";
    assert_eq!(add_internal_links(content, &[]), content);
}

#[test]
fn links_are_never_nested() {
    let videos = vec![video(
        "anterior-stemi",
        "Anterior STEMI explained",
        "chest pain workup",
        "STEMI & MI",
    )];
    let linked = add_internal_links("Patient presented with chest pain and STEMI.", &videos);

    // "chest pain" is linked first; the STEMI inside that link's title and
    // href is skipped, the one in the sentence is linked.
    assert_eq!(count(&linked, "<a "), 2);
    assert_eq!(count(&linked, "</a>"), 2);
    assert!(linked.starts_with("Patient presented with <a href=\"/watch/anterior-stemi\""));
    assert!(linked.contains(">chest pain</a>"));
    assert!(linked.ends_with(">STEMI</a>."));
    assert!(linked.contains(r#"class="medical-term-link""#));
    assert!(linked.contains(r#"title="Watch: Anterior STEMI explained""#));
}

#[test]
fn existing_links_are_left_alone() {
    let videos = vec![video("stemi", "STEMI basics", "", "STEMI & MI")];
    let content = r#"See <a href="/blog/stemi">STEMI</a>, then spot STEMI yourself."#;
    let linked = add_internal_links(content, &videos);

    assert!(linked.starts_with(r#"See <a href="/blog/stemi">STEMI</a>, then spot <a href="/watch/stemi""#));
    assert_eq!(count(&linked, "</a>"), 2);
}

#[test]
fn terms_after_an_unclosed_link_are_left_alone() {
    let videos = vec![video("s", "STEMI basics", "", "STEMI & MI")];
    let content = r#"<a href="/x">STEMI"#;
    assert_eq!(add_internal_links(content, &videos), content);
}

#[test]
fn terms_after_a_closed_link_are_still_linked() {
    let videos = vec![video("s", "STEMI basics", "", "STEMI & MI")];
    let linked = add_internal_links(r#"<a href="/x">more</a> on STEMI"#, &videos);
    assert!(linked.ends_with(r#"on <a href="/watch/s" class="medical-term-link" title="Watch: STEMI basics">STEMI</a>"#));
}

#[test]
fn every_occurrence_keeps_its_original_case() {
    let videos = vec![video("afib", "Atrial fibrillation", "", "Arrhythmias")];
    let linked = add_internal_links("AFib or afib?", &videos);
    assert_eq!(count(&linked, "</a>"), 2);
    assert!(linked.contains(">AFib</a>"));
    assert!(linked.contains(">afib</a>"));
}

#[test]
fn longer_terms_are_linked_before_their_parts() {
    let videos = vec![video(
        "bbb",
        "Bundle branch block patterns",
        "",
        "Conduction Blocks",
    )];
    let linked = add_internal_links("Left bundle branch block.", &videos);

    // "bundle branch block" wins; "heart block"/"av block" never match here
    // and nothing links a second time inside the first anchor.
    assert_eq!(count(&linked, "</a>"), 1);
    assert!(linked.contains(">bundle branch block</a>"));
}

#[test]
fn titles_are_escaped_in_the_attribute() {
    let videos = vec![video("q", r#"Q waves: "old" vs <new>"#, "", "")];
    let linked = add_internal_links("Q waves present.", &videos);
    assert!(linked.contains(r#"title="Watch: Q waves: &quot;old&quot; vs &lt;new&gt;""#));
}
