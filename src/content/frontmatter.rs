// YAML front matter splitting for markdown articles.

/// Split a markdown document into its front matter and body.
///
/// The document must open with a `---` line; the front matter runs until the
/// next line that is exactly `---`. Returns `None` when there is no front
/// matter, in which case the whole document is body.
pub fn split_frontmatter(document: &str) -> Option<(&str, &str)> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    let rest = document
        .strip_prefix("---\r\n")
        .or_else(|| document.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}
