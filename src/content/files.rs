// File-backed content store — the site's `content/` tree.
//
// Layout:
//   content/articles/<slug>.md|.mdx   YAML front matter + markdown body
//   content/videos/<slug>.yaml|.yml   one YAML mapping per video
//
// A file that can't be read or parsed is skipped with a warning so one bad
// file never hides the rest of the library. A missing directory is an empty
// library, not an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use super::frontmatter::split_frontmatter;
use super::models::{parse_published, Article, Video};
use super::traits::ContentStore;

const ARTICLE_EXTENSIONS: &[&str] = &["mdx", "md"];
const VIDEO_EXTENSIONS: &[&str] = &["yaml", "yml"];

pub struct FileContentStore {
    articles_dir: PathBuf,
    videos_dir: PathBuf,
}

impl FileContentStore {
    /// Store rooted at a content directory containing `articles/` and `videos/`.
    pub fn new(content_dir: impl AsRef<Path>) -> Self {
        let root = content_dir.as_ref();
        Self {
            articles_dir: root.join("articles"),
            videos_dir: root.join("videos"),
        }
    }

    pub fn articles_dir(&self) -> &Path {
        &self.articles_dir
    }

    pub fn videos_dir(&self) -> &Path {
        &self.videos_dir
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn published_articles(&self) -> Result<Vec<Article>> {
        let paths = list_files(&self.articles_dir, ARTICLE_EXTENSIONS).await?;
        let mut articles = Vec::with_capacity(paths.len());

        for path in &paths {
            match load_article(path).await {
                Ok(article) => articles.push(article),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable article"
                ),
            }
        }

        articles.sort_by_cached_key(|a| std::cmp::Reverse(parse_published(&a.published_at)));
        info!(
            count = articles.len(),
            dir = %self.articles_dir.display(),
            "Loaded articles"
        );
        Ok(articles)
    }

    async fn published_videos(&self) -> Result<Vec<Video>> {
        let paths = list_files(&self.videos_dir, VIDEO_EXTENSIONS).await?;
        let mut videos = Vec::with_capacity(paths.len());

        for path in &paths {
            match load_video(path).await {
                Ok(video) => videos.push(video),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable video"
                ),
            }
        }

        videos.sort_by_cached_key(|v| std::cmp::Reverse(parse_published(&v.published_at)));
        info!(
            count = videos.len(),
            dir = %self.videos_dir.display(),
            "Loaded videos"
        );
        Ok(videos)
    }

    async fn article(&self, slug: &str) -> Result<Option<Article>> {
        // Direct hit on the file name first; front matter may override the slug,
        // so fall back to scanning everything.
        for ext in ARTICLE_EXTENSIONS {
            let path = self.articles_dir.join(format!("{slug}.{ext}"));
            if fs::try_exists(&path).await.unwrap_or(false) {
                debug!(path = %path.display(), "Loading article by file name");
                return load_article(&path).await.map(Some);
            }
        }
        let articles = self.published_articles().await?;
        Ok(articles.into_iter().find(|a| a.slug == slug))
    }

    async fn video(&self, slug: &str) -> Result<Option<Video>> {
        for ext in VIDEO_EXTENSIONS {
            let path = self.videos_dir.join(format!("{slug}.{ext}"));
            if fs::try_exists(&path).await.unwrap_or(false) {
                return load_video(&path).await.map(Some);
            }
        }
        Ok(None)
    }
}

/// Parse an article document. `slug_hint` is used when the front matter has no slug.
pub fn parse_article(slug_hint: &str, document: &str) -> Result<Article> {
    let (mut article, body) = match split_frontmatter(document) {
        Some((yaml, body)) if !yaml.trim().is_empty() => {
            let article: Article =
                serde_yaml::from_str(yaml).context("Invalid article front matter")?;
            (article, body)
        }
        Some((_, body)) => (Article::default(), body),
        None => (Article::default(), document),
    };

    article.content = body.to_string();
    if article.slug.is_empty() {
        article.slug = slug_hint.to_string();
    }
    Ok(article)
}

/// Parse a video document. The slug always comes from the file name, and a
/// video with no `tags` field (or a null one) is tagged with its category.
/// An explicit `tags: []` stays empty.
pub fn parse_video(slug: &str, document: &str) -> Result<Video> {
    let (mut video, has_tags) = if document.trim().is_empty() {
        (Video::default(), false)
    } else {
        let value: serde_yaml::Value =
            serde_yaml::from_str(document).context("Invalid video YAML")?;
        let has_tags = value.get("tags").is_some_and(|tags| !tags.is_null());
        let video: Video = serde_yaml::from_value(value).context("Invalid video YAML")?;
        (video, has_tags)
    };

    video.slug = slug.to_string();
    if !has_tags && !video.category.is_empty() {
        video.tags = vec![video.category.clone()];
    }
    Ok(video)
}

async fn load_article(path: &Path) -> Result<Article> {
    let document = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_article(&file_stem(path), &document)
}

async fn load_video(path: &Path) -> Result<Video> {
    let document = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_video(&file_stem(path), &document)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Files in `dir` with one of `extensions`, sorted by path.
async fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "Content directory missing");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list {}", dir.display()));
        }
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let wanted = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e));
        if wanted {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article_with_frontmatter() {
        let doc = "---\ntitle: Atrial Flutter\nslug: atrial-flutter\nexcerpt: Sawtooth waves\ntags:\n  - Arrhythmias\n  - ECG\npublishedAt: 2024-02-01\n---\nFlutter waves at 300/min.\n";
        let article = parse_article("file-name", doc).unwrap();
        assert_eq!(article.slug, "atrial-flutter");
        assert_eq!(article.title, "Atrial Flutter");
        assert_eq!(article.excerpt, "Sawtooth waves");
        assert_eq!(article.tags, vec!["Arrhythmias", "ECG"]);
        assert_eq!(article.published_at, "2024-02-01");
        assert_eq!(article.content, "Flutter waves at 300/min.\n");
    }

    #[test]
    fn test_parse_article_slug_from_file_name() {
        let article = parse_article("qt-basics", "---\ntitle: QT\n---\nbody").unwrap();
        assert_eq!(article.slug, "qt-basics");
    }

    #[test]
    fn test_parse_article_without_frontmatter() {
        let article = parse_article("plain", "Just a body").unwrap();
        assert_eq!(article.slug, "plain");
        assert_eq!(article.title, "");
        assert_eq!(article.content, "Just a body");
    }

    #[test]
    fn test_parse_article_null_tags() {
        let article = parse_article("x", "---\ntitle: x\ntags:\n---\n").unwrap();
        assert!(article.tags.is_empty());
    }

    #[test]
    fn test_parse_article_bad_yaml_is_error() {
        assert!(parse_article("x", "---\ntitle: [unclosed\n---\nbody").is_err());
    }

    #[test]
    fn test_parse_video_defaults_tags_to_category() {
        let video = parse_video(
            "stemi-intro",
            "videoId: abc123\ntitle: STEMI intro\ncategory: STEMI & MI\n",
        )
        .unwrap();
        assert_eq!(video.slug, "stemi-intro");
        assert_eq!(video.video_id, "abc123");
        assert_eq!(video.tags, vec!["STEMI & MI"]);
    }

    #[test]
    fn test_parse_video_keeps_explicit_tags() {
        let video = parse_video(
            "v",
            "title: Heart block\ncategory: Conduction Blocks\ntags: [av block, pr interval]\n",
        )
        .unwrap();
        assert_eq!(video.tags, vec!["av block", "pr interval"]);
    }

    #[test]
    fn test_parse_video_explicit_empty_tags_stay_empty() {
        let video = parse_video("v", "title: AF\ncategory: Arrhythmias\ntags: []\n").unwrap();
        assert!(video.tags.is_empty());
    }

    #[test]
    fn test_parse_video_null_tags_default_to_category() {
        let video = parse_video("v", "title: AF\ncategory: Arrhythmias\ntags:\n").unwrap();
        assert_eq!(video.tags, vec!["Arrhythmias"]);
    }

    #[test]
    fn test_empty_featured_reads_as_false() {
        let video = parse_video(
            "v",
            "title: AF\ndescription: irregular\ncategory: Arrhythmias\nfeatured:\n",
        )
        .unwrap();
        assert!(!video.featured);
        assert_eq!(video.title, "AF");

        let article = parse_article("a", "---\ntitle: AF\nfeatured:\n---\nbody").unwrap();
        assert!(!article.featured);
        assert_eq!(article.title, "AF");

        let article = parse_article("a", "---\ntitle: AF\nfeatured: true\n---\nbody").unwrap();
        assert!(article.featured);
    }

    #[test]
    fn test_parse_video_empty_document() {
        let video = parse_video("empty", "").unwrap();
        assert_eq!(video.slug, "empty");
        assert!(video.tags.is_empty());
    }
}
