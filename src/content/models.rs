// Content models — articles, videos, and the union the CLI passes around.
//
// Field names follow the content files (camelCase front matter and YAML).
// Every field is optional in the files; missing strings default to empty.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::relevance::Relevant;

/// A blog article: front matter plus the markdown body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: String,
    pub updated_at: String,
    #[serde(deserialize_with = "nullable_bool")]
    pub featured: bool,
    pub image_url: String,
    #[serde(deserialize_with = "nullable_list")]
    pub tags: Vec<String>,
    /// Markdown body after the front matter; never present in the front matter itself.
    #[serde(skip_deserializing)]
    pub content: String,
}

impl Article {
    pub fn url(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

impl Relevant for Article {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.content
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn match_text(&self) -> String {
        format!("{} {} {}", self.title, self.excerpt, self.content)
    }

    fn summary_text(&self) -> String {
        format!("{} {} {}", self.title, self.excerpt, self.tags.join(" "))
    }
}

/// A library video. The slug is the file stem, not a YAML field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    #[serde(skip_deserializing)]
    pub slug: String,
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub published_at: String,
    #[serde(deserialize_with = "nullable_bool")]
    pub featured: bool,
    #[serde(deserialize_with = "nullable_list")]
    pub tags: Vec<String>,
}

impl Video {
    pub fn url(&self) -> String {
        format!("/watch/{}", self.slug)
    }
}

impl Relevant for Video {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Either kind of content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Article(Article),
    Video(Video),
}

impl ContentItem {
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Article(_) => "article",
            ContentItem::Video(_) => "video",
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            ContentItem::Article(a) => &a.slug,
            ContentItem::Video(v) => &v.slug,
        }
    }

    pub fn url(&self) -> String {
        match self {
            ContentItem::Article(a) => a.url(),
            ContentItem::Video(v) => v.url(),
        }
    }
}

impl From<Article> for ContentItem {
    fn from(article: Article) -> Self {
        ContentItem::Article(article)
    }
}

impl From<Video> for ContentItem {
    fn from(video: Video) -> Self {
        ContentItem::Video(video)
    }
}

impl Relevant for ContentItem {
    fn title(&self) -> &str {
        match self {
            ContentItem::Article(a) => a.title(),
            ContentItem::Video(v) => v.title(),
        }
    }

    fn body(&self) -> &str {
        match self {
            ContentItem::Article(a) => a.body(),
            ContentItem::Video(v) => v.body(),
        }
    }

    fn tags(&self) -> &[String] {
        match self {
            ContentItem::Article(a) => a.tags(),
            ContentItem::Video(v) => v.tags(),
        }
    }

    fn match_text(&self) -> String {
        match self {
            ContentItem::Article(a) => a.match_text(),
            ContentItem::Video(v) => v.match_text(),
        }
    }

    fn summary_text(&self) -> String {
        match self {
            ContentItem::Article(a) => a.summary_text(),
            ContentItem::Video(v) => v.summary_text(),
        }
    }
}

/// `tags:` with no value parses as an empty list rather than an error.
fn nullable_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `featured:` with no value reads as `false`.
fn nullable_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a `publishedAt` value: RFC 3339 timestamps or plain `YYYY-MM-DD` dates.
pub fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
