// Content store trait — where articles and videos come from.
//
// The relevance engine never touches storage; callers load the published
// items through this trait and hand slices to the matcher. The file-backed
// store is the only implementation today.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Article, ContentItem, Video};

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every published article, newest first.
    async fn published_articles(&self) -> Result<Vec<Article>>;

    /// Every published video, newest first.
    async fn published_videos(&self) -> Result<Vec<Video>>;

    /// Look up one article by slug.
    async fn article(&self, slug: &str) -> Result<Option<Article>> {
        let articles = self.published_articles().await?;
        Ok(articles.into_iter().find(|a| a.slug == slug))
    }

    /// Look up one video by slug.
    async fn video(&self, slug: &str) -> Result<Option<Video>> {
        let videos = self.published_videos().await?;
        Ok(videos.into_iter().find(|v| v.slug == slug))
    }

    /// Look up a slug as an article first, then as a video.
    async fn item(&self, slug: &str) -> Result<Option<ContentItem>> {
        if let Some(article) = self.article(slug).await? {
            return Ok(Some(article.into()));
        }
        Ok(self.video(slug).await?.map(ContentItem::from))
    }
}
