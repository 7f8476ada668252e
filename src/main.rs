use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crosslink::config::Config;
use crosslink::content::{ContentStore, FileContentStore};
use crosslink::output::{terminal, RelatedLink};
use crosslink::relevance::matcher::Strategy;
use crosslink::relevance::Relevant;

/// Crosslink: related-content matching for a medical education site.
///
/// Links blog articles to library videos (and back) by keyword, tag and
/// clinical-term overlap, reading the site's content tree directly.
#[derive(Parser)]
#[command(name = "crosslink", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the videos related to an article
    RelatedVideos {
        /// Article slug (e.g. atrial-fibrillation-ecg)
        slug: String,

        /// How many videos to show (default: CROSSLINK_RELATED_LIMIT or 3)
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the articles related to a video
    RelatedArticles {
        /// Video slug (the video file name without extension)
        slug: String,

        /// How many articles to show (default: CROSSLINK_RELATED_LIMIT or 3)
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how an article/video pair is scored
    Explain {
        /// Article slug
        article: String,

        /// Video slug
        video: String,
    },

    /// Show the keyword set and medical phrases extracted from an item
    Keywords {
        /// Article or video slug (articles are checked first)
        slug: String,
    },

    /// Print an article body with clinical terms linked to videos
    Link {
        /// Article slug
        slug: String,
    },

    /// Show the content directories and how many items they hold
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crosslink=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::RelatedVideos { slug, limit, json } => {
            config.require_content()?;
            let store = FileContentStore::new(&config.content_dir);

            let article = store
                .article(&slug)
                .await?
                .with_context(|| format!("No article with slug '{slug}'"))?;
            let videos = store.published_videos().await?;

            let matcher = config.matcher().with_limit(limit.unwrap_or(config.related_limit));
            let links: Vec<RelatedLink> = matcher
                .related(&article, &videos)
                .iter()
                .map(RelatedLink::from_ranked)
                .collect();

            info!(article = slug.as_str(), related = links.len(), "Matched videos");
            emit(&format!("Related videos for \"{}\"", article.title), &links, json)?;
        }

        Commands::RelatedArticles { slug, limit, json } => {
            config.require_content()?;
            let store = FileContentStore::new(&config.content_dir);

            let video = store
                .video(&slug)
                .await?
                .with_context(|| format!("No video with slug '{slug}'"))?;
            let articles = store.published_articles().await?;

            let matcher = config.matcher().with_limit(limit.unwrap_or(config.related_limit));
            let links: Vec<RelatedLink> = matcher
                .related(&video, &articles)
                .iter()
                .map(RelatedLink::from_ranked)
                .collect();

            info!(video = slug.as_str(), related = links.len(), "Matched articles");
            emit(&format!("Related articles for \"{}\"", video.title), &links, json)?;
        }

        Commands::Explain { article, video } => {
            config.require_content()?;
            let store = FileContentStore::new(&config.content_dir);

            let article = store
                .article(&article)
                .await?
                .with_context(|| format!("No article with slug '{article}'"))?;
            let video = store
                .video(&video)
                .await?
                .with_context(|| format!("No video with slug '{video}'"))?;

            let matcher = config.matcher();
            let forward = matcher.scorer.breakdown(&article, &video);
            let backward = matcher.scorer.breakdown(&video, &article);

            terminal::display_breakdown(&article.title, &video.title, &forward);
            terminal::display_breakdown(&video.title, &article.title, &backward);

            if config.strategy == Strategy::Jaccard {
                println!(
                    "\n  Jaccard similarity: {:.3}",
                    matcher.score(&article, &video)
                );
            }
        }

        Commands::Keywords { slug } => {
            config.require_content()?;
            let store = FileContentStore::new(&config.content_dir);

            let item = store
                .item(&slug)
                .await?
                .with_context(|| format!("No article or video with slug '{slug}'"))?;

            let profile = config.matcher().scorer.profile(&item);
            terminal::display_keywords(item.title(), profile.keywords(), profile.phrases());
            println!(
                "  {}",
                format!("{} {}", item.kind(), item.url()).dimmed()
            );
        }

        Commands::Link { slug } => {
            config.require_content()?;
            let store = FileContentStore::new(&config.content_dir);

            let article = store
                .article(&slug)
                .await?
                .with_context(|| format!("No article with slug '{slug}'"))?;
            let videos = store.published_videos().await?;

            let terms = crosslink::linking::linkable_terms(&article.content);
            info!(article = slug.as_str(), terms = terms.len(), "Linking clinical terms");

            let linked = crosslink::linking::add_internal_links(&article.content, &videos);
            println!("{linked}");
        }

        Commands::Status => {
            println!("Content directory: {}", config.content_dir.display());
            if !config.content_dir.is_dir() {
                println!("  not found");
                println!("\nSet CROSSLINK_CONTENT_DIR to the folder holding articles/ and videos/.");
                return Ok(());
            }

            let store = FileContentStore::new(&config.content_dir);
            let articles = store.published_articles().await?;
            let videos = store.published_videos().await?;

            println!(
                "Articles: {} ({})",
                articles.len(),
                store.articles_dir().display()
            );
            println!("Videos: {} ({})", videos.len(), store.videos_dir().display());
            println!(
                "Matching: {} strategy, {} tag counting, {} stop words, limit {}",
                config.strategy.as_str(),
                config.tag_matching.as_str(),
                config.stop_words.as_str(),
                config.related_limit
            );
        }
    }

    Ok(())
}

/// Print related links as JSON or as a terminal table.
fn emit(heading: &str, links: &[RelatedLink], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(links)?);
    } else {
        terminal::display_related(heading, links);
    }
    Ok(())
}
