// Content — article/video models and the stores that load them.

pub mod files;
pub mod frontmatter;
pub mod models;
pub mod traits;

pub use files::FileContentStore;
pub use models::{Article, ContentItem, Video};
pub use traits::ContentStore;
