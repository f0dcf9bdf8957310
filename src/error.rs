//! Error types for content loading

use std::path::PathBuf;

use thiserror::Error;

use crate::content::frontmatter::FrontmatterError;
use crate::content::markdown::RenderError;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors surfaced while loading a content collection.
///
/// A missing slug is not an error: lookups return `Ok(None)`. Everything
/// here is fatal for the call that produced it, so malformed content is
/// visibly broken during authoring instead of silently dropped from
/// listings.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid front-matter in {}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("invalid metadata in {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to render {}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}
