//! Site configuration (site.yml)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};

/// Content-loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root directory for content collections, relative to the site base
    pub content_dir: String,

    /// Subdirectory holding blog posts
    pub blog_dir: String,

    /// Subdirectory holding job history entries
    pub jobs_dir: String,

    /// Syntect theme used for fenced code blocks
    pub highlight_theme: String,

    /// Assumed reading speed for the reading-time estimate
    pub words_per_minute: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            blog_dir: "blog".to_string(),
            jobs_dir: "jobs".to_string(),
            highlight_theme: "base16-ocean.dark".to_string(),
            words_per_minute: 200.0,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ContentError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
