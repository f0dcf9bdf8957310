//! site-content: markdown content collections for a personal website
//!
//! This crate loads the content behind a personal site: blog posts and
//! job-history entries stored as markdown files with YAML front-matter.
//! Files are read fresh on every call, rendered to sanitized HTML with
//! syntax highlighting, math typesetting, and slugified heading ids, and
//! validated against a per-kind metadata schema.

pub mod config;
pub mod content;
pub mod error;
pub mod helpers;

use std::path::{Path, PathBuf};

use config::SiteConfig;
use content::collection::Collection;
use content::markdown::MarkdownRenderer;
use content::{Job, JobMetadata, Post, PostMetadata};
use error::Result;

/// A site's content root
///
/// Cheap to construct and holds no content state; every lookup re-reads
/// the filesystem.
#[derive(Debug, Clone)]
pub struct Site {
    /// Content-loading configuration
    pub config: SiteConfig,
    /// Root directory containing one subdirectory per content kind
    pub content_dir: PathBuf,
}

impl Site {
    /// Open a site from its base directory.
    ///
    /// Reads `site.yml` from the base directory when present, otherwise
    /// uses defaults.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("site.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        Ok(Self {
            config,
            content_dir,
        })
    }

    /// Open a site with default configuration and an explicit content
    /// directory
    pub fn from_content_dir<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            config: SiteConfig::default(),
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// The blog post collection
    pub fn blogs(&self) -> Collection<PostMetadata> {
        self.collection(&self.config.blog_dir)
    }

    /// The job history collection
    pub fn jobs(&self) -> Collection<JobMetadata> {
        self.collection(&self.config.jobs_dir)
    }

    fn collection<M: serde::de::DeserializeOwned>(&self, directory: &str) -> Collection<M> {
        Collection::new(
            self.content_dir.join(directory),
            MarkdownRenderer::with_theme(&self.config.highlight_theme),
            self.config.words_per_minute,
        )
    }

    /// All visible blog posts, newest first
    pub fn find_all_blogs(&self, include_unpublished: bool) -> Result<Vec<Post>> {
        content::post::find_all(self, include_unpublished)
    }

    /// One blog post by slug; `Ok(None)` when absent or hidden
    pub fn find_blog_by_slug(
        &self,
        slug: &str,
        include_unpublished: bool,
    ) -> Result<Option<Post>> {
        content::post::find_by_slug(self, slug, include_unpublished)
    }

    /// All job entries, most recent first
    pub fn find_all_jobs(&self) -> Result<Vec<Job>> {
        content::job::find_all(self)
    }

    /// One job entry by slug
    pub fn find_job_by_slug(&self, slug: &str) -> Result<Option<Job>> {
        content::job::find_by_slug(self, slug)
    }
}
