//! Generic content-item repository over a directory of markdown files

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::frontmatter;
use super::markdown::MarkdownRenderer;
use crate::error::{ContentError, Result};
use crate::helpers::html::strip_html;

/// File extension every content file must carry
const MARKDOWN_EXTENSION: &str = "md";

/// One loaded content item
#[derive(Debug, Clone)]
pub struct Item<M> {
    /// Identifier derived from the file's base name
    pub slug: String,

    /// Rendered HTML body, front-matter stripped
    pub content: String,

    /// Validated kind-specific metadata
    pub metadata: M,

    /// Estimated minutes to read, from rendered text length
    pub reading_time: f64,
}

/// A repository binding one content kind to a directory and its schema.
///
/// The schema is the metadata type's `Deserialize` impl: a file whose
/// front-matter does not satisfy it fails the load, it is never skipped.
/// Nothing is cached; every call re-reads and re-renders from disk.
pub struct Collection<M> {
    directory: PathBuf,
    renderer: MarkdownRenderer,
    words_per_minute: f64,
    _metadata: PhantomData<fn() -> M>,
}

impl<M: DeserializeOwned> Collection<M> {
    /// Bind a collection to a directory
    pub fn new(
        directory: impl Into<PathBuf>,
        renderer: MarkdownRenderer,
        words_per_minute: f64,
    ) -> Self {
        Self {
            directory: directory.into(),
            renderer,
            words_per_minute,
            _metadata: PhantomData,
        }
    }

    /// Load the item whose file is `{slug}.md` in the bound directory.
    ///
    /// Returns `Ok(None)` when the path is absent, not a regular file,
    /// or a symbolic link. Links are rejected on purpose: a slug must
    /// resolve to a real file inside the collection.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Item<M>>> {
        // A slug is a bare file stem, never a path
        if slug.contains(['/', '\\']) || slug == ".." {
            return Ok(None);
        }

        let path = self.directory.join(format!("{}.{}", slug, MARKDOWN_EXTENSION));
        if !is_regular_file(&path) {
            return Ok(None);
        }
        self.load(&path).map(Some)
    }

    /// Load every item in the bound directory.
    ///
    /// One file's failure fails the whole call. Order is unspecified;
    /// callers sort.
    pub fn find_all(&self) -> Result<Vec<Item<M>>> {
        let entries = fs::read_dir(&self.directory).map_err(|source| ContentError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: self.directory.clone(),
                source,
            })?;
            let path = entry.path();
            if !is_markdown_file(&path) || !is_regular_file(&path) {
                continue;
            }
            items.push(self.load(&path)?);
        }

        tracing::debug!(
            "loaded {} items from {}",
            items.len(),
            self.directory.display()
        );
        Ok(items)
    }

    /// Read, render, and validate a single file
    fn load(&self, path: &Path) -> Result<Item<M>> {
        let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (raw_metadata, body) =
            frontmatter::extract(&source).map_err(|source| ContentError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;

        let content = self
            .renderer
            .render(body)
            .map_err(|source| ContentError::Render {
                path: path.to_path_buf(),
                source,
            })?;

        let metadata: M =
            serde_yaml::from_value(raw_metadata).map_err(|source| ContentError::Metadata {
                path: path.to_path_buf(),
                source,
            })?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let reading_time = reading_time(&content, self.words_per_minute);

        Ok(Item {
            slug,
            content,
            metadata,
            reading_time,
        })
    }
}

/// Estimated minutes to read, from the visible words of rendered HTML
pub fn reading_time(html: &str, words_per_minute: f64) -> f64 {
    let text = strip_html(html);
    let words = text.split_whitespace().count();
    words as f64 / words_per_minute
}

/// True for an existing regular file; false for symlinks and directories
fn is_regular_file(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_file())
        .unwrap_or(false)
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == MARKDOWN_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct NoteMetadata {
        title: String,
    }

    fn write_note(dir: &Path, name: &str, body: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        write!(file, "---\ntitle: {}\n---\n\n{}\n", name, body).unwrap();
    }

    fn collection(dir: &Path) -> Collection<NoteMetadata> {
        Collection::new(dir, MarkdownRenderer::new(), 200.0)
    }

    #[test]
    fn test_find_by_slug_loads_item() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "hello.md", "Just a paragraph of plain text.");

        let item = collection(dir.path()).find_by_slug("hello").unwrap().unwrap();
        assert_eq!(item.slug, "hello");
        assert_eq!(item.metadata.title, "hello.md");
        assert!(item.content.contains("<p>Just a paragraph of plain text.</p>"));
        // No front-matter leakage into the rendered body
        assert!(!item.content.contains("title:"));
    }

    #[test]
    fn test_find_by_slug_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let found = collection(dir.path()).find_by_slug("nope").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_find_by_slug_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "real.md", "text");
        let found = collection(dir.path()).find_by_slug("../real").unwrap();
        assert!(found.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_by_slug_rejects_symlink() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "real.md", "text");
        std::os::unix::fs::symlink(dir.path().join("real.md"), dir.path().join("alias.md"))
            .unwrap();

        let repo = collection(dir.path());
        assert!(repo.find_by_slug("alias").unwrap().is_none());
        assert!(repo.find_by_slug("real").unwrap().is_some());
    }

    #[test]
    fn test_find_all_loads_every_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "one.md", "first");
        write_note(dir.path(), "two.md", "second");
        fs::write(dir.path().join("notes.txt"), "not content").unwrap();

        let mut items = collection(dir.path()).find_all().unwrap();
        items.sort_by(|a, b| a.slug.cmp(&b.slug));
        let slugs: Vec<&str> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, ["one", "two"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_all_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "real.md", "text");
        std::os::unix::fs::symlink(dir.path().join("real.md"), dir.path().join("alias.md"))
            .unwrap();

        let items = collection(dir.path()).find_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slug, "real");
    }

    #[test]
    fn test_find_all_fails_on_invalid_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "good.md", "fine");
        // Missing the required title field
        fs::write(dir.path().join("bad.md"), "---\nauthor: nobody\n---\n\nbody\n").unwrap();

        let err = collection(dir.path()).find_all().unwrap_err();
        assert!(matches!(err, ContentError::Metadata { .. }));
    }

    #[test]
    fn test_find_all_fails_on_missing_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bare.md"), "no metadata here\n").unwrap();

        let err = collection(dir.path()).find_all().unwrap_err();
        assert!(matches!(err, ContentError::Frontmatter { .. }));
    }

    #[test]
    fn test_reading_time_is_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "short.md", "a few words only");
        write_note(
            dir.path(),
            "long.md",
            &"a few words only ".repeat(50),
        );

        let repo = collection(dir.path());
        let short = repo.find_by_slug("short").unwrap().unwrap();
        let long = repo.find_by_slug("long").unwrap().unwrap();
        assert!(long.reading_time > short.reading_time);
        assert!(short.reading_time > 0.0);
    }

    #[test]
    fn test_reading_time_counts_visible_words() {
        // 200 visible words at 200 wpm is one minute, markup excluded
        let html = format!("<p>{}</p>", "word ".repeat(200));
        let minutes = reading_time(&html, 200.0);
        assert!((minutes - 1.0).abs() < f64::EPSILON);
    }
}
