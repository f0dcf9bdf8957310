//! Markdown rendering with syntax highlighting, math, and heading ids

use std::collections::HashMap;

use latex2mathml::{latex_to_mathml, DisplayStyle};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use thiserror::Error;

use crate::helpers::html::html_escape;

/// Errors produced while rendering a markdown body
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid math expression `{expr}`: {message}")]
    Math { expr: String, message: String },
}

/// Markdown renderer
///
/// Applies a fixed transform chain: GFM extensions (tables,
/// strikethrough, task lists, autolinks), math typesetting to MathML,
/// syntect highlighting for fenced code blocks, and slugified `id`
/// attributes on headings.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a renderer with the default highlight theme
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create a renderer with a custom syntect theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render a markdown body (front-matter already stripped) to HTML
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
            | Options::ENABLE_MATH
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();
        // Start-event index and visible text of the heading being scanned
        let mut heading: Option<(usize, String)> = None;
        let mut seen_heading_ids: HashMap<String, usize> = HashMap::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                Event::Start(tag @ Tag::Heading { .. }) => {
                    events.push(Event::Start(tag));
                    heading = Some((events.len() - 1, String::new()));
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some((start, text)) = heading.take() {
                        if let Some(assigned) = assign_heading_id(&text, &mut seen_heading_ids) {
                            if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                                *id = Some(CowStr::from(assigned));
                            }
                        }
                    }
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                Event::InlineMath(expr) => {
                    let mathml = render_math(&expr, DisplayStyle::Inline)?;
                    events.push(Event::InlineHtml(CowStr::from(mathml)));
                }
                Event::DisplayMath(expr) => {
                    let mathml = render_math(&expr, DisplayStyle::Block)?;
                    events.push(Event::Html(CowStr::from(mathml)));
                }
                other => {
                    if let Some((_, text)) = heading.as_mut() {
                        match &other {
                            Event::Text(t) => text.push_str(t),
                            Event::Code(c) => text.push_str(c),
                            _ => {}
                        }
                    }
                    events.push(other);
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a fenced code block.
    ///
    /// An unknown language tag degrades to an escaped plain block; it is
    /// never an error.
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        if let Some(lang) = lang {
            if let Some(syntax) = self
                .syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            {
                if let Some(theme) = self.theme_set.themes.get(&self.theme_name) {
                    if let Ok(highlighted) =
                        highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
                    {
                        return highlighted;
                    }
                }
            }
        }

        match lang {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                html_escape(lang),
                html_escape(code)
            ),
            None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_math(expr: &str, style: DisplayStyle) -> Result<String, RenderError> {
    latex_to_mathml(expr, style).map_err(|e| RenderError::Math {
        expr: expr.to_string(),
        message: e.to_string(),
    })
}

/// Slugify heading text into an `id`, suffixing repeats with `-1`, `-2`…
fn assign_heading_id(text: &str, seen: &mut HashMap<String, usize>) -> Option<String> {
    let base = slug::slugify(text);
    if base.is_empty() {
        return None;
    }
    let count = seen.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base.clone()
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("This is a test.").unwrap();
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let renderer = MarkdownRenderer::new();

        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |")
            .unwrap();
        assert!(html.contains("<table>"));

        let html = renderer.render("~~gone~~").unwrap();
        assert!(html.contains("<del>gone</del>"));

        let html = renderer.render("- [x] done\n- [ ] todo").unwrap();
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_render_supported_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        // syntect emits inline-styled spans for known languages
        assert!(html.contains("<pre style="));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_render_unknown_language_falls_back() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```notalanguage\n<b>raw</b>\n```")
            .unwrap();
        assert!(html.contains("<pre><code class=\"language-notalanguage\">"));
        assert!(html.contains("&lt;b&gt;raw&lt;/b&gt;"));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn test_render_untagged_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain text\n```").unwrap();
        assert!(html.contains("<pre><code>plain text"));
    }

    #[test]
    fn test_heading_ids_are_slugified() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello, World & Friends!").unwrap();
        assert!(html.contains("<h1 id=\"hello-world-friends\">"));
    }

    #[test]
    fn test_duplicate_heading_ids_are_disambiguated() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Setup\n\ntext\n\n## Setup\n").unwrap();
        assert!(html.contains("id=\"setup\""));
        assert!(html.contains("id=\"setup-1\""));
    }

    #[test]
    fn test_render_inline_math() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Euler: $e^{i\\pi} + 1 = 0$").unwrap();
        assert!(html.contains("<math"));
    }

    #[test]
    fn test_render_display_math() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("$$\\sum_{k=1}^n k$$").unwrap();
        assert!(html.contains("<math"));
    }

    #[test]
    fn test_malformed_math_is_error() {
        let renderer = MarkdownRenderer::new();
        let err = renderer.render("broken: $\\frac{1}$").unwrap_err();
        assert!(matches!(err, RenderError::Math { .. }));
    }
}
