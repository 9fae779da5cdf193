//! Body rendering for blog posts and project write-ups

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Markdown renderer with highlighted fenced code
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Use a named syntect theme, falling back to the default one
    pub fn with_theme(name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes
            .remove(name)
            .or_else(|| themes.remove(DEFAULT_THEME))
            .unwrap_or_default();
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Render an MDX/markdown body to HTML
    pub fn render(&self, body: &str) -> String {
        let source = strip_mdx_statements(body);
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(&source, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, buf)) = code.take() {
                        events.push(Event::Html(CowStr::from(
                            self.highlight(&buf, lang.as_deref()),
                        )));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, buf)) = code.as_mut() {
                        buf.push_str(&text);
                    }
                }
                event => {
                    if code.is_none() {
                        events.push(event);
                    }
                }
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) => format!(
                r#"<figure class="highlight language-{}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting failed for {}: {}", lang, e);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    html_escape(lang),
                    html_escape(code)
                )
            }
        }
    }
}

/// Drop top-level MDX `import`/`export` statements
fn strip_mdx_statements(body: &str) -> String {
    // Marker of the open fence; only the same marker closes it
    let mut fence: Option<&str> = None;
    body.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            if let Some(marker) = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m)) {
                match fence {
                    None => fence = Some(marker),
                    Some(open) if open == marker => fence = None,
                    Some(_) => {}
                }
                return true;
            }
            fence.is_some() || !(line.starts_with("import ") || line.starts_with("export "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
