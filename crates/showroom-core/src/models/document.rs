//! Structured rich-text document used for page content.
//!
//! A document is a flat list of blocks; text-bearing blocks hold inline runs.
//! Editing goes through explicit commands (see `showroom-site::editor`), and
//! rendering always escapes text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        marks: BTreeSet<Mark>,
    },
    Link {
        text: String,
        href: String,
    },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            marks: BTreeSet::new(),
        }
    }

    pub fn styled(text: impl Into<String>, marks: &[Mark]) -> Self {
        Inline::Text {
            text: text.into(),
            marks: marks.iter().copied().collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Inline::Text { text, .. } | Inline::Link { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    Paragraph { inlines: Vec<Inline> },
    Heading { level: u8, inlines: Vec<Inline> },
    List { ordered: bool, items: Vec<Vec<Inline>> },
    Quote { inlines: Vec<Inline> },
    Image { url: String, alt: String },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            inlines: vec![Inline::text(text)],
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            inlines: vec![Inline::text(text)],
        }
    }

    /// Inline runs of a paragraph, heading or quote; `None` for lists and images.
    pub fn inlines(&self) -> Option<&Vec<Inline>> {
        match self {
            Block::Paragraph { inlines } | Block::Heading { inlines, .. } | Block::Quote { inlines } => {
                Some(inlines)
            }
            Block::List { .. } | Block::Image { .. } => None,
        }
    }

    pub fn inlines_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Block::Paragraph { inlines } | Block::Heading { inlines, .. } | Block::Quote { inlines } => {
                Some(inlines)
            }
            Block::List { .. } | Block::Image { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render as HTML. All text and attribute values are escaped, and URLs
    /// with a scheme outside the allowed set render as `#`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph { inlines } => {
                    out.push_str("<p>");
                    render_inlines(&mut out, inlines);
                    out.push_str("</p>");
                }
                Block::Heading { level, inlines } => {
                    let level = (*level).clamp(1, 6);
                    out.push_str(&format!("<h{}>", level));
                    render_inlines(&mut out, inlines);
                    out.push_str(&format!("</h{}>", level));
                }
                Block::List { ordered, items } => {
                    let tag = if *ordered { "ol" } else { "ul" };
                    out.push_str(&format!("<{}>", tag));
                    for item in items {
                        out.push_str("<li>");
                        render_inlines(&mut out, item);
                        out.push_str("</li>");
                    }
                    out.push_str(&format!("</{}>", tag));
                }
                Block::Quote { inlines } => {
                    out.push_str("<blockquote>");
                    render_inlines(&mut out, inlines);
                    out.push_str("</blockquote>");
                }
                Block::Image { url, alt } => {
                    out.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_html(safe_url(url, IMAGE_SCHEMES)),
                        escape_html(alt)
                    ));
                }
            }
        }
        out
    }

    /// Text content with one line per block (or list item).
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::List { items, .. } => {
                    for item in items {
                        lines.push(join_inlines(item));
                    }
                }
                Block::Image { alt, .. } => lines.push(alt.clone()),
                other => {
                    if let Some(inlines) = other.inlines() {
                        lines.push(join_inlines(inlines));
                    }
                }
            }
        }
        lines.join("\n")
    }
}

fn join_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::as_str).collect()
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text { text, marks } => {
                let tags: Vec<&str> = marks
                    .iter()
                    .map(|m| match m {
                        Mark::Bold => "strong",
                        Mark::Italic => "em",
                        Mark::Underline => "u",
                    })
                    .collect();
                for tag in &tags {
                    out.push_str(&format!("<{}>", tag));
                }
                out.push_str(&escape_html(text));
                for tag in tags.iter().rev() {
                    out.push_str(&format!("</{}>", tag));
                }
            }
            Inline::Link { text, href } => {
                out.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(safe_url(href, LINK_SCHEMES)),
                    escape_html(text)
                ));
            }
        }
    }
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];
const IMAGE_SCHEMES: &[&str] = &["http", "https"];

/// `raw` if it is relative or its scheme is in `allowed`, otherwise `#`.
///
/// Whitespace and control characters inside the scheme are dropped before
/// comparing, as browsers do.
pub fn safe_url<'a>(raw: &'a str, allowed: &[&str]) -> &'a str {
    let Some(end) = raw.find([':', '/', '?', '#']) else {
        return raw;
    };
    if !raw[end..].starts_with(':') {
        return raw;
    }
    let scheme: String = raw[..end]
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if allowed.contains(&scheme.as_str()) {
        raw
    } else {
        "#"
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_marks_and_escaping() {
        let doc = Document::new(vec![
            Block::heading(2, "Service & Repairs"),
            Block::Paragraph {
                inlines: vec![
                    Inline::text("Open "),
                    Inline::styled("<daily>", &[Mark::Bold, Mark::Italic]),
                ],
            },
        ]);
        assert_eq!(
            doc.to_html(),
            "<h2>Service &amp; Repairs</h2><p>Open <strong><em>&lt;daily&gt;</em></strong></p>"
        );
    }

    #[test]
    fn test_render_neutralises_script_urls() {
        let link = |href: &str| {
            Document::new(vec![Block::Paragraph {
                inlines: vec![Inline::Link {
                    text: "x".to_string(),
                    href: href.to_string(),
                }],
            }])
            .to_html()
        };
        assert_eq!(
            link("javascript:alert(document.cookie)"),
            "<p><a href=\"#\">x</a></p>"
        );
        assert_eq!(link(" JavaScript:alert(1)"), "<p><a href=\"#\">x</a></p>");
        assert_eq!(link("java\tscript:alert(1)"), "<p><a href=\"#\">x</a></p>");
        assert_eq!(link("data:text/html,hi"), "<p><a href=\"#\">x</a></p>");

        assert_eq!(
            link("https://example.com/?q=a&b"),
            "<p><a href=\"https://example.com/?q=a&amp;b\">x</a></p>"
        );
        assert_eq!(
            link("mailto:sales@dealership.com"),
            "<p><a href=\"mailto:sales@dealership.com\">x</a></p>"
        );
        assert_eq!(link("/vehicles/3"), "<p><a href=\"/vehicles/3\">x</a></p>");
        assert_eq!(link("contact#hours"), "<p><a href=\"contact#hours\">x</a></p>");
        assert_eq!(link("/search?at=10:30"), "<p><a href=\"/search?at=10:30\">x</a></p>");

        let image = Document::new(vec![Block::Image {
            url: "javascript:alert(1)".to_string(),
            alt: "a".to_string(),
        }]);
        assert_eq!(image.to_html(), "<img src=\"#\" alt=\"a\">");
    }

    #[test]
    fn test_plain_text_lists_and_images() {
        let doc = Document::new(vec![
            Block::List {
                ordered: true,
                items: vec![vec![Inline::text("One")], vec![Inline::text("Two")]],
            },
            Block::Image {
                url: "/a.jpg".to_string(),
                alt: "Front view".to_string(),
            },
        ]);
        assert_eq!(doc.plain_text(), "One\nTwo\nFront view");
        assert!(doc.to_html().starts_with("<ol><li>One</li>"));
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Block::heading(9, "x"), Block::Heading {
            level: 6,
            inlines: vec![Inline::text("x")],
        });
    }
}
