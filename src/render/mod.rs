//! Markdown subset renderer for summary display.
//!
//! Understands `**bold**`, `*italic*`, `#`/`##`/`###` headings, `- ` list
//! items and paragraphs. Every other non-blank line becomes its own
//! paragraph. Input is always markdown source; feeding rendered
//! output back in is not supported.

use std::fmt::Write;

const PARAGRAPH_OPEN: &str = r#"<p class="mb-2">"#;
const LIST_ITEM_OPEN: &str = r#"<li class="ml-4">"#;
const BULLET: &str = "\u{2022} ";
const MAX_HEADING_LEVEL: usize = 3;

/// A single classified source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading { level: usize, text: &'a str },
    ListItem(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Line::Blank;
        }

        let hashes = line.bytes().take_while(|b| *b == b'#').count();
        if (1..=MAX_HEADING_LEVEL).contains(&hashes) {
            if let Some(text) = line[hashes..].strip_prefix(' ') {
                return Line::Heading {
                    level: hashes,
                    text,
                };
            }
        }

        if let Some(text) = line.strip_prefix("- ") {
            return Line::ListItem(text);
        }

        Line::Text(line)
    }
}

/// Render markdown into display markup.
///
/// Headings and list items are emitted as standalone blocks and are never
/// wrapped in a paragraph. Each remaining non-blank line is its own
/// paragraph; blank lines only separate blocks.
pub fn render(markdown: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for raw in markdown.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        match Line::classify(line) {
            Line::Blank => {}
            Line::Heading { level, text } => {
                blocks.push(format!(
                    r#"<h{level} class="{}">{}</h{level}>"#,
                    heading_class(level),
                    render_inline(text)
                ));
            }
            Line::ListItem(text) => blocks.push(format!(
                "{LIST_ITEM_OPEN}{BULLET}{}</li>",
                render_inline(text)
            )),
            Line::Text(text) => {
                blocks.push(format!("{PARAGRAPH_OPEN}{}</p>", render_inline(text)))
            }
        }
    }

    blocks.join("\n")
}

fn heading_class(level: usize) -> &'static str {
    match level {
        1 => "text-2xl font-bold mt-4 mb-2",
        2 => "text-xl font-semibold mt-4 mb-2",
        _ => "text-lg font-semibold mt-4 mb-2",
    }
}

/// Inline emphasis for one line. Bold runs first so that `**` pairs are
/// consumed before single `*` markers are considered.
fn render_inline(text: &str) -> String {
    let escaped = escape(text);
    let bold = wrap_delimited(&escaped, "**", "strong");
    wrap_delimited(&bold, "*", "em")
}

/// Wrap every shortest `marker ... marker` span in `<tag>`. An opening marker
/// with no closing partner is left as literal text.
fn wrap_delimited(text: &str, marker: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(marker) {
        let inner = &rest[open + marker.len()..];
        let Some(close) = inner.find(marker) else {
            break;
        };

        out.push_str(&rest[..open]);
        let _ = write!(out, "<{tag}>{}</{tag}>", &inner[..close]);
        rest = &inner[close + marker.len()..];
    }

    out.push_str(rest);
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
