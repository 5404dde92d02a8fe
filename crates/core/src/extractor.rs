use crate::error::IndexError;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};
use std::path::Path;

lazy_static! {
    static ref HEADINGS: Selector = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref BOLD: Selector = Selector::parse("b").expect("valid selector");
    static ref ITALIC: Selector = Selector::parse("i").expect("valid selector");
    static ref BODY: Selector = Selector::parse("body").expect("valid selector");
    static ref LINKS: Selector = Selector::parse("a").expect("valid selector");
}

/// Elements rendered with a word break on either side.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "applet", "article", "aside", "audio", "blockquote", "body", "br", "canvas",
    "caption", "center", "col", "colgroup", "dd", "del", "details", "dir", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "ins", "legend", "li", "listing", "main",
    "marquee", "math", "menu", "nav", "noframes", "noscript", "ol", "optgroup", "option", "p",
    "plaintext", "pre", "section", "summary", "svg", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul", "video",
];

/// Elements whose contents are never rendered as text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub headings: String,
    pub title: String,
    pub bold: String,
    pub italic: String,
    pub body: String,
    pub links: String,
}

impl ExtractedFields {
    pub fn spans(&self) -> [(&'static str, &str); 6] {
        [
            ("headings", self.headings.as_str()),
            ("title", self.title.as_str()),
            ("bold", self.bold.as_str()),
            ("italic", self.italic.as_str()),
            ("body", self.body.as_str()),
            ("links", self.links.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    MissingBody,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingTitle => f.write_str("no <title> element"),
            SkipReason::MissingBody => f.write_str("no <body> element"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Extracted(ExtractedFields),
    Skipped(SkipReason),
}

/// Decode bytes as ISO-8859-1. Every byte maps to exactly one char, so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

pub async fn extract_file(path: &Path) -> Result<Extraction, IndexError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(extract_html(&decode_latin1(&bytes)))
}

pub fn extract_html(html: &str) -> Extraction {
    let document = Html::parse_document(html);

    let Some(title) = document.select(&TITLE).next() else {
        return Extraction::Skipped(SkipReason::MissingTitle);
    };
    let Some(body) = document.select(&BODY).next() else {
        return Extraction::Skipped(SkipReason::MissingBody);
    };

    Extraction::Extracted(ExtractedFields {
        headings: joined_text(&document, &HEADINGS),
        title: rendered_text(title),
        bold: joined_text(&document, &BOLD),
        italic: joined_text(&document, &ITALIC),
        body: rendered_text(body),
        links: joined_text(&document, &LINKS),
    })
}

fn joined_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .map(rendered_text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn rendered_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    append_text(element, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn append_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => {
                let name = inner.name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }

                let is_block = BLOCK_ELEMENTS.contains(&name);
                if is_block {
                    out.push(' ');
                }
                if let Some(nested) = ElementRef::wrap(child) {
                    if name == "noscript" {
                        append_noscript_text(nested, out);
                    } else {
                        append_text(nested, out);
                    }
                }
                if is_block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// With scripting enabled the parser keeps `<noscript>` contents as raw
/// markup, so it is parsed again as a fragment before rendering.
fn append_noscript_text(element: ElementRef<'_>, out: &mut String) {
    let markup: String = element.text().collect();
    let fragment = Html::parse_fragment(&markup);
    append_text(fragment.root_element(), out);
}
