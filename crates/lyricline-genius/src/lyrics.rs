//! Lyrics extraction from a Genius song page.
//!
//! The page carries lyrics in one or more `<div data-lyrics-container="true">`
//! blocks, with `<br>` line breaks, inline annotation links, and nested
//! `data-exclude-from-selection` widgets that are not part of the text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[data-lyrics-container="true"]"#).expect("valid lyrics selector")
});

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]").expect("valid section header pattern"));

/// Plain-text lyrics from a song page, or `None` if the page has no lyrics block.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let blocks: Vec<String> = doc
        .select(&CONTAINER)
        .map(|container| {
            let mut text = String::new();
            render(container, &mut text);
            text
        })
        .collect();

    let text = blocks.join("\n").replace('\u{a0}', " ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn is_excluded(el: &Element) -> bool {
    el.attr("data-exclude-from-selection").is_some()
}

/// Text under `element`: `<br>` becomes a newline, excluded widgets vanish.
fn render(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(inner) = ElementRef::wrap(child) {
            let el = inner.value();
            if el.name() == "br" {
                out.push('\n');
            } else if !is_excluded(el) {
                render(inner, out);
            }
        } else if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }
}

/// Remove `[Verse 1: Artist]`-style headers.
///
/// Lines that held only a header disappear; runs of blank lines collapse to one.
pub fn remove_section_headers(lyrics: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in lyrics.lines() {
        let line = if SECTION_HEADER.is_match(line) {
            let stripped = SECTION_HEADER.replace_all(line, "");
            if stripped.trim().is_empty() {
                continue;
            }
            stripped.trim().to_string()
        } else {
            line.to_string()
        };
        let blank = line.trim().is_empty();
        if blank && lines.last().is_none_or(|prev| prev.trim().is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}
