//! Markdown conversion: rendered HTML plus front-matter metadata.
//!
//! Conversion is best-effort and never fails: malformed metadata lines are
//! skipped with a warning and malformed markdown renders to whatever the
//! parser makes of it.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

const METADATA_DELIMITER: &str = "---";

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Convert one raw content file into rendered HTML and its metadata.
pub fn convert(raw: &str) -> (String, HashMap<String, String>) {
    let (metadata, body) = extract_metadata(raw);
    (render_html(body), metadata)
}

/// Split a leading metadata block off a document.
///
/// A metadata block is a first line of exactly `---`, then `key: value`
/// lines, then a closing `---` line. Returns the parsed pairs and the rest of
/// the document. Lines without a colon inside the block are skipped, not
/// fatal. An unterminated block is not a metadata block: the whole document
/// is returned as body.
pub fn extract_metadata(raw: &str) -> (HashMap<String, String>, &str) {
    let mut metadata = HashMap::new();

    let Some(first_line_end) = delimiter_prefix_len(raw) else {
        return (metadata, raw);
    };

    let mut rest = &raw[first_line_end..];
    loop {
        let (line, line_len) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        let trimmed = line.trim_end_matches('\r');

        if trimmed == METADATA_DELIMITER {
            return (metadata, &rest[line_len..]);
        }
        if line_len == 0 {
            // Ran off the end without a closing delimiter.
            warn!("unterminated metadata block, rendering document as-is");
            return (HashMap::new(), raw);
        }

        match trimmed.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                metadata.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ if trimmed.trim().is_empty() => {}
            _ => warn!(line = trimmed, "skipping malformed metadata line"),
        }

        rest = &rest[line_len..];
    }
}

/// Byte length of the opening delimiter line, if the document starts with one.
fn delimiter_prefix_len(raw: &str) -> Option<usize> {
    let line_end = raw.find('\n').map(|p| p + 1).unwrap_or(raw.len());
    let first_line = raw[..line_end].trim_end_matches(['\n', '\r']);
    (first_line == METADATA_DELIMITER && line_end < raw.len()).then_some(line_end)
}

/// Render markdown to HTML.
///
/// Links open in a new window, and bare `http(s)://` URLs in plain text are
/// autolinked, matching the original repository's rendering convention.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let url_pattern = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s<>]+").unwrap());

    let mut events: Vec<Event> = Vec::new();
    let mut in_code_block = false;
    let mut in_link = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                events.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                events.push(event);
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                in_link = true;
                events.push(Event::Html(CowStr::from(open_link_tag(&dest_url))));
            }
            Event::End(TagEnd::Link) => {
                in_link = false;
                events.push(Event::Html(CowStr::from("</a>")));
            }
            Event::Text(text) if !in_code_block && !in_link => {
                autolink_text(&text, url_pattern, &mut events);
            }
            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn open_link_tag(dest: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">",
        escape_attribute(dest)
    )
}

/// Split a text event around any bare URLs, emitting each URL as a link.
fn autolink_text<'a>(text: &str, url_pattern: &Regex, events: &mut Vec<Event<'a>>) {
    let mut cursor = 0;
    for found in url_pattern.find_iter(text) {
        // Trailing sentence punctuation belongs to the prose, not the URL.
        let url = found.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
        if url.is_empty() {
            continue;
        }
        let end = found.start() + url.len();

        if found.start() > cursor {
            events.push(Event::Text(CowStr::from(text[cursor..found.start()].to_string())));
        }
        events.push(Event::Html(CowStr::from(open_link_tag(url))));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::Html(CowStr::from("</a>")));
        cursor = end;
    }
    if cursor < text.len() {
        events.push(Event::Text(CowStr::from(text[cursor..].to_string())));
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
