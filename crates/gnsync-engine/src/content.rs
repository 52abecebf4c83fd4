//! Converts file text into the note store's ENML document format.
//!
//! The header is split off with [`crate::meta::extract`] and only the body is
//! rendered; callers get both so they never parse the header twice.

use gnsync_core::ContentFormat;
use pulldown_cmark::{CowStr, Event, Options, Parser, html};

use crate::meta::{Header, extract};

const ENML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n";

/// Converter output: rendered note content plus the header and raw body it
/// was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub content: String,
    pub header: Header,
    pub body: String,
}

pub trait ContentConverter: Send + Sync {
    fn convert(&self, raw: &str) -> Converted;
}

/// Plain text: every line becomes an escaped `<div>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainConverter;

/// CommonMark with tables, strikethrough and task lists; task-list
/// checkboxes become `<en-todo/>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

pub fn converter_for(format: ContentFormat) -> Box<dyn ContentConverter> {
    match format {
        ContentFormat::Plain => Box::new(PlainConverter),
        ContentFormat::Markdown => Box::new(MarkdownConverter),
    }
}

impl ContentConverter for PlainConverter {
    fn convert(&self, raw: &str) -> Converted {
        let extracted = extract(raw);
        let text = trim_blank_edges(&extracted.body);

        let mut html = String::with_capacity(text.len() + 64);
        for line in text.lines() {
            if line.trim().is_empty() {
                html.push_str("<div><br/></div>");
            } else {
                html.push_str("<div>");
                html.push_str(&escape_html(line));
                html.push_str("</div>");
            }
        }

        Converted {
            content: wrap_enml(&html),
            header: extracted.header,
            body: extracted.body,
        }
    }
}

impl ContentConverter for MarkdownConverter {
    fn convert(&self, raw: &str) -> Converted {
        let extracted = extract(raw);

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(&extracted.body, options).map(|event| match event {
            Event::TaskListMarker(true) => {
                Event::InlineHtml(CowStr::Borrowed("<en-todo checked=\"true\"/>"))
            }
            Event::TaskListMarker(false) => Event::InlineHtml(CowStr::Borrowed("<en-todo/>")),
            other => other,
        });

        let mut rendered = String::with_capacity(extracted.body.len() * 3 / 2);
        html::push_html(&mut rendered, parser);

        Converted {
            content: wrap_enml(&rendered),
            header: extracted.header,
            body: extracted.body,
        }
    }
}

/// Wrap rendered HTML in the ENML envelope.
pub fn wrap_enml(html: &str) -> String {
    format!("{ENML_PROLOG}<en-note>{html}</en-note>")
}

fn trim_blank_edges(text: &str) -> &str {
    text.trim_start_matches(['\r', '\n']).trim_end()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
