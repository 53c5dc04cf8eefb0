//! faml: a lightweight markup parser producing a document tree
//!
//! Parsing runs in two phases. The block parser consumes the input one line
//! at a time and builds a tree of containers (block quotes, lists, list
//! items) and leaves (paragraphs, headers, fenced code). Once the structure
//! is complete, the inline scanner turns the text of each paragraph and
//! header into inline nodes (emphasis, code spans, links, entities, breaks).
//!
//! # Design Principles
//! - Total: every input parses; unmatched syntax becomes literal text
//! - No regex: byte-level scanning over `&str`
//! - No shared state: each call owns its parser and scanner
//! - The tree is plain owned data, so it can be inspected or serialized
//!
//! # Example
//! ```
//! use faml::{parse, BlockKind, Inline};
//!
//! let doc = parse("# Title\n\nSome *text*.");
//! assert_eq!(doc.children[0].kind, BlockKind::Header { level: 1 });
//! assert_eq!(
//!     doc.children[1].inline_content[1],
//!     Inline::Emph(vec![Inline::str("text")])
//! );
//! ```

pub mod block;
pub mod cursor;
pub mod escape;
pub mod inline;
pub mod limits;
pub mod lines;
pub mod render;

// Re-export primary types
pub use block::{AST_VERSION, Block, BlockKind, BlockParser, ListData, ListKind};
pub use inline::{Inline, parse_inlines};
pub use render::{HtmlWriter, render_html, render_into};

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Prefix for the CSS class derived from a fenced code block's info
    /// string (`language-` gives `class="language-rust"`).
    pub fenced_class_prefix: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fenced_class_prefix: "language-".to_owned(),
        }
    }
}

/// Parse `input` into a document tree.
///
/// The returned block is always a [`BlockKind::Document`]. Paragraphs and
/// headers have their `inline_content` filled in.
pub fn parse(input: &str) -> Block {
    let mut parser = BlockParser::new();
    let mut line_count = 0;
    for (i, line) in lines::split_lines(input).enumerate() {
        line_count = i + 1;
        parser.incorporate_line(line, line_count);
    }
    let mut doc = parser.finish(line_count);
    process_inlines(&mut doc);
    doc
}

/// Scan the text of every paragraph and header into inline nodes.
fn process_inlines(block: &mut Block) {
    if block.kind.has_inlines() {
        block.inline_content = parse_inlines(block.string_content.trim());
        block.string_content.clear();
    }
    for child in &mut block.children {
        process_inlines(child);
    }
}

/// Convert markup to HTML.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = faml::to_html("# Hello\n\nWorld");
/// assert_eq!(html, "<h1>Hello</h1>\n<p>World</p>\n");
/// ```
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Convert markup to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    let mut writer = HtmlWriter::with_capacity_for(input.len());
    render_into(&parse(input), &mut writer, options);
    writer.into_string()
}

/// Convert markup to HTML, writing into a provided buffer.
///
/// The buffer is cleared first; its capacity is reused.
pub fn to_html_into(input: &str, out: &mut Vec<u8>) {
    to_html_into_with_options(input, out, &Options::default());
}

/// Convert markup to HTML into a provided buffer with options.
pub fn to_html_into_with_options(input: &str, out: &mut Vec<u8>, options: &Options) {
    out.clear();
    out.reserve(input.len() + input.len() / 4);
    let mut writer = HtmlWriter::from_vec(std::mem::take(out));
    render_into(&parse(input), &mut writer, options);
    *out = writer.into_vec();
}
