//! HTML rendering of a parsed document tree.
//!
//! Sibling blocks are joined with a single newline. List items render
//! their paragraphs without `<p>` wrappers.

use crate::Options;
use crate::block::{Block, BlockKind, ListKind};
use crate::escape;
use crate::inline::Inline;

/// HTML output writer with pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use faml::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(1000);
/// writer.write_str("<p>");
/// writer.write_escaped_text(b"Hello <World>");
/// writer.write_str("</p>");
///
/// let html = writer.into_string();
/// assert_eq!(html, "<p>Hello &lt;World&gt;</p>");
/// ```
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Typical HTML is ~1.25x input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: Vec::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write into an existing buffer, appending to its contents.
    #[inline]
    pub fn from_vec(out: Vec<u8>) -> Self {
        Self { out }
    }

    /// Write raw bytes without escaping.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a dynamic string without escaping.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text with HTML escaping (for text content).
    #[inline]
    pub fn write_escaped_text(&mut self, text: &[u8]) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write an attribute value, leaving existing entity references intact.
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &[u8]) {
        escape::escape_attr_into(&mut self.out, attr);
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    /// Current output length.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear output for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    /// Get output as byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Take ownership of output buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.out
    }

    /// Take ownership as String.
    pub fn into_string(self) -> String {
        match String::from_utf8(self.out) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    /// Trim whitespace from both ends of everything written since `start`.
    fn trim_from(&mut self, start: usize) {
        let Ok(written) = std::str::from_utf8(&self.out[start..]) else {
            return;
        };
        let leading = written.len() - written.trim_start().len();
        let kept = written.trim().len();
        self.out.truncate(start + leading + kept);
        self.out.drain(start..start + leading);
    }

    // --- HTML Tag Helpers ---

    /// Write opening tag: `<tagname>`
    #[inline]
    pub fn open_tag(&mut self, tag: &'static str) {
        self.write_byte(b'<');
        self.write_str(tag);
        self.write_byte(b'>');
    }

    /// Write closing tag: `</tagname>`
    #[inline]
    pub fn close_tag(&mut self, tag: &'static str) {
        self.write_str("</");
        self.write_str(tag);
        self.write_byte(b'>');
    }

    /// Write heading start: `<hN>`
    #[inline]
    pub fn heading_start(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("<h");
        self.write_byte(b'0' + level);
        self.write_byte(b'>');
    }

    /// Write heading end: `</hN>`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("</h");
        self.write_byte(b'0' + level);
        self.write_byte(b'>');
    }

    /// Write code block start, with a class when the language is non-empty.
    #[inline]
    pub fn code_block_start(&mut self, class_prefix: &str, lang: &str) {
        if lang.is_empty() {
            self.write_str("<pre><code>");
        } else {
            self.write_str("<pre><code class=\"");
            self.write_string(class_prefix);
            self.write_escaped_attr(lang.as_bytes());
            self.write_str("\">");
        }
    }

    /// Write code block end: `</code></pre>`
    #[inline]
    pub fn code_block_end(&mut self) {
        self.write_str("</code></pre>");
    }

    /// Write ordered list start: `<ol>`, or `<ol start="N">` when N is above 1
    #[inline]
    pub fn ol_start(&mut self, start: Option<u64>) {
        match start {
            Some(n) if n > 1 => {
                self.write_str("<ol start=\"");
                self.write_u64(n);
                self.write_str("\">");
            }
            _ => self.write_str("<ol>"),
        }
    }

    /// Write link start: `<a href="url">`, with a title when non-empty.
    #[inline]
    pub fn link_start(&mut self, url: &str, title: &str) {
        self.write_str("<a href=\"");
        self.write_escaped_attr(url.as_bytes());
        if !title.is_empty() {
            self.write_str("\" title=\"");
            self.write_escaped_attr(title.as_bytes());
        }
        self.write_str("\">");
    }

    /// Write line break: `<br />\n`
    #[inline]
    pub fn line_break(&mut self) {
        self.write_str("<br />\n");
    }

    /// Write a u64 as decimal.
    fn write_u64(&mut self, mut n: u64) {
        let mut buf = [0u8; 20];
        let mut i = buf.len();
        loop {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        self.write_bytes(&buf[i..]);
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a document tree to HTML.
///
/// # Example
/// ```
/// use faml::{parse, render_html, Options};
///
/// let doc = parse("# Hi\n\n* one\n* two");
/// let html = render_html(&doc, &Options::default());
/// assert_eq!(html, "<h1>Hi</h1>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
/// ```
pub fn render_html(block: &Block, options: &Options) -> String {
    let mut writer = HtmlWriter::new();
    render_into(block, &mut writer, options);
    writer.into_string()
}

/// Render a block (usually the document) into an existing writer.
pub fn render_into(block: &Block, writer: &mut HtmlWriter, options: &Options) {
    let mut renderer = Renderer {
        w: writer,
        class_prefix: &options.fenced_class_prefix,
    };
    renderer.block(block, false);
}

struct Renderer<'w, 'o> {
    w: &'w mut HtmlWriter,
    class_prefix: &'o str,
}

impl Renderer<'_, '_> {
    fn blocks(&mut self, blocks: &[Block], tight: bool) {
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                self.w.newline();
            }
            self.block(block, tight);
        }
    }

    fn block(&mut self, block: &Block, tight: bool) {
        match &block.kind {
            BlockKind::Document => {
                let start = self.w.len();
                self.blocks(&block.children, tight);
                if self.w.len() > start {
                    self.w.newline();
                }
            }
            BlockKind::Paragraph if tight => self.inlines(&block.inline_content),
            BlockKind::Paragraph => {
                self.w.open_tag("p");
                self.inlines(&block.inline_content);
                self.w.close_tag("p");
            }
            BlockKind::Header { level } => {
                self.w.heading_start(*level);
                self.inlines(&block.inline_content);
                self.w.heading_end(*level);
            }
            BlockKind::BlockQuote => {
                self.w.write_str("<blockquote>\n");
                let start = self.w.len();
                self.blocks(&block.children, tight);
                if self.w.len() > start {
                    self.w.newline();
                }
                self.w.close_tag("blockquote");
            }
            BlockKind::List(data) => {
                let tag = match data.kind {
                    ListKind::Bullet => {
                        self.w.open_tag("ul");
                        "ul"
                    }
                    ListKind::Ordered => {
                        self.w.ol_start(data.start);
                        "ol"
                    }
                };
                self.w.newline();
                self.blocks(&block.children, tight);
                self.w.newline();
                self.w.close_tag(tag);
            }
            BlockKind::ListItem(_) => {
                self.w.open_tag("li");
                let start = self.w.len();
                self.blocks(&block.children, true);
                self.w.trim_from(start);
                self.w.close_tag("li");
            }
            BlockKind::FencedCode { info, .. } => {
                let lang = info.split(' ').next().unwrap_or_default();
                self.w.code_block_start(self.class_prefix, lang);
                self.w.write_escaped_text(block.string_content.as_bytes());
                self.w.code_block_end();
            }
        }
    }

    fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.inline(inline);
        }
    }

    fn inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Str(text) => self.w.write_escaped_text(text.as_bytes()),
            Inline::Softbreak => self.w.newline(),
            Inline::Linebreak => self.w.line_break(),
            Inline::Emph(children) => {
                self.w.open_tag("em");
                self.inlines(children);
                self.w.close_tag("em");
            }
            Inline::Strong(children) => {
                self.w.open_tag("strong");
                self.inlines(children);
                self.w.close_tag("strong");
            }
            Inline::Code(text) => {
                self.w.open_tag("code");
                self.w.write_escaped_text(text.as_bytes());
                self.w.close_tag("code");
            }
            Inline::Entity(text) => self.w.write_string(text),
            Inline::Link { destination, title, label } => {
                self.w.link_start(destination, title);
                self.inlines(label);
                self.w.close_tag("a");
            }
        }
    }
}
