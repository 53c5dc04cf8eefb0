//! Block parser implementation.
//!
//! Open blocks live in an arena indexed by [`NodeId`]; each node records its
//! parent by index, so walking up the open chain never needs a back-pointer.
//! Once every line has been incorporated the arena is folded into an owned
//! [`Block`] tree.

use smallvec::SmallVec;

use crate::lines::detab_line;
use crate::limits::MAX_BLOCK_NESTING;

use super::node::{AST_VERSION, Block, BlockKind, ListData, ListKind};

/// Index of a node in the parser arena.
type NodeId = usize;

/// The document root is always the first node.
const DOCUMENT: NodeId = 0;

/// Blocks that must be closed once the current line has been classified.
type PendingClose = SmallVec<[NodeId; 8]>;

/// Bytes that can begin a new container (or are spaces before one).
/// Lines starting with anything else skip the container scan.
const CONTAINER_START: [bool; 256] = {
    let mut table = [false; 256];
    let chars = b" #`~*+_=<>-0123456789";
    let mut i = 0;
    while i < chars.len() {
        table[chars[i] as usize] = true;
        i += 1;
    }
    table
};

/// A block under construction.
#[derive(Debug)]
struct Node {
    kind: BlockKind,
    open: bool,
    last_line_blank: bool,
    start_line: usize,
    end_line: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Line fragments collected while open.
    raw_lines: Vec<String>,
    string_content: String,
    /// Number of ancestors.
    depth: usize,
}

impl Node {
    fn new(kind: BlockKind, line_number: usize, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            kind,
            open: true,
            last_line_blank: false,
            start_line: line_number,
            end_line: line_number,
            parent,
            children: Vec::new(),
            raw_lines: Vec::new(),
            string_content: String::new(),
            depth,
        }
    }
}

/// Line-at-a-time block structure parser.
///
/// Feed lines in order with [`incorporate_line`](Self::incorporate_line),
/// then call [`finish`](Self::finish) to close everything and get the tree.
/// The returned tree has no inline content yet; [`crate::parse`] runs the
/// whole pipeline.
///
/// # Example
/// ```
/// use faml::{BlockKind, BlockParser};
///
/// let mut parser = BlockParser::new();
/// parser.incorporate_line("> quoted", 1);
/// parser.incorporate_line("lazy", 2);
/// let doc = parser.finish(2);
///
/// assert_eq!(doc.children[0].kind, BlockKind::BlockQuote);
/// assert_eq!(doc.children[0].children[0].string_content, "quoted\nlazy");
/// ```
#[derive(Debug)]
pub struct BlockParser {
    nodes: Vec<Node>,
    /// Deepest open block.
    tip: NodeId,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockParser {
    /// Create a parser holding an empty, open document.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(BlockKind::Document, 1, None, 0)],
            tip: DOCUMENT,
        }
    }

    /// Incorporate one logical line (without its line ending).
    ///
    /// `line_number` is 1-based and must increase by one per call.
    pub fn incorporate_line(&mut self, line: &str, line_number: usize) {
        let ln = detab_line(line);
        let ln: &str = &ln;
        let bytes = ln.as_bytes();

        let mut offset = 0;
        let mut blank = false;
        let mut container = DOCUMENT;
        let old_tip = self.tip;

        // Match the prefixes required by each open container.
        while let Some(&last_child) = self.nodes[container].children.last() {
            if !self.nodes[last_child].open {
                break;
            }
            container = last_child;

            let first_nonspace;
            (first_nonspace, blank) = scan_nonspace(bytes, offset);
            let indent = first_nonspace - offset;

            let matched = match &self.nodes[container].kind {
                BlockKind::BlockQuote => {
                    let quoted = indent <= 3 && bytes.get(first_nonspace) == Some(&b'>');
                    if quoted {
                        offset = skip_one_space(bytes, first_nonspace + 1);
                    }
                    quoted
                }
                BlockKind::ListItem(data) => {
                    if indent >= data.content_indent() {
                        offset += data.content_indent();
                        true
                    } else if blank {
                        offset = first_nonspace;
                        true
                    } else {
                        false
                    }
                }
                BlockKind::Header { .. } => false,
                BlockKind::FencedCode { fence_offset, .. } => {
                    let mut remaining = *fence_offset;
                    while remaining > 0 && bytes.get(offset) == Some(&b' ') {
                        offset += 1;
                        remaining -= 1;
                    }
                    true
                }
                BlockKind::Paragraph => !blank,
                BlockKind::Document | BlockKind::List(_) => true,
            };

            if !matched {
                if blank && matches!(self.nodes[container].kind, BlockKind::Paragraph) {
                    self.nodes[container].last_line_blank = true;
                }
                container = self.parent_of(container);
                break;
            }
        }

        let last_matched = container;

        // Closing is deferred until we know this is not a lazy continuation.
        let mut pending = Some(self.unmatched_blocks(old_tip, last_matched));

        // A second blank line ends every enclosing list.
        if blank && self.nodes[container].last_line_blank {
            self.close_unmatched(&mut pending, line_number);
            self.break_out_of_lists(container, line_number);
            container = self.tip;
        }

        // Look for new container starts.
        while !matches!(self.nodes[container].kind, BlockKind::FencedCode { .. })
            && self.nodes[container].depth < MAX_BLOCK_NESTING
            && bytes.get(offset).is_some_and(|&b| CONTAINER_START[b as usize])
        {
            let (first_nonspace, _) = scan_nonspace(bytes, offset);
            let indent = first_nonspace - offset;
            let rest = &ln[first_nonspace..];

            if rest.starts_with('>') {
                offset = skip_one_space(bytes, first_nonspace + 1);
                self.close_unmatched(&mut pending, line_number);
                container = self.add_child(BlockKind::BlockQuote, line_number);
            } else if let Some((level, marker_len)) = scan_atx_header(rest) {
                offset = first_nonspace + marker_len;
                self.close_unmatched(&mut pending, line_number);
                container = self.add_child(BlockKind::Header { level }, line_number);
                let text = trim_header_end(&ln[offset..]);
                self.nodes[container].raw_lines.push(text.to_owned());
                break;
            } else if let Some((fence_char, fence_length)) = scan_opening_fence(rest) {
                self.close_unmatched(&mut pending, line_number);
                let kind = BlockKind::FencedCode {
                    fence_char: char::from(fence_char),
                    fence_length,
                    fence_offset: indent,
                    info: String::new(),
                };
                container = self.add_child(kind, line_number);
                offset = first_nonspace + fence_length;
                break;
            } else if let Some(mut data) = parse_list_marker(rest) {
                self.close_unmatched(&mut pending, line_number);
                data.marker_offset = indent;
                offset = (first_nonspace + data.padding).min(bytes.len());

                let continues_list = match &self.nodes[container].kind {
                    BlockKind::List(list) => list.matches(&data),
                    _ => false,
                };
                if !continues_list {
                    container = self.add_child(BlockKind::List(data.clone()), line_number);
                }
                container = self.add_child(BlockKind::ListItem(data), line_number);
            } else {
                break;
            }

            if self.nodes[container].kind.accepts_lines() {
                break;
            }
        }

        let (first_nonspace, blank) = scan_nonspace(bytes, offset);
        let indent = first_nonspace - offset;

        let tip = &self.nodes[self.tip];
        if self.tip != last_matched
            && !blank
            && matches!(tip.kind, BlockKind::Paragraph)
            && !tip.raw_lines.is_empty()
        {
            // Lazy paragraph continuation.
            self.add_line(ln, offset);
            return;
        }

        self.close_unmatched(&mut pending, line_number);

        let node = &self.nodes[container];
        let empty_item = matches!(node.kind, BlockKind::ListItem(_))
            && node.children.is_empty()
            && node.start_line == line_number;
        let quote_or_code =
            matches!(node.kind, BlockKind::BlockQuote | BlockKind::FencedCode { .. });
        let counts_blank = !quote_or_code && !empty_item;
        self.nodes[container].last_line_blank = blank && counts_blank;

        let mut ancestor = self.nodes[container].parent;
        while let Some(id) = ancestor {
            self.nodes[id].last_line_blank = false;
            ancestor = self.nodes[id].parent;
        }

        match &self.nodes[container].kind {
            BlockKind::FencedCode { fence_char, fence_length, .. } => {
                let closes = indent <= 3
                    && is_closing_fence(&bytes[first_nonspace..], *fence_char, *fence_length);
                if closes {
                    self.finalize(container, line_number);
                } else {
                    self.add_line(ln, offset);
                }
            }
            BlockKind::Header { .. } => {}
            kind if kind.accepts_lines() => self.add_line(ln, first_nonspace),
            _ if blank => {}
            _ => {
                self.add_child(BlockKind::Paragraph, line_number);
                self.add_line(ln, first_nonspace);
            }
        }
    }

    /// Close every open block and return the finished tree.
    ///
    /// `line_count` is the number of lines incorporated; blocks still open
    /// are closed as if by the line after it.
    pub fn finish(mut self, line_count: usize) -> Block {
        let mut id = self.tip;
        loop {
            self.finalize(id, line_count + 1);
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        self.take_block(DOCUMENT)
    }

    #[inline]
    fn parent_of(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent.unwrap_or(DOCUMENT)
    }

    /// Blocks between the old tip and the last matched container, deepest first.
    fn unmatched_blocks(&self, old_tip: NodeId, last_matched: NodeId) -> PendingClose {
        let mut pending = PendingClose::new();
        let mut id = old_tip;
        while id != last_matched {
            pending.push(id);
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        pending
    }

    fn close_unmatched(&mut self, pending: &mut Option<PendingClose>, line_number: usize) {
        if let Some(ids) = pending.take() {
            for id in ids {
                self.finalize(id, line_number);
            }
        }
    }

    /// Finalize `block` and its ancestors up to the outermost enclosing list.
    fn break_out_of_lists(&mut self, block: NodeId, line_number: usize) {
        let mut outermost = None;
        let mut id = Some(block);
        while let Some(current) = id {
            if matches!(self.nodes[current].kind, BlockKind::List(_)) {
                outermost = Some(current);
            }
            id = self.nodes[current].parent;
        }

        let Some(list) = outermost else {
            return;
        };
        log::debug!("line {line_number}: second blank line, breaking out of lists");

        let mut id = block;
        while id != list {
            self.finalize(id, line_number);
            id = self.parent_of(id);
        }
        self.finalize(list, line_number);
        self.tip = self.parent_of(list);
    }

    /// Append a new block under the tip, closing blocks that cannot hold it.
    fn add_child(&mut self, kind: BlockKind, line_number: usize) -> NodeId {
        while !self.nodes[self.tip].kind.can_contain(&kind) {
            let tip = self.tip;
            self.finalize(tip, line_number);
            self.tip = self.parent_of(tip);
        }

        let parent = self.tip;
        log::trace!(
            "line {line_number}: open {} in {}",
            kind.name(),
            self.nodes[parent].kind.name()
        );
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node::new(kind, line_number, Some(parent), depth));
        self.nodes[parent].children.push(id);
        self.tip = id;
        id
    }

    /// Append the rest of `ln` from `offset` to the tip.
    fn add_line(&mut self, ln: &str, offset: usize) {
        let tip = &mut self.nodes[self.tip];
        assert!(tip.open, "attempted to add line {ln:?} to a closed {}", tip.kind.name());
        tip.raw_lines.push(ln[offset.min(ln.len())..].to_owned());
    }

    /// Close a block and build its string content. Closing twice is a no-op.
    fn finalize(&mut self, id: NodeId, line_number: usize) {
        let node = &mut self.nodes[id];
        if !node.open {
            return;
        }
        node.open = false;
        node.end_line = if line_number > node.start_line {
            line_number - 1
        } else {
            line_number
        };

        let lines = std::mem::take(&mut node.raw_lines);
        match &mut node.kind {
            BlockKind::Paragraph => {
                node.string_content = lines.join("\n").trim_start_matches(' ').to_owned();
            }
            BlockKind::Header { .. } => {
                node.string_content = lines.join("\n");
            }
            BlockKind::FencedCode { info, .. } => {
                if let Some((first, rest)) = lines.split_first() {
                    *info = crate::escape::unescape(first.trim()).into_owned();
                    if !rest.is_empty() {
                        let mut content = rest.join("\n");
                        content.push('\n');
                        node.string_content = content;
                    }
                }
            }
            BlockKind::Document
            | BlockKind::BlockQuote
            | BlockKind::List(_)
            | BlockKind::ListItem(_) => {}
        }

        log::trace!(
            "line {line_number}: close {} (lines {}-{})",
            node.kind.name(),
            node.start_line,
            node.end_line
        );
        self.tip = node.parent.unwrap_or(DOCUMENT);
    }

    /// Move a node and its subtree out of the arena.
    fn take_block(&mut self, id: NodeId) -> Block {
        let children = std::mem::take(&mut self.nodes[id].children);
        let children = children.into_iter().map(|child| self.take_block(child)).collect();
        let node = &mut self.nodes[id];
        Block {
            kind: std::mem::replace(&mut node.kind, BlockKind::Document),
            version: (id == DOCUMENT).then_some(AST_VERSION),
            start_line: node.start_line,
            end_line: node.end_line,
            children,
            string_content: std::mem::take(&mut node.string_content),
            inline_content: Vec::new(),
        }
    }
}

/// Position of the first non-space byte at or after `offset`, and whether
/// the rest of the line is blank.
#[inline]
fn scan_nonspace(bytes: &[u8], offset: usize) -> (usize, bool) {
    match bytes.get(offset..).and_then(|rest| rest.iter().position(|&b| b != b' ')) {
        Some(i) => (offset + i, false),
        None => (bytes.len(), true),
    }
}

#[inline]
fn skip_one_space(bytes: &[u8], offset: usize) -> usize {
    if bytes.get(offset) == Some(&b' ') { offset + 1 } else { offset }
}

/// Match `#{1,6}` followed by spaces or end of line.
/// Returns the level and the length of the marker including its spaces.
fn scan_atx_header(rest: &str) -> Option<(u8, usize)> {
    let bytes = rest.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    match bytes.get(hashes) {
        None => Some((hashes as u8, hashes)),
        Some(b' ') => {
            let spaces = bytes[hashes..].iter().take_while(|&&b| b == b' ').count();
            Some((hashes as u8, hashes + spaces))
        }
        Some(_) => None,
    }
}

/// Strip a closing `#` sequence and surrounding spaces from header text.
///
/// A run preceded by an odd number of backslashes is escaped: the escaped
/// `#` stays and only the hashes after it go.
fn trim_header_end(text: &str) -> &str {
    let trimmed = text.trim_end_matches(' ');
    let before_hashes = trimmed.trim_end_matches('#');
    if before_hashes.len() == trimmed.len() {
        return text;
    }

    let backslashes = before_hashes.len() - before_hashes.trim_end_matches('\\').len();
    if backslashes % 2 == 1 {
        &trimmed[..before_hashes.len() + 1]
    } else {
        before_hashes.trim_end_matches(' ')
    }
}

/// Match an opening fence: three or more backticks or tildes with no
/// further fence character on the line. Returns the fence byte and length.
fn scan_opening_fence(rest: &str) -> Option<(u8, usize)> {
    let bytes = rest.as_bytes();
    let fence_char = match bytes.first() {
        Some(&c @ (b'`' | b'~')) => c,
        _ => return None,
    };
    let len = bytes.iter().take_while(|&&b| b == fence_char).count();
    if len < 3 || memchr::memchr(fence_char, &bytes[len..]).is_some() {
        return None;
    }
    Some((fence_char, len))
}

/// Whether `rest` (starting at the first non-space) closes a fence.
fn is_closing_fence(rest: &[u8], fence_char: char, fence_length: usize) -> bool {
    let Ok(fence_byte) = u8::try_from(fence_char) else {
        return false;
    };
    let len = rest.iter().take_while(|&&b| b == fence_byte).count();
    len >= 3 && len >= fence_length && rest[len..].iter().all(|&b| b == b' ')
}

/// Parse a list marker at the start of `rest`.
///
/// Bullets are `*`; ordered markers are digits followed by `.`. Either must
/// be followed by a space or the end of the line. `marker_offset` is left
/// for the caller to fill in.
fn parse_list_marker(rest: &str) -> Option<ListData> {
    let bytes = rest.as_bytes();

    let (mut data, marker_len) = if bytes.first() == Some(&b'*') {
        let data = ListData {
            kind: ListKind::Bullet,
            bullet_char: Some('*'),
            start: None,
            delimiter: None,
            marker_offset: 0,
            padding: 0,
        };
        (data, 1)
    } else {
        let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || bytes.get(digits) != Some(&b'.') {
            return None;
        }
        let start = bytes[..digits].iter().fold(0u64, |n, &d| {
            n.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        });
        let data = ListData {
            kind: ListKind::Ordered,
            bullet_char: None,
            start: Some(start),
            delimiter: Some('.'),
            marker_offset: 0,
            padding: 0,
        };
        (data, digits + 1)
    };

    let spaces = bytes[marker_len..].iter().take_while(|&&b| b == b' ').count();
    if spaces == 0 && marker_len < bytes.len() {
        return None;
    }

    let blank_item = marker_len + spaces == bytes.len();
    data.padding = if (1..=4).contains(&spaces) && !blank_item {
        marker_len + spaces
    } else {
        marker_len + 1
    };
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Block {
        let mut parser = BlockParser::new();
        let mut count = 0;
        for (i, line) in crate::lines::split_lines(input).enumerate() {
            parser.incorporate_line(line, i + 1);
            count = i + 1;
        }
        parser.finish(count)
    }

    fn kinds(block: &Block) -> Vec<&'static str> {
        block.children.iter().map(|b| b.kind.name()).collect()
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("");
        assert!(doc.is_document());
        assert!(doc.children.is_empty());
    }

    #[test]
    fn test_blank_lines() {
        assert!(parse("\n\n   \n").children.is_empty());
    }

    #[test]
    fn test_simple_paragraph() {
        let doc = parse("Hello, world!");
        assert_eq!(kinds(&doc), ["Paragraph"]);
        assert_eq!(doc.children[0].string_content, "Hello, world!");
    }

    #[test]
    fn test_multiline_paragraph() {
        let doc = parse("one\n  two\nthree");
        assert_eq!(doc.children[0].string_content, "one\ntwo\nthree");
        assert_eq!((doc.children[0].start_line, doc.children[0].end_line), (1, 3));
    }

    #[test]
    fn test_paragraph_strips_leading_spaces() {
        let doc = parse("   indented");
        assert_eq!(doc.children[0].string_content, "indented");
    }

    #[test]
    fn test_paragraphs_separated_by_blank() {
        let doc = parse("a\n\nb");
        assert_eq!(kinds(&doc), ["Paragraph", "Paragraph"]);
        assert_eq!(doc.children[0].end_line, 1);
        assert_eq!(doc.children[1].start_line, 3);
    }

    #[test]
    fn test_atx_header() {
        let doc = parse("## Title");
        assert_eq!(doc.children[0].kind, BlockKind::Header { level: 2 });
        assert_eq!(doc.children[0].string_content, "Title");
    }

    #[test]
    fn test_atx_header_needs_space() {
        let doc = parse("#hashtag");
        assert_eq!(kinds(&doc), ["Paragraph"]);
    }

    #[test]
    fn test_atx_header_seven_hashes_is_paragraph() {
        let doc = parse("####### x");
        assert_eq!(kinds(&doc), ["Paragraph"]);
    }

    #[test]
    fn test_atx_header_empty() {
        let doc = parse("#");
        assert_eq!(doc.children[0].kind, BlockKind::Header { level: 1 });
        assert_eq!(doc.children[0].string_content, "");
    }

    #[test]
    fn test_header_is_single_line() {
        let doc = parse("# Title\ntext");
        assert_eq!(kinds(&doc), ["Header", "Paragraph"]);
    }

    #[test]
    fn test_header_interrupts_paragraph() {
        let doc = parse("text\n# Title");
        assert_eq!(kinds(&doc), ["Paragraph", "Header"]);
    }

    #[test]
    fn test_trim_header_end() {
        assert_eq!(trim_header_end("Title ###"), "Title");
        assert_eq!(trim_header_end("Title ###   "), "Title");
        assert_eq!(trim_header_end("Title#"), "Title");
        assert_eq!(trim_header_end("###"), "");
        assert_eq!(trim_header_end("Title"), "Title");
        assert_eq!(trim_header_end("Title  "), "Title  ");
        assert_eq!(trim_header_end(r"Title \###"), r"Title \#");
        assert_eq!(trim_header_end(r"Title \\###"), r"Title \\");
    }

    #[test]
    fn test_fenced_code() {
        let doc = parse("```ruby\ncode\n```");
        let code = &doc.children[0];
        assert!(matches!(
            &code.kind,
            BlockKind::FencedCode { info, fence_length: 3, .. } if info == "ruby"
        ));
        assert_eq!(code.string_content, "code\n");
        assert_eq!((code.start_line, code.end_line), (1, 2));
    }

    #[test]
    fn test_fenced_code_empty() {
        let doc = parse("```\n```");
        assert_eq!(doc.children[0].string_content, "");
    }

    #[test]
    fn test_fenced_code_unclosed_runs_to_end() {
        let doc = parse("~~~\na\n\nb");
        assert_eq!(kinds(&doc), ["FencedCode"]);
        assert_eq!(doc.children[0].string_content, "a\n\nb\n");
    }

    #[test]
    fn test_fenced_code_shorter_closing_is_content() {
        let doc = parse("````\n```\n````");
        assert_eq!(doc.children[0].string_content, "```\n");
    }

    #[test]
    fn test_fenced_code_other_char_is_content() {
        let doc = parse("```\n~~~\n```");
        assert_eq!(doc.children[0].string_content, "~~~\n");
    }

    #[test]
    fn test_fenced_code_backtick_in_info_is_not_fence() {
        let doc = parse("``` a`b");
        assert_eq!(kinds(&doc), ["Paragraph"]);
    }

    #[test]
    fn test_fenced_code_info_unescaped() {
        let doc = parse(r"``` c\+\+ ");
        assert!(matches!(
            &doc.children[0].kind,
            BlockKind::FencedCode { info, .. } if info == "c++"
        ));
    }

    #[test]
    fn test_fenced_code_strips_fence_indent() {
        let doc = parse("  ```\n    x\n y\n  ```");
        assert_eq!(doc.children[0].string_content, "  x\ny\n");
    }

    #[test]
    fn test_blockquote() {
        let doc = parse("> a\n> b");
        assert_eq!(kinds(&doc), ["BlockQuote"]);
        let quote = &doc.children[0];
        assert_eq!(kinds(quote), ["Paragraph"]);
        assert_eq!(quote.children[0].string_content, "a\nb");
    }

    #[test]
    fn test_blockquote_lazy_continuation() {
        let doc = parse("> a\nb");
        assert_eq!(kinds(&doc), ["BlockQuote"]);
        assert_eq!(doc.children[0].children[0].string_content, "a\nb");
    }

    #[test]
    fn test_blockquote_ends_at_blank() {
        let doc = parse("> a\n\nb");
        assert_eq!(kinds(&doc), ["BlockQuote", "Paragraph"]);
    }

    #[test]
    fn test_nested_blockquote() {
        let doc = parse("> > deep");
        let inner = &doc.children[0].children[0];
        assert_eq!(inner.kind, BlockKind::BlockQuote);
        assert_eq!(inner.children[0].string_content, "deep");
    }

    #[test]
    fn test_bullet_list_continuity() {
        let doc = parse("* one\n* two");
        assert_eq!(kinds(&doc), ["List"]);
        assert_eq!(kinds(&doc.children[0]), ["ListItem", "ListItem"]);
    }

    #[test]
    fn test_list_kind_mismatch_starts_new_list() {
        let doc = parse("* one\n1. two");
        assert_eq!(kinds(&doc), ["List", "List"]);
        let ordered = doc.children[1].list_data().unwrap();
        assert_eq!(ordered.kind, ListKind::Ordered);
        assert_eq!(ordered.start, Some(1));
    }

    #[test]
    fn test_ordered_list_start() {
        let doc = parse("7. seven\n8. eight");
        let data = doc.children[0].list_data().unwrap();
        assert_eq!(data.start, Some(7));
        assert_eq!(data.delimiter, Some('.'));
        assert_eq!(doc.children[0].children.len(), 2);
    }

    #[test]
    fn test_list_item_continuation_indent() {
        let doc = parse("* a\n\n  b");
        let item = &doc.children[0].children[0];
        assert_eq!(kinds(item), ["Paragraph", "Paragraph"]);
    }

    #[test]
    fn test_list_item_lazy_line() {
        let doc = parse("* a\nb");
        let item = &doc.children[0].children[0];
        assert_eq!(item.children[0].string_content, "a\nb");
    }

    #[test]
    fn test_two_blank_lines_break_out_of_list() {
        let doc = parse("* a\n\n\nb");
        assert_eq!(kinds(&doc), ["List", "Paragraph"]);
        assert_eq!(doc.children[1].string_content, "b");
    }

    #[test]
    fn test_two_blank_lines_break_nested_lists() {
        let doc = parse("* a\n  * b\n\n\nc");
        assert_eq!(kinds(&doc), ["List", "Paragraph"]);
    }

    #[test]
    fn test_single_blank_keeps_list() {
        let doc = parse("* a\n\n* b");
        assert_eq!(kinds(&doc), ["List"]);
        assert_eq!(doc.children[0].children.len(), 2);
    }

    #[test]
    fn test_nested_list() {
        let doc = parse("* a\n  * b");
        let item = &doc.children[0].children[0];
        assert_eq!(kinds(item), ["Paragraph", "List"]);
    }

    #[test]
    fn test_list_marker_padding() {
        let data = parse_list_marker("*  two spaces").unwrap();
        assert_eq!(data.padding, 3);
        let data = parse_list_marker("*      far").unwrap();
        assert_eq!(data.padding, 2);
        let data = parse_list_marker("*").unwrap();
        assert_eq!(data.padding, 2);
        let data = parse_list_marker("10. x").unwrap();
        assert_eq!(data.padding, 4);
        assert!(parse_list_marker("*emph*").is_none());
        assert!(parse_list_marker("1) x").is_none());
        assert!(parse_list_marker("- x").is_none());
    }

    #[test]
    fn test_empty_list_item() {
        let doc = parse("*\n* b");
        assert_eq!(kinds(&doc), ["List"]);
        let items = &doc.children[0].children;
        assert!(items[0].children.is_empty());
        assert_eq!(items[1].children[0].string_content, "b");
    }

    #[test]
    fn test_blockquote_in_list() {
        let doc = parse("* > q");
        let item = &doc.children[0].children[0];
        assert_eq!(kinds(item), ["BlockQuote"]);
    }

    #[test]
    fn test_tab_expansion_in_list() {
        let doc = parse("*\tx");
        let item = &doc.children[0].children[0];
        assert_eq!(item.children[0].string_content, "x");
    }

    #[test]
    fn test_document_spans_all_lines() {
        let doc = parse("a\nb\nc");
        assert_eq!(doc.start_line, 1);
        assert_eq!(doc.end_line, 3);
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let input = ">".repeat(MAX_BLOCK_NESTING * 2);
        let doc = parse(&input);
        let mut depth = 0;
        let mut block = &doc;
        while let Some(child) = block.children.first() {
            depth += 1;
            block = child;
        }
        assert!(depth <= MAX_BLOCK_NESTING + 1);
        assert_eq!(block.kind, BlockKind::Paragraph);
    }
}
