//! Block tree types.

use crate::inline::Inline;

/// Whether a list uses bullet or ordinal markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ListKind {
    /// `*` items.
    Bullet,
    /// `1.` items.
    Ordered,
}

/// Marker information shared by a list and its items.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListData {
    /// Bullet or ordered.
    pub kind: ListKind,
    /// The bullet character (bullet lists only).
    pub bullet_char: Option<char>,
    /// The first item's number (ordered lists only).
    pub start: Option<u64>,
    /// The delimiter after the number (ordered lists only).
    pub delimiter: Option<char>,
    /// Indentation of the marker relative to the enclosing container.
    pub marker_offset: usize,
    /// Marker width including the spaces that count toward item content.
    pub padding: usize,
}

impl ListData {
    /// Two markers belong to the same list when their kinds agree.
    ///
    /// Bullet characters and delimiters are deliberately ignored.
    #[inline]
    pub fn matches(&self, other: &ListData) -> bool {
        self.kind == other.kind
    }

    /// Indentation a line needs to continue an item with this marker.
    #[inline]
    pub fn content_indent(&self) -> usize {
        self.marker_offset + self.padding
    }
}

/// The kind of a block, together with its kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "t", content = "c"))]
pub enum BlockKind {
    /// The root of every tree.
    Document,
    /// A run of text lines.
    Paragraph,
    /// An ATX header.
    Header {
        /// Header level (1-6).
        level: u8,
    },
    /// A `>` quoted container.
    BlockQuote,
    /// A sequence of list items sharing a marker kind.
    List(ListData),
    /// A single list item.
    ListItem(ListData),
    /// A backtick or tilde fenced code block.
    FencedCode {
        /// The fence character.
        fence_char: char,
        /// Length of the opening fence.
        fence_length: usize,
        /// Indentation of the opening fence, stripped from content lines.
        fence_offset: usize,
        /// Info string (unescaped and trimmed).
        info: String,
    },
}

impl BlockKind {
    /// Whether a block of this kind may hold `child` as a direct child.
    pub fn can_contain(&self, child: &BlockKind) -> bool {
        match self {
            Self::Document | Self::BlockQuote | Self::ListItem(_) => true,
            Self::List(_) => matches!(child, Self::ListItem(_)),
            Self::Paragraph | Self::Header { .. } | Self::FencedCode { .. } => false,
        }
    }

    /// Whether raw text lines are appended directly to this kind.
    #[inline]
    pub fn accepts_lines(&self) -> bool {
        matches!(self, Self::Paragraph | Self::FencedCode { .. })
    }

    /// Whether this kind has inline content after parsing.
    #[inline]
    pub fn has_inlines(&self) -> bool {
        matches!(self, Self::Paragraph | Self::Header { .. })
    }

    /// Short name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Paragraph => "Paragraph",
            Self::Header { .. } => "Header",
            Self::BlockQuote => "BlockQuote",
            Self::List(_) => "List",
            Self::ListItem(_) => "ListItem",
            Self::FencedCode { .. } => "FencedCode",
        }
    }
}

/// Version of the tree layout, carried by the document root.
pub const AST_VERSION: u32 = 1;

/// A node of the finished document tree.
///
/// Each block owns its children. Paragraphs and headers carry their text in
/// `inline_content`; fenced code keeps its verbatim content in
/// `string_content`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    /// Kind and kind-specific data.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: BlockKind,
    /// [`AST_VERSION`] on the document root, `None` elsewhere.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub version: Option<u32>,
    /// First source line (1-based).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub start_line: usize,
    /// Last source line (1-based).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub end_line: usize,
    /// Child blocks, in source order.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Block>,
    /// Finalized text not consumed by inline parsing.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub string_content: String,
    /// Parsed inline content (paragraphs and headers).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub inline_content: Vec<Inline>,
}

impl Block {
    /// Whether this is the document root.
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.kind, BlockKind::Document)
    }

    /// List data for lists and list items.
    pub fn list_data(&self) -> Option<&ListData> {
        match &self.kind {
            BlockKind::List(data) | BlockKind::ListItem(data) => Some(data),
            _ => None,
        }
    }

    /// Visit this block and all descendants, parents before children.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Block)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet() -> ListData {
        ListData {
            kind: ListKind::Bullet,
            bullet_char: Some('*'),
            start: None,
            delimiter: None,
            marker_offset: 0,
            padding: 2,
        }
    }

    #[test]
    fn test_can_contain() {
        let item = BlockKind::ListItem(bullet());
        assert!(BlockKind::Document.can_contain(&BlockKind::Paragraph));
        assert!(BlockKind::BlockQuote.can_contain(&item));
        assert!(item.can_contain(&BlockKind::BlockQuote));
        assert!(BlockKind::List(bullet()).can_contain(&item));
        assert!(!BlockKind::List(bullet()).can_contain(&BlockKind::Paragraph));
        assert!(!BlockKind::Paragraph.can_contain(&BlockKind::Paragraph));
        assert!(!BlockKind::Header { level: 1 }.can_contain(&BlockKind::Paragraph));
    }

    #[test]
    fn test_accepts_lines() {
        assert!(BlockKind::Paragraph.accepts_lines());
        assert!(!BlockKind::Header { level: 2 }.accepts_lines());
        assert!(!BlockKind::BlockQuote.accepts_lines());
    }

    #[test]
    fn test_list_data_matches_by_kind_only() {
        let a = bullet();
        let mut b = bullet();
        b.bullet_char = Some('+');
        b.padding = 4;
        assert!(a.matches(&b));

        let ordered = ListData {
            kind: ListKind::Ordered,
            bullet_char: None,
            start: Some(3),
            delimiter: Some('.'),
            marker_offset: 0,
            padding: 3,
        };
        assert!(!a.matches(&ordered));
        assert_eq!(ordered.content_indent(), 3);
    }
}
