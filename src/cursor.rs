//! Byte cursor for scanning UTF-8 text.
//!
//! All markup syntax is ASCII, so the scanner walks bytes and only ever
//! stops on ASCII positions, which are always `char` boundaries. The
//! cursor can be saved and restored, which is how matchers rewind after
//! a failed attempt.

/// A rewindable cursor over a string slice.
///
/// # Example
/// ```
/// use faml::cursor::Cursor;
///
/// let mut cursor = Cursor::new("Hello, World!");
///
/// assert_eq!(cursor.peek(), Some(b'H'));
/// cursor.advance(7);
/// assert_eq!(cursor.peek(), Some(b'W'));
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `text`.
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The full text being scanned.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset into the text.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Move the cursor back (or forward) to a previously seen offset.
    #[inline]
    pub fn set_offset(&mut self, pos: usize) {
        debug_assert!(pos <= self.text.len());
        self.pos = pos;
    }

    /// Bytes left to scan.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.text.len() - self.pos
    }

    /// Whether all input has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The byte under the cursor.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// The character that ends just before the cursor, if any.
    #[inline]
    pub fn char_before(&self) -> Option<char> {
        self.text[..self.pos].chars().next_back()
    }

    /// The character starting `n` bytes after the cursor, if any.
    ///
    /// `n` must land on a character boundary.
    #[inline]
    pub fn char_at(&self, n: usize) -> Option<char> {
        self.text.get(self.pos + n..).and_then(|rest| rest.chars().next())
    }

    /// Move forward `n` bytes. `n` must keep the cursor on a char boundary.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }

    /// Step over one ASCII byte.
    #[inline]
    pub fn bump(&mut self) {
        debug_assert!(!self.is_eof());
        self.pos += 1;
    }

    /// Whether the byte under the cursor is `b`.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Skip while predicate is true, returning the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.bump();
        }
        self.pos - start
    }

    /// Skip `' '` bytes (tabs are expanded before scanning).
    #[inline]
    pub fn skip_spaces(&mut self) -> usize {
        self.skip_while(|b| b == b' ')
    }

    /// Step over `b` if it is under the cursor.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Get the text from a start offset to the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    /// Unscanned input as bytes.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.text.as_bytes()[self.pos..]
    }

    /// Distance to the next `needle`, if any.
    #[inline]
    pub fn find(&self, needle: u8) -> Option<usize> {
        memchr::memchr(needle, self.remaining_bytes())
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("rest", &&self.text[self.pos..])
            .finish()
    }
}
