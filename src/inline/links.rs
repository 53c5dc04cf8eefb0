//! Inline links: `[label](destination "title")`.
//!
//! Only the inline form is recognised. Any failure rewinds to the `[`,
//! which is then taken as literal text.

use crate::escape::unescape;

use super::{Inline, InlineScanner};

/// Bytes allowed unescaped in a bare destination.
#[inline]
fn is_dest_char(b: u8) -> bool {
    b > b' ' && !matches!(b, b'\\' | b'(' | b')')
}

/// Whether a backslash escape starts at `bytes[i]`.
#[inline]
fn is_escape(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'\\' && bytes.get(i + 1).is_some_and(u8::is_ascii_punctuation)
}

/// Find the closing delimiter of a quoted construct starting at `bytes[0]`.
///
/// Escaped punctuation is skipped. Scanning stops at the first unescaped
/// `close` or at a byte for which `stop` holds. If no unescaped closer is
/// reached, the last escaped closer seen serves as the closer instead,
/// its backslash counting as content.
fn find_closer(bytes: &[u8], close: u8, stop: impl Fn(u8) -> bool) -> Option<usize> {
    let mut fallback = None;
    let mut i = 1;
    while i < bytes.len() {
        if is_escape(bytes, i) {
            if bytes[i + 1] == close {
                fallback = Some(i + 1);
            }
            i += 2;
        } else if bytes[i] == close {
            return Some(i);
        } else if stop(bytes[i]) {
            break;
        } else {
            i += 1;
        }
    }
    fallback
}

/// Length of a parenthesised destination group starting at `bytes[0]`.
fn paren_group_len(bytes: &[u8]) -> Option<usize> {
    let mut i = 1;
    loop {
        match bytes.get(i) {
            Some(b')') => return Some(i + 1),
            Some(_) if is_escape(bytes, i) => i += 2,
            Some(&b) if is_dest_char(b) => i += 1,
            _ => return None,
        }
    }
}

/// Length of a bare destination: destination bytes, escapes, and balanced
/// one-level parenthesised groups. May be zero.
fn bare_destination_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    loop {
        match bytes.get(i) {
            Some(_) if is_escape(bytes, i) => i += 2,
            Some(b'(') => match paren_group_len(&bytes[i..]) {
                Some(len) => i += len,
                None => return i,
            },
            Some(&b) if is_dest_char(b) => i += 1,
            _ => return i,
        }
    }
}

impl InlineScanner<'_> {
    /// Parse an inline link at `[`.
    pub(super) fn parse_link(&mut self, out: &mut Vec<Inline>) -> usize {
        let start = self.cursor.offset();
        let label_len = self.parse_link_label();
        if label_len == 0 {
            return 0;
        }

        let Some((destination, title)) = self.parse_link_target() else {
            self.cursor.set_offset(start);
            return 0;
        };

        let text = self.cursor.text();
        let label_text = &text[start + 1..start + label_len - 1];
        let label = InlineScanner::new(label_text, self.depth + 1, false).scan();
        out.push(Inline::Link { destination, title, label });
        self.cursor.offset() - start
    }

    /// Scan a bracketed label, returning its length including brackets.
    ///
    /// Nested brackets must balance; brackets inside code spans or escaped
    /// with a backslash do not count. When the input runs out, the nesting
    /// level reached is remembered so that the next attempts at inner `[`
    /// positions fail without rescanning.
    pub(super) fn parse_link_label(&mut self) -> usize {
        if !self.cursor.at(b'[') {
            return 0;
        }
        if self.label_nest_level > 0 {
            self.label_nest_level -= 1;
            return 0;
        }

        let start = self.cursor.offset();
        self.cursor.bump();
        let mut nest_level = 0usize;
        let mut scratch = Vec::new();

        loop {
            match self.cursor.peek() {
                None => {
                    self.label_nest_level = nest_level;
                    self.cursor.set_offset(start);
                    return 0;
                }
                Some(b']') if nest_level == 0 => {
                    self.label_nest_level = 0;
                    self.cursor.bump();
                    return self.cursor.offset() - start;
                }
                Some(b'[') => {
                    nest_level += 1;
                    self.cursor.bump();
                }
                Some(b']') => {
                    nest_level -= 1;
                    self.cursor.bump();
                }
                Some(b'`') => {
                    self.parse_backticks(&mut scratch);
                }
                Some(b'\\') => {
                    self.parse_escaped(&mut scratch);
                }
                Some(_) => {
                    self.parse_string(&mut scratch);
                }
            }
            scratch.clear();
        }
    }

    /// `(destination "title")` after a label. Leaves the cursor after `)`.
    fn parse_link_target(&mut self) -> Option<(String, String)> {
        if !self.cursor.eat(b'(') {
            return None;
        }
        self.skip_space_and_newline();
        let destination = self.parse_link_destination();
        self.skip_space_and_newline();
        let title = if self.cursor.char_before().is_some_and(char::is_whitespace) {
            self.parse_link_title().unwrap_or_default()
        } else {
            String::new()
        };
        self.skip_space_and_newline();
        self.cursor.eat(b')').then_some((destination, title))
    }

    /// Spaces, with at most one newline among them.
    fn skip_space_and_newline(&mut self) {
        self.cursor.skip_spaces();
        if self.cursor.eat(b'\n') {
            self.cursor.skip_spaces();
        }
    }

    /// A `<...>` destination, or a bare one (possibly empty).
    fn parse_link_destination(&mut self) -> String {
        let bytes = self.cursor.remaining_bytes();
        let text = &self.cursor.text()[self.cursor.offset()..];

        if bytes.first() == Some(&b'<') {
            let bracketed = find_closer(bytes, b'>', |b| matches!(b, b'<' | b'\n' | 0));
            if let Some(end) = bracketed {
                self.cursor.advance(end + 1);
                return unescape(&text[1..end]).into_owned();
            }
        }

        let len = bare_destination_len(bytes);
        self.cursor.advance(len);
        unescape(&text[..len]).into_owned()
    }

    /// A title in double quotes, single quotes, or parentheses.
    fn parse_link_title(&mut self) -> Option<String> {
        let bytes = self.cursor.remaining_bytes();
        let close = match bytes.first()? {
            b'"' => b'"',
            b'\'' => b'\'',
            b'(' => b')',
            _ => return None,
        };
        let end = find_closer(bytes, close, |b| b == 0)?;
        let text = &self.cursor.text()[self.cursor.offset()..];
        let title = unescape(&text[1..end]).into_owned();
        self.cursor.advance(end + 1);
        Some(title)
    }
}
