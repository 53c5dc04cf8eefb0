//! Inline scanner.
//!
//! A single left-to-right pass over a leaf block's text. Each matcher looks
//! at the cursor and either commits (advances, pushes nodes, returns the
//! number of bytes consumed) or rewinds and returns 0, in which case the
//! text is taken literally. Emphasis is matched recursively without a
//! delimiter stack.

mod code_span;
mod emphasis;
mod links;
mod node;

pub use node::Inline;

use crate::cursor::Cursor;
use crate::escape::entity_len;

/// Bytes that end a run of literal text.
const SPECIAL: [bool; 256] = {
    let mut table = [false; 256];
    let chars = b"\n`[]\\!<&*_";
    let mut i = 0;
    while i < chars.len() {
        table[chars[i] as usize] = true;
        i += 1;
    }
    table
};

/// Scan `text` into a sequence of inline nodes.
///
/// Never fails: anything that does not form a complete construct is kept as
/// literal text. Adjacent literal text is merged.
///
/// # Example
/// ```
/// use faml::{parse_inlines, Inline};
///
/// let inlines = parse_inlines("*hi* `x`");
/// assert_eq!(inlines, vec![
///     Inline::Emph(vec![Inline::str("hi")]),
///     Inline::str(" "),
///     Inline::Code("x".into()),
/// ]);
/// ```
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    InlineScanner::new(text, 0, true).scan()
}

/// Per-call scanner state.
struct InlineScanner<'a> {
    cursor: Cursor<'a>,
    /// Nesting level already proven to have no closing `]`.
    label_nest_level: usize,
    /// Current emphasis nesting depth.
    depth: usize,
    /// Whether `[` may start a link. Off while scanning a link's own label.
    allow_links: bool,
}

impl<'a> InlineScanner<'a> {
    fn new(text: &'a str, depth: usize, allow_links: bool) -> Self {
        Self {
            cursor: Cursor::new(text),
            label_nest_level: 0,
            depth,
            allow_links,
        }
    }

    fn scan(mut self) -> Vec<Inline> {
        let mut out = Vec::new();
        while self.parse_inline(&mut out) > 0 {}
        node::normalize(out)
    }

    /// Parse the next inline element. Returns 0 only at end of input.
    fn parse_inline(&mut self, out: &mut Vec<Inline>) -> usize {
        let consumed = match self.cursor.peek() {
            None => return 0,
            Some(b'\n') => self.parse_newline(out),
            Some(b'\\') => self.parse_escaped(out),
            Some(b'`') => self.parse_backticks(out),
            Some(b'*' | b'_') => self.parse_emphasis(out),
            Some(b'[') if self.allow_links => self.parse_link(out),
            Some(b'&') => self.parse_entity(out),
            Some(_) => 0,
        };
        if consumed > 0 {
            consumed
        } else {
            self.parse_string(out)
        }
    }

    /// A single special byte, or a run of ordinary text.
    fn parse_string(&mut self, out: &mut Vec<Inline>) -> usize {
        let start = self.cursor.offset();
        match self.cursor.peek() {
            None => return 0,
            Some(b) if SPECIAL[b as usize] => self.cursor.bump(),
            Some(_) => {
                self.cursor.skip_while(|b| !SPECIAL[b as usize]);
            }
        }
        out.push(Inline::str(self.cursor.slice_from(start)));
        self.cursor.offset() - start
    }

    /// A line ending: a hard break when the text before it ends in a space.
    fn parse_newline(&mut self, out: &mut Vec<Inline>) -> usize {
        if !self.cursor.eat(b'\n') {
            return 0;
        }
        let hard = match out.last_mut() {
            Some(Inline::Str(text)) if text.ends_with(' ') => {
                text.pop();
                true
            }
            _ => false,
        };
        out.push(if hard { Inline::Linebreak } else { Inline::Softbreak });
        1
    }

    /// A backslash escape. Escapable punctuation becomes literal; any other
    /// backslash stays as-is.
    fn parse_escaped(&mut self, out: &mut Vec<Inline>) -> usize {
        if !self.cursor.eat(b'\\') {
            return 0;
        }
        match self.cursor.peek() {
            Some(b) if b.is_ascii_punctuation() => {
                self.cursor.bump();
                out.push(Inline::Str(char::from(b).to_string()));
                2
            }
            _ => {
                out.push(Inline::str("\\"));
                1
            }
        }
    }

    fn parse_entity(&mut self, out: &mut Vec<Inline>) -> usize {
        let Some(len) = entity_len(self.cursor.remaining_bytes()) else {
            return 0;
        };
        let start = self.cursor.offset();
        self.cursor.advance(len);
        out.push(Inline::Entity(self.cursor.slice_from(start).to_owned()));
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Inline {
        Inline::str(text)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inlines("Hello, world"), vec![s("Hello, world")]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_inlines("").is_empty());
    }

    #[test]
    fn test_specials_without_matcher_are_literal() {
        assert_eq!(parse_inlines("a ! < ] b"), vec![s("a ! < ] b")]);
    }

    #[test]
    fn test_softbreak() {
        assert_eq!(parse_inlines("a\nb"), vec![s("a"), Inline::Softbreak, s("b")]);
    }

    #[test]
    fn test_linebreak_strips_one_space() {
        assert_eq!(parse_inlines("a \nb"), vec![s("a"), Inline::Linebreak, s("b")]);
        assert_eq!(parse_inlines("a  \nb"), vec![s("a "), Inline::Linebreak, s("b")]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(parse_inlines(r"\*not emph\*"), vec![s("*not emph*")]);
        assert_eq!(parse_inlines(r"a\b"), vec![s(r"a\b")]);
        assert_eq!(parse_inlines(r"end\"), vec![s(r"end\")]);
    }

    #[test]
    fn test_escaped_bracket_is_not_link() {
        assert_eq!(parse_inlines(r"\[a](b)"), vec![s("[a](b)")]);
    }

    #[test]
    fn test_entities() {
        assert_eq!(
            parse_inlines("a &amp; &#35; &#x2F; b"),
            vec![
                s("a "),
                Inline::Entity("&amp;".into()),
                s(" "),
                Inline::Entity("&#35;".into()),
                s(" "),
                Inline::Entity("&#x2F;".into()),
                s(" b"),
            ]
        );
    }

    #[test]
    fn test_bare_ampersand() {
        assert_eq!(parse_inlines("AT&T &;"), vec![s("AT&T &;")]);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            parse_inlines("größer *schön*"),
            vec![s("größer "), Inline::Emph(vec![s("schön")])]
        );
    }
}
