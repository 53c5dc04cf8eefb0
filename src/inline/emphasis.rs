//! Emphasis and strong emphasis.
//!
//! There is no delimiter stack. An opening run provisionally becomes
//! literal text; the scanner then keeps parsing inlines until a suitable
//! closing run turns up, and rewrites the provisional node in place.
//!
//! Runs of three are handled specially: the first closer seen decides the
//! inner kind and the second closer the outer kind, so `***a***` becomes
//! `<strong><em>a</em></strong>`.

use crate::limits::MAX_INLINE_NESTING;

use super::{Inline, InlineScanner};

/// A run of identical delimiter characters at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct DelimRun {
    pub count: usize,
    pub can_open: bool,
    pub can_close: bool,
}

impl InlineScanner<'_> {
    /// Measure the run of `c` at the cursor without consuming it.
    ///
    /// Start and end of input count as whitespace. `_` additionally refuses
    /// to open after, or close before, an ASCII letter or digit.
    pub(super) fn scan_delims(&self, c: u8) -> DelimRun {
        let count = self.cursor.remaining_bytes().iter().take_while(|&&b| b == c).count();
        let before = self.cursor.char_before().unwrap_or('\n');
        let after = self.cursor.char_at(count).unwrap_or('\n');

        let usable = (1..=3).contains(&count);
        let mut can_open = usable && !after.is_whitespace();
        let mut can_close = usable && !before.is_whitespace();
        if c == b'_' {
            can_open &= !before.is_ascii_alphanumeric();
            can_close &= !after.is_ascii_alphanumeric();
        }

        DelimRun { count, can_open, can_close }
    }

    /// Parse emphasis starting at a `*` or `_` run.
    pub(super) fn parse_emphasis(&mut self, out: &mut Vec<Inline>) -> usize {
        let Some(c) = self.cursor.peek() else {
            return 0;
        };
        let start = self.cursor.offset();
        let opener = self.scan_delims(c);
        self.cursor.advance(opener.count);
        out.push(Inline::str(self.cursor.slice_from(start)));
        let delim_pos = out.len() - 1;

        if !opener.can_open || self.depth >= MAX_INLINE_NESTING {
            return opener.count;
        }

        self.depth += 1;
        if opener.count == 3 {
            self.close_triple(c, out, delim_pos);
        } else {
            self.close_single(c, opener.count, out, delim_pos);
        }
        self.depth -= 1;

        self.cursor.offset() - start
    }

    /// Opened with one or two delimiters: close at the first run at least
    /// as long that can close.
    fn close_single(&mut self, c: u8, count: usize, out: &mut Vec<Inline>, delim_pos: usize) {
        loop {
            let run = self.scan_delims(c);
            if run.count >= count && run.can_close {
                self.cursor.advance(count);
                let children = out.split_off(delim_pos + 1);
                out[delim_pos] = if count == 1 {
                    Inline::Emph(children)
                } else {
                    Inline::Strong(children)
                };
                return;
            }
            if self.parse_inline(out) == 0 {
                return;
            }
        }
    }

    /// Opened with three delimiters: needs two closers.
    fn close_triple(&mut self, c: u8, out: &mut Vec<Inline>, delim_pos: usize) {
        // Index of the first closer's literal node, and how many delimiters it used.
        let mut first_close: Option<(usize, usize)> = None;

        loop {
            let run = self.scan_delims(c);
            let first_used = first_close.map_or(0, |(_, used)| used);

            if !((1..=3).contains(&run.count) && run.can_close && run.count != first_used) {
                if self.parse_inline(out) == 0 {
                    return;
                }
                continue;
            }

            let used = match first_used {
                1 => 2,
                2 => 1,
                // `***` closing `***` reads as `**` then `*`.
                _ if run.count == 3 => 1,
                _ => run.count,
            };
            let closer_start = self.cursor.offset();
            self.cursor.advance(used);

            let Some((first_pos, first_used)) = first_close else {
                out.push(Inline::str(self.cursor.slice_from(closer_start)));
                first_close = Some((out.len() - 1, used));
                continue;
            };

            let tail = out.split_off(first_pos + 1);
            out.truncate(first_pos);
            let inner_children = out.split_off(delim_pos + 1);
            let (inner, outer): (fn(Vec<Inline>) -> Inline, fn(Vec<Inline>) -> Inline) =
                if first_used == 1 {
                    (Inline::Emph, Inline::Strong)
                } else {
                    (Inline::Strong, Inline::Emph)
                };

            let mut children = Vec::with_capacity(tail.len() + 1);
            children.push(inner(inner_children));
            children.extend(tail);
            out[delim_pos] = outer(children);
            return;
        }
    }
}
