//! Code span parsing.
//!
//! A code span opens with a run of backticks and closes at the next run of
//! exactly the same length. Runs of other lengths inside are content.

use super::{Inline, InlineScanner};

impl InlineScanner<'_> {
    /// Parse a code span, or the literal backtick run when it is unclosed.
    pub(super) fn parse_backticks(&mut self, out: &mut Vec<Inline>) -> usize {
        let start = self.cursor.offset();
        let ticks = self.cursor.skip_while(|b| b == b'`');
        if ticks == 0 {
            return 0;
        }
        let after_open = self.cursor.offset();

        while let Some(i) = self.cursor.find(b'`') {
            self.cursor.advance(i);
            let run_start = self.cursor.offset();
            if self.cursor.skip_while(|b| b == b'`') == ticks {
                let content = &self.cursor.text()[after_open..run_start];
                out.push(Inline::Code(collapse_whitespace(content)));
                return self.cursor.offset() - start;
            }
        }

        out.push(Inline::str(self.cursor.text()[start..after_open].to_owned()));
        self.cursor.set_offset(after_open);
        ticks
    }
}

/// Collapse runs of spaces and newlines to one space, then trim.
fn collapse_whitespace(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_space = false;
    for c in content.chars() {
        if c == ' ' || c == '\n' {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use crate::inline::{parse_inlines, Inline};

    #[test]
    fn test_code_span_simple() {
        assert_eq!(parse_inlines("`a`"), vec![Inline::Code("a".into())]);
    }

    #[test]
    fn test_code_span_double_backticks() {
        assert_eq!(parse_inlines("``a`b``"), vec![Inline::Code("a`b".into())]);
    }

    #[test]
    fn test_code_span_unclosed() {
        assert_eq!(parse_inlines("`a"), vec![Inline::str("`a")]);
    }

    #[test]
    fn test_code_span_length_mismatch() {
        assert_eq!(parse_inlines("``a`"), vec![Inline::str("``a`")]);
    }

    #[test]
    fn test_code_span_whitespace_collapsed() {
        assert_eq!(
            parse_inlines("` a  b\n c `"),
            vec![Inline::Code("a b c".into())]
        );
    }

    #[test]
    fn test_code_span_contents_are_literal() {
        assert_eq!(
            parse_inlines("`*a* [b](c) &amp;`"),
            vec![Inline::Code("*a* [b](c) &amp;".into())]
        );
    }

    #[test]
    fn test_code_span_in_text() {
        assert_eq!(
            parse_inlines("use `x` here"),
            vec![Inline::str("use "), Inline::Code("x".into()), Inline::str(" here")]
        );
    }
}
