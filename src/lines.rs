//! Line preprocessing: splitting input into logical lines and expanding tabs.

use std::borrow::Cow;

use memchr::{memchr, memchr2};

/// Tab stop width used when expanding tabs.
pub const TAB_STOP: usize = 4;

/// Iterator over the logical lines of an input buffer.
///
/// Lines may be separated by `\n`, `\r\n` or `\r`. A single trailing line
/// ending is dropped first, so `"a\n"` yields one line, not two. Empty
/// input yields a single empty line.
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let bytes = rest.as_bytes();
        match memchr2(b'\n', b'\r', bytes) {
            Some(i) => {
                let skip = if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.rest = Some(&rest[i + skip..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Split input into logical lines.
///
/// ```
/// use faml::lines::split_lines;
///
/// let lines: Vec<_> = split_lines("a\r\nb\rc\n").collect();
/// assert_eq!(lines, ["a", "b", "c"]);
/// ```
pub fn split_lines(input: &str) -> Lines<'_> {
    let trimmed = input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .or_else(|| input.strip_suffix('\r'))
        .unwrap_or(input);
    Lines { rest: Some(trimmed) }
}

/// Expand tabs to spaces using 4-column tab stops.
///
/// Columns are counted in characters, so a tab after multi-byte text
/// still lands on the right stop. Lines without tabs are borrowed.
///
/// ```
/// use faml::lines::detab_line;
///
/// assert_eq!(detab_line("a\tb"), "a   b");
/// assert_eq!(detab_line("\t\tx"), "        x");
/// ```
pub fn detab_line(line: &str) -> Cow<'_, str> {
    if memchr(b'\t', line.as_bytes()).is_none() {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + TAB_STOP * 2);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let width = TAB_STOP - column % TAB_STOP;
            out.extend(std::iter::repeat_n(' ', width));
            column += width;
        } else {
            out.push(c);
            column += 1;
        }
    }
    Cow::Owned(out)
}
