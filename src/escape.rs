//! HTML escaping and entity utilities.
//!
//! Fast-path optimized: scans for first escapable character,
//! then bulk-copies segments between escapes.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

/// Lookup table for characters escaped in HTML output.
/// Index by byte value, true if needs escaping.
const ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

#[inline]
fn escape_seq(b: u8) -> &'static [u8] {
    match b {
        b'<' => b"&lt;",
        b'>' => b"&gt;",
        b'&' => b"&amp;",
        b'"' => b"&quot;",
        _ => unreachable!(),
    }
}

/// Escape HTML text content into output buffer.
///
/// Escapes `&`, `<`, `>`, and `"` to their HTML entity equivalents.
///
/// # Example
/// ```
/// use faml::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<script>");
/// assert_eq!(out, b"&lt;script&gt;");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    escape_into(out, input, false)
}

/// Escape an attribute value (link destination or title) into output buffer.
///
/// Same substitutions as [`escape_text_into`], except that an `&` which
/// already starts a well-formed entity or numeric reference is copied
/// through untouched.
///
/// # Example
/// ```
/// use faml::escape::escape_attr_into;
///
/// let mut out = Vec::new();
/// escape_attr_into(&mut out, b"?a=1&b=2&amp;c=\"3\"");
/// assert_eq!(out, b"?a=1&amp;b=2&amp;c=&quot;3&quot;");
/// ```
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &[u8]) {
    escape_into(out, input, true)
}

fn escape_into(out: &mut Vec<u8>, input: &[u8], preserve_entities: bool) {
    let mut pos = match first_escape(input) {
        Some(p) => p,
        None => {
            out.extend_from_slice(input);
            return;
        }
    };

    out.extend_from_slice(&input[..pos]);

    while pos < input.len() {
        let scan_start = pos;
        while pos < input.len() && !ESCAPE_TABLE[input[pos] as usize] {
            pos += 1;
        }
        out.extend_from_slice(&input[scan_start..pos]);

        if pos < input.len() {
            let b = input[pos];
            if b == b'&' && preserve_entities && entity_len(&input[pos..]).is_some() {
                out.push(b'&');
            } else {
                out.extend_from_slice(escape_seq(b));
            }
            pos += 1;
        }
    }
}

#[inline]
fn first_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', input);
    let b = memchr(b'"', input);
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}

/// Length of the entity reference at the start of `input`, if any.
///
/// Recognizes `&#xHEX;` (1-8 hex digits), `&#DIGITS;` (1-8 digits) and
/// `&name;` where the name is an ASCII letter followed by 1-31 ASCII
/// alphanumerics. Matching is ASCII case-insensitive.
pub fn entity_len(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'&') {
        return None;
    }

    let run = |from: usize, max: usize, pred: fn(&u8) -> bool| -> Option<usize> {
        let n = input.get(from..)?.iter().take_while(|b| pred(*b)).count();
        let end = from + n;
        (n >= 1 && n <= max && input.get(end) == Some(&b';')).then_some(end + 1)
    };

    match input.get(1) {
        Some(b'#') => match input.get(2) {
            Some(b'x' | b'X') => run(3, 8, u8::is_ascii_hexdigit),
            _ => run(2, 8, u8::is_ascii_digit),
        },
        Some(b) if b.is_ascii_alphabetic() => run(2, 31, u8::is_ascii_alphanumeric),
        _ => None,
    }
}

/// Replace backslash escapes of ASCII punctuation with the literal character.
///
/// ```
/// use faml::escape::unescape;
///
/// assert_eq!(unescape(r"a\*b\c"), r"a*b\c");
/// ```
pub fn unescape(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'\\', bytes) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut pos = first;
    while pos < bytes.len() {
        match memchr(b'\\', &bytes[pos..]) {
            Some(i) => {
                let at = pos + i;
                out.push_str(&s[pos..at]);
                match bytes.get(at + 1) {
                    Some(&next) if next.is_ascii_punctuation() => {
                        out.push(next as char);
                        pos = at + 2;
                    }
                    _ => {
                        out.push('\\');
                        pos = at + 1;
                    }
                }
            }
            None => {
                out.push_str(&s[pos..]);
                break;
            }
        }
    }
    Cow::Owned(out)
}
