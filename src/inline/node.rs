//! Inline node types.

/// An inline span inside a paragraph or header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "t", content = "c"))]
pub enum Inline {
    /// Literal text.
    Str(String),
    /// Emphasis (`*a*`).
    Emph(Vec<Inline>),
    /// Strong emphasis (`**a**`).
    Strong(Vec<Inline>),
    /// Code span content, whitespace-collapsed.
    Code(String),
    /// An entity reference, kept verbatim (`&amp;`).
    Entity(String),
    /// A line ending inside a paragraph.
    Softbreak,
    /// A line ending preceded by a space.
    Linebreak,
    /// An inline link.
    Link {
        /// Destination URL, unescaped.
        destination: String,
        /// Title, unescaped; empty when absent.
        title: String,
        /// Link text.
        label: Vec<Inline>,
    },
}

impl Inline {
    /// Shorthand for a literal text node.
    #[inline]
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Concatenated literal text of this node and its descendants.
    ///
    /// ```
    /// use faml::Inline;
    ///
    /// let strong = Inline::Strong(vec![Inline::str("a"), Inline::Code("b".into())]);
    /// assert_eq!(strong.plain_text(), "ab");
    /// ```
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Self::Str(text) | Self::Code(text) | Self::Entity(text) => out.push_str(text),
            Self::Softbreak | Self::Linebreak => out.push('\n'),
            Self::Emph(children) | Self::Strong(children) | Self::Link { label: children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
        }
    }
}

/// Merge adjacent literal text nodes and drop empty ones, recursively.
pub(crate) fn normalize(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        let inline = match inline {
            Inline::Str(text) if text.is_empty() => continue,
            Inline::Str(text) => {
                if let Some(Inline::Str(prev)) = out.last_mut() {
                    prev.push_str(&text);
                    continue;
                }
                Inline::Str(text)
            }
            Inline::Emph(children) => Inline::Emph(normalize(children)),
            Inline::Strong(children) => Inline::Strong(normalize(children)),
            Inline::Link { destination, title, label } => Inline::Link {
                destination,
                title,
                label: normalize(label),
            },
            other => other,
        };
        out.push(inline);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_merges_strings() {
        let merged = normalize(vec![Inline::str("*"), Inline::str("a"), Inline::str("")]);
        assert_eq!(merged, vec![Inline::str("*a")]);
    }

    #[test]
    fn test_normalize_keeps_breaks_between_strings() {
        let merged = normalize(vec![Inline::str("a"), Inline::Softbreak, Inline::str("b")]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_normalize_recurses() {
        let merged = normalize(vec![Inline::Emph(vec![Inline::str("a"), Inline::str("b")])]);
        assert_eq!(merged, vec![Inline::Emph(vec![Inline::str("ab")])]);
    }
}
