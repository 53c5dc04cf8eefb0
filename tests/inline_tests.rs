use faml::{Inline, parse, parse_inlines, to_html};

fn s(text: &str) -> Inline {
    Inline::str(text)
}

/// Render a single paragraph without the surrounding `<p>` tags.
fn inline_html(input: &str) -> String {
    let html = to_html(input);
    html.strip_prefix("<p>")
        .and_then(|h| h.strip_suffix("</p>\n"))
        .unwrap_or_else(|| panic!("not a single paragraph: {html}"))
        .to_string()
}

#[test]
fn test_emphasis_and_strong() {
    assert_eq!(inline_html("*a* and **b**"), "<em>a</em> and <strong>b</strong>");
    assert_eq!(inline_html("_a_ and __b__"), "<em>a</em> and <strong>b</strong>");
}

#[test]
fn test_triple_delimiters() {
    assert_eq!(inline_html("***x***"), "<strong><em>x</em></strong>");
}

#[test]
fn test_unmatched_delimiters_are_literal() {
    assert_eq!(inline_html("2 * 3 * 4"), "2 * 3 * 4");
    assert_eq!(inline_html("**open"), "**open");
}

#[test]
fn test_code_span() {
    assert_eq!(inline_html("`a  <b>`"), "<code>a &lt;b&gt;</code>");
    assert_eq!(inline_html("`` a`b ``"), "<code>a`b</code>");
}

#[test]
fn test_code_span_suppresses_emphasis() {
    assert_eq!(inline_html("`*a*`"), "<code>*a*</code>");
}

#[test]
fn test_unmatched_backticks_are_literal() {
    assert_eq!(inline_html("``a`"), "``a`");
}

#[test]
fn test_entities_pass_through() {
    assert_eq!(inline_html("&copy; &#169; &#xA9;"), "&copy; &#169; &#xA9;");
    assert_eq!(inline_html("a & b"), "a &amp; b");
}

#[test]
fn test_backslash_escapes() {
    assert_eq!(inline_html(r"\*a\* \`b\`"), "*a* `b`");
    assert_eq!(inline_html(r"\<tag\>"), "&lt;tag&gt;");
}

#[test]
fn test_hard_and_soft_breaks() {
    assert_eq!(inline_html("a \nb\nc"), "a<br />\nb\nc");
}

#[test]
fn test_link() {
    assert_eq!(
        inline_html("see [the *docs*](/docs \"Docs\")"),
        "see <a href=\"/docs\" title=\"Docs\">the <em>docs</em></a>"
    );
}

#[test]
fn test_link_destination_is_attribute_escaped() {
    assert_eq!(
        inline_html("[q](/s?a=1&b=\"2\")"),
        "<a href=\"/s?a=1&amp;b=&quot;2&quot;\">q</a>"
    );
}

#[test]
fn test_link_without_target_is_literal() {
    assert_eq!(inline_html("[just brackets]"), "[just brackets]");
    assert_eq!(inline_html("[a] (b)"), "[a] (b)");
}

#[test]
fn test_emphasis_around_link() {
    assert_eq!(
        inline_html("*[a](b)*"),
        "<em><a href=\"b\">a</a></em>"
    );
}

#[test]
fn test_header_inlines() {
    assert_eq!(to_html("# *Big* `code`"), "<h1><em>Big</em> <code>code</code></h1>\n");
}

#[test]
fn test_inline_tree_in_document() {
    let doc = parse("**a** b");
    assert_eq!(
        doc.children[0].inline_content,
        vec![Inline::Strong(vec![s("a")]), s(" b")]
    );
}

#[test]
fn test_adjacent_text_is_merged() {
    assert_eq!(parse_inlines("a ] ! < b"), vec![s("a ] ! < b")]);
}

#[test]
fn test_plain_text_of_link() {
    let inlines = parse_inlines("[a *b*](u)");
    assert_eq!(inlines[0].plain_text(), "a b");
}

#[test]
fn test_many_unclosed_brackets() {
    let input = "[a ".repeat(5_000);
    let inlines = parse_inlines(&input);
    assert_eq!(inlines, vec![s(&input)]);
}

#[test]
fn test_many_unclosed_emphasis() {
    let input = "*a ".repeat(5_000);
    let inlines = parse_inlines(&input);
    assert_eq!(inlines.len(), 1);
    assert_eq!(inlines[0].plain_text(), input);
}
