// src/core/html.rs
// Small string builders for the results page. Every text and attribute
// value passes through `escape_html`; callers never pre-escape.

use super::sanitize::escape_html;

/// `<tag class="...">text</tag>`; the class attribute is omitted when empty.
pub fn element(tag: &str, class: &str, text: &str) -> String {
    let mut out = open_tag(tag, &[("class", class)]);
    out.push_str(&escape_html(text));
    out.push_str(&close_tag(tag));
    out
}

/// Opening tag with attributes; attributes with an empty value are skipped.
pub fn open_tag(tag: &str, attrs: &[(&str, &str)]) -> String {
    let mut out = join!("<", tag);
    for (name, value) in attrs {
        if value.is_empty() { continue; }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    out.push('>');
    out
}

pub fn close_tag(tag: &str) -> String {
    join!("</", tag, ">")
}

/// `<a href=... target="_blank" title=...>label</a>`
pub fn link(href: &str, label: &str) -> String {
    let mut out = open_tag("a", &[("href", href), ("target", "_blank"), ("title", href)]);
    out.push_str(&escape_html(label));
    out.push_str("</a>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_skips_empty_class() {
        assert_eq!(element("td", "", "1"), "<td>1</td>");
        assert_eq!(element("td", "rank-up", "↑2"), r#"<td class="rank-up">↑2</td>"#);
    }

    #[test]
    fn link_escapes_href() {
        assert_eq!(
            link("https://x/?a=1&b=2", "링크"),
            r#"<a href="https://x/?a=1&amp;b=2" target="_blank" title="https://x/?a=1&amp;b=2">링크</a>"#
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(element("p", "", "<script>"), "<p>&lt;script&gt;</p>");
    }
}
