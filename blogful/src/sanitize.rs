//! Whitelist HTML filter for user-supplied article text.
//!
//! Tags on the whitelist survive with only their permitted attributes, which
//! removes every `on*` event handler. Any other tag is escaped so it renders
//! as inert text. URL attributes with an unsafe scheme are dropped.

/// Attributes kept for each whitelisted tag, or `None` if the tag is not
/// whitelisted.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "abbr" => &["title"],
        "img" => &["src", "alt", "title", "width", "height"],
        "span" | "div" | "p" => &["title"],
        "blockquote" | "q" => &["cite"],
        "td" | "th" => &["colspan", "rowspan", "align"],
        "b" | "br" | "code" | "del" | "em" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hr"
        | "i" | "li" | "ol" | "pre" | "s" | "small" | "strong" | "sub" | "sup" | "table"
        | "tbody" | "thead" | "tr" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attrs)
}

fn is_url_attribute(name: &str) -> bool {
    matches!(name, "href" | "src" | "cite")
}

/// Whether a URL attribute value is safe to emit.
///
/// Only anchors, root-relative or `./` paths, and an explicit list of
/// schemes pass. Anything else is rejected, including scheme-less values,
/// since character references such as `&colon;` are decoded by the browser
/// after this check.
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.starts_with('#') || url.starts_with('/') || url.starts_with("./") {
        return true;
    }
    let lower = url.to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

struct Attribute<'a> {
    name: String,
    value: Option<&'a str>,
}

struct Tag<'a> {
    name: String,
    closing: bool,
    self_closing: bool,
    attributes: Vec<Attribute<'a>>,
    /// Byte length of the raw tag, `<` through `>`.
    len: usize,
}

/// Parse a tag starting at `input[0] == '<'`. Returns `None` when the text is
/// not a well-formed tag (no name, or no closing `>`).
fn parse_tag(input: &str) -> Option<Tag<'_>> {
    let bytes = input.as_bytes();
    let mut pos = 1;

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    if !bytes.get(pos)?.is_ascii_alphabetic() {
        return None;
    }
    while bytes.get(pos).is_some_and(|b| b.is_ascii_alphanumeric()) {
        pos += 1;
    }
    let name = input[name_start..pos].to_ascii_lowercase();

    let mut attributes = Vec::new();
    let mut self_closing = false;
    loop {
        while bytes.get(pos)?.is_ascii_whitespace() {
            pos += 1;
        }
        match bytes[pos] {
            b'>' => break,
            b'/' => {
                self_closing = true;
                pos += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = pos;
        while let Some(&b) = bytes.get(pos) {
            if b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/') {
                break;
            }
            pos += 1;
        }
        let attr_name = input[attr_start..pos].to_ascii_lowercase();

        while bytes.get(pos)?.is_ascii_whitespace() {
            pos += 1;
        }
        let mut value = None;
        if bytes[pos] == b'=' {
            pos += 1;
            while bytes.get(pos)?.is_ascii_whitespace() {
                pos += 1;
            }
            let quote = bytes[pos];
            if quote == b'"' || quote == b'\'' {
                let start = pos + 1;
                let end = start + input[start..].find(quote as char)?;
                value = Some(&input[start..end]);
                pos = end + 1;
            } else {
                let start = pos;
                while let Some(&b) = bytes.get(pos) {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    pos += 1;
                }
                value = Some(&input[start..pos]);
            }
        }
        self_closing = false;
        attributes.push(Attribute {
            name: attr_name,
            value,
        });
    }

    Some(Tag {
        name,
        closing,
        self_closing,
        attributes,
        len: pos + 1,
    })
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn write_tag(tag: &Tag<'_>, allowed: &[&str], out: &mut String) {
    out.push('<');
    if tag.closing {
        out.push('/');
        out.push_str(&tag.name);
        out.push('>');
        return;
    }
    out.push_str(&tag.name);
    for attr in &tag.attributes {
        if !allowed.contains(&attr.name.as_str()) {
            continue;
        }
        match attr.value {
            Some(value) if is_url_attribute(&attr.name) && !is_safe_url(value) => continue,
            Some(value) => {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_attribute(value, out);
                out.push('"');
            }
            None => {
                out.push(' ');
                out.push_str(&attr.name);
            }
        }
    }
    if tag.self_closing {
        out.push_str(" /");
    }
    out.push('>');
}

/// Filter `input`, keeping benign markup and neutralising the rest.
///
/// ```
/// use blogful::sanitize::sanitize_html;
///
/// assert_eq!(
///     sanitize_html("<script>alert(1)</script><strong>ok</strong>"),
///     "&lt;script&gt;alert(1)&lt;/script&gt;<strong>ok</strong>",
/// );
/// ```
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        escape_text(&rest[..lt], &mut out);
        rest = &rest[lt..];

        match parse_tag(rest) {
            Some(tag) => {
                let raw = &rest[..tag.len];
                match allowed_attributes(&tag.name) {
                    Some(allowed) => write_tag(&tag, allowed, &mut out),
                    None => escape_text(raw, &mut out),
                }
                rest = &rest[tag.len..];
            }
            None => {
                out.push_str("&lt;");
                rest = &rest[1..];
            }
        }
    }
    escape_text(rest, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_escaped() {
        assert_eq!(
            sanitize_html(r#"Naughty naughty very naughty <script>alert("xss");</script>"#),
            r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#,
        );
    }

    #[test]
    fn event_handlers_are_stripped_and_benign_tags_kept() {
        assert_eq!(
            sanitize_html(
                r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#
            ),
            r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#,
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        let text = r#"Fish & chips, "quoted" and 'single'"#;
        assert_eq!(sanitize_html(text), text);
    }

    #[test]
    fn unsafe_urls_are_dropped() {
        assert_eq!(
            sanitize_html(r#"<a href="javascript:alert(1)" title="t">x</a>"#),
            r#"<a title="t">x</a>"#,
        );
        assert_eq!(
            sanitize_html(r#"<a href="/articles/1">x</a>"#),
            r#"<a href="/articles/1">x</a>"#,
        );
    }

    #[test]
    fn attributes_are_normalised() {
        assert_eq!(
            sanitize_html(r#"<IMG SRC='/pic.png' ALT=cat OnLoad=boom>"#),
            r#"<img src="/pic.png" alt="cat">"#,
        );
        assert_eq!(sanitize_html("line<br/>break"), "line<br />break");
    }

    #[test]
    fn stray_angle_brackets_are_escaped() {
        assert_eq!(sanitize_html("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
        assert_eq!(sanitize_html("<!-- hidden -->"), "&lt;!-- hidden --&gt;");
        assert_eq!(sanitize_html("<b unterminated"), "&lt;b unterminated");
    }

    #[test]
    fn other_tags_are_escaped_with_attributes() {
        assert_eq!(
            sanitize_html(r#"<iframe src="https://evil.example"></iframe>"#),
            r#"&lt;iframe src="https://evil.example"&gt;&lt;/iframe&gt;"#,
        );
    }

    #[test]
    fn url_safety() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("mailto:someone@example.com"));
        assert!(is_safe_url("#top"));
        assert!(is_safe_url("./images/cat.png"));
        assert!(!is_safe_url("images/cat.png"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url(" JAVASCRIPT:alert(1)"));
        assert!(!is_safe_url("data:text/html,<b>"));
    }

    #[test]
    fn entity_encoded_schemes_are_dropped() {
        assert_eq!(
            sanitize_html(r#"<a href="java&#x73;cript:alert(1)">x</a>"#),
            "<a>x</a>",
        );
        assert_eq!(
            sanitize_html(r#"<a href="javascript&colon;alert(1)">x</a>"#),
            "<a>x</a>",
        );
        assert_eq!(sanitize_html(r#"<img src="&#106;avascript:alert(1)">"#), "<img>");
    }

    #[test]
    fn ampersands_in_attributes_are_escaped() {
        assert_eq!(
            sanitize_html(r#"<a href="https://example.com/?a=1&b=2" title="&colon;">x</a>"#),
            r#"<a href="https://example.com/?a=1&amp;b=2" title="&amp;colon;">x</a>"#,
        );
    }
}
