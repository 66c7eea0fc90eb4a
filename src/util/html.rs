/// Neutralize markup characters (`& < > "`) before text is stored.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop terminal control characters (ESC, BEL, ...) so stored text can't
/// drive the terminal it is printed to. Tabs and line breaks become spaces.
pub fn strip_control(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Inverse of `escape_html`, for showing stored text in a terminal.
/// Only the four entities produced by `escape_html` are recognized.
pub fn unescape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let entity = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
        ]
        .into_iter()
        .find(|(name, _)| rest.starts_with(name));
        match entity {
            Some((name, c)) => {
                out.push(c);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
        assert_eq!(escape_html(r#"a & "b""#), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("buy milk"), "buy milk");
        assert_eq!(escape_html("it's 5'"), "it's 5'");
    }

    #[test]
    fn ampersand_escaped_first() {
        // An existing entity is escaped, not passed through
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn unescape_inverts_escape() {
        for s in ["<b>hi</b>", "a & b", r#""quoted" & <tag>"#, "&lt;", "plain"] {
            assert_eq!(unescape_html(&escape_html(s)), s);
        }
    }

    #[test]
    fn strips_escape_sequences() {
        assert_eq!(
            strip_control("evil\x1b[2J\x1b]0;pwned\x07"),
            "evil[2J]0;pwned"
        );
        assert_eq!(strip_control("a\tb\nc"), "a b c");
        assert_eq!(strip_control("caf\u{e9} \u{65e5}"), "caf\u{e9} \u{65e5}");
    }

    #[test]
    fn unescape_keeps_unknown_entities() {
        assert_eq!(unescape_html("&nbsp; & x"), "&nbsp; & x");
    }
}
