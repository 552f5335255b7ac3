//! Frontmatter parsing for content files
//!
//! Content files carry an optional header delimited by bare `---` lines with
//! one `key: value` pair per line, followed by plain-text body lines.

use std::sync::LazyLock;

use indexmap::IndexMap;

static FIELD: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^([A-Za-z0-9_]+):\s*(.+)$").unwrap());

const DELIMITER: &str = "---";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed content file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub frontmatter: IndexMap<String, String>,
    pub body: String,
}

impl Document {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).map(String::as_str)
    }
}

/// Whitespace as a browser trims it, which includes the byte order mark.
fn trim(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Split a raw content file into its frontmatter and body.
///
/// Body lines are only collected after the header has been closed, so a
/// document with one or zero delimiter lines always has an empty body.
/// Lines inside the header that are not `key: value` pairs are ignored.
pub fn parse(raw: &str) -> Document {
    let mut in_frontmatter = false;
    let mut frontmatter_ended = false;
    let mut frontmatter = IndexMap::new();
    let mut body = Vec::new();

    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
    for line in raw.split('\n').map(trim) {
        if line == DELIMITER {
            if !in_frontmatter && !frontmatter_ended {
                in_frontmatter = true;
            } else if in_frontmatter {
                in_frontmatter = false;
                frontmatter_ended = true;
            }
            continue;
        }

        if in_frontmatter {
            if let Some(captures) = FIELD.captures(line) {
                frontmatter.insert(captures[1].to_owned(), captures[2].trim().to_owned());
            }
        } else if frontmatter_ended && !line.is_empty() {
            body.push(line);
        }
    }

    Document {
        frontmatter,
        body: body.join(" ").trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_body() {
        let doc = parse("---\nkey: v\n---\nline one\nline two");
        assert_eq!(doc.frontmatter.len(), 1);
        assert_eq!(doc.get("key"), Some("v"));
        assert_eq!(doc.body, "line one line two");
    }

    #[test]
    fn test_parse_skips_blank_body_lines() {
        let doc = parse("---\ntitle: Hello\n---\n\n  first  \n\n\nsecond\n");
        assert_eq!(doc.get("title"), Some("Hello"));
        assert_eq!(doc.body, "first second");
    }

    #[test]
    fn test_parse_value_keeps_later_colons() {
        let doc = parse("---\nimage: https://example.com/a.png\ntime: 12:30\n---\n");
        assert_eq!(doc.get("image"), Some("https://example.com/a.png"));
        assert_eq!(doc.get("time"), Some("12:30"));
    }

    #[test]
    fn test_parse_ignores_malformed_lines() {
        let doc = parse("---\nno colon here\nfancy-key: x\nempty:\nok_key:   spaced   \n---\nbody");
        assert_eq!(doc.frontmatter.len(), 1);
        assert_eq!(doc.get("ok_key"), Some("spaced"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_parse_repeated_key_keeps_last() {
        let doc = parse("---\ntitle: first\ntitle: second\n---\n");
        assert_eq!(doc.get("title"), Some("second"));
    }

    #[test]
    fn test_parse_crlf_lines() {
        let doc = parse("---\r\ntitle: Windows\r\n---\r\nbody line\r\n");
        assert_eq!(doc.get("title"), Some("Windows"));
        assert_eq!(doc.body, "body line");
    }

    #[test]
    fn test_parse_later_delimiters_are_skipped() {
        let doc = parse("---\na: 1\n---\nbefore\n---\nafter");
        assert_eq!(doc.get("a"), Some("1"));
        assert_eq!(doc.body, "before after");
    }

    // Known quirk: without a closing delimiter no body is ever collected.
    #[test]
    fn test_parse_unclosed_frontmatter_has_empty_body() {
        let doc = parse("---\ntitle: Open\njust text\nmore text");
        assert_eq!(doc.get("title"), Some("Open"));
        assert_eq!(doc.body, "");
    }

    // Known quirk: a file without any delimiter has neither header nor body.
    #[test]
    fn test_parse_without_delimiters_is_empty() {
        let doc = parse("title: not a header\nplain text");
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_parse_leading_byte_order_mark() {
        let doc = parse("\u{feff}---\ntitle: Hello\n---\nBody text");
        assert_eq!(doc.get("title"), Some("Hello"));
        assert_eq!(doc.body, "Body text");
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse(""), Document::default());
    }
}
