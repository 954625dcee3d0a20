//! Go string literals: unquoting source literals and quoting generated ones

use std::fmt::Write;

/// Characters Go rejects in import paths, on top of non-graphic and space.
const ILLEGAL_IMPORT_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";

/// Decodes the body of an interpreted string literal (without the quotes).
///
/// Supports every escape Go accepts inside `"..."`. Byte escapes (`\x`, octal)
/// must combine into valid UTF-8.
pub fn unquote_interpreted(body: &str) -> Result<String, String> {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            return Err("newline in string".to_string());
        }
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let esc = chars.next().ok_or("escape sequence not terminated")?;
        match esc {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(8))
                        .ok_or("invalid octal escape")?;
                    value = value * 8 + digit;
                }
                if value > 255 {
                    return Err(format!("octal escape value {} > 255", value));
                }
                out.push(value as u8);
            }
            'x' => {
                let value = read_hex(&mut chars, 2)?;
                out.push(value as u8);
            }
            'u' | 'U' => {
                let digits = if esc == 'u' { 4 } else { 8 };
                let value = read_hex(&mut chars, digits)?;
                let ch = char::from_u32(value)
                    .ok_or_else(|| format!("escape is invalid Unicode code point U+{:X}", value))?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            other => return Err(format!("unknown escape sequence '\\{}'", other)),
        }
    }

    String::from_utf8(out).map_err(|_| "string is not valid UTF-8".to_string())
}

fn read_hex(chars: &mut impl Iterator<Item = char>, digits: usize) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or("invalid hex escape")?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Decodes the body of a raw string literal. Carriage returns are discarded.
pub fn unquote_raw(body: &str) -> String {
    body.chars().filter(|&c| c != '\r').collect()
}

/// Quotes `s` as a Go interpreted string literal, escaping the way `%q` does.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if (c as u32) < 0x80 && c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                if (c as u32) <= 0xFFFF {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                } else {
                    let _ = write!(out, "\\U{:08x}", c as u32);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Reports whether `path` is acceptable as an import path.
pub fn is_valid_import_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| !c.is_control() && !c.is_whitespace() && !ILLEGAL_IMPORT_CHARS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_plain() {
        assert_eq!(unquote_interpreted("fmt").unwrap(), "fmt");
        assert_eq!(
            unquote_interpreted("golang.org/x/sys/unix").unwrap(),
            "golang.org/x/sys/unix"
        );
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote_interpreted(r#"a\tb\"c\\"#).unwrap(), "a\tb\"c\\");
        assert_eq!(unquote_interpreted(r"\x66mt").unwrap(), "fmt");
        assert_eq!(unquote_interpreted(r"\146mt").unwrap(), "fmt");
        assert_eq!(unquote_interpreted(r"é").unwrap(), "é");
        assert_eq!(unquote_interpreted(r"\U0001F600").unwrap(), "😀");
    }

    #[test]
    fn test_unquote_rejects_bad_escapes() {
        assert!(unquote_interpreted(r"\q").is_err());
        assert!(unquote_interpreted(r"\x6").is_err());
        assert!(unquote_interpreted(r"\400").is_err());
        assert!(unquote_interpreted(r"\'").is_err());
        assert!(unquote_interpreted(r"\ud800").is_err());
        assert!(unquote_interpreted(r"\xff").is_err());
        assert!(unquote_interpreted("a\nb").is_err());
    }

    #[test]
    fn test_unquote_raw_drops_carriage_returns() {
        assert_eq!(unquote_raw("a\r\nb"), "a\nb");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("fmt"), "\"fmt\"");
        assert_eq!(quote("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quote("tab\there"), r#""tab\there""#);
        assert_eq!(quote("\x01"), r#""\x01""#);
        assert_eq!(quote("é"), "\"é\"");
    }

    #[test]
    fn test_valid_import_paths() {
        assert!(is_valid_import_path("fmt"));
        assert!(is_valid_import_path("github.com/foo/bar-baz_v2.1~x"));
        assert!(is_valid_import_path("example.com/app"));
    }

    #[test]
    fn test_invalid_import_paths() {
        assert!(!is_valid_import_path(""));
        assert!(!is_valid_import_path("has space"));
        assert!(!is_valid_import_path("semi;colon"));
        assert!(!is_valid_import_path("back\\slash"));
        assert!(!is_valid_import_path("nul\x00"));
        assert!(!is_valid_import_path("bad\u{FFFD}"));
    }
}
