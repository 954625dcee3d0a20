//! Minimal go.mod parsing
//!
//! Only the `module` directive is extracted, but every line is checked for
//! well-formed directive structure.

use super::literal::{unquote_interpreted, unquote_raw};
use regex::Regex;
use std::fmt;

const KNOWN_VERBS: &[&str] = &[
    "module",
    "go",
    "toolchain",
    "godebug",
    "require",
    "exclude",
    "replace",
    "retract",
    "tool",
    "ignore",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModFileError {
    pub line: usize,
    pub message: String,
}

impl ModFileError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ModFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

impl std::error::Error for ModFileError {}

/// One go.mod token: quoted string, raw string, parenthesis or bare word
const TOKEN_PATTERN: &str = r#"^(?:"(?:[^"\\]|\\.)*"|`[^`]*`|[()]|[^\s()"`]+)"#;

/// Splits one go.mod line into tokens, dropping any trailing `//` comment.
fn tokenize(token_re: &Regex, line: &str, line_no: usize) -> Result<Vec<String>, ModFileError> {
    let mut tokens = Vec::new();
    let mut rest = line.trim_start();

    while !rest.is_empty() && !rest.starts_with("//") {
        let Some(m) = token_re.find(rest) else {
            let message = match rest.chars().next() {
                Some('"') => "unterminated quoted string",
                _ => "unterminated raw string",
            };
            return Err(ModFileError::new(line_no, message));
        };
        let text = m.as_str();

        if let Some(body) = text.strip_prefix('"') {
            let value = unquote_interpreted(&body[..body.len() - 1])
                .map_err(|msg| ModFileError::new(line_no, msg))?;
            tokens.push(value);
        } else if let Some(body) = text.strip_prefix('`') {
            tokens.push(unquote_raw(&body[..body.len() - 1]));
        } else if let Some(comment) = text.find("//") {
            tokens.push(text[..comment].to_string());
            break;
        } else {
            tokens.push(text.to_string());
        }
        rest = rest[m.end()..].trim_start();
    }

    Ok(tokens)
}

/// Returns the module path declared by a go.mod file.
pub fn parse_module_path(contents: &str) -> Result<String, ModFileError> {
    let token_re = Regex::new(TOKEN_PATTERN).expect("go.mod token regex is valid");
    let mut module: Option<(String, usize)> = None;
    let mut block: Option<(String, usize)> = None;

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let tokens = tokenize(&token_re, line, line_no)?;
        if tokens.is_empty() {
            continue;
        }

        let args: &[String] = if let Some((verb, _)) = &block {
            if tokens.len() == 1 && tokens[0] == ")" {
                block = None;
                continue;
            }
            if verb != "module" {
                continue;
            }
            &tokens
        } else {
            let verb = tokens[0].as_str();
            if !KNOWN_VERBS.contains(&verb) {
                return Err(ModFileError::new(line_no, format!("unknown directive: {}", verb)));
            }
            if tokens.len() == 2 && tokens[1] == "(" {
                block = Some((verb.to_string(), line_no));
                continue;
            }
            if verb != "module" {
                continue;
            }
            &tokens[1..]
        };

        if let Some((_, first)) = &module {
            return Err(ModFileError::new(
                line_no,
                format!("repeated module statement (first at line {})", first),
            ));
        }
        match args {
            [path] if path != "(" && path != ")" && !path.is_empty() => {
                module = Some((path.clone(), line_no));
            }
            _ => return Err(ModFileError::new(line_no, "usage: module module/path")),
        }
    }

    if let Some((verb, start)) = block {
        return Err(ModFileError::new(
            start,
            format!("{} block is missing closing ')'", verb),
        ));
    }

    module
        .map(|(path, _)| path)
        .ok_or_else(|| ModFileError::new(1, "no module directive found"))
}
