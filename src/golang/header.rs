//! Header-only parsing of Go source files
//!
//! Only the package clause and the import declarations that follow it are
//! parsed. Lexing stops at the first token after the last import declaration,
//! so the body of a file (functions, types, syntax errors in them) is never
//! looked at. Line comments seen on the way are checked for a `//go:build`
//! constraint.
//!
//! Input is raw bytes. A byte sequence that is not valid UTF-8 is an error
//! only when it falls inside a token the lexer reads; inside comments, and
//! anywhere past the header, it is ignored.

use super::literal::{is_valid_import_path, unquote_interpreted, unquote_raw};
use super::BUILD_CONSTRAINT_PREFIX;
use std::fmt;

/// What the header of a single `.go` file contributes to a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHeader {
    pub package: String,
    /// Import paths in declaration order, duplicates kept
    pub imports: Vec<String>,
    /// Text after `//go:build `, empty when the file is unconstrained
    pub build_constraint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for HeaderError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    Semi,
    LParen,
    RParen,
    Dot,
    Other(char),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Str(_) => write!(f, "literal"),
            Token::Semi => write!(f, "';'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Dot => write!(f, "'.'"),
            Token::Other(c) => write!(f, "'{}'", c),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pos {
    line: usize,
    column: usize,
}

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Keywords after which a newline terminates the statement
fn ends_statement(word: &str) -> bool {
    !is_keyword(word) || matches!(word, "break" | "continue" | "fallthrough" | "return")
}

struct Lexer<'a> {
    src: &'a str,
    /// Offsets in `src` of U+FFFD characters that replaced invalid bytes
    invalid: &'a [usize],
    offset: usize,
    line: usize,
    column: usize,
    insert_semi: bool,
    build_constraint: Option<String>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str, invalid: &'a [usize]) -> Self {
        let offset = if src.starts_with('\u{FEFF}') { 3 } else { 0 };
        Self {
            src,
            invalid,
            offset,
            line: 1,
            column: 1,
            insert_semi: false,
            build_constraint: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            column: self.column,
        }
    }

    fn is_illegal(&self, offset: usize) -> bool {
        self.invalid.binary_search(&offset).is_ok()
    }

    fn check_encoding(&self) -> Result<(), HeaderError> {
        if self.is_illegal(self.offset) {
            return Err(Self::error(self.pos(), "illegal UTF-8 encoding"));
        }
        Ok(())
    }

    fn error(pos: Pos, message: impl Into<String>) -> HeaderError {
        HeaderError {
            line: pos.line,
            column: pos.column,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<(Token, Pos), HeaderError> {
        loop {
            let pos = self.pos();
            let Some(c) = self.peek() else {
                if std::mem::take(&mut self.insert_semi) {
                    return Ok((Token::Semi, pos));
                }
                return Ok((Token::Eof, pos));
            };

            match c {
                '\n' if self.insert_semi => {
                    self.insert_semi = false;
                    self.bump();
                    return Ok((Token::Semi, pos));
                }
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                }
                '/' if self.rest().starts_with("//") => self.line_comment(),
                '/' if self.rest().starts_with("/*") => {
                    let spans_lines = self.block_comment(pos)?;
                    if spans_lines && std::mem::take(&mut self.insert_semi) {
                        return Ok((Token::Semi, pos));
                    }
                }
                _ => return self.scan_token(c, pos),
            }
        }
    }

    fn line_comment(&mut self) {
        let text = match self.rest().find('\n') {
            Some(end) => &self.rest()[..end],
            None => self.rest(),
        };
        if self.build_constraint.is_none() {
            let text: String = text.chars().filter(|&c| c != '\r').collect();
            if let Some(expr) = text.strip_prefix(BUILD_CONSTRAINT_PREFIX) {
                self.build_constraint = Some(expr.to_string());
            }
        }
        for _ in 0..text.chars().count() {
            self.bump();
        }
    }

    fn block_comment(&mut self, start: Pos) -> Result<bool, HeaderError> {
        let Some(end) = self.rest()[2..].find("*/") else {
            return Err(Self::error(start, "comment not terminated"));
        };
        let body = &self.rest()[..end + 4];
        let spans_lines = body.contains('\n');
        for _ in 0..body.chars().count() {
            self.bump();
        }
        Ok(spans_lines)
    }

    fn scan_token(&mut self, c: char, pos: Pos) -> Result<(Token, Pos), HeaderError> {
        self.check_encoding()?;
        if c.is_alphabetic() || c == '_' {
            let mut word = String::new();
            while let Some(c) = self.peek() {
                if !(c.is_alphanumeric() || c == '_') {
                    break;
                }
                word.push(c);
                self.bump();
            }
            self.insert_semi = ends_statement(&word);
            return Ok((Token::Ident(word), pos));
        }

        self.bump();
        let token = match c {
            '"' => {
                let mut body = String::new();
                loop {
                    self.check_encoding()?;
                    match self.peek() {
                        None | Some('\n') => {
                            return Err(Self::error(pos, "string literal not terminated"))
                        }
                        Some('"') => {
                            self.bump();
                            break;
                        }
                        Some('\\') => {
                            body.push('\\');
                            self.bump();
                            self.check_encoding()?;
                            if let Some(escaped) = self.peek().filter(|&e| e != '\n') {
                                body.push(escaped);
                                self.bump();
                            }
                        }
                        Some(other) => {
                            body.push(other);
                            self.bump();
                        }
                    }
                }
                Token::Str(unquote_interpreted(&body).map_err(|msg| Self::error(pos, msg))?)
            }
            '`' => {
                let Some(end) = self.rest().find('`') else {
                    return Err(Self::error(pos, "raw string literal not terminated"));
                };
                let body = &self.rest()[..end];
                for _ in 0..=body.chars().count() {
                    self.check_encoding()?;
                    self.bump();
                }
                Token::Str(unquote_raw(body))
            }
            '(' => Token::LParen,
            ')' => Token::RParen,
            '.' => Token::Dot,
            ';' => Token::Semi,
            other => Token::Other(other),
        };
        self.insert_semi = matches!(token, Token::Str(_) | Token::RParen);
        Ok((token, pos))
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    imports: Vec<String>,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Result<(Token, Pos), HeaderError> {
        self.lexer.next_token()
    }

    fn expect_semi(&mut self, after: &str) -> Result<(), HeaderError> {
        match self.next()? {
            (Token::Semi, _) => Ok(()),
            (tok, pos) => Err(Lexer::error(
                pos,
                format!("expected ';', found {} after {}", tok, after),
            )),
        }
    }

    fn package_clause(&mut self) -> Result<String, HeaderError> {
        match self.next()? {
            (Token::Ident(kw), _) if kw == "package" => {}
            (tok, pos) => {
                return Err(Lexer::error(pos, format!("expected 'package', found {}", tok)))
            }
        }
        let name = match self.next()? {
            (Token::Ident(name), _) if !is_keyword(&name) => name,
            (tok, pos) => {
                return Err(Lexer::error(pos, format!("expected package name, found {}", tok)))
            }
        };
        self.expect_semi("package clause")?;
        Ok(name)
    }

    fn import_spec(&mut self, first: Token, pos: Pos) -> Result<(), HeaderError> {
        let (path_tok, path_pos) = match first {
            Token::Dot => self.next()?,
            Token::Ident(ref name) if !is_keyword(name) => self.next()?,
            other => (other, pos),
        };
        match path_tok {
            Token::Str(path) => {
                if !is_valid_import_path(&path) {
                    return Err(Lexer::error(
                        path_pos,
                        format!("invalid import path: {:?}", path),
                    ));
                }
                self.imports.push(path);
                Ok(())
            }
            _ => Err(Lexer::error(path_pos, "missing import path")),
        }
    }

    fn import_decls(&mut self) -> Result<(), HeaderError> {
        loop {
            match self.next()? {
                (Token::Ident(kw), _) if kw == "import" => {}
                _ => return Ok(()),
            }

            match self.next()? {
                (Token::LParen, _) => {
                    loop {
                        let (tok, pos) = self.next()?;
                        match tok {
                            Token::RParen => break,
                            Token::Eof => {
                                return Err(Lexer::error(pos, "expected ')', found EOF"))
                            }
                            _ => {}
                        }
                        self.import_spec(tok, pos)?;
                        match self.next()? {
                            (Token::Semi, _) => {}
                            (Token::RParen, _) => break,
                            (tok, pos) => {
                                return Err(Lexer::error(
                                    pos,
                                    format!("expected ';' or ')', found {}", tok),
                                ))
                            }
                        }
                    }
                    self.expect_semi("import declaration")?;
                }
                (tok, pos) => {
                    self.import_spec(tok, pos)?;
                    self.expect_semi("import declaration")?;
                }
            }
        }
    }
}

/// Decodes `bytes`, replacing each invalid sequence with U+FFFD and
/// recording where the replacements landed.
fn decode_lossy(bytes: &[u8]) -> (String, Vec<usize>) {
    let mut text = String::with_capacity(bytes.len());
    let mut invalid = Vec::new();
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                return (text, invalid);
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                invalid.push(text.len());
                text.push(char::REPLACEMENT_CHARACTER);
                rest = &after[e.error_len().unwrap_or(after.len())..];
            }
        }
    }
}

/// Parses the package clause and import declarations of a Go source file.
pub fn parse_header(src: &str) -> Result<SourceHeader, HeaderError> {
    parse(src, &[])
}

/// Like [`parse_header`], for source that may not be valid UTF-8.
pub fn parse_header_bytes(src: &[u8]) -> Result<SourceHeader, HeaderError> {
    let (text, invalid) = decode_lossy(src);
    parse(&text, &invalid)
}

fn parse(src: &str, invalid: &[usize]) -> Result<SourceHeader, HeaderError> {
    let mut parser = Parser {
        lexer: Lexer::new(src, invalid),
        imports: Vec::new(),
    };
    let package = parser.package_clause()?;
    parser.import_decls()?;

    Ok(SourceHeader {
        package,
        imports: parser.imports,
        build_constraint: parser.lexer.build_constraint.unwrap_or_default(),
    })
}
