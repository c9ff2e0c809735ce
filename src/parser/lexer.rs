//! Lexer (scanner) for TINY source code
//!
//! Pulls raw lines from a [`SourceReader`] and hands out one classified
//! [`Token`] per [`Lexer::next_token`] call. Nothing is buffered beyond the
//! current line, so the parser drives scanning lazily.
//!
//! `{ ... }` comments are skipped, even across lines. A comment that never
//! closes simply runs into end of input.

use super::ast::SourceLocation;
use super::reader::{LineReader, SourceReader};
use rustc_hash::FxHashMap;
use std::fmt;
use std::io;

/// Lexemes longer than this are truncated.
pub const MAX_TOKEN_LEN: usize = 40;

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    If,
    Then,
    Else,
    End,
    Repeat,
    Until,
    Read,
    Write,

    // Operators
    Assign,   // :=
    Equal,    // =
    LessThan, // <
    Plus,     // +
    Minus,    // -
    Times,    // *
    Divide,   // /
    Power,    // ^

    // Punctuation
    Semicolon,  // ;
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }

    Ident,
    Num,

    EndFile,
    Error,
}

impl TokenKind {
    /// Debug name, as shown by the token dump.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::If => "If",
            TokenKind::Then => "Then",
            TokenKind::Else => "Else",
            TokenKind::End => "End",
            TokenKind::Repeat => "Repeat",
            TokenKind::Until => "Until",
            TokenKind::Read => "Read",
            TokenKind::Write => "Write",
            TokenKind::Assign => "Assign",
            TokenKind::Equal => "Equal",
            TokenKind::LessThan => "LessThan",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Times => "Times",
            TokenKind::Divide => "Divide",
            TokenKind::Power => "Power",
            TokenKind::Semicolon => "SemiColon",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Ident => "ID",
            TokenKind::Num => "Num",
            TokenKind::EndFile => "EndFile",
            TokenKind::Error => "Error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Then => write!(f, "'then'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::End => write!(f, "'end'"),
            TokenKind::Repeat => write!(f, "'repeat'"),
            TokenKind::Until => write!(f, "'until'"),
            TokenKind::Read => write!(f, "'read'"),
            TokenKind::Write => write!(f, "'write'"),
            TokenKind::Assign => write!(f, "':='"),
            TokenKind::Equal => write!(f, "'='"),
            TokenKind::LessThan => write!(f, "'<'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Times => write!(f, "'*'"),
            TokenKind::Divide => write!(f, "'/'"),
            TokenKind::Power => write!(f, "'^'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Num => write!(f, "number"),
            TokenKind::EndFile => write!(f, "end of file"),
            TokenKind::Error => write!(f, "invalid character"),
        }
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Num => write!(f, "number {}", self.lexeme),
            TokenKind::Error => write!(f, "invalid character '{}'", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

const RESERVED_WORDS: [(&str, TokenKind); 8] = [
    ("if", TokenKind::If),
    ("then", TokenKind::Then),
    ("else", TokenKind::Else),
    ("end", TokenKind::End),
    ("repeat", TokenKind::Repeat),
    ("until", TokenKind::Until),
    ("read", TokenKind::Read),
    ("write", TokenKind::Write),
];

const SYMBOLS: [(&str, TokenKind); 13] = [
    ("=", TokenKind::Equal),
    (":=", TokenKind::Assign),
    ("<", TokenKind::LessThan),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Times),
    ("/", TokenKind::Divide),
    ("^", TokenKind::Power),
    (";", TokenKind::Semicolon),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
];

/// Longest symbol in [`SYMBOLS`] that prefixes `input`.
fn match_symbol(input: &[char]) -> Option<(&'static str, TokenKind)> {
    SYMBOLS
        .iter()
        .filter(|(text, _)| {
            let len = text.chars().count();
            input.len() >= len && text.chars().zip(input).all(|(a, &b)| a == b)
        })
        .max_by_key(|(text, _)| text.len())
        .copied()
}

fn is_letter_or_underscore(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Lexer for TINY source code
pub struct Lexer<R> {
    reader: R,
    line: Vec<char>,
    position: usize,
    exhausted: bool,
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl<'a> Lexer<LineReader<&'a [u8]>> {
    /// Create a new lexer over an in-memory source string.
    pub fn new(source: &'a str) -> Self {
        Self::from_reader(LineReader::from_source(source))
    }
}

impl<R: SourceReader> Lexer<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            position: 0,
            exhausted: false,
            keywords: RESERVED_WORDS.iter().copied().collect(),
        }
    }

    /// Scan the next token.
    ///
    /// Once end of input is reached every further call returns
    /// [`TokenKind::EndFile`] without touching the reader again.
    pub fn next_token(&mut self) -> io::Result<Token> {
        loop {
            if !self.skip_whitespace()? {
                return Ok(self.end_of_file());
            }

            let loc = self.current_location();
            let rest = &self.line[self.position..];

            if let Some((text, kind)) = match_symbol(rest) {
                self.position += text.chars().count();
                if kind == TokenKind::LeftBrace {
                    if !self.skip_comment()? {
                        return Ok(self.end_of_file());
                    }
                    continue;
                }
                return Ok(Token::new(kind, text, loc));
            }

            let ch = rest[0];
            if ch.is_ascii_digit() {
                let lexeme = self.take_run(|c| c.is_ascii_digit());
                return Ok(Token::new(TokenKind::Num, lexeme, loc));
            }

            if is_letter_or_underscore(ch) {
                let lexeme = self.take_run(is_letter_or_underscore);
                let kind = self
                    .keywords
                    .get(lexeme.as_str())
                    .copied()
                    .unwrap_or(TokenKind::Ident);
                return Ok(Token::new(kind, lexeme, loc));
            }

            self.position += 1;
            return Ok(Token::new(TokenKind::Error, ch.to_string(), loc));
        }
    }

    /// Tokenize the rest of the input, up to and including end of file.
    pub fn tokenize(&mut self) -> io::Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::EndFile);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Consume a maximal run of characters matching `pred`, keeping at most
    /// [`MAX_TOKEN_LEN`] of them.
    fn take_run(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while self.position < self.line.len() && pred(self.line[self.position]) {
            self.position += 1;
        }
        self.line[start..self.position]
            .iter()
            .take(MAX_TOKEN_LEN)
            .collect()
    }

    /// Skip whitespace, pulling new lines as needed. Returns `false` at end
    /// of input.
    fn skip_whitespace(&mut self) -> io::Result<bool> {
        loop {
            while let Some(&ch) = self.line.get(self.position) {
                if !matches!(ch, ' ' | '\t' | '\r' | '\n') {
                    return Ok(true);
                }
                self.position += 1;
            }
            if !self.next_line()? {
                return Ok(false);
            }
        }
    }

    /// Discard input up to and including the closing `}`. Returns `false` if
    /// the input ends first.
    fn skip_comment(&mut self) -> io::Result<bool> {
        loop {
            while let Some(&ch) = self.line.get(self.position) {
                self.position += 1;
                if ch == '}' {
                    return Ok(true);
                }
            }
            if !self.next_line()? {
                return Ok(false);
            }
        }
    }

    fn next_line(&mut self) -> io::Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        match self.reader.next_line()? {
            Some(line) => {
                self.line = line.chars().collect();
                self.position = 0;
                Ok(true)
            }
            None => {
                self.exhausted = true;
                self.line.clear();
                self.position = 0;
                Ok(false)
            }
        }
    }

    fn end_of_file(&self) -> Token {
        Token::new(TokenKind::EndFile, "", self.current_location())
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.reader.line_number(), self.position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("x := 42;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Token::new(TokenKind::Ident, "x", SourceLocation::new(1, 1)));
        assert_eq!(tokens[1], Token::new(TokenKind::Assign, ":=", SourceLocation::new(1, 3)));
        assert_eq!(tokens[2], Token::new(TokenKind::Num, "42", SourceLocation::new(1, 6)));
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
        assert_eq!(tokens[4].kind, TokenKind::EndFile);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds(":= = < + - * / ^ ( ) ;"),
            vec![
                TokenKind::Assign,
                TokenKind::Equal,
                TokenKind::LessThan,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Times,
                TokenKind::Divide,
                TokenKind::Power,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::EndFile,
            ]
        );
    }

    #[test]
    fn test_assign_is_not_split() {
        // `=` sits before `:=` in the table; longest match must still win.
        assert_eq!(kinds("a:=b=c"), vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Ident,
            TokenKind::Equal,
            TokenKind::Ident,
            TokenKind::EndFile,
        ]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if then else end repeat until read write"),
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::End,
                TokenKind::Repeat,
                TokenKind::Until,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::EndFile,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let tokens = Lexer::new("End ending end_").tokenize().unwrap();
        assert!(tokens[..3].iter().all(|t| t.is(TokenKind::Ident)));
        assert_eq!(tokens[1].lexeme, "ending");
    }

    #[test]
    fn test_identifiers_stop_at_digits() {
        let tokens = Lexer::new("x1").tokenize().unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Ident, "x", SourceLocation::new(1, 1)));
        assert_eq!(tokens[1], Token::new(TokenKind::Num, "1", SourceLocation::new(1, 2)));
    }

    #[test]
    fn test_comments() {
        assert_eq!(kinds("read{c}x"), kinds("read x"));
        assert_eq!(kinds("read{c}x"), vec![TokenKind::Read, TokenKind::Ident, TokenKind::EndFile]);
    }

    #[test]
    fn test_comment_spans_lines() {
        let tokens = Lexer::new("read { first\nsecond\n } x").tokenize().unwrap();
        assert_eq!(tokens[1], Token::new(TokenKind::Ident, "x", SourceLocation::new(3, 4)));
    }

    #[test]
    fn test_unterminated_comment_is_end_of_file() {
        assert_eq!(kinds("write 1 { never closed\n x := 2"), vec![
            TokenKind::Write,
            TokenKind::Num,
            TokenKind::EndFile,
        ]);
    }

    #[test]
    fn test_stray_closing_brace_is_a_token() {
        assert_eq!(kinds("}"), vec![TokenKind::RightBrace, TokenKind::EndFile]);
    }

    #[test]
    fn test_unrecognized_character() {
        let tokens = Lexer::new("x := 1 # 2").tokenize().unwrap();
        assert_eq!(tokens[3], Token::new(TokenKind::Error, "#", SourceLocation::new(1, 8)));
        assert_eq!(tokens[4].kind, TokenKind::Num);
    }

    #[test]
    fn test_long_lexeme_is_truncated() {
        let name = "a".repeat(MAX_TOKEN_LEN + 10);
        let tokens = Lexer::new(&format!("{} := 1", name)).tokenize().unwrap();

        assert_eq!(tokens[0].lexeme.len(), MAX_TOKEN_LEN);
        assert_eq!(tokens[1].kind, TokenKind::Assign);
    }

    #[test]
    fn test_end_of_file_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
        for _ in 0..5 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndFile);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::EndFile]);
        assert_eq!(kinds("  \n\t\r\n"), vec![TokenKind::EndFile]);
    }
}
