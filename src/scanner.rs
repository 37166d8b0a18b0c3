use std::fmt;

use tracing::{debug, trace};

use crate::token::{Literal, Span, Token, TokenKind};

/// Exit status when a scan produced no diagnostics.
pub const EXIT_OK: u8 = 0;

/// Exit status when a scan produced at least one diagnostic (`EX_DATAERR`).
pub const EXIT_DATA_ERR: u8 = 65;

/// Classifies a scan diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// Double-quoted string with no closing quote before the end of its line.
    UnterminatedString,
    /// Closed string whose content is not valid UTF-8.
    InvalidUtf8String,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "Unexpected character: {ch}")
            }
            Self::UnterminatedString => {
                write!(f, "Unterminated string.")
            }
            Self::InvalidUtf8String => {
                write!(f, "Invalid UTF-8 in string.")
            }
        }
    }
}

/// Recoverable error reported while scanning.
///
/// Displays as the record `[line N] Error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {}] Error: {kind}", span.line)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

/// Everything a scan produces.
///
/// `tokens` always ends with exactly one `EOF` token. `diagnostics` are in
/// source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanResult {
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// `65` if any diagnostic was produced, `0` otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.has_errors() {
            EXIT_DATA_ERR
        } else {
            EXIT_OK
        }
    }
}

/// Scan raw source bytes into tokens and diagnostics.
///
/// Input is split into lines on `\n` and each line is scanned on its own;
/// no token spans a line boundary. Each invalid UTF-8 sequence outside a
/// string is reported as an unexpected U+FFFD; a string containing one is
/// rejected whole, so lexemes are always exact source text.
/// Scanning never fails: problems are collected as diagnostics.
#[must_use]
pub fn scan(source: &[u8]) -> ScanResult {
    Scanner::default().scan(source)
}

/// Scan a source string. Same as [`scan`] on its bytes.
#[must_use]
pub fn tokenize(source: &str) -> ScanResult {
    scan(source.as_bytes())
}

/// Canonical literal text for a number lexeme.
///
/// The result always has a fractional part: integers gain `.0`, trailing
/// zeros after the point are stripped down to one digit.
///
/// ```
/// use lox_scanner::canonical_number;
///
/// assert_eq!(canonical_number("123"), "123.0");
/// assert_eq!(canonical_number("3.1400"), "3.14");
/// assert_eq!(canonical_number("3.00"), "3.0");
/// ```
#[must_use]
pub fn canonical_number(lexeme: &str) -> String {
    match lexeme.split_once('.') {
        None => format!("{lexeme}.0"),
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
    }
}

/// Decode one line, replacing each invalid sequence with U+FFFD.
///
/// Returns the text and the byte offsets of the inserted replacements.
fn decode_line(bytes: &[u8]) -> (String, Vec<usize>) {
    let mut text = String::with_capacity(bytes.len());
    let mut invalid = Vec::new();
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            invalid.push(text.len());
            text.push(char::REPLACEMENT_CHARACTER);
        }
    }
    (text, invalid)
}

const fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

const fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[derive(Default)]
struct Scanner {
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Scanner {
    fn scan(mut self, source: &[u8]) -> ScanResult {
        let source = source.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(source);

        let mut eof = Span { line: 1, column: 1 };
        for (index, bytes) in source.split(|&b| b == b'\n').enumerate() {
            let (text, invalid) = decode_line(bytes);
            let mut cursor = Cursor::new(&text, &invalid, index + 1);
            self.scan_line(&mut cursor);
            eof = cursor.span();
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: None,
            span: eof,
        });

        debug!(
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            "scan finished"
        );

        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn scan_line(&mut self, cursor: &mut Cursor<'_>) {
        while let Some(ch) = cursor.peek() {
            let start = cursor.mark();
            match ch {
                ' ' | '\t' => {
                    cursor.advance();
                }
                '"' => self.read_string(cursor, start),
                '0'..='9' => self.read_number(cursor, start),
                c if is_identifier_start(c) => self.read_identifier(cursor, start),
                // line comment
                '/' if cursor.peek_next() == Some('/') => return,
                c => {
                    cursor.advance();
                    if let Some(single) = TokenKind::single_char(c) {
                        let kind = match cursor.peek().and_then(|next| TokenKind::two_char(c, next)) {
                            Some(pair) => {
                                cursor.advance();
                                pair
                            }
                            None => single,
                        };
                        self.push(cursor, kind, start, None);
                    } else {
                        self.report(DiagnosticKind::UnexpectedCharacter(c), cursor.span_at(start));
                    }
                }
            }
        }
    }

    fn read_string(&mut self, cursor: &mut Cursor<'_>, start: Mark) {
        cursor.advance(); // opening quote
        cursor.eat_while(|c| c != '"');

        if cursor.peek().is_none() {
            // the rest of the line is discarded
            self.report(DiagnosticKind::UnterminatedString, cursor.span_at(start));
            return;
        }
        cursor.advance(); // closing quote

        if cursor.has_invalid_since(start) {
            self.report(DiagnosticKind::InvalidUtf8String, cursor.span_at(start));
            return;
        }

        let lexeme = cursor.slice_from(start);
        let content = lexeme[1..lexeme.len() - 1].to_string();
        self.push(cursor, TokenKind::String, start, Some(Literal::String(content)));
    }

    fn read_number(&mut self, cursor: &mut Cursor<'_>, start: Mark) {
        cursor.eat_while(|c| c.is_ascii_digit());

        // A `.` belongs to the number only when a digit follows it.
        if cursor.peek() == Some('.') && cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            cursor.advance();
            cursor.eat_while(|c| c.is_ascii_digit());
        }

        let literal = canonical_number(cursor.slice_from(start));
        self.push(cursor, TokenKind::Number, start, Some(Literal::Number(literal)));
    }

    fn read_identifier(&mut self, cursor: &mut Cursor<'_>, start: Mark) {
        cursor.eat_while(is_identifier_char);
        let kind = TokenKind::keyword(cursor.slice_from(start)).unwrap_or(TokenKind::Identifier);
        self.push(cursor, kind, start, None);
    }

    fn push(&mut self, cursor: &Cursor<'_>, kind: TokenKind, start: Mark, literal: Option<Literal>) {
        self.tokens.push(Token {
            kind,
            lexeme: cursor.slice_from(start).to_string(),
            literal,
            span: cursor.span_at(start),
        });
    }

    fn report(&mut self, kind: DiagnosticKind, span: Span) {
        trace!(line = span.line, column = span.column, %kind, "diagnostic");
        self.diagnostics.push(Diagnostic { kind, span });
    }
}

/// Position inside the current line.
#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    column: usize,
}

/// Character cursor over a single line.
struct Cursor<'a> {
    text: &'a str,
    /// Byte offsets of U+FFFD standing in for invalid UTF-8.
    invalid: &'a [usize],
    line: usize,
    pos: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str, invalid: &'a [usize], line: usize) -> Self {
        Self {
            text,
            invalid,
            line,
            pos: 0,
            column: 1,
        }
    }

    const fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            column: self.column,
        }
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    const fn span_at(&self, mark: Mark) -> Span {
        Span {
            line: self.line,
            column: mark.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            self.column += 1;
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn has_invalid_since(&self, mark: Mark) -> bool {
        self.invalid
            .iter()
            .any(|&offset| (mark.pos..self.pos).contains(&offset))
    }

    fn slice_from(&self, mark: Mark) -> &'a str {
        &self.text[mark.pos..self.pos]
    }
}
