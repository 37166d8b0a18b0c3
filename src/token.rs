use std::fmt;

/// Source location for diagnostics and tokens.
///
/// Both fields are 1-indexed; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character punctuation.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Star,
    Slash,
    Equal,
    Bang,
    Less,
    Greater,

    // Two-character operators.
    EqualEqual,
    BangEqual,
    LessEqual,
    GreaterEqual,

    // Literals.
    String,
    Number,
    Identifier,

    // Reserved words.
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Kind of a character that always forms a token on its own or is the
    /// first half of a two-character operator.
    #[must_use]
    pub const fn single_char(ch: char) -> Option<Self> {
        let kind = match ch {
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '{' => Self::LeftBrace,
            '}' => Self::RightBrace,
            ',' => Self::Comma,
            '.' => Self::Dot,
            '-' => Self::Minus,
            '+' => Self::Plus,
            ';' => Self::Semicolon,
            '*' => Self::Star,
            '/' => Self::Slash,
            '=' => Self::Equal,
            '!' => Self::Bang,
            '<' => Self::Less,
            '>' => Self::Greater,
            _ => return None,
        };
        Some(kind)
    }

    /// Kind of the two-character operator `first` `second`, if any.
    ///
    /// `//` is not an operator: it starts a line comment and is handled by
    /// the scanner directly.
    #[must_use]
    pub const fn two_char(first: char, second: char) -> Option<Self> {
        let kind = match (first, second) {
            ('=', '=') => Self::EqualEqual,
            ('!', '=') => Self::BangEqual,
            ('<', '=') => Self::LessEqual,
            ('>', '=') => Self::GreaterEqual,
            _ => return None,
        };
        Some(kind)
    }

    /// Look up a reserved word. Matching is exact and case-sensitive.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "and" => Self::And,
            "class" => Self::Class,
            "else" => Self::Else,
            "false" => Self::False,
            "for" => Self::For,
            "fun" => Self::Fun,
            "if" => Self::If,
            "nil" => Self::Nil,
            "or" => Self::Or,
            "print" => Self::Print,
            "return" => Self::Return,
            "super" => Self::Super,
            "this" => Self::This,
            "true" => Self::True,
            "var" => Self::Var,
            "while" => Self::While,
            _ => return None,
        };
        Some(kind)
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Class
                | Self::Else
                | Self::False
                | Self::For
                | Self::Fun
                | Self::If
                | Self::Nil
                | Self::Or
                | Self::Print
                | Self::Return
                | Self::Super
                | Self::This
                | Self::True
                | Self::Var
                | Self::While
        )
    }

    /// Upper snake case name used in printed token records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Minus => "MINUS",
            Self::Plus => "PLUS",
            Self::Semicolon => "SEMICOLON",
            Self::Star => "STAR",
            Self::Slash => "SLASH",
            Self::Equal => "EQUAL",
            Self::Bang => "BANG",
            Self::Less => "LESS",
            Self::Greater => "GREATER",
            Self::EqualEqual => "EQUAL_EQUAL",
            Self::BangEqual => "BANG_EQUAL",
            Self::LessEqual => "LESS_EQUAL",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Identifier => "IDENTIFIER",
            Self::And => "AND",
            Self::Class => "CLASS",
            Self::Else => "ELSE",
            Self::False => "FALSE",
            Self::For => "FOR",
            Self::Fun => "FUN",
            Self::If => "IF",
            Self::Nil => "NIL",
            Self::Or => "OR",
            Self::Print => "PRINT",
            Self::Return => "RETURN",
            Self::Super => "SUPER",
            Self::This => "THIS",
            Self::True => "TRUE",
            Self::Var => "VAR",
            Self::While => "WHILE",
            Self::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized value attached to `STRING` and `NUMBER` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Content between the quotes, taken verbatim.
    String(String),
    /// Canonical decimal text, always with a fractional part (`42.0`).
    Number(String),
}

impl Literal {
    /// Numeric value of a `Number` literal.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(text) => text.parse().ok(),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Number(s) => f.write_str(s),
        }
    }
}

/// A single token with its kind, source text, literal value, and location.
///
/// Displays as the record `<KIND> <lexeme> <literal-or-null>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, "{literal}"),
            None => f.write_str("null"),
        }
    }
}
