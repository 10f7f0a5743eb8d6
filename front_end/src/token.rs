use std::fmt;

/// Coarse classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Punct,
    Keyword,
    Str,
    Number,
    Eof,
}

/// The 49 lexical categories of MPPL, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenType {
    Name = 1,
    Program,
    Var,
    Array,
    Of,
    Begin,
    End,
    If,
    Then,
    Else,
    Procedure,
    Return,
    Call,
    While,
    Do,
    Not,
    Or,
    Div,
    And,
    Char,
    Integer,
    Boolean,
    Readln,
    Writeln,
    True,
    False,
    Number,
    String,
    Plus,
    Minus,
    Star,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Assign,
    Dot,
    Comma,
    Colon,
    Semicolon,
    Read,
    Write,
    Break,
}

pub const NUM_OF_TOKEN: usize = 49;

/// Reserved words, in token-id order.
pub const KEYWORDS: [(&str, TokenType); 28] = [
    ("program", TokenType::Program),
    ("var", TokenType::Var),
    ("array", TokenType::Array),
    ("of", TokenType::Of),
    ("begin", TokenType::Begin),
    ("end", TokenType::End),
    ("if", TokenType::If),
    ("then", TokenType::Then),
    ("else", TokenType::Else),
    ("procedure", TokenType::Procedure),
    ("return", TokenType::Return),
    ("call", TokenType::Call),
    ("while", TokenType::While),
    ("do", TokenType::Do),
    ("not", TokenType::Not),
    ("or", TokenType::Or),
    ("div", TokenType::Div),
    ("and", TokenType::And),
    ("char", TokenType::Char),
    ("integer", TokenType::Integer),
    ("boolean", TokenType::Boolean),
    ("readln", TokenType::Readln),
    ("writeln", TokenType::Writeln),
    ("true", TokenType::True),
    ("false", TokenType::False),
    ("read", TokenType::Read),
    ("write", TokenType::Write),
    ("break", TokenType::Break),
];

/// Punctuation symbols. Two-character symbols come first so a scan over
/// this table performs longest match.
pub const PUNCTUATION: [(&str, TokenType); 18] = [
    (":=", TokenType::Assign),
    ("<>", TokenType::NotEqual),
    ("<=", TokenType::LessEqual),
    (">=", TokenType::GreaterEqual),
    ("+", TokenType::Plus),
    ("-", TokenType::Minus),
    ("*", TokenType::Star),
    ("=", TokenType::Equal),
    ("<", TokenType::Less),
    (">", TokenType::Greater),
    ("(", TokenType::LeftParen),
    (")", TokenType::RightParen),
    ("[", TokenType::LeftBracket),
    ("]", TokenType::RightBracket),
    (".", TokenType::Dot),
    (",", TokenType::Comma),
    (":", TokenType::Colon),
    (";", TokenType::Semicolon),
];

impl TokenType {
    /// Every category in id order.
    pub const ALL: [TokenType; NUM_OF_TOKEN] = [
        TokenType::Name,
        TokenType::Program,
        TokenType::Var,
        TokenType::Array,
        TokenType::Of,
        TokenType::Begin,
        TokenType::End,
        TokenType::If,
        TokenType::Then,
        TokenType::Else,
        TokenType::Procedure,
        TokenType::Return,
        TokenType::Call,
        TokenType::While,
        TokenType::Do,
        TokenType::Not,
        TokenType::Or,
        TokenType::Div,
        TokenType::And,
        TokenType::Char,
        TokenType::Integer,
        TokenType::Boolean,
        TokenType::Readln,
        TokenType::Writeln,
        TokenType::True,
        TokenType::False,
        TokenType::Number,
        TokenType::String,
        TokenType::Plus,
        TokenType::Minus,
        TokenType::Star,
        TokenType::Equal,
        TokenType::NotEqual,
        TokenType::Less,
        TokenType::LessEqual,
        TokenType::Greater,
        TokenType::GreaterEqual,
        TokenType::LeftParen,
        TokenType::RightParen,
        TokenType::LeftBracket,
        TokenType::RightBracket,
        TokenType::Assign,
        TokenType::Dot,
        TokenType::Comma,
        TokenType::Colon,
        TokenType::Semicolon,
        TokenType::Read,
        TokenType::Write,
        TokenType::Break,
    ];

    /// Numeric subtype id (1-based).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Spelling used in reports: the keyword or symbol itself, or
    /// `NAME`/`NUMBER`/`STRING` for the open classes.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Name => "NAME",
            TokenType::Number => "NUMBER",
            TokenType::String => "STRING",
            other => KEYWORDS
                .iter()
                .chain(PUNCTUATION.iter())
                .find(|(_, ty)| *ty == other)
                .map(|(text, _)| *text)
                .unwrap_or("?"),
        }
    }

    pub fn lookup_keyword(word: &str) -> Option<TokenType> {
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == word)
            .map(|(_, ty)| *ty)
    }

    pub fn kind(self) -> TokenKind {
        match self {
            TokenType::Name => TokenKind::Identifier,
            TokenType::Number => TokenKind::Number,
            TokenType::String => TokenKind::Str,
            ty if KEYWORDS.iter().any(|(_, k)| *k == ty) => TokenKind::Keyword,
            _ => TokenKind::Punct,
        }
    }

    pub fn is_standard_type(self) -> bool {
        matches!(self, TokenType::Integer | TokenType::Boolean | TokenType::Char)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// `None` only for the end-of-input token.
    pub token_type: Option<TokenType>,
    /// Identifier spelling, decoded string contents, or the digits of a number.
    pub lexeme: String,
    pub number: u16,
    pub line: usize,
    pub length: usize,
    /// First token on its source line.
    pub at_bol: bool,
    /// Whitespace (or a comment) preceded this token.
    pub has_space: bool,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: &str, line: usize) -> Self {
        Self {
            kind: token_type.kind(),
            token_type: Some(token_type),
            lexeme: lexeme.to_string(),
            number: 0,
            line,
            length: lexeme.chars().count(),
            at_bol: false,
            has_space: false,
        }
    }

    pub fn number(value: u16, digits: &str, line: usize) -> Self {
        Self {
            number: value,
            ..Self::new(TokenType::Number, digits, line)
        }
    }

    pub fn eof(line: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            token_type: None,
            lexeme: String::new(),
            number: 0,
            line,
            length: 0,
            at_bol: false,
            has_space: false,
        }
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == Some(token_type)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// How the token is shown in "found ..." diagnostics.
    pub fn describe(&self) -> String {
        match (self.kind, self.token_type) {
            (TokenKind::Eof, _) => "end of input".to_string(),
            (TokenKind::Identifier, _) => format!("name '{}'", self.lexeme),
            (TokenKind::Number, _) => format!("number {}", self.number),
            (TokenKind::Str, _) => format!("string '{}'", self.lexeme),
            (_, Some(ty)) => format!("'{}'", ty),
            (_, None) => "unknown token".to_string(),
        }
    }
}
