//! Lexical analysis for MPPL source text.
//!
//! The lexer walks the source once and produces a flat `Vec<Token>` that is
//! always terminated by an end-of-input token. The first malformed lexeme
//! stops the scan with a `LexError`.

use snafu::Snafu;

use crate::token::{Token, TokenType, PUNCTUATION};

/// Longest accepted identifier or string literal.
pub const MAX_STR_SIZE: usize = 1024;

/// Largest numeric literal.
pub const MAX_NUM: u32 = 32767;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum LexError {
    #[snafu(display("line {line}: illegal character '{ch}'"))]
    IllegalCharacter { ch: char, line: usize },

    #[snafu(display("line {line}: unterminated comment"))]
    UnterminatedComment { line: usize },

    #[snafu(display("line {line}: unterminated string literal"))]
    UnterminatedString { line: usize },

    #[snafu(display("line {line}: name is longer than {MAX_STR_SIZE} characters"))]
    NameTooLong { line: usize },

    #[snafu(display("line {line}: string literal is longer than {MAX_STR_SIZE} characters"))]
    StringTooLong { line: usize },

    #[snafu(display("line {line}: number {digits} exceeds {MAX_NUM}"))]
    NumberOutOfRange { digits: String, line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::IllegalCharacter { line, .. }
            | LexError::UnterminatedComment { line }
            | LexError::UnterminatedString { line }
            | LexError::NameTooLong { line }
            | LexError::StringTooLong { line }
            | LexError::NumberOutOfRange { line, .. } => *line,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer {
    source: Vec<char>,
    current: usize,
    line: usize,
    at_bol: bool,
    has_space: bool,
    finished: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            current: 0,
            line: 1,
            at_bol: true,
            has_space: false,
            finished: false,
        }
    }

    /// Scan the whole input.
    pub fn scan_tokens(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Pull the next token. Once the end of input has been reached every
    /// further call yields another end-of-input token.
    pub fn next_token(&mut self) -> LexResult<Token> {
        if self.finished {
            return Ok(Token::eof(self.line));
        }
        self.skip_trivia()?;

        let Some(c) = self.peek() else {
            self.finished = true;
            return Ok(Token::eof(self.line));
        };

        let mut token = if c.is_ascii_alphabetic() {
            self.scan_name()?
        } else if c.is_ascii_digit() {
            self.scan_number()?
        } else if c == '\'' {
            self.scan_string()?
        } else {
            self.scan_punct()?
        };

        token.at_bol = self.at_bol;
        token.has_space = self.has_space;
        self.at_bol = false;
        self.has_space = false;
        Ok(token)
    }

    /// Whitespace, line terminators and both comment forms.
    fn skip_trivia(&mut self) -> LexResult<()> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' => {
                    self.advance();
                    self.has_space = true;
                }
                '\n' | '\r' => {
                    self.newline();
                    self.at_bol = true;
                }
                '{' => {
                    let start_line = self.line;
                    self.advance();
                    loop {
                        match self.peek() {
                            None => return UnterminatedCommentSnafu { line: start_line }.fail(),
                            Some('}') => {
                                self.advance();
                                break;
                            }
                            Some('\n' | '\r') => self.newline(),
                            Some(_) => {
                                self.advance();
                            }
                        }
                    }
                    self.has_space = true;
                }
                '/' if self.peek_next() == Some('*') => {
                    let start_line = self.line;
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            None => return UnterminatedCommentSnafu { line: start_line }.fail(),
                            Some('*') if self.peek_next() == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some('\n' | '\r') => self.newline(),
                            Some(_) => {
                                self.advance();
                            }
                        }
                    }
                    self.has_space = true;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Consume one line terminator: `\n`, `\r`, `\r\n` or `\n\r`.
    fn newline(&mut self) {
        let first = self.advance();
        let pair = if first == Some('\r') { '\n' } else { '\r' };
        if self.peek() == Some(pair) {
            self.advance();
        }
        self.line += 1;
    }

    fn scan_name(&mut self) -> LexResult<Token> {
        let start = self.current;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.advance();
            if self.current - start > MAX_STR_SIZE {
                return NameTooLongSnafu { line: self.line }.fail();
            }
        }
        let text: String = self.source[start..self.current].iter().collect();
        let token_type = TokenType::lookup_keyword(&text).unwrap_or(TokenType::Name);
        Ok(Token::new(token_type, &text, self.line))
    }

    fn scan_number(&mut self) -> LexResult<Token> {
        let start = self.current;
        let mut value: u32 = 0;
        let mut overflow = false;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            self.advance();
            if !overflow {
                value = value * 10 + d;
                overflow = value > MAX_NUM;
            }
        }
        let digits: String = self.source[start..self.current].iter().collect();
        if overflow {
            return NumberOutOfRangeSnafu { digits, line: self.line }.fail();
        }
        Ok(Token::number(value as u16, &digits, self.line))
    }

    fn scan_string(&mut self) -> LexResult<Token> {
        let line = self.line;
        self.advance(); // opening quote
        let mut text = String::new();
        let mut length = 0;
        loop {
            match self.advance() {
                None => return UnterminatedStringSnafu { line }.fail(),
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        self.advance();
                        text.push('\'');
                        length += 1;
                    } else {
                        break;
                    }
                }
                Some('\n' | '\r') => return UnterminatedStringSnafu { line }.fail(),
                Some(c) => {
                    text.push(c);
                    length += 1;
                }
            }
            if length > MAX_STR_SIZE {
                return StringTooLongSnafu { line }.fail();
            }
        }
        Ok(Token::new(TokenType::String, &text, line))
    }

    fn scan_punct(&mut self) -> LexResult<Token> {
        let rest = &self.source[self.current..];
        for (symbol, token_type) in PUNCTUATION.iter() {
            let matches = symbol
                .chars()
                .enumerate()
                .all(|(i, c)| rest.get(i) == Some(&c));
            if matches {
                self.current += symbol.len();
                return Ok(Token::new(*token_type, symbol, self.line));
            }
        }
        let ch = rest.first().copied().unwrap_or('\0');
        IllegalCharacterSnafu { ch, line: self.line }.fail()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.current += 1;
        }
        c
    }
}

/// Lex `source` into tokens terminated by an end-of-input token.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).scan_tokens()
}
