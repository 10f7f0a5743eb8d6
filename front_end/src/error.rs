use snafu::Snafu;

use crate::lexer::LexError;

/// Error type for parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("line {line}: expected {expected}, found {found}"))]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    #[snafu(display("line {line}: array size must be greater than 0"))]
    ZeroArraySize { line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. } | ParseError::ZeroArraySize { line } => *line,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Everything that can stop the front end.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum FrontEndError {
    #[snafu(context(false), display("{source}"))]
    Lex { source: LexError },

    #[snafu(context(false), display("{source}"))]
    Parse { source: ParseError },
}

impl FrontEndError {
    pub fn line(&self) -> usize {
        match self {
            FrontEndError::Lex { source } => source.line(),
            FrontEndError::Parse { source } => source.line(),
        }
    }
}
