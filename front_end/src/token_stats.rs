//! Token-count report: how often each lexical category, and each distinct
//! identifier, occurs in a token stream.

use std::collections::BTreeMap;
use std::fmt;

use crate::token::{Token, TokenType, NUM_OF_TOKEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStats {
    /// Indexed by `TokenType::id()`; slot 0 is unused.
    counts: [usize; NUM_OF_TOKEN + 1],
    identifiers: BTreeMap<String, usize>,
}

impl TokenStats {
    pub fn collect(tokens: &[Token]) -> Self {
        let mut stats = TokenStats {
            counts: [0; NUM_OF_TOKEN + 1],
            identifiers: BTreeMap::new(),
        };
        for token in tokens {
            let Some(token_type) = token.token_type else {
                continue;
            };
            stats.counts[token_type.id() as usize] += 1;
            if token_type == TokenType::Name {
                *stats.identifiers.entry(token.lexeme.clone()).or_insert(0) += 1;
            }
        }
        stats
    }

    pub fn count(&self, token_type: TokenType) -> usize {
        self.counts[token_type.id() as usize]
    }

    pub fn identifier_count(&self, name: &str) -> usize {
        self.identifiers.get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// One line per category that occurs, in category order. The `NAME` line is
/// followed by one indented line per identifier, sorted by spelling.
impl fmt::Display for TokenStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token_type in TokenType::ALL {
            let count = self.count(token_type);
            if count == 0 {
                continue;
            }
            writeln!(f, "\"{}\"\t{}", token_type, count)?;
            if token_type == TokenType::Name {
                for (name, count) in &self.identifiers {
                    writeln!(f, "\t\"Identifier\" \"{}\"\t{}", name, count)?;
                }
            }
        }
        Ok(())
    }
}
