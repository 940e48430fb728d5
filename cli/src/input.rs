//! Whitespace-separated integer input for the two problem formats.

use std::str::SplitWhitespace;

use edmonds_flow_core::RoadSpec;

/// Upper bound on vertex and item counts read from input
pub const MAX_VERTICES: usize = 1 << 20;

/// Tokenizer failures, with the 1-based position of the offending token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Unexpected end of input while reading {what} (token {position})")]
    UnexpectedEof { what: &'static str, position: usize },

    #[error("Token {position} ({token:?}) is not a valid {what}")]
    InvalidToken {
        what: &'static str,
        token: String,
        position: usize,
    },

    #[error("Token {position} gives {what} {value}, above the limit of {limit}")]
    TooLarge {
        what: &'static str,
        value: usize,
        limit: usize,
        position: usize,
    },
}

/// Streams integers out of a text buffer
pub struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next_token(&mut self, what: &'static str) -> Result<&'a str, InputError> {
        self.position += 1;
        self.inner.next().ok_or(InputError::UnexpectedEof {
            what,
            position: self.position,
        })
    }

    pub fn next_usize(&mut self, what: &'static str) -> Result<usize, InputError> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| InputError::InvalidToken {
            what,
            token: token.to_string(),
            position: self.position,
        })
    }

    /// Like [`Tokens::next_usize`], rejecting values above `limit`
    pub fn next_bounded(&mut self, what: &'static str, limit: usize) -> Result<usize, InputError> {
        let value = self.next_usize(what)?;
        if value > limit {
            return Err(InputError::TooLarge {
                what,
                value,
                limit,
                position: self.position,
            });
        }
        Ok(value)
    }

    pub fn next_i64(&mut self, what: &'static str) -> Result<i64, InputError> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| InputError::InvalidToken {
            what,
            token: token.to_string(),
            position: self.position,
        })
    }
}

/// `L R` followed by `L` rows of `R` integers; `1` marks a compatible pair
pub fn parse_adjacency(text: &str) -> Result<Vec<Vec<bool>>, InputError> {
    let mut tokens = Tokens::new(text);
    let rows = tokens.next_bounded("left count", MAX_VERTICES)?;
    let cols = tokens.next_bounded("right count", MAX_VERTICES)?;

    (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| tokens.next_i64("adjacency entry").map(|value| value == 1))
                .collect::<Result<Vec<bool>, InputError>>()
        })
        .collect()
}

/// `n m` followed by `m` lines `u v c` with 1-indexed endpoints
pub fn parse_edge_list(text: &str) -> Result<(usize, Vec<RoadSpec>), InputError> {
    let mut tokens = Tokens::new(text);
    let vertex_count = tokens.next_bounded("vertex count", MAX_VERTICES)?;
    let edge_count = tokens.next_usize("edge count")?;

    let roads = (0..edge_count)
        .map(|_| {
            let from = tokens.next_usize("edge start")?;
            let to = tokens.next_usize("edge end")?;
            let capacity = tokens.next_i64("edge capacity")?;
            Ok::<RoadSpec, InputError>((from, to, capacity))
        })
        .collect::<Result<Vec<_>, InputError>>()?;

    Ok((vertex_count, roads))
}
