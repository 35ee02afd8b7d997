//! Error types
//!
//! Syntax errors carry the absolute character offset and the full source so callers
//! can render an exact diagnostic pointer.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::directives::DirectiveKind;

/// Which front-end stage rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxErrorKind {
    Lex,
    Parse,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::Lex => f.write_str("Lexer Error"),
            SyntaxErrorKind::Parse => f.write_str("Parser Error"),
        }
    }
}

/// A lexing or parsing failure. The first one aborts the whole attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message} at column {position} in expression [{input}]")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    /// Character offset into `input`
    pub position: usize,
    pub input: String,
}

impl SyntaxError {
    pub fn lex(message: impl Into<String>, position: usize, input: &str) -> Self {
        SyntaxError {
            kind: SyntaxErrorKind::Lex,
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    pub fn parse(message: impl Into<String>, position: usize, input: &str) -> Self {
        SyntaxError {
            kind: SyntaxErrorKind::Parse,
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    pub fn is_lex(&self) -> bool {
        self.kind == SyntaxErrorKind::Lex
    }

    pub fn is_parse(&self) -> bool {
        self.kind == SyntaxErrorKind::Parse
    }

    /// Renders the offending source line with a caret under the error position.
    ///
    /// ```text
    /// prop:text = a +* b
    ///                 ^
    /// ```
    pub fn pointer(&self) -> String {
        let mut line_start = 0;
        let mut column = 0;
        for (offset, ch) in self.input.chars().enumerate() {
            if offset == self.position {
                break;
            }
            if ch == '\n' {
                line_start = offset + 1;
                column = 0;
            } else {
                column += 1;
            }
        }

        let line: String = self
            .input
            .chars()
            .skip(line_start)
            .take_while(|&ch| ch != '\n')
            .collect();

        format!("{}\n{}^", line, " ".repeat(column))
    }
}

/// Failure while evaluating an expression against a data context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Cannot read property '{property}' of {receiver}")]
    PropertyOfNothing { property: String, receiver: String },

    #[error("'{callee}' is not a function")]
    NotAFunction { callee: String },

    #[error("Operator '{operator}' is not supported")]
    UnsupportedOperator { operator: String },

    #[error("{0}")]
    Native(String),
}

/// Umbrella error for the bind pass
#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Failed to create '{kind}' binding: {source}")]
    Construction {
        kind: DirectiveKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to evaluate '{kind}' binding: {source}")]
    Evaluation {
        kind: DirectiveKind,
        #[source]
        source: anyhow::Error,
    },
}

impl BindError {
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            BindError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T, E = BindError> = std::result::Result<T, E>;
