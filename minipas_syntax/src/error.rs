//! Contains all kinds of errors that can occur while parsing the declaration part of a program.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use minipas_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};
use minipas_lexical::token::{Token, TokenKind};

/// A token of a specific kind is expected but found an other token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of token that was expected.
    pub expected: TokenKind,

    /// The invalid token that was found.
    pub found: Token,
}

impl UnexpectedSyntax {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!("expected {}, but found {}", self.expected, self.found)
    }
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(&self.found.span(), Option::<i32>::None)
        )
    }
}

/// Is an enumeration containing all kinds of errors that can occur while parsing the declaration
/// part of a program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnexpectedSyntax(UnexpectedSyntax),
    Semantic(minipas_semantic::error::Error),
}

impl Error {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedSyntax(e) => e.message(),
            Self::Semantic(e) => e.message(),
        }
    }
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::UnexpectedSyntax(e) => e.found.span(),
            Self::Semantic(e) => e.span(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedSyntax(e) => e.fmt(f),
            Self::Semantic(e) => e.fmt(f),
        }
    }
}
