//! Contains the definition of [`Error`]

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use minipas_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};
use minipas_lexical::token::Token;

use crate::symbol_table::DataType;

/// A variable was declared twice in the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableRedeclaration {
    /// The identifier of the second declaration.
    pub identifier: Token,

    /// The type the variable was first declared with.
    pub declared_type: DataType,
}

impl VariableRedeclaration {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "variable `{}` is already declared in this scope",
            self.identifier.lexeme()
        )
    }
}

impl Display for VariableRedeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(
                &self.identifier.span(),
                Some(format!("first declared as `{}`", self.declared_type))
            )
        )
    }
}

/// A variable was declared with something other than a type keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidVariableType {
    /// The token found where the type was expected.
    pub found: Token,
}

impl InvalidVariableType {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!("invalid variable type, found {}", self.found)
    }
}

impl Display for InvalidVariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(
                &self.found.span(),
                Some("expected `integer`, `real` or `boolean`")
            )
        )
    }
}

/// Is an enumeration containing all kinds of semantic errors found in the declaration part of a
/// program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    VariableRedeclaration(VariableRedeclaration),
    InvalidVariableType(InvalidVariableType),
}

impl Error {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::VariableRedeclaration(error) => error.message(),
            Self::InvalidVariableType(error) => error.message(),
        }
    }
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::VariableRedeclaration(error) => error.identifier.span(),
            Self::InvalidVariableType(error) => error.found.span(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableRedeclaration(error) => Display::fmt(error, f),
            Self::InvalidVariableType(error) => Display::fmt(error, f),
        }
    }
}
