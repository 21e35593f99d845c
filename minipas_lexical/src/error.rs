//! Contains all kinds of lexical errors that can occur while scanning the source code.
//!
//! Every lexical error terminates the scan: the scanner reports it to the handler and emits a
//! [`crate::token::TokenKind::LexicalError`] sentinel.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use minipas_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};

/// The source code contains a `{` comment that is never closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnterminatedComment {
    /// The span from the opening `{` to the end of the input.
    pub span: Span,
}

impl UnterminatedComment {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String { "found an unclosed `{` comment".to_owned() }
}

impl Display for UnterminatedComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(&self.span, Some("the comment starts here"))
        )
    }
}

/// A string literal reaches the end of its line or of the input before its closing quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnterminatedString {
    /// The span of the string literal read so far.
    pub span: Span,
}

impl UnterminatedString {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String { "found an unterminated string literal".to_owned() }
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(&self.span, Some("add a closing `'` on this line"))
        )
    }
}

/// A string literal holds more characters than the scanner buffers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringTooLong {
    /// The span of the whole string literal.
    pub span: Span,

    /// The number of characters between the quotes.
    pub length: usize,

    /// The largest accepted number of characters.
    pub maximum: usize,
}

impl StringTooLong {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "string literal has {} characters, the limit is {}",
            self.length, self.maximum
        )
    }
}

impl Display for StringTooLong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// An identifier or numeric literal overflows the scanner's token buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexemeTooLong {
    /// The span of the offending lexeme.
    pub span: Span,

    /// The largest accepted number of characters.
    pub maximum: usize,
}

impl LexemeTooLong {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!("token is longer than {} characters", self.maximum)
    }
}

impl Display for LexemeTooLong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// A character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnrecognizedCharacter {
    /// The span of the character.
    pub span: Span,

    /// The character itself.
    pub character: char,
}

impl UnrecognizedCharacter {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String { format!("unrecognized character {:?}", self.character) }
}

impl Display for UnrecognizedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while scanning the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnterminatedComment(UnterminatedComment),
    UnterminatedString(UnterminatedString),
    StringTooLong(StringTooLong),
    LexemeTooLong(LexemeTooLong),
    UnrecognizedCharacter(UnrecognizedCharacter),
}

impl Error {
    /// Gets the one-line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnterminatedComment(error) => error.message(),
            Self::UnterminatedString(error) => error.message(),
            Self::StringTooLong(error) => error.message(),
            Self::LexemeTooLong(error) => error.message(),
            Self::UnrecognizedCharacter(error) => error.message(),
        }
    }
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::UnterminatedComment(error) => error.span.clone(),
            Self::UnterminatedString(error) => error.span.clone(),
            Self::StringTooLong(error) => error.span.clone(),
            Self::LexemeTooLong(error) => error.span.clone(),
            Self::UnrecognizedCharacter(error) => error.span.clone(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedComment(error) => Display::fmt(error, f),
            Self::UnterminatedString(error) => Display::fmt(error, f),
            Self::StringTooLong(error) => Display::fmt(error, f),
            Self::LexemeTooLong(error) => Display::fmt(error, f),
            Self::UnrecognizedCharacter(error) => Display::fmt(error, f),
        }
    }
}
