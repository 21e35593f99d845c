//! Is a module containing the [`Token`] type and all of its related types.

use std::fmt::Display;

use getset::CopyGetters;
use minipas_base::source_file::{Location, SourceElement, Span};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Is an enumeration containing every lexical category of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum TokenKind {
    // keywords
    Program,
    Var,
    Integer,
    Real,
    Boolean,
    Procedure,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Read,
    Write,

    // operators
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // punctuation
    Semicolon,
    Colon,
    Comma,
    Dot,
    LeftParenthesis,
    RightParenthesis,

    Identifier,
    IntegerLiteral,
    RealLiteral,
    BooleanLiteral,
    StringLiteral,

    /// Terminates a scan that reached the end of the input.
    EndOfInput,

    /// Terminates a scan that hit a lexical error.
    LexicalError,
}

impl TokenKind {
    /// Gets the reserved spelling of a keyword kind.
    #[must_use]
    pub fn reserved_word(self) -> Option<&'static str> {
        Some(match self {
            Self::Program => "program",
            Self::Var => "var",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Boolean => "boolean",
            Self::Procedure => "procedure",
            Self::Begin => "begin",
            Self::End => "end",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::Read => "read",
            Self::Write => "write",
            _ => return None,
        })
    }

    /// Gets the fixed spelling of an operator or punctuation kind.
    #[must_use]
    pub fn symbol(self) -> Option<&'static str> {
        Some(match self {
            Self::Assign => ":=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            _ => return None,
        })
    }

    /// Returns `true` if the kind is a reserved word.
    #[must_use]
    pub fn is_keyword(self) -> bool { self.reserved_word().is_some() }

    /// Returns `true` if the kind is an operator (as opposed to punctuation).
    #[must_use]
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::Plus
                | Self::Minus
                | Self::Multiply
                | Self::Divide
                | Self::Equal
                | Self::NotEqual
                | Self::Less
                | Self::Greater
                | Self::LessEqual
                | Self::GreaterEqual
        )
    }

    /// Returns `true` if a token of this kind terminates a token sequence.
    #[must_use]
    pub fn is_sentinel(self) -> bool { matches!(self, Self::EndOfInput | Self::LexicalError) }

    /// Iterates over every word the standard keyword table reserves, paired with its kind.
    ///
    /// Besides the keywords this includes `true` and `false`, which classify as
    /// [`TokenKind::BooleanLiteral`].
    pub fn reserved_words() -> impl Iterator<Item = (&'static str, Self)> {
        Self::iter()
            .filter_map(|kind| kind.reserved_word().map(|word| (word, kind)))
            .chain([("true", Self::BooleanLiteral), ("false", Self::BooleanLiteral)])
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(word) = self.reserved_word() {
            return write!(f, "keyword `{word}`");
        }

        if let Some(symbol) = self.symbol() {
            let category = if self.is_operator() {
                "operator"
            } else {
                "punctuation"
            };

            return write!(f, "{category} `{symbol}`");
        }

        f.write_str(match self {
            Self::Identifier => "identifier",
            Self::IntegerLiteral => "integer literal",
            Self::RealLiteral => "real literal",
            Self::BooleanLiteral => "boolean literal",
            Self::StringLiteral => "string literal",
            Self::EndOfInput => "end of input",
            _ => "lexical error",
        })
    }
}

/// Represents a classified lexeme.
///
/// Tokens are created by the [`crate::scanner::Scanner`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, CopyGetters)]
pub struct Token {
    /// Gets the lexical category of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    lexeme: String,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Gets the exact source spelling of the token.
    #[must_use]
    pub fn lexeme(&self) -> &str { &self.lexeme }

    /// Gets the location of the first character of the token.
    #[must_use]
    pub fn location(&self) -> Location { self.span.start() }

    /// Gets the line of the first character of the token (starts at 1).
    #[must_use]
    pub fn line(&self) -> usize { self.span.start().line }

    /// Gets the column of the first character of the token (starts at 1).
    #[must_use]
    pub fn column(&self) -> usize { self.span.start().column }

    /// Returns `true` if the token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }
}

impl SourceElement for Token {
    fn span(&self) -> Span { self.span.clone() }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => f.write_str("end of input"),
            kind if kind.is_keyword() || kind.symbol().is_some() => Display::fmt(&kind, f),
            kind => write!(f, "{kind} `{}`", self.lexeme),
        }
    }
}
