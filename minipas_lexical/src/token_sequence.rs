//! Contains the [`TokenSequence`] struct, the final output of the lexical analysis phase.

use std::sync::Arc;

use derive_more::Deref;
use minipas_base::{diagnostic::Handler, source_file::SourceFile};

use crate::{
    error,
    keyword_table::KeywordTable,
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Is the ordered list of [`Token`]s scanned from one source file.
///
/// The sequence is in source order and always ends with exactly one sentinel token, either
/// [`TokenKind::EndOfInput`] or [`TokenKind::LexicalError`]; no token follows the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
pub struct TokenSequence {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Tokenizes the whole source file in one go.
    ///
    /// Produces exactly the tokens a [`Scanner`] over the same input yields one at a time. A
    /// lexical error is reported to the `handler` and terminates the sequence.
    #[must_use]
    pub fn tokenize(
        source_file: &Arc<SourceFile>,
        keywords: &KeywordTable,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        Self::from_scanner(Scanner::new(source_file, keywords, handler))
    }

    /// Drains the remaining tokens of the scanner.
    ///
    /// If the scanner had already produced its sentinel, the sequence holds a single
    /// [`TokenKind::EndOfInput`] token.
    #[must_use]
    pub fn from_scanner(mut scanner: Scanner<'_>) -> Self {
        let mut tokens: Vec<Token> = scanner.by_ref().collect();

        if tokens.is_empty() {
            tokens.push(scanner.next_token());
        }

        log::debug!("tokenized {} tokens", tokens.len());

        Self { tokens }
    }

    /// Gets the token terminating the sequence.
    #[must_use]
    pub fn sentinel(&self) -> &Token { &self.tokens[self.tokens.len() - 1] }

    /// Returns `true` if the scan stopped at a lexical error instead of the end of the input.
    #[must_use]
    pub fn is_terminated_by_error(&self) -> bool { self.sentinel().is(TokenKind::LexicalError) }

    /// Gets every token except the sentinel.
    #[must_use]
    pub fn significant(&self) -> &[Token] { &self.tokens[..self.tokens.len() - 1] }

    /// Dissolves the sequence into its tokens, sentinel included.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}
