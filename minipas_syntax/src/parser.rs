//! Contains the [`Parser`] logic.

use getset::{CopyGetters, Getters};
use minipas_base::diagnostic::Handler;
use minipas_lexical::{
    token::{Token, TokenKind},
    token_sequence::TokenSequence,
};
use minipas_semantic::symbol_table::SymbolTable;

use crate::error::{Error, UnexpectedSyntax};

/// Is an enumeration of the phases the parser walks through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Expects `program <identifier> ;`.
    ExpectProgramHeader,

    /// Parses the `var` block if the current token starts one.
    ExpectOptionalVarBlock,

    /// Expects the `begin` of the main block.
    ExpectBeginBlock,

    /// Skips the statements of the main block up to its `end`.
    SkippingStatements,

    /// Expects the `end` of the main block.
    ExpectEnd,

    /// Expects the final `.`.
    ExpectDot,

    /// The whole program has been parsed.
    Done,
}

/// The parser of the declaration part of a program.
///
/// The parser reads a [`TokenSequence`] front to back and never moves past its sentinel token.
/// Every error it reports to the handler is also counted in [`Parser::error_count`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    current_index: usize,

    /// Gets the phase the parser is in.
    #[get_copy = "pub"]
    state: State,

    /// Gets the number of errors reported so far.
    #[get_copy = "pub"]
    error_count: usize,

    /// Gets the table of the variables declared so far.
    #[get = "pub"]
    symbol_table: SymbolTable,
}

impl<'a> Parser<'a> {
    /// Creates a new parser positioned at the first token of the sequence.
    #[must_use]
    pub fn new(token_sequence: &'a TokenSequence) -> Self {
        Self {
            tokens: token_sequence.as_slice(),
            current_index: 0,
            state: State::ExpectProgramHeader,
            error_count: 0,
            symbol_table: SymbolTable::new(),
        }
    }

    /// Returns the current token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.current_index]
    }

    /// Moves to the next token, unless the current one is the sentinel.
    pub fn forward(&mut self) {
        if self.current_index + 1 < self.tokens.len() {
            self.current_index += 1;
        }
    }

    /// Returns the current token and moves past it.
    pub fn next_token(&mut self) -> &'a Token {
        let token = self.peek();
        self.forward();
        token
    }

    /// Consumes the current token if it is of the `expected` kind.
    ///
    /// Otherwise an [`UnexpectedSyntax`] error is reported and the current token is left in
    /// place.
    pub fn expect(&mut self, expected: TokenKind, handler: &dyn Handler<Error>) -> Option<&'a Token> {
        let found = self.peek();

        if found.is(expected) {
            self.forward();
            Some(found)
        } else {
            self.report(
                UnexpectedSyntax {
                    expected,
                    found: found.clone(),
                },
                handler,
            );
            None
        }
    }

    /// Reports an error to the handler and counts it.
    pub fn report(&mut self, error: impl Into<Error>, handler: &dyn Handler<Error>) {
        self.error_count += 1;
        handler.receive(error.into());
    }

    /// Dissolves the parser into its symbol table and error count.
    #[must_use]
    pub fn dissolve(self) -> (SymbolTable, usize) { (self.symbol_table, self.error_count) }

    pub(crate) fn set_state(&mut self, state: State) {
        log::trace!("{:?} -> {:?} at {}", self.state, state, self.peek().location());
        self.state = state;
    }

    pub(crate) fn symbol_table_mut(&mut self) -> &mut SymbolTable { &mut self.symbol_table }
}
