//! Contains the syntax tree of a whole program and the parsing logic driving the [`Parser`]
//! through its [`State`]s.

use getset::Getters;
use minipas_base::diagnostic::Handler;
use minipas_lexical::token::{Token, TokenKind};

use super::declaration::VariableDeclaration;
use crate::{
    error::Error,
    parser::{Parser, State},
};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Program:
///     'program' Identifier ';' ('var' VariableDeclaration (';' VariableDeclaration)* ';'?)?
///     'begin' Statements 'end' '.'
///     ;
/// ```
///
/// The statements between `begin` and `end` are skipped without being checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Program {
    /// Gets the identifier naming the program, if the header has one.
    #[get = "pub"]
    name: Option<Token>,

    /// Gets the declarations of the `var` block in source order.
    #[get = "pub"]
    declarations: Vec<VariableDeclaration>,
}

impl Program {
    /// Dissolves the [`Program`] into its name and its declarations.
    #[must_use]
    pub fn dissolve(self) -> (Option<Token>, Vec<VariableDeclaration>) {
        (self.name, self.declarations)
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`Program`].
    ///
    /// A token that does not match what the current [`State`] expects is reported and counted,
    /// and parsing goes on with the next state. Only an aborted `var` block stops the parse.
    ///
    /// The parser reads its token sequence once. After a parse has finished, whether it
    /// completed or was aborted, further calls report nothing and return `None`.
    ///
    /// # Errors
    /// Returns `None` if the parse was aborted; the reported errors tell why.
    pub fn parse_program(&mut self, handler: &dyn Handler<Error>) -> Option<Program> {
        if self.state() == State::Done {
            log::debug!("the program has already been parsed");
            return None;
        }

        let mut name = None;
        let mut declarations = Vec::new();

        loop {
            let next = match self.state() {
                State::ExpectProgramHeader => {
                    self.expect(TokenKind::Program, handler);
                    name = self.expect(TokenKind::Identifier, handler).cloned();
                    self.expect(TokenKind::Semicolon, handler);

                    State::ExpectOptionalVarBlock
                }
                State::ExpectOptionalVarBlock => {
                    if self.peek().is(TokenKind::Var) {
                        self.forward();

                        let Some(parsed) = self.parse_variable_declarations(handler) else {
                            log::debug!("aborted the `var` block at {}", self.peek().location());
                            self.set_state(State::Done);
                            return None;
                        };
                        declarations = parsed;
                    }

                    State::ExpectBeginBlock
                }
                State::ExpectBeginBlock => {
                    self.expect(TokenKind::Begin, handler);
                    State::SkippingStatements
                }
                State::SkippingStatements => {
                    while !self.peek().is(TokenKind::End) && !self.peek().kind().is_sentinel() {
                        self.forward();
                    }

                    State::ExpectEnd
                }
                State::ExpectEnd => {
                    self.expect(TokenKind::End, handler);
                    State::ExpectDot
                }
                State::ExpectDot => {
                    self.expect(TokenKind::Dot, handler);
                    State::Done
                }
                State::Done => break,
            };

            self.set_state(next);
        }

        log::debug!(
            "parsed {} declarations with {} errors",
            declarations.len(),
            self.error_count()
        );

        Some(Program { name, declarations })
    }
}
