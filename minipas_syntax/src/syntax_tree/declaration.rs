//! Contains the syntax tree of a variable declaration and the parsing logic of the `var` block.

use std::sync::Arc;

use getset::{CopyGetters, Getters};
use minipas_base::{
    diagnostic::Handler,
    source_file::{SourceElement, Span},
};
use minipas_lexical::token::{Token, TokenKind};
use minipas_semantic::{
    error::{InvalidVariableType, VariableRedeclaration},
    symbol_table::{DataType, Symbol},
};

use crate::{
    error::{Error, UnexpectedSyntax},
    parser::Parser,
};

/// Syntax Synopsis:
///
/// ``` ebnf
/// VariableDeclaration:
///     Identifier ':' ('integer' | 'real' | 'boolean')
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct VariableDeclaration {
    /// Gets the identifier naming the variable.
    #[get = "pub"]
    identifier: Token,

    /// Gets the type keyword of the declaration.
    #[get = "pub"]
    type_keyword: Token,

    /// Gets the type the keyword names.
    #[get_copy = "pub"]
    data_type: DataType,
}

impl VariableDeclaration {
    /// Gets the declared name.
    #[must_use]
    pub fn name(&self) -> &str { self.identifier.lexeme() }
}

impl SourceElement for VariableDeclaration {
    fn span(&self) -> Span {
        let identifier = self.identifier.span();

        Span::new(
            Arc::clone(identifier.source_file()),
            identifier.start(),
            self.type_keyword.span().end(),
        )
    }
}

impl<'a> Parser<'a> {
    /// Parses the declarations of a `var` block, registering each variable in the symbol table.
    ///
    /// The parser position must be right after the `var` keyword. Declarations are read while
    /// the current token is an identifier, and each one ends with `;` or right before `begin`.
    ///
    /// Redeclaring a variable in the same scope is reported and parsing continues. A missing
    /// `:`, a type that is not a type keyword or a declaration that is neither followed by `;` nor
    /// by `begin` is reported once and aborts the block.
    ///
    /// # Errors
    /// Returns `None` if the block was aborted.
    pub fn parse_variable_declarations(
        &mut self,
        handler: &dyn Handler<Error>,
    ) -> Option<Vec<VariableDeclaration>> {
        let mut declarations = Vec::new();

        while self.peek().is(TokenKind::Identifier) {
            let identifier = self.next_token();

            self.expect(TokenKind::Colon, handler)?;

            let type_keyword = self.peek();
            let Some(data_type) = DataType::from_type_keyword(type_keyword.kind()) else {
                self.report(
                    minipas_semantic::error::Error::from(InvalidVariableType {
                        found: type_keyword.clone(),
                    }),
                    handler,
                );
                return None;
            };
            self.forward();

            if !self
                .symbol_table_mut()
                .declare(identifier.lexeme(), data_type)
            {
                let declared_type = self
                    .symbol_table()
                    .declared_in_current_scope(identifier.lexeme())
                    .map_or(DataType::Unknown, Symbol::data_type);

                self.report(
                    minipas_semantic::error::Error::from(VariableRedeclaration {
                        identifier: identifier.clone(),
                        declared_type,
                    }),
                    handler,
                );
            }

            declarations.push(VariableDeclaration {
                identifier: identifier.clone(),
                type_keyword: type_keyword.clone(),
                data_type,
            });

            match self.peek().kind() {
                TokenKind::Semicolon => self.forward(),
                TokenKind::Begin => {}
                _ => {
                    let found = self.peek().clone();
                    self.report(
                        UnexpectedSyntax {
                            expected: TokenKind::Semicolon,
                            found,
                        },
                        handler,
                    );
                    return None;
                }
            }
        }

        Some(declarations)
    }
}
