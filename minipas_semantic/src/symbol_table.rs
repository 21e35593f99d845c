//! Contains the [`SymbolTable`] and the types of the symbols it stores.

use std::fmt::Display;

use getset::{CopyGetters, Getters};
use minipas_lexical::token::TokenKind;

/// Is an enumeration of the types a variable can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    /// Declared with `integer`.
    Integer,

    /// Declared with `real`.
    Real,

    /// Declared with `boolean`.
    Boolean,

    /// The type has not been resolved yet.
    Unknown,
}

impl DataType {
    /// Maps a type keyword to its data type.
    ///
    /// Returns `None` for any kind that does not name a type.
    #[must_use]
    pub fn from_type_keyword(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Integer => Some(Self::Integer),
            TokenKind::Real => Some(Self::Real),
            TokenKind::Boolean => Some(Self::Boolean),
            _ => None,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
        })
    }
}

/// Represents a declared variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Symbol {
    /// Gets the name the variable was declared with.
    #[get = "pub"]
    name: String,

    /// Gets the declared type of the variable.
    #[get_copy = "pub"]
    data_type: DataType,

    /// Gets the scope the variable was declared in (0 is the outermost scope).
    #[get_copy = "pub"]
    scope_id: usize,
}

/// Is a scope-aware registry of declared variables.
///
/// Symbols are kept in declaration order. Within one scope a name is declared at most once;
/// [`SymbolTable::lookup`] searches from the newest declaration to the oldest, so an inner
/// declaration shadows an outer one.
///
/// Leaving a scope with [`SymbolTable::exit_scope`] removes every symbol declared in it, so a
/// sibling scope may declare the same names again.
#[derive(Debug, Clone, PartialEq, Eq, Default, CopyGetters)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,

    /// Gets the nesting level new declarations are made in.
    #[get_copy = "pub"]
    current_scope: usize,
}

impl SymbolTable {
    /// Creates an empty table positioned in the outermost scope.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Declares `name` in the current scope.
    ///
    /// Returns `false` and leaves the table unchanged if `name` is already declared in the
    /// current scope.
    pub fn declare(&mut self, name: &str, data_type: DataType) -> bool {
        if self.declared_in_current_scope(name).is_some() {
            log::debug!("`{name}` is already declared in scope {}", self.current_scope);
            return false;
        }

        self.symbols.push(Symbol {
            name: name.to_owned(),
            data_type,
            scope_id: self.current_scope,
        });

        true
    }

    /// Gets the symbol `name` is declared as in the current scope, if any.
    #[must_use]
    pub fn declared_in_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .iter()
            .rev()
            .take_while(|symbol| symbol.scope_id == self.current_scope)
            .find(|symbol| symbol.name == name)
    }

    /// Finds the most recently declared symbol named `name` in any open scope.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|symbol| symbol.name == name)
    }

    /// Opens a new innermost scope and returns its id.
    pub fn enter_scope(&mut self) -> usize {
        self.current_scope += 1;
        self.current_scope
    }

    /// Closes the innermost scope, dropping the symbols declared in it.
    ///
    /// Returns `false` when already in the outermost scope, which cannot be closed.
    pub fn exit_scope(&mut self) -> bool {
        if self.current_scope == 0 {
            return false;
        }

        let retained = self
            .symbols
            .iter()
            .rposition(|symbol| symbol.scope_id < self.current_scope)
            .map_or(0, |index| index + 1);

        log::trace!(
            "closing scope {} with {} symbols",
            self.current_scope,
            self.symbols.len() - retained
        );

        self.symbols.truncate(retained);
        self.current_scope -= 1;

        true
    }

    /// Gets every symbol of the open scopes in declaration order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] { &self.symbols }

    /// Gets the number of symbols of the open scopes.
    #[must_use]
    pub fn len(&self) -> usize { self.symbols.len() }

    /// Returns `true` if no symbol is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.symbols.is_empty() }
}
