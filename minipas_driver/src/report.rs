//! Contains the plain-text renderings the driver prints and writes to the report file.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use minipas_base::source_file::SourceElement;
use minipas_lexical::token::Token;
use minipas_semantic::symbol_table::SymbolTable;

/// Is an enumeration of every diagnostic the front end can report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Diagnostic {
    Lexical(minipas_lexical::error::Error),
    Syntax(minipas_syntax::error::Error),
}

impl Diagnostic {
    fn category(&self) -> &'static str {
        match self {
            Self::Lexical(..) => "Lexical Error",
            Self::Syntax(minipas_syntax::error::Error::UnexpectedSyntax(..)) => "Syntax Error",
            Self::Syntax(minipas_syntax::error::Error::Semantic(..)) => "Semantic Error",
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (span, message) = match self {
            Self::Lexical(error) => (error.span(), error.message()),
            Self::Syntax(error) => (error.span(), error.message()),
        };

        write!(
            f,
            "{}: {message} at line {}, column {}",
            self.category(),
            span.start().line,
            span.start().column
        )
    }
}

/// Is the outcome of the syntactic and semantic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    /// The program was parsed without errors.
    Success,

    /// The program was parsed, with the given number of errors.
    CompletedWithErrors(usize),

    /// The parse was aborted.
    Fatal,
}

impl Verdict {
    /// Derives the verdict from the parse outcome.
    #[must_use]
    pub fn new(parsed: bool, error_count: usize) -> Self {
        match (parsed, error_count) {
            (false, _) => Self::Fatal,
            (true, 0) => Self::Success,
            (true, count) => Self::CompletedWithErrors(count),
        }
    }

    /// Returns `true` if the program passed the analysis.
    #[must_use]
    pub fn is_success(self) -> bool { self == Self::Success }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("Analysis completed successfully with no errors."),
            Self::CompletedWithErrors(count) => {
                write!(f, "Analysis completed with {count} errors.")
            }
            Self::Fatal => f.write_str("Analysis failed with fatal errors."),
        }
    }
}

/// Displays one line per token: its kind, its lexeme and its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenListing<'a>(pub &'a [Token]);

impl<'a> Display for TokenListing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in self.0 {
            writeln!(
                f,
                "Token: {:<24}, Lexeme: {:<30}, Line: {:<5}, Column: {:<5}",
                token.kind().to_string(),
                token.lexeme(),
                token.line(),
                token.column()
            )?;
        }

        Ok(())
    }
}

/// Displays one line per declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolListing<'a>(pub &'a SymbolTable);

impl<'a> Display for SymbolListing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in self.0.symbols() {
            writeln!(
                f,
                "Symbol: {:<30}, Type: {:<8}, Scope: {}",
                symbol.name(),
                symbol.data_type().to_string(),
                symbol.scope_id()
            )?;
        }

        Ok(())
    }
}

/// Is the content of the report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<'a> {
    /// The scanned tokens, sentinel included.
    pub tokens: &'a [Token],

    /// Every diagnostic reported while scanning and parsing.
    pub diagnostics: &'a [Diagnostic],

    /// The outcome of the analysis.
    pub verdict: Verdict,
}

impl<'a> Display for Report<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lexical Analysis Results:")?;
        write!(f, "{}", TokenListing(self.tokens))?;

        writeln!(f, "\nSyntactic and Semantic Analysis Results:")?;
        for diagnostic in self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }

        writeln!(f, "{}", self.verdict)
    }
}
