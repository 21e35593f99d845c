//! This crate drives the front end: it loads a source file, scans it, parses its declaration
//! part and reports the outcome on the console and, optionally, in a report file.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

use std::{cell::Cell, fmt::Display, num::NonZeroUsize, path::PathBuf, process::ExitCode};

pub use clap::Parser;
use minipas_base::{
    diagnostic::{Handler, Storage, Tee},
    log::{Message, Severity},
    source_file::{self, SourceFile},
};
use minipas_lexical::{
    keyword_table::{KeywordTable, DEFAULT_CAPACITY},
    scanner::{Scanner, MAX_LEXEME_LENGTH},
    token_sequence::TokenSequence,
};
use report::{Diagnostic, Report, SymbolListing, TokenListing, Verdict};

pub mod report;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "minipas",
    about = "Scanner and declaration checker for a small Pascal-like language."
)]
pub struct Argument {
    /// The source file to analyze.
    pub file: PathBuf,

    /// Prints out the scanned tokens.
    #[clap(long = "dump-tokens")]
    pub dump_tokens: bool,

    /// Prints out the declared variables.
    #[clap(long = "dump-symbols")]
    pub dump_symbols: bool,

    /// Writes the token listing and the analysis results to the given file.
    #[clap(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// The number of characters a single lexeme may have.
    #[clap(long = "max-lexeme-length", default_value_t = MAX_LEXEME_LENGTH)]
    pub max_lexeme_length: usize,

    /// The number of slots of the keyword table.
    #[clap(long = "keyword-capacity", default_value_t = DEFAULT_CAPACITY)]
    pub keyword_capacity: NonZeroUsize,
}

/// Is an enumeration of the failures that stop the driver before any analysis result exists.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Source {
        path: PathBuf,
        source: source_file::Error,
    },

    #[error("failed to write the report to {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A struct that implements [`Handler`] but prints all the message to the standard error stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Printer {
    printed: Cell<bool>,
}

impl Printer {
    /// Creates a new [`Printer`].
    fn new() -> Self {
        Self {
            printed: Cell::new(false),
        }
    }

    fn has_printed(&self) -> bool { self.printed.get() }
}

impl<E: Display> Handler<E> for Printer {
    fn receive(&self, error: E) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

/// Runs the program with the given arguments.
pub fn run(argument: &Argument) -> ExitCode {
    match analyze(argument) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", Message::new(Severity::Error, error));
            ExitCode::FAILURE
        }
    }
}

/// Analyzes the file named by the arguments and returns `true` if it passed.
///
/// Diagnostics are printed to the standard error stream as they are found; the listings
/// requested by the arguments go to the standard output stream.
///
/// # Errors
/// - [`Error::Source`] if the source file cannot be loaded.
/// - [`Error::Report`] if the report file cannot be written.
pub fn analyze(argument: &Argument) -> Result<bool, Error> {
    let source_file = SourceFile::open(&argument.file).map_err(|source| Error::Source {
        path: argument.file.clone(),
        source,
    })?;

    let owned_keywords;
    let keywords = if argument.keyword_capacity == DEFAULT_CAPACITY {
        KeywordTable::standard()
    } else {
        owned_keywords = KeywordTable::with_reserved_words(argument.keyword_capacity);
        &owned_keywords
    };

    let printer = Printer::new();
    let storage: Storage<Diagnostic> = Storage::new();

    // token sequence
    let lexical_handler: Tee<minipas_lexical::error::Error> = Tee::new(&printer, &storage);
    let token_sequence = TokenSequence::from_scanner(
        Scanner::new(&source_file, keywords, &lexical_handler)
            .with_max_lexeme_length(argument.max_lexeme_length),
    );

    if argument.dump_tokens {
        print!("{}", TokenListing(&token_sequence));
    }

    // parser
    let syntax_handler: Tee<minipas_syntax::error::Error> = Tee::new(&printer, &storage);
    let mut parser = minipas_syntax::parser::Parser::new(&token_sequence);
    let program = parser.parse_program(&syntax_handler);

    if argument.dump_symbols {
        print!("{}", SymbolListing(parser.symbol_table()));
    }

    let verdict = Verdict::new(program.is_some(), parser.error_count());
    let diagnostics = storage.into_vec();

    log::debug!(
        "{} diagnostics, lexical error: {}",
        diagnostics.len(),
        token_sequence.is_terminated_by_error()
    );

    if let Some(path) = &argument.report {
        let report = Report {
            tokens: &token_sequence,
            diagnostics: &diagnostics,
            verdict,
        };

        std::fs::write(path, report.to_string()).map_err(|source| Error::Report {
            path: path.clone(),
            source,
        })?;
    }

    // every lexical, syntax and semantic error goes through the printer
    let passed = verdict.is_success() && !printer.has_printed();
    let severity = if passed {
        Severity::Info
    } else {
        Severity::Error
    };
    eprintln!("{}", Message::new(severity, verdict));

    Ok(passed)
}
