//! This crate holds the semantic model of a program: the declared variables, their types and the
//! scopes they were declared in.
//!
//! The [`symbol_table::SymbolTable`] is filled by the parser while it walks the declaration part
//! of a program.

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

pub mod error;
pub mod symbol_table;
