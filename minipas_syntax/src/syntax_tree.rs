//! Contains the syntax trees of the declaration part of a program and their parsing logic.

pub mod declaration;
pub mod program;

#[cfg(test)]
mod tests;
