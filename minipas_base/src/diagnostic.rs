//! A module for routing diagnostics from the analysis phases to whoever consumes them.
//!
//! The phases never return their diagnostics; they push them into a [`Handler`] and keep going.

use std::{
    cell::{Cell, RefCell},
    fmt::Debug,
};

/// Represents a trait responsible for handling diagnostics produced by an analysis phase.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a [`Handler`] that keeps every received diagnostic, in arrival order.
#[derive(Debug)]
pub struct Storage<T> {
    diagnostics: RefCell<Vec<T>>,
}

impl<T> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Returns the number of diagnostics received so far.
    #[must_use]
    pub fn len(&self) -> usize { self.diagnostics.borrow().len() }

    /// Returns `true` if no diagnostic has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.diagnostics.borrow().is_empty() }

    /// Consumes the [`Storage`] and returns the received diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }
}

impl<T: Clone> Storage<T> {
    /// Returns a copy of the received diagnostics.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> { self.diagnostics.borrow().clone() }
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T, U: Into<T>> Handler<U> for Storage<T> {
    fn receive(&self, diagnostic: U) { self.diagnostics.borrow_mut().push(diagnostic.into()); }
}

/// Is a [`Handler`] that discards everything it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}
}

/// Is a [`Handler`] that only counts the diagnostics it receives.
#[derive(Debug, Default)]
pub struct Counter {
    count: Cell<usize>,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.count.get() }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.count.set(0); }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) { self.count.set(self.count.get() + 1); }
}

/// Is a [`Handler`] forwarding every diagnostic to two other handlers.
pub struct Tee<'a, T> {
    first: &'a dyn Handler<T>,
    second: &'a dyn Handler<T>,
}

impl<'a, T> Tee<'a, T> {
    /// Creates a [`Tee`] forwarding to `first`, then to `second`.
    #[must_use]
    pub fn new(first: &'a dyn Handler<T>, second: &'a dyn Handler<T>) -> Self {
        Self { first, second }
    }
}

impl<'a, T> Debug for Tee<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tee").finish_non_exhaustive()
    }
}

impl<'a, T: Clone> Handler<T> for Tee<'a, T> {
    fn receive(&self, diagnostic: T) {
        self.first.receive(diagnostic.clone());
        self.second.receive(diagnostic);
    }
}
