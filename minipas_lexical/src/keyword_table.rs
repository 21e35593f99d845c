//! Contains the [`KeywordTable`], the hash dictionary the scanner consults to tell reserved words
//! apart from identifiers.
//!
//! The table has a fixed number of slots. A key's slot is the sum of its bytes modulo the
//! capacity, so anagrams such as `do`/`od` always collide. Each slot stores at most one entry
//! directly; every further entry hashing to the slot is appended to the slot's overflow chain.

use std::num::NonZeroUsize;

use getset::CopyGetters;
use lazy_static::lazy_static;

use crate::token::TokenKind;

/// The number of slots of the standard keyword table.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(50_000) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Computes the slot of `key` in a table with the given capacity.
#[must_use]
pub fn hash(key: &str, capacity: NonZeroUsize) -> usize {
    key.bytes()
        .fold(0_usize, |sum, byte| sum.wrapping_add(usize::from(byte)))
        % capacity.get()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChainNode {
    entry: Entry,
    next: Option<Box<ChainNode>>,
}

/// Is a fixed-capacity hash dictionary from reserved words to their [`TokenKind`].
///
/// Invariant: a slot with an empty direct entry has an empty overflow chain.
#[derive(Debug, Clone, CopyGetters)]
pub struct KeywordTable {
    /// Gets the number of slots of the table.
    #[get_copy = "pub"]
    capacity: NonZeroUsize,

    slots: Vec<Option<Entry>>,
    chains: Vec<Option<Box<ChainNode>>>,

    /// Gets the number of entries stored, chained entries included.
    #[get_copy = "pub"]
    len: usize,
}

lazy_static! {
    static ref STANDARD: KeywordTable = KeywordTable::with_reserved_words(DEFAULT_CAPACITY);
}

impl KeywordTable {
    /// Creates an empty table with the given number of slots.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            slots: vec![None; capacity.get()],
            chains: vec![None; capacity.get()],
            len: 0,
        }
    }

    /// Creates a table with the given number of slots holding every word of
    /// [`TokenKind::reserved_words`].
    #[must_use]
    pub fn with_reserved_words(capacity: NonZeroUsize) -> Self {
        let mut table = Self::new(capacity);

        for (word, kind) in TokenKind::reserved_words() {
            table.insert(word, kind);
        }

        table
    }

    /// Gets the shared, immutable table holding the reserved words of the language.
    #[must_use]
    pub fn standard() -> &'static Self { &STANDARD }

    /// Returns `true` if the table holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    fn slot_of(&self, key: &str) -> usize { hash(key, self.capacity()) }

    /// Registers `key` as a word of the given kind.
    ///
    /// If the slot's direct entry already has this key only that entry is overwritten; a key is
    /// otherwise appended to the overflow chain without checking the chain for an older copy, so
    /// a key must be inserted at most once. When the table is full the insertion is dropped and a
    /// warning is logged.
    pub fn insert(&mut self, key: &str, kind: TokenKind) {
        let index = self.slot_of(key);

        if let Some(entry) = &mut self.slots[index] {
            if entry.key == key {
                entry.kind = kind;
                return;
            }
        }

        if self.len >= self.slots.len() {
            log::warn!(
                "keyword table is full ({} entries), `{key}` was not inserted",
                self.len
            );
            return;
        }

        let entry = Entry {
            key: key.to_owned(),
            kind,
        };

        let slot = &mut self.slots[index];
        if slot.is_none() {
            *slot = Some(entry);
        } else {
            let mut link = &mut self.chains[index];
            while let Some(node) = link {
                link = &mut node.next;
            }

            *link = Some(Box::new(ChainNode { entry, next: None }));
            log::trace!("`{key}` chained in keyword table slot {index}");
        }

        self.len += 1;
    }

    /// Gets the kind registered for `key`, if any.
    ///
    /// The slot's direct entry is checked first, then its overflow chain in insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<TokenKind> {
        let index = self.slot_of(key);

        let direct = self.slots[index].as_ref()?;
        if direct.key == key {
            return Some(direct.kind);
        }

        let mut link = self.chains[index].as_deref();
        while let Some(node) = link {
            if node.entry.key == key {
                return Some(node.entry.kind);
            }

            link = node.next.as_deref();
        }

        None
    }

    /// Classifies an identifier-shaped lexeme: its registered kind, or
    /// [`TokenKind::Identifier`] when it is not a reserved word.
    #[must_use]
    pub fn lookup(&self, key: &str) -> TokenKind { self.get(key).unwrap_or(TokenKind::Identifier) }

    /// Returns `true` if `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool { self.get(key).is_some() }

    /// Removes `key` from the table and returns the kind it was registered with.
    ///
    /// Removing a direct entry promotes the head of the slot's overflow chain into the slot.
    pub fn remove(&mut self, key: &str) -> Option<TokenKind> {
        let index = self.slot_of(key);

        let direct = self.slots[index].as_ref()?;
        let removed = if direct.key == key {
            let promoted = self.chains[index].take().map(|head| {
                self.chains[index] = head.next;
                head.entry
            });

            std::mem::replace(&mut self.slots[index], promoted).map(|entry| entry.kind)
        } else {
            Self::unlink(&mut self.chains[index], key)
        };

        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }

    fn unlink(mut link: &mut Option<Box<ChainNode>>, key: &str) -> Option<TokenKind> {
        while link.as_ref().is_some_and(|node| node.entry.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let node = link.take()?;
        *link = node.next;

        Some(node.entry.kind)
    }
}

impl Drop for KeywordTable {
    fn drop(&mut self) {
        // unlink chains iteratively, a recursive drop of a long chain can exhaust the stack
        for chain in &mut self.chains {
            let mut link = chain.take();
            while let Some(mut node) = link {
                link = node.next.take();
            }
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self { Self::with_reserved_words(DEFAULT_CAPACITY) }
}
