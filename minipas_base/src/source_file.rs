//! Contains the code related to the source code input.
//!
//! A [`SourceFile`] owns the text being analysed, whether it came from an in-memory buffer, a
//! stream or a memory-mapped file. The scanner walks it through a [`Cursor`], which tracks the
//! 1-based line/column [`Location`] of every character it hands out.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    fs::File,
    io::Read,
    ops::Range,
    path::{Path, PathBuf},
    str::Chars,
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
}

#[self_referencing]
struct MappedSource {
    mapped: Option<memmap::Mmap>,

    #[borrows(mapped)]
    text: &'this str,
}

impl MappedSource {
    fn create(file: &File) -> Result<Self, Error> {
        // zero-length files cannot be mapped
        let mapped = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().map(file)? })
        };

        MappedSourceTryBuilder {
            mapped,
            text_builder: |mapped| {
                mapped.as_ref().map_or(Ok(""), |mapped| {
                    std::str::from_utf8(mapped).map_err(Error::from)
                })
            },
        }
        .try_build()
    }
}

enum Text {
    Mapped(MappedSource),
    Owned(String),
}

impl Text {
    fn as_str(&self) -> &str {
        match self {
            Self::Mapped(mapped) => mapped.borrow_text(),
            Self::Owned(owned) => owned.as_str(),
        }
    }
}

/// Represents a source code input for the front end.
#[derive(Getters)]
pub struct SourceFile {
    text: Text,

    /// Gets the name of the source, the file path for file-backed sources.
    #[get = "pub"]
    name: PathBuf,

    /// Byte ranges of every line, without the terminating `\n`.
    lines: Vec<Range<usize>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl SourceFile {
    fn new(name: PathBuf, text: Text) -> Arc<Self> {
        let lines = line_ranges(text.as_str());
        Arc::new(Self { text, name, lines })
    }

    /// Creates a source file from an in-memory buffer.
    #[must_use]
    pub fn in_memory(name: impl Into<PathBuf>, text: impl Into<String>) -> Arc<Self> {
        Self::new(name.into(), Text::Owned(text.into()))
    }

    /// Creates a source file by draining the given stream.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when reading from the stream.
    /// - [`Error::Utf8Error`]: The stream content is not valid UTF-8.
    pub fn read(mut reader: impl Read, name: impl Into<PathBuf>) -> Result<Arc<Self>, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let text = String::from_utf8(bytes).map_err(|error| error.utf8_error())?;
        Ok(Self::new(name.into(), Text::Owned(text)))
    }

    /// Opens the file at the given path and maps it into memory.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when opening the file or mapping it to memory.
    /// - [`Error::Utf8Error`]: The file content is not valid UTF-8.
    pub fn open(path: impl AsRef<Path>) -> Result<Arc<Self>, Error> {
        let file = File::open(path.as_ref())?;
        let mapped = MappedSource::create(&file)?;

        Ok(Self::new(path.as_ref().to_owned(), Text::Mapped(mapped)))
    }

    /// Creates a temporary file, writes the given displayable object to it and maps it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("minipas")
            .suffix(".pas")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        tempfile.as_file_mut().flush()?;

        let name = tempfile.path().to_owned();
        let mapped = MappedSource::create(tempfile.as_file())?;

        Ok(Self::new(name, Text::Mapped(mapped)))
    }

    /// Gets the whole text of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.text.as_str() }

    /// Gets the line at the given line number (starting at 1), without its line terminator.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        let range = self.lines.get(line.checked_sub(1)?)?.clone();
        let line = &self.content()[range];

        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Gets a [`Cursor`] positioned at the first character of the source file.
    #[must_use]
    pub fn cursor<'a>(self: &'a Arc<Self>) -> Cursor<'a> {
        Cursor {
            source_file: self,
            chars: self.content().chars(),
            byte_index: 0,
            location: Location::START,
        }
    }
}

fn line_ranges(text: &str) -> Vec<Range<usize>> {
    let mut line_start = 0;
    let mut ranges: Vec<Range<usize>> = text
        .match_indices('\n')
        .map(|(index, _)| {
            let range = line_start..index;
            line_start = index + 1;
            range
        })
        .collect();

    ranges.push(line_start..text.len());
    ranges
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

impl Location {
    /// The location of the first character of any source.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a range of characters in a source file.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,

    /// Gets the location of the first character of the span.
    #[get_copy = "pub"]
    start: Location,

    /// Gets the location right after the last character of the span.
    #[get_copy = "pub"]
    end: Location,
}

impl Span {
    /// Creates a span covering `start` up to, but not including, `end`.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: Location, end: Location) -> Self {
        Self {
            source_file,
            start,
            end: end.max(start),
        }
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Span({}, {}..{})",
            self.source_file.name.display(),
            self.start,
            self.end
        )
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_ptr_value = Arc::as_ptr(&self.source_file) as usize;
        let other_ptr_value = Arc::as_ptr(&other.source_file) as usize;

        self_ptr_value
            .cmp(&other_ptr_value)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.source_file).hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the span location of the element.
    fn span(&self) -> Span;
}

impl<T: SourceElement> SourceElement for Box<T> {
    fn span(&self) -> Span { self.as_ref().span() }
}

/// Is a character cursor over a [`SourceFile`] with two characters of lookahead.
///
/// Every character handed out by [`Iterator::next`] moves the [`Location`] one column to the
/// right, except `\n` which moves it to the first column of the next line.
#[derive(Debug, Clone, CopyGetters)]
pub struct Cursor<'a> {
    /// Gets the source file that the cursor walks over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,

    chars: Chars<'a>,

    /// Gets the byte index of the next character.
    #[get_copy = "pub"]
    byte_index: ByteIndex,

    /// Gets the location of the next character.
    #[get_copy = "pub"]
    location: Location,
}

impl<'a> Cursor<'a> {
    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> { self.chars.clone().next() }

    /// Returns the character after the next one without consuming anything.
    #[must_use]
    pub fn peek_second(&self) -> Option<char> { self.chars.clone().nth(1) }

    /// Returns the text consumed since the given byte index.
    #[must_use]
    pub fn slice_from(&self, start: ByteIndex) -> &'a str {
        let source_file: &'a Arc<SourceFile> = self.source_file;
        &source_file.content()[start..self.byte_index]
    }

    /// Consumes characters while the predicate holds.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.next();
        }
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let character = self.chars.next()?;
        self.byte_index += character.len_utf8();

        if character == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }

        Some(character)
    }
}
