//! ANSI escape sequences used to decorate console output.

use std::fmt::Display;

/// A single text decoration: either a font style or a foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Style {
    /// Wraps the given displayable value so that it is printed with this decoration.
    pub fn with<T>(self, display: T) -> Styled<T> { Styled { style: self, display } }

    fn escape_code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
            Self::Red => "\x1B[31m",
            Self::Green => "\x1B[32m",
            Self::Yellow => "\x1B[33m",
            Self::Blue => "\x1B[34m",
            Self::Cyan => "\x1B[36m",
        }
    }
}

/// A value decorated with a [`Style`]. Decorations nest by wrapping a [`Styled`] in another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Styled<T> {
    /// The decoration applied.
    pub style: Style,

    /// The decorated value.
    pub display: T,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.style.escape_code(), self.display)
    }
}
