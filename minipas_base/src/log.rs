//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::Style;

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

impl Severity {
    fn header(self) -> impl Display {
        Style::Bold.with(match self {
            Self::Error => Style::Red.with("[error]:"),
            Self::Info => Style::Green.with("[info]:"),
            Self::Warning => Style::Yellow.with("[warning]:"),
        })
    }
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.severity.header(),
            Style::Bold.with(&self.display)
        )
    }
}

fn digit_count(number: usize) -> usize { number.to_string().len() }

/// Structure implementing [`Display`] that prints the source line a [`Span`] starts on, with the
/// spanned characters marked underneath.
///
/// Columns count every character as one, tabs included, so tabs are printed as a single space to
/// keep the marker aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message printed next to the marker.
    pub help_display: Option<T>,
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self.span.start();
        let end = self.span.end();
        let gutter = digit_count(start.line);
        let pipe = Style::Bold.with(Style::Cyan.with("|"));

        writeln!(
            f,
            "{:gutter$}{} {}:{}:{}",
            "",
            Style::Bold.with(Style::Cyan.with("-->")),
            self.span.source_file().name().display(),
            start.line,
            start.column
        )?;
        writeln!(f, "{:gutter$} {pipe}", "")?;

        let line: String = self
            .span
            .source_file()
            .get_line(start.line)
            .unwrap_or_default()
            .chars()
            .map(|character| if character == '\t' { ' ' } else { character })
            .collect();

        writeln!(
            f,
            "{} {pipe} {line}",
            Style::Bold.with(Style::Cyan.with(format_args!("{:>gutter$}", start.line)))
        )?;

        let line_width = line.chars().count();
        let marker_width = if end.line == start.line {
            end.column.saturating_sub(start.column)
        } else {
            // only the first line is printed, mark up to its end
            (line_width + 1).saturating_sub(start.column)
        }
        .max(1);

        write!(
            f,
            "{:gutter$} {pipe} {:indent$}{}",
            "",
            "",
            Style::Bold.with(Style::Red.with("^".repeat(marker_width))),
            indent = start.column.saturating_sub(1)
        )?;

        if let Some(help) = &self.help_display {
            write!(f, " {}: {help}", Style::Bold.with("help"))?;
        }
        writeln!(f)?;

        if end.line > start.line {
            writeln!(
                f,
                "{:gutter$} {} continues until line {}",
                "",
                Style::Bold.with(Style::Cyan.with("=")),
                end.line
            )?;
        }

        Ok(())
    }
}
