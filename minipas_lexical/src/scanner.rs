//! Contains the [`Scanner`], which turns the characters of a [`SourceFile`] into [`Token`]s one at
//! a time.

use std::{fmt::Debug, sync::Arc};

use minipas_base::{
    diagnostic::Handler,
    source_file::{ByteIndex, Cursor, Location, SourceFile, Span},
};

use crate::{
    error::{
        self, LexemeTooLong, StringTooLong, UnrecognizedCharacter, UnterminatedComment,
        UnterminatedString,
    },
    keyword_table::KeywordTable,
    token::{Token, TokenKind},
};

/// The default number of characters the scanner buffers for a single lexeme.
pub const MAX_LEXEME_LENGTH: usize = 255;

/// Is a pull-based scanner producing one [`Token`] per call.
///
/// The scan ends with exactly one sentinel token: [`TokenKind::EndOfInput`] when the input is
/// exhausted, or [`TokenKind::LexicalError`] when the input cannot be tokenized any further. In
/// the latter case the matching [`error::Error`] is reported to the handler.
///
/// As an [`Iterator`], the scanner yields every token up to and including the sentinel and then
/// stops.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    keywords: &'a KeywordTable,
    handler: &'a dyn Handler<error::Error>,
    max_lexeme_length: usize,
    finished: bool,
}

impl<'a> Debug for Scanner<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("cursor", &self.cursor)
            .field("max_lexeme_length", &self.max_lexeme_length)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the first character of the source file.
    #[must_use]
    pub fn new(
        source_file: &'a Arc<SourceFile>,
        keywords: &'a KeywordTable,
        handler: &'a dyn Handler<error::Error>,
    ) -> Self {
        Self {
            cursor: source_file.cursor(),
            keywords,
            handler,
            max_lexeme_length: MAX_LEXEME_LENGTH,
            finished: false,
        }
    }

    /// Sets the number of characters an identifier, a number or the content of a string literal
    /// may have before the scan fails.
    #[must_use]
    pub fn with_max_lexeme_length(mut self, max_lexeme_length: usize) -> Self {
        self.max_lexeme_length = max_lexeme_length;
        self
    }

    /// Returns `true` once the sentinel token has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool { self.finished }

    /// Gets the location of the next unconsumed character.
    #[must_use]
    pub fn location(&self) -> Location { self.cursor.location() }

    /// Scans the next token.
    ///
    /// After the sentinel has been produced, every further call returns another
    /// [`TokenKind::EndOfInput`] token at the position the scan stopped.
    pub fn next_token(&mut self) -> Token {
        if self.finished {
            let location = self.cursor.location();
            return Token::new(TokenKind::EndOfInput, "", self.span(location, location));
        }

        if let Err(token) = self.skip_trivia() {
            return token;
        }

        let start = self.cursor.location();
        let start_index = self.cursor.byte_index();

        let Some(character) = self.cursor.next() else {
            self.finished = true;
            log::debug!(
                "reached the end of `{}`",
                self.cursor.source_file().name().display()
            );
            return Token::new(TokenKind::EndOfInput, "", self.span(start, start));
        };

        let kind = match character {
            character if character.is_ascii_alphabetic() || character == '_' => {
                return self.scan_word(start, start_index);
            }
            character if character.is_ascii_digit() => {
                return self.scan_number(start, start_index);
            }
            '\'' => return self.scan_string(start, start_index),

            ':' => self.follow('=', TokenKind::Assign, TokenKind::Colon),
            '>' => self.follow('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => match self.cursor.peek() {
                Some('=') => {
                    self.cursor.next();
                    TokenKind::LessEqual
                }
                Some('>') => {
                    self.cursor.next();
                    TokenKind::NotEqual
                }
                _ => TokenKind::Less,
            },

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '=' => TokenKind::Equal,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,

            character => {
                let span = self.span(start, self.cursor.location());
                return self.fail(
                    UnrecognizedCharacter {
                        span: span.clone(),
                        character,
                    },
                    start_index,
                    span,
                );
            }
        };

        self.token(kind, start, start_index)
    }

    /// Skips whitespace and `{ ... }` comments until the next token starts.
    fn skip_trivia(&mut self) -> Result<(), Token> {
        loop {
            self.cursor.eat_while(char::is_whitespace);

            if self.cursor.peek() != Some('{') {
                return Ok(());
            }

            let start = self.cursor.location();
            let start_index = self.cursor.byte_index();

            self.cursor.eat_while(|character| character != '}');

            // consumes the closing brace
            if self.cursor.next().is_none() {
                let span = self.span(start, self.cursor.location());
                return Err(self.fail(
                    UnterminatedComment { span: span.clone() },
                    start_index,
                    span,
                ));
            }
        }
    }

    fn scan_word(&mut self, start: Location, start_index: ByteIndex) -> Token {
        self.cursor
            .eat_while(|character| character.is_ascii_alphanumeric() || character == '_');

        if let Some(token) = self.check_length(start, start_index) {
            return token;
        }

        let kind = self.keywords.lookup(self.cursor.slice_from(start_index));
        self.token(kind, start, start_index)
    }

    fn scan_number(&mut self, start: Location, start_index: ByteIndex) -> Token {
        self.cursor.eat_while(|character| character.is_ascii_digit());

        let kind = if self.cursor.peek() == Some('.')
            && self
                .cursor
                .peek_second()
                .is_some_and(|character| character.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.eat_while(|character| character.is_ascii_digit());
            TokenKind::RealLiteral
        } else {
            TokenKind::IntegerLiteral
        };

        if let Some(token) = self.check_length(start, start_index) {
            return token;
        }

        self.token(kind, start, start_index)
    }

    fn scan_string(&mut self, start: Location, start_index: ByteIndex) -> Token {
        let mut length = 0;

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let span = self.span(start, self.cursor.location());
                    return self.fail(UnterminatedString { span: span.clone() }, start_index, span);
                }
                Some('\'') => {
                    self.cursor.next();
                    break;
                }
                Some(_) => {
                    self.cursor.next();
                    length += 1;
                }
            }
        }

        if length > self.max_lexeme_length {
            let span = self.span(start, self.cursor.location());
            return self.fail(
                StringTooLong {
                    span: span.clone(),
                    length,
                    maximum: self.max_lexeme_length,
                },
                start_index,
                span,
            );
        }

        self.token(TokenKind::StringLiteral, start, start_index)
    }

    /// Fails the scan if the lexeme read since `start_index` overflows the token buffer.
    fn check_length(&mut self, start: Location, start_index: ByteIndex) -> Option<Token> {
        let length = self.cursor.slice_from(start_index).chars().count();

        (length > self.max_lexeme_length).then(|| {
            let span = self.span(start, self.cursor.location());
            self.fail(
                LexemeTooLong {
                    span: span.clone(),
                    maximum: self.max_lexeme_length,
                },
                start_index,
                span,
            )
        })
    }

    /// Consumes `expected` if it is the next character.
    fn follow(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.cursor.peek() == Some(expected) {
            self.cursor.next();
            matched
        } else {
            otherwise
        }
    }

    fn fail(
        &mut self,
        error: impl Into<error::Error>,
        start_index: ByteIndex,
        span: Span,
    ) -> Token {
        let error = error.into();
        log::debug!("lexical error at {}: {error:?}", span.start());

        self.handler.receive(error);
        self.finished = true;

        Token::new(
            TokenKind::LexicalError,
            self.cursor.slice_from(start_index),
            span,
        )
    }

    fn token(&self, kind: TokenKind, start: Location, start_index: ByteIndex) -> Token {
        let token = Token::new(
            kind,
            self.cursor.slice_from(start_index),
            self.span(start, self.cursor.location()),
        );

        log::trace!("scanned {:?} `{}` at {}", kind, token.lexeme(), start);
        token
    }

    fn span(&self, start: Location, end: Location) -> Span {
        Span::new(Arc::clone(self.cursor.source_file()), start, end)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            None
        } else {
            Some(self.next_token())
        }
    }
}

#[cfg(test)]
mod tests;
