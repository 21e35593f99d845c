use std::sync::Arc;

use minipas_base::{
    diagnostic::{Dummy, Storage},
    source_file::{Location, SourceFile},
};
use proptest::{prop_assert_eq, proptest};

use super::{Scanner, MAX_LEXEME_LENGTH};
use crate::{
    error::Error,
    keyword_table::KeywordTable,
    token::{Token, TokenKind},
    token_sequence::TokenSequence,
};

fn scan(source: &str) -> (Vec<Token>, Vec<Error>) {
    let source_file = SourceFile::in_memory("test.pas", source);
    let storage: Storage<Error> = Storage::new();
    let tokens = Scanner::new(&source_file, KeywordTable::standard(), &storage).collect();

    (tokens, storage.into_vec())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).0.iter().map(Token::kind).collect()
}

#[test]
fn minimal_program() {
    let (tokens, errors) = scan("program p; var x : integer; begin end.");

    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(Token::kind).collect::<Vec<_>>(),
        [
            TokenKind::Program,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Begin,
            TokenKind::End,
            TokenKind::Dot,
            TokenKind::EndOfInput,
        ]
    );
    assert_eq!(tokens[1].lexeme(), "p");
    assert_eq!(tokens[4].lexeme(), "x");
    assert_eq!(tokens[11].lexeme(), "");
}

#[test]
fn tokens_start_at_their_first_character() {
    let (tokens, _) = scan("program p;\n  var\tcount : real;\n{ note\n  here } end.");
    let positions: Vec<_> = tokens
        .iter()
        .map(|token| (token.lexeme().to_owned(), token.line(), token.column()))
        .collect();

    assert_eq!(
        positions,
        [
            ("program".to_owned(), 1, 1),
            ("p".to_owned(), 1, 9),
            (";".to_owned(), 1, 10),
            ("var".to_owned(), 2, 3),
            ("count".to_owned(), 2, 7),
            (":".to_owned(), 2, 13),
            ("real".to_owned(), 2, 15),
            (";".to_owned(), 2, 19),
            ("end".to_owned(), 4, 10),
            (".".to_owned(), 4, 13),
            (String::new(), 4, 14),
        ]
    );
}

#[test]
fn two_character_operators() {
    assert_eq!(
        kinds(":= : <= <> < >= > ="),
        [
            TokenKind::Assign,
            TokenKind::Colon,
            TokenKind::LessEqual,
            TokenKind::NotEqual,
            TokenKind::Less,
            TokenKind::GreaterEqual,
            TokenKind::Greater,
            TokenKind::Equal,
            TokenKind::EndOfInput,
        ]
    );

    // no whitespace required between operators
    assert_eq!(
        kinds("a:=b<>c"),
        [
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::NotEqual,
            TokenKind::Identifier,
            TokenKind::EndOfInput,
        ]
    );
    assert_eq!(
        kinds(":<"),
        [TokenKind::Colon, TokenKind::Less, TokenKind::EndOfInput]
    );
}

#[test]
fn single_character_tokens() {
    assert_eq!(
        kinds("+-*/=;,.()"),
        [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::Equal,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::LeftParenthesis,
            TokenKind::RightParenthesis,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn words_resolve_through_the_keyword_table() {
    assert_eq!(
        kinds("while whilst true False _x1 Begin"),
        [
            TokenKind::While,
            TokenKind::Identifier,
            TokenKind::BooleanLiteral,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn custom_keyword_table() {
    let source_file = SourceFile::in_memory("test.pas", "begin start");
    let mut keywords = KeywordTable::new(KeywordTable::standard().capacity());
    keywords.insert("start", TokenKind::Begin);

    let kinds: Vec<_> = Scanner::new(&source_file, &keywords, &Dummy)
        .map(|token| token.kind())
        .collect();

    assert_eq!(
        kinds,
        [TokenKind::Identifier, TokenKind::Begin, TokenKind::EndOfInput]
    );
}

#[test]
fn numbers() {
    let (tokens, errors) = scan("42 3.14 1.2.3 7. 0.5x");
    let lexemes: Vec<_> = tokens
        .iter()
        .map(|token| (token.kind(), token.lexeme()))
        .collect();

    assert!(errors.is_empty());
    assert_eq!(
        lexemes,
        [
            (TokenKind::IntegerLiteral, "42"),
            (TokenKind::RealLiteral, "3.14"),
            (TokenKind::RealLiteral, "1.2"),
            (TokenKind::Dot, "."),
            (TokenKind::IntegerLiteral, "3"),
            (TokenKind::IntegerLiteral, "7"),
            (TokenKind::Dot, "."),
            (TokenKind::RealLiteral, "0.5"),
            (TokenKind::Identifier, "x"),
            (TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn string_literals_keep_their_quotes() {
    let (tokens, errors) = scan("write('hello, world') '' '{not a comment}'");

    assert!(errors.is_empty());
    assert_eq!(tokens[2].kind(), TokenKind::StringLiteral);
    assert_eq!(tokens[2].lexeme(), "'hello, world'");
    assert_eq!(tokens[4].lexeme(), "''");
    assert_eq!(tokens[5].lexeme(), "'{not a comment}'");
    assert_eq!(tokens[6].kind(), TokenKind::EndOfInput);
}

#[test]
fn unterminated_string_at_end_of_input() {
    let (tokens, errors) = scan("x := 'abc");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind(), TokenKind::LexicalError);
    assert_eq!(tokens[2].lexeme(), "'abc");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_unterminated_string().is_some());
}

#[test]
fn unterminated_string_at_end_of_line() {
    let (tokens, errors) = scan("'abc\n'");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::LexicalError);
    assert!(errors[0].as_unterminated_string().is_some());
}

#[test]
fn unterminated_comment() {
    let (tokens, errors) = scan("begin { unterminated\nend.");

    assert_eq!(
        tokens.iter().map(Token::kind).collect::<Vec<_>>(),
        [TokenKind::Begin, TokenKind::LexicalError]
    );
    assert_eq!(tokens[1].lexeme(), "{ unterminated\nend.");
    assert_eq!(tokens[1].location(), Location { line: 1, column: 7 });
    assert!(errors[0].as_unterminated_comment().is_some());
}

#[test]
fn consecutive_comments_are_skipped() {
    assert_eq!(
        kinds("{a}{b}\n{c\n}end"),
        [TokenKind::End, TokenKind::EndOfInput]
    );
}

#[test]
fn unrecognized_character() {
    let (tokens, errors) = scan("x # y");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind(), TokenKind::LexicalError);
    assert_eq!(tokens[1].lexeme(), "#");
    assert_eq!(
        errors[0]
            .as_unrecognized_character()
            .map(|error| error.character),
        Some('#')
    );
}

#[test]
fn overlong_lexemes_overflow_the_buffer() {
    let source_file = SourceFile::in_memory("test.pas", "abcd abcde 'abcd' 'abcde'");
    let scan_with_limit = |source_file: &Arc<SourceFile>| {
        let storage: Storage<Error> = Storage::new();
        let tokens: Vec<_> = Scanner::new(source_file, KeywordTable::standard(), &storage)
            .with_max_lexeme_length(4)
            .collect();
        (tokens, storage.into_vec())
    };

    let (tokens, errors) = scan_with_limit(&source_file);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind(), TokenKind::LexicalError);
    assert_eq!(tokens[1].lexeme(), "abcde");
    assert!(errors[0].as_lexeme_too_long().is_some());

    let source_file = SourceFile::in_memory("test.pas", "'abcd' 'abcde'");
    let (tokens, errors) = scan_with_limit(&source_file);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::StringLiteral);
    assert_eq!(tokens[1].kind(), TokenKind::LexicalError);
    assert_eq!(
        errors[0].as_string_too_long().map(|error| error.length),
        Some(5)
    );
}

#[test]
fn default_lexeme_limit() {
    let fits = "a".repeat(MAX_LEXEME_LENGTH);
    let overflows = "a".repeat(MAX_LEXEME_LENGTH + 1);

    assert_eq!(kinds(&fits), [TokenKind::Identifier, TokenKind::EndOfInput]);
    assert_eq!(kinds(&overflows), [TokenKind::LexicalError]);
}

#[test]
fn empty_and_blank_sources() {
    for source in ["", "   \n\t\r\n", "{only a comment}"] {
        let (tokens, errors) = scan(source);

        assert_eq!(tokens.len(), 1, "{source:?}");
        assert_eq!(tokens[0].kind(), TokenKind::EndOfInput);
        assert!(errors.is_empty());
    }
}

#[test]
fn pulling_past_the_sentinel() {
    let source_file = SourceFile::in_memory("test.pas", "x");
    let mut scanner = Scanner::new(&source_file, KeywordTable::standard(), &Dummy);

    assert_eq!(scanner.next_token().kind(), TokenKind::Identifier);
    assert!(!scanner.is_finished());
    assert_eq!(scanner.next_token().kind(), TokenKind::EndOfInput);
    assert!(scanner.is_finished());
    assert_eq!(scanner.next_token().kind(), TokenKind::EndOfInput);
    assert_eq!(scanner.next(), None);
}

#[test]
fn lexical_errors_render_the_source() {
    let (_, errors) = scan("var\n  x := 'abc");
    let rendered = errors[0].to_string();

    assert!(rendered.contains("unterminated string literal"));
    assert!(rendered.contains("test.pas:2:8"));
}

proptest! {
    #[test]
    fn pull_and_push_scans_agree(source in "[a-z0-9 :=<>;.'{}\n]{0,64}") {
        let source_file = SourceFile::in_memory("test.pas", source);
        let mut scanner = Scanner::new(&source_file, KeywordTable::standard(), &Dummy);

        let mut pulled = Vec::new();
        loop {
            let token = scanner.next_token();
            let done = token.kind().is_sentinel();
            pulled.push(token);

            if done {
                break;
            }
        }

        let pushed = TokenSequence::tokenize(&source_file, KeywordTable::standard(), &Dummy);

        prop_assert_eq!(pulled.as_slice(), pushed.as_slice());
        prop_assert_eq!(
            pulled.iter().filter(|token| token.kind().is_sentinel()).count(),
            1
        );
    }
}
