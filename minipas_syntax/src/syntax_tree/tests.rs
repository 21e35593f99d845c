use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::{Display, Write},
};

use minipas_base::{
    diagnostic::{Dummy, Storage},
    source_file::SourceFile,
};
use minipas_lexical::{keyword_table::KeywordTable, token_sequence::TokenSequence};
use minipas_semantic::symbol_table::{DataType, SymbolTable};
use minipas_test::input::Input;
use proptest::{
    collection::vec,
    prelude::Arbitrary,
    prop_assert, prop_assert_eq, proptest,
    strategy::{BoxedStrategy, Strategy},
    test_runner::TestCaseResult,
};

use super::{declaration::VariableDeclaration, program::Program};
use crate::{error::Error, parser::Parser};

struct Parsed {
    program: Option<Program>,
    symbol_table: SymbolTable,
    error_count: usize,
    errors: Vec<Error>,
}

fn parse(source: &str) -> Parsed {
    let source_file = SourceFile::in_memory("test.pas", source);
    let token_sequence = TokenSequence::tokenize(&source_file, KeywordTable::standard(), &Dummy);
    let storage: Storage<Error> = Storage::new();

    let mut parser = Parser::new(&token_sequence);
    let program = parser.parse_program(&storage);
    let (symbol_table, error_count) = parser.dissolve();

    Parsed {
        program,
        symbol_table,
        error_count,
        errors: storage.into_vec(),
    }
}

fn identifier() -> BoxedStrategy<String> {
    "[a-z][a-z0-9_]{0,7}"
        .prop_filter("filter out reserved words", |name| {
            !KeywordTable::standard().contains(name)
        })
        .boxed()
}

/// Represents an input for a [`super::declaration::VariableDeclaration`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Declaration {
    name: String,
    data_type: DataType,
}

impl Arbitrary for Declaration {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            identifier(),
            proptest::sample::select(vec![DataType::Integer, DataType::Real, DataType::Boolean]),
        )
            .prop_map(|(name, data_type)| Self { name, data_type })
            .boxed()
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.name, self.data_type)
    }
}

impl Input<&VariableDeclaration> for &Declaration {
    fn assert(self, output: &VariableDeclaration) -> TestCaseResult {
        prop_assert_eq!(self.name.as_str(), output.name());
        prop_assert_eq!(self.data_type, output.data_type());
        prop_assert_eq!(self.data_type.to_string(), output.type_keyword().lexeme());
        Ok(())
    }
}

#[test]
fn minimal_program() {
    let Parsed {
        program,
        symbol_table,
        error_count,
        errors,
    } = parse("program p; var x : integer; begin end.");

    assert!(errors.is_empty());
    assert_eq!(error_count, 0);

    let (name, declarations) = program.map(Program::dissolve).unwrap_or_default();
    assert_eq!(name.as_ref().map(|name| name.lexeme()), Some("p"));
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].name(), "x");
    assert_eq!(
        symbol_table.lookup("x").map(|symbol| symbol.data_type()),
        Some(DataType::Integer)
    );
}

#[test]
fn program_without_var_block() {
    let Parsed {
        program,
        symbol_table,
        error_count,
        ..
    } = parse("program p;\nbegin\n  write('hi')\nend.");

    assert!(program.is_some_and(|program| program.declarations().is_empty()));
    assert_eq!(error_count, 0);
    assert!(symbol_table.is_empty());
}

#[test]
fn last_declaration_may_omit_its_semicolon() {
    let Parsed {
        program,
        error_count,
        ..
    } = parse("program p; var a : real; b : boolean begin end.");

    assert_eq!(program.map(|program| program.declarations().len()), Some(2));
    assert_eq!(error_count, 0);
}

#[test]
fn invalid_type_aborts_once() {
    let Parsed {
        program,
        symbol_table,
        error_count,
        errors,
    } = parse("program p; var x : nosuchtype; begin end.");

    assert!(program.is_none());
    assert_eq!(error_count, 1);
    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .as_semantic()
        .and_then(|error| error.as_invalid_variable_type())
        .is_some());
    assert!(symbol_table.is_empty());
}

#[test]
fn missing_colon_aborts() {
    let Parsed {
        program,
        error_count,
        errors,
        ..
    } = parse("program p; var x integer; begin end.");

    assert!(program.is_none());
    assert_eq!(error_count, 1);
    assert!(errors[0].as_unexpected_syntax().is_some());
}

#[test]
fn missing_separator_aborts() {
    let Parsed {
        program,
        symbol_table,
        error_count,
        errors,
    } = parse("program p; var x : integer y : real; begin end.");

    assert!(program.is_none());
    assert_eq!(error_count, 1);
    assert_eq!(
        errors[0]
            .as_unexpected_syntax()
            .map(|error| error.found.lexeme().to_owned()),
        Some("y".to_owned())
    );
    // the declarations before the failure are kept
    assert_eq!(symbol_table.len(), 1);
}

#[test]
fn redeclaration_is_counted_and_parsing_continues() {
    let Parsed {
        program,
        symbol_table,
        error_count,
        errors,
    } = parse("program p; var x : integer; x : real; y : boolean; begin end.");

    assert_eq!(program.map(|program| program.declarations().len()), Some(3));
    assert_eq!(error_count, 1);
    assert_eq!(
        symbol_table.lookup("x").map(|symbol| symbol.data_type()),
        Some(DataType::Integer)
    );
    assert!(errors[0].to_string().contains("first declared as `integer`"));
}

#[test]
fn header_errors_do_not_abort() {
    let Parsed {
        program,
        symbol_table,
        error_count,
        errors,
    } = parse("p; var x : integer; begin end");

    // missing `program` and missing `.`
    assert_eq!(error_count, 2);
    assert_eq!(errors.len(), 2);
    assert_eq!(
        program.and_then(|program| program.name().as_ref().map(|name| name.lexeme().to_owned())),
        Some("p".to_owned())
    );
    assert_eq!(symbol_table.len(), 1);
}

#[test]
fn statements_are_skipped_until_end() {
    let Parsed {
        program,
        error_count,
        ..
    } = parse("program p; begin if x > 1 then y := 'a' else y := 2.5; end.");

    assert!(program.is_some());
    assert_eq!(error_count, 0);
}

#[test]
fn lexical_error_sentinel_is_an_unexpected_token() {
    let Parsed {
        program,
        error_count,
        errors,
        ..
    } = parse("program p; var x : integer; begin # end.");

    assert!(program.is_some());
    // `end` and `.` are missing since scanning stopped at `#`
    assert_eq!(error_count, 2);
    assert!(errors
        .iter()
        .all(|error| error.as_unexpected_syntax().is_some()));
}

proptest! {
    #[test]
    fn declarations_fill_the_symbol_table(
        name in identifier(),
        declarations in vec(Declaration::arbitrary(), 0..16),
        trailing_semicolon in proptest::bool::ANY,
    ) {
        let mut source = format!("program {name};\n");

        if !declarations.is_empty() {
            source.push_str("var\n");
            for (index, declaration) in declarations.iter().enumerate() {
                let last = index + 1 == declarations.len();
                let separator = if !last || trailing_semicolon { ";" } else { "" };
                writeln!(source, "  {declaration}{separator}")?;
            }
        }
        source.push_str("begin\nend.\n");

        let Parsed {
            program,
            symbol_table,
            error_count,
            errors,
        } = parse(&source);
        let program = program.ok_or_else(|| {
            proptest::test_runner::TestCaseError::fail("the parse was aborted")
        })?;

        declarations.as_slice().assert(program.declarations().as_slice())?;

        let mut first_types = HashMap::new();
        let mut redeclarations = 0;
        for declaration in &declarations {
            if let Entry::Vacant(entry) = first_types.entry(declaration.name.clone()) {
                entry.insert(declaration.data_type);
            } else {
                redeclarations += 1;
            }
        }

        prop_assert_eq!(error_count, redeclarations);
        prop_assert_eq!(errors.len(), redeclarations);
        prop_assert_eq!(symbol_table.len(), first_types.len());

        for (name, data_type) in first_types {
            let symbol = symbol_table.lookup(&name);
            prop_assert!(symbol.is_some());
            prop_assert_eq!(symbol.map(|symbol| symbol.data_type()), Some(data_type));
        }
    }
}
