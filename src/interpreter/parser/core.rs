use std::{collections::HashMap, rc::Rc};

use crate::{ast::Statement,
            error::ParseError,
            interpreter::{lexer::{Lexer, Token},
                          parser::statement::parse_statement,
                          runtime::class::Class}};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Classes declared so far, by name.
///
/// Class declarations are resolved at parse time: an instantiation holds
/// the class itself, and a parent name must already be in this table when
/// a subclass is declared.
pub type ClassTable = HashMap<String, Rc<Class>>;

/// Parses a whole program into its root `Compound` node.
///
/// The token stream must be freshly constructed (positioned on its first
/// token); it is consumed up to and including `Eof`.
///
/// # Errors
/// Returns a [`ParseError`] for any construct the grammar does not allow.
pub fn parse_program(lexer: &mut Lexer) -> ParseResult<Statement> {
    let mut classes = ClassTable::new();
    let mut statements = Vec::new();

    while *lexer.current() != Token::Eof {
        statements.push(parse_statement(lexer, &mut classes)?);
    }

    Ok(Statement::Compound { statements })
}

/// Parses a suite: `':' Newline Indent statement+ Dedent`.
///
/// Used for method bodies and both branches of `if`/`else`. The trailing
/// `Dedent` is consumed.
pub fn parse_suite(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    lexer.expect(&Token::Char(':'))?;
    lexer.expect_next(&Token::Newline)?;
    lexer.expect_next(&Token::Indent)?;
    lexer.next_token();

    let mut statements = Vec::new();
    while *lexer.current() != Token::Dedent {
        statements.push(parse_statement(lexer, classes)?);
    }
    lexer.next_token();

    Ok(Statement::Compound { statements })
}
