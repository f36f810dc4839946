use std::rc::Rc;

use crate::{ast::Statement,
            error::ParseError,
            interpreter::{lexer::{Lexer, Token},
                          parser::{core::{parse_suite, ClassTable, ParseResult},
                                   expression::{finish_chain_expression, parse_dotted_ids,
                                                parse_test}},
                          runtime::class::{Class, Method}}};

/// Parses a single statement, including its trailing `Newline` (simple
/// statements) or `Dedent` (suite-carrying statements).
///
/// A statement is one of:
/// - a class declaration,
/// - an `if` statement with an optional `else`,
/// - a `print` statement,
/// - a `return` statement,
/// - an assignment, a field assignment, or an expression used for effect
///   (a dotted chain with an optional call).
///
/// # Errors
/// Returns a [`ParseError`] when the current token can start none of the
/// forms above, or when the chosen form is malformed.
pub fn parse_statement(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    match lexer.current() {
        Token::Class => parse_class_definition(lexer, classes),
        Token::If => parse_if(lexer, classes),
        Token::Print => parse_print(lexer, classes),
        Token::Return => parse_return(lexer, classes),
        Token::Id(_) => parse_assignment_or_expression(lexer, classes),
        other => Err(ParseError::UnexpectedToken { token: other.to_string(),
                                                   line:  lexer.current_line(), }),
    }
}

/// Parses `class Name [ '(' Parent ')' ] ':' Newline Indent method* Dedent`.
///
/// The class value is constructed here, with its method table, and
/// recorded in the declared-class table so later code can instantiate it
/// and subclasses can find their parent.
fn parse_class_definition(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    let name = lexer.expect_next_id()?.to_owned();
    lexer.next_token();

    let parent = if *lexer.current() == Token::Char('(') {
        let parent_name = lexer.expect_next_id()?.to_owned();
        lexer.expect_next(&Token::Char(')'))?;
        lexer.next_token();

        match classes.get(&parent_name) {
            Some(class) => Some(Rc::clone(class)),
            None => {
                return Err(ParseError::UnknownParentClass { name: parent_name,
                                                            line: lexer.current_line(), });
            },
        }
    } else {
        None
    };

    lexer.expect(&Token::Char(':'))?;
    lexer.expect_next(&Token::Newline)?;
    lexer.expect_next(&Token::Indent)?;
    lexer.next_token();

    let mut methods = Vec::new();
    while *lexer.current() == Token::Def {
        methods.push(parse_method(lexer, classes)?);
    }
    lexer.expect(&Token::Dedent)?;
    lexer.next_token();

    let class = Rc::new(Class::new(name.clone(), methods, parent));
    classes.insert(name, Rc::clone(&class));
    Ok(Statement::ClassDefinition { class })
}

/// Parses `def name '(' [ param (',' param)* ] ')' suite`.
///
/// The suite is wrapped in a `MethodBody` node so that a `return`
/// anywhere inside the method stops there.
fn parse_method(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Method> {
    let name = lexer.expect_next_id()?.to_owned();
    lexer.expect_next(&Token::Char('('))?;

    let mut formal_params = Vec::new();
    if let Token::Id(_) = lexer.next_token() {
        formal_params.push(lexer.expect_id()?.to_owned());
        while *lexer.next_token() == Token::Char(',') {
            formal_params.push(lexer.expect_next_id()?.to_owned());
        }
    }
    lexer.expect(&Token::Char(')'))?;
    lexer.next_token();

    let body = parse_suite(lexer, classes)?;
    Ok(Method { name,
                formal_params,
                body: Statement::MethodBody { body: Box::new(body) } })
}

fn parse_if(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    lexer.next_token();
    let condition = parse_test(lexer, classes)?;
    let if_body = parse_suite(lexer, classes)?;

    let else_body = if *lexer.current() == Token::Else {
        lexer.next_token();
        Some(Box::new(parse_suite(lexer, classes)?))
    } else {
        None
    };

    Ok(Statement::IfElse { condition: Box::new(condition),
                           if_body: Box::new(if_body),
                           else_body })
}

/// Parses `print [ test (',' test)* ] Newline`. A bare `print` emits just
/// the newline.
fn parse_print(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    lexer.next_token();

    let mut args = Vec::new();
    if *lexer.current() != Token::Newline {
        args.push(parse_test(lexer, classes)?);
        while *lexer.current() == Token::Char(',') {
            lexer.next_token();
            args.push(parse_test(lexer, classes)?);
        }
    }
    lexer.expect(&Token::Newline)?;
    lexer.next_token();

    Ok(Statement::Print { args })
}

fn parse_return(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    lexer.next_token();

    let statement = if *lexer.current() == Token::Newline {
        None
    } else {
        Some(Box::new(parse_test(lexer, classes)?))
    };
    lexer.expect(&Token::Newline)?;
    lexer.next_token();

    Ok(Statement::Return { statement })
}

/// Parses a statement that begins with an identifier chain.
///
/// `chain '=' test` becomes an `Assignment` (one element) or a
/// `FieldAssignment` (the chain prefix names the target instance).
/// Without `=`, the chain — possibly called — stands as an expression
/// statement.
fn parse_assignment_or_expression(lexer: &mut Lexer,
                                  classes: &mut ClassTable)
                                  -> ParseResult<Statement> {
    let mut chain = parse_dotted_ids(lexer)?;

    let statement = if *lexer.current() == Token::Char('=') {
        lexer.next_token();
        let rv = Box::new(parse_test(lexer, classes)?);

        match chain.pop() {
            Some(var) if chain.is_empty() => Statement::Assignment { var, rv },
            Some(field_name) => {
                Statement::FieldAssignment { object: Box::new(Statement::VariableValue {
                                                 dotted_ids: chain,
                                             }),
                                             field_name,
                                             rv }
            },
            None => unreachable!("a dotted chain is never empty"),
        }
    } else {
        finish_chain_expression(lexer, classes, chain)?
    };

    lexer.expect(&Token::Newline)?;
    lexer.next_token();
    Ok(statement)
}
