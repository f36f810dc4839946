use std::rc::Rc;

use crate::{ast::{Comparator, Statement},
            error::ParseError,
            interpreter::{lexer::{Lexer, Token},
                          parser::core::{ClassTable, ParseResult}}};

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Precedence, loosest
/// first: `or`, `and`, `not`, comparison, `+`/`-`, `*`/`/`, unary minus,
/// primary. The binary tiers are left-associative; a comparison does not
/// chain.
pub fn parse_test(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    parse_or(lexer, classes)
}

fn parse_or(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    let mut node = parse_and(lexer, classes)?;
    while *lexer.current() == Token::Or {
        lexer.next_token();
        let rhs = parse_and(lexer, classes)?;
        node = Statement::Or { lhs: Box::new(node),
                               rhs: Box::new(rhs) };
    }
    Ok(node)
}

fn parse_and(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    let mut node = parse_not(lexer, classes)?;
    while *lexer.current() == Token::And {
        lexer.next_token();
        let rhs = parse_not(lexer, classes)?;
        node = Statement::And { lhs: Box::new(node),
                                rhs: Box::new(rhs) };
    }
    Ok(node)
}

fn parse_not(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    if *lexer.current() == Token::Not {
        lexer.next_token();
        let argument = parse_not(lexer, classes)?;
        return Ok(Statement::Not(Box::new(argument)));
    }
    parse_comparison(lexer, classes)
}

fn parse_comparison(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    let lhs = parse_additive(lexer, classes)?;

    let cmp = match lexer.current() {
        Token::Eq => Comparator::Equal,
        Token::NotEq => Comparator::NotEqual,
        Token::Char('<') => Comparator::Less,
        Token::Char('>') => Comparator::Greater,
        Token::LessOrEq => Comparator::LessOrEqual,
        Token::GreaterOrEq => Comparator::GreaterOrEqual,
        _ => return Ok(lhs),
    };
    lexer.next_token();

    let rhs = parse_additive(lexer, classes)?;
    Ok(Statement::Comparison { cmp,
                               lhs: Box::new(lhs),
                               rhs: Box::new(rhs) })
}

fn parse_additive(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    let mut node = parse_multiplicative(lexer, classes)?;
    loop {
        let add = match lexer.current() {
            Token::Char('+') => true,
            Token::Char('-') => false,
            _ => return Ok(node),
        };
        lexer.next_token();
        let rhs = Box::new(parse_multiplicative(lexer, classes)?);
        let lhs = Box::new(node);
        node = if add { Statement::Add { lhs, rhs } } else { Statement::Sub { lhs, rhs } };
    }
}

fn parse_multiplicative(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    let mut node = parse_unary(lexer, classes)?;
    loop {
        let mult = match lexer.current() {
            Token::Char('*') => true,
            Token::Char('/') => false,
            _ => return Ok(node),
        };
        lexer.next_token();
        let rhs = Box::new(parse_unary(lexer, classes)?);
        let lhs = Box::new(node);
        node = if mult { Statement::Mult { lhs, rhs } } else { Statement::Div { lhs, rhs } };
    }
}

/// Parses unary minus by rewriting `-x` as `0 - x`; the evaluator has no
/// dedicated negation node.
fn parse_unary(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    if *lexer.current() == Token::Char('-') {
        lexer.next_token();
        let rhs = parse_unary(lexer, classes)?;
        return Ok(Statement::Sub { lhs: Box::new(Statement::NumericConst(0)),
                                   rhs: Box::new(rhs) });
    }
    parse_primary(lexer, classes)
}

fn parse_primary(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Statement> {
    match lexer.current() {
        Token::Number(value) => {
            let node = Statement::NumericConst(*value);
            lexer.next_token();
            Ok(node)
        },
        Token::String(value) => {
            let node = Statement::StringConst(value.clone());
            lexer.next_token();
            Ok(node)
        },
        Token::True => {
            lexer.next_token();
            Ok(Statement::BoolConst(true))
        },
        Token::False => {
            lexer.next_token();
            Ok(Statement::BoolConst(false))
        },
        Token::None => {
            lexer.next_token();
            Ok(Statement::NoneConst)
        },
        Token::Char('(') => {
            lexer.next_token();
            let inner = parse_test(lexer, classes)?;
            lexer.expect(&Token::Char(')'))?;
            lexer.next_token();
            Ok(inner)
        },
        Token::Id(_) => {
            let chain = parse_dotted_ids(lexer)?;
            finish_chain_expression(lexer, classes, chain)
        },
        other => Err(ParseError::UnexpectedToken { token: other.to_string(),
                                                   line:  lexer.current_line(), }),
    }
}

/// Parses `Id ('.' Id)*` and leaves the stream on the following token.
/// The returned chain is never empty.
pub fn parse_dotted_ids(lexer: &mut Lexer) -> ParseResult<Vec<String>> {
    let mut ids = vec![lexer.expect_id()?.to_owned()];
    while *lexer.next_token() == Token::Char('.') {
        ids.push(lexer.expect_next_id()?.to_owned());
    }
    Ok(ids)
}

/// Turns a parsed identifier chain into an expression node, consuming call
/// arguments when a `(` follows.
///
/// - a plain chain reads a variable (or a field path);
/// - `str(x)` becomes `Stringify`;
/// - a called single identifier must name a declared class and becomes an
///   instantiation;
/// - a called longer chain is a method call on the chain prefix.
pub fn finish_chain_expression(lexer: &mut Lexer,
                               classes: &mut ClassTable,
                               chain: Vec<String>)
                               -> ParseResult<Statement> {
    if *lexer.current() != Token::Char('(') {
        return Ok(Statement::VariableValue { dotted_ids: chain });
    }

    let line = lexer.current_line();
    let args = parse_call_args(lexer, classes)?;

    let mut chain = chain;
    match chain.pop() {
        Some(name) if chain.is_empty() => {
            if name == "str" {
                return match <[Statement; 1]>::try_from(args) {
                    Ok([argument]) => Ok(Statement::Stringify(Box::new(argument))),
                    Err(args) => Err(ParseError::StringifyArity { found: args.len(), line }),
                };
            }
            match classes.get(&name) {
                Some(class) => Ok(Statement::NewInstance { class: Rc::clone(class),
                                                           args }),
                None => Err(ParseError::UnknownClass { name, line }),
            }
        },
        Some(method) => {
            Ok(Statement::MethodCall { object: Box::new(Statement::VariableValue {
                                           dotted_ids: chain,
                                       }),
                                       method,
                                       args })
        },
        None => unreachable!("a dotted chain is never empty"),
    }
}

/// Parses `'(' [ test (',' test)* ] ')'`.
fn parse_call_args(lexer: &mut Lexer, classes: &mut ClassTable) -> ParseResult<Vec<Statement>> {
    let mut args = Vec::new();
    if *lexer.next_token() != Token::Char(')') {
        args.push(parse_test(lexer, classes)?);
        while *lexer.current() == Token::Char(',') {
            lexer.next_token();
            args.push(parse_test(lexer, classes)?);
        }
    }
    lexer.expect(&Token::Char(')'))?;
    lexer.next_token();

    Ok(args)
}
