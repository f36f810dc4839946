//! # krait
//!
//! krait is an interpreter for Krait, a small dynamically-typed,
//! indentation-structured scripting language. Krait programs are built
//! from newline-terminated statements, two-space-indented blocks, classes
//! with single inheritance, and a handful of value types: integers,
//! booleans, strings, `None`, and class instances with dunder-style
//! operator overloading.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::RuntimeError,
            interpreter::{context::Context,
                          evaluator::Interrupt,
                          lexer::Lexer,
                          parser::core::parse_program,
                          runtime::object::Closure}};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` enum whose variants represent all
/// expressions and statements of the language as a tree. The AST is built
/// by the parser and walked by the evaluator; every node owns its children.
///
/// # Responsibilities
/// - Defines one variant per language construct.
/// - Carries parse-time-resolved class values inside declaration and
///   instantiation nodes.
pub mod ast;
/// Provides unified error types for lexing, parsing, and evaluation.
///
/// This module defines all errors that can be raised while interpreting a
/// program. It standardizes error reporting: every error renders to a
/// single-line message, and lexer/parse errors carry the source line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the object
/// model, and the output context to provide a complete runtime for Krait
/// programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, runtime.
/// - Provides entry points for interpreting programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Runs a Krait program against the given context.
///
/// The source is lexed eagerly, parsed into a root block, and executed
/// against a fresh, empty root closure; everything the program prints goes
/// to the context's output stream.
///
/// # Errors
/// Returns an error if lexing, parsing, or evaluation fails, including a
/// `return` statement that reaches the top level.
///
/// # Examples
/// ```
/// use krait::interpreter::context::BufferContext;
///
/// let mut context = BufferContext::new();
/// krait::run_program("print 'hello', 40 + 2\n", &mut context).unwrap();
///
/// assert_eq!(context.contents(), "hello 42\n");
/// ```
pub fn run_program(source: &str,
                   context: &mut dyn Context)
                   -> Result<(), Box<dyn std::error::Error>> {
    let mut lexer = Lexer::new(source)?;
    let program = parse_program(&mut lexer)?;

    let mut globals = Closure::new();
    match program.execute(&mut globals, context) {
        Ok(_) => Ok(()),
        Err(Interrupt::Return(_)) => Err(Box::new(RuntimeError::ReturnOutsideMethod)),
        Err(Interrupt::Error(e)) => Err(Box::new(e)),
    }
}
