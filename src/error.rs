/// Lexer errors.
///
/// Defines the errors raised while turning source text into tokens:
/// malformed string literals, unknown escapes, oversized number literals,
/// unexpected characters, and failed `expect` checks on the token stream.
pub mod lexer_error;
/// Parse errors.
///
/// Defines the errors raised while building the syntax tree: tokens the
/// grammar does not allow at the current position, and names used as
/// classes without a preceding declaration.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// names, incompatible operand types, arity mismatches, division by zero,
/// and misplaced `return`.
pub mod runtime_error;

pub use lexer_error::LexerError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
