/// Parser entry points and shared definitions.
///
/// Contains `parse_program`, suite parsing, the parser result type, and
/// the table of declared classes.
pub mod core;

/// Expression parsing.
///
/// Implements the precedence chain from `or` down to primaries, dotted
/// identifier chains, and call argument lists.
pub mod expression;

/// Statement parsing.
///
/// Implements class and method declarations, `if`/`else`, `print`,
/// `return`, assignments, and expression statements.
pub mod statement;
