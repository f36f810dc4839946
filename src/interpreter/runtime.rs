/// Classes, methods, and instances.
///
/// Defines `Class` with its virtual method table, `Method`, and
/// `ClassInstance` with the per-instance field environment and the method
/// call machinery that binds `self`.
pub mod class;

/// Value comparison.
///
/// Implements `equal` and `less` — native for same-kind primitives,
/// dunder-dispatched for instances — and the comparators derived from
/// them.
pub mod compare;

/// Values, holders, and closures.
///
/// Defines the `Object` heap value, the `ObjectHolder` reference wrapper
/// with its three construction modes, the `Closure` symbol table,
/// truthiness, and printing.
pub mod object;
