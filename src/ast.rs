use std::rc::Rc;

use crate::interpreter::runtime::class::Class;

/// Comparison operators dispatched by `Statement::Comparison`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
}

/// A node of the syntax tree.
///
/// Statements and expressions share one evaluation contract — every variant
/// executes against a closure and an output context and yields a value
/// holder, with statement-like variants yielding `None`. Each node owns its
/// children exclusively; the tree is built once by the parser and is
/// immutable during evaluation.
#[derive(Debug)]
pub enum Statement {
    /// Integer literal.
    NumericConst(i64),
    /// String literal.
    StringConst(String),
    /// `True` or `False`.
    BoolConst(bool),
    /// `None`.
    NoneConst,
    /// A dotted chain of identifiers, `x` or `x.y.z`. The first element is
    /// resolved in the enclosing closure, every further element in the
    /// field environment of the instance found so far.
    VariableValue {
        /// The chain elements, in source order; never empty.
        dotted_ids: Vec<String>,
    },
    /// A method call `target.method(args)`.
    MethodCall {
        /// Expression yielding the receiver.
        object: Box<Statement>,
        /// The method name.
        method: String,
        /// Argument expressions, evaluated left to right.
        args:   Vec<Statement>,
    },
    /// Instantiation of a declared class, `ClassName(args)`.
    NewInstance {
        /// The class, resolved at parse time.
        class: Rc<Class>,
        /// Arguments for `__init__`, evaluated left to right.
        args:  Vec<Statement>,
    },
    /// `str(argument)`.
    Stringify(Box<Statement>),
    /// `lhs + rhs`: numbers add, strings concatenate, instances may
    /// provide `__add__`.
    Add {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `lhs - rhs` over numbers.
    Sub {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `lhs * rhs` over numbers.
    Mult {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `lhs / rhs` over numbers; truncating, zero divisor is an error.
    Div {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `lhs or rhs`; short-circuits and always yields a fresh `Bool`.
    Or {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `lhs and rhs`; evaluates both operands, yields a fresh `Bool`.
    And {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `not argument`.
    Not(Box<Statement>),
    /// A comparison, `lhs <op> rhs`.
    Comparison {
        cmp: Comparator,
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// `var = rv`, binding into the enclosing closure.
    Assignment {
        var: String,
        rv:  Box<Statement>,
    },
    /// `object.field = rv`, writing into an instance's field environment.
    FieldAssignment {
        /// A `VariableValue` chain yielding the target instance.
        object:     Box<Statement>,
        field_name: String,
        rv:         Box<Statement>,
    },
    /// `print args...`: arguments separated by single spaces, then a
    /// newline. `None` prints literally as `None`.
    Print {
        args: Vec<Statement>,
    },
    /// `return [expr]`; unwinds to the innermost enclosing method body.
    Return {
        statement: Option<Box<Statement>>,
    },
    /// `if condition: ... [else: ...]`.
    IfElse {
        condition: Box<Statement>,
        if_body:   Box<Statement>,
        else_body: Option<Box<Statement>>,
    },
    /// A sequence of statements executed in order.
    Compound {
        statements: Vec<Statement>,
    },
    /// A class declaration; binds the class value under its name.
    ClassDefinition {
        class: Rc<Class>,
    },
    /// The body of a method; the only node that catches `return`.
    MethodBody {
        body: Box<Statement>,
    },
}
