#[derive(Debug)]
/// Represents all errors that can be raised during evaluation.
///
/// Runtime errors are fatal: the interpreter exposes no exception syntax,
/// so every variant aborts the program with a one-line diagnostic.
pub enum RuntimeError {
    /// Tried to read a name that is not bound in the current scope.
    UnknownVariable {
        /// The name that failed to resolve.
        name: String,
    },
    /// A dotted chain descended into a value that is not a class instance.
    NotAnObject {
        /// The chain element whose value is not an instance.
        name: String,
    },
    /// A field assignment targeted a value that is not a class instance.
    FieldOnNonObject,
    /// Called a method the receiver's class does not define.
    UnknownMethod {
        /// The requested method name.
        name: String,
    },
    /// Called a method with the wrong number of arguments.
    ArityMismatch {
        /// The method name.
        name:     String,
        /// The number of formal parameters.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// An operator was applied to operand kinds it does not support.
    UnsupportedOperands {
        /// The operation attempted, e.g. `addition`.
        operation: &'static str,
    },
    /// Two values admit no comparison, directly or via a dunder method.
    Incomparable,
    /// A dunder comparison method returned something other than a boolean.
    ExpectedBoolean {
        /// The method that misbehaved.
        method: &'static str,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Arithmetic overflowed the 64-bit integer range.
    Overflow,
    /// A `return` statement executed outside of any method body.
    ReturnOutsideMethod,
    /// Writing to the output stream failed.
    Output(std::io::Error),
}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => {
                write!(f, "Runtime error: Unknown variable '{name}'.")
            },
            Self::NotAnObject { name } => {
                write!(f, "Runtime error: '{name}' is not an object and has no fields.")
            },
            Self::FieldOnNonObject => {
                write!(f, "Runtime error: Field assignment on a value that is not an object.")
            },
            Self::UnknownMethod { name } => {
                write!(f, "Runtime error: Call for an undefined method '{name}'.")
            },
            Self::ArityMismatch { name, expected, found } => {
                write!(f,
                       "Runtime error: Method '{name}' takes {expected} argument(s), found {found}.")
            },
            Self::UnsupportedOperands { operation } => {
                write!(f, "Runtime error: Incompatible operand types for {operation}.")
            },
            Self::Incomparable => write!(f, "Runtime error: Cannot compare these values."),
            Self::ExpectedBoolean { method } => {
                write!(f, "Runtime error: {method} must return a boolean.")
            },
            Self::DivisionByZero => write!(f, "Runtime error: Division by zero."),
            Self::Overflow => write!(f, "Runtime error: Integer overflow."),
            Self::ReturnOutsideMethod => {
                write!(f, "Runtime error: 'return' outside of a method body.")
            },
            Self::Output(e) => write!(f, "Runtime error: Output stream failure: {e}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
