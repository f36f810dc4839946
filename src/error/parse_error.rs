use crate::error::LexerError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while building the syntax tree from
/// the token stream.
pub enum ParseError {
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken {
        /// Description of the offending token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A called identifier names neither `str` nor a declared class.
    UnknownClass {
        /// The identifier used as a constructor.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class inherits from a name that has not been declared as a class.
    UnknownParentClass {
        /// The parent name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `str(...)` was called with an argument count other than one.
    StringifyArity {
        /// The number of arguments found.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A token-stream check failed; carries the underlying lexer error.
    Lexer(LexerError),
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self::Lexer(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected {token}.")
            },
            Self::UnknownClass { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not a declared class.")
            },
            Self::UnknownParentClass { name, line } => {
                write!(f, "Error on line {line}: Parent class '{name}' is not declared.")
            },
            Self::StringifyArity { found, line } => {
                write!(f, "Error on line {line}: str() takes exactly one argument, found {found}.")
            },
            Self::Lexer(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}
