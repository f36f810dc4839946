#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text or
/// while a consumer checks the token stream with the `expect` family.
pub enum LexerError {
    /// Encountered a character no recognizer accepts.
    UnexpectedCharacter {
        /// The offending source text.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A numeric literal does not fit into a signed 64-bit integer.
    NumberTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal is still open when the input ends.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A backslash escape uses a character outside the supported set.
    UnknownEscape {
        /// The escaped character.
        escape: char,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A raw line feed or carriage return appeared inside a string literal.
    NewlineInString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `expect` check found a token other than the requested one.
    UnexpectedToken {
        /// Description of the expected token.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// The source line of the found token.
        line:     usize,
    },
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { found, line } => {
                write!(f, "Error on line {line}: Unexpected character '{found}'.")
            },
            Self::NumberTooLarge { line } => {
                write!(f, "Error on line {line}: Number literal does not fit into 64 bits.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: String literal is not terminated.")
            },
            Self::UnknownEscape { escape, line } => {
                write!(f, "Error on line {line}: Unknown escape sequence '\\{escape}'.")
            },
            Self::NewlineInString { line } => {
                write!(f, "Error on line {line}: Line break inside a string literal.")
            },
            Self::UnexpectedToken { expected, found, line } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },
        }
    }
}

impl std::error::Error for LexerError {}
