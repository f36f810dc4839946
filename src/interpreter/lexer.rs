use logos::Logos;

use crate::error::LexerError;

/// One indentation level corresponds to this many leading spaces.
const SPACES_PER_INDENT: usize = 2;

/// Represents a lexical token of a Krait program.
///
/// Valued kinds compare by value, keyword/operator/structural kinds by kind
/// alone; the derived `PartialEq` gives exactly that. `Indent`, `Dedent`,
/// `Newline` and `Eof` never appear in the raw character stream and are
/// synthesized by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Integer literal, such as `42`.
    Number(i64),
    /// Identifier, such as `counter` or `self`.
    Id(String),
    /// String literal with escapes already resolved.
    String(String),
    /// A single punctuation character, such as `:` or `+`.
    Char(char),
    /// `class`
    Class,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `def`
    Def,
    /// `print`
    Print,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
    /// End of a logical line. Runs of empty lines collapse into one.
    Newline,
    /// The indentation level grew by one unit.
    Indent,
    /// The indentation level shrank by one unit.
    Dedent,
    /// End of input; always the final token, exactly once.
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "Number{{{value}}}"),
            Self::Id(value) => write!(f, "Id{{{value}}}"),
            Self::String(value) => write!(f, "String{{{value}}}"),
            Self::Char(value) => write!(f, "Char{{{value}}}"),
            Self::Class => write!(f, "Class"),
            Self::Return => write!(f, "Return"),
            Self::If => write!(f, "If"),
            Self::Else => write!(f, "Else"),
            Self::Def => write!(f, "Def"),
            Self::Print => write!(f, "Print"),
            Self::And => write!(f, "And"),
            Self::Or => write!(f, "Or"),
            Self::Not => write!(f, "Not"),
            Self::None => write!(f, "None"),
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::Eq => write!(f, "Eq"),
            Self::NotEq => write!(f, "NotEq"),
            Self::LessOrEq => write!(f, "LessOrEq"),
            Self::GreaterOrEq => write!(f, "GreaterOrEq"),
            Self::Newline => write!(f, "Newline"),
            Self::Indent => write!(f, "Indent"),
            Self::Dedent => write!(f, "Dedent"),
            Self::Eof => write!(f, "Eof"),
        }
    }
}

/// Additional information carried by the raw scanner during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
struct RawExtras {
    /// The current line number in the source being tokenized.
    line: usize,
}

/// Failure modes of the raw scanner, before line numbers are attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ScanError {
    /// No recognizer accepted the character.
    #[default]
    UnexpectedCharacter,
    /// A numeric literal overflowed `i64`.
    NumberOverflow,
    /// Input ended inside a string literal.
    UnterminatedString,
    /// A backslash escape used an unsupported character.
    UnknownEscape(char),
    /// A raw LF or CR appeared inside a string literal.
    NewlineInString,
}

impl ScanError {
    fn with_line(self, found: &str, line: usize) -> LexerError {
        match self {
            Self::UnexpectedCharacter => LexerError::UnexpectedCharacter { found: found.to_owned(),
                                                                           line },
            Self::NumberOverflow => LexerError::NumberTooLarge { line },
            Self::UnterminatedString => LexerError::UnterminatedString { line },
            Self::UnknownEscape(escape) => LexerError::UnknownEscape { escape, line },
            Self::NewlineInString => LexerError::NewlineInString { line },
        }
    }
}

/// Raw token layer produced by the scanner.
///
/// This layer is flat: it still contains space runs, comments and plain
/// newlines. The indentation pass in [`Lexer::new`] folds it into the final
/// stream of [`Token`]s.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = RawExtras)]
#[logos(error = ScanError)]
enum RawToken {
    /// Integer literal. Krait numbers are signed 64-bit; a leading sign is
    /// not part of the literal.
    #[regex(r"[0-9]+", parse_number)]
    Number(i64),
    /// `class`
    #[token("class")]
    Class,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `def`
    #[token("def")]
    Def,
    /// `print`
    #[token("print")]
    Print,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `None`
    #[token("None")]
    None,
    /// `True`
    #[token("True")]
    True,
    /// `False`
    #[token("False")]
    False,
    /// Identifier: ASCII alphabetic or `_`, then alphanumeric or `_`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Id(String),
    /// String literal opened by `'` or `"` and closed by the same quote.
    #[token("'", lex_quoted)]
    #[token("\"", lex_quoted)]
    String(std::string::String),
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<=`
    #[token("<=")]
    LessOrEq,
    /// `>=`
    #[token(">=")]
    GreaterOrEq,
    /// `# line comment` running up to, but not including, the newline.
    #[regex(r"#[^\n]*")]
    Comment,
    /// Any other ASCII punctuation character.
    #[regex(r"[!$%&(-/:-@\[-\^`{-~]", |lex| lex.slice().as_bytes()[0] as char)]
    Char(char),
    /// Raw line feed.
    #[token("\n", |lex| { lex.extras.line += 1; })]
    Newline,
    /// A run of spaces. Significant only at the start of a line, where it
    /// determines the indentation level; a separator everywhere else.
    #[regex(r" +", |lex| lex.slice().len())]
    Spaces(usize),
}

fn parse_number(lex: &logos::Lexer<RawToken>) -> Result<i64, ScanError> {
    lex.slice().parse().map_err(|_| ScanError::NumberOverflow)
}

/// Consumes a string literal body after the opening quote.
///
/// Escapes from the set `\n \t \r \" \' \\` are resolved; any other escape,
/// a raw line break, or end of input before the closing quote is an error.
/// Bytes outside ASCII pass through untouched.
fn lex_quoted(lex: &mut logos::Lexer<RawToken>) -> Result<String, ScanError> {
    let quote = lex.slice().as_bytes()[0];
    let rest = lex.remainder().as_bytes();

    let mut value = Vec::new();
    let mut i = 0;
    loop {
        let Some(&byte) = rest.get(i) else {
            return Err(ScanError::UnterminatedString);
        };
        match byte {
            b if b == quote => {
                lex.bump(i + 1);
                return Ok(String::from_utf8_lossy(&value).into_owned());
            },
            b'\\' => {
                let Some(&escape) = rest.get(i + 1) else {
                    return Err(ScanError::UnterminatedString);
                };
                value.push(match escape {
                               b'n' => b'\n',
                               b't' => b'\t',
                               b'r' => b'\r',
                               b'"' => b'"',
                               b'\'' => b'\'',
                               b'\\' => b'\\',
                               other => return Err(ScanError::UnknownEscape(other as char)),
                           });
                i += 2;
            },
            b'\n' | b'\r' => return Err(ScanError::NewlineInString),
            other => {
                value.push(other);
                i += 1;
            },
        }
    }
}

/// The Krait lexer.
///
/// Construction consumes the entire input eagerly and materializes the
/// token stream, so every lexical error surfaces before parsing starts.
/// The stream always ends in exactly one [`Token::Eof`], preceded by a
/// [`Token::Newline`] and the dedents still outstanding; every `Indent` is
/// matched by a later `Dedent`.
///
/// The parser walks the stream through [`current`](Self::current) /
/// [`next_token`](Self::next_token) and validates it with the `expect`
/// family, which reports mismatches as [`LexerError::UnexpectedToken`].
pub struct Lexer {
    /// The token stream, each token paired with its source line.
    tokens: Vec<(Token, usize)>,
    /// Index of the current token.
    pos:    usize,
}

impl Lexer {
    /// Tokenizes `input` and positions the stream on its first token.
    ///
    /// # Errors
    /// Returns a [`LexerError`] for malformed literals, unknown escapes,
    /// line breaks inside strings, or characters no recognizer accepts.
    pub fn new(input: &str) -> Result<Self, LexerError> {
        let mut raw = RawToken::lexer_with_extras(input, RawExtras { line: 1 });

        let mut tokens: Vec<(Token, usize)> = Vec::new();
        let mut indent_level = 0_usize;
        // Set right after a newline; holds the count of leading spaces seen
        // so far on the fresh line. `None` in the middle of a line.
        let mut line_start: Option<usize> = None;

        while let Some(scanned) = raw.next() {
            let line = raw.extras.line;
            let token = match scanned {
                Ok(token) => token,
                Err(e) => return Err(e.with_line(raw.slice(), line)),
            };

            match token {
                RawToken::Spaces(count) => {
                    if line_start.is_some() {
                        line_start = Some(count);
                    }
                },
                RawToken::Newline => {
                    // A line holding only spaces leaves the indent level
                    // untouched, and runs of newlines collapse into one.
                    if let Some((last, _)) = tokens.last()
                        && *last != Token::Newline
                    {
                        tokens.push((Token::Newline, line - 1));
                    }
                    line_start = Some(0);
                },
                RawToken::Comment => {
                    flush_indent(&mut tokens, &mut indent_level, &mut line_start, line);
                },
                other => {
                    flush_indent(&mut tokens, &mut indent_level, &mut line_start, line);
                    tokens.push((promote(other), line));
                },
            }
        }

        let line = raw.extras.line;
        if let Some((last, _)) = tokens.last()
            && *last != Token::Newline
        {
            tokens.push((Token::Newline, line));
        }
        for _ in 0..indent_level {
            tokens.push((Token::Dedent, line));
        }
        tokens.push((Token::Eof, line));

        Ok(Self { tokens, pos: 0 })
    }

    /// Returns the current token.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Returns the source line of the current token.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.tokens[self.pos].1
    }

    /// Advances the stream and returns the new current token.
    ///
    /// Once the stream stands on [`Token::Eof`] further calls are
    /// idempotent and keep returning `Eof`.
    pub fn next_token(&mut self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        self.current()
    }

    /// Checks that the current token equals `expected`.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] on a mismatch.
    pub fn expect(&self, expected: &Token) -> Result<(), LexerError> {
        if self.current() == expected {
            Ok(())
        } else {
            Err(self.mismatch(&expected.to_string()))
        }
    }

    /// Advances the stream, then checks the new current token against
    /// `expected`.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] on a mismatch.
    pub fn expect_next(&mut self, expected: &Token) -> Result<(), LexerError> {
        self.next_token();
        self.expect(expected)
    }

    /// Checks that the current token is an identifier and returns its text.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] if the current token is not
    /// an [`Token::Id`].
    pub fn expect_id(&self) -> Result<&str, LexerError> {
        match self.current() {
            Token::Id(name) => Ok(name),
            _ => Err(self.mismatch("Id")),
        }
    }

    /// Advances the stream, then checks for an identifier and returns its
    /// text.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] if the next token is not an
    /// [`Token::Id`].
    pub fn expect_next_id(&mut self) -> Result<&str, LexerError> {
        self.next_token();
        match self.current() {
            Token::Id(name) => Ok(name),
            _ => Err(self.mismatch("Id")),
        }
    }

    fn mismatch(&self, expected: &str) -> LexerError {
        LexerError::UnexpectedToken { expected: expected.to_owned(),
                                      found:    self.current().to_string(),
                                      line:     self.current_line(), }
    }
}

/// Converts a line's leading-space count into `Indent`/`Dedent` tokens.
///
/// One level is [`SPACES_PER_INDENT`] spaces; odd counts round up, so one
/// extra space already promotes by a full level. The level is absolute,
/// which keeps it from ever dropping below zero.
fn flush_indent(tokens: &mut Vec<(Token, usize)>,
                indent_level: &mut usize,
                line_start: &mut Option<usize>,
                line: usize) {
    let Some(spaces) = line_start.take() else {
        return;
    };

    let new_level = spaces.div_ceil(SPACES_PER_INDENT);
    while *indent_level < new_level {
        tokens.push((Token::Indent, line));
        *indent_level += 1;
    }
    while *indent_level > new_level {
        tokens.push((Token::Dedent, line));
        *indent_level -= 1;
    }
}

/// Maps a raw scanner token onto its final counterpart.
fn promote(raw: RawToken) -> Token {
    match raw {
        RawToken::Number(value) => Token::Number(value),
        RawToken::Id(value) => Token::Id(value),
        RawToken::String(value) => Token::String(value),
        RawToken::Char(value) => Token::Char(value),
        RawToken::Class => Token::Class,
        RawToken::Return => Token::Return,
        RawToken::If => Token::If,
        RawToken::Else => Token::Else,
        RawToken::Def => Token::Def,
        RawToken::Print => Token::Print,
        RawToken::And => Token::And,
        RawToken::Or => Token::Or,
        RawToken::Not => Token::Not,
        RawToken::None => Token::None,
        RawToken::True => Token::True,
        RawToken::False => Token::False,
        RawToken::Eq => Token::Eq,
        RawToken::NotEq => Token::NotEq,
        RawToken::LessOrEq => Token::LessOrEq,
        RawToken::GreaterOrEq => Token::GreaterOrEq,
        // Spaces, comments and newlines are folded away by the caller.
        RawToken::Comment | RawToken::Newline | RawToken::Spaces(_) => unreachable!(),
    }
}
