/// The context module connects the interpreter to the outside world.
///
/// Declares the `Context` trait whose output stream receives everything
/// `print` produces, together with the two concrete contexts: one wrapping
/// an external sink for production use, one buffering to memory for tests
/// and for `str(...)`.
pub mod context;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements
/// against a closure and a context, and produces value holders. It also
/// defines the interrupt channel that carries `return` out of nested
/// blocks up to the enclosing method body.
///
/// # Responsibilities
/// - Evaluates every AST variant, performing all supported operations.
/// - Routes `return` values to the innermost method body.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text eagerly and produces the full token
/// stream, synthesizing `Indent`/`Dedent` tokens at indentation changes,
/// collapsing newline runs, and finishing the stream with a newline, the
/// outstanding dedents, and a single `Eof`.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Handles string escapes, comments, numbers, keywords, and operators.
/// - Exposes the `current`/`next`/`expect` interface the parser consumes.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs the AST the evaluator walks. Classes are resolved during
/// parsing: declarations register into a class table, and instantiations
/// hold the class value itself.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and syntax, reporting errors with line info.
/// - Tracks declared classes for instantiation and inheritance.
pub mod parser;
/// The runtime module defines the object model of the language.
///
/// Declares the heap value representation, the holder wrapper with its
/// owning and borrowing modes, closures, classes with their dispatch
/// tables, class instances, truthiness, printing, and value comparison.
///
/// # Responsibilities
/// - Defines the `Object` enum and the `ObjectHolder` reference wrapper.
/// - Implements classes, instances, and virtual method dispatch.
/// - Provides truthiness, printing, and the comparison functions.
pub mod runtime;
