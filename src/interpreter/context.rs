use std::io::Write;

/// Execution context of a Krait program.
///
/// The context is the interpreter's only connection to the outside world:
/// `print` writes into the stream it exposes, and nothing else leaves the
/// evaluator. Handing a different context to `execute` is how the tests
/// capture output.
pub trait Context {
    /// Returns the sink that `print` writes to.
    fn output_stream(&mut self) -> &mut dyn Write;
}

/// Production context writing to an arbitrary sink, typically stdout.
pub struct StreamContext<W: Write> {
    output: W,
}

impl<W: Write> StreamContext<W> {
    /// Wraps `output` as an execution context.
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> Context for StreamContext<W> {
    fn output_stream(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// Context buffering all output in memory.
///
/// Used by tests to observe a program's output, and by `str(...)` to
/// render a value into a string.
#[derive(Default)]
pub struct BufferContext {
    output: Vec<u8>,
}

impl BufferContext {
    /// Creates an empty buffering context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, as text.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Context for BufferContext {
    fn output_stream(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}
