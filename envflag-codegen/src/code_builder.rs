//! Line oriented builder for indented code fragments.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    pub const RUST: Indent = Indent("    ");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}

/// Fluent API for building code with proper indentation.
///
/// Fragments produced here are spliced into the output template, so a
/// builder can start at the indentation level of the place it lands in.
///
/// # Example
///
/// ```
/// use envflag_codegen::CodeBuilder;
///
/// let code = CodeBuilder::rust()
///     .line("port: Value::new(&env)")
///     .indent()
///     .line(".set(ENV_DEV, 8080_i64),")
///     .build();
///
/// assert_eq!(code, "port: Value::new(&env)\n    .set(ENV_DEV, 8080_i64),\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// Start at `level` levels of indentation.
    pub fn at_level(mut self, level: usize) -> Self {
        self.indent_level = level;
        self
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add lines produced by `f` one level deeper.
    pub fn nested<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        f(self.indent()).dedent()
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Like [`build`](Self::build), without the final newline.
    pub fn build_trimmed(self) -> String {
        let mut code = self.buffer;
        if code.ends_with('\n') {
            code.pop();
        }
        code
    }
}
