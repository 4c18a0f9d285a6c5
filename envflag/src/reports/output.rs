//! Where reports are printed.

/// Sink for report lines.
///
/// Reports say which kind of line they emit (a heading, a flag, the default
/// of one environment) and the sink decides the layout.
pub trait Output {
    fn heading(&mut self, title: &str);

    fn field(&mut self, key: &str, value: &str);

    /// One flag of a listing.
    fn flag(&mut self, text: &str);

    /// Default of one environment, shown under its flag.
    fn env_default(&mut self, env: &str, literal: &str);

    /// A problem with the source. Goes to stderr on a terminal.
    fn error(&mut self, msg: &str);

    /// Marks the start of a file printed verbatim.
    fn banner(&mut self, label: &str);

    fn text(&mut self, text: &str);

    fn blank(&mut self);
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints reports to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn heading(&mut self, title: &str) {
        println!("{title}:");
    }

    fn field(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn flag(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn env_default(&mut self, env: &str, literal: &str) {
        println!("      {env}: {literal}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {msg}");
    }

    fn banner(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn text(&mut self, text: &str) {
        println!("{text}");
    }

    fn blank(&mut self) {
        println!();
    }
}

/// Records the lines a report would print, errors prefixed with `stderr:`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordedOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordedOutput {
    fn heading(&mut self, title: &str) {
        self.lines.push(format!("{title}:"));
    }

    fn field(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{key}: {value}"));
    }

    fn flag(&mut self, text: &str) {
        self.lines.push(format!("  - {text}"));
    }

    fn env_default(&mut self, env: &str, literal: &str) {
        self.lines.push(format!("      {env}: {literal}"));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("stderr: error: {msg}"));
    }

    fn banner(&mut self, label: &str) {
        self.lines.push(format!("-- {label} --"));
    }

    fn text(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}
