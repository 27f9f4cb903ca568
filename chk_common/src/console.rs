//! Line-oriented output sink.
//!
//! Operations that print take a `&mut dyn Console` so callers decide
//! where the lines go: [`Stdout`] for the CLI, [`Transcript`] when the
//! lines must be observed (scenario reports, tests).

/// Destination for console lines.
pub trait Console {
    /// Emit one line.
    fn emit(&mut self, line: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl Console for Stdout {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Records lines in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of recorded lines equal to `line`.
    pub fn count(&self, line: &str) -> usize {
        self.lines.iter().filter(|l| *l == line).count()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Console for Transcript {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}
