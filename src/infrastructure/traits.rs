//! I/O boundary traits for testability
//!
//! Commands and error handlers only ever see the `Output` trait, so they can
//! be exercised against an in-memory buffer.

use std::io::{self, Write};

use colored::Colorize;

/// Semantic style for a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Info,
    Comment,
    Warning,
    Error,
}

/// Text sink handed to every command invocation.
pub trait Output {
    /// Write text as-is.
    fn write(&mut self, text: &str);

    /// Write text followed by a newline.
    fn line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Write one line with a semantic style.
    fn styled(&mut self, style: Style, text: &str);

    /// Write rows as aligned columns.
    fn table(&mut self, rows: &[Vec<String>]);
}

/// Render rows as left-aligned columns separated by two spaces.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut rendered = String::new();
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if col + 1 == row.len() {
                    cell.clone()
                } else {
                    format!("{:<width$}", cell, width = widths[col])
                }
            })
            .collect();
        rendered.push_str(&cells.join("  "));
        rendered.push('\n');
    }
    rendered
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Terminal output with colors.
///
/// Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
pub struct TerminalOutput {
    writer: Box<dyn Write + Send>,
}

impl TerminalOutput {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }
}

impl Output for TerminalOutput {
    fn write(&mut self, text: &str) {
        self.writer.write_all(text.as_bytes()).ok();
        self.writer.flush().ok();
    }

    fn styled(&mut self, style: Style, text: &str) {
        let painted = match style {
            Style::Info => text.green(),
            Style::Comment => text.yellow(),
            Style::Warning => text.yellow().bold(),
            Style::Error => text.red().bold(),
        };
        self.line(&painted.to_string());
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        self.write(&render_table(rows));
    }
}

/// In-memory output, plain text only.
#[derive(Debug, Default, Clone)]
pub struct BufferOutput {
    buffer: String,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn into_contents(self) -> String {
        self.buffer
    }
}

impl Output for BufferOutput {
    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn styled(&mut self, _style: Style, text: &str) {
        self.line(text);
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        self.buffer.push_str(&render_table(rows));
    }
}
