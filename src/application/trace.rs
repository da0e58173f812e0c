//! Plain-text stack trace rendering for captured errors

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::{Frame, Reportable};

/// Prefix for every line of a frame's argument dump.
pub const VAR_DUMP_PREFIX: &str = "   | ";

/// Default size limit in bytes for an argument dump.
pub const DEFAULT_FUNCTION_ARGS_LIMIT: usize = 1024;

/// Which frames get an argument dump.
///
/// Deserializes from `true`/`false` or a frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionArgs {
    /// All frames (`true`) or none (`false`).
    Flag(bool),
    /// Only the first N frames.
    First(usize),
}

impl FunctionArgs {
    /// Whether the frame at 1-based `line` gets its arguments dumped.
    pub fn dumps(self, line: usize) -> bool {
        match self {
            FunctionArgs::Flag(all) => all,
            FunctionArgs::First(limit) => line <= limit,
        }
    }
}

impl Default for FunctionArgs {
    fn default() -> Self {
        FunctionArgs::Flag(false)
    }
}

impl From<bool> for FunctionArgs {
    fn from(all: bool) -> Self {
        FunctionArgs::Flag(all)
    }
}

impl From<usize> for FunctionArgs {
    fn from(limit: usize) -> Self {
        FunctionArgs::First(limit)
    }
}

/// Settings applied to every subsequent render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRenderOptions {
    pub add_trace: bool,
    pub function_args: FunctionArgs,
    pub function_args_limit: usize,
    /// Show traces even for errors that hide them by default.
    pub include_internal: bool,
}

impl Default for TraceRenderOptions {
    fn default() -> Self {
        Self {
            add_trace: true,
            function_args: FunctionArgs::default(),
            function_args_limit: DEFAULT_FUNCTION_ARGS_LIMIT,
            include_internal: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TraceFormatter {
    options: TraceRenderOptions,
}

impl TraceFormatter {
    pub fn new(options: TraceRenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TraceRenderOptions {
        &self.options
    }

    pub fn set_add_trace(&mut self, add_trace: bool) {
        self.options.add_trace = add_trace;
    }

    /// `true` for all frames, a number for the first N frames.
    pub fn set_function_args(&mut self, function_args: impl Into<FunctionArgs>) {
        self.options.function_args = function_args.into();
    }

    /// Dumps longer than `limit` bytes are discarded.
    pub fn set_function_args_limit(&mut self, limit: usize) {
        self.options.function_args_limit = limit;
    }

    pub fn set_include_internal(&mut self, include_internal: bool) {
        self.options.include_internal = include_internal;
    }

    /// Whether a trace is rendered for this error at all.
    pub fn can_add_trace(&self, report: &dyn Reportable) -> bool {
        if !self.options.add_trace {
            return false;
        }
        self.options.include_internal
            || report
                .trace_control()
                .map_or(true, |control| control.can_add_trace())
    }

    /// Trace segment for `report`, empty when suppressed.
    pub fn render(&self, report: &dyn Reportable) -> String {
        if !self.can_add_trace(report) {
            return String::new();
        }
        self.trace(report.frames())
    }

    /// `Stack trace:` header followed by one line per frame, numbered from 1.
    pub fn trace(&self, frames: &[Frame]) -> String {
        let mut response = String::from("\nStack trace:");

        for (index, frame) in frames.iter().enumerate() {
            let line = index + 1;
            let args = if self.options.function_args.dumps(line) {
                self.frame_args(frame)
            } else {
                String::new()
            };

            let callee = match frame.class() {
                Some(class) => format!("{}->{}", class, frame.function()),
                None => frame.function().to_string(),
            };

            response.push_str(&format!(
                "\n{:>3}. {}() {}:{}{}",
                line,
                callee,
                frame.file(),
                frame.line(),
                args
            ));
        }

        response
    }

    fn frame_args(&self, frame: &Frame) -> String {
        let dump = frame.args_dump();
        let limit = self.options.function_args_limit;

        if dump.len() > limit {
            return format!(
                "\n{VAR_DUMP_PREFIX}Arguments dump length greater than {limit} Bytes. Discarded."
            );
        }

        format!(
            "\n{}",
            dump.lines()
                .map(|line| format!("{VAR_DUMP_PREFIX}{line}"))
                .join("\n")
        )
    }
}
