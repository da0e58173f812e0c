//! Error handlers invoked by the process-wide error hook

use crate::application::trace::TraceFormatter;
use crate::domain::Reportable;
use crate::infrastructure::traits::Output;

/// What a handler tells the hook after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerSignal {
    /// Let the next handler run.
    Done,
    /// Output is final; stop the chain.
    Quit,
}

pub trait Handler: Send + Sync {
    fn handle(&self, report: &dyn Reportable, output: &mut dyn Output) -> HandlerSignal;
}

/// Writes a one-line summary plus the rendered trace.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHandler {
    formatter: TraceFormatter,
}

impl ConsoleHandler {
    pub fn new(formatter: TraceFormatter) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &TraceFormatter {
        &self.formatter
    }

    pub fn formatter_mut(&mut self) -> &mut TraceFormatter {
        &mut self.formatter
    }

    /// `<Type>: <message> in file <file> on line <line><trace>\n`
    pub fn render(&self, report: &dyn Reportable) -> String {
        let location = report.location();
        format!(
            "{}: {} in file {} on line {}{}\n",
            report.type_name(),
            report,
            location.file,
            location.line,
            self.formatter.render(report)
        )
    }
}

impl Handler for ConsoleHandler {
    fn handle(&self, report: &dyn Reportable, output: &mut dyn Output) -> HandlerSignal {
        output.write(&self.render(report));
        HandlerSignal::Quit
    }
}
