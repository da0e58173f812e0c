//! Process-wide error hook
//!
//! The `Runner` keeps a stack of handlers. Registered, it becomes the panic
//! hook of the process; the binary also feeds it the errors returned by
//! dispatch.

use std::fmt;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::application::handler::{Handler, HandlerSignal};
use crate::domain::{Frame, Reportable, SourceLocation};
use crate::infrastructure::traits::{Output, TerminalOutput};

/// Collaborator owning the process-wide uncaught-error hook.
pub trait ErrorHook: Send + Sync {
    /// Install as the process hook.
    fn register(self: Arc<Self>);

    /// Remove from the process hook, restoring the default.
    fn unregister(&self);

    fn is_registered(&self) -> bool;

    /// Pass an error through the handler chain.
    fn handle(&self, report: &dyn Reportable, output: &mut dyn Output) -> HandlerSignal;
}

/// Ordered handler stack; the most recently pushed handler runs first.
#[derive(Default)]
pub struct Runner {
    handlers: Vec<Arc<dyn Handler>>,
    registered: AtomicBool,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_handler(&mut self, handler: impl Handler + 'static) {
        self.handlers.push(Arc::new(handler));
    }

    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.push_handler(handler);
        self
    }

    pub fn pop_handler(&mut self) -> Option<Arc<dyn Handler>> {
        self.handlers.pop()
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }
}

impl ErrorHook for Runner {
    fn register(self: Arc<Self>) {
        if self.registered.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(handlers = self.handlers.len(), "registering error hook");

        let runner = Arc::clone(&self);
        panic::set_hook(Box::new(move |info| {
            let report = PanicReport::from_hook_info(info);
            runner.handle(&report, &mut TerminalOutput::stderr());
        }));
    }

    fn unregister(&self) {
        if self.registered.swap(false, Ordering::SeqCst) {
            debug!("unregistering error hook");
            drop(panic::take_hook());
        }
    }

    fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    fn handle(&self, report: &dyn Reportable, output: &mut dyn Output) -> HandlerSignal {
        for handler in self.handlers.iter().rev() {
            if handler.handle(report, output) == HandlerSignal::Quit {
                return HandlerSignal::Quit;
            }
        }
        HandlerSignal::Done
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("handlers", &self.handlers.len())
            .field("registered", &self.is_registered())
            .finish()
    }
}

/// A panic seen by the hook, reported like any other error.
#[derive(Debug, Clone)]
pub struct PanicReport {
    message: String,
    location: SourceLocation,
    frames: Vec<Frame>,
}

impl PanicReport {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
            frames: Vec::new(),
        }
    }

    pub fn from_hook_info(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "Box<dyn Any>".to_string());
        let location = info
            .location()
            .map(SourceLocation::from)
            .unwrap_or_else(|| SourceLocation::new("<unknown>", 0));
        Self::new(message, location)
    }
}

impl fmt::Display for PanicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Reportable for PanicReport {
    fn type_name(&self) -> &str {
        "panic"
    }

    fn location(&self) -> &SourceLocation {
        &self.location
    }

    fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::handler::ConsoleHandler;
    use crate::domain::ExecutionError;
    use crate::infrastructure::traits::BufferOutput;

    /// Records its label on every call.
    struct Probe {
        label: &'static str,
        signal: HandlerSignal,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Handler for Probe {
        fn handle(&self, _report: &dyn Reportable, _output: &mut dyn Output) -> HandlerSignal {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(self.label);
            }
            self.signal
        }
    }

    fn probe(
        label: &'static str,
        signal: HandlerSignal,
        calls: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Probe {
        Probe {
            label,
            signal,
            calls: Arc::clone(calls),
        }
    }

    #[test]
    fn given_handlers_when_handling_then_latest_runs_first_and_quit_stops_chain() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = Runner::new()
            .with_handler(probe("first", HandlerSignal::Done, &calls))
            .with_handler(probe("second", HandlerSignal::Quit, &calls))
            .with_handler(probe("third", HandlerSignal::Done, &calls));

        let mut out = BufferOutput::new();
        let signal = runner.handle(&ExecutionError::new("x"), &mut out);

        assert_eq!(signal, HandlerSignal::Quit);
        assert_eq!(*calls.lock().unwrap(), ["third", "second"]);
    }

    #[test]
    fn given_no_quitting_handler_when_handling_then_done() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = Runner::new().with_handler(probe("only", HandlerSignal::Done, &calls));

        let mut out = BufferOutput::new();
        assert_eq!(
            runner.handle(&ExecutionError::new("x"), &mut out),
            HandlerSignal::Done
        );
    }

    #[test]
    fn given_console_handler_when_handling_panic_report_then_summary_line() {
        let runner = Runner::new().with_handler(ConsoleHandler::default());
        let report = PanicReport::new("index out of bounds", SourceLocation::new("src/x.rs", 9));

        let mut out = BufferOutput::new();
        runner.handle(&report, &mut out);

        assert_eq!(
            out.contents(),
            "panic: index out of bounds in file src/x.rs on line 9\nStack trace:\n"
        );
    }

    #[test]
    fn given_runner_when_registering_twice_and_unregistering_then_state_tracks() {
        let runner = Arc::new(Runner::new());
        Arc::clone(&runner).register();
        Arc::clone(&runner).register();
        assert!(runner.is_registered());

        runner.unregister();
        assert!(!runner.is_registered());
    }
}
