//! Top-level application: owns the command registry and dispatches one invocation

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::command::CommandRef;
use crate::application::commands::{HelpCommand, ListCommand};
use crate::application::error::{DispatchError, DispatchResult};
use crate::application::registry::{DefaultTarget, Registry};
use crate::domain::{CommandNotFound, Frame, SourceLocation};
use crate::exitcode;
use crate::infrastructure::hook::ErrorHook;
use crate::infrastructure::traits::Output;

/// Console application.
///
/// Setup (registration) happens before dispatch; the registry is never
/// mutated while a command runs.
pub struct Application {
    name: Option<String>,
    version: Option<String>,
    registry: Rc<RefCell<Registry>>,
    auto_exit: bool,
    error_hook: Option<Arc<dyn ErrorHook>>,
}

impl Default for Application {
    fn default() -> Self {
        Self::build(None, None)
    }
}

impl Application {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::build(Some(name.into()), Some(version.into()))
    }

    /// Registers `help` and `list`; `list` is the default command.
    fn build(name: Option<String>, version: Option<String>) -> Self {
        let mut app = Self {
            name,
            version,
            registry: Rc::new(RefCell::new(Registry::new())),
            auto_exit: true,
            error_hook: None,
        };

        let handle = Rc::downgrade(&app.registry);
        let help: CommandRef = Rc::new(HelpCommand::new(handle.clone(), app.long_version()));
        let list: CommandRef = Rc::new(ListCommand::new(handle));
        app.add_all([help, list.clone()]);
        if let Err(e) = app.set_default(list) {
            debug!(error = %e, "built-in default command rejected");
        }
        app
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn long_version(&self) -> String {
        match (&self.name, &self.version) {
            (Some(name), Some(version)) => format!("{name} version {version}"),
            _ => "Console application".to_string(),
        }
    }

    pub fn add(&mut self, command: CommandRef) {
        self.registry.borrow_mut().add(command);
    }

    pub fn add_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = CommandRef>,
    {
        self.registry.borrow_mut().add_all(commands);
    }

    #[track_caller]
    pub fn get(&self, name: &str) -> Result<CommandRef, CommandNotFound> {
        self.registry.borrow().get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.registry.borrow().has(name)
    }

    #[track_caller]
    pub fn set_default(&mut self, target: impl Into<DefaultTarget>) -> Result<(), CommandNotFound> {
        self.registry.borrow_mut().set_default(target)
    }

    pub fn default_command(&self) -> Option<String> {
        self.registry.borrow().default_name().map(str::to_string)
    }

    /// Names of all registered commands, sorted.
    pub fn command_names(&self) -> Vec<String> {
        self.registry
            .borrow()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Exit the process after `run` instead of returning the code.
    pub fn set_auto_exit(&mut self, auto_exit: bool) {
        self.auto_exit = auto_exit;
    }

    pub fn auto_exit(&self) -> bool {
        self.auto_exit
    }

    /// Replace the process-wide error hook.
    ///
    /// The previous hook is unregistered, the new one registered.
    pub fn set_error_hook(&mut self, hook: Option<Arc<dyn ErrorHook>>) {
        if let Some(previous) = self.error_hook.take() {
            previous.unregister();
        }
        if let Some(hook) = &hook {
            Arc::clone(hook).register();
        }
        self.error_hook = hook;
    }

    pub fn error_hook(&self) -> Option<&Arc<dyn ErrorHook>> {
        self.error_hook.as_ref()
    }

    /// Run one invocation and return its exit code.
    ///
    /// With auto-exit on, codes above 255 are clamped and the process exits.
    pub fn run(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<i32> {
        let code = self.dispatch(args, output)?;
        let code = exitcode::normalize(code, self.auto_exit);

        if self.auto_exit {
            info!(code, "exiting");
            std::process::exit(code);
        }
        Ok(code)
    }

    /// Run one invocation without exiting or clamping.
    pub fn execute(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<i32> {
        self.dispatch(args, output)
            .map(|code| exitcode::normalize(code, false))
    }

    #[instrument(level = "debug", skip(self, output))]
    fn dispatch(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<i64> {
        let frame = || {
            Frame::new("execute", SourceLocation::new(file!(), line!()))
                .in_class("Application")
                .with_arg(args.to_vec())
        };

        let args = match args.first().map(String::as_str) {
            Some("-V" | "--version") => {
                output.line(&self.long_version());
                return Ok(0);
            }
            Some("-h" | "--help") => {
                let mut routed = vec!["help".to_string()];
                routed.extend_from_slice(&args[1..]);
                routed
            }
            _ => args.to_vec(),
        };

        // The borrow ends before the command runs, so commands may read the registry.
        let (command, rest) = self
            .registry
            .borrow()
            .resolve(&args)
            .map_err(|e| DispatchError::from(e).unwind(frame()))?;
        debug!(command = command.name(), "executing");

        let status = command
            .execute(rest, output)
            .map_err(|e| e.unwind(frame()))?;
        Ok(status.code())
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("registry", &self.registry.borrow())
            .field("auto_exit", &self.auto_exit)
            .field("error_hook", &self.error_hook.is_some())
            .finish()
    }
}
