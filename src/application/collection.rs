//! Commands that route to sub-commands

use tracing::{debug, instrument};

use crate::application::command::{Command, CommandRef};
use crate::application::error::{DispatchError, DispatchResult};
use crate::application::registry::{DefaultTarget, Registry};
use crate::domain::{CommandNotFound, Frame, SourceLocation, Status};
use crate::infrastructure::traits::Output;

/// A command owning a private registry.
///
/// `execute` consumes the first remaining argument as a sub-command name and
/// delegates, so nesting collections gives chains like `db migrate up`.
#[derive(Debug)]
pub struct Collection {
    name: String,
    description: String,
    registry: Registry,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: "Collection of commands".to_string(),
            registry: Registry::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder form of `add`.
    pub fn with(mut self, command: CommandRef) -> Self {
        self.registry.add(command);
        self
    }

    pub fn add(&mut self, command: CommandRef) {
        self.registry.add(command);
    }

    pub fn add_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = CommandRef>,
    {
        self.registry.add_all(commands);
    }

    #[track_caller]
    pub fn get(&self, name: &str) -> Result<CommandRef, CommandNotFound> {
        self.registry.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.registry.has(name)
    }

    #[track_caller]
    pub fn set_default(&mut self, target: impl Into<DefaultTarget>) -> Result<(), CommandNotFound> {
        self.registry.set_default(target)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Command for Collection {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    #[instrument(level = "debug", skip(self, output), fields(collection = %self.name))]
    fn execute(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<Status> {
        let frame = || {
            Frame::new("execute", SourceLocation::new(file!(), line!()))
                .in_class("Collection")
                .with_arg(self.name.clone())
                .with_arg(args.to_vec())
        };

        let (command, rest) = self
            .registry
            .resolve(args)
            .map_err(|e| DispatchError::from(e).unwind(frame()))?;
        debug!(command = command.name(), "delegating to sub-command");

        command.execute(rest, output).map_err(|e| e.unwind(frame()))
    }

    fn subcommands(&self) -> Option<&Registry> {
        Some(&self.registry)
    }
}
