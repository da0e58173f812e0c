//! `help`: usage and per-command descriptions

use crate::application::command::Command;
use crate::application::commands::{upgrade, RegistryHandle};
use crate::application::error::DispatchResult;
use crate::domain::Status;
use crate::infrastructure::traits::{Output, Style};

pub struct HelpCommand {
    registry: RegistryHandle,
    long_version: String,
}

impl HelpCommand {
    pub fn new(registry: RegistryHandle, long_version: impl Into<String>) -> Self {
        Self {
            registry,
            long_version: long_version.into(),
        }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Displays help for a command"
    }

    /// `help [name [sub-name ...]]`
    fn execute(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<Status> {
        output.line(&self.long_version);
        output.line("");
        output.styled(Style::Comment, "Usage:");
        output.line("  command [arguments]");
        output.line("");

        let Some((first, rest)) = args.split_first() else {
            output.line("Run `list` to see available commands.");
            return Ok(Status::Empty);
        };

        let registry = upgrade(&self.registry)?;
        let mut command = registry.borrow().get(first)?;
        let mut path = vec![first.as_str()];
        for segment in rest {
            let next = match command.subcommands() {
                Some(nested) => nested.get(segment)?,
                None => break,
            };
            command = next;
            path.push(segment.as_str());
        }

        output.styled(Style::Info, &path.join(" "));
        output.line(&format!("  {}", command.description()));

        if let Some(nested) = command.subcommands() {
            let rows: Vec<Vec<String>> = nested
                .commands()
                .into_iter()
                .map(|c| vec![format!("  {}", c.name()), c.description().to_string()])
                .collect();
            output.line("");
            output.styled(Style::Comment, "Sub-commands:");
            output.table(&rows);
        }
        Ok(Status::Empty)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::application::error::DispatchError;
    use crate::application::registry::Registry;
    use crate::infrastructure::traits::BufferOutput;

    #[test]
    fn given_unknown_command_when_asking_help_then_not_found() {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let help = HelpCommand::new(Rc::downgrade(&registry), "demo version 1");

        let mut out = BufferOutput::new();
        let err = help.execute(&["ghost".to_string()], &mut out).unwrap_err();

        assert!(matches!(err, DispatchError::NotFound(ref e) if e.name() == "ghost"));
    }

    #[test]
    fn given_dropped_registry_when_asking_help_then_execution_error() {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let help = HelpCommand::new(Rc::downgrade(&registry), "demo version 1");
        drop(registry);

        let mut out = BufferOutput::new();
        let err = help.execute(&["list".to_string()], &mut out).unwrap_err();

        assert!(matches!(err, DispatchError::Execution(_)));
    }
}
