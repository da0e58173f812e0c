//! Name to command routing shared by the application and command collections

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::application::command::{Command, CommandRef};
use crate::domain::CommandNotFound;

/// What `Registry::set_default` points at.
pub enum DefaultTarget {
    /// A name that must already be registered.
    Name(String),
    /// A command that is registered first when its name is unknown.
    Command(CommandRef),
}

impl From<&str> for DefaultTarget {
    fn from(name: &str) -> Self {
        DefaultTarget::Name(name.to_string())
    }
}

impl From<String> for DefaultTarget {
    fn from(name: String) -> Self {
        DefaultTarget::Name(name)
    }
}

impl From<CommandRef> for DefaultTarget {
    fn from(command: CommandRef) -> Self {
        DefaultTarget::Command(command)
    }
}

/// Mapping from name to command plus an optional default name.
///
/// Keys always equal the command's own name. The default name, once set,
/// always resolves to a registered command.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, CommandRef>,
    default: Option<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its own name. Last write wins.
    pub fn add(&mut self, command: CommandRef) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            warn!(name = %name, "command replaced an earlier registration");
        } else {
            debug!(name = %name, "command registered");
        }
    }

    /// Register commands in order; later entries win on name collision.
    pub fn add_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = CommandRef>,
    {
        for command in commands {
            self.add(command);
        }
    }

    #[track_caller]
    pub fn get(&self, name: &str) -> Result<CommandRef, CommandNotFound> {
        match self.commands.get(name) {
            Some(command) => Ok(Rc::clone(command)),
            // No closure here: the error records the caller's location.
            None => Err(CommandNotFound::new(name, self.commands.keys().cloned())),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Make a command the fallback for an empty command name.
    ///
    /// A command whose name is not registered yet is added first. A bare name
    /// has to be registered already.
    #[track_caller]
    pub fn set_default(&mut self, target: impl Into<DefaultTarget>) -> Result<(), CommandNotFound> {
        let name = match target.into() {
            DefaultTarget::Name(name) => name,
            DefaultTarget::Command(command) => {
                let name = command.name().to_string();
                if !self.has(&name) {
                    self.add(command);
                }
                name
            }
        };

        if !self.has(&name) {
            return Err(CommandNotFound::new(name, self.commands.keys().cloned()));
        }
        debug!(name = %name, "default command set");
        self.default = Some(name);
        Ok(())
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Registered commands sorted by name.
    pub fn commands(&self) -> Vec<&CommandRef> {
        let mut commands: Vec<&CommandRef> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands().into_iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Split `args` into the command it names and the remaining arguments.
    ///
    /// A missing, empty or whitespace-only first token selects the default
    /// command.
    #[track_caller]
    pub fn resolve<'a>(
        &self,
        args: &'a [String],
    ) -> Result<(CommandRef, &'a [String]), CommandNotFound> {
        let (token, rest) = match args.split_first() {
            Some((first, rest)) => (first.as_str(), rest),
            None => ("", args),
        };

        let name = if token.trim().is_empty() {
            self.default.as_deref().unwrap_or(token)
        } else {
            token
        };
        debug!(name, remaining = rest.len(), "resolving command");

        Ok((self.get(name)?, rest))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .field("default", &self.default)
            .finish()
    }
}

/// Wrap a command for registration.
pub fn command_ref<C: Command + 'static>(command: C) -> CommandRef {
    Rc::new(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::DispatchResult;
    use crate::domain::Status;
    use crate::infrastructure::traits::Output;

    struct Named(&'static str, &'static str);

    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            self.1
        }

        fn execute(&self, _args: &[String], _output: &mut dyn Output) -> DispatchResult<Status> {
            Ok(Status::Empty)
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_added_command_when_get_then_returns_same_instance() {
        let mut registry = Registry::new();
        let list = command_ref(Named("list", "first"));
        registry.add(Rc::clone(&list));

        let found = registry.get("list").expect("registered");
        assert!(Rc::ptr_eq(&found, &list));
        assert!(registry.has("list"));
    }

    #[test]
    fn given_same_name_twice_when_adding_then_last_write_wins() {
        let mut registry = Registry::new();
        let second = command_ref(Named("x", "second"));
        registry.add_all([command_ref(Named("x", "first")), Rc::clone(&second)]);

        assert_eq!(registry.len(), 1);
        assert!(Rc::ptr_eq(&registry.get("x").unwrap(), &second));
    }

    #[test]
    fn given_unknown_name_when_get_then_not_found_carries_name() {
        let mut registry = Registry::new();
        registry.add(command_ref(Named("list", "")));

        let err = registry.get("nope").err().expect("missing");
        assert_eq!(err.name(), "nope");
        assert_eq!(err.known(), ["list"]);
        assert!(!registry.has("nope"));
    }

    #[test]
    fn given_unregistered_name_when_set_default_then_fails() {
        let mut registry = Registry::new();
        let err = registry.set_default("list").err().expect("not registered");
        assert_eq!(err.name(), "list");
        assert_eq!(registry.default_name(), None);
    }

    #[test]
    fn given_unregistered_command_when_set_default_then_registers_it() {
        let mut registry = Registry::new();
        registry.set_default(command_ref(Named("list", ""))).unwrap();

        assert!(registry.has("list"));
        assert_eq!(registry.default_name(), Some("list"));
    }

    #[test]
    fn given_registered_name_when_set_default_with_other_instance_then_keeps_original() {
        let mut registry = Registry::new();
        let original = command_ref(Named("list", "original"));
        registry.add(Rc::clone(&original));
        registry.set_default(command_ref(Named("list", "other"))).unwrap();

        assert!(Rc::ptr_eq(&registry.get("list").unwrap(), &original));
    }

    #[test]
    fn given_blank_token_when_resolving_then_uses_default() {
        let mut registry = Registry::new();
        registry.add_all([command_ref(Named("list", "")), command_ref(Named("help", ""))]);
        registry.set_default("list").unwrap();

        for input in [args(&[]), args(&[""]), args(&["  "])] {
            let (found, _) = registry.resolve(&input).unwrap();
            assert_eq!(found.name(), "list");
        }
    }

    #[test]
    fn given_name_and_args_when_resolving_then_splits_remaining() {
        let mut registry = Registry::new();
        registry.add(command_ref(Named("foo", "")));

        let input = args(&["foo", "a", "b"]);
        let (found, rest) = registry.resolve(&input).unwrap();
        assert_eq!(found.name(), "foo");
        assert_eq!(rest, ["a", "b"]);
    }

    #[test]
    fn given_no_default_when_resolving_empty_then_not_found() {
        let registry = Registry::new();
        let err = registry.resolve(&[]).err().expect("no default");
        assert_eq!(err.name(), "");
    }

    #[test]
    fn given_commands_when_listing_then_sorted_by_name() {
        let mut registry = Registry::new();
        registry.add_all([
            command_ref(Named("zeta", "")),
            command_ref(Named("alpha", "")),
            command_ref(Named("mid", "")),
        ]);
        assert_eq!(registry.names(), ["alpha", "mid", "zeta"]);
    }
}
