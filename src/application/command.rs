//! The command contract

use std::rc::Rc;

use crate::application::error::DispatchResult;
use crate::application::registry::Registry;
use crate::domain::Status;
use crate::infrastructure::traits::Output;

/// Unit of executable behavior, invoked by name.
///
/// Names have to be set explicitly. A name may contain `:` segments, but
/// routing only ever looks at one segment per registry level.
pub trait Command {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run with the arguments left after routing.
    fn execute(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<Status>;

    /// Nested registry for commands that route further.
    fn subcommands(&self) -> Option<&Registry> {
        None
    }
}

/// Shared handle to a registered command.
pub type CommandRef = Rc<dyn Command>;
