//! Built-in commands

pub mod call;
pub mod help;
pub mod list;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::application::registry::Registry;
use crate::domain::ExecutionError;

pub use call::Call;
pub use help::HelpCommand;
pub use list::ListCommand;

/// Registry handle held by commands that inspect their own application.
pub type RegistryHandle = Weak<RefCell<Registry>>;

fn upgrade(handle: &RegistryHandle) -> Result<Rc<RefCell<Registry>>, ExecutionError> {
    handle
        .upgrade()
        .ok_or_else(|| ExecutionError::new("application registry is no longer available"))
}
