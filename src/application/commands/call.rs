//! Closure-backed commands

use std::fmt;

use crate::application::command::Command;
use crate::application::error::DispatchResult;
use crate::domain::Status;
use crate::infrastructure::traits::Output;

/// Turns a closure into a command.
pub struct Call<F> {
    name: String,
    description: String,
    callable: F,
}

impl<F> Call<F>
where
    F: Fn(&[String], &mut dyn Output) -> DispatchResult<Status>,
{
    pub fn new(name: impl Into<String>, callable: F) -> Self {
        Self {
            name: name.into(),
            description: "This command accepts a callable and invokes it as execution".to_string(),
            callable,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl<F> Command for Call<F>
where
    F: Fn(&[String], &mut dyn Output) -> DispatchResult<Status>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<Status> {
        (self.callable)(args, output)
    }
}

impl<F> fmt::Debug for Call<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
