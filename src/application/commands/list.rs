//! `list`: shows the commands registered in the application

use termtree::Tree;

use crate::application::command::Command;
use crate::application::commands::{upgrade, RegistryHandle};
use crate::application::error::DispatchResult;
use crate::application::registry::Registry;
use crate::domain::Status;
use crate::infrastructure::traits::{Output, Style};

pub struct ListCommand {
    registry: RegistryHandle,
}

impl ListCommand {
    pub fn new(registry: RegistryHandle) -> Self {
        Self { registry }
    }
}

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "Lists commands registered in application"
    }

    fn execute(&self, args: &[String], output: &mut dyn Output) -> DispatchResult<Status> {
        let registry = upgrade(&self.registry)?;
        let registry = registry.borrow();

        if args.iter().any(|a| a == "--tree") {
            output.write(&to_tree("Available commands".to_string(), &registry).to_string());
            return Ok(Status::Empty);
        }

        let rows: Vec<Vec<String>> = registry
            .commands()
            .into_iter()
            .map(|c| vec![c.name().to_string(), c.description().to_string()])
            .collect();

        output.styled(Style::Comment, "Available commands:");
        output.table(&rows);
        Ok(Status::Empty)
    }
}

/// Nested collections become subtrees.
fn to_tree(root: String, registry: &Registry) -> Tree<String> {
    let leaves: Vec<Tree<String>> = registry
        .commands()
        .into_iter()
        .map(|c| match c.subcommands() {
            Some(nested) => to_tree(c.name().to_string(), nested),
            None => Tree::new(c.name().to_string()),
        })
        .collect();

    Tree::new(root).with_leaves(leaves)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::application::commands::Call;
    use crate::application::registry::command_ref;
    use crate::infrastructure::traits::BufferOutput;

    #[test]
    fn given_registry_when_listing_then_sorted_aligned_table() {
        let registry = Rc::new(RefCell::new(Registry::new()));
        registry.borrow_mut().add_all([
            command_ref(Call::new("zap", |_args, _out| Ok(Status::Empty)).with_description("Z")),
            command_ref(Call::new("go", |_args, _out| Ok(Status::Empty)).with_description("G")),
        ]);
        let list = ListCommand::new(Rc::downgrade(&registry));

        let mut out = BufferOutput::new();
        list.execute(&[], &mut out).unwrap();

        assert_eq!(out.contents(), "Available commands:\ngo   G\nzap  Z\n");
    }
}
