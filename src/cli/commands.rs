//! The command set bundled with the `cmdroute` binary

use std::sync::Arc;

use tracing::instrument;

use crate::application::{
    command_ref, Application, ApplicationError, Call, Collection, CommandRef, ConsoleHandler,
    TraceFormatter,
};
use crate::cli::error::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::{ExecutionError, Status};
use crate::infrastructure::traits::Style;
use crate::infrastructure::Runner;

/// Application with the bundled commands, configured from `settings`.
#[instrument(level = "debug", skip(settings))]
pub fn build_application(settings: &Settings) -> CliResult<Application> {
    let mut app = Application::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    app.set_auto_exit(settings.auto_exit);
    app.add_all([greet(), exit(), config(settings)?]);
    app.set_default(settings.default_command.as_str())
        .map_err(|e| ApplicationError::Config {
            message: format!("default_command: {e}"),
        })?;
    Ok(app)
}

/// Error hook rendering errors with the configured trace options.
pub fn build_error_hook(settings: &Settings) -> Arc<Runner> {
    let handler = ConsoleHandler::new(TraceFormatter::new(settings.trace_options()));
    Arc::new(Runner::new().with_handler(handler))
}

fn greet() -> CommandRef {
    command_ref(
        Call::new("greet", |args, out| {
            let name = if args.is_empty() {
                "World".to_string()
            } else {
                args.join(" ")
            };
            out.line(&format!("Hello, {name}!"));
            Ok(Status::Empty)
        })
        .with_description("Greets someone"),
    )
}

/// Returns its argument as the exit status; non-numeric values become 0.
fn exit() -> CommandRef {
    command_ref(
        Call::new("exit", |args, _out| {
            Ok(args.first().cloned().map(Status::Value).unwrap_or_default())
        })
        .with_description("Exits with the given status"),
    )
}

fn config(settings: &Settings) -> CliResult<CommandRef> {
    let effective = settings.clone();
    let show = Call::new("show", move |_args, out| {
        let text = effective
            .to_toml()
            .map_err(|e| ExecutionError::caused_by("cannot render configuration", e))?;
        out.write(&text);
        Ok(Status::Empty)
    })
    .with_description("Shows the effective configuration");

    let template = Call::new("template", |_args, out| {
        out.write(&Settings::template());
        Ok(Status::Empty)
    })
    .with_description("Prints a configuration template");

    let path = Call::new("path", |_args, out| match global_config_path() {
        Some(path) => {
            out.line(&path.display().to_string());
            Ok(Status::Empty)
        }
        None => {
            out.styled(Style::Warning, "no configuration directory on this platform");
            Ok(Status::Code(1))
        }
    })
    .with_description("Prints the global configuration file path");

    let mut collection = Collection::new("config")
        .with_description("Inspects configuration")
        .with(command_ref(show))
        .with(command_ref(template))
        .with(command_ref(path));
    collection
        .set_default("show")
        .map_err(|e| ApplicationError::Config {
            message: format!("config collection: {e}"),
        })?;

    Ok(command_ref(collection))
}
