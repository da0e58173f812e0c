use std::process;

use clap::Parser;
use cmdroute::cli::error::{CliError, CliResult};
use cmdroute::cli::{build_application, build_error_hook, output, Cli};
use cmdroute::config::Settings;
use cmdroute::infrastructure::{ErrorHook, TerminalOutput};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            // Dispatch errors were already rendered by the error hook.
            if !matches!(e, CliError::Dispatch(_)) {
                output::error(&e);
            }
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> CliResult<i32> {
    let settings = Settings::load(cli.config_dir.as_deref())?;
    let mut app = build_application(&settings)?;

    let hook = build_error_hook(&settings);
    app.set_error_hook(Some(hook.clone()));

    match app.run(&cli.args, &mut TerminalOutput::stdout()) {
        Ok(code) => Ok(code),
        Err(e) => {
            hook.handle(&e, &mut TerminalOutput::stderr());
            Err(e.into())
        }
    }
}

fn setup_logging(verbosity: u8) {
    tracing::debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["config::", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
