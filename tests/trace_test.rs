//! Error reporting for failures escaping dispatch: summary line plus stack trace.

use std::sync::Arc;

use cmdroute::application::{FunctionArgs, TraceRenderOptions};
use cmdroute::domain::Reportable;
use cmdroute::infrastructure::ErrorHook;
use cmdroute::{
    command_ref, Application, BufferOutput, Call, Collection, ConsoleHandler, DispatchError,
    ExecutionError, Runner, TraceFormatter,
};

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `db migrate` fails; the error unwinds through the collection and the application.
fn failing_dispatch() -> DispatchError {
    let mut app = Application::new("demo", "1.0.0");
    app.set_auto_exit(false);
    app.add(command_ref(Collection::new("db").with(command_ref(Call::new(
        "migrate",
        |_args, _out| Err(ExecutionError::new("migration failed").into()),
    )))));

    let mut out = BufferOutput::new();
    app.execute(&args(&["db", "migrate", "up"]), &mut out)
        .unwrap_err()
}

fn handler(options: TraceRenderOptions) -> ConsoleHandler {
    ConsoleHandler::new(TraceFormatter::new(options))
}

#[test]
fn given_failed_dispatch_when_rendering_then_summary_and_numbered_frames() {
    let err = failing_dispatch();
    let location = err.location().clone();

    let rendered = ConsoleHandler::default().render(&err);

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines[0],
        format!(
            "ExecutionError: migration failed in file {} on line {}",
            location.file, location.line
        )
    );
    assert_eq!(lines[1], "Stack trace:");
    assert!(lines[2].starts_with("  1. Collection->execute() "));
    assert!(lines[3].starts_with("  2. Application->execute() "));
    assert_eq!(lines.len(), 4);
    assert!(rendered.ends_with('\n'));
}

#[test]
fn given_first_frame_args_when_rendering_then_only_first_frame_dumped() {
    let err = failing_dispatch();
    let options = TraceRenderOptions {
        function_args: FunctionArgs::First(1),
        ..TraceRenderOptions::default()
    };

    let rendered = handler(options).render(&err);

    let (first, second) = rendered
        .split_once("  2. Application->execute()")
        .expect("second frame");
    assert!(first.contains("   |     \"db\","));
    assert!(first.contains("   |         \"up\","));
    assert!(!second.contains("   | "));
}

#[test]
fn given_small_args_limit_when_rendering_then_dumps_discarded() {
    let err = failing_dispatch();
    let options = TraceRenderOptions {
        function_args: FunctionArgs::Flag(true),
        function_args_limit: 4,
        ..TraceRenderOptions::default()
    };

    let rendered = handler(options).render(&err);

    assert_eq!(
        rendered
            .matches("   | Arguments dump length greater than 4 Bytes. Discarded.")
            .count(),
        2
    );
}

#[test]
fn given_unknown_command_when_rendering_then_trace_suppressed_unless_internal_included() {
    let mut app = Application::default();
    app.set_auto_exit(false);
    let mut out = BufferOutput::new();
    let err = app.execute(&args(&["nope"]), &mut out).unwrap_err();

    let plain = ConsoleHandler::default().render(&err);
    assert!(plain.starts_with("CommandNotFound: command \"nope\" is not defined"));
    assert!(!plain.contains("Stack trace:"));

    let options = TraceRenderOptions {
        include_internal: true,
        ..TraceRenderOptions::default()
    };
    let full = handler(options).render(&err);
    assert!(full.contains("\nStack trace:\n  1. Application->execute() "));
}

#[test]
fn given_trace_disabled_when_rendering_then_summary_only() {
    let err = failing_dispatch();
    let options = TraceRenderOptions {
        add_trace: false,
        ..TraceRenderOptions::default()
    };

    let rendered = handler(options).render(&err);

    assert_eq!(rendered.lines().count(), 1);
}

#[test]
fn given_runner_when_application_swaps_hooks_then_only_latest_is_registered() {
    let first = Arc::new(Runner::new().with_handler(ConsoleHandler::default()));
    let second = Arc::new(Runner::new().with_handler(ConsoleHandler::default()));

    let mut app = Application::default();
    app.set_error_hook(Some(first.clone()));
    assert!(first.is_registered());

    app.set_error_hook(Some(second.clone()));
    assert!(!first.is_registered());
    assert!(second.is_registered());

    app.set_error_hook(None);
    assert!(!second.is_registered());
    assert!(app.error_hook().is_none());
}

#[test]
fn given_runner_when_handling_dispatch_error_then_console_output_written() {
    let runner = Runner::new().with_handler(ConsoleHandler::default());
    let err = failing_dispatch();

    let mut out = BufferOutput::new();
    runner.handle(&err, &mut out);

    assert!(out.contents().starts_with("ExecutionError: migration failed"));
    assert!(out.contents().contains("Stack trace:"));
}

#[test]
fn given_command_error_hiding_its_trace_when_rendering_then_summary_unless_internal_included() {
    let mut app = Application::default();
    app.set_auto_exit(false);
    app.add(command_ref(Call::new("quiet", |_args, _out| {
        Err(ExecutionError::new("expected failure").hide_trace().into())
    })));
    let mut out = BufferOutput::new();
    let err = app.execute(&args(&["quiet"]), &mut out).unwrap_err();

    let plain = ConsoleHandler::default().render(&err);
    assert!(plain.starts_with("ExecutionError: expected failure in file "));
    assert!(!plain.contains("Stack trace:"));

    let options = TraceRenderOptions {
        include_internal: true,
        ..TraceRenderOptions::default()
    };
    let full = handler(options).render(&err);
    assert!(full.contains("\nStack trace:\n  1. Application->execute() "));
}
