// tests/console_bridge.rs

use std::error::Error;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};

use streamtap::config::{ConsoleConfig, ConsoleTarget};
use streamtap::console::{Console, HostConsole, log_line};
use streamtap::errors::StreamtapError;
use streamtap::intercept::{Consumer, InterceptMode};
use streamtap::streams::{Stream, Streams};
use streamtap_test_utils::{CaptureSink, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;
type Lines = Arc<Mutex<Vec<String>>>;

/// A host console whose print functions record into two vectors.
fn recording_console() -> (Arc<HostConsole>, Lines, Lines) {
    let printed: Lines = Arc::default();
    let errors: Lines = Arc::default();

    let mut console = HostConsole::new();
    {
        let printed = Arc::clone(&printed);
        console.set_stdout_fn(move |text| printed.lock().unwrap().push(text.to_string()));
    }
    {
        let errors = Arc::clone(&errors);
        console.set_stderr_fn(move |text| errors.lock().unwrap().push(text.to_string()));
    }

    (Arc::new(console), printed, errors)
}

#[test]
fn attach_routes_stdout_plain_and_stderr_in_red() -> TestResult {
    init_tracing();

    let (console, printed, errors) = recording_console();
    let out = CaptureSink::new();
    let err = CaptureSink::new();
    let mut streams = Streams::new(out.clone(), err.clone());

    {
        let mut redirect = console.attach(&mut streams);
        redirect.stdout().write_all(b"Hello, World!")?;
        redirect.stdout().write_all(b"\n")?;
        redirect.stderr().write_all(b"oops")?;
        redirect.stderr().write_all(b"\n")?;
        redirect.restore()?;
    }

    assert_eq!(*printed.lock().unwrap(), vec!["Hello, World!\n"]);
    assert_eq!(*errors.lock().unwrap(), vec!["[color=red]oops\n[/color]"]);
    assert_eq!(out.text(), "Hello, World!\n");
    assert_eq!(err.text(), "oops\n");
    Ok(())
}

#[test]
fn console_consumer_picks_print_function_by_stream() -> TestResult {
    let (console, printed, errors) = recording_console();

    console.consumer(Stream::Stdout).consume("to stdout")?;
    console.consumer(Stream::Stderr).consume("to stderr")?;
    console.emit(Stream::Stderr, "direct");

    assert_eq!(*printed.lock().unwrap(), vec!["to stdout"]);
    assert_eq!(*errors.lock().unwrap(), vec!["to stderr", "direct"]);
    Ok(())
}

#[test]
fn attach_with_custom_modes() -> TestResult {
    let (console, printed, errors) = recording_console();
    let mut streams = Streams::new(CaptureSink::new(), CaptureSink::new());

    {
        let mut redirect = console.attach_with(
            &mut streams,
            InterceptMode::Passthrough,
            InterceptMode::Passthrough,
        );
        redirect.stdout().write_all(b"now")?;
        redirect.stderr().write_all(b"also now")?;
        assert_eq!(*printed.lock().unwrap(), vec!["now"]);
        assert_eq!(*errors.lock().unwrap(), vec!["also now"]);
    }
    Ok(())
}

#[test]
fn file_console_appends_both_streams() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("console.log");
    fs::write(&path, "earlier\n")?;

    let cfg = ConsoleConfig {
        target: ConsoleTarget::File,
        path: Some(path.clone()),
    };
    let console = Console::open(&cfg)?;
    let mut streams = Streams::new(CaptureSink::new(), CaptureSink::new());

    {
        let mut redirect = console.attach(
            &mut streams,
            InterceptMode::plain_lines(),
            InterceptMode::error_lines(),
        );
        redirect.stdout().write_all(b"out")?;
        redirect.stdout().write_all(b"\n")?;
        redirect.stderr().write_all(b"err")?;
        redirect.stderr().write_all(b"\n")?;
    }

    let contents = fs::read_to_string(&path)?;
    assert_eq!(contents, "earlier\nout\n[color=red]err\n[/color]");
    Ok(())
}

#[test]
fn file_console_without_path_is_rejected() {
    let cfg = ConsoleConfig {
        target: ConsoleTarget::File,
        path: None,
    };

    match Console::open(&cfg) {
        Err(StreamtapError::ConfigError(msg)) => assert!(msg.contains("path")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn inherit_console_writes_decorated_lines_to_its_writers() -> TestResult {
    let out = CaptureSink::new();
    let err = CaptureSink::new();
    let console = Console::inherit(out.clone(), err.clone());
    let mut streams = Streams::new(std::io::sink(), std::io::sink());

    {
        let mut redirect = console.attach(
            &mut streams,
            InterceptMode::plain_lines(),
            InterceptMode::error_lines(),
        );
        redirect.stdout().write_all(b"hi")?;
        redirect.stdout().write_all(b"\n")?;
        redirect.stderr().write_all(b"oops")?;
        redirect.stderr().write_all(b"\n")?;
    }

    assert_eq!(out.text(), "hi\n");
    assert_eq!(err.text(), "[color=red]oops\n[/color]");
    Ok(())
}

#[test]
fn log_lines_fold_decorated_text_onto_one_line() {
    assert_eq!(log_line("[color=red]oops\n[/color]"), "[color=red]oops[/color]");
    assert_eq!(log_line("[color=red]oops\r\n[/color]"), "[color=red]oops[/color]");
    assert_eq!(log_line("Hello, World!\n"), "Hello, World!");
    assert_eq!(log_line("partial"), "partial");
}
