// tests/config_errors.rs

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use streamtap::config::{
    ConfigFile, ConsoleTarget, ModeKind, load_and_validate, load_or_default, validate_config,
};
use streamtap::errors::StreamtapError;
use streamtap::intercept::{Decoration, FlushPolicy, InterceptMode};
use streamtap_test_utils::builders::{ConfigFileBuilder, StreamConfigBuilder};
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

fn config_from(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn demo_configs_load() -> TestResult {
    let cfg = load_and_validate(demo("console.toml"))?;
    assert_eq!(cfg.console.target, ConsoleTarget::File);
    assert_eq!(
        cfg.console.path.as_deref(),
        Some(Path::new("streamtap-console.log"))
    );
    assert_eq!(cfg.stderr.intercept_mode(), InterceptMode::error_lines());
    assert_eq!(cfg.stdout.intercept_mode(), InterceptMode::plain_lines());

    let cfg = load_and_validate(demo("passthrough.toml"))?;
    assert_eq!(cfg.stdout.mode, ModeKind::Passthrough);
    assert_eq!(cfg.stdout.intercept_mode(), InterceptMode::Passthrough);
    assert_eq!(
        cfg.stderr.intercept_mode(),
        InterceptMode::Buffered {
            decoration: Decoration::color("orange"),
            policy: FlushPolicy::AnyNewline,
        }
    );
    Ok(())
}

#[test]
fn empty_file_gives_standard_layout() -> TestResult {
    let file = config_from("")?;
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.stdout.intercept_mode(), InterceptMode::plain_lines());
    assert_eq!(cfg.stderr.start, "[color=red]");
    assert_eq!(cfg.stderr.end, "[/color]");
    assert_eq!(cfg.console.target, ConsoleTarget::Log);
    Ok(())
}

#[test]
fn decoration_on_passthrough_stream_is_rejected() -> TestResult {
    let file = config_from(
        r#"
[stdout]
mode = "passthrough"
start = "[b]"
"#,
    )?;

    match load_and_validate(file.path()) {
        Err(StreamtapError::ConfigError(msg)) => {
            assert!(msg.contains("[stdout]"));
            assert!(msg.contains("passthrough"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    Ok(())
}

#[test]
fn file_target_requires_path() -> TestResult {
    let file = config_from(
        r#"
[console]
target = "file"
"#,
    )?;

    match load_and_validate(file.path()) {
        Err(StreamtapError::ConfigError(msg)) => assert!(msg.contains("requires a `path`")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    Ok(())
}

#[test]
fn path_without_file_target_is_rejected() {
    let result = ConfigFileBuilder::new()
        .with_console_file("out.log")
        .with_console_target(ConsoleTarget::Inherit)
        .try_build();

    assert!(matches!(result, Err(StreamtapError::ConfigError(_))));
}

#[test]
fn unknown_mode_is_a_toml_error() -> TestResult {
    let file = config_from(
        r#"
[stderr]
mode = "sometimes"
"#,
    )?;

    match load_and_validate(file.path()) {
        Err(StreamtapError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    Ok(())
}

#[test]
fn explicit_missing_path_is_an_io_error() {
    let result = load_or_default(Some(Path::new("/definitely/not/here/Streamtap.toml")));
    assert!(matches!(result, Err(StreamtapError::IoError(_))));
}

#[test]
fn builders_produce_valid_configs() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_stdout(StreamConfigBuilder::passthrough().build())
        .with_stderr(
            StreamConfigBuilder::buffered()
                .decorated("[color=yellow]", "[/color]")
                .flush_on(FlushPolicy::AnyNewline)
                .build(),
        )
        .build();
    validate_config(&cfg)?;

    assert_eq!(cfg.stdout.intercept_mode(), InterceptMode::Passthrough);
    assert_eq!(cfg.stderr.decoration(), Decoration::color("yellow"));

    let mut overridden = ConfigFile::default();
    overridden.console.target = ConsoleTarget::File;
    assert!(validate_config(&overridden).is_err());
    Ok(())
}

#[test]
fn enum_values_parse_from_strings() {
    assert_eq!("Buffered".parse::<ModeKind>(), Ok(ModeKind::Buffered));
    assert_eq!(" any ".parse::<FlushPolicy>(), Ok(FlushPolicy::AnyNewline));
    assert_eq!("file".parse::<ConsoleTarget>(), Ok(ConsoleTarget::File));
    assert!("loud".parse::<ConsoleTarget>().is_err());
}
