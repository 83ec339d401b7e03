// src/config/validate.rs

use crate::config::model::{
    ConfigFile, ConsoleConfig, ConsoleTarget, ModeKind, RawConfigFile, StreamConfig,
};
use crate::errors::{Result, StreamtapError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StreamtapError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Re-run validation on an already built config (e.g. after CLI overrides).
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_sections(&cfg.stdout, &cfg.stderr, &cfg.console)
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_sections(&cfg.stdout, &cfg.stderr, &cfg.console)
}

fn validate_sections(
    stdout: &StreamConfig,
    stderr: &StreamConfig,
    console: &ConsoleConfig,
) -> Result<()> {
    validate_stream("stdout", stdout)?;
    validate_stream("stderr", stderr)?;
    validate_console(console)?;
    Ok(())
}

fn validate_stream(section: &str, stream: &StreamConfig) -> Result<()> {
    if stream.mode == ModeKind::Passthrough && !stream.decoration().is_empty() {
        return Err(StreamtapError::ConfigError(format!(
            "[{section}] sets start/end but mode = \"passthrough\"; decoration requires mode = \"buffered\""
        )));
    }
    Ok(())
}

fn validate_console(console: &ConsoleConfig) -> Result<()> {
    match (console.target, &console.path) {
        (ConsoleTarget::File, None) => Err(StreamtapError::ConfigError(
            "[console] target = \"file\" requires a `path`".to_string(),
        )),
        (ConsoleTarget::File, Some(path)) if path.as_os_str().is_empty() => Err(
            StreamtapError::ConfigError("[console].path must not be empty".to_string()),
        ),
        (ConsoleTarget::Log | ConsoleTarget::Inherit, Some(_)) => {
            Err(StreamtapError::ConfigError(
                "[console].path is only used with target = \"file\"".to_string(),
            ))
        }
        _ => Ok(()),
    }
}
