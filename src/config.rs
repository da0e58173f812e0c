//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cmdroute/cmdroute.toml`
//! 3. Local config: `<dir>/.cmdroute.toml`
//! 4. Environment variables: `CMDROUTE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::trace::{FunctionArgs, TraceRenderOptions, DEFAULT_FUNCTION_ARGS_LIMIT};
use crate::application::ApplicationError;

/// Trace rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraceSettings {
    /// Append a stack trace to error output
    pub add_trace: bool,
    /// Dump frame arguments: true, false, or the number of leading frames
    pub function_args: FunctionArgs,
    /// Discard argument dumps longer than this many bytes
    pub function_args_limit: usize,
    /// Show traces for errors that hide them by default
    pub include_internal: bool,
}

impl Default for TraceSettings {
    fn default() -> Self {
        let options = TraceRenderOptions::default();
        Self {
            add_trace: options.add_trace,
            function_args: options.function_args,
            function_args_limit: options.function_args_limit,
            include_internal: options.include_internal,
        }
    }
}

impl From<&TraceSettings> for TraceRenderOptions {
    fn from(settings: &TraceSettings) -> Self {
        Self {
            add_trace: settings.add_trace,
            function_args: settings.function_args,
            function_args_limit: settings.function_args_limit,
            include_internal: settings.include_internal,
        }
    }
}

/// Raw trace config for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTraceSettings {
    pub add_trace: Option<bool>,
    pub function_args: Option<FunctionArgs>,
    pub function_args_limit: Option<usize>,
    pub include_internal: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_command: Option<String>,
    pub auto_exit: Option<bool>,
    #[serde(default)]
    pub trace: RawTraceSettings,
}

impl TraceSettings {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawTraceSettings) -> Self {
        Self {
            add_trace: overlay.add_trace.unwrap_or(self.add_trace),
            function_args: overlay.function_args.unwrap_or(self.function_args),
            function_args_limit: overlay
                .function_args_limit
                .unwrap_or(self.function_args_limit),
            include_internal: overlay.include_internal.unwrap_or(self.include_internal),
        }
    }
}

/// Unified configuration for cmdroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Command run when no command name is given
    pub default_command: String,
    /// Exit the process with the command's status (clamped to 255)
    pub auto_exit: bool,
    /// Error trace rendering
    pub trace: TraceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_command: "list".to_string(),
            auto_exit: true,
            trace: TraceSettings::default(),
        }
    }
}

/// Get the XDG config directory for cmdroute.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cmdroute").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cmdroute.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".cmdroute.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_command: overlay
                .default_command
                .clone()
                .unwrap_or_else(|| self.default_command.clone()),
            auto_exit: overlay.auto_exit.unwrap_or(self.auto_exit),
            trace: self.trace.merge(&overlay.trace),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.cmdroute.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Load only defaults plus one explicit file.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply CMDROUTE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CMDROUTE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_command") {
            settings.default_command = val;
        }
        if let Ok(val) = config.get_bool("auto_exit") {
            settings.auto_exit = val;
        }
        if let Ok(val) = config.get_bool("trace.add_trace") {
            settings.trace.add_trace = val;
        }
        if let Ok(val) = config.get_string("trace.function_args") {
            settings.trace.function_args = parse_function_args(&val)?;
        }
        if let Ok(val) = config.get_int("trace.function_args_limit") {
            settings.trace.function_args_limit = usize::try_from(val).map_err(|_| {
                ApplicationError::Config {
                    message: format!("trace.function_args_limit must not be negative: {val}"),
                }
            })?;
        }
        if let Ok(val) = config.get_bool("trace.include_internal") {
            settings.trace.include_internal = val;
        }

        Ok(settings)
    }

    pub fn trace_options(&self) -> TraceRenderOptions {
        (&self.trace).into()
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# cmdroute configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/cmdroute/cmdroute.toml
#   Local:  <dir>/.cmdroute.toml   (passed with -C <dir>)
#   Env:    CMDROUTE_* environment variables, e.g. CMDROUTE_TRACE__ADD_TRACE=false

# Command run when no command name is given
# default_command = "list"

# Exit with the command's status (values above 255 become 255)
# auto_exit = true

[trace]
# Append a stack trace to error output
# add_trace = true

# Dump frame arguments: true, false, or the number of leading frames
# function_args = false

# Discard argument dumps longer than this many bytes
# function_args_limit = {DEFAULT_FUNCTION_ARGS_LIMIT}

# Show traces for errors that hide them by default (e.g. unknown commands)
# include_internal = false
"#
        )
    }
}

/// `true`/`false` or a frame count.
fn parse_function_args(value: &str) -> Result<FunctionArgs, ApplicationError> {
    let value = value.trim();
    if let Ok(all) = value.parse::<bool>() {
        return Ok(FunctionArgs::Flag(all));
    }
    value
        .parse::<usize>()
        .map(FunctionArgs::First)
        .map_err(|_| ApplicationError::Config {
            message: format!("trace.function_args must be true, false or a number: {value}"),
        })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
