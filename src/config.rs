//! Client configuration.
//!
//! Values come from, lowest precedence first: built-in defaults, `STEPGATE_*`
//! environment variables, command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::websocket::{WsClientConfig, DEFAULT_RECONNECT_DELAY_MS};

pub const DEFAULT_SERVER: &str = "127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_SERVER: &str = "STEPGATE_SERVER";
pub const ENV_TLS: &str = "STEPGATE_TLS";
pub const ENV_RECONNECT_MS: &str = "STEPGATE_RECONNECT_MS";
pub const ENV_LOG_FILE: &str = "STEPGATE_LOG_FILE";

pub const USAGE: &str = "\
Usage: stepgate [OPTIONS]

Options:
  --server <HOST:PORT>    Server address [env: STEPGATE_SERVER] [default: 127.0.0.1:8000]
  --tls                   Use wss:// and https:// [env: STEPGATE_TLS]
  --reconnect-ms <MS>     Delay before reconnecting [env: STEPGATE_RECONNECT_MS] [default: 3000]
  --log-file <PATH>       Diagnostics log file [env: STEPGATE_LOG_FILE]
  --health                Check server health and exit
  -V, --version           Print version and exit
  -h, --help              Print this help and exit";

/// Errors produced while reading configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: String, value: String },

    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: String, value: String },

    #[error("Server address must not be empty")]
    EmptyServer,
}

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server address as `host:port`
    pub server: String,
    /// Speak `wss://` and `https://`
    pub use_tls: bool,
    /// Fixed delay between a closure and the next connect attempt
    pub reconnect_delay: Duration,
    /// Timeout for HTTP requests
    pub request_timeout: Duration,
    /// Diagnostics log file; `None` means [`default_log_file`]
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            use_tls: false,
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(ClientConfig),
    Health(ClientConfig),
    Version,
    Help,
}

impl ClientConfig {
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Overlay environment values onto `self`.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(ENV_SERVER) {
            self.server = normalize_server(&server)?;
        }
        if let Some(tls) = lookup(ENV_TLS) {
            self.use_tls = parse_bool(ENV_TLS, &tls)?;
        }
        if let Some(ms) = lookup(ENV_RECONNECT_MS) {
            self.reconnect_delay = Duration::from_millis(parse_millis(ENV_RECONNECT_MS, &ms)?);
        }
        if let Some(path) = lookup(ENV_LOG_FILE) {
            if !path.trim().is_empty() {
                self.log_file = Some(PathBuf::from(path));
            }
        }
        Ok(self)
    }

    /// Overlay command-line flags onto `self` and decide what to do.
    ///
    /// `args` excludes the program name.
    pub fn apply_args<I>(mut self, args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut health = false;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--version" | "-V" => return Ok(Command::Version),
                "--help" | "-h" => return Ok(Command::Help),
                "--health" => health = true,
                "--tls" => self.use_tls = true,
                "--server" => {
                    let value = next_value(&mut args, "--server")?;
                    self.server = normalize_server(&value)?;
                }
                "--reconnect-ms" => {
                    let value = next_value(&mut args, "--reconnect-ms")?;
                    self.reconnect_delay =
                        Duration::from_millis(parse_millis("--reconnect-ms", &value)?);
                }
                "--log-file" => {
                    let value = next_value(&mut args, "--log-file")?;
                    self.log_file = Some(PathBuf::from(value));
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        if health {
            Ok(Command::Health(self))
        } else {
            Ok(Command::Run(self))
        }
    }

    /// Defaults, then the process environment, then `args`.
    pub fn from_env_and_args<I>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::default()
            .apply_env(|name| std::env::var(name).ok())?
            .apply_args(args)
    }

    pub fn ws_config(&self) -> WsClientConfig {
        WsClientConfig::default()
            .with_host(self.server.clone())
            .with_tls(self.use_tls)
            .with_reconnect_delay(self.reconnect_delay)
    }

    pub fn ws_url(&self) -> String {
        self.ws_config().url()
    }

    pub fn http_base(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}", scheme, self.server)
    }

    pub fn task_url(&self) -> String {
        format!("{}/api/task", self.http_base())
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.http_base())
    }

    /// Resolved diagnostics log path.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(default_log_file)
    }
}

/// `$HOME/.stepgate/stepgate.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stepgate").join("stepgate.log"))
}

fn next_value<I>(args: &mut I, flag: &str) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    match args.next() {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => Err(ConfigError::MissingValue(flag.to_string())),
    }
}

fn normalize_server(value: &str) -> Result<String, ConfigError> {
    let server = value.trim().trim_end_matches('/');
    if server.is_empty() {
        return Err(ConfigError::EmptyServer);
    }
    Ok(server.to_string())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_millis(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server, "127.0.0.1:8000");
        assert_eq!(config.reconnect_delay, Duration::from_millis(3000));
        assert_eq!(config.ws_url(), "ws://127.0.0.1:8000/ws");
        assert_eq!(config.task_url(), "http://127.0.0.1:8000/api/task");
        assert_eq!(config.health_url(), "http://127.0.0.1:8000/api/health");
    }

    #[test]
    fn test_tls_switches_schemes() {
        let config = ClientConfig::default().with_server("example.com").with_tls(true);
        assert_eq!(config.ws_url(), "wss://example.com/ws");
        assert_eq!(config.task_url(), "https://example.com/api/task");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = ClientConfig::default()
            .apply_env(env(&[
                (ENV_SERVER, "10.0.0.5:9000/"),
                (ENV_TLS, "true"),
                (ENV_RECONNECT_MS, "500"),
                (ENV_LOG_FILE, "/tmp/sg.log"),
            ]))
            .unwrap();

        assert_eq!(config.server, "10.0.0.5:9000");
        assert!(config.use_tls);
        assert_eq!(config.reconnect_delay, Duration::from_millis(500));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/sg.log")));
    }

    #[test]
    fn test_args_override_env() {
        let command = ClientConfig::default()
            .apply_env(env(&[(ENV_SERVER, "from-env:1")]))
            .unwrap()
            .apply_args(args(&["--server", "from-args:2", "--reconnect-ms", "100"]))
            .unwrap();

        match command {
            Command::Run(config) => {
                assert_eq!(config.server, "from-args:2");
                assert_eq!(config.reconnect_delay, Duration::from_millis(100));
            }
            other => panic!("Expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_commands() {
        let base = ClientConfig::default;
        assert_eq!(base().apply_args(args(&["--version"])).unwrap(), Command::Version);
        assert_eq!(base().apply_args(args(&["-h"])).unwrap(), Command::Help);
        assert!(matches!(
            base().apply_args(args(&["--health", "--tls"])).unwrap(),
            Command::Health(c) if c.use_tls
        ));
    }

    #[test]
    fn test_invalid_values() {
        let base = ClientConfig::default;
        assert_eq!(
            base().apply_args(args(&["--server"])).unwrap_err(),
            ConfigError::MissingValue("--server".to_string())
        );
        assert_eq!(
            base().apply_args(args(&["--bogus"])).unwrap_err(),
            ConfigError::UnknownArgument("--bogus".to_string())
        );
        assert!(matches!(
            base().apply_args(args(&["--reconnect-ms", "soon"])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            base().apply_env(env(&[(ENV_TLS, "maybe")])),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert_eq!(
            base().apply_env(env(&[(ENV_SERVER, "  ")])).unwrap_err(),
            ConfigError::EmptyServer
        );
    }

    #[test]
    fn test_log_file_path_prefers_explicit() {
        let config = ClientConfig::default().with_log_file("/var/log/sg.log");
        assert_eq!(config.log_file_path(), Some(PathBuf::from("/var/log/sg.log")));
    }
}
