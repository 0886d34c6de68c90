use std::env::var;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use dotenvy::dotenv;
use lbp_presence_store::PlayerName;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::{validate_poll_interval, validate_server_url, validate_username};

pub const DEFAULT_SERVER_URL: &str = "https://lighthouse.lbpunion.com";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_DISCORD_APP_ID: i64 = 1060973475151495288;

/// Application configuration with environment variable overrides
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the Lighthouse instance, without trailing slash
    /// Env: LIGHTHOUSE_URL (default: "https://lighthouse.lbpunion.com")
    pub server_url: String,

    /// Registered username whose activity is broadcast
    /// Env: LIGHTHOUSE_USERNAME (required unless given by file or prompt)
    pub username: PlayerName,

    /// Delay between two presence cycles
    /// Env: POLL_INTERVAL_SECS (default: 30, must be at least 1)
    pub poll_interval: Duration,

    /// How long to wait after a fatal error before exiting
    /// Env: EXIT_GRACE_SECS (default: 10)
    pub exit_grace: Duration,

    /// Discord application the presence is published under
    /// Env: DISCORD_APP_ID (default: 1060973475151495288)
    pub discord_app_id: i64,
}

/// Outcome of bootstrapping the configuration.
#[derive(Debug)]
pub enum Bootstrap {
    Ready(Config),
    /// No config file existed; a template was written at this path.
    TemplateWritten(PathBuf),
    /// An unknown flag was passed.
    Usage(String),
}

/// On-disk format of `--config` files.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    server_url: String,
    username: String,
}

impl Config {
    /// Load configuration from environment variables. Returns `None` when no
    /// username is set.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(username) = var("LIGHTHOUSE_USERNAME") else {
            return Ok(None);
        };
        let server_url = env_or_default_string("LIGHTHOUSE_URL", DEFAULT_SERVER_URL);
        Self::for_player(&server_url, &username).map(Some)
    }

    /// Validate the server and username; timings come from the environment.
    pub fn for_player(server_url: &str, username: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            server_url: validate_server_url(server_url)?,
            username: validate_username(username)?,
            poll_interval: validate_poll_interval(env_or_default("POLL_INTERVAL_SECS", 30))?,
            exit_grace: Duration::from_secs(env_or_default("EXIT_GRACE_SECS", 10)),
            discord_app_id: env_or_default("DISCORD_APP_ID", DEFAULT_DISCORD_APP_ID),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            username: PlayerName::new(),
            poll_interval: Duration::from_secs(30),
            exit_grace: Duration::from_secs(10),
            discord_app_id: DEFAULT_DISCORD_APP_ID,
        }
    }
}

/// Resolve the configuration from the command line arguments (program name
/// already skipped), then `.env`/environment, then interactive prompts.
pub fn load(mut args: impl Iterator<Item = String>) -> Result<Bootstrap, ConfigError> {
    let _ = dotenv();

    match args.next() {
        Some(flag) if flag == "--config" => {
            let path = args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            from_file(&path)
        }
        Some(flag) => Ok(Bootstrap::Usage(flag)),
        None => match Config::from_env()? {
            Some(config) => Ok(Bootstrap::Ready(config)),
            None => prompt(io::stdin().lock(), io::stdout()).map(Bootstrap::Ready),
        },
    }
}

/// Read a JSON config file, or write a template if there is none yet.
pub fn from_file(path: &Path) -> Result<Bootstrap, ConfigError> {
    if !path.exists() {
        write_template(path)?;
        return Ok(Bootstrap::TemplateWritten(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Config::for_player(&file.server_url, &file.username).map(Bootstrap::Ready)
}

fn write_template(path: &Path) -> Result<(), ConfigError> {
    let template = ConfigFile {
        server_url: DEFAULT_SERVER_URL.to_string(),
        username: String::new(),
    };
    let contents = serde_json::to_string_pretty(&template).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, contents).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Ask for the server and username on the console. An empty server answer
/// picks the default instance.
pub fn prompt(mut input: impl BufRead, mut output: impl Write) -> Result<Config, ConfigError> {
    let server_url = ask(
        &mut input,
        &mut output,
        "What is the URL of the Lighthouse instance? (e.g. https://lighthouse.lbpunion.com) ",
    )?;
    let username = ask(
        &mut input,
        &mut output,
        "What is your registered username on this server? (e.g. littlebigmolly) ",
    )?;

    let server_url = if server_url.is_empty() {
        DEFAULT_SERVER_URL
    } else {
        server_url.as_str()
    };
    Config::for_player(server_url, &username)
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<String, ConfigError> {
    write!(output, "{question}")
        .and_then(|_| output.flush())
        .map_err(ConfigError::Prompt)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(ConfigError::Prompt)?;
    Ok(answer.trim().to_string())
}

/// Parse environment variable or return default value
fn env_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(default)
}

/// Parse environment variable string or return default value
fn env_or_default_string(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}
