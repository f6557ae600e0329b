// Configuration loading and parsing (bfhl.toml plus environment overrides).

use bfhl_core::identity::{is_valid_birth_date, is_valid_email};
use bfhl_core::UserInfo;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name shared by `defaults/` and `config/`.
pub const CONFIG_FILE_NAME: &str = "bfhl.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },

    #[error("failed to write config file {path}: {message}")]
    WriteError { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// bfhl.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire bfhl.toml file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub identity: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Path of the live config file under `base_dir`.
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join(CONFIG_FILE_NAME)
}

/// Parse `config/bfhl.toml` under `base_dir` without applying environment
/// overrides or validation.
pub fn read_config_file(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(base_dir);
    let text = read_file(&path)?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

/// Load, override and validate configuration relative to `base_dir`.
///
/// `env` resolves environment variable names; production passes
/// `std::env::var(..).ok()`, tests pass a fixed map. This is the lower-level
/// primitive that does not copy defaults; prefer [`load_config`].
pub fn load_config_from<F>(base_dir: &Path, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = read_config_file(base_dir)?;
    apply_env_overrides(&mut config, env)?;
    validate(&config)?;
    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or run `bfhl setup`",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config relative to `base_dir` using the process environment.
/// Ensures default config files are copied before loading.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir, |key| std::env::var(key).ok())
}

/// Serialize `config` to `config/bfhl.toml` under `base_dir`, creating the
/// directory if needed. Returns the written path.
pub fn write_config(base_dir: &Path, config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path(base_dir);
    let write_err = |message: String| ConfigError::WriteError {
        path: path.clone(),
        message,
    };

    let text = toml::to_string_pretty(config).map_err(|e| write_err(e.to_string()))?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| write_err(e.to_string()))?;
    }
    std::fs::write(&path, text).map_err(|e| write_err(e.to_string()))?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

/// Apply `PORT`, `BFHL_HOST` and the `BFHL_*` identity variables on top of
/// the file values. Empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = lookup("PORT") {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::ValidationError {
            field: "PORT".into(),
            message: format!("must be a port number, got {port:?}"),
        })?;
    }
    if let Some(host) = lookup("BFHL_HOST") {
        config.server.host = host;
    }

    let identity = &mut config.identity;
    let fields: [(&str, &mut String); 4] = [
        ("BFHL_FULL_NAME", &mut identity.full_name),
        ("BFHL_BIRTH_DATE", &mut identity.birth_date),
        ("BFHL_EMAIL", &mut identity.email),
        ("BFHL_ROLL_NUMBER", &mut identity.roll_number),
    ];
    for (key, slot) in fields {
        if let Some(value) = lookup(key) {
            *slot = value;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    let id = &config.identity;
    let required: &[(&str, &str)] = &[
        ("identity.full_name", &id.full_name),
        ("identity.birth_date", &id.birth_date),
        ("identity.email", &id.email),
        ("identity.roll_number", &id.roll_number),
    ];
    for (name, val) in required {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if !is_valid_birth_date(&id.birth_date) {
        return Err(ConfigError::ValidationError {
            field: "identity.birth_date".into(),
            message: format!("must be DDMMYYYY (8 digits), got {:?}", id.birth_date),
        });
    }

    if !is_valid_email(&id.email) {
        return Err(ConfigError::ValidationError {
            field: "identity.email".into(),
            message: format!("not a valid email address: {:?}", id.email),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
