use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Built-in configuration used when no config file is found.
const DEFAULT_CONFIG: &str = include_str!("../config.example.yaml");

#[derive(Parser, Debug)]
#[command(name = "web-collector")]
#[command(about = "Runs the web-collector bookmark service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".web-collector")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_seed_samples() -> bool {
    true
}

impl App {
    pub fn get_host(&self) -> &str {
        &self.host
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Cors {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

fn default_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Cors {
    fn default() -> Self {
        Cors {
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: App,
    #[serde(default)]
    pub cors: Cors,
}

impl Config {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let yaml_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Config::from_yaml(&yaml_str)
    }

    /// Configuration from the built-in template; environment variables still apply.
    pub fn builtin() -> Result<Self, ConfigError> {
        Config::from_yaml(DEFAULT_CONFIG)
    }

    /// Picks the explicit path if given, then the default path if it exists,
    /// then the built-in template.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Config::new(path);
        }

        let default_path = default_config_path();
        if Path::new(&default_path).is_file() {
            tracing::info!(path = ?default_path, "loading config file");
            return Config::new(&default_path.to_string_lossy());
        }

        tracing::info!("no config file found, using built-in defaults");
        Config::builtin()
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self, ConfigError> {
        Config::from_substituted(&Config::substitute_env_vars(yaml_str))
    }

    fn from_substituted(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.app.get_host(), self.app.get_port())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.host.trim().is_empty() {
            return Err(ConfigError::Invalid("app.host must not be empty".to_string()));
        }
        if self.cors.allowed_origins.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "cors.allowed_origins must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn substitute_env_vars(yaml_str: &str) -> String {
        Config::substitute_vars(yaml_str, |name| env::var(name).ok())
    }

    /// Expands `${VAR}` and `${VAR:-default}`. An unset or empty variable
    /// takes the default.
    fn substitute_vars<F>(yaml_str: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            let Some(end) = result[actual_start..].find('}') else {
                break;
            };
            let var_name = &result[actual_start + 2..actual_start + end];

            let env_value = match var_name.split_once(":-") {
                Some((actual_var, default_val)) => lookup(actual_var)
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| default_val.to_string()),
                None => lookup(var_name).unwrap_or_else(|| {
                    tracing::warn!(var = %var_name, "environment variable not found");
                    String::new()
                }),
            };

            result.replace_range(actual_start..actual_start + end + 1, &env_value);
            offset = actual_start + env_value.len();
        }

        result
    }
}
