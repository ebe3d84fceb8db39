use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};
use thiserror::Error;
use toml::Value;

use crate::logging::{LogConfig, LogDestination, LogFormat};
use crate::queue::QueueConfig;

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Configuration manager
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a new ConfigManager from a Configuration (primarily for testing)
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration using discovery hierarchy
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using empty configuration");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from explicit file path
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    /// File the configuration was read from, if any
    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Get value from configuration with section fallback
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        // Priority: selected_section -> specified section -> base
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Select a named section that overrides all others
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    /// Get boolean value with type conversion
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    /// Get unsigned integer value with type conversion
    pub fn get_usize(&self, section: &str, key: &str) -> Result<Option<usize>> {
        self.get_value(section, key)
            .map(|value| {
                value
                    .parse::<usize>()
                    .with_context(|| format!("Invalid number for {}.{}: {}", section, key, value))
            })
            .transpose()
    }

    /// Get log level value with type conversion
    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    /// Get path value with type conversion
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Get queue construction settings from the `[queue]` section
    pub fn get_queue_config(&self) -> Result<QueueConfig> {
        let mut config = QueueConfig::default();

        if let Some(capacity) = self.get_usize("queue", "initial-capacity")? {
            config.initial_capacity = capacity;
        }

        if let Some(limit_str) = self.get_value("queue", "memory-limit") {
            let limit = parse_memory_size(limit_str)
                .with_context(|| format!("Invalid memory-limit value in config: {}", limit_str))?;
            config.memory_limit = Some(limit);
        }

        if let Some(track) = self.get_bool("queue", "track-memory")? {
            config.enable_memory_tracking = track;
        }

        debug!("Queue configuration: {:?}", config);
        Ok(config)
    }

    /// Get logger settings from the `[logging]` section
    pub fn get_log_config(&self) -> Result<LogConfig> {
        let mut config = LogConfig::default();

        if let Some(level) = self.get_log_level("logging", "level")? {
            config.console_level = level;
        }

        if let Some(format) = self.get_value("logging", "format") {
            config.format = format.parse::<LogFormat>().map_err(anyhow::Error::msg)?;
        }

        if let Some(path) = self.get_path("logging", "file") {
            config.file_level = Some(self.get_log_level("logging", "file-level")?.unwrap_or(config.console_level));
            config.destination = LogDestination::Both(path);
        }

        Ok(config)
    }
}

/// Get configuration file discovery paths in priority order
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Environment variable $STRQUEUE_CONFIG
    if let Ok(env_path) = env::var("STRQUEUE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("strqueue").join("config.toml"));
    }

    // 3. Home directory
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".strqueue.toml"));
    }

    // 4. Project local
    paths.push(PathBuf::from("./.strqueue.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content to string-based configuration
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse().context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, String::new(), &mut config);

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Recursively flatten TOML tables into section.subsection format
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        let section_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Table(subtable) if subtable.values().any(|v| v.is_table()) => {
                flatten_toml_table(subtable, section_name, config);
            }
            Value::Table(subtable) => {
                let section = config.entry(section_name).or_default();
                for (subkey, subvalue) in subtable {
                    section.insert(subkey.clone(), toml_value_to_string(subvalue));
                }
            }
            // Top level scalars belong to the base section
            _ if prefix.is_empty() => {
                config
                    .entry("base".to_string())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
            _ => {
                config
                    .entry(prefix.clone())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

/// Convert TOML Value to string representation
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        _ => value.to_string(),
    }
}

/// Memory size parsing errors
#[derive(Debug, Error, PartialEq)]
pub enum MemoryParseError {
    #[error("Invalid memory size format: {input}. Expected format like '512KB', '64MB', '2048'")]
    InvalidFormat { input: String },

    #[error("Invalid memory unit: {unit}. Supported units: B, K, M, G (with optional 'B' suffix)")]
    InvalidUnit { unit: String },

    #[error("Memory size too large: {input}")]
    SizeTooLarge { input: String },
}

/// Parse a memory size such as `4096`, `64K`, `2MB` or `0.5G` into bytes
pub fn parse_memory_size(input: &str) -> Result<usize, MemoryParseError> {
    let normalized = input.trim().to_uppercase();
    let split = normalized
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(normalized.len());
    let (number, unit) = normalized.split_at(split);

    let value = number
        .parse::<f64>()
        .map_err(|_| MemoryParseError::InvalidFormat { input: input.to_string() })?;

    let multiplier: u64 = match unit.trim() {
        "" | "B" => 1,
        "K" | "KB" | "KIB" => 1024,
        "M" | "MB" | "MIB" => 1024 * 1024,
        "G" | "GB" | "GIB" => 1024 * 1024 * 1024,
        other => return Err(MemoryParseError::InvalidUnit { unit: other.to_string() }),
    };

    let bytes = value * multiplier as f64;
    if !bytes.is_finite() || bytes > usize::MAX as f64 {
        return Err(MemoryParseError::SizeTooLarge { input: input.to_string() });
    }
    Ok(bytes as usize)
}
