use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use wrangler_core::ScanConfig;
use wrangler_core::discovery::extensions::DEFAULT_FILE_TYPES;
use wrangler_core::media::DEFAULT_THUMBNAIL_FOLDER;
use wrangler_core::sequence::SequenceAssembler;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub scan: ScanSettings,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Scan settings as stored in the config file
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScanSettings {
    pub recurse_subfolders: bool,
    /// Extensions to scan; empty scans every file
    pub file_types: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub combine_frame_sequences: bool,
    pub ignore_thumbnail_folders: bool,
    pub thumbnail_folder_name: String,
    pub min_sequence_length: usize,
    pub follow_links: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            recurse_subfolders: true,
            file_types: DEFAULT_FILE_TYPES.iter().map(|ext| ext.to_string()).collect(),
            exclude_patterns: Vec::new(),
            combine_frame_sequences: true,
            ignore_thumbnail_folders: true,
            thumbnail_folder_name: DEFAULT_THUMBNAIL_FOLDER.to_string(),
            min_sequence_length: SequenceAssembler::DEFAULT_MIN_SEQUENCE_LENGTH,
            follow_links: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

/// Values given on the command line for a single scan
#[derive(Debug, Default, Clone)]
pub struct ScanOverrides {
    pub recursive: Option<bool>,
    /// `Some(empty)` scans every file type
    pub file_types: Option<Vec<String>>,
    /// Added to the configured patterns
    pub exclude_patterns: Vec<String>,
    pub combine: Option<bool>,
    pub min_sequence_length: Option<usize>,
    pub ignore_thumbnails: Option<bool>,
    pub thumbnail_folder: Option<String>,
    pub follow_links: Option<bool>,
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, overrides: ScanOverrides) {
        let scan = &mut self.scan;

        if let Some(recursive) = overrides.recursive {
            scan.recurse_subfolders = recursive;
        }
        if let Some(types) = overrides.file_types {
            scan.file_types = types;
        }
        scan.exclude_patterns.extend(overrides.exclude_patterns);
        if let Some(combine) = overrides.combine {
            scan.combine_frame_sequences = combine;
        }
        if let Some(length) = overrides.min_sequence_length {
            scan.min_sequence_length = length;
        }
        if let Some(ignore) = overrides.ignore_thumbnails {
            scan.ignore_thumbnail_folders = ignore;
        }
        if let Some(folder) = overrides.thumbnail_folder {
            scan.thumbnail_folder_name = folder;
        }
        if let Some(follow) = overrides.follow_links {
            scan.follow_links = follow;
        }
    }
}

impl ScanSettings {
    /// Resolve into the engine's immutable configuration
    pub fn to_scan_config(&self) -> wrangler_core::Result<ScanConfig> {
        ScanConfig::builder()
            .recurse_subfolders(self.recurse_subfolders)
            .combine_frame_sequences(self.combine_frame_sequences)
            .file_types(self.file_types.iter().cloned())
            .exclude_patterns(self.exclude_patterns.clone())
            .ignore_thumbnail_folders(self.ignore_thumbnail_folders)
            .thumbnail_folder_name(self.thumbnail_folder_name.clone())
            .min_sequence_length(self.min_sequence_length)
            .follow_links(self.follow_links)
            .build()
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("wrangler/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/wrangler/config.toml")
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/wrangler/config.toml")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wrangler\\config.toml")
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wrangler/config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables, e.g. WRANGLER_SCAN__MIN_SEQUENCE_LENGTH
        figment = figment.merge(Env::prefixed("WRANGLER_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        Self::display_value(current)
            .ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.validate_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, sections)) = parts.split_last() else {
            anyhow::bail!("Empty key");
        };

        // Navigate to the parent table, creating sections as needed
        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert(toml::Value::Table(toml::map::Map::new()));
        }

        let toml::Value::Table(table) = current else {
            anyhow::bail!("Cannot set value on non-table");
        };
        table.insert(last.to_string(), self.parse_config_value(key, value)?);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        if let toml::Value::Table(table) = value {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                Self::collect_values(val, new_prefix, items);
            }
        } else if let Some(display) = Self::display_value(value) {
            items.push((prefix, display));
        }
    }

    /// Render scalars and string lists; lists are comma separated
    fn display_value(value: &toml::Value) -> Option<String> {
        match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            toml::Value::Array(values) => values
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(",")),
            _ => None,
        }
    }

    /// Validate a configuration value
    fn validate_config_value(&self, key: &str, value: &str) -> Result<()> {
        match key {
            "scan.min_sequence_length" => {
                let length: usize = value
                    .parse()
                    .context("min_sequence_length must be a positive integer")?;
                if length == 0 {
                    anyhow::bail!("min_sequence_length must be at least 1");
                }
            }
            "scan.thumbnail_folder_name" => {
                if value.is_empty() || value.contains(['/', '\\']) {
                    anyhow::bail!("thumbnail_folder_name must be a single folder name");
                }
            }
            "scan.recurse_subfolders"
            | "scan.combine_frame_sequences"
            | "scan.ignore_thumbnail_folders"
            | "scan.follow_links"
            | "output.color_enabled"
            | "output.progress_enabled" => {
                let _: bool = value.parse().context("Value must be 'true' or 'false'")?;
            }
            "output.default_format" => {
                crate::output::OutputFormat::from_string(value)?;
            }
            _ => {} // No validation for unknown keys
        }
        Ok(())
    }

    /// Parse a value to the appropriate TOML type
    fn parse_config_value(&self, key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "scan.file_types" | "scan.exclude_patterns" => Ok(toml::Value::Array(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| toml::Value::String(part.to_string()))
                    .collect(),
            )),
            k if k.ends_with("_length") => {
                let num: i64 = value.parse().context("Expected integer value")?;
                Ok(toml::Value::Integer(num))
            }
            k if k.ends_with("_enabled")
                || k.ends_with("_subfolders")
                || k.ends_with("_sequences")
                || k.ends_with("_folders")
                || k.ends_with("_links") =>
            {
                let bool_val: bool = value
                    .parse()
                    .context("Expected boolean value (true/false)")?;
                Ok(toml::Value::Boolean(bool_val))
            }
            k if k.ends_with("_name") || k.ends_with("_format") => {
                Ok(toml::Value::String(value.to_string()))
            }
            _ => {
                if let Ok(b) = value.parse::<bool>() {
                    Ok(toml::Value::Boolean(b))
                } else if let Ok(i) = value.parse::<i64>() {
                    Ok(toml::Value::Integer(i))
                } else if let Ok(f) = value.parse::<f64>() {
                    Ok(toml::Value::Float(f))
                } else {
                    Ok(toml::Value::String(value.to_string()))
                }
            }
        }
    }
}

/// Load configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
