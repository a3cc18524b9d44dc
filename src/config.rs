use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "voicekeys.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Number of past commands kept for the "history" command
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Log combinations instead of pressing them
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            dry_run: false,
            keys: KeysConfig::default(),
            control: ControlConfig::default(),
            input: InputConfig::default(),
        }
    }
}

fn default_history_limit() -> usize {
    50
}

// ============================================================================
// Keys Config
// ============================================================================

/// Extra vocabulary merged over the built-in tables at startup
#[derive(Debug, Deserialize, Default)]
pub struct KeysConfig {
    #[serde(default)]
    pub aliases: Vec<CustomAlias>,
    #[serde(default)]
    pub words: Vec<CustomWord>,
}

/// Whole phrase -> literal combination, e.g. "select all" -> "ctrl+a"
#[derive(Debug, Deserialize, Clone)]
pub struct CustomAlias {
    pub phrase: String,
    pub combo: String,
}

/// Spoken word -> key name, e.g. "page" -> "pagedown"
#[derive(Debug, Deserialize, Clone)]
pub struct CustomWord {
    pub word: String,
    pub key: String,
}

// ============================================================================
// Control Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ControlConfig {
    #[serde(default = "default_exit_phrases")]
    pub exit_phrases: Vec<String>,
    #[serde(default = "default_pause_phrases")]
    pub pause_phrases: Vec<String>,
    #[serde(default = "default_resume_phrases")]
    pub resume_phrases: Vec<String>,
    #[serde(default = "default_help_phrases")]
    pub help_phrases: Vec<String>,
    #[serde(default = "default_history_phrases")]
    pub history_phrases: Vec<String>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            exit_phrases: default_exit_phrases(),
            pause_phrases: default_pause_phrases(),
            resume_phrases: default_resume_phrases(),
            help_phrases: default_help_phrases(),
            history_phrases: default_history_phrases(),
        }
    }
}

fn default_exit_phrases() -> Vec<String> {
    vec!["exit".to_string()]
}

fn default_pause_phrases() -> Vec<String> {
    vec!["stop".to_string()]
}

fn default_resume_phrases() -> Vec<String> {
    vec!["start".to_string()]
}

fn default_help_phrases() -> Vec<String> {
    vec!["help".to_string()]
}

fn default_history_phrases() -> Vec<String> {
    vec!["history".to_string()]
}

// ============================================================================
// Input Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// Delay after holding modifiers before the final key (ms)
    #[serde(default = "default_modifier_delay")]
    pub modifier_delay_ms: u64,
    /// Delay after the final key before releasing modifiers (ms)
    #[serde(default = "default_release_delay")]
    pub release_delay_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            modifier_delay_ms: default_modifier_delay(),
            release_delay_ms: default_release_delay(),
        }
    }
}

fn default_modifier_delay() -> u64 {
    10
}

fn default_release_delay() -> u64 {
    50
}

impl Config {
    /// Load `voicekeys.toml` if present, otherwise defaults
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Config::default();
        }
        Self::from_path(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using default config");
            Config::default()
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}
