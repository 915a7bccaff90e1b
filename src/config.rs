use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Idle delay floor: resolving symbols more often than this is wasted work
pub const MIN_IDLE_INTERVAL_MS: u64 = 100;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Color used for plain (non-semantic) occurrence highlights
    #[serde(default = "default_highlight_color")]
    pub highlight_color: RgbColor,

    /// Indicator drawn over each occurrence
    #[serde(default)]
    pub highlight_style: IndicatorStyle,

    /// Only match whole words
    #[serde(default = "default_true")]
    pub whole_words: bool,

    /// Match case when searching for occurrences
    #[serde(default = "default_true")]
    pub match_case: bool,

    /// Add a gutter marker on every line containing an occurrence
    #[serde(default = "default_false")]
    pub add_line_marker: bool,

    /// Show occurrence markers in the overview bar next to the scrollbar
    #[serde(default = "default_true")]
    pub enable_overview_bar: bool,

    /// Highlight the symbol under the cursor after the cursor rests on it
    #[serde(default = "default_true")]
    pub highlight_under_cursor_enabled: bool,

    /// How long the cursor must rest before the symbol under it is resolved (milliseconds).
    /// Values below 100ms are raised to 100ms.
    #[serde(default = "default_idle_interval")]
    pub highlight_under_cursor_interval_ms: u64,

    /// How often cursor movement is checked (milliseconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// File extensions (without the dot) that get semantic resolution
    #[serde(default = "default_semantic_extensions")]
    pub semantic_file_extensions: Vec<String>,

    /// Colors for semantically resolved symbols, by classification
    #[serde(default)]
    pub symbol_colors: SymbolColors,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_highlight_color() -> RgbColor {
    RgbColor(60, 60, 80)
}

fn default_idle_interval() -> u64 {
    150
}

fn default_poll_interval() -> u64 {
    100
}

fn default_semantic_extensions() -> Vec<String> {
    vec!["as".to_string(), "hx".to_string(), "ls".to_string()]
}

/// An RGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl From<RgbColor> for Color {
    fn from(c: RgbColor) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Indicator shape drawn over an occurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStyle {
    Plain,
    Squiggle,
    Teletype,
    Diagonal,
    Strike,
    Hidden,
    Box,
    #[default]
    RoundBox,
}

/// Colors for semantically resolved symbols
///
/// Getters and setters share the accessor colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SymbolColors {
    #[serde(default = "default_abstract_color")]
    pub abstract_color: RgbColor,
    #[serde(default = "default_typedef_color")]
    pub typedef_color: RgbColor,
    #[serde(default = "default_enum_color")]
    pub enum_color: RgbColor,
    #[serde(default = "default_class_color")]
    pub class_color: RgbColor,
    #[serde(default = "default_parameter_color")]
    pub parameter_color: RgbColor,
    #[serde(default = "default_local_variable_color")]
    pub local_variable_color: RgbColor,
    #[serde(default = "default_constant_color")]
    pub constant_color: RgbColor,
    #[serde(default = "default_variable_color")]
    pub variable_color: RgbColor,
    #[serde(default = "default_accessor_color")]
    pub accessor_color: RgbColor,
    #[serde(default = "default_method_color")]
    pub method_color: RgbColor,
    #[serde(default = "default_static_constant_color")]
    pub static_constant_color: RgbColor,
    #[serde(default = "default_static_variable_color")]
    pub static_variable_color: RgbColor,
    #[serde(default = "default_static_accessor_color")]
    pub static_accessor_color: RgbColor,
    #[serde(default = "default_static_method_color")]
    pub static_method_color: RgbColor,
    #[serde(default = "default_package_color")]
    pub package_color: RgbColor,
}

fn default_abstract_color() -> RgbColor {
    RgbColor(120, 80, 140)
}

fn default_typedef_color() -> RgbColor {
    RgbColor(90, 110, 140)
}

fn default_enum_color() -> RgbColor {
    RgbColor(140, 110, 60)
}

fn default_class_color() -> RgbColor {
    RgbColor(70, 100, 150)
}

fn default_parameter_color() -> RgbColor {
    RgbColor(150, 120, 70)
}

fn default_local_variable_color() -> RgbColor {
    RgbColor(80, 130, 80)
}

fn default_constant_color() -> RgbColor {
    RgbColor(150, 80, 80)
}

fn default_variable_color() -> RgbColor {
    RgbColor(80, 110, 130)
}

fn default_accessor_color() -> RgbColor {
    RgbColor(100, 120, 100)
}

fn default_method_color() -> RgbColor {
    RgbColor(110, 90, 130)
}

fn default_static_constant_color() -> RgbColor {
    RgbColor(170, 70, 70)
}

fn default_static_variable_color() -> RgbColor {
    RgbColor(70, 120, 150)
}

fn default_static_accessor_color() -> RgbColor {
    RgbColor(90, 140, 90)
}

fn default_static_method_color() -> RgbColor {
    RgbColor(130, 80, 150)
}

fn default_package_color() -> RgbColor {
    RgbColor(100, 100, 100)
}

impl Default for SymbolColors {
    fn default() -> Self {
        Self {
            abstract_color: default_abstract_color(),
            typedef_color: default_typedef_color(),
            enum_color: default_enum_color(),
            class_color: default_class_color(),
            parameter_color: default_parameter_color(),
            local_variable_color: default_local_variable_color(),
            constant_color: default_constant_color(),
            variable_color: default_variable_color(),
            accessor_color: default_accessor_color(),
            method_color: default_method_color(),
            static_constant_color: default_static_constant_color(),
            static_variable_color: default_static_variable_color(),
            static_accessor_color: default_static_accessor_color(),
            static_method_color: default_static_method_color(),
            package_color: default_package_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight_color: default_highlight_color(),
            highlight_style: IndicatorStyle::default(),
            whole_words: true,
            match_case: true,
            add_line_marker: false,
            enable_overview_bar: true,
            highlight_under_cursor_enabled: true,
            highlight_under_cursor_interval_ms: default_idle_interval(),
            poll_interval_ms: default_poll_interval(),
            semantic_file_extensions: default_semantic_extensions(),
            symbol_colors: SymbolColors::default(),
        }
    }
}

impl Config {
    /// Get the default settings file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("highlight-selection").join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load settings from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load settings from a JSON file
    ///
    /// Missing fields take their default values. The idle interval is clamped
    /// to its floor after loading.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.clamp_intervals();
        config.validate()?;

        Ok(config)
    }

    /// Save settings to a JSON file, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// JSON schema of the settings, for a settings editor
    pub fn schema() -> serde_json::Value {
        let schema = schemars::schema_for!(Config);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }

    /// Raise the idle interval to its floor
    pub fn clamp_intervals(&mut self) {
        if self.highlight_under_cursor_interval_ms < MIN_IDLE_INTERVAL_MS {
            self.highlight_under_cursor_interval_ms = MIN_IDLE_INTERVAL_MS;
        }
    }

    /// Delay before the symbol under a resting cursor is resolved
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(
            self.highlight_under_cursor_interval_ms
                .max(MIN_IDLE_INTERVAL_MS),
        )
    }

    /// Interval of the cursor polling timer
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Whether a file should get semantic resolution, by extension
    pub fn is_semantic_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.semantic_file_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self
            .semantic_file_extensions
            .iter()
            .any(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::ValidationError(
                "semantic_file_extensions entries must be non-empty and without a leading dot"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
