use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::distance::DistanceConfig;
use crate::layout::ColumnWidthSpec;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Warnings for deprecated keys found while loading, to be logged by the caller
    #[serde(skip)]
    pub deprecation_warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (holds the log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Auto-scroll settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Start scrolling as soon as the list is shown
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cells per step when positive, rows per step when negative, 0 disables
    #[serde(default)]
    pub distance: DistanceConfig,
    /// Milliseconds between scroll steps
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
    /// Cells moved per frame while stepping rows
    #[serde(default = "default_row_step")]
    pub row_step: u32,
    /// Frame rate of the row stepping animation
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            distance: DistanceConfig::default(),
            speed_ms: default_speed_ms(),
            row_step: default_row_step(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Total list height in rows including the header (0 = fill the area)
    #[serde(default)]
    pub height: u16,
    /// Column widths, e.g. "10,30%,auto", "avg", or a list of widths
    #[serde(default)]
    pub col_width: ColumnWidthSpec,
    #[serde(default)]
    pub header: HeaderConfig,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            height: 0,
            col_width: ColumnWidthSpec::default(),
            header: HeaderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Render the first data row as a fixed header
    #[serde(default = "default_true")]
    pub show: bool,
    /// Header height in rows
    #[serde(default = "default_header_height")]
    pub height: u16,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            show: default_true(),
            height: default_header_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while the marquee is idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// A configuration key that has been renamed or retired
#[derive(Debug, Clone, Copy)]
pub struct DeprecatedKey {
    /// Dotted path of the old key
    pub discard: &'static str,
    /// Dotted path the value moves to, if any
    pub replacement: Option<&'static str>,
    /// Message shown when the old key is used
    pub warn: Option<&'static str>,
}

pub const DEPRECATED_KEYS: &[DeprecatedKey] = &[
    DeprecatedKey {
        discard: "marquee.speed",
        replacement: Some("marquee.speed_ms"),
        warn: Some("`marquee.speed` is deprecated, use `marquee.speed_ms`"),
    },
    DeprecatedKey {
        discard: "marquee.enable",
        replacement: Some("marquee.enabled"),
        warn: None,
    },
    DeprecatedKey {
        discard: "list.header_height",
        replacement: Some("list.header.height"),
        warn: Some("`list.header_height` is deprecated, use `list.header.height`"),
    },
    DeprecatedKey {
        discard: "list.show_header",
        replacement: Some("list.header.show"),
        warn: Some("`list.show_header` is deprecated, use `list.header.show`"),
    },
    DeprecatedKey {
        discard: "marquee.row_index",
        replacement: None,
        warn: Some("`marquee.row_index` is not supported and will be ignored"),
    },
];

const GENERIC_DEPRECATION_WARNING: &str = "Used an obsolete configuration key";

/// Look up a dotted path in a TOML table
fn lookup<'a>(table: &'a toml::Table, path: &str) -> Option<&'a toml::Value> {
    let mut parts = path.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Write a value at a dotted path, creating intermediate tables as needed
fn assign(table: &mut toml::Table, path: &str, value: toml::Value) {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return;
    };

    let mut current = table;
    for part in parents {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        if !entry.is_table() {
            *entry = toml::Value::Table(toml::Table::new());
        }
        current = match entry {
            toml::Value::Table(inner) => inner,
            _ => return,
        };
    }
    current.insert(last.to_string(), value);
}

/// Move values of deprecated keys to their replacements.
///
/// Returns one warning message per deprecated key found in `table`. Config is
/// loaded before logging is set up, so the caller logs them.
pub fn migrate_deprecated(table: &mut toml::Table, keys: &[DeprecatedKey]) -> Vec<&'static str> {
    let mut warnings = Vec::new();

    for key in keys {
        let Some(value) = lookup(table, key.discard).cloned() else {
            continue;
        };

        if let Some(replacement) = key.replacement {
            assign(table, replacement, value);
        }

        warnings.push(key.warn.unwrap_or(GENERIC_DEPRECATION_WARNING));
    }

    warnings
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_speed_ms() -> u64 {
    3000
}

fn default_row_step() -> u32 {
    3
}

fn default_animation_fps() -> u32 {
    60
}

fn default_header_height() -> u16 {
    1
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration text, migrating deprecated keys first
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let mut table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))?;

        let warnings = migrate_deprecated(&mut table, DEPRECATED_KEYS);

        let mut config: Self = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))?;
        config.deprecation_warnings = warnings.into_iter().map(str::to_string).collect();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/marquee/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marquee")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("marquee.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
