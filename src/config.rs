//! Configuration management for rotary.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-directory configuration file
pub const PROJECT_CONFIG_FILE: &str = ".rotary.toml";

/// Largest accepted digit width, height or spacing, in cells
pub const MAX_DIGIT_CELLS: u16 = 1024;

/// Largest accepted number of digits at startup
pub const MAX_INITIAL_DIGITS: usize = 1024;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotaryConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub digits: DigitConfig,
}

impl RotaryConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.rotary.toml in the working directory)
        if let Some(root) = project_root {
            let project_config = root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/rotary/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "rotary", "rotary") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (ROTARY__*)
        builder = builder.add_source(
            Environment::with_prefix("ROTARY")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the digit row cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digits.width == 0 || self.digits.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "digit size must be non-zero, got {}x{}",
                self.digits.width, self.digits.height
            )));
        }
        let sizes = [
            ("width", self.digits.width),
            ("height", self.digits.height),
            ("spacing", self.digits.spacing),
        ];
        if let Some((name, value)) = sizes.iter().find(|(_, v)| *v > MAX_DIGIT_CELLS) {
            return Err(ConfigError::Invalid(format!(
                "digit {name} must be at most {MAX_DIGIT_CELLS}, got {value}"
            )));
        }
        if self.digits.initial_count == 0 {
            return Err(ConfigError::Invalid(
                "at least one digit must be shown".to_string(),
            ));
        }
        if self.digits.initial_count > MAX_INITIAL_DIGITS {
            return Err(ConfigError::Invalid(format!(
                "at most {MAX_INITIAL_DIGITS} digits can be shown at startup, got {}",
                self.digits.initial_count
            )));
        }
        Ok(())
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Capture mouse events (required for clicking digits and buttons)
    #[serde(default = "default_mouse_capture")]
    pub mouse_capture: bool,
    /// Enable vim-style navigation (h/j/k/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            mouse_capture: default_mouse_capture(),
            vim_navigation: default_vim_navigation(),
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_mouse_capture() -> bool {
    true
}

fn default_vim_navigation() -> bool {
    true
}

/// Digit row configuration. Sizes are in terminal cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitConfig {
    #[serde(default = "default_digit_width")]
    pub width: u16,
    /// Multiples of three keep the zones aligned to cell rows
    #[serde(default = "default_digit_height")]
    pub height: u16,
    /// Horizontal and vertical gap between digits
    #[serde(default = "default_spacing")]
    pub spacing: u16,
    /// Number of digits shown at startup
    #[serde(default = "default_initial_count")]
    pub initial_count: usize,
    /// Whether direct keyboard entry starts enabled
    #[serde(default)]
    pub input_enabled: bool,
}

impl Default for DigitConfig {
    fn default() -> Self {
        Self {
            width: default_digit_width(),
            height: default_digit_height(),
            spacing: default_spacing(),
            initial_count: default_initial_count(),
            input_enabled: false,
        }
    }
}

fn default_digit_width() -> u16 {
    7
}

fn default_digit_height() -> u16 {
    9
}

fn default_spacing() -> u16 {
    1
}

fn default_initial_count() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RotaryConfig::default();
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.mouse_capture);
        assert!(config.ui.vim_navigation);
        assert_eq!(config.digits.width, 7);
        assert_eq!(config.digits.height, 9);
        assert_eq!(config.digits.spacing, 1);
        assert_eq!(config.digits.initial_count, 1);
        assert!(!config.digits.input_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[digits]\ninitial_count = 4\ninput_enabled = true\n",
        )
        .unwrap();

        let config = RotaryConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.digits.initial_count, 4);
        assert!(config.digits.input_enabled);
        // Untouched keys keep their defaults
        assert_eq!(config.digits.width, 7);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[digits]\nheight = 0\n",
        )
        .unwrap();

        let err = RotaryConfig::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_initial_count_invalid() {
        let mut config = RotaryConfig::default();
        config.digits.initial_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_digits_invalid() {
        let mut config = RotaryConfig::default();
        config.digits.width = u16::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = RotaryConfig::default();
        config.digits.spacing = MAX_DIGIT_CELLS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = RotaryConfig::default();
        config.digits.initial_count = MAX_INITIAL_DIGITS + 1;
        assert!(config.validate().is_err());

        let mut config = RotaryConfig::default();
        config.digits.width = MAX_DIGIT_CELLS;
        config.digits.height = MAX_DIGIT_CELLS;
        config.digits.spacing = MAX_DIGIT_CELLS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_project_config_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[digits]\nwidth = 65535\n",
        )
        .unwrap();

        let err = RotaryConfig::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
