//! # Pipeline Configuration
//!
//! Theme defaults, the CSS variable name table, and the contrast policy.
//! The configuration is immutable once a [`crate::ContentPipeline`] is built
//! from it; tests substitute alternate defaults by constructing their own.
//!
//! Every field has a default, so a configuration file only names what it
//! overrides:
//!
//! ```yaml
//! theme:
//!   primary: "#0f766e"
//! contrast:
//!   min_ratio: 4.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Rgb, GUARANTEED_CONTRAST};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "LANDING_CONFIG";

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Colors and fonts used when the document leaves them out.
    pub theme: ThemeDefaults,
    /// CSS custom property names the theme is exported under.
    pub css_variables: CssVariableNames,
    /// Minimum text/background contrast and the replacement text colors.
    pub contrast: ContrastPolicy,
    /// Code point limit for the derived meta description.
    pub meta_description_max: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            theme: ThemeDefaults::default(),
            css_variables: CssVariableNames::default(),
            contrast: ContrastPolicy::default(),
            meta_description_max: 160,
        }
    }
}

/// Default theme tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeDefaults {
    pub primary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
    pub font_heading: String,
    pub font_body: String,
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self {
            primary: "#2563eb".to_string(),
            background: "#ffffff".to_string(),
            text: "#111827".to_string(),
            accent: "#f59e0b".to_string(),
            font_heading: "Inter".to_string(),
            font_body: "Inter".to_string(),
        }
    }
}

/// CSS custom property names, one per theme token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssVariableNames {
    pub primary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
    pub font_heading: String,
    pub font_body: String,
}

impl Default for CssVariableNames {
    fn default() -> Self {
        Self {
            primary: "--landing-primary".to_string(),
            background: "--landing-background".to_string(),
            text: "--landing-text".to_string(),
            accent: "--landing-accent".to_string(),
            font_heading: "--landing-font-heading".to_string(),
            font_body: "--landing-font-body".to_string(),
        }
    }
}

/// Contrast enforcement policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastPolicy {
    /// Minimum WCAG contrast ratio between text and background.
    pub min_ratio: f64,
    /// Replacement text color for light backgrounds.
    pub dark_text: String,
    /// Replacement text color for dark backgrounds.
    pub light_text: String,
}

impl Default for ContrastPolicy {
    fn default() -> Self {
        Self {
            min_ratio: 4.5,
            dark_text: "#111827".to_string(),
            light_text: "#ffffff".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid YAML in '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid color for {field}: '{value}' is not a #rgb or #rrggbb hex value")]
    InvalidColor { field: &'static str, value: String },
    #[error("contrast.min_ratio must be between 1 and {max}, got {0}", max = GUARANTEED_CONTRAST)]
    InvalidRatio(f64),
    #[error("meta_description_max must be at least 1")]
    InvalidMetaLength,
}

impl PipelineConfig {
    /// Parse a YAML configuration document.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s).map_err(|source| ConfigError::Yaml {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file. `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let config: Self = if is_json {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: display,
                source,
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                path: display,
                source,
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `LANDING_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Check that every color parses and every bound is sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let colors = [
            ("theme.primary", &self.theme.primary),
            ("theme.background", &self.theme.background),
            ("theme.text", &self.theme.text),
            ("theme.accent", &self.theme.accent),
            ("contrast.dark_text", &self.contrast.dark_text),
            ("contrast.light_text", &self.contrast.light_text),
        ];
        for (field, value) in colors {
            if Rgb::parse_hex(value).is_none() {
                return Err(ConfigError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }
        let ratio = self.contrast.min_ratio;
        if !(1.0..=GUARANTEED_CONTRAST).contains(&ratio) {
            return Err(ConfigError::InvalidRatio(ratio));
        }
        if self.meta_description_max == 0 {
            return Err(ConfigError::InvalidMetaLength);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        PipelineConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config = PipelineConfig::from_yaml_str(
            "theme:\n  primary: \"#0f766e\"\ncontrast:\n  min_ratio: 3.0\n",
        )
        .unwrap();
        assert_eq!(config.theme.primary, "#0f766e");
        assert_eq!(config.theme.background, "#ffffff");
        assert_eq!(config.contrast.min_ratio, 3.0);
        assert_eq!(config.contrast.dark_text, "#111827");
        assert_eq!(config.meta_description_max, 160);
    }

    #[test]
    fn rejects_bad_default_color() {
        let err = PipelineConfig::from_yaml_str("theme:\n  text: blue\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidColor {
                field: "theme.text",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let err = PipelineConfig::from_yaml_str("contrast:\n  min_ratio: 30\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatio(_)));
    }

    #[test]
    fn rejects_ratio_black_and_white_cannot_guarantee() {
        let err = PipelineConfig::from_yaml_str("contrast:\n  min_ratio: 7.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatio(r) if r == 7.0));
        PipelineConfig::from_yaml_str("contrast:\n  min_ratio: 4.58\n").unwrap();
    }

    #[test]
    fn loads_json_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"meta_description_max": 120}}"#).unwrap();
        let config = PipelineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.meta_description_max, 120);
        assert_eq!(config.theme, ThemeDefaults::default());
    }

    #[test]
    fn loads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "css_variables:\n  primary: --brand").unwrap();
        let config = PipelineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.css_variables.primary, "--brand");
        assert_eq!(config.css_variables.text, "--landing-text");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PipelineConfig::from_path(Path::new("/nonexistent/landing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
