//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top key by key,
//! so a config file only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title_prefix = "Parroquia"        # Plain part of the header title
//! title_highlight = "San José"      # Emphasized part of the header title
//! lang = "es"                       # <html lang="...">
//!
//! [content]
//! endpoint = "http://localhost:4000/api/content"
//! timeout_secs = 10                 # Whole-request timeout for the single fetch
//!
//! [colors]
//! accent_gold = "#d4af37"
//! accent_gold_soft = "#f5e7b2"
//! accent_green = "#1f4d3b"
//! accent_green_soft = "#e3f2e9"
//! bg_soft = "#f9fafb"
//! bg_alt = "#f5f5f4"
//! text_main = "#111827"
//! text_muted = "#4b5563"
//! border_subtle = "#e5e7eb"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Header title and document language.
    pub site: SiteSection,
    /// Where the override content comes from.
    pub content: ContentConfig,
    /// Page palette, emitted as CSS custom properties.
    pub colors: Palette,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.content.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "content.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        if !(1..=300).contains(&self.content.timeout_secs) {
            return Err(ConfigError::Validation(
                "content.timeout_secs must be 1-300".into(),
            ));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title_prefix: String,
    pub title_highlight: String,
    pub lang: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title_prefix: "Parroquia".to_string(),
            title_highlight: "San José".to_string(),
            lang: "es".to_string(),
        }
    }
}

/// Content endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// URL answering `GET` with a partial content document.
    pub endpoint: String,
    /// Timeout in seconds for the whole request (connect + body).
    pub timeout_secs: u64,
}

impl ContentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/api/content".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub accent_gold: String,
    pub accent_gold_soft: String,
    pub accent_green: String,
    pub accent_green_soft: String,
    pub bg_soft: String,
    pub bg_alt: String,
    pub text_main: String,
    pub text_muted: String,
    pub border_subtle: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent_gold: "#d4af37".to_string(),
            accent_gold_soft: "#f5e7b2".to_string(),
            accent_green: "#1f4d3b".to_string(),
            accent_green_soft: "#e3f2e9".to_string(),
            bg_soft: "#f9fafb".to_string(),
            bg_alt: "#f5f5f4".to_string(),
            text_main: "#111827".to_string(),
            text_muted: "#4b5563".to_string(),
            border_subtle: "#e5e7eb".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Lay a `site.toml` value over the stock defaults. Sections merge key by
/// key; any other value in `overlay` wins outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `site.toml` without applying defaults. A missing file is `None`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Final `SiteConfig` from the stock defaults plus the user's `site.toml`, if any.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from `path`, falling back to stock defaults when absent.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("No config at {}, using stock defaults", path.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Parish Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Header title, rendered as "<prefix> <highlight>" with the highlight emphasized.
title_prefix = "Parroquia"
title_highlight = "San José"

# Document language (<html lang="...">).
lang = "es"

# ---------------------------------------------------------------------------
# Content endpoint
# ---------------------------------------------------------------------------
[content]
# Fetched once per build. Any field the endpoint omits keeps its bundled default.
# If the request fails, the bundled default content is used as-is.
endpoint = "http://localhost:4000/api/content"

# Timeout in seconds for the whole request (1-300).
timeout_secs = 10

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
accent_gold = "#d4af37"
accent_gold_soft = "#f5e7b2"
accent_green = "#1f4d3b"
accent_green_soft = "#e3f2e9"
bg_soft = "#f9fafb"
bg_alt = "#f5f5f4"
text_main = "#111827"
text_muted = "#4b5563"
border_subtle = "#e5e7eb"
"##
}

/// Generate CSS custom properties from the palette.
pub fn generate_color_css(colors: &Palette) -> String {
    format!(
        r#":root {{
    --accent-gold: {accent_gold};
    --accent-gold-soft: {accent_gold_soft};
    --accent-green: {accent_green};
    --accent-green-soft: {accent_green_soft};
    --bg-soft: {bg_soft};
    --bg-alt: {bg_alt};
    --text-main: {text_main};
    --text-muted: {text_muted};
    --border-subtle: {border_subtle};
}}"#,
        accent_gold = colors.accent_gold,
        accent_gold_soft = colors.accent_gold_soft,
        accent_green = colors.accent_green,
        accent_green_soft = colors.accent_green_soft,
        bg_soft = colors.bg_soft,
        bg_alt = colors.bg_alt,
        text_main = colors.text_main,
        text_muted = colors.text_muted,
        border_subtle = colors.border_subtle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site.lang, "es");
        assert_eq!(config.content.endpoint, "http://localhost:4000/api/content");
        assert_eq!(config.content.timeout(), Duration::from_secs(10));
        assert_eq!(config.colors.accent_gold, "#d4af37");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent_green = "#224433"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.accent_green, "#224433");
        // Default values preserved
        assert_eq!(config.colors.accent_gold, "#d4af37");
        assert_eq!(config.content.timeout_secs, 10);
    }

    #[test]
    fn generate_css_uses_palette() {
        let mut colors = Palette::default();
        colors.accent_gold = "#c9a227".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--accent-gold: #c9a227"));
        assert!(css.contains("--text-muted: #4b5563"));
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&Palette::default());
        for var in [
            "--accent-gold:",
            "--accent-gold-soft:",
            "--accent-green:",
            "--accent-green-soft:",
            "--bg-soft:",
            "--bg-alt:",
            "--text-main:",
            "--text-muted:",
            "--border-subtle:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(config.content.endpoint, "http://localhost:4000/api/content");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[content]
endpoint = "https://parroquia.example/api/content"

[site]
title_highlight = "San Judas Tadeo"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.content.endpoint, "https://parroquia.example/api/content");
        assert_eq!(config.site.title_highlight, "San Judas Tadeo");
        // Unspecified values should be defaults
        assert_eq!(config.content.timeout_secs, 10);
        assert_eq!(config.site.title_prefix, "Parroquia");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[content]
timeout_secs = 0
"#,
        )
        .unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"timeout_secs = 10"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"timeout_secs = 3"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("timeout_secs").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[content]
endpoint = "http://localhost:4000/api/content"
timeout_secs = 10
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[content]
timeout_secs = 5
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let content = merged.get("content").unwrap();
        assert_eq!(content.get("timeout_secs").unwrap().as_integer(), Some(5));
        assert_eq!(
            content.get("endpoint").unwrap().as_str(),
            Some("http://localhost:4000/api/content")
        );
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[content]
endpont = "http://localhost:4000/api/content"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[theme]
gap = "1rem"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            r##"
[colors]
gold = "#fff"
"##,
        )
        .unwrap();

        assert!(load_config(&path).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_endpoint_scheme() {
        let mut config = SiteConfig::default();
        config.content.endpoint = "localhost:4000/api/content".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content.endpoint"));

        config.content.endpoint = "https://parroquia.example/api/content".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_timeout_bounds() {
        let mut config = SiteConfig::default();
        config.content.timeout_secs = 300;
        assert!(config.validate().is_ok());

        config.content.timeout_secs = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_lang_not_blank() {
        let mut config = SiteConfig::default();
        config.site.lang = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_raw_config(&tmp.path().join("site.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[site]
lang = "es-MX"
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.site.lang, "es-MX");
        assert_eq!(config.site.title_highlight, "San José");
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.content.endpoint, defaults.content.endpoint);
        assert_eq!(config.content.timeout_secs, defaults.content.timeout_secs);
        assert_eq!(config.site.title_highlight, defaults.site.title_highlight);
        assert_eq!(config.colors.border_subtle, defaults.colors.border_subtle);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[content]"));
        assert!(content.contains("[colors]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        assert!(val.get("site").is_some());
        assert!(val.get("content").is_some());
        assert!(val.get("colors").is_some());
    }
}
