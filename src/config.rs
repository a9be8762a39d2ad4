//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! store_path = "frames-of-life-store.json"  # Persisted content and session
//!
//! [site]
//! name = "Frames of Life"
//! headline = "Capturing Life's"
//! headline_emphasis = "Precious Moments"
//! intro = "Professional photography services that ..."
//! hero_image = "https://images.unsplash.com/..."
//! about = "Capturing life's precious moments ..."   # Markdown
//! address = "123 Photography Lane, Creative City, 12345"
//! phone = "+1 (555) 123-4567"
//! email = "info@framesoflife.com"
//! placeholder_thumbnail = "https://via.placeholder.com/400x300?text=Image+Not+Found"
//! placeholder_full = "https://via.placeholder.com/800x600?text=Image+Not+Found"
//!
//! [admin]
//! username = "admin"
//! password = "password"
//!
//! [enquiry]
//! submit_delay_ms = 1500        # Simulated sending time
//! confirmation_delay_ms = 3000  # How long "Thank You!" stays up
//!
//! [colors]
//! accent = "#f59e0b"
//! accent_hover = "#d97706"
//! background = "#0a0a0a"
//! surface = "#171717"
//! border = "#262626"
//! text = "#ffffff"
//! text_muted = "#9ca3af"
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
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// File holding the persisted content and admin session.
    pub store_path: String,
    /// Business details shown on the public site.
    pub site: SiteInfo,
    /// The single admin credential pair.
    pub admin: AdminConfig,
    /// Enquiry dialog timing.
    pub enquiry: EnquiryConfig,
    /// Palette, emitted as CSS custom properties.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            store_path: "frames-of-life-store.json".to_string(),
            site: SiteInfo::default(),
            admin: AdminConfig::default(),
            enquiry: EnquiryConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reject values the site cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.trim().is_empty() {
            return Err(ConfigError::Validation("store_path must not be empty".into()));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.admin.username.is_empty() || self.admin.password.is_empty() {
            return Err(ConfigError::Validation(
                "admin.username and admin.password must not be empty".into(),
            ));
        }
        for (name, value) in self.colors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Business name, used in the title, navigation and footer.
    pub name: String,
    /// First line of the hero heading (accent colored).
    pub headline: String,
    /// Second line of the hero heading.
    pub headline_emphasis: String,
    /// Hero paragraph.
    pub intro: String,
    /// Hero background image.
    pub hero_image: String,
    /// Footer blurb. Markdown.
    pub about: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Shown in the gallery grid when an image fails to load.
    pub placeholder_thumbnail: String,
    /// Shown in the lightbox when an image fails to load.
    pub placeholder_full: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Frames of Life".to_string(),
            headline: "Capturing Life's".to_string(),
            headline_emphasis: "Precious Moments".to_string(),
            intro: "Professional photography services that transform ordinary moments into \
                    extraordinary memories. Let us tell your story through our lens."
                .to_string(),
            hero_image: "https://images.unsplash.com/photo-1492691527719-9d1e07e534b4\
                         ?ixlib=rb-1.2.1&auto=format&fit=crop&w=1950&q=80"
                .to_string(),
            about: "Capturing life's precious moments with artistic vision and technical \
                    excellence."
                .to_string(),
            address: "123 Photography Lane, Creative City, 12345".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: "info@framesoflife.com".to_string(),
            placeholder_thumbnail: "https://via.placeholder.com/400x300?text=Image+Not+Found"
                .to_string(),
            placeholder_full: "https://via.placeholder.com/800x600?text=Image+Not+Found"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnquiryConfig {
    /// Time the simulated intake takes to "send" an enquiry.
    pub submit_delay_ms: u64,
    /// Time the confirmation stays visible before the dialog closes.
    pub confirmation_delay_ms: u64,
}

impl Default for EnquiryConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            confirmation_delay_ms: 3000,
        }
    }
}

impl EnquiryConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }
}

/// The site's single dark palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Brand accent: headings, buttons, the popular plan.
    pub accent: String,
    pub accent_hover: String,
    pub background: String,
    /// Cards, dialogs and the footer.
    pub surface: String,
    pub border: String,
    pub text: String,
    /// Secondary text.
    pub text_muted: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: "#f59e0b".to_string(),
            accent_hover: "#d97706".to_string(),
            background: "#0a0a0a".to_string(),
            surface: "#171717".to_string(),
            border: "#262626".to_string(),
            text: "#ffffff".to_string(),
            text_muted: "#9ca3af".to_string(),
        }
    }
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("accent", self.accent.as_str()),
            ("accent_hover", self.accent_hover.as_str()),
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("border", self.border.as_str()),
            ("text", self.text.as_str()),
            ("text_muted", self.text_muted.as_str()),
        ]
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but is
/// not valid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
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

/// Load the config file at `path`, falling back to stock defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Frames of Life Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# File holding the gallery, pricing plans and admin session.
store_path = "frames-of-life-store.json"

# ---------------------------------------------------------------------------
# Business details
# ---------------------------------------------------------------------------
[site]
name = "Frames of Life"

# Hero heading, split over two lines. The first line uses the accent color.
headline = "Capturing Life's"
headline_emphasis = "Precious Moments"
intro = "Professional photography services that transform ordinary moments into extraordinary memories. Let us tell your story through our lens."
hero_image = "https://images.unsplash.com/photo-1492691527719-9d1e07e534b4?ixlib=rb-1.2.1&auto=format&fit=crop&w=1950&q=80"

# Footer blurb. Markdown is supported.
about = "Capturing life's precious moments with artistic vision and technical excellence."

address = "123 Photography Lane, Creative City, 12345"
phone = "+1 (555) 123-4567"
email = "info@framesoflife.com"

# Substituted when a gallery image fails to load.
placeholder_thumbnail = "https://via.placeholder.com/400x300?text=Image+Not+Found"
placeholder_full = "https://via.placeholder.com/800x600?text=Image+Not+Found"

# ---------------------------------------------------------------------------
# Admin login
# ---------------------------------------------------------------------------
[admin]
username = "admin"
password = "password"

# ---------------------------------------------------------------------------
# Enquiry dialog
# ---------------------------------------------------------------------------
[enquiry]
# Simulated sending time, in milliseconds.
submit_delay_ms = 1500

# How long the confirmation stays visible before the dialog closes.
confirmation_delay_ms = 3000

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
accent = "#f59e0b"
accent_hover = "#d97706"
background = "#0a0a0a"
surface = "#171717"        # Cards, dialogs, footer
border = "#262626"
text = "#ffffff"
text_muted = "#9ca3af"     # Descriptions, captions
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-accent: {accent};
    --color-accent-hover: {accent_hover};
    --color-bg: {background};
    --color-surface: {surface};
    --color-border: {border};
    --color-text: {text};
    --color-text-muted: {text_muted};
}}"#,
        accent = colors.accent,
        accent_hover = colors.accent_hover,
        background = colors.background,
        surface = colors.surface,
        border = colors.border,
        text = colors.text,
        text_muted = colors.text_muted,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, body: &str) -> std::path::PathBuf {
        let path = tmp.path().join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn default_config_has_business_details() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Frames of Life");
        assert_eq!(config.site.email, "info@framesoflife.com");
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "password");
    }

    #[test]
    fn default_enquiry_delays() {
        let config = SiteConfig::default();
        assert_eq!(config.enquiry.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.enquiry.confirmation_delay(), Duration::from_secs(3));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent = "#eab308"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.accent, "#eab308");
        assert_eq!(config.colors.background, "#0a0a0a");
        assert_eq!(config.site.name, "Frames of Life");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.accent = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #123456"));
        assert!(css.contains("--color-bg: #0a0a0a"));
        assert!(css.contains("--color-text-muted: #9ca3af"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.store_path, "frames-of-life-store.json");
        assert_eq!(config.colors.accent, "#f59e0b");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
store_path = "data/store.json"

[admin]
password = "s3cret"

[enquiry]
submit_delay_ms = 10
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.store_path, "data/store.json");
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "s3cret");
        assert_eq!(config.enquiry.submit_delay_ms, 10);
        assert_eq!(config.enquiry.confirmation_delay_ms, 3000);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "this is not valid toml [[[");
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[site]
nmae = "Typo Studio"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[images]\nquality = 90\n");
        assert!(load_config(&path).is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_password() {
        let mut config = SiteConfig::default();
        config.admin.password = String::new();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("admin.password"));
    }

    #[test]
    fn validate_blank_color() {
        let mut config = SiteConfig::default();
        config.colors.surface = "  ".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("colors.surface"));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "store_path = \"\"\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r##"
[colors]
accent = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors]
accent = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let colors = merged.get("colors").unwrap();
        assert_eq!(colors.get("accent").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(colors.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.store_path, defaults.store_path);
        assert_eq!(config.site.intro, defaults.site.intro);
        assert_eq!(config.site.hero_image, defaults.site.hero_image);
        assert_eq!(config.site.about, defaults.site.about);
        assert_eq!(config.enquiry.confirmation_delay_ms, 3000);
        assert_eq!(config.colors.text_muted, defaults.colors.text_muted);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value().unwrap();
        for section in ["site", "admin", "enquiry", "colors"] {
            assert!(value.get(section).is_some(), "missing [{section}]");
        }
    }
}
