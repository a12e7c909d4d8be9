//! Dashboard configuration.
//!
//! Loaded from a YAML file with environment variable substitution using
//! `${VAR}` and `${VAR:-default}` syntax. Every section has defaults, so an
//! empty file (or no file at all) shows the stub observation on the default
//! panel.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use epd_common::StationReport;
use epd_driver::Panel;
use renderer::{BarbStyle, FontSizes};
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub display: DisplayConfig,
    pub fonts: FontConfig,
    pub icons: IconConfig,
    pub preview: PreviewConfig,
    pub barbs: BarbStyle,
    /// Observation to show; the built-in stub when absent
    pub station: Option<StationReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Panel model name, e.g. `7in5_v2`
    pub panel: String,
    /// Spool file the panel daemon reads frames from
    pub frame_path: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            panel: Panel::default().name.to_string(),
            frame_path: PathBuf::from("/var/spool/epd/frame.bin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub path: PathBuf,
    #[serde(flatten)]
    pub sizes: FontSizes,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pic/Font.ttc"),
            sizes: FontSizes::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub dir: PathBuf,
    pub scale: f32,
    pub inverted: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("pic"),
            scale: 0.8,
            inverted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Output file; timestamped name in the working directory when unset
    pub path: Option<PathBuf>,
    pub scale: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            path: None,
            scale: renderer::preview::DEFAULT_PREVIEW_SCALE,
        }
    }
}

impl DashboardConfig {
    /// Resolved panel model.
    pub fn panel(&self) -> Result<Panel> {
        Ok(Panel::from_name(&self.display.panel)?)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load, expand and validate a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read dashboard config from {:?}", path.as_ref()))?;
    parse_config(&content)
        .with_context(|| format!("Invalid dashboard config {:?}", path.as_ref()))
}

/// Parse configuration YAML. Blank input yields the defaults.
pub fn parse_config(content: &str) -> Result<DashboardConfig> {
    let expanded = expand_env_vars(content)?;

    let config: DashboardConfig = if expanded.trim().is_empty() {
        DashboardConfig::default()
    } else {
        serde_yaml::from_str(&expanded).context("Failed to parse dashboard config YAML")?
    };

    validate_config(&config)?;
    Ok(config)
}

/// Expand environment variables in `${VAR}` and `${VAR:-default}` form.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr))
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_config(config: &DashboardConfig) -> Result<()> {
    config.panel()?;

    let sizes = &config.fonts.sizes;
    anyhow::ensure!(
        sizes.large > 0.0 && sizes.medium > 0.0 && sizes.small > 0.0,
        "Font sizes must be positive, got {:?}",
        sizes
    );

    anyhow::ensure!(
        config.icons.scale > 0.0,
        "Icon scale must be positive, got {}",
        config.icons.scale
    );
    anyhow::ensure!(
        config.preview.scale >= 1,
        "Preview scale must be at least 1, got {}",
        config.preview.scale
    );

    anyhow::ensure!(
        config.barbs.scale > 0.0,
        "Barb scale must be positive, got {}",
        config.barbs.scale
    );
    anyhow::ensure!(
        config.barbs.line_width >= 1,
        "Barb line width must be at least 1"
    );

    if let Some(station) = &config.station {
        anyhow::ensure!(
            !station.station_id.trim().is_empty(),
            "Station id cannot be empty"
        );
        for reading in &station.winds {
            reading
                .sample
                .validate()
                .with_context(|| format!("Wind reading '{}'", reading.label))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use epd_common::{Color, FlightCategory};

    #[test]
    fn test_expand_env_vars_simple() {
        std::env::set_var("DASHBOARD_TEST_PANEL", "4in2");
        let result = expand_env_vars("panel: ${DASHBOARD_TEST_PANEL}").unwrap();
        assert_eq!(result, "panel: 4in2");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("DASHBOARD_TEST_UNSET");
        let result = expand_env_vars("x_${DASHBOARD_TEST_UNSET:-fallback}_y").unwrap();
        assert_eq!(result, "x_fallback_y");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        std::env::remove_var("DASHBOARD_TEST_REQUIRED");
        assert!(expand_env_vars("${DASHBOARD_TEST_REQUIRED}").is_err());
    }

    #[test]
    fn test_expand_env_vars_unclosed() {
        assert!(expand_env_vars("path: ${HOME").is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.panel().unwrap(), Panel::EPD_7IN5_V2);
        assert_eq!(config.icons.scale, 0.8);
        assert_eq!(config.preview.scale, 2);
        assert!(config.station.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            "display:\n  panel: 4in2\nfonts:\n  medium: 20\nbarbs:\n  scale: 2.0\n  color: white\n",
        )
        .unwrap();
        assert_eq!(config.panel().unwrap(), Panel::EPD_4IN2);
        assert_eq!(config.fonts.sizes.medium, 20.0);
        assert_eq!(config.fonts.sizes.large, 35.0);
        assert_eq!(config.barbs.scale, 2.0);
        assert_eq!(config.barbs.color, Color::White);
        assert_eq!(config.barbs.barb_angle_degrees, -60.0);
    }

    #[test]
    fn test_station_section() {
        let yaml = r#"
station:
  station_id: KBOS
  observed_at: 2024-03-09T13:21:00Z
  flight_category: IFR
  winds:
    - { label: SFC, speed_knots: 12, direction_degrees: 40 }
"#;
        let config = parse_config(yaml).unwrap();
        let station = config.station.unwrap();
        assert_eq!(station.station_id, "KBOS");
        assert_eq!(station.flight_category, FlightCategory::Ifr);
        assert_eq!(station.winds[0].sample.speed_knots, 12.0);
    }

    #[test]
    fn test_unknown_panel_rejected() {
        assert!(parse_config("display:\n  panel: 13in3\n").is_err());
    }

    #[test]
    fn test_negative_wind_rejected() {
        let yaml = r#"
station:
  station_id: KBOS
  observed_at: 2024-03-09T13:21:00Z
  winds:
    - { label: SFC, speed_knots: -2, direction_degrees: 40 }
"#;
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn test_infinite_wind_rejected() {
        let yaml = r#"
station:
  station_id: KBOS
  observed_at: 2024-03-09T13:21:00Z
  winds:
    - { label: SFC, speed_knots: .inf, direction_degrees: 40 }
"#;
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn test_bad_scales_rejected() {
        assert!(parse_config("preview:\n  scale: 0\n").is_err());
        assert!(parse_config("icons:\n  scale: 0\n").is_err());
        assert!(parse_config("barbs:\n  line_width: 0\n").is_err());
    }

    #[test]
    fn test_shipped_config_parses() {
        let content = include_str!("../../../config/dashboard.yaml");
        let config = parse_config(content).unwrap();
        assert_eq!(config.barbs.scale, 1.5);
        assert_eq!(config.barbs.line_width, 2);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.yaml");
        fs::write(&path, "preview:\n  scale: 3\n").unwrap();
        assert_eq!(load_config(&path).unwrap().preview.scale, 3);

        assert!(load_config(dir.path().join("missing.yaml")).is_err());
    }
}
