use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gate::{ThresholdGate, DEFAULT_CONFIDENCE_THRESHOLD};

pub const CONFIG_FILE_NAME: &str = "main.yaml";

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_recent_limit() -> usize {
    10
}

fn default_export_file_name() -> String {
    "fallacy_analysis_history.csv".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Rows shown by history listings.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallacyConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl FallacyConfig {
    pub fn gate(&self) -> Result<ThresholdGate> {
        ThresholdGate::new(self.analysis.confidence_threshold)
            .context("invalid analysis.confidence_threshold")
    }
}

/// Load `<dir>/main.yaml`. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<FallacyConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(FallacyConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let mut config: FallacyConfig = if content.trim().is_empty() {
        FallacyConfig::default()
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse yaml file: {}", path.display()))?
    };

    config.export.file_name = resolve_env_var(&config.export.file_name);

    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &FallacyConfig) -> Result<()> {
    let threshold = config.analysis.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(anyhow!(
            "analysis.confidence_threshold must be within [0.0, 1.0]: {threshold}"
        ));
    }

    if config.history.recent_limit == 0 {
        return Err(anyhow!("history.recent_limit must be greater than zero"));
    }

    if config.export.file_name.trim().is_empty() {
        return Err(anyhow!("export.file_name must not be empty"));
    }

    Ok(())
}

/// Replace every `${NAME}` with the value of that environment variable.
/// Unset variables become empty; an unclosed `${` is kept verbatim.
pub fn resolve_env_var(raw: &str) -> String {
    let mut output = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);

        let candidate = &rest[start + 2..];
        let Some(end) = candidate.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = &candidate[..end];
        output.push_str(&std::env::var(key).unwrap_or_default());
        rest = &candidate[end + 1..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, yaml: &str) {
        fs::write(dir.join(CONFIG_FILE_NAME), yaml).unwrap();
    }

    fn fixture_config_root() -> std::path::PathBuf {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
    }

    #[test]
    fn load_config_from_workspace_fixture() {
        let config = load_config(&fixture_config_root()).unwrap();
        assert_eq!(config, FallacyConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, FallacyConfig::default());
        assert_eq!(config.analysis.confidence_threshold, 0.5);
        assert_eq!(config.history.recent_limit, 10);
        assert_eq!(config.export.file_name, "fallacy_analysis_history.csv");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "analysis:\n  confidence_threshold: 0.75\n");
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.analysis.confidence_threshold, 0.75);
        assert_eq!(config.history.recent_limit, 10);
        assert_eq!(config.gate().unwrap().threshold(), 0.75);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "\n");
        assert_eq!(load_config(tmp.path()).unwrap(), FallacyConfig::default());
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "analysis: [unclosed\n");
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse yaml file"));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "analysis:\n  confidence_threshold: 1.2\n");
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("confidence_threshold"));
    }

    #[test]
    fn validate_config_rejects_zero_recent_limit() {
        let mut config = FallacyConfig::default();
        config.history.recent_limit = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("recent_limit"));
    }

    #[test]
    fn validate_config_rejects_blank_export_name() {
        let mut config = FallacyConfig::default();
        config.export.file_name = "  ".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("export.file_name"));
    }

    #[test]
    fn export_file_name_resolves_env() {
        let tmp = tempfile::tempdir().unwrap();
        let home = std::env::var("HOME").unwrap_or_default();
        write_config(tmp.path(), "export:\n  file_name: \"${HOME}/history.csv\"\n");
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.export.file_name, format!("{home}/history.csv"));
    }

    #[test]
    fn resolve_env_var_returns_raw_when_not_placeholder() {
        assert_eq!(resolve_env_var("plain-value"), "plain-value");
    }

    #[test]
    fn resolve_env_var_unclosed_bracket() {
        assert_eq!(resolve_env_var("prefix_${UNCLOSED"), "prefix_${UNCLOSED");
    }

    #[test]
    fn resolve_env_var_missing_env_returns_empty() {
        let result = resolve_env_var("val=${FALLACY_NONEXISTENT_VAR_XYZ}");
        assert_eq!(result, "val=");
    }
}
