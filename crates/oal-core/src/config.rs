use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::case::CaseConvention;

/// How a finding for a given check is reported. `Off` disables the check
/// entirely: no finding, no fix attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Off,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Off => write!(f, "off"),
        }
    }
}

/// Severity plus convention, configured as a two-element sequence:
/// `[warning, lower_snake_case]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSetting(pub Severity, pub CaseConvention);

/// Per-check settings for operation rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OperationsConfig {
    pub no_operation_id: Severity,
    pub operation_id_case_convention: CaseSetting,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            no_operation_id: Severity::Warning,
            operation_id_case_convention: CaseSetting(
                Severity::Warning,
                CaseConvention::LowerSnakeCase,
            ),
        }
    }
}

/// Top-level rule configuration loaded from `.oal.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub operations: OperationsConfig,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oal.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RuleConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: RuleConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oal configuration — https://github.com/urmzd/openapi-linter
operations:
  no_operation_id: warning      # error | warning | off
  operation_id_case_convention: [warning, lower_snake_case]
  # conventions: lower_snake_case | upper_snake_case | lower_camel_case
  #              | upper_camel_case | lower_dash_case | upper_dash_case
"#
}
