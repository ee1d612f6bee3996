//! Configuration file model

use crate::settings::{MapperSettings, RuleSettings};
use crate::{ApiCompatError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root of an apicompat configuration file
///
/// ```yaml
/// diffing:
///   includeInternalSymbols: false
///   noWarn: "CP0003"
///   ignoredDifferences:
///     - diagnosticId: CP0002
///       memberId: "M:Contoso.Client.Legacy"
/// inputs:
///   left: ["contract/Contoso.json"]
///   rightDirectories: ["bin/surfaces"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiCompatConfig {
    /// JSON schema reference, ignored when loading
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// How differences are computed and filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffing: Option<DiffingSettings>,

    /// Where the two sides are loaded from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<InputsConfiguration>,
}

impl ApiCompatConfig {
    /// Load from a `.json`, `.toml`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ApiCompatError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("Unsupported file extension (expected .json, .toml, .yaml or .yml)".to_string()),
        };

        parsed.map_err(|message| {
            ApiCompatError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            ))
        })
    }

    pub fn diffing_settings(&self) -> DiffingSettings {
        self.diffing.clone().unwrap_or_default()
    }

    pub fn inputs_config(&self) -> InputsConfiguration {
        self.inputs.clone().unwrap_or_default()
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(ApiCompatConfig);
        serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
    }
}

/// Settings consumed by the comparison core
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffingSettings {
    /// Compare internal API as well as public API
    pub include_internal_symbols: bool,

    /// Also report API that exists only on the implementation
    pub strict_mode: bool,

    /// Compare assembly version, culture and public key token
    pub validate_assembly_identity: bool,

    /// Diagnostic ids suppressed globally, separated by `;` or `,`
    pub no_warn: String,

    /// Individually suppressed differences
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_differences: Vec<IgnoredDifference>,
}

impl DiffingSettings {
    pub fn mapper_settings(&self) -> MapperSettings {
        MapperSettings::new(self.include_internal_symbols)
    }

    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings::new(self.include_internal_symbols)
            .with_strict_mode(self.strict_mode)
            .with_identity_validation(self.validate_assembly_identity)
    }

    /// `(diagnostic id, member id)` pairs for the suppression bag
    pub fn ignored_pairs(&self) -> Vec<(String, String)> {
        self.ignored_differences
            .iter()
            .map(|d| (d.diagnostic_id.clone(), d.member_id.clone()))
            .collect()
    }
}

/// One suppressed (diagnostic id, member id) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredDifference {
    pub diagnostic_id: String,
    pub member_id: String,
}

impl IgnoredDifference {
    pub fn new(diagnostic_id: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self {
            diagnostic_id: diagnostic_id.into(),
            member_id: member_id.into(),
        }
    }
}

/// Input locations for both sides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InputsConfiguration {
    /// Contract surface files or directories
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub left: Vec<PathBuf>,

    /// Implementation surface files or directories
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub right: Vec<PathBuf>,

    /// Directories searched for an implementation matching each contract assembly
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub right_directories: Vec<PathBuf>,

    /// Directories searched for referenced assemblies
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_directories: Vec<PathBuf>,

    /// Name of the left side in messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_name: Option<String>,

    /// Name of the right side in messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apicompat.yaml");
        fs::write(
            &path,
            r#"
diffing:
  includeInternalSymbols: true
  noWarn: "CP0003"
  ignoredDifferences:
    - diagnosticId: CP0002
      memberId: "M:Contoso.Client.Legacy"
"#,
        )
        .unwrap();

        let config = ApiCompatConfig::load(&path).unwrap();
        let diffing = config.diffing_settings();
        assert!(diffing.include_internal_symbols);
        assert!(!diffing.strict_mode);
        assert_eq!(diffing.no_warn, "CP0003");
        assert_eq!(
            diffing.ignored_pairs(),
            vec![("CP0002".to_string(), "M:Contoso.Client.Legacy".to_string())]
        );
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".apicompatrc.toml");
        fs::write(
            &path,
            r#"
[diffing]
strictMode = true

[inputs]
left = ["contract"]
rightDirectories = ["impl"]
"#,
        )
        .unwrap();

        let config = ApiCompatConfig::load(&path).unwrap();
        assert!(config.diffing_settings().strict_mode);
        let inputs = config.inputs_config();
        assert_eq!(inputs.left, vec![PathBuf::from("contract")]);
        assert_eq!(inputs.right_directories, vec![PathBuf::from("impl")]);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apicompat.ini");
        fs::write(&path, "").unwrap();

        let err = ApiCompatConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn test_schema_names_sections() {
        let schema = ApiCompatConfig::json_schema();
        let properties = &schema["properties"];
        assert!(properties.get("diffing").is_some());
        assert!(properties.get("inputs").is_some());
    }
}
