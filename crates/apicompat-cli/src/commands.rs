//! Command implementations

use crate::OutputFormat;
use crate::output::{CheckSummary, OutputFormatter};
use anyhow::{Context, Result};
use apicompat_core::{
    ApiCompatConfig, ApiCompatError, ConfigLoader, IgnoredDifference, RuleSettings, SurfaceLoader,
};
use apicompat_rules::{ApiDiffer, RuleDriver};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_LEFT_NAME: &str = "contract";
const DEFAULT_RIGHT_NAME: &str = "implementation";

/// Options of a compatibility check, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub config: Option<PathBuf>,
    pub left: Vec<PathBuf>,
    pub right: Vec<PathBuf>,
    pub right_dirs: Vec<PathBuf>,
    pub reference_dirs: Vec<PathBuf>,
    pub include_internals: bool,
    pub strict: bool,
    pub validate_identity: bool,
    pub no_warn: Option<String>,
    pub ignore: Vec<(String, String)>,
    pub left_name: Option<String>,
    pub right_name: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Compatible,
    Incompatible,
}

/// Run one comparison: merge config and flags, load both sides, diff, report
pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let config = ConfigLoader::load(args.config.as_deref(), None)
        .context("Failed to load configuration")?;
    let resolved = ResolvedCheck::merge(args, &config)?;

    let loader = SurfaceLoader::new(resolved.reference_dirs.clone());
    let left = loader
        .load_assemblies(&resolved.left)
        .context("Failed to load the left side")?;
    let right = if resolved.right.is_empty() {
        loader.load_matching(
            &left,
            &resolved.right_dirs,
            resolved.diffing.validate_assembly_identity,
        )
    } else {
        loader.load_assemblies(&resolved.right)
    }
    .context("Failed to load the right side")?;

    info!(
        "Comparing {} {} assemblies with {} {} assemblies",
        left.len(),
        resolved.left_name,
        right.len(),
        resolved.right_name
    );

    let bag = ApiDiffer::with_settings(resolved.diffing.clone()).get_difference_bag(&left, &right)?;

    let summary = CheckSummary {
        left_name: resolved.left_name,
        right_name: resolved.right_name,
        differences: bag.len(),
        suppressed: bag.suppressed_count(),
    };
    OutputFormatter::new(args.format).print(bag.differences(), &summary)?;

    Ok(if bag.is_empty() {
        CheckOutcome::Compatible
    } else {
        CheckOutcome::Incompatible
    })
}

/// Command-line flags layered over the config file
#[derive(Debug)]
struct ResolvedCheck {
    diffing: apicompat_core::DiffingSettings,
    left: Vec<PathBuf>,
    right: Vec<PathBuf>,
    right_dirs: Vec<PathBuf>,
    reference_dirs: Vec<PathBuf>,
    left_name: String,
    right_name: String,
}

impl ResolvedCheck {
    fn merge(args: &CheckArgs, config: &ApiCompatConfig) -> Result<Self> {
        let mut diffing = config.diffing_settings();
        diffing.include_internal_symbols |= args.include_internals;
        diffing.strict_mode |= args.strict;
        diffing.validate_assembly_identity |= args.validate_identity;
        if let Some(no_warn) = &args.no_warn {
            diffing.no_warn = no_warn.clone();
        }
        diffing.ignored_differences.extend(
            args.ignore
                .iter()
                .map(|(id, member)| IgnoredDifference::new(id, member)),
        );

        let inputs = config.inputs_config();
        let pick = |flag: &Vec<PathBuf>, file: Vec<PathBuf>| {
            if flag.is_empty() { file } else { flag.clone() }
        };
        let left = pick(&args.left, inputs.left);
        let right = pick(&args.right, inputs.right);
        let right_dirs = pick(&args.right_dirs, inputs.right_directories);
        let reference_dirs = pick(&args.reference_dirs, inputs.reference_directories);

        if left.is_empty() {
            return Err(ApiCompatError::config_error(
                "At least one left input is required (--left or inputs.left)",
            )
            .into());
        }
        if right.is_empty() && right_dirs.is_empty() {
            return Err(ApiCompatError::config_error(
                "The right side needs --right inputs or --right-dir search directories",
            )
            .into());
        }
        if !right.is_empty() && !right_dirs.is_empty() {
            warn!("Both right inputs and right search directories given; using the right inputs");
        }

        Ok(Self {
            diffing,
            left,
            right,
            right_dirs,
            reference_dirs,
            left_name: args
                .left_name
                .clone()
                .or(inputs.left_name)
                .unwrap_or_else(|| DEFAULT_LEFT_NAME.to_string()),
            right_name: args
                .right_name
                .clone()
                .or(inputs.right_name)
                .unwrap_or_else(|| DEFAULT_RIGHT_NAME.to_string()),
        })
    }
}

/// Print the built-in rule catalogue
pub fn list_rules() {
    let driver = RuleDriver::new(&RuleSettings::default());
    println!("{}", "Built-in rules:".bold());
    for rule in driver.rules() {
        println!(
            "  {}  {:<28} {:<9} {}",
            rule.id.cyan(),
            rule.name,
            rule.pair_kind.to_string(),
            rule.description.dimmed()
        );
    }
}

/// Print the JSON schema of the configuration file
pub fn print_config_schema() {
    let schema = ApiCompatConfig::json_schema();
    match serde_json::to_string_pretty(&schema) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_core::{DiffingSettings, InputsConfiguration};

    fn args() -> CheckArgs {
        CheckArgs {
            left: vec![PathBuf::from("contract")],
            right: vec![PathBuf::from("impl")],
            ..CheckArgs::default()
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = ApiCompatConfig {
            diffing: Some(DiffingSettings {
                no_warn: "CP0001".to_string(),
                ignored_differences: vec![IgnoredDifference::new("CP0002", "M:A.B")],
                ..DiffingSettings::default()
            }),
            inputs: Some(InputsConfiguration {
                left: vec![PathBuf::from("from-config")],
                left_name: Some("baseline".to_string()),
                ..InputsConfiguration::default()
            }),
            ..ApiCompatConfig::default()
        };
        let args = CheckArgs {
            no_warn: Some("CP0003".to_string()),
            ignore: vec![("CP0001".to_string(), "T:A".to_string())],
            strict: true,
            ..args()
        };

        let resolved = ResolvedCheck::merge(&args, &config).unwrap();
        assert_eq!(resolved.diffing.no_warn, "CP0003");
        assert!(resolved.diffing.strict_mode);
        assert_eq!(resolved.diffing.ignored_differences.len(), 2);
        assert_eq!(resolved.left, vec![PathBuf::from("contract")]);
        assert_eq!(resolved.left_name, "baseline");
        assert_eq!(resolved.right_name, "implementation");
    }

    #[test]
    fn test_missing_left_is_a_config_error() {
        let args = CheckArgs {
            left: Vec::new(),
            ..args()
        };
        let err = ResolvedCheck::merge(&args, &ApiCompatConfig::default()).unwrap_err();
        assert!(err.to_string().contains("left input is required"));
    }

    #[test]
    fn test_missing_right_is_a_config_error() {
        let args = CheckArgs {
            right: Vec::new(),
            ..args()
        };
        assert!(ResolvedCheck::merge(&args, &ApiCompatConfig::default()).is_err());
    }
}
