use super::Host;
use super::common::{LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::cel::Engine;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `audit.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Validates a configuration file by loading it and building the evaluation engine
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or parsed, if a rule does not
/// compile, or if the reporting settings are invalid
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Config> {
    let config = Config::load(base_dir, config_path)?;
    let _ = Engine::with_builtin_libraries().into_app_err("building the evaluation engine")?;
    Ok(config)
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    init_logging(args.log_level);

    let base_dir = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&base_dir, config_path) {
        Ok(config) => {
            let mut out = host.output();
            let _ = writeln!(out, "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(out, "Config file: {path}");
            } else {
                let _ = writeln!(out, "Using configuration from the current directory or the default configuration");
            }
            let _ = writeln!(out, "Rules: {}", config.rules.len());
            Ok(())
        }
        Err(e) => {
            host.fail(&format!("Configuration validation failed: {e}"));
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn validate_file(contents: &str) -> (TestHost, Result<()>) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = Utf8PathBuf::from(temp_dir.path().to_string_lossy().to_string()).join("audit.toml");
        std::fs::write(&config_path, contents).expect("Failed to write test config");

        let mut host = TestHost::new();
        let args = ValidateArgs {
            config: Some(config_path),
            log_level: LogLevel::None,
        };
        let result = validate_config(&mut host, &args);
        (host, result)
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_default_config_is_valid() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = Utf8PathBuf::from(temp_dir.path().to_string_lossy().to_string()).join("audit.toml");

        let mut init_host = TestHost::new();
        let init_args = InitArgs {
            output: Some(config_path.clone()),
        };
        init_config(&mut init_host, &init_args).expect("init_config should succeed");

        let mut host = TestHost::new();
        let args = ValidateArgs {
            config: Some(config_path),
            log_level: LogLevel::None,
        };
        let result = validate_config(&mut host, &args);

        assert!(result.is_ok(), "Default configuration should validate successfully: {result:?}");
        assert!(host.output_text().contains("Configuration file is valid"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let default_config = Config::default();
        let parsed_config: Config =
            toml::from_str(super::super::config::DEFAULT_CONFIG_TOML).expect("DEFAULT_CONFIG_TOML should parse successfully");

        let default_toml = toml::to_string(&default_config).expect("default config should serialize");
        let parsed_toml = toml::to_string(&parsed_config).expect("parsed config should serialize");

        assert_eq!(
            default_toml, parsed_toml,
            "Config::default() should match parsing DEFAULT_CONFIG_TOML"
        );
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_toml_syntax() {
        let (host, result) = validate_file(
            r#"
# Missing closing bracket
[[rules]
name = "test"
expression = "true"
"#,
        );

        assert_eq!(host.exit_code, Some(1));
        assert!(result.unwrap_err().to_string().contains("parsing configuration file"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_field() {
        let (host, result) = validate_file(
            r#"
rules = []
unknown_field = "value"
"#,
        );

        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_text().contains("Configuration validation failed"));
        let _ = result.unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_rule_syntax() {
        let (host, result) = validate_file(
            r#"
[[rules]]
name = "invalid_syntax"
description = "Invalid CEL syntax"
expression = "this is not a valid CEL expression !!!"
"#,
        );

        assert_eq!(host.exit_code, Some(1));
        let _ = result.unwrap_err();
        assert!(host.error_text().contains("Could not parse rule 'invalid_syntax'"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_report_category() {
        let (host, result) = validate_file(r#"reporting = ["validate", "background"]"#);

        assert_eq!(host.exit_code, Some(1));
        assert!(result.unwrap_err().to_string().contains("invalid 'reporting' setting"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_empty_config_is_valid() {
        let (host, result) = validate_file("# Empty config file\n");

        assert!(result.is_ok(), "Empty config should be valid");
        insta::assert_snapshot!(host.output_text().lines().last().unwrap_or_default(), @"Rules: 0");
    }
}
