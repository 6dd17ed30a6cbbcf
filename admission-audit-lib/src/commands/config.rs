use crate::Result;
use crate::cel::Rule;
use crate::reports::ReportingConfig;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "audit.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Report categories enabled for the process
    #[serde(default)]
    pub reporting: Vec<String>,

    /// Whether evaluated requests ask for a report
    #[serde(default = "default_admission_reports")]
    pub admission_reports: bool,

    /// Rules evaluated against every admission request
    #[serde(default)]
    pub rules: Vec<Rule>,
}

const fn default_admission_reports() -> bool {
    true
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading admission-audit configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading admission-audit configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The reporting configuration described by the `reporting` list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list names an unknown category
    pub fn reporting_config(&self) -> Result<ReportingConfig> {
        ReportingConfig::configure(&self.reporting).into_app_err("invalid 'reporting' setting")
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a report category is unknown or two rules share a name
    fn validate(&self) -> Result<()> {
        let _ = self.reporting_config()?;

        let mut names = HashSet::new();
        for rule in &self.rules {
            if !names.insert(rule.name()) {
                return Err(app_err!("rule name '{}' is used more than once", rule.name()));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
