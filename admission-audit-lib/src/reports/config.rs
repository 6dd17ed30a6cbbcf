use crate::error::ConfigurationError;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

const LOG_TARGET: &str = "   reports";

/// A family of reports that can be switched on or off for the whole process.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ReportCategory {
    Validate,
    Mutate,
    MutateExisting,
    ImageVerify,
    Generate,
}

/// The report categories enabled for this process.
///
/// Categories not listed are disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportingConfig {
    enabled: BTreeSet<ReportCategory>,
}

impl ReportingConfig {
    #[must_use]
    pub fn new(enabled: impl IntoIterator<Item = ReportCategory>) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
        }
    }

    /// Every category enabled.
    #[must_use]
    pub fn all() -> Self {
        Self::new(ReportCategory::iter())
    }

    /// Build a configuration from category names such as `validate` or `imageVerify`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownCategory`] for a name that is not a category.
    pub fn configure<I, S>(options: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let enabled = options
            .into_iter()
            .map(|name| {
                let name = name.as_ref().trim();
                ReportCategory::from_str(name).map_err(|_| ConfigurationError::UnknownCategory(name.to_string()))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { enabled })
    }

    #[must_use]
    pub fn is_enabled(&self, category: ReportCategory) -> bool {
        self.enabled.contains(&category)
    }

    pub fn enabled(&self) -> impl Iterator<Item = ReportCategory> + '_ {
        self.enabled.iter().copied()
    }
}

/// A reporting configuration that can be replaced while it is being read.
///
/// Publishing swaps in a complete, already-built configuration; readers take an
/// `Arc` snapshot and therefore observe either the previous or the new
/// configuration in full. Reading before the first publish is an error.
#[derive(Debug, Default)]
pub struct SharedReportingConfig {
    current: RwLock<Option<Arc<ReportingConfig>>>,
}

impl SharedReportingConfig {
    /// An uninitialized holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn with_config(config: ReportingConfig) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(config))),
        }
    }

    /// Replace the current configuration.
    pub fn publish(&self, config: ReportingConfig) {
        let config = Arc::new(config);
        log::debug!(target: LOG_TARGET, "Publishing reporting configuration: {:?}", config.enabled);

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(config);
    }

    /// The configuration in effect right now.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Uninitialized`] if nothing has been published yet.
    pub fn snapshot(&self) -> Result<Arc<ReportingConfig>, ConfigurationError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ConfigurationError::Uninitialized)
    }

    /// Shorthand for `snapshot()?.is_enabled(category)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Uninitialized`] if nothing has been published yet.
    pub fn is_enabled(&self, category: ReportCategory) -> Result<bool, ConfigurationError> {
        Ok(self.snapshot()?.is_enabled(category))
    }

    /// Return to the uninitialized state.
    pub fn reset(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

static GLOBAL: SharedReportingConfig = SharedReportingConfig::new();

/// Publish the process-wide reporting configuration.
///
/// Meant for the outermost composition layer; library code receives a
/// configuration explicitly.
pub fn configure(config: ReportingConfig) {
    GLOBAL.publish(config);
}

/// The process-wide reporting configuration holder.
#[must_use]
pub fn global() -> &'static SharedReportingConfig {
    &GLOBAL
}
