//! Engine settings.
//!
//! Operational knobs for the scan fan-out, loadable from the environment
//! or built programmatically.

use std::env;

use crate::error::{DormancyError, Result};

/// Default number of applications fetched concurrently during a scan.
pub const DEFAULT_SCAN_CONCURRENCY: usize = 8;

/// Default length of the top-users-by-cost ranking in summaries.
pub const DEFAULT_TOP_USERS_LIMIT: usize = 10;

/// Operational settings for the dormant-access engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Upper bound on concurrent per-application inventory fetches.
    pub scan_concurrency: usize,
    /// Number of users in the summary's cost ranking.
    pub top_users_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            scan_concurrency: DEFAULT_SCAN_CONCURRENCY,
            top_users_limit: DEFAULT_TOP_USERS_LIMIT,
        }
    }
}

impl EngineSettings {
    /// Load settings from environment variables.
    ///
    /// Optional:
    /// - `VIGIL_SCAN_CONCURRENCY`: concurrent app fetches (default: 8)
    /// - `VIGIL_TOP_USERS_LIMIT`: summary ranking length (default: 10)
    pub fn from_env() -> Result<Self> {
        let scan_concurrency = parse_var("VIGIL_SCAN_CONCURRENCY", DEFAULT_SCAN_CONCURRENCY)?;
        let top_users_limit = parse_var("VIGIL_TOP_USERS_LIMIT", DEFAULT_TOP_USERS_LIMIT)?;

        if scan_concurrency == 0 {
            return Err(DormancyError::ConfigInvalid {
                var: "VIGIL_SCAN_CONCURRENCY".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            scan_concurrency,
            top_users_limit,
        })
    }

    /// Start building settings programmatically.
    #[must_use]
    pub fn builder() -> EngineSettingsBuilder {
        EngineSettingsBuilder::default()
    }
}

fn parse_var(var: &str, default: usize) -> Result<usize> {
    match env::var(var) {
        Ok(value) => value.parse().map_err(|_| DormancyError::ConfigInvalid {
            var: var.to_string(),
            reason: format!("not a valid number: {value}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Builder for [`EngineSettings`].
#[derive(Debug, Default)]
pub struct EngineSettingsBuilder {
    scan_concurrency: Option<usize>,
    top_users_limit: Option<usize>,
}

impl EngineSettingsBuilder {
    /// Set the scan concurrency limit.
    #[must_use]
    pub fn scan_concurrency(mut self, limit: usize) -> Self {
        self.scan_concurrency = Some(limit);
        self
    }

    /// Set the top-users ranking length.
    #[must_use]
    pub fn top_users_limit(mut self, limit: usize) -> Self {
        self.top_users_limit = Some(limit);
        self
    }

    /// Build the settings, validating the concurrency bound.
    pub fn build(self) -> Result<EngineSettings> {
        let settings = EngineSettings {
            scan_concurrency: self.scan_concurrency.unwrap_or(DEFAULT_SCAN_CONCURRENCY),
            top_users_limit: self.top_users_limit.unwrap_or(DEFAULT_TOP_USERS_LIMIT),
        };

        if settings.scan_concurrency == 0 {
            return Err(DormancyError::ConfigInvalid {
                var: "scan_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(settings)
    }
}
