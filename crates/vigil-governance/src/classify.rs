//! Dormancy classification.
//!
//! Pure functions mapping a grant's staleness to a dormancy category per the
//! tenant's configured thresholds. The highest threshold met wins.

use chrono::{DateTime, Utc};

use crate::config::DormantAccessConfig;
use crate::providers::Contract;
use crate::types::DormancyCategory;

/// Whole days elapsed since a grant was last used.
///
/// Returns `None` when the grant has never been accessed; such grants are
/// treated as maximally dormant by [`classify`].
#[must_use]
pub fn days_since_access(
    last_access_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<u32> {
    last_access_at.map(|last| {
        let days = (now - last).num_days();
        u32::try_from(days).unwrap_or(0)
    })
}

/// Classify a grant's staleness against the configured thresholds.
///
/// Returns `None` when the grant is not dormant at all. A grant that was
/// never accessed (`days == None`) is classified `AutoRevoke` regardless of
/// thresholds. Threshold boundaries are inclusive: a grant idle exactly
/// `warning_days` is `Warning`.
#[must_use]
pub fn classify(days: Option<u32>, config: &DormantAccessConfig) -> Option<DormancyCategory> {
    let Some(days) = days else {
        return Some(DormancyCategory::AutoRevoke);
    };

    if days >= config.auto_revoke_days {
        Some(DormancyCategory::AutoRevoke)
    } else if days >= config.critical_days {
        Some(DormancyCategory::Critical)
    } else if days >= config.warning_days {
        Some(DormancyCategory::Warning)
    } else {
        None
    }
}

/// Annual cost of a single license under the application's active
/// contracts, or `0.0` when no contract carries any licenses.
///
/// The first contract with a non-zero license count wins, guarding the
/// division.
#[must_use]
pub fn per_license_cost(contracts: &[Contract]) -> f64 {
    contracts
        .iter()
        .find(|c| c.total_licenses > 0)
        .map(|c| c.annual_value / f64::from(c.total_licenses))
        .unwrap_or(0.0)
}
