//! Summary aggregation.
//!
//! A pure fold over a record set producing counts, cost rollups, and the
//! top users by dormant-access cost. Nothing here touches stores or
//! providers; the service feeds it freshly scanned records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vigil_core::UserId;

use crate::types::{DormancyCategory, DormantAccessRecord};

/// Potential license savings from revoking a record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialSavings {
    /// Sum of per-license annual cost across all records.
    pub annual: f64,
    /// Annual savings divided by twelve.
    pub monthly: f64,
}

/// One entry in the top-users ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUserEntry {
    /// The user.
    pub user_id: UserId,
    /// Display name.
    pub user_name: String,
    /// Number of dormant grants held.
    pub dormant_count: usize,
    /// Total annual cost of those grants.
    pub total_cost: f64,
}

/// Aggregate statistics over a set of dormant-access records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantAccessSummary {
    /// Total record count.
    pub total_dormant: usize,
    /// Record counts per dormancy category.
    pub by_category: HashMap<DormancyCategory, usize>,
    /// Record counts per department; missing departments count as "Unknown".
    pub by_department: HashMap<String, usize>,
    /// Record counts per application name.
    pub by_application: HashMap<String, usize>,
    /// Cost rollup.
    pub potential_savings: PotentialSavings,
    /// Users ranked by total dormant cost, highest first.
    pub top_users: Vec<TopUserEntry>,
}

/// Fold a record set into a [`DormantAccessSummary`].
///
/// The top-users ranking is limited to `top_n` entries; ties in cost keep
/// first-seen order (stable sort over the input).
#[must_use]
pub fn summarize(records: &[DormantAccessRecord], top_n: usize) -> DormantAccessSummary {
    let mut by_category: HashMap<DormancyCategory, usize> = HashMap::new();
    let mut by_department: HashMap<String, usize> = HashMap::new();
    let mut by_application: HashMap<String, usize> = HashMap::new();
    let mut annual = 0.0;

    // Per-user rollup, keeping first-seen order for stable ranking.
    let mut user_order: Vec<UserId> = Vec::new();
    let mut per_user: HashMap<UserId, TopUserEntry> = HashMap::new();

    for record in records {
        *by_category.entry(record.category).or_default() += 1;
        *by_department
            .entry(record.department_label().to_string())
            .or_default() += 1;
        *by_application.entry(record.app_name.clone()).or_default() += 1;
        annual += record.cost_per_license;

        let entry = per_user.entry(record.user_id).or_insert_with(|| {
            user_order.push(record.user_id);
            TopUserEntry {
                user_id: record.user_id,
                user_name: record.user_name.clone(),
                dormant_count: 0,
                total_cost: 0.0,
            }
        });
        entry.dormant_count += 1;
        entry.total_cost += record.cost_per_license;
    }

    let mut top_users: Vec<TopUserEntry> = user_order
        .into_iter()
        .filter_map(|id| per_user.remove(&id))
        .collect();
    top_users.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    top_users.truncate(top_n);

    DormantAccessSummary {
        total_dormant: records.len(),
        by_category,
        by_department,
        by_application,
        potential_savings: PotentialSavings {
            annual,
            monthly: annual / 12.0,
        },
        top_users,
    }
}
