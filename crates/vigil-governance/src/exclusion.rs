//! Exclusion filtering.
//!
//! Admin accounts and service accounts can be excluded from dormancy
//! detection so automated cleanup never touches break-glass or machine
//! identities.

use crate::config::DormantAccessConfig;
use crate::providers::UserRecord;

/// Roles treated as administrative for exclusion purposes.
pub const ADMIN_ROLES: &[&str] = &["admin", "super-admin", "it-manager"];

/// Email substrings marking an account as a service account.
pub const SERVICE_ACCOUNT_MARKERS: &[&str] = &["service", "system", "noreply", "api", "bot"];

/// Whether a role name is administrative (case-insensitive).
#[must_use]
pub fn is_admin_role(role: &str) -> bool {
    ADMIN_ROLES
        .iter()
        .any(|admin| role.eq_ignore_ascii_case(admin))
}

/// Whether an email address looks like a service account (case-insensitive
/// substring match against [`SERVICE_ACCOUNT_MARKERS`]).
#[must_use]
pub fn is_service_account(email: &str) -> bool {
    let email = email.to_ascii_lowercase();
    SERVICE_ACCOUNT_MARKERS
        .iter()
        .any(|marker| email.contains(marker))
}

/// Whether a user is excluded from dormancy detection under the given
/// configuration.
#[must_use]
pub fn is_excluded(user: &UserRecord, config: &DormantAccessConfig) -> bool {
    if config.exclude_admins && is_admin_role(&user.role) {
        return true;
    }
    if config.exclude_service_accounts && is_service_account(&user.email) {
        return true;
    }
    false
}
