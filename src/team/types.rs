//! Core types for team membership.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PermissionSet;
use super::traits::Catalog;
use crate::{AccessError, Principal};

/// Role held by a team member. A member holds exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Developer,
    Tester,
}

impl Catalog for Role {
    const ALL: &'static [Self] = &[Self::Admin, Self::Developer, Self::Tester];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Developer => "developer",
            Self::Tester => "tester",
        }
    }
}

/// A dashboard area a team member can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    AppSettings,
    GemCoins,
    Users,
    Teams,
    CarosealAds,
    UserInterests,
    DailyRewards,
    VehicleBrands,
    BugReports,
    QaReleases,
}

impl Catalog for Permission {
    const ALL: &'static [Self] = &[
        Self::AppSettings,
        Self::GemCoins,
        Self::Users,
        Self::Teams,
        Self::CarosealAds,
        Self::UserInterests,
        Self::DailyRewards,
        Self::VehicleBrands,
        Self::BugReports,
        Self::QaReleases,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::AppSettings => "app-settings",
            Self::GemCoins => "gem-coins",
            Self::Users => "users",
            Self::Teams => "teams",
            Self::CarosealAds => "caroseal-ads",
            Self::UserInterests => "user-interests",
            Self::DailyRewards => "daily-rewards",
            Self::VehicleBrands => "vehicle-brands",
            Self::BugReports => "bug-reports",
            Self::QaReleases => "qa-releases",
        }
    }
}

/// Membership status as shown in the team-management table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl Catalog for MemberStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Pending];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }
}

macro_rules! catalog_text {
    ($ty:ty, $err:path) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AccessError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Catalog>::lookup(s).ok_or_else(|| $err(s.to_owned()))
            }
        }
    };
}

catalog_text!(Role, AccessError::UnknownRole);
catalog_text!(Permission, AccessError::UnknownPermission);
catalog_text!(MemberStatus, AccessError::UnknownStatus);

/// A managed staff account.
///
/// A principal is matched to its record by provider id, or by email when the
/// record was created before the member first signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    /// Identity-provider id; `None` until the member first signs in.
    pub principal_id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub permissions: PermissionSet,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Whether this record belongs to `principal`.
    ///
    /// A stored provider id wins; email is compared case-insensitively only
    /// when no provider id has been recorded yet.
    pub fn matches(&self, principal: &Principal) -> bool {
        match &self.principal_id {
            Some(id) => *id == principal.id,
            None => self.email.eq_ignore_ascii_case(&principal.email),
        }
    }

    #[cfg(any(test, feature = "mocks"))]
    pub fn mock(email: &str, role: Role, permissions: &[Permission]) -> Self {
        let now = Utc::now();
        Self {
            id: 1,
            principal_id: None,
            email: email.to_owned(),
            name: email.split('@').next().unwrap_or(email).to_owned(),
            role,
            permissions: permissions.iter().copied().collect(),
            department: None,
            position: None,
            status: MemberStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}
