//! Session domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Portal roles that drive route admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Hr,
    HrManager,
    Employee,
    Candidate,
}

impl Role {
    /// Parses a role marker case-insensitively.
    ///
    /// `hr manager`, `hr-manager` and `hr_manager` are the same role.
    /// Unknown markers yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "hr" => Some(Role::Hr),
            "hr_manager" => Some(Role::HrManager),
            "employee" => Some(Role::Employee),
            "candidate" => Some(Role::Candidate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::HrManager => "hr_manager",
            Role::Employee => "employee",
            Role::Candidate => "candidate",
        }
    }

    /// HR staff may enter the admin area.
    pub fn is_hr(&self) -> bool {
        matches!(self, Role::Hr | Role::HrManager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user record returned by login and `/api/auth/me`.
///
/// Fields the client does not interpret are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default, alias = "id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub emp_id: Option<i64>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserIdentity {
    /// Parsed role, if the record carries a known one.
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub credential: Option<String>,
    pub identity: Option<UserIdentity>,
    /// Raw role marker as stored; normalized on read.
    pub role_marker: Option<String>,
}

impl SessionSnapshot {
    /// True iff a non-empty credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.credential
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// Role used for route admission: the identity's role when known,
    /// otherwise the cached marker.
    pub fn role(&self) -> Option<Role> {
        self.identity
            .as_ref()
            .and_then(UserIdentity::parsed_role)
            .or_else(|| self.role_marker.as_deref().and_then(Role::parse))
    }
}
