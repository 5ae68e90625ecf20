//! User — an account that authors posts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ValidationErrors;
use crate::id::UserId;
use crate::post::PostSummary;
use crate::time::Timestamp;
use crate::validation::USER_RULES;

/// Permission level of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    User,
    SuperAdmin,
}

impl Role {
    /// Wire names of every role, in declaration order.
    pub const NAMES: &'static [&'static str] = &["ADMIN", "USER", "SUPERADMIN"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
            Self::SuperAdmin => "SUPERADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            "SUPERADMIN" => Ok(Self::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uuid: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Build a new user from a validated draft. A missing role becomes the default.
    #[must_use]
    pub fn from_draft(draft: UserDraft, now: Timestamp) -> Self {
        Self {
            uuid: UserId::new(),
            name: draft.name,
            email: draft.email,
            role: draft.role.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns the failing fields when `name` is empty or `email` is not a
    /// valid address.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_fields(&self.name, &self.email, Some(self.role))
    }
}

/// Validated input for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    /// `None` keeps the stored role on update and the default role on create.
    pub role: Option<Role>,
}

impl UserDraft {
    /// Validate a raw request body against the user rules and extract a draft.
    ///
    /// # Errors
    ///
    /// Returns the ordered field → message list when any rule fails.
    pub fn from_body(body: &Value) -> Result<Self, ValidationErrors> {
        USER_RULES.check(body)?;
        let text = |field: &str| {
            body.get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let role = body
            .get("role")
            .and_then(Value::as_str)
            .and_then(|name| Role::from_str(name).ok());
        Ok(Self {
            name: text("name"),
            email: text("email"),
            role,
        })
    }

    /// Check domain invariants on a draft built outside [`UserDraft::from_body`].
    ///
    /// # Errors
    ///
    /// Returns the failing fields when `name` is empty or `email` is not a
    /// valid address.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_fields(&self.name, &self.email, self.role)
    }
}

/// Run [`USER_RULES`] over typed fields, as if they had arrived in a body.
fn check_fields(name: &str, email: &str, role: Option<Role>) -> Result<(), ValidationErrors> {
    USER_RULES.check(&json!({
        "name": name,
        "email": email,
        "role": role.map(Role::as_str),
    }))
}

/// Listing projection: a user with the title and content of each post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub uuid: UserId,
    pub name: String,
    pub role: Role,
    pub posts: Vec<PostSummary>,
}
