//! Post — a titled piece of content written by a user.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ValidationErrors;
use crate::id::{PostId, UserId};
use crate::time::Timestamp;
use crate::user::User;
use crate::validation::POST_RULES;

/// Reported under `uuid` when the author id is missing or not a UUID.
const INVALID_AUTHOR: &str = "Author must be a valid identifier";

/// A persisted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub uuid: PostId,
    pub title: String,
    pub content: Option<String>,
    pub author_id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    /// Build a new post from a validated draft.
    #[must_use]
    pub fn from_draft(draft: PostDraft, now: Timestamp) -> Self {
        Self {
            uuid: PostId::new(),
            title: draft.title,
            content: draft.content,
            author_id: draft.author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check domain invariants against the same rules applied to request
    /// bodies.
    ///
    /// # Errors
    ///
    /// Returns the failing field when `title` is empty.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        POST_RULES.check(&json!({
            "title": self.title,
            "content": self.content,
        }))
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: Option<String>,
    pub author_id: UserId,
}

impl PostDraft {
    /// Validate a raw request body against the post rules and extract a draft.
    ///
    /// The author is read from the `uuid` field.
    ///
    /// # Errors
    ///
    /// Returns the ordered field → message list when any rule fails.
    pub fn from_body(body: &Value) -> Result<Self, ValidationErrors> {
        let checked = POST_RULES.check(body);
        let author_id = body
            .get("uuid")
            .and_then(Value::as_str)
            .and_then(|raw| UserId::from_str(raw).ok());

        match (checked, author_id) {
            (Ok(()), Some(author_id)) => Ok(Self {
                title: body
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                content: body
                    .get("content")
                    .and_then(Value::as_str)
                    .map(ToString::to_string),
                author_id,
            }),
            (checked, author_id) => {
                let mut errors = checked.err().unwrap_or_default();
                if author_id.is_none() {
                    errors.add("uuid", INVALID_AUTHOR);
                }
                Err(errors)
            }
        }
    }
}

/// Listing projection: a post with its author embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: User,
}

/// Title and content of a post, nested under its author in user listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub content: Option<String>,
}
