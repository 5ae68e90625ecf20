//! Request payload validation.
//!
//! A [`RuleSet`] lists, per field, a chain of checks each paired with the
//! message reported when it fails. Checks run in order and stop at the first
//! failure, so every failing field carries exactly one message. Fields are
//! reported in the order the rule set declares them.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ValidationErrors;
use crate::user::Role;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// Atom characters of the local part, Unicode letters and digits included.
const LOCAL_ATOM: &str = r"[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+";
/// One domain label: letters or digits at both ends, hyphens inside.
const DOMAIN_LABEL: &str = r"[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?";
/// Top-level domain: two or more letters, or a punycode `xn--` label.
const TLD: &str = r"(?:\p{L}{2,}|(?i:xn--[a-z0-9-]{2,}))";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{LOCAL_ATOM}(?:\.{LOCAL_ATOM})*@(?:{DOMAIN_LABEL}\.)+{TLD}$"
    ))
    .expect("email pattern must compile")
});

/// A single predicate applied to a field value.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// A JSON string with at least one character.
    NotEmpty,
    /// A JSON string shaped like `local@domain.tld`.
    Email,
    /// A JSON string equal to one of the listed values.
    OneOf(&'static [&'static str]),
    /// Any JSON string, empty included.
    Text,
}

impl Check {
    fn passes(self, value: &Value) -> bool {
        let Some(text) = value.as_str() else {
            return false;
        };
        match self {
            Self::NotEmpty => !text.is_empty(),
            Self::Email => is_email(text),
            Self::OneOf(allowed) => allowed.contains(&text),
            Self::Text => true,
        }
    }
}

/// Checks for one field.
#[derive(Debug)]
pub struct Rule {
    pub field: &'static str,
    /// When set, a missing or `null` value passes without running any check.
    pub optional: bool,
    pub checks: &'static [(Check, &'static str)],
}

/// Ordered collection of field rules.
#[derive(Debug)]
pub struct RuleSet {
    pub rules: &'static [Rule],
}

impl RuleSet {
    /// Run every rule against `body`.
    ///
    /// # Errors
    ///
    /// Returns the ordered field → message list when any rule fails.
    pub fn check(&self, body: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for rule in self.rules {
            let value = body.get(rule.field).unwrap_or(&Value::Null);
            if rule.optional && value.is_null() {
                continue;
            }
            let failed = rule.checks.iter().find(|(check, _)| !check.passes(value));
            if let Some(&(_, message)) = failed {
                errors.add(rule.field, message);
            }
        }
        errors.into_result()
    }
}

/// Rules applied to user create and update bodies.
pub const USER_RULES: RuleSet = RuleSet {
    rules: &[
        Rule {
            field: "email",
            optional: false,
            checks: &[
                (Check::NotEmpty, "Email must not empty"),
                (Check::Email, "Must be a valid address"),
            ],
        },
        Rule {
            field: "name",
            optional: false,
            checks: &[(Check::NotEmpty, "Name must not empty")],
        },
        Rule {
            field: "role",
            optional: true,
            checks: &[(
                Check::OneOf(Role::NAMES),
                "Role must be one of 'ADMIN', 'USER', 'SUPERADMIN'",
            )],
        },
    ],
};

/// Rules applied to post create bodies. The author id is checked while
/// parsing, see [`PostDraft::from_body`](crate::post::PostDraft::from_body).
pub const POST_RULES: RuleSet = RuleSet {
    rules: &[
        Rule {
            field: "title",
            optional: false,
            checks: &[(Check::NotEmpty, "Title must not empty")],
        },
        Rule {
            field: "content",
            optional: true,
            checks: &[(Check::Text, "Content must be text")],
        },
    ],
};

/// Syntactic email check: atom-style local part, dotted domain, alphabetic
/// or punycode TLD. Lengths count characters, not bytes.
#[must_use]
pub fn is_email(value: &str) -> bool {
    if value.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    match value.rsplit_once('@') {
        Some((local, _)) if local.chars().count() <= MAX_LOCAL_PART_LEN => {
            EMAIL.is_match(value)
        }
        _ => false,
    }
}
