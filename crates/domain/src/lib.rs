//! # postboard-domain
//!
//! Pure domain model for the postboard API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** (accounts with a unique email and a role)
//! - Define **Posts** (titled content referencing an author)
//! - Define the **validation rule sets** applied to request bodies
//! - Contain all invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod post;
pub mod user;
pub mod validation;
