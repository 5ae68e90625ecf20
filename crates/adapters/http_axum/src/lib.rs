//! # postboard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** for users and posts
//!   (`/users`, `/users/{uuid}`, `/posts`) plus a `/health` probe
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `postboard-app` (for port traits and services) and
//! `postboard-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
