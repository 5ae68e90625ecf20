//! # postboard-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository` — CRUD for users plus the listing projection
//!   - `PostRepository` — create and list posts with their author
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UserService` — create, list, get, update, delete
//!   - `PostService` — create, list newest first
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `postboard-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
