//! # Orgsync Architecture
//!
//! Orgsync reconciles a roster file against a GitHub organization: it
//! invites missing people and makes sure group teams exist with the right
//! members and maintainers. The core is a **UI-agnostic library**; the CLI
//! binary is just one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs, binary only)                │
//! │  - Parses arguments, prints messages, owns exit codes      │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                        │
//! │  - Thin facade over commands; returns Result<CmdResult>    │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                             │
//! │  - The reconcilers: pure logic, no I/O assumptions         │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Client Layer (client/)                                    │
//! │  - Abstract OrgClient trait                                │
//! │  - GhClient (production), InMemoryOrg (testing)            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Idempotent Reconciliation
//!
//! There is no local state. Every run re-reads the remote organization and
//! applies only the actions that are missing, so re-running after a partial
//! or interrupted run is always safe and converges: a second run with no
//! external changes in between is all-skip. Everything is sequential and
//! synchronous; idempotence, not locking, is what makes interruption safe.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns
//! `Result<CmdResult>`, and never touches stdout/stderr or
//! `std::process::exit`. Progress lines are accumulated as [`commands::CmdMessage`]
//! values; only the binary decides how to render them.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): the lion's share. Reconcilers run
//!    against [`client::memory::InMemoryOrg`], asserting on its write log.
//! 2. **Loader and slug** (`roster.rs`, `slug.rs`): plain unit tests.
//! 3. **CLI** (`tests/`): binary-level tests with a stubbed `gh` on PATH.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: The reconcilers and their result types
//! - [`client`]: Organization backend abstraction and implementations
//! - [`model`]: Core data types (`Person`, roles, membership states)
//! - [`roster`]: Tolerant roster-file loading
//! - [`slug`]: Team-slug derivation
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod roster;
pub mod slug;
