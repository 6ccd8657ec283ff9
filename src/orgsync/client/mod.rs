//! # Organization client
//!
//! This module defines the façade over the remote organization API. The
//! [`OrgClient`] trait is the only thing the reconcilers know about.
//!
//! ## Design Rationale
//!
//! The remote API sits behind a trait to:
//! - Enable **testing** with [`memory::InMemoryOrg`] (no network, no `gh`)
//! - Keep the reconcilers **decoupled** from how calls are transported
//!
//! ## Implementations
//!
//! - [`gh::GhClient`]: production client that spawns the pre-authenticated
//!   `gh` CLI and parses its JSON output
//! - [`memory::InMemoryOrg`]: controllable fake organization for tests,
//!   with a write log and failure injection
//!
//! ## Call semantics
//!
//! Every operation is synchronous and stateless between calls; the remote
//! system is the sole source of truth and is re-queried on every
//! reconciliation step. Expected absences ("not a member", "no pending
//! invitation", "no such user") are values, not errors. An `Err` from a
//! read means the call itself could not be made; an `Err` from a write is
//! either a recoverable per-item failure (invitations, membership writes)
//! or fatal (team creation); the reconcilers decide which.

use crate::error::Result;
use crate::model::{OrgRole, TeamMembership, TeamPrivacy, TeamRole};

pub mod gh;
pub mod memory;

/// Abstract interface to the remote organization.
pub trait OrgClient {
    /// Verify authentication and that the organization is reachable.
    fn check_org_access(&self, org: &str) -> Result<()>;

    /// True iff the user is currently an org member (not pending).
    fn is_org_member(&self, org: &str, username: &str) -> Result<bool>;

    /// True iff an unresolved invitation matches the identifier by login or
    /// email.
    fn has_pending_invitation(&self, org: &str, identifier: &str) -> Result<bool>;

    /// Map a username to the platform's numeric user id. `None` means the
    /// user does not exist; that is a per-item miss, never fatal.
    fn resolve_user_id(&self, username: &str) -> Result<Option<u64>>;

    /// Invite a user to the organization.
    fn create_invitation(&mut self, org: &str, user_id: u64, role: OrgRole) -> Result<()>;

    /// True iff a team with this slug exists in the organization.
    fn team_exists(&self, org: &str, slug: &str) -> Result<bool>;

    /// Create a team and return the slug the server assigned to it.
    fn create_team(
        &mut self,
        org: &str,
        name: &str,
        privacy: TeamPrivacy,
        description: &str,
    ) -> Result<String>;

    /// Current membership of the user in the team.
    fn team_membership(&self, org: &str, slug: &str, username: &str) -> Result<TeamMembership>;

    /// Add the user to the team at the given role, or change their role.
    ///
    /// When the user is not yet an org member, the remote side may send
    /// them an org invitation as part of this call. That is an accepted
    /// side effect, not an error.
    fn set_team_membership(
        &mut self,
        org: &str,
        slug: &str,
        username: &str,
        role: TeamRole,
    ) -> Result<()>;
}
