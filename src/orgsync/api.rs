//! # API Facade
//!
//! The single entry point for all orgsync operations, regardless of the UI
//! driving them. The facade only dispatches to the command layer; it holds
//! no business logic, performs no I/O, and returns structured
//! `Result<CmdResult>` values.
//!
//! `OrgSyncApi<C: OrgClient>` is generic over the organization backend:
//! production wires in `GhClient`, tests wire in `InMemoryOrg`. That is
//! what makes the whole reconciliation surface testable without a network.

use crate::client::OrgClient;
use crate::commands;
use crate::error::Result;
use crate::model::{GroupedPerson, Person};

/// The main API facade for orgsync operations.
pub struct OrgSyncApi<C: OrgClient> {
    client: C,
}

impl<C: OrgClient> OrgSyncApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn check(&self, org: &str) -> Result<commands::CmdResult> {
        commands::check::run(&self.client, org)
    }

    pub fn invite(
        &mut self,
        opts: &commands::invite::InviteOptions,
        roster: &[Person],
    ) -> Result<commands::CmdResult> {
        commands::invite::run(&mut self.client, opts, roster)
    }

    pub fn sync_teams(
        &mut self,
        opts: &commands::teams::TeamOptions,
        roster: &[GroupedPerson],
        instructors: &[String],
    ) -> Result<commands::CmdResult> {
        commands::teams::run(&mut self.client, opts, roster, instructors)
    }
}

pub use commands::invite::InviteOptions;
pub use commands::teams::TeamOptions;
pub use commands::{CmdMessage, CmdResult, MessageLevel, Tally};
