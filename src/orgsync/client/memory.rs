use super::OrgClient;
use crate::error::{OrgSyncError, Result};
use crate::model::{OrgRole, TeamMembership, TeamPrivacy, TeamRole};
use crate::slug::slugify;
use std::collections::{HashMap, HashSet};

/// A mutation performed against the fake organization. Tests assert on the
/// write log to prove exactly which writes a reconciliation issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Invite {
        org: String,
        user_id: u64,
        role: OrgRole,
    },
    CreateTeam {
        org: String,
        name: String,
    },
    SetTeamMembership {
        org: String,
        slug: String,
        username: String,
        role: TeamRole,
    },
}

/// In-memory organization for testing and development.
/// Holds controllable membership, invitation, and team state; talks to
/// nothing.
#[derive(Default)]
pub struct InMemoryOrg {
    orgs: HashSet<String>,
    user_ids: HashMap<String, u64>,
    members: HashSet<(String, String)>,
    pending: HashSet<(String, String)>,
    teams: HashMap<(String, String), String>,
    team_roles: HashMap<(String, String, String), TeamMembership>,
    team_creation_refused: bool,
    refused_writes: HashSet<String>,
    pub writes: Vec<WriteOp>,
}

impl InMemoryOrg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_org(&mut self, org: &str) {
        self.orgs.insert(org.to_string());
    }

    pub fn add_user(&mut self, username: &str, id: u64) {
        self.user_ids.insert(username.to_string(), id);
    }

    pub fn add_member(&mut self, org: &str, username: &str) {
        self.members.insert((org.to_string(), username.to_string()));
    }

    pub fn add_pending(&mut self, org: &str, identifier: &str) {
        self.pending
            .insert((org.to_string(), identifier.to_string()));
    }

    pub fn add_team(&mut self, org: &str, slug: &str, name: &str) {
        self.teams
            .insert((org.to_string(), slug.to_string()), name.to_string());
    }

    pub fn set_role(&mut self, org: &str, slug: &str, username: &str, role: TeamMembership) {
        self.team_roles.insert(
            (org.to_string(), slug.to_string(), username.to_string()),
            role,
        );
    }

    /// Make every subsequent team creation fail.
    pub fn refuse_team_creation(&mut self) {
        self.team_creation_refused = true;
    }

    /// Make invitation and membership writes for this username fail.
    pub fn refuse_writes_for(&mut self, username: &str) {
        self.refused_writes.insert(username.to_string());
    }

    fn login_for(&self, user_id: u64) -> Option<String> {
        self.user_ids
            .iter()
            .find(|(_, id)| **id == user_id)
            .map(|(login, _)| login.clone())
    }
}

impl OrgClient for InMemoryOrg {
    fn check_org_access(&self, org: &str) -> Result<()> {
        if self.orgs.contains(org) {
            Ok(())
        } else {
            Err(OrgSyncError::OrgAccess {
                org: org.to_string(),
                detail: "unknown organization".to_string(),
            })
        }
    }

    fn is_org_member(&self, org: &str, username: &str) -> Result<bool> {
        Ok(self
            .members
            .contains(&(org.to_string(), username.to_string())))
    }

    fn has_pending_invitation(&self, org: &str, identifier: &str) -> Result<bool> {
        Ok(self
            .pending
            .contains(&(org.to_string(), identifier.to_string())))
    }

    fn resolve_user_id(&self, username: &str) -> Result<Option<u64>> {
        Ok(self.user_ids.get(username).copied())
    }

    fn create_invitation(&mut self, org: &str, user_id: u64, role: OrgRole) -> Result<()> {
        let login = self.login_for(user_id);
        if let Some(login) = &login {
            if self.refused_writes.contains(login) {
                return Err(OrgSyncError::Api(format!(
                    "invitation for '{}' refused",
                    login
                )));
            }
        }
        self.writes.push(WriteOp::Invite {
            org: org.to_string(),
            user_id,
            role,
        });
        // The invitation is now pending under the login, so a repeat run
        // sees it and skips.
        if let Some(login) = login {
            self.pending.insert((org.to_string(), login));
        }
        Ok(())
    }

    fn team_exists(&self, org: &str, slug: &str) -> Result<bool> {
        Ok(self
            .teams
            .contains_key(&(org.to_string(), slug.to_string())))
    }

    fn create_team(
        &mut self,
        org: &str,
        name: &str,
        _privacy: TeamPrivacy,
        _description: &str,
    ) -> Result<String> {
        if self.team_creation_refused {
            return Err(OrgSyncError::TeamCreation {
                name: name.to_string(),
                detail: "creation refused".to_string(),
            });
        }
        let slug = slugify(name);
        self.writes.push(WriteOp::CreateTeam {
            org: org.to_string(),
            name: name.to_string(),
        });
        self.teams
            .insert((org.to_string(), slug.clone()), name.to_string());
        Ok(slug)
    }

    fn team_membership(&self, org: &str, slug: &str, username: &str) -> Result<TeamMembership> {
        Ok(self
            .team_roles
            .get(&(org.to_string(), slug.to_string(), username.to_string()))
            .copied()
            .unwrap_or(TeamMembership::Absent))
    }

    fn set_team_membership(
        &mut self,
        org: &str,
        slug: &str,
        username: &str,
        role: TeamRole,
    ) -> Result<()> {
        if self.refused_writes.contains(username) {
            return Err(OrgSyncError::Api(format!(
                "membership write for '{}' refused",
                username
            )));
        }
        self.writes.push(WriteOp::SetTeamMembership {
            org: org.to_string(),
            slug: slug.to_string(),
            username: username.to_string(),
            role,
        });
        self.team_roles.insert(
            (org.to_string(), slug.to_string(), username.to_string()),
            role.membership(),
        );
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builder for an [`InMemoryOrg`] pre-populated around one organization.
    pub struct OrgFixture {
        pub org: String,
        pub client: InMemoryOrg,
    }

    impl OrgFixture {
        pub fn new(org: &str) -> Self {
            let mut client = InMemoryOrg::new();
            client.add_org(org);
            Self {
                org: org.to_string(),
                client,
            }
        }

        pub fn with_user(mut self, username: &str, id: u64) -> Self {
            self.client.add_user(username, id);
            self
        }

        pub fn with_member(mut self, username: &str) -> Self {
            self.client.add_member(&self.org, username);
            self
        }

        pub fn with_pending(mut self, identifier: &str) -> Self {
            self.client.add_pending(&self.org, identifier);
            self
        }

        pub fn with_team(mut self, slug: &str, name: &str) -> Self {
            self.client.add_team(&self.org, slug, name);
            self
        }

        pub fn with_team_role(mut self, slug: &str, username: &str, role: TeamMembership) -> Self {
            self.client.set_role(&self.org, slug, username, role);
            self
        }
    }
}
