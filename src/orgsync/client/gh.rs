use super::OrgClient;
use crate::error::{OrgSyncError, Result};
use crate::model::{OrgRole, TeamMembership, TeamPrivacy, TeamRole};
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Production client: spawns the `gh` CLI for every call.
///
/// `gh` carries the authentication; this client only builds `gh api`
/// invocations and parses their JSON output. Which binary to spawn is
/// configurable so wrappers and test stubs can stand in for the real thing.
pub struct GhClient {
    bin: String,
}

impl GhClient {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn run(&self, args: &[&str], body: Option<&str>) -> Result<Output> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .stdin(if body.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| OrgSyncError::Gh(format!("{}: {}", self.bin, e)))?;
        if let Some(text) = body {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }
        }
        Ok(child.wait_with_output()?)
    }

    fn api(&self, args: &[&str]) -> Result<Output> {
        let mut full = vec!["api"];
        full.extend_from_slice(args);
        self.run(&full, None)
    }

    fn api_with_body(
        &self,
        method: &str,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<Output> {
        self.run(
            &[
                "api",
                "--method",
                method,
                endpoint,
                "-H",
                "Content-Type: application/json",
                "--input",
                "-",
            ],
            Some(&body.to_string()),
        )
    }
}

/// Diagnostic text from a failed call; `gh` writes API errors to stderr but
/// sometimes leaves the detail on stdout.
fn diagnostic(output: &Output) -> String {
    let err = String::from_utf8_lossy(&output.stderr);
    let err = err.trim();
    if err.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        err.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct PendingInvitation {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct TeamRecord {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct TeamMembershipRecord {
    role: String,
}

impl OrgClient for GhClient {
    fn check_org_access(&self, org: &str) -> Result<()> {
        let auth = self.run(&["auth", "status"], None)?;
        if !auth.status.success() {
            return Err(OrgSyncError::Auth(
                "gh is not logged in; run `gh auth login`".to_string(),
            ));
        }
        let endpoint = format!("orgs/{}", org);
        let output = self.api(&[&endpoint])?;
        if !output.status.success() {
            return Err(OrgSyncError::OrgAccess {
                org: org.to_string(),
                detail: diagnostic(&output),
            });
        }
        Ok(())
    }

    fn is_org_member(&self, org: &str, username: &str) -> Result<bool> {
        // A failing membership lookup (404 or otherwise) reads as "not a
        // member".
        let endpoint = format!("orgs/{}/memberships/{}", org, username);
        let output = self.api(&["-X", "GET", &endpoint])?;
        Ok(output.status.success())
    }

    fn has_pending_invitation(&self, org: &str, identifier: &str) -> Result<bool> {
        let endpoint = format!("orgs/{}/invitations?per_page=100", org);
        let output = self.api(&[&endpoint])?;
        if !output.status.success() {
            return Ok(false);
        }
        // Unparseable output reads as "no pending invitation".
        let invitations: Vec<PendingInvitation> =
            serde_json::from_slice(&output.stdout).unwrap_or_default();
        Ok(invitations.iter().any(|invitation| {
            invitation.login.as_deref() == Some(identifier)
                || invitation.email.as_deref() == Some(identifier)
        }))
    }

    fn resolve_user_id(&self, username: &str) -> Result<Option<u64>> {
        let endpoint = format!("users/{}", username);
        let output = self.api(&[&endpoint])?;
        if !output.status.success() {
            return Ok(None);
        }
        let user: Option<UserRecord> = serde_json::from_slice(&output.stdout).ok();
        Ok(user.map(|u| u.id))
    }

    fn create_invitation(&mut self, org: &str, user_id: u64, role: OrgRole) -> Result<()> {
        let endpoint = format!("orgs/{}/invitations", org);
        let body = serde_json::json!({ "invitee_id": user_id, "role": role.as_str() });
        let output = self.api_with_body("POST", &endpoint, &body)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(OrgSyncError::Api(diagnostic(&output)))
        }
    }

    fn team_exists(&self, org: &str, slug: &str) -> Result<bool> {
        let endpoint = format!("orgs/{}/teams/{}", org, slug);
        let output = self.api(&[&endpoint])?;
        Ok(output.status.success())
    }

    fn create_team(
        &mut self,
        org: &str,
        name: &str,
        privacy: TeamPrivacy,
        description: &str,
    ) -> Result<String> {
        let endpoint = format!("orgs/{}/teams", org);
        let body = serde_json::json!({
            "name": name,
            "privacy": privacy.as_str(),
            "description": description,
        });
        let output = self.api_with_body("POST", &endpoint, &body)?;
        if !output.status.success() {
            return Err(OrgSyncError::TeamCreation {
                name: name.to_string(),
                detail: diagnostic(&output),
            });
        }
        let team: TeamRecord = serde_json::from_slice(&output.stdout)?;
        Ok(team.slug)
    }

    fn team_membership(&self, org: &str, slug: &str, username: &str) -> Result<TeamMembership> {
        let endpoint = format!("orgs/{}/teams/{}/memberships/{}", org, slug, username);
        let output = self.api(&[&endpoint])?;
        if !output.status.success() {
            return Ok(TeamMembership::Absent);
        }
        let record: Option<TeamMembershipRecord> = serde_json::from_slice(&output.stdout).ok();
        Ok(match record.as_ref().map(|r| r.role.as_str()) {
            Some("maintainer") => TeamMembership::Maintainer,
            Some("member") => TeamMembership::Member,
            _ => TeamMembership::Absent,
        })
    }

    fn set_team_membership(
        &mut self,
        org: &str,
        slug: &str,
        username: &str,
        role: TeamRole,
    ) -> Result<()> {
        let endpoint = format!("orgs/{}/teams/{}/memberships/{}", org, slug, username);
        let body = serde_json::json!({ "role": role.as_str() });
        let output = self.api_with_body("PUT", &endpoint, &body)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(OrgSyncError::Api(diagnostic(&output)))
        }
    }
}
