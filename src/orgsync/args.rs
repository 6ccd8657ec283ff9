use clap::{Parser, Subcommand, ValueEnum};
use orgsync::model::{OrgRole, TeamPrivacy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orgsync")]
#[command(
    about = "Reconcile GitHub organization invitations and team rosters",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invite everyone in a roster file to the organization
    Invite {
        /// Organization login (falls back to the configured default_org)
        #[arg(long)]
        org: Option<String>,

        /// Roster file: a JSON array of {name, username} entries
        #[arg(long)]
        file: PathBuf,

        /// Role granted by the invitation
        #[arg(long, value_enum, default_value_t = RoleArg::DirectMember)]
        role: RoleArg,

        /// Report intended actions without performing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Ensure group teams exist and hold the right members and maintainers
    Teams {
        /// Organization login (falls back to the configured default_org)
        #[arg(long)]
        org: Option<String>,

        /// Roster file: a JSON array of {name, username, group} entries
        #[arg(long)]
        file: PathBuf,

        /// Comma-separated usernames made maintainer of every team
        #[arg(long)]
        instructors: String,

        /// Privacy for newly created teams
        #[arg(long, value_enum, default_value_t = PrivacyArg::Closed)]
        team_privacy: PrivacyArg,

        /// Report intended actions without performing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Verify gh authentication and organization access
    Check {
        /// Organization login (falls back to the configured default_org)
        #[arg(long)]
        org: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    /// Regular organization member
    #[value(name = "direct_member")]
    DirectMember,
    /// Organization administrator
    Admin,
}

impl From<RoleArg> for OrgRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::DirectMember => OrgRole::DirectMember,
            RoleArg::Admin => OrgRole::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PrivacyArg {
    /// Visible to all org members
    Closed,
    /// Visible only to team members
    Secret,
}

impl From<PrivacyArg> for TeamPrivacy {
    fn from(privacy: PrivacyArg) -> Self {
        match privacy {
            PrivacyArg::Closed => TeamPrivacy::Closed,
            PrivacyArg::Secret => TeamPrivacy::Secret,
        }
    }
}
