use serde::{Deserialize, Serialize};

/// One roster entry. The username is the sole identity key; `name` is
/// display-only and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub username: String,
}

impl Person {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }

    /// Name for progress output, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

/// A roster entry that also carries its group, used by the team workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedPerson {
    pub name: String,
    pub username: String,
    pub group: String,
}

impl GroupedPerson {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            group: group.into(),
        }
    }
}

/// Current team membership as read from the organization.
///
/// The derived ordering is the privilege ordering
/// (`Absent < Member < Maintainer`), so "already satisfies the target role"
/// is a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TeamMembership {
    Absent,
    Member,
    Maintainer,
}

impl TeamMembership {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamMembership::Absent => "absent",
            TeamMembership::Member => "member",
            TeamMembership::Maintainer => "maintainer",
        }
    }

    /// True when this membership already grants at least the target role.
    pub fn satisfies(self, target: TeamRole) -> bool {
        self >= target.membership()
    }
}

/// Role requested when writing a team membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRole {
    Member,
    Maintainer,
}

impl TeamRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamRole::Member => "member",
            TeamRole::Maintainer => "maintainer",
        }
    }

    pub fn membership(self) -> TeamMembership {
        match self {
            TeamRole::Member => TeamMembership::Member,
            TeamRole::Maintainer => TeamMembership::Maintainer,
        }
    }
}

/// Role granted by an organization invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgRole {
    DirectMember,
    Admin,
}

impl OrgRole {
    pub fn as_str(self) -> &'static str {
        match self {
            OrgRole::DirectMember => "direct_member",
            OrgRole::Admin => "admin",
        }
    }
}

/// Privacy applied to newly created teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamPrivacy {
    #[default]
    Closed,
    Secret,
}

impl TeamPrivacy {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamPrivacy::Closed => "closed",
            TeamPrivacy::Secret => "secret",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_ordering_follows_privilege() {
        assert!(TeamMembership::Absent < TeamMembership::Member);
        assert!(TeamMembership::Member < TeamMembership::Maintainer);
    }

    #[test]
    fn maintainer_satisfies_member_target() {
        assert!(TeamMembership::Maintainer.satisfies(TeamRole::Member));
        assert!(TeamMembership::Maintainer.satisfies(TeamRole::Maintainer));
        assert!(TeamMembership::Member.satisfies(TeamRole::Member));
        assert!(!TeamMembership::Member.satisfies(TeamRole::Maintainer));
        assert!(!TeamMembership::Absent.satisfies(TeamRole::Member));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(Person::new("Alice L", "alice").display_name(), "Alice L");
        assert_eq!(Person::new("", "alice").display_name(), "alice");
    }
}
