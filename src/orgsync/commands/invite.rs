use crate::client::OrgClient;
use crate::commands::{CmdMessage, CmdResult, Tally};
use crate::error::Result;
use crate::model::{OrgRole, Person};
use std::collections::HashSet;

/// Settings for one invitation run.
#[derive(Debug, Clone)]
pub struct InviteOptions {
    pub org: String,
    pub role: OrgRole,
    pub dry_run: bool,
}

/// Reconcile the roster against the organization's invitations.
///
/// Each person ends in exactly one of three states: skipped (already a
/// member or already invited), invited (or would-invite under dry-run), or
/// failed. Per-person failures never abort the batch; only an inaccessible
/// organization does.
pub fn run<C: OrgClient>(
    client: &mut C,
    opts: &InviteOptions,
    roster: &[Person],
) -> Result<CmdResult> {
    client.check_org_access(&opts.org)?;

    let people = dedup_by_username(roster);
    let mut result = CmdResult::default();
    let mut tally = Tally::default();

    result.add_message(CmdMessage::info(format!(
        "Inviting {} to '{}' as '{}'",
        people.len(),
        opts.org,
        opts.role.as_str()
    )));

    let total = people.len();
    for (i, person) in people.iter().enumerate() {
        result.add_message(CmdMessage::info(format!(
            "[{}/{}] {} ({})",
            i + 1,
            total,
            person.display_name(),
            person.username
        )));
        let username = person.username.as_str();

        // An identifier with an "@" is an email; membership can only be
        // checked by login, so emails go straight to the invitation checks.
        if !username.contains('@') && client.is_org_member(&opts.org, username)? {
            result.add_message(CmdMessage::info("  already a member, skipping"));
            tally.skipped += 1;
            continue;
        }
        if client.has_pending_invitation(&opts.org, username)? {
            result.add_message(CmdMessage::info("  invitation already pending, skipping"));
            tally.skipped += 1;
            continue;
        }
        if opts.dry_run {
            result.add_message(CmdMessage::info("  dry-run: would invite"));
            tally.ok += 1;
            continue;
        }
        let user_id = match client.resolve_user_id(username)? {
            Some(id) => id,
            None => {
                result.add_message(CmdMessage::warning(format!(
                    "  cannot resolve user '{}'",
                    username
                )));
                tally.failed += 1;
                continue;
            }
        };
        match client.create_invitation(&opts.org, user_id, opts.role) {
            Ok(()) => {
                result.add_message(CmdMessage::success("  invited"));
                tally.ok += 1;
            }
            Err(e) => {
                result.add_message(CmdMessage::warning(format!("  invite failed: {}", e)));
                tally.failed += 1;
            }
        }
    }

    result.add_message(CmdMessage::info(format!("Summary: {}", tally.summary())));
    Ok(result.with_tally(tally))
}

/// First occurrence of a username wins; order is preserved.
fn dedup_by_username(roster: &[Person]) -> Vec<Person> {
    let mut seen = HashSet::new();
    roster
        .iter()
        .filter(|person| seen.insert(person.username.clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::fixtures::OrgFixture;
    use crate::client::memory::WriteOp;
    use crate::error::OrgSyncError;

    fn opts(org: &str) -> InviteOptions {
        InviteOptions {
            org: org.to_string(),
            role: OrgRole::DirectMember,
            dry_run: false,
        }
    }

    #[test]
    fn invites_new_users_and_skips_satisfied_ones() {
        let fixture = OrgFixture::new("acme")
            .with_user("alice", 1)
            .with_user("bob", 2)
            .with_member("alice")
            .with_pending("carol");
        let mut client = fixture.client;

        let roster = vec![
            Person::new("Alice", "alice"),
            Person::new("Bob", "bob"),
            Person::new("Carol", "carol"),
        ];
        let result = run(&mut client, &opts("acme"), &roster).unwrap();

        assert_eq!(result.tally, Tally { ok: 1, skipped: 2, failed: 0 });
        assert_eq!(
            client.writes,
            vec![WriteOp::Invite {
                org: "acme".to_string(),
                user_id: 2,
                role: OrgRole::DirectMember,
            }]
        );
    }

    #[test]
    fn second_run_is_all_skip() {
        let fixture = OrgFixture::new("acme")
            .with_user("alice", 1)
            .with_user("bob", 2);
        let mut client = fixture.client;
        let roster = vec![Person::new("", "alice"), Person::new("", "bob")];

        let first = run(&mut client, &opts("acme"), &roster).unwrap();
        assert_eq!(first.tally, Tally { ok: 2, skipped: 0, failed: 0 });

        let second = run(&mut client, &opts("acme"), &roster).unwrap();
        assert_eq!(second.tally, Tally { ok: 0, skipped: 2, failed: 0 });
        assert_eq!(client.writes.len(), 2);
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let fixture = OrgFixture::new("acme").with_user("alice", 1);
        let mut client = fixture.client;
        let roster = vec![
            Person::new("Alice the First", "alice"),
            Person::new("Alice the Second", "alice"),
        ];

        let result = run(&mut client, &opts("acme"), &roster).unwrap();

        assert_eq!(result.tally.ok, 1);
        assert_eq!(client.writes.len(), 1);
        let progress: Vec<_> = result
            .messages
            .iter()
            .filter(|m| m.content.contains("Alice the"))
            .collect();
        assert_eq!(progress.len(), 1);
        assert!(progress[0].content.contains("Alice the First"));
    }

    #[test]
    fn dry_run_performs_no_writes() {
        let fixture = OrgFixture::new("acme").with_user("alice", 1);
        let mut client = fixture.client;
        let roster = vec![Person::new("", "alice")];

        let result = run(
            &mut client,
            &InviteOptions {
                dry_run: true,
                ..opts("acme")
            },
            &roster,
        )
        .unwrap();

        assert_eq!(result.tally, Tally { ok: 1, skipped: 0, failed: 0 });
        assert!(client.writes.is_empty());
    }

    #[test]
    fn unresolvable_user_fails_without_aborting() {
        let fixture = OrgFixture::new("acme").with_user("bob", 2);
        let mut client = fixture.client;
        let roster = vec![Person::new("", "ghost"), Person::new("", "bob")];

        let result = run(&mut client, &opts("acme"), &roster).unwrap();

        assert_eq!(result.tally, Tally { ok: 1, skipped: 0, failed: 1 });
        assert_eq!(client.writes.len(), 1);
    }

    #[test]
    fn refused_invitation_counts_as_failure() {
        let mut fixture = OrgFixture::new("acme").with_user("alice", 1);
        fixture.client.refuse_writes_for("alice");
        let mut client = fixture.client;

        let roster = vec![Person::new("", "alice")];
        let result = run(&mut client, &opts("acme"), &roster).unwrap();

        assert_eq!(result.tally, Tally { ok: 0, skipped: 0, failed: 1 });
        assert!(client.writes.is_empty());
    }

    #[test]
    fn email_identifier_skips_membership_check_but_sees_pending() {
        // An org member whose roster entry is an email is not recognized as
        // a member; only a pending invitation recorded under the email
        // short-circuits.
        let fixture = OrgFixture::new("acme").with_pending("alice@example.com");
        let mut client = fixture.client;

        let roster = vec![Person::new("", "alice@example.com")];
        let result = run(&mut client, &opts("acme"), &roster).unwrap();

        assert_eq!(result.tally, Tally { ok: 0, skipped: 1, failed: 0 });
    }

    #[test]
    fn inaccessible_org_aborts() {
        let fixture = OrgFixture::new("acme");
        let mut client = fixture.client;
        let roster = vec![Person::new("", "alice")];

        assert!(matches!(
            run(&mut client, &opts("other"), &roster),
            Err(OrgSyncError::OrgAccess { .. })
        ));
        assert!(client.writes.is_empty());
    }

    #[test]
    fn summary_is_always_the_last_message() {
        let fixture = OrgFixture::new("acme").with_user("alice", 1);
        let mut client = fixture.client;
        let roster = vec![Person::new("", "alice")];

        let result = run(&mut client, &opts("acme"), &roster).unwrap();
        let last = result.messages.last().unwrap();
        assert_eq!(last.content, "Summary: ok=1 skip=0 fail=0");
    }
}
