use crate::client::OrgClient;
use crate::commands::{CmdMessage, CmdResult, Tally};
use crate::error::Result;
use crate::model::{GroupedPerson, TeamMembership, TeamPrivacy, TeamRole};
use crate::slug::slugify;
use std::collections::{BTreeMap, HashSet};

/// Settings for one team reconciliation run.
#[derive(Debug, Clone)]
pub struct TeamOptions {
    pub org: String,
    pub privacy: TeamPrivacy,
    pub dry_run: bool,
}

/// Reconcile group teams: create missing teams, then make sure every
/// instructor is a maintainer and every student a member.
///
/// Groups are processed in sorted order so run logs are reproducible.
/// Membership write failures are counted and the batch continues; a failed
/// team creation aborts the whole run, since every membership write for
/// that team would be meaningless.
pub fn run<C: OrgClient>(
    client: &mut C,
    opts: &TeamOptions,
    roster: &[GroupedPerson],
    instructors: &[String],
) -> Result<CmdResult> {
    client.check_org_access(&opts.org)?;

    let groups = group_members(roster);
    let mut result = CmdResult::default();
    let mut tally = Tally::default();

    result.add_message(CmdMessage::info(format!(
        "Found {} groups; ensuring teams exist and memberships are set",
        groups.len()
    )));

    let total = groups.len();
    for (i, (group_name, members)) in groups.iter().enumerate() {
        let slug = slugify(group_name);
        result.add_message(CmdMessage::info(format!(
            "[{}/{}] team '{}' (slug: {})",
            i + 1,
            total,
            group_name,
            slug
        )));

        if client.team_exists(&opts.org, &slug)? {
            result.add_message(CmdMessage::info("  team exists"));
        } else if opts.dry_run {
            result.add_message(CmdMessage::info("  dry-run: would create team"));
        } else {
            let created = client.create_team(&opts.org, group_name, opts.privacy, "")?;
            result.add_message(CmdMessage::success(format!(
                "  created team (slug: {})",
                created
            )));
        }

        // Instructors first, and always as maintainers; a student pass over
        // the same username then sees maintainer >= member and skips.
        for username in instructors {
            ensure_role(
                client,
                opts,
                &slug,
                username,
                TeamRole::Maintainer,
                &mut result,
                &mut tally,
            )?;
        }
        for username in members {
            ensure_role(
                client,
                opts,
                &slug,
                username,
                TeamRole::Member,
                &mut result,
                &mut tally,
            )?;
        }
    }

    result.add_message(CmdMessage::info(format!("Summary: {}", tally.summary())));
    Ok(result.with_tally(tally))
}

/// Group the roster by group name, deduplicating usernames within a group
/// (first occurrence wins). The BTreeMap gives deterministic, sorted group
/// iteration.
fn group_members(roster: &[GroupedPerson]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for person in roster {
        if seen.insert((person.group.clone(), person.username.clone())) {
            groups
                .entry(person.group.clone())
                .or_default()
                .push(person.username.clone());
        }
    }
    groups
}

fn ensure_role<C: OrgClient>(
    client: &mut C,
    opts: &TeamOptions,
    slug: &str,
    username: &str,
    target: TeamRole,
    result: &mut CmdResult,
    tally: &mut Tally,
) -> Result<()> {
    let current = client.team_membership(&opts.org, slug, username)?;
    if current.satisfies(target) {
        result.add_message(CmdMessage::info(format!(
            "  {}: already {}",
            username,
            current.as_str()
        )));
        tally.skipped += 1;
        return Ok(());
    }

    let action = match (current, target) {
        (TeamMembership::Member, TeamRole::Maintainer) => "promote to maintainer",
        (_, TeamRole::Maintainer) => "add as maintainer",
        (_, TeamRole::Member) => "add as member",
    };

    if opts.dry_run {
        result.add_message(CmdMessage::info(format!(
            "  {}: dry-run, would {}",
            username, action
        )));
        tally.ok += 1;
        return Ok(());
    }

    match client.set_team_membership(&opts.org, slug, username, target) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!("  {}: {}", username, action)));
            tally.ok += 1;
        }
        Err(e) => {
            result.add_message(CmdMessage::warning(format!(
                "  {}: {} failed: {}",
                username, action, e
            )));
            tally.failed += 1;
        }
    }
    Ok(())
}
