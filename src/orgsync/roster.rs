//! Roster file loading.
//!
//! The roster is a hand-edited, loosely-JSON file: an array of objects with
//! `name`, `username`, and (for the team workflow) `group`. Loading is
//! deliberately tolerant: trailing commas are stripped before parsing,
//! entries that are not objects are ignored, and entries without the
//! required fields are dropped. Only a roster that yields *zero* usable
//! records is an error, since the calling program has nothing to do then.

use crate::error::{OrgSyncError, Result};
use crate::model::{GroupedPerson, Person};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A raw roster entry as written in the file. Every field is optional;
/// normalization decides what survives.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    name: Option<String>,
    username: Option<String>,
    group: Option<String>,
}

/// Remove commas that sit directly before a closing `]` or `}`.
///
/// This is a plain textual pass over the whole input, not a lenient parser:
/// the roster file is hand-edited and a comma after the last entry is by far
/// the most common mistake in it.
pub fn strip_trailing_commas(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ',' {
            out.push(c);
            continue;
        }
        // Buffer whitespace after the comma so we can see what follows it.
        let mut ws = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_whitespace() {
                ws.push(next);
                chars.next();
            } else {
                break;
            }
        }
        match chars.peek() {
            Some(&bracket) if bracket == ']' || bracket == '}' => out.push_str(&ws),
            _ => {
                out.push(c);
                out.push_str(&ws);
            }
        }
    }
    out
}

fn normalize_username(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

fn raw_entries(raw: &str) -> Result<Vec<RawEntry>> {
    let cleaned = strip_trailing_commas(raw);
    let values: Vec<serde_json::Value> = serde_json::from_str(&cleaned)?;
    Ok(values
        .into_iter()
        .filter(|value| value.is_object())
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

/// Parse a roster for the invitation workflow.
///
/// Entries without a username are dropped. Duplicate usernames are kept;
/// deduplication is the reconciler's job.
pub fn parse_people(raw: &str) -> Result<Vec<Person>> {
    let people: Vec<Person> = raw_entries(raw)?
        .iter()
        .filter_map(|entry| {
            let username = normalize_username(entry.username.as_deref().unwrap_or(""));
            if username.is_empty() {
                return None;
            }
            let name = entry.name.as_deref().unwrap_or("").trim();
            Some(Person::new(name, username))
        })
        .collect();
    if people.is_empty() {
        return Err(OrgSyncError::EmptyRoster(
            "no entries with a username".to_string(),
        ));
    }
    Ok(people)
}

pub fn load_people(path: &Path) -> Result<Vec<Person>> {
    let raw = fs::read_to_string(path)?;
    parse_people(&raw)
}

/// Parse a roster for the team workflow. Entries additionally need a
/// non-empty group; anything missing username or group is dropped.
pub fn parse_grouped(raw: &str) -> Result<Vec<GroupedPerson>> {
    let people: Vec<GroupedPerson> = raw_entries(raw)?
        .iter()
        .filter_map(|entry| {
            let username = normalize_username(entry.username.as_deref().unwrap_or(""));
            let group = entry.group.as_deref().unwrap_or("").trim();
            if username.is_empty() || group.is_empty() {
                return None;
            }
            let name = entry.name.as_deref().unwrap_or("").trim();
            Some(GroupedPerson::new(name, username, group))
        })
        .collect();
    if people.is_empty() {
        return Err(OrgSyncError::EmptyRoster(
            "no entries with both a username and a group".to_string(),
        ));
    }
    Ok(people)
}

pub fn load_grouped(path: &Path) -> Result<Vec<GroupedPerson>> {
    let raw = fs::read_to_string(path)?;
    parse_grouped(&raw)
}

/// Split a comma-separated instructor list into normalized usernames.
pub fn parse_instructors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_username)
        .filter(|username| !username.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comma_before_closing_bracket() {
        assert_eq!(strip_trailing_commas("[1, 2,]"), "[1, 2]");
        assert_eq!(strip_trailing_commas("{\"a\": 1,\n}"), "{\"a\": 1\n}");
        assert_eq!(strip_trailing_commas("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn keeps_ordinary_commas() {
        assert_eq!(
            strip_trailing_commas("[{\"a\": 1, \"b\": 2}, {\"c\": 3}]"),
            "[{\"a\": 1, \"b\": 2}, {\"c\": 3}]"
        );
    }

    #[test]
    fn comma_at_end_of_input_survives() {
        assert_eq!(strip_trailing_commas("1,"), "1,");
        assert_eq!(strip_trailing_commas("1, "), "1, ");
    }

    #[test]
    fn parses_roster_with_trailing_comma() {
        let raw = r#"[
            {"name": "Alice", "username": "@alice"},
            {"username": "bob"},
        ]"#;
        let people = parse_people(raw).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0], Person::new("Alice", "alice"));
        assert_eq!(people[1], Person::new("", "bob"));
    }

    #[test]
    fn drops_entries_without_username() {
        let raw = r#"[{"name": "No Account"}, {"username": "  "}, {"username": "carol"}]"#;
        let people = parse_people(raw).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].username, "carol");
    }

    #[test]
    fn ignores_non_object_entries() {
        let raw = r#"["stray", 42, {"username": "dave"}]"#;
        let people = parse_people(raw).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].username, "dave");
    }

    #[test]
    fn empty_roster_is_an_error() {
        assert!(matches!(
            parse_people("[]"),
            Err(OrgSyncError::EmptyRoster(_))
        ));
        assert!(matches!(
            parse_people(r#"[{"name": "nobody"}]"#),
            Err(OrgSyncError::EmptyRoster(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_people("not json"), Err(OrgSyncError::Json(_))));
    }

    #[test]
    fn grouped_entries_need_username_and_group() {
        let raw = r#"[
            {"username": "alice", "group": "A"},
            {"username": "bob"},
            {"group": "A"},
            {"username": "carol", "group": "  "},
        ]"#;
        let people = parse_grouped(raw).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0], GroupedPerson::new("", "alice", "A"));
    }

    #[test]
    fn grouped_duplicates_are_kept_for_the_reconciler() {
        let raw = r#"[
            {"username": "alice", "group": "A"},
            {"username": "bob", "group": "A"},
            {"username": "alice", "group": "A"},
        ]"#;
        let people = parse_grouped(raw).unwrap();
        assert_eq!(people.len(), 3);
    }

    #[test]
    fn grouped_roster_without_groups_is_an_error() {
        assert!(matches!(
            parse_grouped(r#"[{"username": "alice"}]"#),
            Err(OrgSyncError::EmptyRoster(_))
        ));
    }

    #[test]
    fn instructor_list_is_normalized() {
        assert_eq!(
            parse_instructors("@teach1, teach2 ,,@teach3"),
            vec!["teach1", "teach2", "teach3"]
        );
        assert!(parse_instructors("").is_empty());
        assert!(parse_instructors(" , ").is_empty());
    }
}
