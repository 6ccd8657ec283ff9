use crate::error::Result;
use crate::model::TeamPrivacy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_GH_BIN: &str = "gh";

/// Configuration for orgsync, stored as config.json in the user config dir.
/// Everything here is a default; command-line flags win.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgSyncConfig {
    /// Organization used when --org is not given.
    #[serde(default)]
    pub default_org: Option<String>,

    /// Privacy applied to newly created teams.
    #[serde(default)]
    pub team_privacy: TeamPrivacy,

    /// The gh binary to spawn; override for wrappers or test stubs.
    #[serde(default = "default_gh_bin")]
    pub gh_bin: String,
}

fn default_gh_bin() -> String {
    DEFAULT_GH_BIN.to_string()
}

impl Default for OrgSyncConfig {
    fn default() -> Self {
        Self {
            default_org: None,
            team_privacy: TeamPrivacy::default(),
            gh_bin: default_gh_bin(),
        }
    }
}

impl OrgSyncConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config: OrgSyncConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = OrgSyncConfig::default();
        assert_eq!(config.default_org, None);
        assert_eq!(config.team_privacy, TeamPrivacy::Closed);
        assert_eq!(config.gh_bin, "gh");
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = OrgSyncConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, OrgSyncConfig::default());
    }

    #[test]
    fn load_partial_config_fills_in_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_org": "acme"}"#,
        )
        .unwrap();

        let config = OrgSyncConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_org.as_deref(), Some("acme"));
        assert_eq!(config.gh_bin, "gh");
    }

    #[test]
    fn load_full_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_org": "acme", "team_privacy": "secret", "gh_bin": "/opt/gh"}"#,
        )
        .unwrap();

        let config = OrgSyncConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.team_privacy, TeamPrivacy::Secret);
        assert_eq!(config.gh_bin, "/opt/gh");
    }
}
