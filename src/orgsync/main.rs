use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use orgsync::api::{CmdMessage, InviteOptions, MessageLevel, OrgSyncApi, TeamOptions};
use orgsync::client::gh::GhClient;
use orgsync::config::OrgSyncConfig;
use orgsync::error::{OrgSyncError, Result};
use orgsync::model::{OrgRole, TeamPrivacy};
use orgsync::roster;
use std::path::{Path, PathBuf};

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = OrgSyncConfig::load(config_dir()).unwrap_or_default();

    match cli.command {
        Commands::Invite {
            org,
            file,
            role,
            dry_run,
        } => handle_invite(&config, org, &file, role.into(), dry_run),
        Commands::Teams {
            org,
            file,
            instructors,
            team_privacy,
            dry_run,
        } => handle_teams(&config, org, &file, &instructors, team_privacy.into(), dry_run),
        Commands::Check { org } => handle_check(&config, org),
    }
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ORGSYNC_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("com", "orgsync", "orgsync")
        .expect("Could not determine config dir")
        .config_dir()
        .to_path_buf()
}

fn resolve_org(config: &OrgSyncConfig, org: Option<String>) -> Result<String> {
    org.or_else(|| config.default_org.clone()).ok_or_else(|| {
        OrgSyncError::Api("no organization given (use --org or set default_org)".to_string())
    })
}

fn gh_client(config: &OrgSyncConfig) -> GhClient {
    let bin = std::env::var("ORGSYNC_GH").unwrap_or_else(|_| config.gh_bin.clone());
    GhClient::new(bin)
}

fn handle_invite(
    config: &OrgSyncConfig,
    org: Option<String>,
    file: &Path,
    role: OrgRole,
    dry_run: bool,
) -> Result<()> {
    let org = resolve_org(config, org)?;
    // Validate the local input before any remote call.
    let people = roster::load_people(file)?;

    let mut api = OrgSyncApi::new(gh_client(config));
    let opts = InviteOptions { org, role, dry_run };
    let result = api.invite(&opts, &people)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_teams(
    config: &OrgSyncConfig,
    org: Option<String>,
    file: &Path,
    instructors: &str,
    privacy: TeamPrivacy,
    dry_run: bool,
) -> Result<()> {
    let org = resolve_org(config, org)?;
    let people = roster::load_grouped(file)?;
    let instructors = roster::parse_instructors(instructors);

    let mut api = OrgSyncApi::new(gh_client(config));
    let opts = TeamOptions {
        org,
        privacy,
        dry_run,
    };
    let result = api.sync_teams(&opts, &people, &instructors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_check(config: &OrgSyncConfig, org: Option<String>) -> Result<()> {
    let org = resolve_org(config, org)?;
    let api = OrgSyncApi::new(gh_client(config));
    let result = api.check(&org)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
