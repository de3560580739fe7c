//! Command line definition and argument extraction

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use navlink_model::{EntityReference, EntityType, Scope};
use navlink_resolver::{ConfigError, ResolverConfig};
use navlink_routes::NavMode;

pub(crate) fn command() -> Command {
    Command::new("navlink")
        .version(navlink_resolver::VERSION)
        .about("Resolve entity references into navigable platform routes")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve one reference, looking up storage when needed")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("Entity type, e.g. Pipelines, Template, Connectors"),
                )
                .arg(
                    Arg::new("identifier")
                        .long("identifier")
                        .required(true)
                        .help("Entity identifier"),
                )
                .args(scope_args())
                .arg(Arg::new("branch").long("branch").help("Git branch context"))
                .arg(
                    Arg::new("version-label")
                        .long("version-label")
                        .help("Template version label"),
                )
                .arg(
                    Arg::new("parent")
                        .long("parent")
                        .help("Owning pipeline (triggers) or environment (infrastructure)"),
                )
                .args(config_args())
                .arg(
                    Arg::new("api-base")
                        .long("api-base")
                        .help("Gateway base URL for metadata lookups"),
                )
                .arg(
                    Arg::new("api-key")
                        .long("api-key")
                        .help("API key sent with metadata lookups"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print url, kind and fallback reason as JSON"),
                ),
        )
        .subcommand(
            Command::new("routes")
                .about("Print the route of every entity type that needs no lookup")
                .arg(
                    Arg::new("identifier")
                        .long("identifier")
                        .required(true)
                        .help("Identifier to route"),
                )
                .args(scope_args())
                .arg(
                    Arg::new("parent")
                        .long("parent")
                        .help("Environment owning an infrastructure"),
                )
                .args(config_args()),
        )
}

fn scope_args() -> [Arg; 3] {
    [
        Arg::new("account")
            .long("account")
            .required(true)
            .help("Account identifier"),
        Arg::new("org").long("org").help("Organization identifier"),
        Arg::new("project")
            .long("project")
            .requires("org")
            .help("Project identifier"),
    ]
}

fn config_args() -> [Arg; 2] {
    [
        Arg::new("nav")
            .long("nav")
            .help("Navigation mode: legacy or v2 (overrides the config file)"),
        Arg::new("config")
            .long("config")
            .help("Path to a TOML resolver configuration"),
    ]
}

fn string(args: &ArgMatches, id: &str) -> Option<String> {
    args.get_one::<String>(id).cloned()
}

/// Value of an argument only some subcommands define
fn defined(args: &ArgMatches, id: &str) -> Option<String> {
    args.try_get_one::<String>(id).ok().flatten().cloned()
}

/// Scope from `--account`, `--org` and `--project`
pub(crate) fn scope(args: &ArgMatches) -> anyhow::Result<Scope> {
    let account = string(args, "account").unwrap_or_default();
    Scope::from_parts(account, string(args, "org"), string(args, "project"))
        .context("invalid scope")
}

/// Reference described by the `resolve` arguments
pub(crate) fn reference(args: &ArgMatches) -> anyhow::Result<EntityReference> {
    let entity_type = string(args, "type")
        .unwrap_or_default()
        .parse::<EntityType>()
        .unwrap_or(EntityType::Unknown);
    let identifier = string(args, "identifier").unwrap_or_default();

    let mut reference =
        EntityReference::new(entity_type, identifier, scope(args)?).context("invalid reference")?;
    if let Some(branch) = string(args, "branch") {
        reference = reference.with_branch(branch);
    }
    if let Some(label) = string(args, "version-label") {
        reference = reference.with_version_label(label);
    }
    if let Some(parent) = string(args, "parent") {
        reference = reference.with_parent(parent);
    }
    Ok(reference)
}

/// One reference per entity type that routes without a lookup
pub(crate) fn offline_references(args: &ArgMatches) -> anyhow::Result<Vec<EntityReference>> {
    let scope = scope(args)?;
    let identifier = string(args, "identifier").unwrap_or_default();
    let parent = string(args, "parent");

    EntityType::ALL
        .into_iter()
        .filter(|kind| !kind.requires_lookup())
        .map(|kind| -> anyhow::Result<EntityReference> {
            let reference = EntityReference::new(kind, identifier.clone(), scope.clone())?;
            Ok(match &parent {
                Some(parent) => reference.with_parent(parent.clone()),
                None => reference,
            })
        })
        .collect()
}

/// Configuration file (or defaults) with command line overrides applied
pub(crate) fn config(args: &ArgMatches) -> Result<ResolverConfig, ConfigError> {
    let mut config = match string(args, "config") {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    if let Some(nav) = string(args, "nav") {
        config.nav_mode = nav.parse::<NavMode>()?;
    }
    if let Some(base) = defined(args, "api-base") {
        config.api.base_url = base;
    }
    if let Some(key) = defined(args, "api-key") {
        config.api.api_key = Some(key);
    }

    config.validate()?;
    Ok(config)
}
