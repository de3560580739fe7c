//! navlink command line
//!
//! ```text
//! navlink resolve --type Pipelines --identifier build --account acc --org org --project proj
//! navlink routes --identifier x --account acc --nav v2
//! ```

mod cli;

use anyhow::Context;
use clap::ArgMatches;
use navlink_resolver::{EntityUrlResolver, HttpMetadataClient, ResolvedLink, ResolverConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let matches = cli::command().get_matches();
    init_tracing(matches.get_flag("log-json"));

    if let Err(err) = run(&matches).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("resolve", args)) => resolve(args).await,
        Some(("routes", args)) => routes(args),
        _ => anyhow::bail!("unknown subcommand"),
    }
}

fn build_resolver(config: &ResolverConfig) -> anyhow::Result<EntityUrlResolver> {
    let client = HttpMetadataClient::new(&config.api).context("building metadata client")?;
    Ok(EntityUrlResolver::from_config(Arc::new(client), config))
}

async fn resolve(args: &ArgMatches) -> anyhow::Result<()> {
    let config = cli::config(args).context("loading configuration")?;
    let reference = cli::reference(args)?;
    let resolver = build_resolver(&config)?;

    tracing::info!(nav_mode = %resolver.nav_mode(), api = %config.api.base_url, "resolving");
    let link = resolver.resolve_link(&reference).await?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&link)?);
    } else {
        print_link(&link);
    }
    Ok(())
}

fn routes(args: &ArgMatches) -> anyhow::Result<()> {
    let config = cli::config(args).context("loading configuration")?;
    let resolver = build_resolver(&config)?;

    for reference in cli::offline_references(args)? {
        if let Some(link) = resolver.resolve_sync(&reference) {
            println!("{:<18} {}", reference.entity_type.as_str(), link.url);
        }
    }
    Ok(())
}

fn print_link(link: &ResolvedLink) {
    println!("{}", link.url);
    if let Some(reason) = &link.fallback {
        eprintln!("note: linked {:?} page ({reason:?})", link.kind);
    }
}
