//! oxide-urlgen CLI
//!
//! Generates URLs from a routing dump.

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_urlgen::{Context, Location, ParamValue, Params, Router, RoutingData, UrlGenerator};

/// Client-side URL generation from exported route tables.
#[derive(Parser)]
#[command(name = "oxide-urlgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Routing dump (JSON).
    #[arg(short, long, env = "OXIDE_ROUTES", default_value = "routes.json")]
    routes: PathBuf,

    /// Base URL, overriding the dump.
    #[arg(long)]
    base_url: Option<String>,

    /// Route name prefix, overriding the dump.
    #[arg(long)]
    prefix: Option<String>,

    /// Current host, overriding the dump.
    #[arg(long)]
    host: Option<String>,

    /// Current scheme, overriding the dump.
    #[arg(long)]
    scheme: Option<String>,

    /// Derive the context from a page URL instead of the dump.
    #[arg(long, conflicts_with_all = ["prefix", "host", "scheme"])]
    location: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the URL of a route.
    Generate {
        /// Route name.
        name: String,

        /// Parameter as `key=value` (repeatable).
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Parameters as a JSON object, merged before `--param`.
        #[arg(long)]
        json: Option<String>,

        /// Omit scheme and host unless the route forces them.
        #[arg(long)]
        relative: bool,
    },

    /// List route names.
    Routes {
        /// Only list routes whose name starts with this prefix.
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Print a route definition as JSON.
    Show {
        /// Route name.
        name: String,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

fn collect_params(json: Option<&str>, pairs: Vec<(String, String)>) -> anyhow::Result<Params> {
    let mut params = Params::new();

    if let Some(json) = json {
        match serde_json::from_str::<ParamValue>(json).context("invalid --json parameters")? {
            ParamValue::Mapping(map) => params.extend(map),
            other => bail!("--json must be an object, got {other:?}"),
        }
    }

    params.extend(
        pairs
            .into_iter()
            .map(|(key, value)| (key, ParamValue::from(value))),
    );

    Ok(params)
}

fn build_router(cli: &Cli) -> anyhow::Result<Router> {
    let data = RoutingData::from_path(&cli.routes)
        .with_context(|| format!("failed to load routes from {}", cli.routes.display()))?;

    let mut context = match &cli.location {
        Some(href) => Context::from_location(&Location::parse(href)?),
        None => data.context(),
    };
    if let Some(base_url) = &cli.base_url {
        context = context.with_base_url(base_url);
    }
    if let Some(prefix) = &cli.prefix {
        context = context.with_prefix(prefix);
    }
    if let Some(host) = &cli.host {
        context = context.with_host(host);
    }
    if let Some(scheme) = &cli.scheme {
        context = context.with_scheme(scheme);
    }

    Ok(Router::new(data.routes, context))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let router = build_router(&cli)?;
    debug!(routes = router.routes().len(), "router ready");

    match cli.command {
        Commands::Generate {
            name,
            params,
            json,
            relative,
        } => {
            let params = collect_params(json.as_deref(), params)?;
            let url = router.generate(&name, &params, !relative)?;
            println!("{url}");
        }

        Commands::Routes { filter } => {
            let mut listed = 0;
            for (name, route) in router.routes().iter() {
                if filter.as_deref().is_some_and(|prefix| !name.starts_with(prefix)) {
                    continue;
                }
                let host = route
                    .host_template()
                    .map(|host| format!("{host} "))
                    .unwrap_or_default();
                println!("{name:<40} {host}{}", route.path_template());
                listed += 1;
            }
            if listed == 0 {
                info!("No routes found.");
            }
        }

        Commands::Show { name } => {
            let route = router.route(&name)?;
            println!("{}", serde_json::to_string_pretty(route)?);
        }
    }

    Ok(())
}
