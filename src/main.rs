//! `pelada`: command-line client for the pelada championship API.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use pelada_client::config::{load_config, load_default};
use pelada_client::domain::{championship, matches, player, round, stats, team, NextMatchRequest};
use pelada_client::observability::logging;
use pelada_client::{ApiClient, FileStore, Location, Method, QueryParams, ResourceId};

#[derive(Parser)]
#[command(name = "pelada")]
#[command(about = "Command-line client for the pelada championship API", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "PELADA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PELADA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Use the legacy sign-in endpoint
        #[arg(long)]
        legacy: bool,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List a collection (items only)
    List(ListArgs),
    /// List a collection with pagination metadata
    Page(ListArgs),
    /// Fetch one record
    Get { kind: Kind, id: ResourceId },
    /// Create a record from a JSON payload
    Create {
        kind: Kind,
        #[arg(long)]
        data: String,
    },
    /// Partially update a record from a JSON payload
    Update {
        kind: Kind,
        id: ResourceId,
        #[arg(long)]
        data: String,
    },
    /// Delete a record
    Delete { kind: Kind, id: ResourceId },
    /// Player ranking of a championship
    Standings { championship_id: ResourceId },
    /// Next match of a round
    NextMatch {
        #[command(subcommand)]
        action: NextMatchAction,
    },
    /// Send an arbitrary request below the versioned API root
    Raw {
        method: String,
        path: String,
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(Subcommand)]
enum NextMatchAction {
    /// Ask the server which teams play next
    Suggest { round_id: ResourceId },
    /// Create the next match, optionally keeping a team after a draw
    Create {
        round_id: ResourceId,
        #[arg(long)]
        keep: Option<ResourceId>,
    },
}

#[derive(Args)]
struct ListArgs {
    kind: Kind,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
    /// Comma-separated fields to return
    #[arg(long)]
    fields: Option<String>,
    /// Comma-separated relations to include
    #[arg(long)]
    include: Option<String>,
    /// Resource-specific filter, `key=value`
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,
}

impl ListArgs {
    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .set("page", self.page)
            .set("per_page", self.per_page)
            .set("fields", self.fields.clone())
            .set("include", self.include.clone());
        for (key, value) in &self.filters {
            query = query.filter(key.clone(), Some(value.clone()));
        }
        query
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Championships,
    Rounds,
    Teams,
    Matches,
    Players,
    Stats,
}

impl Kind {
    fn base_path(self) -> &'static str {
        match self {
            Kind::Championships => championship::BASE_PATH,
            Kind::Rounds => round::BASE_PATH,
            Kind::Teams => team::BASE_PATH,
            Kind::Matches => matches::BASE_PATH,
            Kind::Players => player::BASE_PATH,
            Kind::Stats => stats::BASE_PATH,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };
    logging::init(&config.observability);

    let store = Arc::new(FileStore::new(&config.session.store_path));
    // Signing in happens "on" the login view, so a rejected password does not redirect.
    let start = match cli.command {
        Commands::Login { .. } => config.session.login_path.clone(),
        _ => "/".to_string(),
    };
    let location = Arc::new(Location::new(start));
    let api = ApiClient::from_config(&config, store, location.clone())?;

    let result = run(&api, cli.command).await;
    if location.redirects() > 0 {
        eprintln!("Session expired or rejected; run `pelada login` to sign in again.");
    }
    result
}

async fn run(api: &ApiClient, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Login { email, password, legacy } => {
            let auth = api.auth();
            let credential = if legacy {
                auth.legacy_sign_in(&email, &password).await?
            } else {
                auth.login(&email, &password).await?
            };
            println!("Signed in ({:?})", credential.method);
        }
        Commands::Logout => {
            api.auth().logout().await;
            println!("Signed out");
        }
        Commands::Whoami => print_json(&api.auth().current_user().await?)?,
        Commands::List(args) => {
            let items = api.resource::<Value>(args.kind.base_path()).get_all(Some(&args.query())).await?;
            print_json(&items)?;
        }
        Commands::Page(args) => {
            let page = api
                .resource::<Value>(args.kind.base_path())
                .get_all_paginated(Some(&args.query()))
                .await?;
            print_json(&page)?;
        }
        Commands::Get { kind, id } => {
            print_json(&api.resource::<Value>(kind.base_path()).get_by_id(id).await?)?;
        }
        Commands::Create { kind, data } => {
            let payload: Value = serde_json::from_str(&data)?;
            print_json(&api.resource::<Value>(kind.base_path()).create(&payload).await?)?;
        }
        Commands::Update { kind, id, data } => {
            let payload: Value = serde_json::from_str(&data)?;
            print_json(&api.resource::<Value>(kind.base_path()).update(id, &payload).await?)?;
        }
        Commands::Delete { kind, id } => {
            api.resource::<Value>(kind.base_path()).delete(id).await?;
            println!("Deleted {} {}", kind.base_path().trim_start_matches('/'), id);
        }
        Commands::Standings { championship_id } => {
            print_json(&api.championships().standings(championship_id).await?)?;
        }
        Commands::NextMatch { action } => match action {
            NextMatchAction::Suggest { round_id } => {
                let suggestion = api.rounds().suggest_next_match(round_id).await?;
                print_json(&suggestion)?;
                if suggestion.requires_decision {
                    eprintln!("A tie-break decision is required; pass --keep <team_id> to `next-match create`.");
                }
            }
            NextMatchAction::Create { round_id, keep } => {
                let request = NextMatchRequest { staying_team_id: keep };
                print_json(&api.rounds().create_next_match(round_id, &request).await?)?;
            }
        },
        Commands::Raw { method, path, data } => {
            let method: Method = method.parse()?;
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let value: Value = api.resource::<Value>("").request(method, &path, body, None).await?;
            print_json(&value)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
