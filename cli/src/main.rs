use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use wayfarer::config::ConfigError;
use wayfarer::credential::StoreError;
use wayfarer::forms::{self, LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE};
use wayfarer::net::trips::TripsApi;
use wayfarer::net::types::{TripDraft, TripPatch};
use wayfarer::{
    ApiClient, ApiError, ClientConfig, FileCredentialStore, GuardDecision, Route, SessionController, SessionEvent,
    SessionEvents,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("credential store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Rejected(String),
    #[error("api call failed: {0}")]
    Api(#[from] ApiError),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("not logged in; run `wayfarer login` first")]
    NotLoggedIn,
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "wayfarer", about = "Travel planner session client")]
struct Cli {
    /// API base URL; overrides WAYFARER_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Credential file; overrides WAYFARER_CREDENTIAL_PATH.
    #[arg(long)]
    credential_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "WAYFARER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "WAYFARER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    Whoami,
    /// Show what the route guard decides for a view path.
    Guard {
        path: String,
    },
    Trips(TripsCommand),
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Guard { .. } => "guard",
            Self::Trips(_) => "trips",
        }
    }
}

#[derive(Args, Debug)]
struct TripsCommand {
    #[command(subcommand)]
    command: TripsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TripsSubcommand {
    List,
    Get {
        trip_id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
    },
    Update {
        trip_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
    },
    Delete {
        trip_id: i64,
    },
}

struct CliContext {
    controller: SessionController,
    trips: TripsApi,
    store: Arc<FileCredentialStore>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_owned();
    }
    if let Some(path) = cli.credential_path {
        config.credential_path = path;
    }

    let store = Arc::new(FileCredentialStore::open(&config.credential_path)?);
    let events = SessionEvents::new();
    let mut expiries = events.subscribe();
    tracing::debug!(api_url = %config.api_url, credentials = %store.path().display(), "client configured");
    let client = Arc::new(ApiClient::new(config, store.clone(), events.clone())?);
    let controller = SessionController::with_client(client.clone());
    let _expiry = controller.watch_expiry(&events);

    let ctx = CliContext { controller, trips: TripsApi::new(client), store };
    tracing::debug!(command = cli.command.label(), "dispatching");
    let result = run(&ctx, cli.command).await;

    if let Ok(SessionEvent::Expired { redirect }) = expiries.try_recv() {
        tracing::info!(redirect = redirect.path(), "session expired during command");
        eprintln!("session expired; sign in again (redirect to {})", redirect.path());
    }
    result
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            let rejected = |e: ApiError| CliError::Rejected(forms::failure_message(&e, LOGIN_FAILED_MESSAGE));
            let request = forms::validate_login(&username, &password).map_err(|e| rejected(e.into()))?;
            let user = ctx.controller.login(&request.username, &request.password).await.map_err(rejected)?;
            println!("logged in as {}", user.display_name());
            Ok(())
        }
        Command::Register { email, username, password, confirm_password } => {
            let rejected = |e: ApiError| CliError::Rejected(forms::failure_message(&e, REGISTER_FAILED_MESSAGE));
            let request = forms::validate_registration(&email, &username, &password, &confirm_password)
                .map_err(|e| rejected(e.into()))?;
            let user = ctx
                .controller
                .register(&request.email, &request.username, &request.password)
                .await
                .map_err(rejected)?;
            println!("registered and logged in as {}", user.display_name());
            Ok(())
        }
        Command::Logout => {
            ctx.controller.logout();
            println!("logged out; cleared {}", ctx.store.path().display());
            Ok(())
        }
        Command::Whoami => {
            ctx.controller.initialize().await;
            let user = ctx.controller.current_user().ok_or(CliError::NotLoggedIn)?;
            print_json(&serde_json::to_value(&user)?)
        }
        Command::Guard { path } => {
            let route = Route::from_path(&path).ok_or_else(|| CliError::UnknownRoute(path.clone()))?;
            ctx.controller.initialize().await;
            let mut guard = ctx.controller.guard(route);
            match guard.resolved().await.unwrap_or(GuardDecision::Pending) {
                GuardDecision::Render(route) => println!("render {}", route.path()),
                GuardDecision::Redirect(route) => println!("redirect {}", route.path()),
                GuardDecision::Pending => println!("pending"),
            }
            Ok(())
        }
        Command::Trips(trips) => run_trips(ctx, trips).await,
    }
}

async fn run_trips(ctx: &CliContext, trips: TripsCommand) -> Result<(), CliError> {
    match trips.command {
        TripsSubcommand::List => {
            let list = ctx.trips.list().await?;
            print_json(&serde_json::to_value(&list)?)
        }
        TripsSubcommand::Get { trip_id } => {
            let trip = ctx.trips.get(trip_id).await?;
            print_json(&serde_json::to_value(&trip)?)
        }
        TripsSubcommand::Create { title, destination, start_date, end_date, description, budget } => {
            let draft = TripDraft { title, description, destination, start_date, end_date, budget };
            let trip = ctx.trips.create(&draft).await?;
            print_json(&serde_json::to_value(&trip)?)
        }
        TripsSubcommand::Update { trip_id, title, destination, start_date, end_date, description, budget } => {
            let patch = TripPatch { title, description, destination, start_date, end_date, budget };
            if patch.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            let trip = ctx.trips.update(trip_id, &patch).await?;
            print_json(&serde_json::to_value(&trip)?)
        }
        TripsSubcommand::Delete { trip_id } => {
            let ack = ctx.trips.delete(trip_id).await?;
            print_json(&ack)
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
