mod args;
mod config;
mod dirs;
mod render;
mod session;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use higherme_client::{ApiClient, ClientError, load_dashboard};
use higherme_core::{UserStats, compute_progress};
use report::parse_report_from_reader;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{Command, LogCommand};
use session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = args::parse_args().unwrap_or_else(|err| {
        eprintln!("{err}");
        args::print_help();
        std::process::exit(2);
    });

    match args.command {
        Command::Help => {
            args::print_help();
            return Ok(());
        }
        Command::Report { path, json } => return run_report(path.as_deref(), json),
        Command::Progress { total_xp, level } => {
            let stats = UserStats {
                current_level: level,
                total_xp,
                ..UserStats::default()
            };
            print!("{}", render::progress(level, total_xp, &compute_progress(&stats)));
            return Ok(());
        }
        _ => {}
    }

    let config_dir = dirs::resolve_config_dir().map_err(io::Error::other)?;
    let config = config::load_or_create(&config_dir).map_err(io::Error::other)?;
    if config.created {
        eprintln!(
            "Created config at {} (backend {}).",
            config.paths.file.display(),
            config.config.backend_url
        );
    }
    let backend_url = config::resolve_backend_url(
        args.backend_url,
        std::env::var(config::BACKEND_URL_ENV).ok(),
        &config.config,
    );
    run_command(args.command, backend_url, &config_dir).await
}

const LOGIN_HINT: &str = "Session expired or missing. Run `higherme login <email> <password>`.";

/// Runs an online command against `backend_url` with the session stored in
/// `config_dir`.
async fn run_command(
    command: Command,
    backend_url: String,
    config_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut client = ApiClient::new(backend_url);
    client.set_token(stored_token(config_dir));

    let signing_in = matches!(command, Command::Login { .. } | Command::Register { .. });
    let result = run_online(command, &client, config_dir).await;
    if let Err(err) = &result {
        if needs_login_hint(err.as_ref(), signing_in) {
            eprintln!("{LOGIN_HINT}");
        }
    }
    result
}

/// A session file that cannot be read is ignored so `login` and `logout`
/// can still replace or remove it.
fn stored_token(config_dir: &Path) -> Option<String> {
    match session::load(config_dir) {
        Ok(session) => session.map(|session| session.access_token),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable session");
            None
        }
    }
}

fn needs_login_hint(err: &(dyn std::error::Error + 'static), signing_in: bool) -> bool {
    !signing_in
        && err
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_unauthorized)
}

async fn run_online(
    command: Command,
    client: &ApiClient,
    config_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Login { email, password } => {
            let auth = client.login(&email, &password).await?;
            store_session(config_dir, auth.access_token, auth.user.username)?;
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let auth = client.register(&username, &email, &password).await?;
            store_session(config_dir, auth.access_token, auth.user.username)?;
        }
        Command::Logout => {
            if session::clear(config_dir).map_err(io::Error::other)? {
                info!("session cleared");
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
        }
        Command::Dashboard { json } => {
            require_session(client)?;
            show_dashboard(client, json).await?;
        }
        Command::Log(log) => {
            require_session(client)?;
            let response = match log {
                LogCommand::Mood(input) => client.log_mood(&input).await?,
                LogCommand::Meal(input) => client.log_meal(&input).await?,
                LogCommand::Exercise(input) => client.log_exercise(&input).await?,
                LogCommand::Sleep(input) => client.log_sleep(&input).await?,
                LogCommand::Water(input) => client.log_water(&input).await?,
            };
            if let Some(message) = response.get("message").and_then(|value| value.as_str()) {
                println!("{message}");
            } else {
                println!("Logged.");
            }
            println!();
            show_dashboard(client, false).await?;
        }
        Command::Code { create } => {
            require_session(client)?;
            let activity = if create {
                client.create_code_activity().await?
            } else {
                client.code_activity().await?
            };
            print_json(&activity)?;
        }
        Command::Help | Command::Report { .. } | Command::Progress { .. } => {}
    }
    Ok(())
}

fn store_session(
    config_dir: &Path,
    access_token: String,
    username: String,
) -> Result<(), io::Error> {
    let session = Session {
        access_token,
        username,
    };
    session::save(config_dir, &session).map_err(io::Error::other)?;
    info!(username = %session.username, "session stored");
    println!("Signed in as {}.", session.username);
    Ok(())
}

fn require_session(client: &ApiClient) -> Result<(), io::Error> {
    if client.token().is_some() {
        return Ok(());
    }
    Err(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "not logged in; run `higherme login <email> <password>` first",
    ))
}

async fn show_dashboard(client: &ApiClient, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load_dashboard(client).await?;
    if json {
        print_json(&dashboard)?;
    } else {
        print!("{}", render::dashboard(&dashboard));
    }
    Ok(())
}

fn run_report(path: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = match path {
        None | Some("-") => parse_report_from_reader(io::stdin().lock()),
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io::Error::other(format!("open {}: {}", path, err)))?;
            parse_report_from_reader(BufReader::new(file))
        }
    };
    if json {
        print_json(&summary)?;
    } else {
        print!("{}", render::report(&summary));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
