//! Tictac - server-authoritative tic-tac-toe.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

use tictac_server::{
    AccountRepository, AppState, AuthService, Cli, Command, Database, GameEngine, ServerConfig,
    SqliteGameStore, TokenSigner, account_channel, router,
};
use tictac_rules::{Board, Mark, evaluate};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is normal.
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictac_server=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            database,
        } => {
            let mut settings = match config {
                Some(path) => ServerConfig::from_file(&path)?,
                None => ServerConfig::default(),
            }
            .apply_env()?;
            if let Some(host) = host {
                settings = settings.with_host(host);
            }
            if let Some(port) = port {
                settings = settings.with_port(port);
            }
            if let Some(database) = database {
                settings = settings.with_database_path(database);
            }
            settings.validate()?;
            run_server(settings).await
        }
        Command::Migrate { database } => run_migrate(&database),
        Command::Evaluate { board } => run_evaluate(&board),
    }
}

/// Run the HTTP game server
#[instrument(skip_all, fields(address = %config.bind_address(), database = %config.database_path()))]
async fn run_server(config: ServerConfig) -> Result<()> {
    info!("Starting tictac server");

    let db = Database::open(config.database_path())
        .with_context(|| format!("Failed to open database '{}'", config.database_path()))?;
    let accounts = AccountRepository::new(db.clone());

    let (notifier, worker) = account_channel(accounts.clone());
    let worker = tokio::task::spawn_blocking(move || worker.run());

    let engine = GameEngine::new(Arc::new(SqliteGameStore::new(db)), Arc::new(notifier))
        .with_max_attempts(*config.max_update_attempts());
    let signer = TokenSigner::new(config.resolved_secret(), *config.token_ttl_minutes())
        .context("Failed to set up token signing")?;
    let resolver = Arc::new(AuthService::new(signer.clone(), accounts.clone()));

    let app = router(AppState {
        engine,
        accounts,
        resolver,
        signer,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("✅ Server ready at http://{}/", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for shutdown signal");
            }
            info!("Shutdown requested");
        })
        .await?;

    // Dropping the router dropped the last notifier, so the worker drains and exits.
    let applied = worker.await?;
    info!(applied, "Server stopped");
    Ok(())
}

/// Apply migrations and exit
#[instrument]
fn run_migrate(database: &str) -> Result<()> {
    let db = Database::open(database)
        .with_context(|| format!("Failed to migrate database '{}'", database))?;
    info!(path = %db.path(), "Database is up to date");
    println!("Database '{}' is up to date", db.path());
    Ok(())
}

/// Print a board and its outcome
#[instrument]
fn run_evaluate(encoded: &str) -> Result<()> {
    let board: Board = encoded.parse().context("Invalid board")?;
    println!("{}", board.render());
    match evaluate(&board) {
        Some(outcome) => println!("Outcome: {}", outcome),
        None => println!("Outcome: in progress, {} to move", next_mark(&board)),
    }
    Ok(())
}

fn next_mark(board: &Board) -> Mark {
    if board.count(Mark::X) > board.count(Mark::O) {
        Mark::O
    } else {
        Mark::X
    }
}
