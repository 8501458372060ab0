use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ledger_gateway::cli::{self, Cli, Commands, DbCommands, TxCommands};
use ledger_gateway::config::{Config, LogFormat, StoreBackend};
use ledger_gateway::services::TransactionService;
use ledger_gateway::{connect_store, create_app, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Db(DbCommands::Migrate) => {
            config.validate()?;
            if config.store_backend != StoreBackend::Postgres {
                anyhow::bail!("db migrate requires STORE_BACKEND=postgres");
            }
            let pool = db::create_pool(&config).await?;
            db::run_migrations(&pool).await?;
            Ok(())
        }
        Commands::Config => cli::handle_config_validate(&config),
        Commands::Tx(TxCommands::Status { tx_hash }) => {
            config.validate()?;
            let store = connect_store(&config, false).await?;
            let service = TransactionService::new(store, config.store_timeout());
            cli::handle_tx_status(&service, &tx_hash).await
        }
    }
}

fn init_tracing(config: &Config) {
    // RUST_LOG takes precedence over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    tracing::info!(config = ?config, "Starting ledger gateway");

    let store = connect_store(&config, true).await?;
    let service = TransactionService::new(store, config.store_timeout());
    let app = create_app(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
