use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::services::TransactionService;

#[derive(Parser)]
#[command(name = "ledger-gateway")]
#[command(about = "Ledger Gateway - transaction anchoring facade", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Transaction lookup commands
    #[command(subcommand)]
    Tx(TxCommands),

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Validate and print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum TxCommands {
    /// Print the status of a transaction by hash
    Status {
        /// Transaction hash returned by a submission
        #[arg(value_name = "TX_HASH")]
        tx_hash: String,
    },
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
}

pub async fn handle_tx_status(service: &TransactionService, tx_hash: &str) -> anyhow::Result<()> {
    let status = service.get_status(tx_hash).await?;
    println!("{} {}", tx_hash, status);
    Ok(())
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    println!("{}", serde_json::to_string_pretty(config)?);
    println!("Configuration is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryRecordStore;
    use crate::domain::{Transaction, TransactionKind};
    use crate::services::DEFAULT_STORE_TIMEOUT;
    use std::sync::Arc;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["ledger-gateway"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parses_tx_status() {
        let cli = Cli::try_parse_from(["ledger-gateway", "tx", "status", "abc"]).unwrap();
        match cli.command {
            Some(Commands::Tx(TxCommands::Status { tx_hash })) => assert_eq!(tx_hash, "abc"),
            _ => panic!("expected tx status"),
        }
    }

    #[test]
    fn test_parses_db_migrate() {
        let cli = Cli::try_parse_from(["ledger-gateway", "db", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Db(DbCommands::Migrate))));
    }

    #[tokio::test]
    async fn test_tx_status_reports_unknown_hash() {
        let service = TransactionService::new(Arc::new(MemoryRecordStore::new()), DEFAULT_STORE_TIMEOUT);
        assert!(handle_tx_status(&service, "missing").await.is_err());

        let tx_hash = service
            .trade(Transaction::new(TransactionKind::Trade, 1, None))
            .await
            .unwrap();
        assert!(handle_tx_status(&service, &tx_hash).await.is_ok());
    }
}
