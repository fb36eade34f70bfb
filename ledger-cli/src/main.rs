//! Ledger CLI
//!
//! Command-line interface for the Ledger API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_client::LedgerClient;
use ledger_types::{TransactionId, UpdateTransactionRequest};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(author, version, about = "Ledger API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Ledger API
    #[arg(long, env = "LEDGER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// List all transactions
    List,
    /// Record a transaction (negative amounts are expenses)
    Create {
        /// Description
        #[arg(long)]
        text: String,
        /// Signed amount
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
    },
    /// Get transaction details
    Get {
        /// Transaction ID (UUID)
        id: String,
    },
    /// Change the text and/or amount of a transaction
    Update {
        /// Transaction ID (UUID)
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<f64>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (UUID)
        id: String,
    },
    /// Show balance, income and expense
    Summary,
}

fn parse_transaction_id(s: &str) -> Result<TransactionId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid transaction ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = LedgerClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::List => {
            let transactions = client.list_transactions().await?;
            println!("{}", serde_json::to_string_pretty(&transactions)?);
        }

        Commands::Create { text, amount } => {
            let tx = client.create_transaction(&text, amount).await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }

        Commands::Get { id } => {
            let id = parse_transaction_id(&id)?;
            let tx = client.get_transaction(id).await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }

        Commands::Update { id, text, amount } => {
            let id = parse_transaction_id(&id)?;
            let req = UpdateTransactionRequest { text, amount };
            if req.is_empty() {
                anyhow::bail!("Nothing to update: pass --text and/or --amount");
            }
            let tx = client.update_transaction(id, &req).await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }

        Commands::Delete { id } => {
            let id = parse_transaction_id(&id)?;
            client.delete_transaction(id).await?;
            println!("✓ Transaction deleted");
        }

        Commands::Summary => {
            let summary = client.summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
