//! Client example walking through a ledger session against a running server.
//!
//! Run with: cargo run -p ledger-app --example client_example

use ledger_client::LedgerClient;
use ledger_hex::{LedgerService, inbound::HttpServer};
use ledger_repo::build_repo;
use ledger_types::UpdateTransactionRequest;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("ledger.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    // Build repository (handles connection and schema)
    let repo = build_repo(&db_url).await?;

    // Bind an ephemeral port and serve in the background
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = HttpServer::new(LedgerService::new(repo)).router();

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = LedgerClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: a month of income and expenses
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let salary = client.create_transaction("Salary", 2500.0).await?;
    println!("✅ Recorded: {} {:+.2} (id={})", salary.text, salary.amount, salary.id);

    let rent = client.create_transaction("Rent", -800.0).await?;
    println!("✅ Recorded: {} {:+.2} (id={})", rent.text, rent.amount, rent.id);

    let coffee = client.create_transaction("Coffee", -4.5).await?;
    println!("✅ Recorded: {} {:+.2} (id={})", coffee.text, coffee.amount, coffee.id);

    // Invalid input is rejected with per-field messages
    match client.create_transaction("", 10.0).await {
        Err(e) => println!("✅ Blank text rejected: {e}"),
        Ok(tx) => anyhow::bail!("blank text was accepted: {:?}", tx),
    }

    let rent = client
        .update_transaction(
            rent.id,
            &UpdateTransactionRequest {
                text: Some("Rent (March)".to_string()),
                amount: None,
            },
        )
        .await?;
    println!("✅ Renamed: {} {:+.2}", rent.text, rent.amount);

    client.delete_transaction(coffee.id).await?;
    println!("✅ Deleted: {}", coffee.text);

    let transactions = client.list_transactions().await?;
    println!("\n📒 History ({} transactions):", transactions.len());
    for tx in &transactions {
        println!("   {}  {:<16} {:>10.2}", tx.created_at.format("%Y-%m-%d %H:%M"), tx.text, tx.amount);
    }

    let summary = client.summary().await?;
    println!("\n💰 Balance:  {:.2}", summary.balance);
    println!("   Income:   {:.2}", summary.income);
    println!("   Expense:  {:.2}", summary.expense);
    println!("   Expense ratio: {:.1}%", summary.expense_ratio);

    Ok(())
}
