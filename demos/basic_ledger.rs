//! Basic ledger usage example
//!
//! Run with `RUST_LOG=bank_ledger=debug cargo run --example basic_ledger` to see
//! the ledger's own logging.

use bank_ledger::utils::MemoryStorage;
use bank_ledger::{Amount, CallerIdentity, Ledger, LedgerError, ParticipantId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🏦 Bank Ledger - Basic Example\n");

    let ledger = Ledger::new(MemoryStorage::new());
    let mut notifications = ledger.subscribe();

    // The invocation layer resolves these from its own authentication
    let alice: ParticipantId = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse()?;
    let bob: ParticipantId = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC".parse()?;
    let as_alice = CallerIdentity::authenticated(alice.clone());

    // 1. Deposit
    println!("💰 Depositing...");
    ledger.deposit(&as_alice, Amount::from(1000)).await?;
    println!("  ✓ Alice balance: {}", ledger.balance(&as_alice).await?);
    println!("  ✓ Bob balance (never seen): {}\n", ledger.balance_of(&bob).await?);

    // 2. Transfer
    println!("🔁 Transferring 500 from Alice to Bob...");
    ledger.transfer(&as_alice, &bob, Amount::from(500)).await?;
    println!("  ✓ Alice balance: {}", ledger.balance_of(&alice).await?);
    println!("  ✓ Bob balance: {}\n", ledger.balance_of(&bob).await?);

    // 3. Overdraft
    println!("🚫 Attempting to transfer 1500 from Alice...");
    match ledger.transfer(&as_alice, &bob, Amount::from(1500)).await {
        Err(err @ LedgerError::InsufficientBalance { .. }) => println!("  ✓ Rejected: {}", err),
        Err(err) => return Err(err.into()),
        Ok(_) => println!("  ✗ Unexpectedly succeeded"),
    }
    println!("  ✓ Alice balance unchanged: {}\n", ledger.balance_of(&alice).await?);

    // 4. Exact balance
    println!("✅ Transferring Alice's remaining 500...");
    ledger.transfer(&as_alice, &bob, Amount::from(500)).await?;
    println!("  ✓ Alice balance: {}", ledger.balance_of(&alice).await?);
    println!("  ✓ Bob balance: {}\n", ledger.balance_of(&bob).await?);

    // 5. Notification stream
    println!("📣 Transfer notifications:");
    while let Ok(event) = notifications.try_recv() {
        println!("  • {} → {}: {} ({})", event.from, event.to, event.amount, event.id);
    }

    println!("\n📊 Total supply: {}", ledger.total_supply().await?);
    println!(
        "📸 Snapshot: {}",
        serde_json::to_string_pretty(&ledger.snapshot().await?)?
    );

    Ok(())
}
