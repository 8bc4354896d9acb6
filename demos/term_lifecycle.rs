//! Term lifecycle example.
//!
//! Walks one academic term: disbursing balances, buying meal blocks at
//! the fixed price while the market is closed, opening the secondary
//! market, seeding the pool, swapping both ways, withdrawing, and closing
//! for the term break.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=term_market=debug cargo run --example term_lifecycle
//! ```

use term_market::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Term Market: one academic term ===\n");

    // ── 1. Accounts and configuration ──────────────────────────────────
    let admin = AccountId::from_bytes([0xad; 32]);
    let pool = AccountId::from_bytes([0x9f; 32]);
    let provider = AccountId::from_bytes([0x01; 32]);
    let student = AccountId::from_bytes([0x02; 32]);
    let dining_hall = AccountId::from_bytes([0x03; 32]);

    let config = MarketConfig::from_toml_str(&format!(
        "administrator = \"{admin}\"\npool_account = \"{pool}\"\ndecimals = 0\nmeal_block_cost = 1500\n"
    ))?;
    println!("Meal block cost: {} raw meal-credits", config.meal_block_cost());

    let mut market = TermMarket::from_config(&config)?;

    // ── 2. Disburse balances ───────────────────────────────────────────
    market.credit_stable(&admin, &provider, Amount::new(1_000))?;
    market.credit_tokens(&admin, &provider, Amount::new(100_000))?;
    market.credit_stable(&admin, &student, Amount::new(200))?;
    market.credit_tokens(&admin, &student, Amount::new(6_000))?;

    // ── 3. Fixed-price purchase before the term opens ──────────────────
    let cost = market.purchase(&student, &dining_hall, 2)?;
    println!("\nStudent bought 2 meal blocks for {cost} credits (market closed)");
    match market.swap_credit_for_stable(&student, Amount::new(1_000)) {
        Err(MarketError::MarketClosed) => println!("Swapping is refused until the term opens"),
        other => println!("Unexpected: {other:?}"),
    }

    // ── 4. Open the term and seed the pool ─────────────────────────────
    let term = market.open(&admin)?;
    let shares = market.add_liquidity(&provider, Amount::new(1_000), Amount::new(100_000))?;
    println!("\n--- Term {term} opened ---");
    println!("  Provider minted: {shares} shares");
    println!("  {}", market.snapshot());

    // ── 5. Quote, then swap both ways ──────────────────────────────────
    let quoted = market.quote_stable_for_credit(Amount::new(20))?;
    let bought = market.swap_stable_for_credit(&student, Amount::new(20))?;
    println!("\n--- Swaps ---");
    println!("  Quoted {quoted}, executed {bought}");
    let sold = market.swap_credit_for_stable(&student, Amount::new(1_000))?;
    println!("  Executed {sold}");
    println!("  {}", market.snapshot());

    // ── 6. Provider withdraws half ─────────────────────────────────────
    let half = Shares::new(shares.get() / 2);
    let receipt = market.remove_liquidity(&provider, half)?;
    println!("\n--- Withdrawal ---");
    println!("  {receipt}");

    // ── 7. Close for the term break ────────────────────────────────────
    market.close(&admin)?;
    println!("\n--- Term {term} closed ---");
    println!("  {}", market.snapshot());
    println!(
        "  Student: {} stable, {} credits",
        market.stable_balance_of(&student),
        market.balance_of(&student)
    );

    println!("\nEvents:");
    for event in market.sink().events() {
        println!("  {event}");
    }

    println!("\n=== Done ===");
    Ok(())
}
