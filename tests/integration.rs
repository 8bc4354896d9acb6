//! Integration tests exercising the market from config to settlement.
//!
//! These tests go through the public API only: the term lifecycle, gate
//! discipline, the fixed-price purchase path, failed-call idempotence,
//! configuration loading, and custom collaborators.

#![allow(clippy::panic)]

use proptest::prelude::*;
use term_market::config::MarketConfig;
use term_market::domain::{AccountId, Amount, Asset, MarketEvent, Shares, SwapDirection};
use term_market::error::MarketError;
use term_market::market::{PoolSnapshot, TermMarket};
use term_market::math::full_product;
use term_market::memory::{AdministratorSet, InMemoryLedger, RecordingSink, TracingSink};
use term_market::traits::{BalanceLedger, FromConfig};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn admin() -> AccountId {
    AccountId::from_bytes([0xad; 32])
}

fn pool_account() -> AccountId {
    AccountId::from_bytes([0x9f; 32])
}

fn alice() -> AccountId {
    AccountId::from_bytes([0xa1; 32])
}

fn bob() -> AccountId {
    AccountId::from_bytes([0xb0; 32])
}

fn vendor() -> AccountId {
    AccountId::from_bytes([0x7e; 32])
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config() -> MarketConfig {
    let Ok(cfg) = MarketConfig::new(admin(), pool_account()) else {
        panic!("valid config");
    };
    let Ok(cfg) = cfg.with_meal_block_cost(Amount::new(1_500)) else {
        panic!("valid meal block cost");
    };
    cfg
}

fn market() -> TermMarket {
    init_tracing();
    let Ok(market) = TermMarket::from_config(&config()) else {
        panic!("valid market");
    };
    market
}

fn fund(market: &mut TermMarket, account: &AccountId, stable: u128, credit: u128) {
    if stable > 0 {
        let Ok(()) = market.credit_stable(&admin(), account, Amount::new(stable)) else {
            panic!("disburse stable");
        };
    }
    if credit > 0 {
        let Ok(()) = market.credit_tokens(&admin(), account, Amount::new(credit)) else {
            panic!("disburse credit");
        };
    }
}

fn open(market: &mut TermMarket) -> u32 {
    let Ok(term) = market.open(&admin()) else {
        panic!("open should succeed");
    };
    term
}

/// Open market seeded by alice with (1_000 stable, 100_000 credit).
fn seeded_market() -> TermMarket {
    let mut m = market();
    fund(&mut m, &alice(), 1_000, 100_000);
    fund(&mut m, &bob(), 10_000, 1_000_000);
    open(&mut m);
    let Ok(shares) = m.add_liquidity(&alice(), Amount::new(1_000), Amount::new(100_000)) else {
        panic!("seed deposit should succeed");
    };
    assert_eq!(shares, Shares::new(10_000));
    m
}

/// Everything a caller can observe about the market.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    snapshot: PoolSnapshot,
    ledger: InMemoryLedger,
    holders: Vec<(AccountId, Shares)>,
    events: usize,
}

fn observe(market: &TermMarket) -> Observed {
    Observed {
        snapshot: market.snapshot(),
        ledger: market.ledger().clone(),
        holders: market.pool().holders().map(|(a, s)| (*a, *s)).collect(),
        events: market.sink().events().len(),
    }
}

fn assert_backed(market: &TermMarket) {
    assert_eq!(market.stable_balance_of(&pool_account()), market.reserve_stable());
    assert_eq!(market.balance_of(&pool_account()), market.reserve_credit());
    assert!(market.pool().is_consistent());
}

// ===========================================================================
// Suite 1: Term lifecycle scenarios
// ===========================================================================

#[test]
fn seed_deposit_mints_geometric_mean() {
    let m = seeded_market();
    assert_eq!(m.reserve_stable(), Amount::new(1_000));
    assert_eq!(m.reserve_credit(), Amount::new(100_000));
    assert_eq!(m.total_shares(), Shares::new(10_000));
    assert_eq!(m.shares_of(&alice()), Shares::new(10_000));
    assert_eq!(m.stable_balance_of(&alice()), Amount::ZERO);
    assert_eq!(m.balance_of(&alice()), Amount::ZERO);
    assert_backed(&m);
}

#[test]
fn buy_credit_with_stable() {
    let mut m = seeded_market();
    let Ok(result) = m.swap_stable_for_credit(&bob(), Amount::new(20)) else {
        panic!("swap should succeed");
    };
    assert_eq!(result.direction(), SwapDirection::StableForCredit);
    assert_eq!(result.amount_in(), Amount::new(20));
    assert_eq!(result.amount_out(), Amount::new(1_960));
    assert_eq!(m.reserve_stable(), Amount::new(1_020));
    assert_eq!(m.reserve_credit(), Amount::new(98_040));
    assert_eq!(m.stable_balance_of(&bob()), Amount::new(9_980));
    assert_eq!(m.balance_of(&bob()), Amount::new(1_001_960));
    assert_backed(&m);
}

#[test]
fn sell_credit_for_stable() {
    let mut m = seeded_market();
    let Ok(result) = m.swap_credit_for_stable(&bob(), Amount::new(5_000)) else {
        panic!("swap should succeed");
    };
    assert_eq!(result.amount_out(), Amount::new(47));
    assert_eq!(m.reserve_stable(), Amount::new(953));
    assert_eq!(m.reserve_credit(), Amount::new(105_000));
    assert_backed(&m);
}

#[test]
fn purchase_moves_fixed_cost_regardless_of_gate() {
    let mut m = market();
    fund(&mut m, &alice(), 0, 5_000);

    let Ok(cost) = m.purchase(&alice(), &vendor(), 1) else {
        panic!("purchase while closed should succeed");
    };
    assert_eq!(cost, Amount::new(1_500));
    assert_eq!(m.balance_of(&alice()), Amount::new(3_500));
    assert_eq!(m.balance_of(&vendor()), Amount::new(1_500));

    open(&mut m);
    let Ok(cost) = m.purchase(&alice(), &vendor(), 2) else {
        panic!("purchase while open should succeed");
    };
    assert_eq!(cost, Amount::new(3_000));
    assert_eq!(m.balance_of(&alice()), Amount::new(500));
    assert_eq!(m.balance_of(&vendor()), Amount::new(4_500));

    assert_eq!(
        m.sink().last(),
        Some(&MarketEvent::MealBlocksPurchased {
            account: alice(),
            vendor: vendor(),
            amount: Amount::new(3_000),
            count: 2,
        })
    );
}

#[test]
fn purchase_ignores_pool_price() {
    let mut m = seeded_market();
    let Ok(_) = m.swap_stable_for_credit(&bob(), Amount::new(500)) else {
        panic!("swap should succeed");
    };
    let Ok(cost) = m.purchase(&bob(), &vendor(), 1) else {
        panic!("purchase should succeed");
    };
    assert_eq!(cost, m.config().meal_block_cost());
}

#[test]
fn draining_the_pool_allows_a_fresh_ratio() {
    let mut m = seeded_market();
    let Ok(receipt) = m.remove_liquidity(&alice(), Shares::new(10_000)) else {
        panic!("full withdrawal should succeed");
    };
    assert_eq!(receipt.stable(), Amount::new(1_000));
    assert_eq!(receipt.credit(), Amount::new(100_000));
    assert_eq!(m.reserve_stable(), Amount::ZERO);
    assert_eq!(m.reserve_credit(), Amount::ZERO);
    assert_eq!(m.total_shares(), Shares::ZERO);
    assert_eq!(
        m.swap_stable_for_credit(&bob(), Amount::new(20)),
        Err(MarketError::EmptyPool)
    );

    let Ok(shares) = m.add_liquidity(&bob(), Amount::new(500), Amount::new(2_000)) else {
        panic!("re-seed should succeed");
    };
    assert_eq!(shares, Shares::new(1_000));
    assert_eq!(m.reserve_stable(), Amount::new(500));
    assert_eq!(m.reserve_credit(), Amount::new(2_000));
    assert_backed(&m);
}

#[test]
fn second_provider_keeps_rounding_residue() {
    let mut m = seeded_market();
    let Ok(minted) = m.add_liquidity(&bob(), Amount::new(500), Amount::new(50_000)) else {
        panic!("proportional deposit should succeed");
    };
    assert_eq!(minted, Shares::new(5_000));

    for _ in 0..10 {
        let Ok(_) = m.swap_stable_for_credit(&bob(), Amount::new(7)) else {
            panic!("swap should succeed");
        };
        let Ok(_) = m.swap_credit_for_stable(&bob(), Amount::new(700)) else {
            panic!("swap should succeed");
        };
    }

    let Ok(receipt) = m.remove_liquidity(&bob(), minted) else {
        panic!("withdrawal should succeed");
    };
    // floored swap outputs leave 40 extra credit in the pool, a third of it bob's
    assert_eq!(receipt.stable(), Amount::new(500));
    assert_eq!(receipt.credit(), Amount::new(50_013));
    assert_eq!(m.shares_of(&bob()), Shares::ZERO);
    assert_backed(&m);
}

#[test]
fn off_ratio_deposit_credits_scarcer_side() {
    let mut m = seeded_market();
    // 10% of the stable side but 20% of the credit side: 10% of supply
    let Ok(minted) = m.add_liquidity(&bob(), Amount::new(100), Amount::new(20_000)) else {
        panic!("deposit should succeed");
    };
    assert_eq!(minted, Shares::new(1_000));
    assert_eq!(m.reserve_credit(), Amount::new(120_000));
}

#[test]
fn terms_advance_and_events_record_them() {
    let mut m = market();
    assert_eq!(m.term(), 0);
    assert_eq!(open(&mut m), 1);
    assert_eq!(m.close(&admin()), Ok(1));
    assert_eq!(open(&mut m), 2);
    assert_eq!(m.term(), 2);
    assert_eq!(
        m.sink().events(),
        &[
            MarketEvent::MarketOpened { term: 1 },
            MarketEvent::MarketClosed { term: 1 },
            MarketEvent::MarketOpened { term: 2 },
        ]
    );
}

// ===========================================================================
// Suite 2: Gate discipline
// ===========================================================================

#[test]
fn closed_market_rejects_liquidity_and_swaps() {
    let mut m = seeded_market();
    let Ok(_) = m.close(&admin()) else {
        panic!("close should succeed");
    };
    let before = observe(&m);

    assert_eq!(
        m.add_liquidity(&bob(), Amount::new(10), Amount::new(1_000)),
        Err(MarketError::MarketClosed)
    );
    assert_eq!(
        m.remove_liquidity(&alice(), Shares::new(100)),
        Err(MarketError::MarketClosed)
    );
    assert_eq!(
        m.swap_stable_for_credit(&bob(), Amount::new(20)),
        Err(MarketError::MarketClosed)
    );
    assert_eq!(
        m.swap_credit_for_stable(&bob(), Amount::new(2_000)),
        Err(MarketError::MarketClosed)
    );
    assert_eq!(
        m.quote_stable_for_credit(Amount::new(20)),
        Err(MarketError::MarketClosed)
    );
    assert_eq!(
        m.quote_credit_for_stable(Amount::new(20)),
        Err(MarketError::MarketClosed)
    );

    assert_eq!(observe(&m), before);
}

#[test]
fn gate_checked_before_amounts() {
    let mut m = market();
    assert_eq!(
        m.add_liquidity(&alice(), Amount::ZERO, Amount::ZERO),
        Err(MarketError::MarketClosed)
    );
    assert_eq!(
        m.swap_stable_for_credit(&alice(), Amount::ZERO),
        Err(MarketError::MarketClosed)
    );
}

#[test]
fn gate_transitions_are_strict() {
    let mut m = market();
    assert_eq!(m.close(&admin()), Err(MarketError::NotOpen));
    open(&mut m);
    assert_eq!(m.open(&admin()), Err(MarketError::AlreadyOpen));
    assert!(m.is_market_open());
    assert_eq!(m.term(), 1);
    assert_eq!(m.sink().events().len(), 1);
}

#[test]
fn reopening_keeps_pool_state() {
    let mut m = seeded_market();
    let before = m.snapshot();
    let Ok(_) = m.close(&admin()) else {
        panic!("close should succeed");
    };
    open(&mut m);
    let after = m.snapshot();
    assert_eq!(after.reserve_stable, before.reserve_stable);
    assert_eq!(after.reserve_credit, before.reserve_credit);
    assert_eq!(after.total_shares, before.total_shares);
    assert_eq!(after.term, 2);
}

// ===========================================================================
// Suite 3: Failed calls change nothing
// ===========================================================================

#[test]
fn rejected_operations_are_idempotent() {
    let mut m = seeded_market();
    let before = observe(&m);

    assert!(matches!(
        m.add_liquidity(&bob(), Amount::ZERO, Amount::new(1)),
        Err(MarketError::InvalidAmount(_))
    ));
    assert!(matches!(
        m.add_liquidity(&bob(), Amount::new(10_001), Amount::new(1)),
        Err(MarketError::InsufficientBalance(_))
    ));
    assert!(matches!(
        m.remove_liquidity(&alice(), Shares::ZERO),
        Err(MarketError::InvalidAmount(_))
    ));
    assert!(matches!(
        m.remove_liquidity(&alice(), Shares::new(10_001)),
        Err(MarketError::InsufficientBalance(_))
    ));
    assert!(matches!(
        m.remove_liquidity(&bob(), Shares::new(1)),
        Err(MarketError::InsufficientBalance(_))
    ));
    assert_eq!(
        m.remove_liquidity(&alice(), Shares::new(1)),
        Err(MarketError::ZeroLiquidityBurned)
    );
    assert!(matches!(
        m.swap_stable_for_credit(&bob(), Amount::ZERO),
        Err(MarketError::InvalidAmount(_))
    ));
    assert!(matches!(
        m.swap_stable_for_credit(&bob(), Amount::new(10_001)),
        Err(MarketError::InsufficientBalance(_))
    ));
    assert_eq!(
        m.swap_credit_for_stable(&bob(), Amount::new(1)),
        Err(MarketError::InsufficientOutput)
    );
    assert!(matches!(
        m.purchase(&alice(), &vendor(), 1),
        Err(MarketError::InsufficientBalance(_))
    ));
    assert!(matches!(
        m.purchase(&bob(), &vendor(), 0),
        Err(MarketError::InvalidAmount(_))
    ));
    assert_eq!(
        m.purchase(&bob(), &AccountId::zero(), 1),
        Err(MarketError::ZeroAddress)
    );

    assert_eq!(observe(&m), before);
}

#[test]
fn dust_deposit_is_rejected() {
    // supply 1_000 against 1_000_000 stable: 1 stable mints nothing
    let mut m = market();
    fund(&mut m, &alice(), 1_000_000, 1);
    fund(&mut m, &bob(), 1, 1);
    open(&mut m);
    let Ok(_) = m.add_liquidity(&alice(), Amount::new(1_000_000), Amount::new(1)) else {
        panic!("seed should succeed");
    };
    let before = observe(&m);
    assert_eq!(
        m.add_liquidity(&bob(), Amount::new(1), Amount::new(1)),
        Err(MarketError::ZeroLiquidityMinted)
    );
    assert_eq!(observe(&m), before);
}

// ===========================================================================
// Suite 4: Access control and disbursement
// ===========================================================================

#[test]
fn only_administrator_may_gate_and_disburse() {
    let mut m = market();
    assert_eq!(m.open(&alice()), Err(MarketError::Unauthorized));
    assert_eq!(
        m.credit_tokens(&alice(), &alice(), Amount::new(1)),
        Err(MarketError::Unauthorized)
    );
    assert_eq!(
        m.credit_stable(&bob(), &alice(), Amount::new(1)),
        Err(MarketError::Unauthorized)
    );
    open(&mut m);
    assert_eq!(m.close(&alice()), Err(MarketError::Unauthorized));
    assert!(m.is_market_open());
}

#[test]
fn disbursement_mints_and_records() {
    let mut m = market();
    fund(&mut m, &alice(), 250, 750);
    assert_eq!(m.stable_balance_of(&alice()), Amount::new(250));
    assert_eq!(m.balance_of(&alice()), Amount::new(750));
    assert_eq!(m.ledger().total_supply(Asset::Credit), Amount::new(750));
    assert_eq!(
        m.sink().events(),
        &[
            MarketEvent::Disbursed {
                to: alice(),
                asset: Asset::Stable,
                amount: Amount::new(250),
            },
            MarketEvent::Disbursed {
                to: alice(),
                asset: Asset::Credit,
                amount: Amount::new(750),
            },
        ]
    );
}

#[test]
fn disbursement_to_unset_account_rejected() {
    let mut m = market();
    assert_eq!(
        m.credit_tokens(&admin(), &AccountId::zero(), Amount::new(1)),
        Err(MarketError::ZeroAddress)
    );
    assert!(m.sink().events().is_empty());
}

// ===========================================================================
// Suite 5: Configuration
// ===========================================================================

#[test]
fn market_from_toml_config() {
    let toml = format!(
        "administrator = \"{}\"\npool_account = \"{}\"\ndecimals = 0\nmeal_block_cost = 1500\n",
        admin(),
        pool_account()
    );
    let Ok(cfg) = MarketConfig::from_toml_str(&toml) else {
        panic!("valid toml config");
    };
    assert_eq!(cfg, config().with_decimals(cfg.decimals()));

    let Ok(mut m) = TermMarket::from_config(&cfg) else {
        panic!("valid market");
    };
    fund(&mut m, &alice(), 0, 1_500);
    assert_eq!(m.purchase(&alice(), &vendor(), 1), Ok(Amount::new(1_500)));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(MarketConfig::new(admin(), admin()).is_err());
    assert!(MarketConfig::new(AccountId::zero(), pool_account()).is_err());
    assert!(config().with_meal_block_cost(Amount::ZERO).is_err());
    assert!(MarketConfig::from_toml_str("administrator = \"0x12\"").is_err());
}

// ===========================================================================
// Suite 6: Custom collaborators
// ===========================================================================

#[test]
fn market_over_administrator_set_and_tracing_sink() {
    init_tracing();
    let mut access = AdministratorSet::new();
    let Ok(_) = access.grant(admin()) else {
        panic!("grant admin");
    };
    let Ok(_) = access.grant(bob()) else {
        panic!("grant bob");
    };
    let Ok(mut m) = TermMarket::with_collaborators(
        config(),
        InMemoryLedger::new(),
        access,
        TracingSink,
    ) else {
        panic!("valid market");
    };

    assert_eq!(m.open(&bob()), Ok(1));
    assert_eq!(m.close(&admin()), Ok(1));
    assert_eq!(m.open(&alice()), Err(MarketError::Unauthorized));
    let Ok(()) = m.credit_tokens(&bob(), &alice(), Amount::new(1_500)) else {
        panic!("bob may disburse");
    };
    assert_eq!(m.purchase(&alice(), &vendor(), 1), Ok(Amount::new(1_500)));
}

#[test]
fn market_over_prefunded_ledger() {
    let mut ledger = InMemoryLedger::new();
    let Ok(()) = ledger.mint(Asset::Stable, &alice(), Amount::new(1_000)) else {
        panic!("mint");
    };
    let Ok(()) = ledger.mint(Asset::Credit, &alice(), Amount::new(100_000)) else {
        panic!("mint");
    };
    let Ok(access) = term_market::memory::SingleAdministrator::new(admin()) else {
        panic!("valid access");
    };
    let Ok(mut m) = TermMarket::with_collaborators(config(), ledger, access, RecordingSink::new())
    else {
        panic!("valid market");
    };
    let Ok(_) = m.open(&admin()) else {
        panic!("open");
    };
    assert_eq!(
        m.add_liquidity(&alice(), Amount::new(1_000), Amount::new(100_000)),
        Ok(Shares::new(10_000))
    );
}

// ===========================================================================
// Suite 7: Random operation sequences
// ===========================================================================

#[derive(Debug, Clone)]
enum Op {
    Add { who: u8, stable: u128, credit: u128 },
    Remove { who: u8, permille: u16 },
    Swap { who: u8, buy: bool, amount: u128 },
    Purchase { who: u8, count: u64 },
    Toggle,
}

fn trader(n: u8) -> AccountId {
    [alice(), bob(), AccountId::from_bytes([0xc0; 32])][usize::from(n % 3)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3, 1u128..200_000, 1u128..200_000)
            .prop_map(|(who, stable, credit)| Op::Add { who, stable, credit }),
        (0u8..3, 1u16..=1_000).prop_map(|(who, permille)| Op::Remove { who, permille }),
        (0u8..3, any::<bool>(), 1u128..200_000)
            .prop_map(|(who, buy, amount)| Op::Swap { who, buy, amount }),
        (0u8..3, 0u64..5).prop_map(|(who, count)| Op::Purchase { who, count }),
        Just(Op::Toggle),
    ]
}

fn run(m: &mut TermMarket, op: &Op) -> Result<(), MarketError> {
    match *op {
        Op::Add { who, stable, credit } => m
            .add_liquidity(&trader(who), Amount::new(stable), Amount::new(credit))
            .map(|_| ()),
        Op::Remove { who, permille } => {
            let held = m.shares_of(&trader(who)).get();
            let burn = held * u128::from(permille) / 1_000;
            m.remove_liquidity(&trader(who), Shares::new(burn)).map(|_| ())
        }
        Op::Swap { who, buy, amount } => {
            let direction = if buy {
                SwapDirection::StableForCredit
            } else {
                SwapDirection::CreditForStable
            };
            m.swap(&trader(who), direction, Amount::new(amount)).map(|_| ())
        }
        Op::Purchase { who, count } => m.purchase(&trader(who), &vendor(), count).map(|_| ()),
        Op::Toggle => {
            if m.is_market_open() {
                m.close(&admin()).map(|_| ())
            } else {
                m.open(&admin()).map(|_| ())
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_random_sequences_preserve_invariants(
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let mut m = market();
        for n in 0..3 {
            fund(&mut m, &trader(n), 1_000_000, 10_000_000);
        }
        open(&mut m);

        for op in &ops {
            let before = observe(&m);
            let product_before = full_product(m.reserve_stable().get(), m.reserve_credit().get());

            match run(&mut m, op) {
                Ok(()) => {
                    if matches!(op, Op::Swap { .. }) {
                        let after = full_product(m.reserve_stable().get(), m.reserve_credit().get());
                        prop_assert!(after >= product_before, "product decreased on {:?}", op);
                    }
                }
                Err(_) => prop_assert_eq!(&observe(&m), &before, "failed {:?} changed state", op),
            }

            let sum: u128 = m.pool().holders().map(|(_, s)| s.get()).sum();
            prop_assert_eq!(sum, m.total_shares().get());
            prop_assert_eq!(m.stable_balance_of(&pool_account()), m.reserve_stable());
            prop_assert_eq!(m.balance_of(&pool_account()), m.reserve_credit());
            for asset in [Asset::Stable, Asset::Credit] {
                let held: u128 = m.ledger().accounts(asset).map(|(_, a)| a.get()).sum();
                prop_assert_eq!(held, m.ledger().total_supply(asset).get());
            }
        }
    }
}
