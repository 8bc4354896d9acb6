//! Property-based tests for the pool accounting.
//!
//! 1. **Round trip loses value**: stable→credit→stable returns ≤ original.
//! 2. **Product preservation**: `Rs × Rc` never decreases across swaps.
//! 3. **Liquidity conservation**: deposit then full withdrawal never
//!    pays out more than was deposited.
//! 4. **Share conservation**: `Σ holder shares == total_shares` after
//!    any sequence of deposits and withdrawals.
//! 5. **Quote sufficiency**: the exact-output quote always buys at least
//!    the requested amount, and one unit less does not.

use proptest::prelude::*;

use crate::domain::{AccountId, Amount, Shares, SwapDirection};

use super::{input_for_output, output_for_input, LiquidityPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn holder(n: u8) -> AccountId {
    AccountId::from_bytes([n.wrapping_add(1); 32])
}

fn make_pool(stable: u128, credit: u128) -> LiquidityPool {
    let mut pool = LiquidityPool::new();
    let Ok(staged) = pool.stage_deposit(holder(0), Amount::new(stable), Amount::new(credit)) else {
        panic!("valid seed deposit");
    };
    pool.commit(staged);
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Reserves at 18-decimal scale, up to one billion whole units.
fn wide_reserve_strategy() -> impl Strategy<Value = u128> {
    (1u128..=1_000_000_000u128).prop_map(|units| units * 1_000_000_000_000_000_000)
}

#[derive(Debug, Clone)]
enum PoolOp {
    Deposit { who: u8, stable: u128, credit: u128 },
    Withdraw { who: u8, permille: u16 },
    Swap { buy: bool, amount: u128 },
}

fn op_strategy() -> impl Strategy<Value = PoolOp> {
    prop_oneof![
        (0u8..4, 1u128..1_000_000, 1u128..1_000_000)
            .prop_map(|(who, stable, credit)| PoolOp::Deposit { who, stable, credit }),
        (0u8..4, 1u16..=1_000).prop_map(|(who, permille)| PoolOp::Withdraw { who, permille }),
        (any::<bool>(), 1u128..1_000_000).prop_map(|(buy, amount)| PoolOp::Swap { buy, amount }),
    ]
}

fn apply(pool: &mut LiquidityPool, op: &PoolOp) {
    match *op {
        PoolOp::Deposit { who, stable, credit } => {
            if let Ok(staged) = pool.stage_deposit(holder(who), Amount::new(stable), Amount::new(credit)) {
                pool.commit(staged);
            }
        }
        PoolOp::Withdraw { who, permille } => {
            let held = pool.shares_of(&holder(who)).get();
            let burn = held * u128::from(permille) / 1_000;
            if let Ok(staged) = pool.stage_withdrawal(holder(who), Shares::new(burn)) {
                pool.commit(staged);
            }
        }
        PoolOp::Swap { buy, amount } => {
            let direction = if buy {
                SwapDirection::StableForCredit
            } else {
                SwapDirection::CreditForStable
            };
            if let Ok(staged) = pool.stage_swap(direction, Amount::new(amount)) {
                pool.commit(staged);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 1: Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip_loses_value(
        rs in reserve_strategy(),
        rc in reserve_strategy(),
    ) {
        let swap_in = (rs / 1_000).max(1);
        let mut pool = make_pool(rs, rc);

        let Ok(buy) = pool.stage_swap(SwapDirection::StableForCredit, Amount::new(swap_in)) else {
            return Ok(());
        };
        let bought = pool.commit(buy).amount_out();

        let Ok(sell) = pool.stage_swap(SwapDirection::CreditForStable, bought) else {
            return Ok(());
        };
        let returned = pool.commit(sell).amount_out().get();

        prop_assert!(
            returned <= swap_in,
            "round-trip should lose value: final={} > original={}",
            returned, swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Product preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        rs in reserve_strategy(),
        rc in reserve_strategy(),
        swaps in proptest::collection::vec((any::<bool>(), 1u128..100_000), 1..10),
    ) {
        let mut pool = make_pool(rs, rc);
        for (buy, amount) in swaps {
            let before = pool.invariant();
            apply(&mut pool, &PoolOp::Swap { buy, amount });
            prop_assert!(pool.invariant() >= before, "product decreased on swap");
        }
    }

    #[test]
    fn prop_product_never_decreases_at_full_scale(
        rs in wide_reserve_strategy(),
        rc in wide_reserve_strategy(),
        permille in 1u128..=500,
    ) {
        let mut pool = make_pool(rs, rc);
        let before = pool.invariant();
        let amount = Amount::new(rs / 1_000 * permille);
        if let Ok(staged) = pool.stage_swap(SwapDirection::StableForCredit, amount) {
            pool.commit(staged);
        }
        prop_assert!(pool.invariant() >= before);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_withdraw_never_overpays(
        rs in reserve_strategy(),
        rc in reserve_strategy(),
        ds in 1u128..1_000_000,
        dc in 1u128..1_000_000,
    ) {
        let mut pool = make_pool(rs, rc);
        let Ok(deposit) = pool.stage_deposit(holder(1), Amount::new(ds), Amount::new(dc)) else {
            return Ok(());
        };
        let minted = pool.commit(deposit);

        let Ok(withdrawal) = pool.stage_withdrawal(holder(1), minted) else {
            return Ok(());
        };
        let receipt = pool.commit(withdrawal);

        prop_assert!(receipt.stable().get() <= ds);
        prop_assert!(receipt.credit().get() <= dc);
        prop_assert!(pool.reserve_stable().get() >= rs);
        prop_assert!(pool.reserve_credit().get() >= rc);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Share conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_always_sum_to_supply(
        rs in reserve_strategy(),
        rc in reserve_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..30),
    ) {
        let mut pool = make_pool(rs, rc);
        for op in &ops {
            apply(&mut pool, op);
            prop_assert!(pool.is_consistent(), "inconsistent after {:?}", op);
            let sum: u128 = pool.holders().map(|(_, s)| s.get()).sum();
            prop_assert_eq!(sum, pool.total_shares().get());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Quote sufficiency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_output_quote_is_tight(
        rs in reserve_strategy(),
        rc in reserve_strategy(),
        permille in 1u128..900,
    ) {
        let wanted = Amount::new((rc * permille / 1_000).max(1));
        let (rs, rc) = (Amount::new(rs), Amount::new(rc));
        let Ok(needed) = input_for_output(wanted, rs, rc) else {
            return Ok(());
        };

        let Ok(got) = output_for_input(needed, rs, rc) else {
            return Err(TestCaseError::fail("quoted input must be swappable"));
        };
        prop_assert!(got >= wanted, "quote too small: got={} wanted={}", got, wanted);

        if needed.get() > 1 {
            let less = Amount::new(needed.get() - 1);
            let short = output_for_input(less, rs, rc).map_or(0, |a| a.get());
            prop_assert!(short < wanted.get(), "quote not minimal");
        }
    }
}
