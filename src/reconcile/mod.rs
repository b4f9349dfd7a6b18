use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{CategoryAllocation, Investment, Month, MonthlyBudget};
use crate::stats::{invested_in_category, invested_in_month};
use crate::store::LedgerStore;

/// How far back a missing month searches for a ledger to carry forward.
pub const LOOKBACK_MONTHS: u32 = 12;

/// Build a ledger for `target` from the nearest prior month with one,
/// carrying unspent total and per-category amounts forward.
///
/// Returns the existing ledger unchanged when `target` already has one,
/// and `None` when no prior ledger is found within the lookback window or
/// the nearest one was fully spent. A fully-spent month leaves the next
/// month unbudgeted rather than budgeted at zero.
pub fn synthesize<F>(investments: &[Investment], lookup: F, target: Month) -> Option<MonthlyBudget>
where
    F: Fn(Month) -> Option<MonthlyBudget>,
{
    if let Some(existing) = lookup(target) {
        return Some(existing);
    }

    let recent = (1..=LOOKBACK_MONTHS)
        .map(|n| target.minus_months(n))
        .find_map(&lookup)?;

    let recent_spent = invested_in_month(investments, recent.month);
    let carryover = (recent.total_available() - recent_spent).max(Decimal::ZERO);
    if carryover == Decimal::ZERO {
        debug!(%target, from = %recent.month, "nothing left to carry forward");
        return None;
    }

    let category_allocations = recent
        .category_allocations
        .iter()
        .map(|alloc| {
            let spent = invested_in_category(investments, recent.month, &alloc.category_name);
            let carry_over = (alloc.allocated_amount - spent).max(Decimal::ZERO);
            CategoryAllocation {
                category_name: alloc.category_name.clone(),
                allocated_amount: alloc.allocated_amount,
                carry_over,
                spent: Decimal::ZERO,
                remaining: alloc.allocated_amount + carry_over,
            }
        })
        .collect();

    debug!(%target, from = %recent.month, %carryover, "synthesized ledger from prior month");
    Some(MonthlyBudget {
        month: target,
        total_amount: recent.total_amount,
        total_carry_over: carryover,
        category_allocations,
    })
}

/// Ensure `target` has a ledger before its stats are computed, persisting a
/// synthesized one when a prior month left unspent funds.
///
/// Lookup failures are treated as "not found" so a flaky store degrades to
/// an unbudgeted month instead of aborting; only the final persist can fail.
pub fn reconcile_month(
    store: &mut dyn LedgerStore,
    investments: &[Investment],
    target: Month,
) -> Result<Option<MonthlyBudget>> {
    let lookup = |month: Month| match store.get_ledger(month) {
        Ok(ledger) => ledger,
        Err(err) => {
            warn!(%month, %err, "ledger lookup failed, treating as missing");
            None
        }
    };

    if let Some(existing) = lookup(target) {
        return Ok(Some(existing));
    }

    match synthesize(investments, lookup, target) {
        Some(ledger) => Ok(Some(store.put_ledger(ledger)?)),
        None => Ok(None),
    }
}
