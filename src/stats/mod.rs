mod dividends;

pub use dividends::{compute_dividend_stats, CompanyBreakdown, DividendStats};

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CategoryAllocation, Investment, Month, MonthlyBudget};

/// One row of the per-(category, subcategory) spend rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Derived monthly statistics: spend attribution between carried-over
/// surplus and fresh allocation, aggregate and per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStats {
    pub total_invested: Decimal,
    pub remaining_budget: Decimal,
    pub total_budget: Decimal,
    /// Sum of per-allocation leftover carryover. Diverges from
    /// `remaining_carryover` when allocations don't partition spend;
    /// both figures are kept, matching what consumers already display.
    pub carry_over: Decimal,
    pub category_allocations: Vec<CategoryAllocation>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub spent_from_carryover: Decimal,
    pub spent_from_current_budget: Decimal,
    pub remaining_carryover: Decimal,
    pub remaining_current_budget: Decimal,
    pub current_month_budget: Decimal,
}

/// Total invested in `month`.
pub fn invested_in_month(investments: &[Investment], month: Month) -> Decimal {
    investments
        .iter()
        .filter(|inv| month.contains(inv.date))
        .map(|inv| inv.amount)
        .sum()
}

/// Total invested in `month` under `category`. Subcategories roll up
/// into their parent.
pub fn invested_in_category(investments: &[Investment], month: Month, category: &str) -> Decimal {
    investments
        .iter()
        .filter(|inv| month.contains(inv.date) && inv.category == category)
        .map(|inv| inv.amount)
        .sum()
}

/// Compute the month's derived statistics from snapshots of the investment
/// collection and the current/previous ledgers. Pure: no I/O, deterministic.
///
/// Takes the full investment collection and re-filters by month internally,
/// since the carryover fallback needs the previous month's spend as well.
/// Missing ledgers are treated as zero-valued defaults.
pub fn compute_stats(
    investments: &[Investment],
    month: Month,
    current: Option<&MonthlyBudget>,
    previous: Option<&MonthlyBudget>,
) -> InvestmentStats {
    let total_invested = invested_in_month(investments, month);

    // A manually entered carryover wins; otherwise fall back to what the
    // previous tracked ledger left unspent.
    let manual_carry_over = current
        .map(|b| b.total_carry_over)
        .filter(|c| *c > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO);
    let effective_carry_over = if manual_carry_over > Decimal::ZERO {
        manual_carry_over
    } else {
        previous
            .map(|prev| {
                let prev_spent = invested_in_month(investments, prev.month);
                (prev.total_available() - prev_spent).max(Decimal::ZERO)
            })
            .unwrap_or(Decimal::ZERO)
    };

    let current_month_budget = current.map(|b| b.total_amount).unwrap_or(Decimal::ZERO);

    // Carryover is consumed before fresh allocation.
    let spent_from_carryover = total_invested.min(effective_carry_over);
    let spent_from_current_budget = (total_invested - effective_carry_over).max(Decimal::ZERO);
    let remaining_carryover = (effective_carry_over - total_invested).max(Decimal::ZERO);
    let remaining_current_budget =
        (current_month_budget - spent_from_current_budget).max(Decimal::ZERO);
    let total_budget = current_month_budget + effective_carry_over;
    let remaining_budget = remaining_carryover + remaining_current_budget;

    let category_breakdown = category_breakdown(investments, month, total_invested);

    let category_allocations = current
        .map(|b| reconcile_allocations(&b.category_allocations, investments, month, previous))
        .unwrap_or_default();

    let carry_over: Decimal = category_allocations.iter().map(|a| a.carry_over).sum();

    debug!(%month, %total_invested, %effective_carry_over, "computed monthly stats");

    InvestmentStats {
        total_invested,
        remaining_budget,
        total_budget,
        carry_over,
        category_allocations,
        category_breakdown,
        spent_from_carryover,
        spent_from_current_budget,
        remaining_carryover,
        remaining_current_budget,
        current_month_budget,
    }
}

/// Group the month's investments by (category, subcategory) and compute each
/// group's share of the total. Grouping is by the structural pair, so names
/// containing a separator character can't collide.
fn category_breakdown(
    investments: &[Investment],
    month: Month,
    total_invested: Decimal,
) -> Vec<CategoryBreakdown> {
    let mut groups: HashMap<(String, Option<String>), Decimal> = HashMap::new();
    for inv in investments.iter().filter(|inv| month.contains(inv.date)) {
        *groups
            .entry((inv.category.clone(), inv.subcategory.clone()))
            .or_insert(Decimal::ZERO) += inv.amount;
    }

    let mut rows: Vec<CategoryBreakdown> = groups
        .into_iter()
        .map(|((category, subcategory), amount)| {
            let percentage = if total_invested > Decimal::ZERO {
                amount / total_invested * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            CategoryBreakdown {
                category,
                subcategory,
                amount,
                percentage,
            }
        })
        .collect();

    // Largest spend first, names as tiebreaker for a stable order.
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.subcategory.cmp(&b.subcategory))
    });
    rows
}

/// Re-derive each allocation against the month's actual spend, consuming
/// the previous month's per-category leftover before fresh allocation.
fn reconcile_allocations(
    allocations: &[CategoryAllocation],
    investments: &[Investment],
    month: Month,
    previous: Option<&MonthlyBudget>,
) -> Vec<CategoryAllocation> {
    allocations
        .iter()
        .map(|alloc| {
            let category_spent = invested_in_category(investments, month, &alloc.category_name);

            // Spent is recomputed from investment records, never read from
            // the stored field.
            let category_carryover = previous
                .and_then(|prev| {
                    prev.allocation(&alloc.category_name).map(|p| {
                        let prev_spent =
                            invested_in_category(investments, prev.month, &alloc.category_name);
                        (p.allocated_amount - prev_spent).max(Decimal::ZERO)
                    })
                })
                .unwrap_or(Decimal::ZERO);

            let spent_from_carryover = category_spent.min(category_carryover);
            let spent_from_allocation = (category_spent - category_carryover).max(Decimal::ZERO);
            let remaining_carryover = category_carryover - spent_from_carryover;
            // May go negative on overspend.
            let remaining_allocation = alloc.allocated_amount - spent_from_allocation;

            CategoryAllocation {
                category_name: alloc.category_name.clone(),
                allocated_amount: alloc.allocated_amount,
                carry_over: remaining_carryover,
                spent: category_spent,
                remaining: remaining_allocation + remaining_carryover,
            }
        })
        .collect()
}

/// Per-month invested totals in chronological order, limited to the most
/// recent `months` buckets. Months with no investments are skipped.
pub fn monthly_trend(investments: &[Investment], months: usize) -> Vec<(Month, Decimal)> {
    let mut totals: HashMap<Month, Decimal> = HashMap::new();
    for inv in investments {
        *totals.entry(inv.month()).or_insert(Decimal::ZERO) += inv.amount;
    }

    let mut rows: Vec<(Month, Decimal)> = totals.into_iter().collect();
    rows.sort_by_key(|(month, _)| *month);
    if rows.len() > months {
        rows.drain(..rows.len() - months);
    }
    rows
}
