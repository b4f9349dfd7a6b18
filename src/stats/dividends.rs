use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Dividend, Month};

/// One company's share of a month's dividend income.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBreakdown {
    pub company: String,
    pub stock_symbol: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Derived dividend statistics for one month and its year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendStats {
    pub current_month_dividends: Decimal,
    pub current_year_dividends: Decimal,
    /// Year total averaged over the months elapsed so far, current included.
    pub average_per_month: Decimal,
    pub top_paying_stock: Option<CompanyBreakdown>,
    pub company_breakdown: Vec<CompanyBreakdown>,
    /// Totals for every month of the year, zero months included.
    pub monthly_totals: Vec<(Month, Decimal)>,
}

/// Aggregate dividend receipts for `month` and its calendar year.
/// Pure: no I/O, deterministic.
pub fn compute_dividend_stats(dividends: &[Dividend], month: Month) -> DividendStats {
    let current_month: Vec<&Dividend> = dividends
        .iter()
        .filter(|d| month.contains(d.date))
        .collect();
    let current_month_dividends: Decimal = current_month.iter().map(|d| d.amount).sum();

    let year: Vec<&Dividend> = dividends
        .iter()
        .filter(|d| d.month().year() == month.year())
        .collect();
    let current_year_dividends: Decimal = year.iter().map(|d| d.amount).sum();

    let elapsed = Decimal::from(month.month());
    let average_per_month = if elapsed > Decimal::ZERO {
        current_year_dividends / elapsed
    } else {
        Decimal::ZERO
    };

    let top_paying_stock = company_breakdown(&year, current_year_dividends)
        .into_iter()
        .next();
    let company_breakdown = company_breakdown(&current_month, current_month_dividends);

    let monthly_totals = (1..=12u32)
        .filter_map(|m| Month::new(month.year(), m).ok())
        .map(|m| {
            let total: Decimal = dividends
                .iter()
                .filter(|d| m.contains(d.date))
                .map(|d| d.amount)
                .sum();
            (m, total)
        })
        .collect();

    DividendStats {
        current_month_dividends,
        current_year_dividends,
        average_per_month,
        top_paying_stock,
        company_breakdown,
        monthly_totals,
    }
}

fn company_breakdown(dividends: &[&Dividend], total: Decimal) -> Vec<CompanyBreakdown> {
    let mut rows = company_breakdown_over(dividends);
    for row in &mut rows {
        row.percentage = if total > Decimal::ZERO {
            row.amount / total * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    rows
}

/// Group by (company, symbol) and sum, largest first. Percentages are left
/// at zero for the caller to fill against its own denominator.
fn company_breakdown_over(dividends: &[&Dividend]) -> Vec<CompanyBreakdown> {
    let mut groups: HashMap<(String, String), Decimal> = HashMap::new();
    for div in dividends {
        *groups
            .entry((div.company.clone(), div.stock_symbol.clone()))
            .or_insert(Decimal::ZERO) += div.amount;
    }

    let mut rows: Vec<CompanyBreakdown> = groups
        .into_iter()
        .map(|((company, stock_symbol), amount)| CompanyBreakdown {
            company,
            stock_symbol,
            amount,
            percentage: Decimal::ZERO,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.company.cmp(&b.company))
            .then_with(|| a.stock_symbol.cmp(&b.stock_symbol))
    });
    rows
}

#[cfg(test)]
#[path = "dividend_tests.rs"]
mod tests;
