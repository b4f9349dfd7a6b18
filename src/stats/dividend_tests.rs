#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Dividend, Month};

fn ym(year: i32, month: u32) -> Month {
    Month::new(year, month).unwrap()
}

fn div(amount: Decimal, company: &str, symbol: &str, year: i32, month: u32) -> Dividend {
    Dividend::new(
        amount,
        company.into(),
        symbol.into(),
        NaiveDate::from_ymd_opt(year, month, 15).unwrap(),
    )
}

#[test]
fn test_empty_dividends() {
    let stats = compute_dividend_stats(&[], ym(2024, 3));
    assert_eq!(stats.current_month_dividends, Decimal::ZERO);
    assert_eq!(stats.current_year_dividends, Decimal::ZERO);
    assert_eq!(stats.average_per_month, Decimal::ZERO);
    assert!(stats.top_paying_stock.is_none());
    assert!(stats.company_breakdown.is_empty());
    assert_eq!(stats.monthly_totals.len(), 12);
    assert!(stats.monthly_totals.iter().all(|(_, t)| *t == Decimal::ZERO));
}

#[test]
fn test_month_and_year_totals() {
    let dividends = [
        div(dec!(100), "Acme Corp", "ACME", 2024, 1),
        div(dec!(50), "Acme Corp", "ACME", 2024, 3),
        div(dec!(75), "Globex", "GLBX", 2024, 3),
        // Previous year stays out of every figure.
        div(dec!(999), "Acme Corp", "ACME", 2023, 3),
    ];
    let stats = compute_dividend_stats(&dividends, ym(2024, 3));

    assert_eq!(stats.current_month_dividends, dec!(125));
    assert_eq!(stats.current_year_dividends, dec!(225));
}

#[test]
fn test_average_over_elapsed_months() {
    let dividends = [
        div(dec!(100), "Acme Corp", "ACME", 2024, 1),
        div(dec!(200), "Acme Corp", "ACME", 2024, 2),
    ];
    // Four months elapsed: 300 / 4.
    let stats = compute_dividend_stats(&dividends, ym(2024, 4));
    assert_eq!(stats.average_per_month, dec!(75));
}

#[test]
fn test_company_breakdown_percentages() {
    let dividends = [
        div(dec!(75), "Acme Corp", "ACME", 2024, 3),
        div(dec!(25), "Globex", "GLBX", 2024, 3),
        div(dec!(50), "Acme Corp", "ACME", 2024, 3),
    ];
    let stats = compute_dividend_stats(&dividends, ym(2024, 3));

    assert_eq!(stats.company_breakdown.len(), 2);
    // Largest first.
    assert_eq!(stats.company_breakdown[0].company, "Acme Corp");
    assert_eq!(stats.company_breakdown[0].amount, dec!(125));
    assert_eq!(stats.company_breakdown[1].percentage.round_dp(4), dec!(16.6667));

    let total: Decimal = stats.company_breakdown.iter().map(|b| b.percentage).sum();
    assert_eq!(total.round_dp(6), dec!(100));
}

#[test]
fn test_top_paying_stock_spans_the_year() {
    let dividends = [
        div(dec!(10), "Acme Corp", "ACME", 2024, 3),
        div(dec!(500), "Globex", "GLBX", 2024, 1),
    ];
    // Globex paid nothing this month but leads the year.
    let stats = compute_dividend_stats(&dividends, ym(2024, 3));
    let top = stats.top_paying_stock.unwrap();
    assert_eq!(top.company, "Globex");
    assert_eq!(top.amount, dec!(500));
}

#[test]
fn test_monthly_totals_cover_whole_year() {
    let dividends = [
        div(dec!(100), "Acme Corp", "ACME", 2024, 1),
        div(dec!(40), "Acme Corp", "ACME", 2024, 6),
    ];
    let stats = compute_dividend_stats(&dividends, ym(2024, 3));

    assert_eq!(stats.monthly_totals.len(), 12);
    assert_eq!(stats.monthly_totals[0], (ym(2024, 1), dec!(100)));
    assert_eq!(stats.monthly_totals[5], (ym(2024, 6), dec!(40)));
    assert_eq!(stats.monthly_totals[11], (ym(2024, 12), Decimal::ZERO));
}
