pub mod models;
pub mod reconcile;
pub mod stats;
pub mod store;

pub use models::{
    Category, CategoryAllocation, Dividend, Investment, Month, MonthlyBudget, Subcategory,
};
pub use reconcile::{reconcile_month, synthesize, LOOKBACK_MONTHS};
pub use stats::{
    compute_dividend_stats, compute_stats, monthly_trend, CategoryBreakdown, CompanyBreakdown,
    DividendStats, InvestmentStats,
};
pub use store::{DividendSource, InvestmentSource, LedgerStore, MemoryStore};
