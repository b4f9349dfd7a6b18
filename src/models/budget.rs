use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Month;

/// Per-category slice of a monthly budget.
///
/// `spent` and `remaining` are derived from investment records on read;
/// the stored values are never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAllocation {
    pub category_name: String,
    pub allocated_amount: Decimal,
    #[serde(default)]
    pub carry_over: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub remaining: Decimal,
}

impl CategoryAllocation {
    pub fn new(category_name: String, allocated_amount: Decimal) -> Self {
        Self {
            category_name,
            allocated_amount,
            carry_over: Decimal::ZERO,
            spent: Decimal::ZERO,
            remaining: allocated_amount,
        }
    }
}

/// Budget ledger for one month. At most one ledger exists per month key;
/// updates replace the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub month: Month,
    pub total_amount: Decimal,
    #[serde(default)]
    pub total_carry_over: Decimal,
    #[serde(default)]
    pub category_allocations: Vec<CategoryAllocation>,
}

impl MonthlyBudget {
    pub fn new(month: Month, total_amount: Decimal) -> Self {
        Self {
            month,
            total_amount,
            total_carry_over: Decimal::ZERO,
            category_allocations: Vec::new(),
        }
    }

    /// Total funds available for the month, carryover included.
    pub fn total_available(&self) -> Decimal {
        self.total_amount + self.total_carry_over
    }

    pub fn allocation(&self, category_name: &str) -> Option<&CategoryAllocation> {
        self.category_allocations
            .iter()
            .find(|a| a.category_name == category_name)
    }
}
