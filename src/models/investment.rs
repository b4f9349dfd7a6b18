use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Month;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Investment {
    pub fn new(amount: Decimal, category: String, date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            category,
            subcategory: None,
            date,
            notes: String::new(),
        }
    }

    /// The month this record is bucketed into.
    pub fn month(&self) -> Month {
        Month::from_date(self.date)
    }
}
