use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Month;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub company: String,
    pub stock_symbol: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Dividend {
    pub fn new(amount: Decimal, company: String, stock_symbol: String, date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            company,
            stock_symbol,
            date,
            notes: String::new(),
        }
    }

    pub fn month(&self) -> Month {
        Month::from_date(self.date)
    }
}
