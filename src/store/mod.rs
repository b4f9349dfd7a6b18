use anyhow::{bail, Result};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Category, Dividend, Investment, Month, MonthlyBudget, Subcategory};

/// Source of investment records. The core re-filters by month itself, so
/// implementations only guarantee stable retrieval.
pub trait InvestmentSource {
    fn list_investments(&self) -> Result<Vec<Investment>>;
}

/// Source of dividend receipts.
pub trait DividendSource {
    fn list_dividends(&self) -> Result<Vec<Dividend>>;
}

/// Ledger storage keyed by month, at most one ledger per key.
pub trait LedgerStore {
    fn get_ledger(&self, month: Month) -> Result<Option<MonthlyBudget>>;

    /// Upsert: replaces any existing ledger for the month wholesale.
    fn put_ledger(&mut self, ledger: MonthlyBudget) -> Result<MonthlyBudget>;
}

/// In-memory store over the tracked collections. Validates amounts at the
/// boundary so the pure computations can assume clean inputs.
pub struct MemoryStore {
    investments: Vec<Investment>,
    dividends: Vec<Dividend>,
    categories: Vec<Category>,
    budgets: Vec<MonthlyBudget>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut store = Self {
            investments: Vec::new(),
            dividends: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
            next_id: 1,
        };
        store.seed_default_categories();
        store
    }

    fn seed_default_categories(&mut self) {
        let defaults = [
            (
                "Mutual Funds",
                "#10b981",
                &[
                    "Large Cap",
                    "Mid Cap",
                    "Small Cap",
                    "Multi Cap",
                    "Sectoral/Thematic",
                ][..],
            ),
            ("Fixed Deposit", "#3b82f6", &[][..]),
            ("Stocks", "#f59e0b", &[][..]),
            ("Gold", "#eab308", &[][..]),
        ];

        for (name, color, subcategories) in defaults {
            let id = self.next_id();
            let mut category = Category::new(name.into(), color.into());
            category.id = Some(id);
            for sub in subcategories {
                let sub_id = self.next_id();
                category.subcategories.push(Subcategory {
                    id: Some(sub_id),
                    name: (*sub).into(),
                });
            }
            self.categories.push(category);
        }
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ── Investments ───────────────────────────────────────────

    pub fn add_investment(&mut self, mut investment: Investment) -> Result<i64> {
        if investment.amount <= Decimal::ZERO {
            bail!("Investment amount must be positive: {}", investment.amount);
        }
        if investment.category.trim().is_empty() {
            bail!("Investment category is required");
        }
        let id = self.next_id();
        investment.id = Some(id);
        self.investments.push(investment);
        Ok(id)
    }

    pub fn delete_investment(&mut self, id: i64) {
        self.investments.retain(|inv| inv.id != Some(id));
    }

    // ── Dividends ─────────────────────────────────────────────

    pub fn add_dividend(&mut self, mut dividend: Dividend) -> Result<i64> {
        if dividend.amount <= Decimal::ZERO {
            bail!("Dividend amount must be positive: {}", dividend.amount);
        }
        let id = self.next_id();
        dividend.id = Some(id);
        self.dividends.push(dividend);
        Ok(id)
    }

    pub fn delete_dividend(&mut self, id: i64) {
        self.dividends.retain(|div| div.id != Some(id));
    }

    // ── Categories ────────────────────────────────────────────

    pub fn get_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn add_category(&mut self, name: &str, color: &str) -> Result<i64> {
        if Category::find_by_name(&self.categories, name).is_some() {
            bail!("Category already exists: {name}");
        }
        let id = self.next_id();
        let mut category = Category::new(name.into(), color.into());
        category.id = Some(id);
        self.categories.push(category);
        Ok(id)
    }

    pub fn delete_category(&mut self, id: i64) {
        self.categories.retain(|cat| cat.id != Some(id));
    }

    pub fn add_subcategory(&mut self, category_id: i64, name: &str) -> Result<i64> {
        let id = self.next_id();
        let Some(category) = self
            .categories
            .iter_mut()
            .find(|cat| cat.id == Some(category_id))
        else {
            bail!("No such category: {category_id}");
        };
        category.subcategories.push(Subcategory {
            id: Some(id),
            name: name.into(),
        });
        Ok(id)
    }

    pub fn delete_subcategory(&mut self, category_id: i64, subcategory_id: i64) {
        if let Some(category) = self
            .categories
            .iter_mut()
            .find(|cat| cat.id == Some(category_id))
        {
            category
                .subcategories
                .retain(|sub| sub.id != Some(subcategory_id));
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestmentSource for MemoryStore {
    fn list_investments(&self) -> Result<Vec<Investment>> {
        Ok(self.investments.clone())
    }
}

impl DividendSource for MemoryStore {
    fn list_dividends(&self) -> Result<Vec<Dividend>> {
        Ok(self.dividends.clone())
    }
}

impl LedgerStore for MemoryStore {
    fn get_ledger(&self, month: Month) -> Result<Option<MonthlyBudget>> {
        Ok(self.budgets.iter().find(|b| b.month == month).cloned())
    }

    fn put_ledger(&mut self, ledger: MonthlyBudget) -> Result<MonthlyBudget> {
        validate_ledger(&ledger)?;
        debug!(month = %ledger.month, total = %ledger.total_amount, "storing ledger");
        match self.budgets.iter_mut().find(|b| b.month == ledger.month) {
            Some(existing) => *existing = ledger.clone(),
            None => self.budgets.push(ledger.clone()),
        }
        Ok(ledger)
    }
}

fn validate_ledger(ledger: &MonthlyBudget) -> Result<()> {
    if ledger.total_amount < Decimal::ZERO {
        bail!("Budget total must be non-negative: {}", ledger.total_amount);
    }
    if ledger.total_carry_over < Decimal::ZERO {
        bail!(
            "Budget carryover must be non-negative: {}",
            ledger.total_carry_over
        );
    }
    for (i, alloc) in ledger.category_allocations.iter().enumerate() {
        if alloc.allocated_amount < Decimal::ZERO {
            bail!(
                "Allocation for {} must be non-negative: {}",
                alloc.category_name,
                alloc.allocated_amount
            );
        }
        let duplicate = ledger.category_allocations[..i]
            .iter()
            .any(|other| other.category_name == alloc.category_name);
        if duplicate {
            bail!("Duplicate allocation for category: {}", alloc.category_name);
        }
    }
    Ok(())
}
