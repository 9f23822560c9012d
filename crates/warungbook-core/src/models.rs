//! Entry records, input drafts and the entry snapshot

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category;
use crate::error::{CoreError, CoreResult};
use crate::time::{deserialize_date, deserialize_optional_date, Dated, YearMonth};
use crate::types::EntryKind;

/// Money received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

/// Money spent, tagged with a free-text category code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

/// Sales of one dish on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSaleEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub name: String,
    #[serde(alias = "revenue")]
    pub unit_revenue: Decimal,
    #[serde(alias = "cost")]
    pub unit_cost: Decimal,
    pub quantity: u32,
}

impl DishSaleEntry {
    /// unit_revenue × quantity
    pub fn revenue(&self) -> Decimal {
        self.unit_revenue * Decimal::from(self.quantity)
    }

    /// unit_cost × quantity
    pub fn cost(&self) -> Decimal {
        self.unit_cost * Decimal::from(self.quantity)
    }

    pub fn profit(&self) -> Decimal {
        self.revenue() - self.cost()
    }
}

impl Dated for IncomeEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for ExpenseEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for DishSaleEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

// ==================== Drafts ====================

/// Submitted income form, validated before it becomes an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeDraft {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

/// Submitted expense form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

/// Submitted dish sale form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishDraft {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "revenue")]
    pub unit_revenue: Option<Decimal>,
    #[serde(default, alias = "cost")]
    pub unit_cost: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

fn require_date(date: Option<NaiveDate>) -> CoreResult<NaiveDate> {
    date.ok_or_else(|| CoreError::validation("date", "Tanggal wajib diisi"))
}

/// Upper bound for one entry amount, and for one dish sale's total
///
/// Report totals are plain sums of entry amounts, so a cap far below
/// `Decimal::MAX` keeps every sum representable.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT)
}

fn too_large(field: &str) -> CoreError {
    CoreError::validation(field, "Nilai terlalu besar")
}

fn require_positive(field: &str, value: Option<Decimal>) -> CoreResult<Decimal> {
    match value {
        Some(v) if v > max_amount() => Err(too_large(field)),
        Some(v) if v > Decimal::ZERO => Ok(v),
        Some(_) => Err(CoreError::validation(field, "Nilai harus lebih dari nol")),
        None => Err(CoreError::validation(field, "Nilai wajib diisi")),
    }
}

fn require_non_negative(field: &str, value: Option<Decimal>) -> CoreResult<Decimal> {
    match value {
        Some(v) if v > max_amount() => Err(too_large(field)),
        Some(v) if v >= Decimal::ZERO => Ok(v),
        Some(_) => Err(CoreError::validation(field, "Nilai tidak boleh negatif")),
        None => Err(CoreError::validation(field, "Nilai wajib diisi")),
    }
}

/// `unit × quantity` must stay within [`MAX_AMOUNT`]
fn require_line_total(field: &str, unit: Decimal, quantity: u32) -> CoreResult<()> {
    match unit.checked_mul(Decimal::from(quantity)) {
        Some(total) if total <= max_amount() => Ok(()),
        _ => Err(too_large(field)),
    }
}

/// Monthly entries are booked on the first day of their month
fn booking_date(date: NaiveDate, kind: EntryKind) -> NaiveDate {
    match kind {
        EntryKind::Daily => date,
        EntryKind::Monthly => YearMonth::of(&date).first_day().unwrap_or(date),
    }
}

fn description_or_default(description: &str, prefix: &str, date: NaiveDate, kind: EntryKind) -> String {
    let description = description.trim();
    if !description.is_empty() {
        return description.to_string();
    }
    match kind {
        EntryKind::Daily => format!("{} harian", prefix),
        EntryKind::Monthly => format!("{} bulanan {}", prefix, YearMonth::of(&date).label()),
    }
}

impl IncomeDraft {
    /// Validate and turn into an entry with the given id
    pub fn into_entry(self, id: String) -> CoreResult<IncomeEntry> {
        let date = booking_date(require_date(self.date)?, self.kind);
        let amount = require_positive("amount", self.amount)?;
        Ok(IncomeEntry {
            id,
            date,
            amount,
            description: description_or_default(&self.description, "Pemasukan", date, self.kind),
            kind: self.kind,
        })
    }
}

impl ExpenseDraft {
    pub fn into_entry(self, id: String) -> CoreResult<ExpenseEntry> {
        let date = booking_date(require_date(self.date)?, self.kind);
        let amount = require_positive("amount", self.amount)?;
        if self.category.trim().is_empty() {
            return Err(CoreError::validation("category", "Kategori wajib dipilih"));
        }
        Ok(ExpenseEntry {
            id,
            date,
            amount,
            description: description_or_default(&self.description, "Pengeluaran", date, self.kind),
            category: category::normalize_code(&self.category),
            kind: self.kind,
        })
    }
}

impl DishDraft {
    pub fn into_entry(self, id: String) -> CoreResult<DishSaleEntry> {
        let date = require_date(self.date)?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("name", "Nama menu wajib diisi"));
        }
        let unit_revenue = require_non_negative("unit_revenue", self.unit_revenue)?;
        let unit_cost = require_non_negative("unit_cost", self.unit_cost)?;
        let quantity = match self.quantity {
            Some(q) if q > 0 => q,
            _ => return Err(CoreError::validation("quantity", "Jumlah porsi harus lebih dari nol")),
        };
        require_line_total("unit_revenue", unit_revenue, quantity)?;
        require_line_total("unit_cost", unit_cost, quantity)?;
        Ok(DishSaleEntry {
            id,
            date,
            name: name.to_string(),
            unit_revenue,
            unit_cost,
            quantity,
        })
    }
}

// ==================== Snapshot ====================

/// All recorded entries, as loaded from or saved to the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entries {
    #[serde(default)]
    pub income: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    pub dishes: Vec<DishSaleEntry>,
}

impl Entries {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty() && self.dishes.is_empty()
    }

    /// Number of entries across the three lists
    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len() + self.dishes.len()
    }

    pub fn total_income(&self) -> Decimal {
        self.income.iter().map(|e| e.amount).sum()
    }

    pub fn total_expenses(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_income_draft_defaults() {
        let draft = IncomeDraft {
            date: Some(d(2024, 1, 10)),
            amount: Some(Decimal::new(100000, 0)),
            ..Default::default()
        };
        let entry = draft.into_entry("inc-1".to_string()).unwrap();
        assert_eq!(entry.description, "Pemasukan harian");
        assert_eq!(entry.date, d(2024, 1, 10));
        assert_eq!(entry.kind, EntryKind::Daily);
    }

    #[test]
    fn test_monthly_draft_booked_on_first_day() {
        let draft = ExpenseDraft {
            date: Some(d(2024, 3, 17)),
            amount: Some(Decimal::new(2500000, 0)),
            category: "sewa".to_string(),
            kind: EntryKind::Monthly,
            ..Default::default()
        };
        let entry = draft.into_entry("exp-1".to_string()).unwrap();
        assert_eq!(entry.date, d(2024, 3, 1));
        assert_eq!(entry.description, "Pengeluaran bulanan Maret 2024");
    }

    #[test]
    fn test_draft_validation_errors() {
        let missing_date = IncomeDraft {
            amount: Some(Decimal::ONE),
            ..Default::default()
        };
        assert!(matches!(
            missing_date.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "date"
        ));

        let zero_amount = IncomeDraft {
            date: Some(d(2024, 1, 1)),
            amount: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(matches!(
            zero_amount.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "amount"
        ));

        let no_category = ExpenseDraft {
            date: Some(d(2024, 1, 1)),
            amount: Some(Decimal::ONE),
            category: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            no_category.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "category"
        ));
    }

    #[test]
    fn test_expense_category_normalised() {
        let draft = ExpenseDraft {
            date: Some(d(2024, 1, 1)),
            amount: Some(Decimal::ONE),
            category: "Bahan-Baku".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.into_entry("x".into()).unwrap().category, "bahan_baku");
    }

    #[test]
    fn test_dish_draft_requires_quantity() {
        let draft = DishDraft {
            date: Some(d(2024, 1, 1)),
            name: "Nasi goreng".to_string(),
            unit_revenue: Some(Decimal::new(15000, 0)),
            unit_cost: Some(Decimal::new(8000, 0)),
            quantity: Some(0),
        };
        assert!(matches!(
            draft.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "quantity"
        ));
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let huge_income = IncomeDraft {
            date: Some(d(2024, 1, 1)),
            amount: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(matches!(
            huge_income.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "amount"
        ));

        let at_cap = IncomeDraft {
            date: Some(d(2024, 1, 1)),
            amount: Some(Decimal::from(MAX_AMOUNT)),
            ..Default::default()
        };
        assert!(at_cap.into_entry("x".into()).is_ok());

        let huge_unit = DishDraft {
            date: Some(d(2024, 1, 1)),
            name: "Nasi goreng".to_string(),
            unit_revenue: Some(Decimal::MAX),
            unit_cost: Some(Decimal::ZERO),
            quantity: Some(2),
        };
        assert!(matches!(
            huge_unit.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "unit_revenue"
        ));

        // each unit is within the cap but the sale total is not
        let huge_total = DishDraft {
            date: Some(d(2024, 1, 1)),
            name: "Nasi goreng".to_string(),
            unit_revenue: Some(Decimal::from(MAX_AMOUNT)),
            unit_cost: Some(Decimal::from(MAX_AMOUNT)),
            quantity: Some(2),
        };
        assert!(matches!(
            huge_total.into_entry("x".into()),
            Err(CoreError::Validation { ref field, .. }) if field == "unit_revenue"
        ));
    }

    #[test]
    fn test_dish_amounts() {
        let dish = DishSaleEntry {
            id: "d1".to_string(),
            date: d(2024, 1, 1),
            name: "Nasi goreng".to_string(),
            unit_revenue: Decimal::new(15000, 0),
            unit_cost: Decimal::new(8000, 0),
            quantity: 10,
        };
        assert_eq!(dish.revenue(), Decimal::new(150000, 0));
        assert_eq!(dish.cost(), Decimal::new(80000, 0));
        assert_eq!(dish.profit(), Decimal::new(70000, 0));
    }

    #[test]
    fn test_entry_json_wire_names() {
        let json = r#"{
            "income": [{"id": "a", "date": "2024-01-10", "amount": 100000, "description": "", "type": "monthly"}],
            "dishes": [{"id": "b", "date": "2024-01-10T12:00:00", "name": "Es teh", "revenue": "5000", "cost": 1500, "quantity": 3}]
        }"#;
        let entries: Entries = serde_json::from_str(json).unwrap();
        assert_eq!(entries.income[0].kind, EntryKind::Monthly);
        assert_eq!(entries.income[0].amount, Decimal::new(100000, 0));
        assert!(entries.expenses.is_empty());
        assert_eq!(entries.dishes[0].unit_revenue, Decimal::new(5000, 0));
        assert_eq!(entries.dishes[0].date, d(2024, 1, 10));
        assert_eq!(entries.len(), 2);

        let value = serde_json::to_value(&entries.income[0]).unwrap();
        assert_eq!(value["type"], "monthly");
        assert_eq!(value["date"], "2024-01-10");
    }

    #[test]
    fn test_draft_blank_date_is_missing() {
        let draft: IncomeDraft = serde_json::from_str(r#"{"date": "", "amount": 5}"#).unwrap();
        assert!(draft.date.is_none());
    }
}
