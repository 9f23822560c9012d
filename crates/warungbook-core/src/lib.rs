//! Core bookkeeping: entries, derived reports and the book that owns them

pub mod accounts;
pub mod cash_flow;
pub mod category;
pub mod dish;
pub mod error;
pub mod export;
pub mod grouping;
pub mod journal;
pub mod models;
pub mod store;
pub mod summary;
pub mod time;
pub mod trial_balance;
pub mod types;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use warungbook_config::DishPeriod;
use warungbook_utils::generate_id;

pub use cash_flow::{CashFlowItem, CashFlowStatement, MonthlyCashFlow};
pub use dish::{DishAnalysis, DishRanking, DishSummary};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use export::{Sheet, Workbook};
pub use journal::{GeneralJournal, JournalLine};
pub use models::{DishDraft, DishSaleEntry, Entries, ExpenseDraft, ExpenseEntry, IncomeDraft, IncomeEntry};
pub use store::{EntryStore, JsonFileStore, MemoryStore};
pub use summary::{AnnualOverview, MonthSummary, MonthlyOverview, YearSummary};
pub use trial_balance::{AccountBalance, TrialBalance};
pub use types::{AccountType, EntryKind, EntrySource};

use error::{DefaultErrorLogger, ErrorContext, ErrorLogger};

/// Store reference type
pub type StoreRef = Arc<dyn EntryStore>;

/// Entries addressable by id
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for IncomeEntry {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ExpenseEntry {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for DishSaleEntry {
    fn key(&self) -> &str {
        &self.id
    }
}

fn replace_by_id<T: Keyed>(list: &mut [T], item: T) -> bool {
    match list.iter_mut().find(|existing| existing.key() == item.key()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

fn remove_by_id<T: Keyed>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|item| item.key() != id);
    list.len() != before
}

/// The entry snapshot plus the store it came from
///
/// Mutations build a candidate snapshot, save it, and only then replace
/// the in-memory snapshot. A failed save leaves reports running on the
/// last snapshot that was saved successfully.
pub struct Book {
    store: StoreRef,
    entries: Entries,
    logger: Box<dyn ErrorLogger>,
}

impl Book {
    /// Create an empty book over a store without loading it
    pub fn new(store: StoreRef) -> Self {
        Self {
            store,
            entries: Entries::default(),
            logger: Box::new(DefaultErrorLogger),
        }
    }

    /// Create a book and load the stored snapshot
    pub async fn open(store: StoreRef) -> CoreResult<Self> {
        let mut book = Self::new(store);
        book.reload().await?;
        Ok(book)
    }

    /// Re-read the store; on failure the current snapshot stays
    pub async fn reload(&mut self) -> CoreResult<()> {
        match self.store.load().await {
            Ok(entries) => {
                log::info!(
                    target: "warungbook::book",
                    "Loaded {} income, {} expense and {} dish entries from {}",
                    entries.income.len(),
                    entries.expenses.len(),
                    entries.dishes.len(),
                    self.store.describe()
                );
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                self.logger.log_error(&e, &ErrorContext::new("reload"));
                Err(e)
            }
        }
    }

    /// Current snapshot
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    async fn commit(&mut self, candidate: Entries, context: ErrorContext) -> CoreResult<()> {
        if let Err(e) = self.store.save(&candidate).await {
            self.logger.log_error(&e, &context);
            self.logger.log_warning("Keeping the previous snapshot", &context);
            return Err(e);
        }
        self.entries = candidate;
        log::debug!(target: "warungbook::book", "Committed {}", context.operation);
        Ok(())
    }

    // ==================== Income ====================

    pub async fn add_income(&mut self, draft: IncomeDraft) -> CoreResult<IncomeEntry> {
        let entry = draft.into_entry(generate_id())?;
        let mut candidate = self.entries.clone();
        candidate.income.push(entry.clone());
        self.commit(candidate, ErrorContext::new("add_income").with_entry_id(&entry.id))
            .await?;
        Ok(entry)
    }

    pub async fn update_income(&mut self, id: &str, draft: IncomeDraft) -> CoreResult<IncomeEntry> {
        let entry = draft.into_entry(id.to_string())?;
        let mut candidate = self.entries.clone();
        if !replace_by_id(&mut candidate.income, entry.clone()) {
            return Err(CoreError::not_found(EntrySource::Income, id));
        }
        self.commit(candidate, ErrorContext::new("update_income").with_entry_id(id))
            .await?;
        Ok(entry)
    }

    pub async fn delete_income(&mut self, id: &str) -> CoreResult<()> {
        let mut candidate = self.entries.clone();
        if !remove_by_id(&mut candidate.income, id) {
            return Err(CoreError::not_found(EntrySource::Income, id));
        }
        self.commit(candidate, ErrorContext::new("delete_income").with_entry_id(id))
            .await
    }

    // ==================== Expenses ====================

    pub async fn add_expense(&mut self, draft: ExpenseDraft) -> CoreResult<ExpenseEntry> {
        let entry = draft.into_entry(generate_id())?;
        let mut candidate = self.entries.clone();
        candidate.expenses.push(entry.clone());
        self.commit(candidate, ErrorContext::new("add_expense").with_entry_id(&entry.id))
            .await?;
        Ok(entry)
    }

    pub async fn update_expense(&mut self, id: &str, draft: ExpenseDraft) -> CoreResult<ExpenseEntry> {
        let entry = draft.into_entry(id.to_string())?;
        let mut candidate = self.entries.clone();
        if !replace_by_id(&mut candidate.expenses, entry.clone()) {
            return Err(CoreError::not_found(EntrySource::Expense, id));
        }
        self.commit(candidate, ErrorContext::new("update_expense").with_entry_id(id))
            .await?;
        Ok(entry)
    }

    pub async fn delete_expense(&mut self, id: &str) -> CoreResult<()> {
        let mut candidate = self.entries.clone();
        if !remove_by_id(&mut candidate.expenses, id) {
            return Err(CoreError::not_found(EntrySource::Expense, id));
        }
        self.commit(candidate, ErrorContext::new("delete_expense").with_entry_id(id))
            .await
    }

    // ==================== Dishes ====================

    pub async fn add_dish(&mut self, draft: DishDraft) -> CoreResult<DishSaleEntry> {
        let entry = draft.into_entry(generate_id())?;
        let mut candidate = self.entries.clone();
        candidate.dishes.push(entry.clone());
        self.commit(candidate, ErrorContext::new("add_dish").with_entry_id(&entry.id))
            .await?;
        Ok(entry)
    }

    pub async fn update_dish(&mut self, id: &str, draft: DishDraft) -> CoreResult<DishSaleEntry> {
        let entry = draft.into_entry(id.to_string())?;
        let mut candidate = self.entries.clone();
        if !replace_by_id(&mut candidate.dishes, entry.clone()) {
            return Err(CoreError::not_found(EntrySource::Dish, id));
        }
        self.commit(candidate, ErrorContext::new("update_dish").with_entry_id(id))
            .await?;
        Ok(entry)
    }

    pub async fn delete_dish(&mut self, id: &str) -> CoreResult<()> {
        let mut candidate = self.entries.clone();
        if !remove_by_id(&mut candidate.dishes, id) {
            return Err(CoreError::not_found(EntrySource::Dish, id));
        }
        self.commit(candidate, ErrorContext::new("delete_dish").with_entry_id(id))
            .await
    }

    // ==================== Reports ====================

    pub fn annual_overview(&self) -> AnnualOverview {
        AnnualOverview::from_summaries(summary::annual_summaries(
            &self.entries.income,
            &self.entries.expenses,
            None,
        ))
    }

    pub fn monthly_overview(&self, year: i32) -> MonthlyOverview {
        MonthlyOverview::from_months(
            year,
            summary::monthly_summaries(&self.entries.income, &self.entries.expenses, year),
        )
    }

    pub fn available_years(&self) -> Vec<i32> {
        summary::available_years(&self.entries.income, &self.entries.expenses)
    }

    pub fn dish_analysis(&self, period: DishPeriod, today: NaiveDate, top_n: usize) -> DishAnalysis {
        dish::analyze(&self.entries.dishes, period, today, top_n)
    }

    pub fn general_journal(&self) -> GeneralJournal {
        GeneralJournal::build(&self.entries.income, &self.entries.expenses, &self.entries.dishes)
    }

    pub fn trial_balance(&self) -> TrialBalance {
        TrialBalance::build(&self.entries.income, &self.entries.expenses, &self.entries.dishes)
    }

    pub fn cash_flow(&self) -> CashFlowStatement {
        CashFlowStatement::build(&self.entries.income, &self.entries.expenses, &self.entries.dishes)
    }

    pub fn workbook(&self, today: NaiveDate) -> Workbook {
        Workbook::build(&self.entries, today)
    }
}

/// Trait for book-level queries
pub trait BookOperations {
    /// Dashboard totals
    fn summary(&self) -> BookSummary;

    /// Number of entries from one source
    fn count(&self, source: EntrySource) -> usize;
}

/// Dashboard totals
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
    pub dish_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl BookOperations for Book {
    fn summary(&self) -> BookSummary {
        let entries = &self.entries;
        let dates = entries
            .income
            .iter()
            .map(|e| e.date)
            .chain(entries.expenses.iter().map(|e| e.date))
            .chain(entries.dishes.iter().map(|e| e.date));
        let (first_date, last_date) = dates.fold((None, None), |(first, last), date| {
            (
                Some(first.map_or(date, |f: NaiveDate| f.min(date))),
                Some(last.map_or(date, |l: NaiveDate| l.max(date))),
            )
        });
        let total_income = entries.total_income();
        let total_expenses = entries.total_expenses();

        BookSummary {
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
            income_count: entries.income.len(),
            expense_count: entries.expenses.len(),
            dish_count: entries.dishes.len(),
            first_date,
            last_date,
        }
    }

    fn count(&self, source: EntrySource) -> usize {
        match source {
            EntrySource::Income => self.entries.income.len(),
            EntrySource::Expense => self.entries.expenses.len(),
            EntrySource::Dish => self.entries.dishes.len(),
        }
    }
}

// ==================== Tests ====================
