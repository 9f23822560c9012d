//! General journal: one or two double-entry lines per recorded entry

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use warungbook_utils::short_ref;

use crate::accounts::{self, LedgerAccount, CASH, COST_OF_GOODS_SOLD, INVENTORY, SALES_REVENUE};
use crate::category;
use crate::models::{DishSaleEntry, ExpenseEntry, IncomeEntry};
use crate::types::EntrySource;

/// One debit/credit pair of equal amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalLine {
    /// 1-based position after sorting
    pub number: usize,
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: LedgerAccount,
    pub credit_account: LedgerAccount,
    pub amount: Decimal,
    pub reference: String,
    pub source: EntrySource,
}

/// A single-sided amount on one account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub account: LedgerAccount,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl Posting {
    pub fn debit(account: LedgerAccount, amount: Decimal) -> Self {
        Self { account, debit: amount, credit: Decimal::ZERO }
    }

    pub fn credit(account: LedgerAccount, amount: Decimal) -> Self {
        Self { account, debit: Decimal::ZERO, credit: amount }
    }
}

impl JournalLine {
    /// The debit and credit side of this line
    pub fn postings(&self) -> [Posting; 2] {
        [
            Posting::debit(self.debit_account, self.amount),
            Posting::credit(self.credit_account, self.amount),
        ]
    }
}

fn line(
    date: NaiveDate,
    description: String,
    debit_account: LedgerAccount,
    credit_account: LedgerAccount,
    amount: Decimal,
    reference: String,
    source: EntrySource,
) -> JournalLine {
    JournalLine {
        number: 0,
        date,
        description,
        debit_account,
        credit_account,
        amount,
        reference,
        source,
    }
}

fn income_line(entry: &IncomeEntry) -> JournalLine {
    let description = if entry.description.trim().is_empty() {
        SALES_REVENUE.name.to_string()
    } else {
        entry.description.clone()
    };
    line(
        entry.date,
        description,
        CASH,
        SALES_REVENUE,
        entry.amount,
        format!("INC-{}", short_ref(&entry.id)),
        EntrySource::Income,
    )
}

fn expense_line(entry: &ExpenseEntry) -> JournalLine {
    let description = if entry.description.trim().is_empty() {
        category::label(&entry.category).to_string()
    } else {
        entry.description.clone()
    };
    line(
        entry.date,
        description,
        accounts::expense_account(&entry.category),
        CASH,
        entry.amount,
        format!("EXP-{}", short_ref(&entry.id)),
        EntrySource::Expense,
    )
}

fn dish_lines(entry: &DishSaleEntry) -> [JournalLine; 2] {
    let id = short_ref(&entry.id);
    [
        line(
            entry.date,
            format!("Penjualan {} ({} porsi)", entry.name, entry.quantity),
            CASH,
            SALES_REVENUE,
            entry.revenue(),
            format!("DISH-{}-R", id),
            EntrySource::Dish,
        ),
        line(
            entry.date,
            format!("HPP {} ({} porsi)", entry.name, entry.quantity),
            COST_OF_GOODS_SOLD,
            INVENTORY,
            entry.cost(),
            format!("DISH-{}-C", id),
            EntrySource::Dish,
        ),
    ]
}

/// All journal lines in date order
///
/// Lines on the same date keep the order income, expense, dish pairs.
pub fn journal_lines(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    dishes: &[DishSaleEntry],
) -> Vec<JournalLine> {
    let mut lines: Vec<JournalLine> = income
        .iter()
        .map(income_line)
        .chain(expenses.iter().map(expense_line))
        .chain(dishes.iter().flat_map(dish_lines))
        .collect();

    lines.sort_by_key(|l| l.date);
    for (index, line) in lines.iter_mut().enumerate() {
        line.number = index + 1;
    }
    lines
}

/// Journal lines with column totals
#[derive(Debug, Clone, Serialize)]
pub struct GeneralJournal {
    pub lines: Vec<JournalLine>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl GeneralJournal {
    pub fn build(income: &[IncomeEntry], expenses: &[ExpenseEntry], dishes: &[DishSaleEntry]) -> Self {
        let lines = journal_lines(income, expenses, dishes);
        let (total_debit, total_credit) = lines
            .iter()
            .flat_map(|l| l.postings())
            .fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), p| {
                (debit + p.debit, credit + p.credit)
            });
        Self { lines, total_debit, total_credit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> (Vec<IncomeEntry>, Vec<ExpenseEntry>, Vec<DishSaleEntry>) {
        let income = vec![IncomeEntry {
            id: "income-000123".to_string(),
            date: d(2024, 1, 10),
            amount: Decimal::new(100000, 0),
            description: "Jualan pagi".to_string(),
            kind: EntryKind::Daily,
        }];
        let expenses = vec![ExpenseEntry {
            id: "expense-abcdef".to_string(),
            date: d(2024, 1, 5),
            amount: Decimal::new(40000, 0),
            description: String::new(),
            category: "gas".to_string(),
            kind: EntryKind::Daily,
        }];
        let dishes = vec![DishSaleEntry {
            id: "dish-99xyz1".to_string(),
            date: d(2024, 1, 10),
            name: "Nasi goreng".to_string(),
            unit_revenue: Decimal::new(15000, 0),
            unit_cost: Decimal::new(8000, 0),
            quantity: 10,
        }];
        (income, expenses, dishes)
    }

    #[test]
    fn test_lines_sorted_and_numbered() {
        let (income, expenses, dishes) = sample();
        let lines = journal_lines(&income, &expenses, &dishes);
        assert_eq!(lines.len(), 4);
        let refs: Vec<&str> = lines.iter().map(|l| l.reference.as_str()).collect();
        assert_eq!(refs, vec!["EXP-abcdef", "INC-000123", "DISH-99xyz1-R", "DISH-99xyz1-C"]);
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_line_accounts() {
        let (income, expenses, dishes) = sample();
        let lines = journal_lines(&income, &expenses, &dishes);

        assert_eq!(lines[0].debit_account.name, "Beban Gas");
        assert_eq!(lines[0].credit_account, CASH);
        assert_eq!(lines[0].description, "Gas");

        assert_eq!(lines[1].debit_account, CASH);
        assert_eq!(lines[1].credit_account, SALES_REVENUE);

        assert_eq!(lines[2].amount, Decimal::new(150000, 0));
        assert_eq!(lines[2].description, "Penjualan Nasi goreng (10 porsi)");
        assert_eq!(lines[3].debit_account, COST_OF_GOODS_SOLD);
        assert_eq!(lines[3].credit_account, INVENTORY);
        assert_eq!(lines[3].amount, Decimal::new(80000, 0));
        assert_eq!(lines[3].description, "HPP Nasi goreng (10 porsi)");
    }

    #[test]
    fn test_every_line_balances() {
        let (income, expenses, dishes) = sample();
        for line in journal_lines(&income, &expenses, &dishes) {
            let [debit, credit] = line.postings();
            assert_eq!(debit.debit, credit.credit);
            assert!(debit.credit.is_zero() && credit.debit.is_zero());
        }
    }

    #[test]
    fn test_general_journal_totals() {
        let (income, expenses, dishes) = sample();
        let journal = GeneralJournal::build(&income, &expenses, &dishes);
        assert_eq!(journal.total_debit, Decimal::new(370000, 0));
        assert_eq!(journal.total_debit, journal.total_credit);
        assert!(GeneralJournal::build(&[], &[], &[]).lines.is_empty());
    }
}
