//! Monthly and annual income/expense recaps

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::grouping::{group_fold, percent, safe_div};
use crate::models::{ExpenseEntry, IncomeEntry};
use crate::time::{month_name, Dated, YearMonth};
use crate::types::EntryKind;

/// Totals for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
    /// Profit as a share of income, 0 for a year without income
    pub profit_margin_pct: Decimal,
    pub transaction_count: usize,
}

/// Totals for one calendar month, split by entry kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
    pub transaction_count: usize,
    pub daily_income: Decimal,
    pub monthly_income: Decimal,
    pub daily_expense: Decimal,
    pub monthly_expense: Decimal,
}

#[derive(Clone, Copy)]
enum Direction {
    In,
    Out,
}

/// One income or expense amount, stripped to what the recaps need
#[derive(Clone, Copy)]
struct Movement {
    date: NaiveDate,
    amount: Decimal,
    kind: EntryKind,
    direction: Direction,
}

fn movements<'a>(
    income: &'a [IncomeEntry],
    expenses: &'a [ExpenseEntry],
) -> impl Iterator<Item = Movement> + 'a {
    let incoming = income.iter().map(|e| Movement {
        date: e.date(),
        amount: e.amount,
        kind: e.kind,
        direction: Direction::In,
    });
    let outgoing = expenses.iter().map(|e| Movement {
        date: e.date(),
        amount: e.amount,
        kind: e.kind,
        direction: Direction::Out,
    });
    incoming.chain(outgoing)
}

#[derive(Debug, Default, Clone, Copy)]
struct PeriodTotals {
    daily_income: Decimal,
    monthly_income: Decimal,
    daily_expense: Decimal,
    monthly_expense: Decimal,
    count: usize,
}

impl PeriodTotals {
    fn add(&mut self, movement: Movement) {
        let slot = match (movement.direction, movement.kind) {
            (Direction::In, EntryKind::Daily) => &mut self.daily_income,
            (Direction::In, EntryKind::Monthly) => &mut self.monthly_income,
            (Direction::Out, EntryKind::Daily) => &mut self.daily_expense,
            (Direction::Out, EntryKind::Monthly) => &mut self.monthly_expense,
        };
        *slot += movement.amount;
        self.count += 1;
    }

    fn income(&self) -> Decimal {
        self.daily_income + self.monthly_income
    }

    fn expense(&self) -> Decimal {
        self.daily_expense + self.monthly_expense
    }

    fn month_summary(&self, year: i32, month: u32) -> MonthSummary {
        MonthSummary {
            year,
            month,
            month_name: month_name(month),
            income: self.income(),
            expense: self.expense(),
            profit: self.income() - self.expense(),
            transaction_count: self.count,
            daily_income: self.daily_income,
            monthly_income: self.monthly_income,
            daily_expense: self.daily_expense,
            monthly_expense: self.monthly_expense,
        }
    }
}

/// One summary per year that has at least one entry, oldest first
pub fn annual_summaries(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    year_filter: Option<i32>,
) -> Vec<YearSummary> {
    let relevant = movements(income, expenses)
        .filter(|m| year_filter.map_or(true, |year| m.date.year() == year));
    group_fold(relevant, |m| m.date.year(), |totals: &mut PeriodTotals, m| totals.add(m))
        .into_iter()
        .map(|(year, totals)| {
            let profit = totals.income() - totals.expense();
            YearSummary {
                year,
                income: totals.income(),
                expense: totals.expense(),
                profit,
                profit_margin_pct: percent(profit, totals.income()),
                transaction_count: totals.count,
            }
        })
        .collect()
}

/// Twelve summaries for the given year, empty months included
pub fn monthly_summaries(income: &[IncomeEntry], expenses: &[ExpenseEntry], year: i32) -> Vec<MonthSummary> {
    let relevant = movements(income, expenses).filter(|m| m.date.year() == year);
    let groups = group_fold(
        relevant,
        |m| YearMonth::of(&m.date).month,
        |totals: &mut PeriodTotals, m| totals.add(m),
    );
    (1..=12)
        .map(|month| {
            groups
                .get(&month)
                .copied()
                .unwrap_or_default()
                .month_summary(year, month)
        })
        .collect()
}

/// Summary for a single month; `None` for a month outside 1..=12
pub fn month_summary(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    year: i32,
    month: u32,
) -> Option<MonthSummary> {
    let key = YearMonth::new(year, month)?;
    let mut totals = PeriodTotals::default();
    movements(income, expenses)
        .filter(|m| YearMonth::of(&m.date) == key)
        .for_each(|m| totals.add(m));
    Some(totals.month_summary(year, month))
}

/// Distinct years with income or expense entries, newest first
pub fn available_years(income: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Vec<i32> {
    let years: BTreeSet<i32> = income
        .iter()
        .map(|e| e.year())
        .chain(expenses.iter().map(|e| e.year()))
        .collect();
    years.into_iter().rev().collect()
}

/// Multi-year recap with derived indicators
#[derive(Debug, Clone, Serialize)]
pub struct AnnualOverview {
    pub years: Vec<YearSummary>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_profit: Decimal,
    pub average_profit: Decimal,
    pub total_transactions: usize,
    /// Year with the highest positive profit
    pub best_year: Option<YearSummary>,
    /// Profit change from the first to the last year, in percent
    pub growth_rate: Decimal,
}

impl AnnualOverview {
    pub fn from_summaries(years: Vec<YearSummary>) -> Self {
        let total_income = years.iter().map(|y| y.income).sum();
        let total_expense = years.iter().map(|y| y.expense).sum();
        let total_profit: Decimal = years.iter().map(|y| y.profit).sum();
        let total_transactions = years.iter().map(|y| y.transaction_count).sum();
        let average_profit = safe_div(total_profit, Decimal::from(years.len()));

        let best_year = years
            .iter()
            .filter(|y| y.profit > Decimal::ZERO)
            .fold(None::<&YearSummary>, |best, y| match best {
                Some(b) if b.profit >= y.profit => Some(b),
                _ => Some(y),
            })
            .copied();

        let growth_rate = match (years.first(), years.last()) {
            (Some(first), Some(last)) if years.len() >= 2 => {
                safe_div(last.profit - first.profit, first.profit.abs()) * Decimal::ONE_HUNDRED
            }
            _ => Decimal::ZERO,
        };

        Self {
            years,
            total_income,
            total_expense,
            total_profit,
            average_profit,
            total_transactions,
            best_year,
            growth_rate,
        }
    }
}

/// One year broken into months
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyOverview {
    pub year: i32,
    pub months: Vec<MonthSummary>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_profit: Decimal,
    /// Year profit spread over twelve months
    pub average_monthly_profit: Decimal,
    pub total_transactions: usize,
    pub best_month: Option<MonthSummary>,
}

impl MonthlyOverview {
    pub fn from_months(year: i32, months: Vec<MonthSummary>) -> Self {
        let total_income = months.iter().map(|m| m.income).sum();
        let total_expense = months.iter().map(|m| m.expense).sum();
        let total_profit: Decimal = months.iter().map(|m| m.profit).sum();
        let total_transactions = months.iter().map(|m| m.transaction_count).sum();
        let best_month = months
            .iter()
            .filter(|m| m.profit > Decimal::ZERO)
            .fold(None::<&MonthSummary>, |best, m| match best {
                Some(b) if b.profit >= m.profit => Some(b),
                _ => Some(m),
            })
            .copied();

        Self {
            year,
            total_income,
            total_expense,
            total_profit,
            average_monthly_profit: safe_div(total_profit, Decimal::from(12)),
            total_transactions,
            best_month,
            months,
        }
    }
}
