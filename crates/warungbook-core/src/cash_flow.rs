//! Monthly cash-flow statement with a carried cash balance

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::category::{self, Category};
use crate::grouping::group_fold;
use crate::models::{DishSaleEntry, ExpenseEntry, IncomeEntry};
use crate::time::{Dated, YearMonth};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowItem {
    pub label: String,
    pub amount: Decimal,
}

impl CashFlowItem {
    fn new(label: String, amount: Decimal) -> Self {
        Self { label, amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashFlow {
    pub year: i32,
    pub month: u32,
    /// e.g. "Januari 2024"
    pub label: String,
    pub inflows: Vec<CashFlowItem>,
    pub outflows: Vec<CashFlowItem>,
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    pub net_operating: Decimal,
    pub beginning_cash: Decimal,
    pub ending_cash: Decimal,
}

/// Per-month totals before they become line items
#[derive(Debug, Default)]
struct MonthBucket {
    income_total: Decimal,
    income_count: usize,
    dish_revenue: Decimal,
    dish_cost: Decimal,
    dish_count: usize,
    /// Keyed by account code so outflows follow the chart order
    expenses: BTreeMap<u16, (&'static Category, Decimal)>,
}

enum CashEvent<'a> {
    Income(&'a IncomeEntry),
    Expense(&'a ExpenseEntry),
    Dish(&'a DishSaleEntry),
}

impl CashEvent<'_> {
    fn month(&self) -> YearMonth {
        match self {
            CashEvent::Income(e) => e.year_month(),
            CashEvent::Expense(e) => e.year_month(),
            CashEvent::Dish(e) => e.year_month(),
        }
    }
}

impl MonthBucket {
    fn add(&mut self, event: CashEvent<'_>) {
        match event {
            CashEvent::Income(e) => {
                self.income_total += e.amount;
                self.income_count += 1;
            }
            CashEvent::Expense(e) => {
                let category = category::lookup(&e.category);
                let slot = self
                    .expenses
                    .entry(category.account_code)
                    .or_insert((category, Decimal::ZERO));
                slot.1 += e.amount;
            }
            CashEvent::Dish(e) => {
                self.dish_revenue += e.revenue();
                self.dish_cost += e.cost();
                self.dish_count += 1;
            }
        }
    }

    fn inflows(&self) -> Vec<CashFlowItem> {
        let mut items = Vec::new();
        if self.income_count > 0 {
            items.push(CashFlowItem::new(
                format!("Pendapatan Penjualan ({} transaksi)", self.income_count),
                self.income_total,
            ));
        }
        if self.dish_count > 0 {
            items.push(CashFlowItem::new(
                format!("Penjualan Menu ({} item)", self.dish_count),
                self.dish_revenue,
            ));
        }
        items
    }

    fn outflows(&self) -> Vec<CashFlowItem> {
        let mut items: Vec<CashFlowItem> = self
            .expenses
            .values()
            .map(|(category, amount)| CashFlowItem::new(category.cash_flow_label.to_string(), *amount))
            .collect();
        if self.dish_count > 0 {
            items.push(CashFlowItem::new(
                format!("Biaya Bahan Baku Menu ({} item)", self.dish_count),
                self.dish_cost,
            ));
        }
        items
    }
}

/// Months from the earliest to the latest entry, newest first
pub fn monthly_cash_flows(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    dishes: &[DishSaleEntry],
) -> Vec<MonthlyCashFlow> {
    let events = income
        .iter()
        .map(CashEvent::Income)
        .chain(expenses.iter().map(CashEvent::Expense))
        .chain(dishes.iter().map(CashEvent::Dish));
    let buckets = group_fold(events, |e| e.month(), |bucket: &mut MonthBucket, e| bucket.add(e));

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let empty = MonthBucket::default();
    let mut cash = Decimal::ZERO;
    let mut months: Vec<MonthlyCashFlow> = YearMonth::range_inclusive(first, last)
        .into_iter()
        .map(|month| {
            let bucket = buckets.get(&month).unwrap_or(&empty);
            let inflows = bucket.inflows();
            let outflows = bucket.outflows();
            let total_inflow: Decimal = inflows.iter().map(|i| i.amount).sum();
            let total_outflow: Decimal = outflows.iter().map(|i| i.amount).sum();
            let net_operating = total_inflow - total_outflow;
            let beginning_cash = cash;
            cash += net_operating;
            MonthlyCashFlow {
                year: month.year,
                month: month.month,
                label: month.label(),
                inflows,
                outflows,
                total_inflow,
                total_outflow,
                net_operating,
                beginning_cash,
                ending_cash: cash,
            }
        })
        .collect();

    months.reverse();
    months
}

/// The monthly flows plus statement totals
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowStatement {
    pub months: Vec<MonthlyCashFlow>,
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    pub net_cash_flow: Decimal,
    /// Ending cash of the latest month
    pub current_cash: Decimal,
}

impl CashFlowStatement {
    pub fn build(income: &[IncomeEntry], expenses: &[ExpenseEntry], dishes: &[DishSaleEntry]) -> Self {
        let months = monthly_cash_flows(income, expenses, dishes);
        Self {
            total_inflow: months.iter().map(|m| m.total_inflow).sum(),
            total_outflow: months.iter().map(|m| m.total_outflow).sum(),
            net_cash_flow: months.iter().map(|m| m.net_operating).sum(),
            current_cash: months.first().map(|m| m.ending_cash).unwrap_or_default(),
            months,
        }
    }
}
