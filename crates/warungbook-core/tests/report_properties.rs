//! Cross-report properties over a realistic entry set

use chrono::NaiveDate;
use rust_decimal::Decimal;
use warungbook_config::DishPeriod;
use warungbook_core::cash_flow::monthly_cash_flows;
use warungbook_core::dish::dish_summaries;
use warungbook_core::journal::journal_lines;
use warungbook_core::summary::{annual_summaries, monthly_summaries};
use warungbook_core::{
    CashFlowStatement, DishSaleEntry, EntryKind, ExpenseEntry, IncomeEntry, TrialBalance,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn income(id: &str, date: NaiveDate, amount: i64, kind: EntryKind) -> IncomeEntry {
    IncomeEntry {
        id: id.to_string(),
        date,
        amount: Decimal::new(amount, 0),
        description: String::new(),
        kind,
    }
}

fn expense(id: &str, date: NaiveDate, amount: i64, category: &str) -> ExpenseEntry {
    ExpenseEntry {
        id: id.to_string(),
        date,
        amount: Decimal::new(amount, 0),
        description: String::new(),
        category: category.to_string(),
        kind: EntryKind::Daily,
    }
}

fn dish(id: &str, date: NaiveDate, name: &str, revenue: i64, cost: i64, quantity: u32) -> DishSaleEntry {
    DishSaleEntry {
        id: id.to_string(),
        date,
        name: name.to_string(),
        unit_revenue: Decimal::new(revenue, 0),
        unit_cost: Decimal::new(cost, 0),
        quantity,
    }
}

struct Fixture {
    income: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
    dishes: Vec<DishSaleEntry>,
}

fn fixture() -> Fixture {
    Fixture {
        income: vec![
            income("inc-001", d(2023, 11, 2), 850000, EntryKind::Daily),
            income("inc-002", d(2023, 12, 1), 12000000, EntryKind::Monthly),
            income("inc-003", d(2024, 1, 10), 100000, EntryKind::Daily),
            income("inc-004", d(2024, 1, 11), 275000, EntryKind::Daily),
            income("inc-005", d(2024, 3, 1), 9500000, EntryKind::Monthly),
        ],
        expenses: vec![
            expense("exp-001", d(2023, 11, 5), 300000, "bahan_baku"),
            expense("exp-002", d(2023, 12, 1), 2500000, "sewa"),
            expense("exp-003", d(2024, 1, 15), 40000, "gas"),
            expense("exp-004", d(2024, 3, 20), 125000, "parkir"),
            expense("exp-005", d(2024, 3, 21), 600000, "listrik"),
        ],
        dishes: vec![
            dish("dish-01", d(2023, 12, 24), "Nasi goreng", 15000, 8000, 40),
            dish("dish-02", d(2024, 1, 10), "Mie ayam", 13000, 6500, 25),
            dish("dish-03", d(2024, 3, 2), "Nasi goreng", 16000, 8000, 30),
        ],
    }
}

#[test]
fn monthly_income_sums_to_annual_income() {
    let f = fixture();
    for year in annual_summaries(&f.income, &f.expenses, None) {
        let months = monthly_summaries(&f.income, &f.expenses, year.year);
        let income: Decimal = months.iter().map(|m| m.income).sum();
        let expense: Decimal = months.iter().map(|m| m.expense).sum();
        let count: usize = months.iter().map(|m| m.transaction_count).sum();
        assert_eq!(income, year.income);
        assert_eq!(expense, year.expense);
        assert_eq!(count, year.transaction_count);
    }
}

#[test]
fn every_journal_event_balances() {
    let f = fixture();
    let lines = journal_lines(&f.income, &f.expenses, &f.dishes);
    assert_eq!(lines.len(), f.income.len() + f.expenses.len() + 2 * f.dishes.len());
    for line in &lines {
        let [debit, credit] = line.postings();
        assert_eq!(debit.debit + credit.debit, debit.credit + credit.credit);
    }
    for pair in lines.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

#[test]
fn trial_balance_is_globally_balanced() {
    let f = fixture();
    let tb = TrialBalance::build(&f.income, &f.expenses, &f.dishes);
    assert!(tb.is_balanced);
    assert_eq!(tb.total_debit, tb.total_credit);
    assert!(tb.account(690).is_some(), "unknown category lands in the other bucket");

    let cash = tb.account(110).unwrap();
    assert_eq!(cash.balance, cash.total_debit - cash.total_credit);
    let revenue = tb.account(410).unwrap();
    assert_eq!(revenue.balance, revenue.total_credit - revenue.total_debit);
}

#[test]
fn cash_flow_carries_balance_forward() {
    let f = fixture();
    let months = monthly_cash_flows(&f.income, &f.expenses, &f.dishes);
    // November 2023 through March 2024
    assert_eq!(months.len(), 5);
    assert_eq!(months.last().unwrap().beginning_cash, Decimal::ZERO);
    for pair in months.windows(2) {
        let (later, earlier) = (&pair[0], &pair[1]);
        assert_eq!(later.beginning_cash, earlier.ending_cash);
        assert_eq!(later.ending_cash, later.beginning_cash + later.net_operating);
    }

    let statement = CashFlowStatement::build(&f.income, &f.expenses, &f.dishes);
    assert_eq!(statement.current_cash, statement.net_cash_flow);
}

#[test]
fn dish_aggregation_is_idempotent() {
    let f = fixture();
    let today = d(2024, 3, 31);
    let first = dish_summaries(&f.dishes, DishPeriod::All, today);
    let second = dish_summaries(&f.dishes, DishPeriod::All, today);
    assert_eq!(first, second);

    let nasi = first.iter().find(|s| s.name == "Nasi goreng").unwrap();
    assert_eq!(nasi.total_quantity, 70);
    assert_eq!(nasi.total_profit, Decimal::new(280000 + 240000, 0));
}

#[test]
fn january_worked_example() {
    let income = vec![income("a", d(2024, 1, 10), 100000, EntryKind::Daily)];
    let expenses = vec![expense("b", d(2024, 1, 15), 40000, "gas")];

    let january = monthly_summaries(&income, &expenses, 2024)[0];
    assert_eq!(january.income, Decimal::new(100000, 0));
    assert_eq!(january.expense, Decimal::new(40000, 0));
    assert_eq!(january.profit, Decimal::new(60000, 0));
    assert_eq!(january.transaction_count, 2);

    let tb = TrialBalance::build(&income, &expenses, &[]);
    let cash = tb.account(110).unwrap();
    assert_eq!((cash.total_debit, cash.total_credit), (Decimal::new(100000, 0), Decimal::new(40000, 0)));
    assert_eq!(cash.balance, Decimal::new(60000, 0));
    assert_eq!(tb.account(410).unwrap().total_credit, Decimal::new(100000, 0));
    assert_eq!(tb.account(580).unwrap().total_debit, Decimal::new(40000, 0));
    assert_eq!(tb.total_debit, Decimal::new(140000, 0));
    assert_eq!(tb.total_credit, Decimal::new(140000, 0));
}

#[test]
fn nasi_goreng_worked_example() {
    let dishes = vec![dish("n", d(2024, 1, 5), "Nasi goreng", 15000, 8000, 10)];
    let summary = &dish_summaries(&dishes, DishPeriod::All, d(2024, 1, 31))[0];
    assert_eq!(summary.total_profit, Decimal::new(70000, 0));
    assert_eq!(summary.profit_margin_pct.round_dp(1), Decimal::new(467, 1));
}

#[test]
fn empty_inputs_produce_no_periods() {
    assert!(monthly_cash_flows(&[], &[], &[]).is_empty());
    assert!(annual_summaries(&[], &[], None).is_empty());
    assert!(monthly_summaries(&[], &[], 2024).iter().all(|m| m.transaction_count == 0));
    assert!(dish_summaries(&[], DishPeriod::All, d(2024, 1, 1)).is_empty());
    let tb = TrialBalance::build(&[], &[], &[]);
    assert!(tb.accounts.is_empty() && tb.is_balanced);
}
