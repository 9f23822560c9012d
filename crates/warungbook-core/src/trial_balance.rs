//! Trial balance over the fixed chart of accounts

use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounts::{chart_of_accounts, LedgerAccount};
use crate::grouping::group_fold;
use crate::journal::{journal_lines, Posting};
use crate::models::{DishSaleEntry, ExpenseEntry, IncomeEntry};
use crate::types::AccountType;

/// Accumulated debits and credits of one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountBalance {
    pub code: u16,
    pub name: &'static str,
    pub account_type: AccountType,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Debit minus credit for debit-normal accounts, credit minus debit otherwise
    pub balance: Decimal,
}

#[derive(Debug, Default)]
struct Sides {
    debit: Decimal,
    credit: Decimal,
}

impl AccountBalance {
    fn new(account: LedgerAccount, sides: &Sides) -> Self {
        let balance = if account.account_type.is_debit_normal() {
            sides.debit - sides.credit
        } else {
            sides.credit - sides.debit
        };
        Self {
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            total_debit: sides.debit,
            total_credit: sides.credit,
            balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrialBalance {
    /// Accounts with any activity, by account code
    pub accounts: Vec<AccountBalance>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// total_debit − total_credit
    pub difference: Decimal,
    pub is_balanced: bool,
}

impl TrialBalance {
    /// Fold arbitrary postings into the chart
    pub fn from_postings(postings: impl IntoIterator<Item = Posting>) -> Self {
        let mut groups = group_fold(
            postings,
            |p| p.account,
            |sides: &mut Sides, p| {
                sides.debit += p.debit;
                sides.credit += p.credit;
            },
        );
        for account in chart_of_accounts() {
            groups.entry(account).or_default();
        }

        let accounts: Vec<AccountBalance> = groups
            .iter()
            .filter(|(_, sides)| !(sides.debit.is_zero() && sides.credit.is_zero()))
            .map(|(account, sides)| AccountBalance::new(*account, sides))
            .collect();

        let total_debit: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let total_credit: Decimal = accounts.iter().map(|a| a.total_credit).sum();
        let difference = total_debit - total_credit;
        let is_balanced = difference.is_zero();

        if !is_balanced {
            log::warn!(
                target: "warungbook::trial_balance",
                "Trial balance does not balance: debit {} credit {} difference {}",
                total_debit,
                total_credit,
                difference
            );
        }

        Self {
            accounts,
            total_debit,
            total_credit,
            difference,
            is_balanced,
        }
    }

    /// Trial balance of every recorded entry
    pub fn build(income: &[IncomeEntry], expenses: &[ExpenseEntry], dishes: &[DishSaleEntry]) -> Self {
        let lines = journal_lines(income, expenses, dishes);
        Self::from_postings(lines.iter().flat_map(|l| l.postings()))
    }

    pub fn account(&self, code: u16) -> Option<&AccountBalance> {
        self.accounts.iter().find(|a| a.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{CASH, SALES_REVENUE};
    use crate::types::EntryKind;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_january_example() {
        let income = vec![IncomeEntry {
            id: "i1".to_string(),
            date: d(2024, 1, 10),
            amount: Decimal::new(100000, 0),
            description: String::new(),
            kind: EntryKind::Daily,
        }];
        let expenses = vec![ExpenseEntry {
            id: "e1".to_string(),
            date: d(2024, 1, 15),
            amount: Decimal::new(40000, 0),
            description: String::new(),
            category: "gas".to_string(),
            kind: EntryKind::Daily,
        }];
        let tb = TrialBalance::build(&income, &expenses, &[]);

        let cash = tb.account(110).unwrap();
        assert_eq!(cash.total_debit, Decimal::new(100000, 0));
        assert_eq!(cash.total_credit, Decimal::new(40000, 0));
        assert_eq!(cash.balance, Decimal::new(60000, 0));

        let revenue = tb.account(410).unwrap();
        assert_eq!(revenue.total_credit, Decimal::new(100000, 0));
        assert_eq!(revenue.balance, Decimal::new(100000, 0));

        let gas = tb.account(580).unwrap();
        assert_eq!(gas.name, "Beban Gas");
        assert_eq!(gas.total_debit, Decimal::new(40000, 0));

        assert_eq!(tb.accounts.len(), 3);
        assert_eq!(tb.total_debit, Decimal::new(140000, 0));
        assert_eq!(tb.total_credit, Decimal::new(140000, 0));
        assert!(tb.is_balanced);
    }

    #[test]
    fn test_accounts_ordered_by_code() {
        let dishes = vec![DishSaleEntry {
            id: "d1".to_string(),
            date: d(2024, 1, 10),
            name: "Soto".to_string(),
            unit_revenue: Decimal::new(10000, 0),
            unit_cost: Decimal::new(4000, 0),
            quantity: 2,
        }];
        let tb = TrialBalance::build(&[], &[], &dishes);
        let codes: Vec<u16> = tb.accounts.iter().map(|a| a.code).collect();
        assert_eq!(codes, vec![110, 120, 410, 510]);
        assert_eq!(tb.account(120).unwrap().balance, Decimal::new(-8000, 0));
        assert!(tb.is_balanced);
    }

    #[test]
    fn test_unbalanced_postings_are_flagged() {
        let postings = vec![
            Posting::debit(CASH, Decimal::new(500, 0)),
            Posting::credit(SALES_REVENUE, Decimal::new(300, 0)),
        ];
        let tb = TrialBalance::from_postings(postings);
        assert!(!tb.is_balanced);
        assert_eq!(tb.difference, Decimal::new(200, 0));
    }

    #[test]
    fn test_empty_trial_balance() {
        let tb = TrialBalance::build(&[], &[], &[]);
        assert!(tb.accounts.is_empty());
        assert!(tb.is_balanced);
        assert_eq!(tb.total_debit, Decimal::ZERO);
    }
}
