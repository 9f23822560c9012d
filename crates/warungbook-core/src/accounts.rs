//! Chart of accounts

use crate::category;
use crate::types::AccountType;
use serde::Serialize;

/// A ledger account in the fixed chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LedgerAccount {
    pub code: u16,
    pub name: &'static str,
    pub account_type: AccountType,
}

impl LedgerAccount {
    /// `"110 - Kas"`
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

pub const CASH: LedgerAccount = LedgerAccount {
    code: 110,
    name: "Kas",
    account_type: AccountType::Asset,
};

pub const INVENTORY: LedgerAccount = LedgerAccount {
    code: 120,
    name: "Persediaan Bahan Baku",
    account_type: AccountType::Asset,
};

pub const SALES_REVENUE: LedgerAccount = LedgerAccount {
    code: 410,
    name: "Pendapatan Penjualan",
    account_type: AccountType::Revenue,
};

pub const COST_OF_GOODS_SOLD: LedgerAccount = LedgerAccount {
    code: 510,
    name: "Harga Pokok Penjualan",
    account_type: AccountType::Expense,
};

/// The whole chart: base accounts followed by one expense account per category
pub fn chart_of_accounts() -> Vec<LedgerAccount> {
    let mut chart = vec![CASH, INVENTORY, SALES_REVENUE, COST_OF_GOODS_SOLD];
    chart.extend(category::categories().iter().map(|c| c.account()));
    chart
}

/// Expense account for a free-text category code
pub fn expense_account(category_code: &str) -> LedgerAccount {
    category::lookup(category_code).account()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_has_sixteen_unique_codes() {
        let chart = chart_of_accounts();
        assert_eq!(chart.len(), 16);
        let mut codes: Vec<u16> = chart.iter().map(|a| a.code).collect();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn test_expense_account_lookup() {
        assert_eq!(expense_account("gas").name, "Beban Gas");
        assert_eq!(expense_account("unknown").code, 690);
        assert_eq!(CASH.display_name(), "110 - Kas");
    }
}
