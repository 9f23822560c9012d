//! Basic enumerations shared by entries and reports

use serde::{Deserialize, Serialize};

/// Ledger account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset accounts (cash, inventory)
    Asset,
    /// Liability accounts
    Liability,
    /// Equity accounts (owner's equity)
    Equity,
    /// Revenue accounts (sales)
    Revenue,
    /// Expense accounts (cost of goods, operating expenses)
    Expense,
}

impl AccountType {
    /// Whether the account grows on the debit side
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }

    /// Indonesian label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Asset => "Aset",
            AccountType::Liability => "Kewajiban",
            AccountType::Equity => "Ekuitas",
            AccountType::Revenue => "Pendapatan",
            AccountType::Expense => "Beban",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" | "assets" => Ok(AccountType::Asset),
            "liability" | "liabilities" => Ok(AccountType::Liability),
            "equity" => Ok(AccountType::Equity),
            "revenue" | "income" => Ok(AccountType::Revenue),
            "expense" | "expenses" => Ok(AccountType::Expense),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Asset => write!(f, "asset"),
            AccountType::Liability => write!(f, "liability"),
            AccountType::Equity => write!(f, "equity"),
            AccountType::Revenue => write!(f, "revenue"),
            AccountType::Expense => write!(f, "expense"),
        }
    }
}

/// Recording granularity of an income or expense entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Recorded per day
    Daily,
    /// Recorded once for a whole month
    Monthly,
}

impl EntryKind {
    /// Indonesian label used in tables and exports
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Daily => "Harian",
            EntryKind::Monthly => "Bulanan",
        }
    }
}

impl Default for EntryKind {
    fn default() -> Self {
        EntryKind::Daily
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "harian" => Ok(EntryKind::Daily),
            "monthly" | "bulanan" => Ok(EntryKind::Monthly),
            _ => Err(format!("Invalid entry kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Daily => write!(f, "daily"),
            EntryKind::Monthly => write!(f, "monthly"),
        }
    }
}

/// Which entry list a derived line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Income,
    Expense,
    Dish,
}

impl std::fmt::Display for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySource::Income => write!(f, "income"),
            EntrySource::Expense => write!(f, "expense"),
            EntrySource::Dish => write!(f, "dish"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_from_str() {
        assert_eq!("asset".parse::<AccountType>().unwrap(), AccountType::Asset);
        assert_eq!("liabilities".parse::<AccountType>().unwrap(), AccountType::Liability);
        assert_eq!("equity".parse::<AccountType>().unwrap(), AccountType::Equity);
        assert_eq!("revenue".parse::<AccountType>().unwrap(), AccountType::Revenue);
        assert_eq!("expenses".parse::<AccountType>().unwrap(), AccountType::Expense);
        assert!("cash".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_debit_normal_accounts() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
    }

    #[test]
    fn test_entry_kind_serde() {
        assert_eq!(serde_json::to_string(&EntryKind::Monthly).unwrap(), "\"monthly\"");
        let kind: EntryKind = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(kind, EntryKind::Daily);
        assert_eq!("Bulanan".parse::<EntryKind>().unwrap(), EntryKind::Monthly);
    }
}
