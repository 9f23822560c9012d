//! Expense category table

use crate::accounts::LedgerAccount;
use crate::types::AccountType;
use serde::Serialize;

/// An expense category with its display and ledger mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub code: &'static str,
    pub label: &'static str,
    pub account_code: u16,
    pub account_name: &'static str,
    /// Outflow line label in the cash-flow statement
    pub cash_flow_label: &'static str,
}

impl Category {
    const fn new(
        code: &'static str,
        label: &'static str,
        account_code: u16,
        account_name: &'static str,
        cash_flow_label: &'static str,
    ) -> Self {
        Self { code, label, account_code, account_name, cash_flow_label }
    }

    /// Expense account this category posts to
    pub fn account(&self) -> LedgerAccount {
        LedgerAccount {
            code: self.account_code,
            name: self.account_name,
            account_type: AccountType::Expense,
        }
    }
}

pub const CATEGORIES: [Category; 12] = [
    Category::new("bahan_baku", "Bahan Baku", 520, "Beban Bahan Baku", "Pembelian Bahan Baku"),
    Category::new("operasional", "Operasional", 530, "Beban Operasional", "Beban Operasional"),
    Category::new("gaji", "Gaji Karyawan", 540, "Beban Gaji", "Pembayaran Gaji"),
    Category::new("sewa", "Sewa Tempat", 550, "Beban Sewa", "Pembayaran Sewa"),
    Category::new("listrik", "Listrik", 560, "Beban Listrik", "Pembayaran Listrik"),
    Category::new("air", "Air", 570, "Beban Air", "Pembayaran Air"),
    Category::new("gas", "Gas", 580, "Beban Gas", "Pembayaran Gas"),
    Category::new("transportasi", "Transportasi", 590, "Beban Transportasi", "Biaya Transportasi"),
    Category::new("pemasaran", "Pemasaran", 600, "Beban Pemasaran", "Biaya Pemasaran"),
    Category::new("perlengkapan", "Perlengkapan", 610, "Beban Perlengkapan", "Pembelian Perlengkapan"),
    Category::new("maintenance", "Perawatan", 620, "Beban Pemeliharaan", "Biaya Pemeliharaan"),
    Category::new("lainnya", "Lainnya", 690, "Beban Lain-lain", "Pengeluaran Lainnya"),
];

/// Fallback for codes outside the table
pub const OTHER: Category = CATEGORIES[11];

/// Normalise a category code: trimmed, lower-case, `-` read as `_`
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Look up a category; unknown codes map to [`OTHER`]
pub fn lookup(code: &str) -> &'static Category {
    let code = normalize_code(code);
    CATEGORIES
        .iter()
        .find(|c| c.code == code)
        .unwrap_or(&OTHER)
}

/// Display label for a category code
pub fn label(code: &str) -> &'static str {
    lookup(code).label
}

/// All categories, in account order
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}
