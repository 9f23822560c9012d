//! Spreadsheet export: one sheet per entry list plus a totals sheet

use chrono::NaiveDate;
use csv::Writer;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::models::Entries;

/// A named table of text cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Serialise as CSV with a header row
    pub fn to_csv(&self) -> CoreResult<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        let bytes = writer.into_inner().map_err(|e| CoreError::Export {
            message: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| CoreError::Export {
            message: e.to_string(),
        })
    }
}

/// Columns written as numbers in the xlsx file
const NUMERIC_HEADERS: [&str; 5] = ["Jumlah", "Pendapatan", "Biaya", "Kuantitas", "Keuntungan"];

#[derive(Debug, Clone, Serialize)]
pub struct Workbook {
    /// File name without extension
    pub file_stem: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Build the four export sheets from a snapshot
    pub fn build(entries: &Entries, today: NaiveDate) -> Self {
        let income = Sheet {
            name: "Pemasukan",
            headers: vec!["Tanggal", "Jumlah", "Keterangan", "Tipe"],
            rows: entries
                .income
                .iter()
                .map(|e| {
                    vec![
                        e.date.to_string(),
                        e.amount.to_string(),
                        e.description.clone(),
                        e.kind.to_string(),
                    ]
                })
                .collect(),
        };

        let expenses = Sheet {
            name: "Pengeluaran",
            headers: vec!["Tanggal", "Jumlah", "Keterangan", "Kategori", "Tipe"],
            rows: entries
                .expenses
                .iter()
                .map(|e| {
                    vec![
                        e.date.to_string(),
                        e.amount.to_string(),
                        e.description.clone(),
                        e.category.clone(),
                        e.kind.to_string(),
                    ]
                })
                .collect(),
        };

        let dishes = Sheet {
            name: "Menu",
            headers: vec!["Tanggal", "Nama Menu", "Pendapatan", "Biaya", "Kuantitas", "Keuntungan"],
            rows: entries
                .dishes
                .iter()
                .map(|e| {
                    vec![
                        e.date.to_string(),
                        e.name.clone(),
                        e.unit_revenue.to_string(),
                        e.unit_cost.to_string(),
                        e.quantity.to_string(),
                        e.profit().to_string(),
                    ]
                })
                .collect(),
        };

        let total_income = entries.total_income();
        let total_expenses = entries.total_expenses();
        let summary = Sheet {
            name: "Ringkasan",
            headers: vec!["Kategori", "Jumlah"],
            rows: vec![
                vec!["Total Pemasukan".to_string(), total_income.to_string()],
                vec!["Total Pengeluaran".to_string(), total_expenses.to_string()],
                vec!["Keuntungan Bersih".to_string(), (total_income - total_expenses).to_string()],
            ],
        };

        Self {
            file_stem: format!("laporan-warung-{}", today.format("%Y-%m-%d")),
            sheets: vec![income, expenses, dishes, summary],
        }
    }

    /// Find a sheet by name, ignoring case
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// All sheets in one `.xlsx` file
    pub fn to_xlsx(&self) -> CoreResult<Vec<u8>> {
        let mut xlsx = self.xlsx_workbook()?;
        Ok(xlsx.save_to_buffer()?)
    }

    fn xlsx_workbook(&self) -> CoreResult<XlsxWorkbook> {
        let mut xlsx = XlsxWorkbook::new();
        let bold = Format::new().set_bold();

        for sheet in &self.sheets {
            let worksheet = xlsx.add_worksheet();
            worksheet.set_name(sheet.name)?;
            for (col, header) in (0u16..).zip(&sheet.headers) {
                worksheet.write_string_with_format(0, col, *header, &bold)?;
            }
            for (row, cells) in (1u32..).zip(&sheet.rows) {
                for ((col, header), cell) in (0u16..).zip(&sheet.headers).zip(cells) {
                    match cell.parse::<f64>() {
                        Ok(number) if NUMERIC_HEADERS.contains(header) => {
                            worksheet.write_number(row, col, number)?;
                        }
                        _ => {
                            worksheet.write_string(row, col, cell.as_str())?;
                        }
                    }
                }
            }
        }
        log::debug!(
            target: "warungbook::export",
            "Built {}.xlsx with {} sheets",
            self.file_stem,
            self.sheets.len()
        );
        Ok(xlsx)
    }
}
