//! Route modules for the API server
//!
//! - entries: income, expense and dish sale CRUD
//! - reports: recaps, dish analysis, journal, trial balance, cash flow
//! - export: workbook as JSON or xlsx, one sheet as CSV
//!
//! Report modules follow the same layout:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX page rendering

pub mod entries;
pub mod export;
pub mod reports;
