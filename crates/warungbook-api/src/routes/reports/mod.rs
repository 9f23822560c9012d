//! Report routes - Recaps, dish analysis, journal, trial balance, cash flow
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_annual_report,
    api_cash_flow,
    api_dish_report,
    api_journal,
    api_monthly_report,
    api_trial_balance,
};

pub use page::{page_cash_flow, page_dashboard, page_journal, page_trial_balance};
