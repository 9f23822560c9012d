//! Reports API endpoints - JSON views of every derived report

use crate::{ApiError, ApiResult, AppState};
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Datelike;
use std::collections::HashMap;
use warungbook_config::DishPeriod;
use warungbook_core::dish::{rank, DishRanking};
use warungbook_core::time::today;
use warungbook_core::{AnnualOverview, Book, CashFlowStatement, GeneralJournal, TrialBalance};

/// Requested `year`, else the latest year with entries, else the current year
pub(crate) fn selected_year(params: &HashMap<String, String>, book: &Book) -> ApiResult<i32> {
    match params.get("year").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| ApiError::BadRequest {
            message: format!("Invalid year: {}", raw),
        }),
        None => Ok(book
            .available_years()
            .first()
            .copied()
            .unwrap_or_else(|| today().year())),
    }
}

/// Requested `period`, else the configured default
pub(crate) fn selected_period(params: &HashMap<String, String>, default: DishPeriod) -> ApiResult<DishPeriod> {
    match params.get("period").filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse().map_err(|message| ApiError::BadRequest { message }),
        None => Ok(default),
    }
}

/// Twelve months of one year plus the years that have data
pub async fn api_monthly_report(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<serde_json::Value>> {
    let book = state.book.read().await;
    let year = selected_year(&params, &book)?;
    Ok(Json(serde_json::json!({
        "report": book.monthly_overview(year),
        "available_years": book.available_years(),
    })))
}

/// One row per year, oldest first, with growth across the range
pub async fn api_annual_report(State(state): State<AppState>) -> Json<AnnualOverview> {
    let book = state.book.read().await;
    Json(book.annual_overview())
}

/// Dish analysis for a period, with the full list ranked by `sort`
pub async fn api_dish_report(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<serde_json::Value>> {
    let period = selected_period(&params, state.config.reports.default_dish_period)?;
    let ranking = match params.get("sort").filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<DishRanking>()
            .map_err(|message| ApiError::BadRequest { message })?,
        None => DishRanking::MostProfitable,
    };

    let book = state.book.read().await;
    let analysis = book.dish_analysis(period, today(), state.config.reports.top_dishes);
    let ranked = rank(&analysis.summaries, ranking);
    Ok(Json(serde_json::json!({
        "sort": ranking,
        "ranked": ranked,
        "analysis": analysis,
    })))
}

pub async fn api_journal(State(state): State<AppState>) -> Json<GeneralJournal> {
    let book = state.book.read().await;
    Json(book.general_journal())
}

pub async fn api_trial_balance(State(state): State<AppState>) -> Json<TrialBalance> {
    let book = state.book.read().await;
    Json(book.trial_balance())
}

/// Monthly cash flow, newest month first
pub async fn api_cash_flow(State(state): State<AppState>) -> Json<CashFlowStatement> {
    let book = state.book.read().await;
    Json(book.cash_flow())
}
