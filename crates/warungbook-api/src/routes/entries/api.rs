//! Entry API endpoints - JSON CRUD over the book

use crate::{ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use warungbook_core::{DishDraft, DishSaleEntry, ExpenseDraft, ExpenseEntry, IncomeDraft, IncomeEntry};

fn newest_first<T: Clone>(items: &[T], date: impl Fn(&T) -> chrono::NaiveDate) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| date(b).cmp(&date(a)));
    sorted
}

// ==================== Income ====================

pub async fn api_list_income(State(state): State<AppState>) -> Json<Vec<IncomeEntry>> {
    let book = state.book.read().await;
    Json(newest_first(&book.entries().income, |e| e.date))
}

pub async fn api_create_income(
    State(state): State<AppState>,
    Json(draft): Json<IncomeDraft>,
) -> ApiResult<(StatusCode, Json<IncomeEntry>)> {
    let mut book = state.book.write().await;
    let entry = book.add_income(draft).await?;
    log::info!(target: "warungbook::api", "Recorded income {} ({})", entry.id, entry.amount);
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn api_update_income(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<IncomeDraft>,
) -> ApiResult<Json<IncomeEntry>> {
    let mut book = state.book.write().await;
    Ok(Json(book.update_income(&id, draft).await?))
}

pub async fn api_delete_income(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let mut book = state.book.write().await;
    book.delete_income(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Expenses ====================

pub async fn api_list_expenses(State(state): State<AppState>) -> Json<Vec<ExpenseEntry>> {
    let book = state.book.read().await;
    Json(newest_first(&book.entries().expenses, |e| e.date))
}

pub async fn api_create_expense(
    State(state): State<AppState>,
    Json(draft): Json<ExpenseDraft>,
) -> ApiResult<(StatusCode, Json<ExpenseEntry>)> {
    let mut book = state.book.write().await;
    let entry = book.add_expense(draft).await?;
    log::info!(
        target: "warungbook::api",
        "Recorded expense {} ({} {})",
        entry.id,
        entry.category,
        entry.amount
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn api_update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ExpenseDraft>,
) -> ApiResult<Json<ExpenseEntry>> {
    let mut book = state.book.write().await;
    Ok(Json(book.update_expense(&id, draft).await?))
}

pub async fn api_delete_expense(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let mut book = state.book.write().await;
    book.delete_expense(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Dishes ====================

pub async fn api_list_dishes(State(state): State<AppState>) -> Json<Vec<DishSaleEntry>> {
    let book = state.book.read().await;
    Json(newest_first(&book.entries().dishes, |e| e.date))
}

pub async fn api_create_dish(
    State(state): State<AppState>,
    Json(draft): Json<DishDraft>,
) -> ApiResult<(StatusCode, Json<DishSaleEntry>)> {
    let mut book = state.book.write().await;
    let entry = book.add_dish(draft).await?;
    log::info!(
        target: "warungbook::api",
        "Recorded dish sale {} ({} x{})",
        entry.id,
        entry.name,
        entry.quantity
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn api_update_dish(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<DishDraft>,
) -> ApiResult<Json<DishSaleEntry>> {
    let mut book = state.book.write().await;
    Ok(Json(book.update_dish(&id, draft).await?))
}

pub async fn api_delete_dish(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let mut book = state.book.write().await;
    book.delete_dish(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
