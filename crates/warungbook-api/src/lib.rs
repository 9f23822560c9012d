//! HTTP API server and report pages
//!
//! Routes are organized into modules:
//! - routes::entries: income, expense and dish sale CRUD
//! - routes::reports: recaps, dish analysis, journal, trial balance, cash flow
//! - routes::export: workbook download

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use warungbook_config::{Config, CurrencyConfig};
use warungbook_core::category::{self, Category};
use warungbook_core::{Book, BookOperations, BookSummary};

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<RwLock<Book>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::entries::{
        api_create_dish, api_create_expense, api_create_income, api_delete_dish, api_delete_expense,
        api_delete_income, api_list_dishes, api_list_expenses, api_list_income, api_update_dish,
        api_update_expense, api_update_income,
    };
    use routes::export::{api_export, api_export_sheet, api_export_xlsx};
    use routes::reports::{
        api_annual_report, api_cash_flow, api_dish_report, api_journal, api_monthly_report,
        api_trial_balance, page_cash_flow, page_dashboard, page_journal, page_trial_balance,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/categories", get(api_categories))
        .route("/api/reload", post(api_reload))
        .route("/api/income", get(api_list_income).post(api_create_income))
        .route("/api/income/:id", put(api_update_income).delete(api_delete_income))
        .route("/api/expenses", get(api_list_expenses).post(api_create_expense))
        .route("/api/expenses/:id", put(api_update_expense).delete(api_delete_expense))
        .route("/api/dishes", get(api_list_dishes).post(api_create_dish))
        .route("/api/dishes/:id", put(api_update_dish).delete(api_delete_dish))
        .route("/api/reports/monthly", get(api_monthly_report))
        .route("/api/reports/annual", get(api_annual_report))
        .route("/api/reports/dishes", get(api_dish_report))
        .route("/api/reports/journal", get(api_journal))
        .route("/api/reports/trial-balance", get(api_trial_balance))
        .route("/api/reports/cash-flow", get(api_cash_flow))
        .route("/api/export", get(api_export))
        .route("/api/export/xlsx", get(api_export_xlsx))
        .route("/api/export/:sheet", get(api_export_sheet))
        // Pages
        .route("/", get(page_dashboard))
        .route("/journal", get(page_journal))
        .route("/trial-balance", get(page_trial_balance))
        .route("/cash-flow", get(page_cash_flow))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Dashboard totals (JSON API)
async fn api_summary(State(state): State<AppState>) -> Json<BookSummary> {
    let book = state.book.read().await;
    Json(book.summary())
}

/// Expense categories for form pickers
async fn api_categories() -> Json<&'static [Category]> {
    Json(category::categories())
}

/// Re-read the entry store
async fn api_reload(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let mut book = state.book.write().await;
    book.reload().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Data berhasil dimuat ulang",
        "entries": book.entries().len(),
    })))
}

// ==================== Template Functions ====================

/// Money in the configured currency style
pub fn format_amount(currency: &CurrencyConfig, amount: Decimal) -> String {
    warungbook_utils::format_money(
        amount,
        &currency.symbol,
        &currency.thousands_separator,
        currency.decimal_places,
    )
}

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Warungbook</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation bar across the top of every page
pub fn nav_bar(current_path: &str) -> String {
    let links = [
        ("/", "Dasbor"),
        ("/journal", "Jurnal Umum"),
        ("/trial-balance", "Neraca Saldo"),
        ("/cash-flow", "Arus Kas"),
    ];
    let items: String = links
        .iter()
        .map(|(href, label)| {
            let class = if *href == current_path {
                "px-3 py-2 rounded bg-green-700 text-white"
            } else {
                "px-3 py-2 rounded text-green-100 hover:bg-green-700"
            };
            format!(r#"<a href="{}" class="{}">{}</a>"#, href, class, label)
        })
        .collect();
    format!(
        r#"<nav class="bg-green-800 px-6 py-3 flex items-center gap-2"><span class="text-white font-bold mr-6">Warungbook</span>{}</nav>"#,
        items
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for a full page, or return it bare for an HTMX swap
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class="p-6">{}</main>"#, inner_content)
    } else {
        base_html(
            title,
            &format!(
                r#"{}<main class="max-w-6xl mx-auto p-6">{}</main>"#,
                nav_bar(current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
pub async fn start_server(config: Config, book: Arc<RwLock<Book>>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { book, config };
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "warungbook::api", "Starting warungbook server on http://{}", addr);
    log::info!(target: "warungbook::api", "Pages: /, /journal, /trial-balance, /cash-flow");
    log::info!(target: "warungbook::api", "JSON API under /api");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!(target: "warungbook::api", "Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!(target: "warungbook::api", "Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use warungbook_core::MemoryStore;

    pub fn test_state() -> AppState {
        AppState {
            book: Arc::new(RwLock::new(Book::new(Arc::new(MemoryStore::default())))),
            config: Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn test_format_amount_uses_currency_config() {
        let currency = CurrencyConfig::default();
        assert_eq!(format_amount(&currency, Decimal::new(1500000, 0)), "Rp 1.500.000");
    }

    #[test]
    fn test_page_response_full_and_partial() {
        let full = page_response(&HeaderMap::new(), "Jurnal", "/journal", "<p>isi</p>");
        assert!(full.starts_with("<!DOCTYPE html>"));
        assert!(full.contains("Jurnal - Warungbook"));

        let mut headers = HeaderMap::new();
        headers.insert("hx-request", "true".parse().unwrap());
        let partial = page_response(&headers, "Jurnal", "/journal", "<p>isi</p>");
        assert_eq!(partial, r#"<main class="p-6"><p>isi</p></main>"#);
    }

    #[tokio::test]
    async fn test_summary_and_reload() {
        let state = test_support::test_state();
        let Json(summary) = api_summary(State(state.clone())).await;
        assert_eq!(summary.income_count, 0);

        let Json(body) = api_reload(State(state)).await.unwrap();
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let Json(categories) = api_categories().await;
        assert_eq!(categories.len(), 12);
        assert_eq!(categories[0].code, "bahan_baku");
    }

    #[test]
    fn test_router_builds() {
        let _router = create_router(test_support::test_state());
    }
}
