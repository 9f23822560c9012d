//! Export routes - Whole workbook as JSON or xlsx, single sheets as CSV downloads

use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use warungbook_core::time::today;
use warungbook_core::Workbook;

/// All four sheets as JSON
pub async fn api_export(State(state): State<AppState>) -> Json<Workbook> {
    let book = state.book.read().await;
    Json(book.workbook(today()))
}

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Every sheet in one xlsx attachment
pub async fn api_export_xlsx(State(state): State<AppState>) -> ApiResult<Response> {
    let book = state.book.read().await;
    let workbook = book.workbook(today());
    let bytes = workbook.to_xlsx()?;
    let filename = format!("{}.xlsx", workbook.file_stem);
    log::debug!(target: "warungbook::api", "Exporting {} ({} bytes)", filename, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    )
        .into_response())
}

/// One sheet as a CSV attachment, looked up by name ignoring case
pub async fn api_export_sheet(State(state): State<AppState>, Path(sheet): Path<String>) -> ApiResult<Response> {
    let book = state.book.read().await;
    let workbook = book.workbook(today());
    let found = workbook.sheet(&sheet).ok_or_else(|| ApiError::NotFound {
        resource: format!("sheet {}", sheet),
    })?;
    let csv = found.to_csv()?;
    let filename = format!("{}-{}.csv", workbook.file_stem, found.name.to_lowercase());
    log::debug!(target: "warungbook::api", "Exporting {} ({} rows)", filename, found.rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        csv,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use warungbook_core::IncomeDraft;

    #[tokio::test]
    async fn test_export_workbook_has_four_sheets() {
        let state = test_state();
        let Json(workbook) = api_export(State(state)).await;
        assert_eq!(workbook.sheets.len(), 4);
        assert!(workbook.file_stem.starts_with("laporan-warung-"));
    }

    #[tokio::test]
    async fn test_export_sheet_as_csv() {
        let state = test_state();
        state
            .book
            .write()
            .await
            .add_income(IncomeDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 10),
                amount: Some(Decimal::new(100000, 0)),
                ..Default::default()
            })
            .await
            .unwrap();

        let response = api_export_sheet(State(state), Path("PEMASUKAN".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.ends_with("-pemasukan.csv\""));
    }

    #[tokio::test]
    async fn test_export_xlsx_attachment() {
        let state = test_state();
        let response = api_export_xlsx(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap().to_str().unwrap(), XLSX_MIME);
        let disposition = headers.get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"laporan-warung-"));
        assert!(disposition.ends_with(".xlsx\""));
    }

    #[tokio::test]
    async fn test_unknown_sheet_is_not_found() {
        let state = test_state();
        let response = api_export_sheet(State(state), Path("neraca".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
