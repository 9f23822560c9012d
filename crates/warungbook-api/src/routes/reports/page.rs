//! Reports page rendering - Full page endpoints

use crate::{format_amount, page_response, AppState};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use std::collections::HashMap;
use warungbook_config::CurrencyConfig;
use warungbook_core::time::{today, PeriodFilter};
use warungbook_core::{
    BookOperations, BookSummary, CashFlowStatement, DishAnalysis, GeneralJournal, MonthlyOverview, TrialBalance,
};
use warungbook_utils::{format_percent, sanitize_html};

use super::api::{selected_period, selected_year};

fn card(title: &str, value: &str, tone: &str) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-5'><div class='text-sm text-gray-500'>{}</div><div class='text-2xl font-bold {}'>{}</div></div>"#,
        title, tone, value
    )
}

fn tone(amount: rust_decimal::Decimal) -> &'static str {
    if amount.is_sign_negative() {
        "text-red-600"
    } else {
        "text-green-700"
    }
}

fn error_box(message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 text-red-700 rounded-lg p-4'>{}</div>"#,
        sanitize_html(message)
    )
}

pub fn render_summary_cards(summary: &BookSummary, currency: &CurrencyConfig) -> String {
    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>{}{}{}</div>"#,
        card("Total Pemasukan", &format_amount(currency, summary.total_income), "text-green-700"),
        card("Total Pengeluaran", &format_amount(currency, summary.total_expenses), "text-red-600"),
        card("Laba Bersih", &format_amount(currency, summary.net_profit), tone(summary.net_profit)),
    )
}

pub fn render_monthly_recap(overview: &MonthlyOverview, years: &[i32], currency: &CurrencyConfig) -> String {
    let options: String = years
        .iter()
        .map(|y| {
            let selected = if *y == overview.year { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", y, selected, y)
        })
        .collect();

    let mut html = format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
        <div class='flex justify-between items-center mb-4'>
            <h3 class='text-lg font-bold'>Rekap Bulanan {}</h3>
            <select name='year' hx-get='/' hx-target='main' hx-swap='outerHTML' class='border rounded px-2 py-1'>{}</select>
        </div>
        <table class='w-full text-sm'><thead class='bg-gray-50'><tr>
            <th class='px-3 py-2 text-left'>Bulan</th><th class='px-3 py-2 text-right'>Pemasukan</th>
            <th class='px-3 py-2 text-right'>Pengeluaran</th><th class='px-3 py-2 text-right'>Laba</th>
            <th class='px-3 py-2 text-right'>Transaksi</th></tr></thead><tbody>"#,
        overview.year, options
    );
    for month in &overview.months {
        html.push_str(&format!(
            r#"<tr class='border-b'><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right {}'>{}</td><td class='px-3 py-2 text-right'>{}</td></tr>"#,
            month.month_name,
            format_amount(currency, month.income),
            format_amount(currency, month.expense),
            tone(month.profit),
            format_amount(currency, month.profit),
            month.transaction_count
        ));
    }
    html.push_str(&format!(
        r#"</tbody><tfoot class='font-bold'><tr><td class='px-3 py-2'>Total</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td></tr></tfoot></table>"#,
        format_amount(currency, overview.total_income),
        format_amount(currency, overview.total_expense),
        format_amount(currency, overview.total_profit),
        overview.total_transactions
    ));

    let best = overview
        .best_month
        .map(|m| format!("{} ({})", m.month_name, format_amount(currency, m.profit)))
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&format!(
        r#"<div class='mt-4 text-sm text-gray-600'>Rata-rata laba per bulan: {} &middot; Bulan terbaik: {}</div></div>"#,
        format_amount(currency, overview.average_monthly_profit),
        best
    ));
    html
}

pub fn render_dish_panel(analysis: &DishAnalysis, currency: &CurrencyConfig) -> String {
    let mut html = format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'><h3 class='text-lg font-bold mb-4'>Menu Terlaris ({})</h3>"#,
        analysis.period.description()
    );
    if analysis.summaries.is_empty() {
        html.push_str("<p class='text-gray-500'>Belum ada penjualan menu pada periode ini.</p></div>");
        return html;
    }

    let highlight = |title: &str, value: Option<String>| {
        format!(
            "<div class='flex justify-between py-1'><span class='text-gray-500'>{}</span><span class='font-medium'>{}</span></div>",
            title,
            value.unwrap_or_else(|| "-".to_string())
        )
    };
    html.push_str(&highlight(
        "Paling laku",
        analysis
            .best_seller
            .as_ref()
            .map(|d| format!("{} ({} porsi)", sanitize_html(&d.name), d.total_quantity)),
    ));
    html.push_str(&highlight(
        "Paling untung",
        analysis
            .most_profitable
            .as_ref()
            .map(|d| format!("{} ({})", sanitize_html(&d.name), format_amount(currency, d.total_profit))),
    ));
    html.push_str(&highlight(
        "Margin terbaik",
        analysis
            .best_margin
            .as_ref()
            .map(|d| format!("{} ({})", sanitize_html(&d.name), format_percent(d.profit_margin_pct))),
    ));

    html.push_str(
        r#"<table class='w-full text-sm mt-4'><thead class='bg-gray-50'><tr><th class='px-3 py-2 text-left'>Menu</th><th class='px-3 py-2 text-right'>Porsi</th><th class='px-3 py-2 text-right'>Laba</th><th class='px-3 py-2 text-right'>Margin</th></tr></thead><tbody>"#,
    );
    for dish in &analysis.top_by_profit {
        html.push_str(&format!(
            r#"<tr class='border-b'><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td></tr>"#,
            sanitize_html(&dish.name),
            dish.total_quantity,
            format_amount(currency, dish.total_profit),
            format_percent(dish.profit_margin_pct)
        ));
    }
    html.push_str("</tbody></table></div>");
    html
}

pub fn render_journal(journal: &GeneralJournal, currency: &CurrencyConfig) -> String {
    if journal.lines.is_empty() {
        return "<p class='text-gray-500'>Belum ada transaksi.</p>".to_string();
    }
    let mut html = String::from(
        r#"<div class='overflow-x-auto bg-white rounded-xl shadow-sm'><table class='w-full text-sm'><thead class='bg-gray-50'><tr>
        <th class='px-3 py-2 text-left'>No</th><th class='px-3 py-2 text-left'>Tanggal</th><th class='px-3 py-2 text-left'>Keterangan</th>
        <th class='px-3 py-2 text-left'>Akun</th><th class='px-3 py-2 text-right'>Debit</th><th class='px-3 py-2 text-right'>Kredit</th>
        <th class='px-3 py-2 text-left'>Ref</th></tr></thead><tbody>"#,
    );
    for line in &journal.lines {
        let amount = format_amount(currency, line.amount);
        html.push_str(&format!(
            r#"<tr class='border-t'><td class='px-3 py-2' rowspan='2'>{}</td><td class='px-3 py-2' rowspan='2'>{}</td><td class='px-3 py-2' rowspan='2'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'></td><td class='px-3 py-2 text-gray-500' rowspan='2'>{}</td></tr>
            <tr><td class='px-3 py-2 pl-8'>{}</td><td class='px-3 py-2 text-right'></td><td class='px-3 py-2 text-right'>{}</td></tr>"#,
            line.number,
            line.date.format("%d/%m/%Y"),
            sanitize_html(&line.description),
            line.debit_account.display_name(),
            amount,
            sanitize_html(&line.reference),
            line.credit_account.display_name(),
            amount
        ));
    }
    html.push_str(&format!(
        r#"</tbody><tfoot class='font-bold bg-gray-50'><tr><td class='px-3 py-2' colspan='4'>Total</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td></td></tr></tfoot></table></div>"#,
        format_amount(currency, journal.total_debit),
        format_amount(currency, journal.total_credit)
    ));
    html
}

pub fn render_trial_balance(tb: &TrialBalance, currency: &CurrencyConfig) -> String {
    let status = if tb.is_balanced {
        "<div class='bg-green-50 text-green-700 rounded-lg p-3 mb-4'>Seimbang</div>".to_string()
    } else {
        error_box(&format!(
            "Tidak seimbang, selisih {}",
            format_amount(currency, tb.difference)
        ))
    };

    let mut html = format!(
        r#"{}<div class='overflow-x-auto bg-white rounded-xl shadow-sm'><table class='w-full text-sm'><thead class='bg-gray-50'><tr>
        <th class='px-3 py-2 text-left'>Kode</th><th class='px-3 py-2 text-left'>Akun</th><th class='px-3 py-2 text-left'>Jenis</th>
        <th class='px-3 py-2 text-right'>Debit</th><th class='px-3 py-2 text-right'>Kredit</th><th class='px-3 py-2 text-right'>Saldo</th>
        </tr></thead><tbody>"#,
        status
    );
    for account in &tb.accounts {
        html.push_str(&format!(
            r#"<tr class='border-b'><td class='px-3 py-2'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right font-medium'>{}</td></tr>"#,
            account.code,
            account.name,
            account.account_type.label(),
            format_amount(currency, account.total_debit),
            format_amount(currency, account.total_credit),
            format_amount(currency, account.balance)
        ));
    }
    html.push_str(&format!(
        r#"</tbody><tfoot class='font-bold bg-gray-50'><tr><td class='px-3 py-2' colspan='3'>Total</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2 text-right'>{}</td><td></td></tr></tfoot></table></div>"#,
        format_amount(currency, tb.total_debit),
        format_amount(currency, tb.total_credit)
    ));
    html
}

pub fn render_cash_flow(statement: &CashFlowStatement, currency: &CurrencyConfig) -> String {
    let mut html = format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>{}{}{}</div>"#,
        card("Kas Masuk", &format_amount(currency, statement.total_inflow), "text-green-700"),
        card("Kas Keluar", &format_amount(currency, statement.total_outflow), "text-red-600"),
        card("Saldo Kas", &format_amount(currency, statement.current_cash), tone(statement.current_cash)),
    );

    let row = |label: &str, amount: String, class: &str| {
        format!(
            "<div class='flex justify-between py-1 {}'><span>{}</span><span>{}</span></div>",
            class, label, amount
        )
    };

    for month in &statement.months {
        html.push_str(&format!(
            r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-4'><h3 class='text-lg font-bold mb-3'>{}</h3>"#,
            month.label
        ));
        html.push_str(&row("Saldo awal", format_amount(currency, month.beginning_cash), "text-gray-500"));
        html.push_str("<div class='font-medium mt-2'>Penerimaan kas</div>");
        for item in &month.inflows {
            html.push_str(&row(item.label.as_str(), format_amount(currency, item.amount), "pl-4"));
        }
        html.push_str("<div class='font-medium mt-2'>Pengeluaran kas</div>");
        for item in &month.outflows {
            html.push_str(&row(item.label.as_str(), format!("({})", format_amount(currency, item.amount)), "pl-4"));
        }
        html.push_str(&row(
            "Arus kas bersih dari operasi",
            format_amount(currency, month.net_operating),
            "border-t mt-2 font-medium",
        ));
        html.push_str(&row("Saldo akhir", format_amount(currency, month.ending_cash), "font-bold"));
        html.push_str("</div>");
    }
    if statement.months.is_empty() {
        html.push_str("<p class='text-gray-500'>Belum ada transaksi.</p>");
    }
    html
}

pub async fn page_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let book = state.book.read().await;
    let currency = &state.config.currency;

    let mut inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Dasbor</h2><p class='text-sm text-gray-500'>Sumber data: {}</p></div>{}",
        sanitize_html(&book.store_description()),
        render_summary_cards(&book.summary(), currency)
    );

    match selected_year(&params, &book) {
        Ok(year) => inner_content.push_str(&render_monthly_recap(
            &book.monthly_overview(year),
            &book.available_years(),
            currency,
        )),
        Err(e) => inner_content.push_str(&error_box(&e.to_string())),
    }

    match selected_period(&params, state.config.reports.default_dish_period) {
        Ok(period) => {
            let analysis = book.dish_analysis(period, today(), state.config.reports.top_dishes);
            inner_content.push_str(&render_dish_panel(&analysis, currency));
        }
        Err(e) => inner_content.push_str(&error_box(&e.to_string())),
    }

    Html(page_response(&headers, "Dasbor", "/", &inner_content))
}

pub async fn page_journal(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let book = state.book.read().await;
    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Jurnal Umum</h2></div>{}",
        render_journal(&book.general_journal(), &state.config.currency)
    );
    Html(page_response(&headers, "Jurnal Umum", "/journal", &inner_content))
}

pub async fn page_trial_balance(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let book = state.book.read().await;
    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Neraca Saldo</h2></div>{}",
        render_trial_balance(&book.trial_balance(), &state.config.currency)
    );
    Html(page_response(&headers, "Neraca Saldo", "/trial-balance", &inner_content))
}

pub async fn page_cash_flow(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let book = state.book.read().await;
    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Laporan Arus Kas</h2></div>{}",
        render_cash_flow(&book.cash_flow(), &state.config.currency)
    );
    Html(page_response(&headers, "Arus Kas", "/cash-flow", &inner_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use warungbook_core::{ExpenseDraft, IncomeDraft};

    async fn january_state() -> AppState {
        let state = test_state();
        {
            let mut book = state.book.write().await;
            book.add_income(IncomeDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 10),
                amount: Some(Decimal::new(100000, 0)),
                ..Default::default()
            })
            .await
            .unwrap();
            book.add_expense(ExpenseDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 15),
                amount: Some(Decimal::new(40000, 0)),
                description: "<b>tabung</b>".to_string(),
                category: "gas".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let state = january_state().await;
        let Html(html) = page_dashboard(State(state), HeaderMap::new(), Query(HashMap::new())).await;
        assert!(html.contains("Rekap Bulanan 2024"));
        assert!(html.contains("Rp 60.000"));
        assert!(html.contains("Belum ada penjualan menu"));
    }

    #[tokio::test]
    async fn test_dashboard_reports_bad_year_inline() {
        let state = january_state().await;
        let mut params = HashMap::new();
        params.insert("year".to_string(), "abc".to_string());
        let Html(html) = page_dashboard(State(state), HeaderMap::new(), Query(params)).await;
        assert!(html.contains("Invalid year: abc"));
    }

    #[tokio::test]
    async fn test_journal_page_escapes_descriptions() {
        let state = january_state().await;
        let Html(html) = page_journal(State(state), HeaderMap::new()).await;
        assert!(html.contains("&lt;b&gt;tabung&lt;/b&gt;"));
        assert!(html.contains("110 - Kas"));
    }

    #[tokio::test]
    async fn test_trial_balance_and_cash_flow_pages() {
        let state = january_state().await;
        let Html(html) = page_trial_balance(State(state.clone()), HeaderMap::new()).await;
        assert!(html.contains("Seimbang"));

        let Html(html) = page_cash_flow(State(state), HeaderMap::new()).await;
        assert!(html.contains("Januari 2024"));
        assert!(html.contains("Saldo akhir"));
    }

    #[test]
    fn test_empty_journal_message() {
        let journal = GeneralJournal {
            lines: Vec::new(),
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
        };
        assert!(render_journal(&journal, &CurrencyConfig::default()).contains("Belum ada transaksi"));
    }
}
