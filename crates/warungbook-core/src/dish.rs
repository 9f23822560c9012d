//! Dish profitability analysis

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use warungbook_config::DishPeriod;

use crate::grouping::{group_fold, percent, safe_div};
use crate::models::DishSaleEntry;
use crate::time::{Dated, PeriodFilter};

/// Totals for one dish name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishSummary {
    pub name: String,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub avg_price: Decimal,
    pub avg_cost: Decimal,
    pub profit_margin_pct: Decimal,
}

#[derive(Debug, Default)]
struct DishTotals {
    quantity: u64,
    revenue: Decimal,
    cost: Decimal,
}

/// Sales inside the period as seen from `today`
pub fn filter_by_period(dishes: &[DishSaleEntry], period: DishPeriod, today: NaiveDate) -> Vec<&DishSaleEntry> {
    dishes
        .iter()
        .filter(|d| period.contains(&d.date(), &today))
        .collect()
}

/// One summary per distinct dish name, ordered by name
pub fn dish_summaries(dishes: &[DishSaleEntry], period: DishPeriod, today: NaiveDate) -> Vec<DishSummary> {
    let groups = group_fold(
        filter_by_period(dishes, period, today),
        |d| d.name.clone(),
        |totals: &mut DishTotals, d| {
            totals.quantity += u64::from(d.quantity);
            totals.revenue += d.revenue();
            totals.cost += d.cost();
        },
    );

    groups
        .into_iter()
        .map(|(name, totals)| {
            let quantity = Decimal::from(totals.quantity);
            let profit = totals.revenue - totals.cost;
            DishSummary {
                name,
                total_quantity: totals.quantity,
                total_revenue: totals.revenue,
                total_cost: totals.cost,
                total_profit: profit,
                avg_price: safe_div(totals.revenue, quantity),
                avg_cost: safe_div(totals.cost, quantity),
                profit_margin_pct: percent(profit, totals.revenue),
            }
        })
        .collect()
}

/// Independent ranking criteria over the same summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishRanking {
    /// Highest quantity sold
    BestSeller,
    /// Highest total profit
    MostProfitable,
    /// Highest profit margin
    BestMargin,
}

impl DishRanking {
    /// Best first; equal keys fall back to name order
    pub fn compare(&self, a: &DishSummary, b: &DishSummary) -> Ordering {
        let by_key = match self {
            DishRanking::BestSeller => b.total_quantity.cmp(&a.total_quantity),
            DishRanking::MostProfitable => b.total_profit.cmp(&a.total_profit),
            DishRanking::BestMargin => b.profit_margin_pct.cmp(&a.profit_margin_pct),
        };
        by_key.then_with(|| a.name.cmp(&b.name))
    }
}

impl std::str::FromStr for DishRanking {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "best_seller" | "quantity" => Ok(DishRanking::BestSeller),
            "most_profitable" | "profit" => Ok(DishRanking::MostProfitable),
            "best_margin" | "margin" => Ok(DishRanking::BestMargin),
            _ => Err(format!("Invalid dish ranking: {}", s)),
        }
    }
}

/// Summaries sorted by one ranking
pub fn rank(summaries: &[DishSummary], ranking: DishRanking) -> Vec<DishSummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by(|a, b| ranking.compare(a, b));
    ranked
}

/// Top dish under one ranking
pub fn leader(summaries: &[DishSummary], ranking: DishRanking) -> Option<&DishSummary> {
    summaries.iter().min_by(|a, b| ranking.compare(a, b))
}

/// Everything the dish report shows
#[derive(Debug, Clone, Serialize)]
pub struct DishAnalysis {
    pub period: DishPeriod,
    pub summaries: Vec<DishSummary>,
    pub best_seller: Option<DishSummary>,
    pub most_profitable: Option<DishSummary>,
    pub best_margin: Option<DishSummary>,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    /// Most profitable dishes, for the profit chart
    pub top_by_profit: Vec<DishSummary>,
}

pub fn analyze(dishes: &[DishSaleEntry], period: DishPeriod, today: NaiveDate, top_n: usize) -> DishAnalysis {
    let summaries = dish_summaries(dishes, period, today);
    let mut top_by_profit = rank(&summaries, DishRanking::MostProfitable);
    top_by_profit.truncate(top_n);

    DishAnalysis {
        period,
        best_seller: leader(&summaries, DishRanking::BestSeller).cloned(),
        most_profitable: leader(&summaries, DishRanking::MostProfitable).cloned(),
        best_margin: leader(&summaries, DishRanking::BestMargin).cloned(),
        total_quantity: summaries.iter().map(|s| s.total_quantity).sum(),
        total_revenue: summaries.iter().map(|s| s.total_revenue).sum(),
        total_profit: summaries.iter().map(|s| s.total_profit).sum(),
        top_by_profit,
        summaries,
    }
}
