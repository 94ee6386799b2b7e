//! Revenue over time: the monthly series and calendar-month seasonality.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::loader::table::SalesTable;

use super::round2;

/// One point of the monthly revenue series, keyed `YYYY-MM`.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPoint {
    pub mes: String,
    pub ventas: f64,
}

/// Monthly revenue in chronological order. Rows without a valid date are
/// excluded.
pub fn monthly_trend(table: &SalesTable) -> Vec<MonthlyPoint> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in &table.records {
        if let Some(date) = record.fecha {
            *by_month.entry((date.year(), date.month())).or_insert(0.0) += record.venta_neta;
        }
    }

    by_month
        .into_iter()
        .map(|((year, month), ventas)| MonthlyPoint {
            mes: format!("{:04}-{:02}", year, month),
            ventas: round2(ventas),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeasonStatus {
    Alto,
    Normal,
    Bajo,
}

/// Total revenue per calendar month with a band relative to the mean.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalityRow {
    pub numero_mes: u32,
    pub nombre_mes: String,
    pub ventas: f64,
    pub estado: SeasonStatus,
}

/// Which months sell: totals per calendar month number across all years,
/// marked Alto/Bajo when more than 10% above/below the mean of the months
/// present.
pub fn seasonality(table: &SalesTable) -> Vec<SeasonalityRow> {
    let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
    for record in &table.records {
        if let Some(date) = record.fecha {
            *by_month.entry(date.month()).or_insert(0.0) += record.venta_neta;
        }
    }

    if by_month.is_empty() {
        return Vec::new();
    }

    let mean = by_month.values().sum::<f64>() / by_month.len() as f64;

    by_month
        .into_iter()
        .map(|(numero_mes, ventas)| {
            let estado = if ventas > mean * 1.1 {
                SeasonStatus::Alto
            } else if ventas < mean * 0.9 {
                SeasonStatus::Bajo
            } else {
                SeasonStatus::Normal
            };
            SeasonalityRow {
                numero_mes,
                nombre_mes: month_name(numero_mes),
                ventas: round2(ventas),
                estado,
            }
        })
        .collect()
}

fn month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}
