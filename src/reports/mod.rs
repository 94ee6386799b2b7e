//! Aggregation and reporting over the normalized sales table.
//!
//! Every function here is pure over its inputs: it takes the table by
//! reference, an explicit as-of date (the table's maximum date, never the
//! wall clock) and parameters, and returns a serializable result. An empty
//! table yields empty-but-well-typed results — the dashboard must stay
//! navigable with no data loaded.

pub mod activity;
pub mod bundle;
pub mod categories;
pub mod kpis;
pub mod monthly;
pub mod rfm;
pub mod summary;
pub mod three_period;
pub mod trends;

#[cfg(test)]
mod tests;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::loader::table::SalesTable;

/// The finite set of report kinds the CLI can compute. Selection is an
/// explicit variant, never a label string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    /// Headline KPIs, trend, seasonality and top lists
    Overview,
    /// The full reminders bundle (inactivity, comparisons, summary)
    Reminders,
    /// Per-category breakdown
    Categories,
    /// Categories merged by base name (numeric suffixes stripped)
    GroupedCategories,
    /// Days-without-activity stats for every product and customer
    Recency,
    /// RFM scores and segment distribution
    Rfm,
}

/// Date-range presets, resolved against the table's own max date so a
/// historical snapshot filters the same way it did the day it was current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Todos,
    EsteAnio,
    Ultimos6Meses,
    Ultimos3Meses,
    UltimoMes,
    UltimaSemana,
    Personalizado { desde: NaiveDate, hasta: NaiveDate },
}

impl DatePreset {
    /// Filtered private copy of the table for this preset. With no valid
    /// dates in the table, every preset degrades to a full copy.
    pub fn resolve(&self, table: &SalesTable) -> SalesTable {
        let max = match table.max_date() {
            Some(max) => max,
            None => return table.clone(),
        };
        let min = table.min_date().unwrap_or(max);

        let range = match self {
            DatePreset::Todos => (min, max),
            DatePreset::EsteAnio => {
                let start = NaiveDate::from_ymd_opt(max.year(), 1, 1).unwrap_or(min);
                (start, max)
            }
            DatePreset::Ultimos6Meses => (back_months(max, 6), max),
            DatePreset::Ultimos3Meses => (back_months(max, 3), max),
            DatePreset::UltimoMes => (back_months(max, 1), max),
            DatePreset::UltimaSemana => (max - Duration::days(7), max),
            DatePreset::Personalizado { desde, hasta } => (*desde, *hasta),
        };

        table.filter_date_range(range.0, range.1)
    }
}

fn back_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

/// Round to two decimals, the precision every monetary field is reported
/// with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal, used for percentages.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
