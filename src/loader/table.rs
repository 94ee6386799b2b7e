//! In-memory representation of the loaded sales dataset.

use chrono::{Datelike, NaiveDate};

/// One invoice line item.
///
/// `producto` carries the normalized working name every report groups by;
/// `producto_original` preserves the raw label for audit and display.
/// `fecha` is `None` when the source cell did not parse — the row is kept,
/// but date-based aggregations skip it.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub factura_id: String,
    pub cliente: String,
    pub producto: String,
    pub producto_original: String,
    pub categoria: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub cantidad: f64,
    pub venta_neta: f64,
}

/// The normalized transaction table.
///
/// Effectively immutable after load: report functions receive it by
/// reference and derive private filtered copies, never mutating it in place.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    pub records: Vec<SaleRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    /// The "no data" table every failure path degrades to.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest valid transaction date — the as-of reference for every
    /// recency computation (never the wall clock, so reports reproduce
    /// against historical snapshots).
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().filter_map(|r| r.fecha).max()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.records.iter().filter_map(|r| r.fecha).min()
    }

    /// Private copy of the rows whose date falls inside `[start, end]`.
    /// Rows without a valid date are excluded.
    pub fn filter_date_range(&self, start: NaiveDate, end: NaiveDate) -> SalesTable {
        let records = self
            .records
            .iter()
            .filter(|r| r.fecha.map(|d| d >= start && d <= end).unwrap_or(false))
            .cloned()
            .collect();
        SalesTable::new(records)
    }

    /// Private copy of the rows whose calendar month number matches,
    /// across all years.
    pub fn filter_month_number(&self, month: u32) -> SalesTable {
        let records = self
            .records
            .iter()
            .filter(|r| r.fecha.map(|d| d.month() == month).unwrap_or(false))
            .cloned()
            .collect();
        SalesTable::new(records)
    }
}
