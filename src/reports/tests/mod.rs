//! Tests for the aggregation layer.

mod activity_tests;
mod categories_tests;
mod monthly_tests;

use chrono::NaiveDate;

use crate::loader::table::{SaleRecord, SalesTable};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(crate) fn record(
    factura_id: &str,
    cliente: &str,
    producto: &str,
    fecha: Option<NaiveDate>,
    cantidad: f64,
    venta_neta: f64,
) -> SaleRecord {
    SaleRecord {
        factura_id: factura_id.to_string(),
        cliente: cliente.to_string(),
        producto: producto.to_string(),
        producto_original: producto.to_string(),
        categoria: None,
        fecha,
        cantidad,
        venta_neta,
    }
}

pub(crate) fn table(records: Vec<SaleRecord>) -> SalesTable {
    SalesTable::new(records)
}
