//! Headline KPIs for the overview report.

use std::collections::HashSet;

use serde::Serialize;

use crate::loader::table::SalesTable;

use super::round2;

#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub total_items: f64,
    pub avg_order_value: f64,
}

pub fn kpis(table: &SalesTable) -> Kpis {
    let total_revenue: f64 = table.records.iter().map(|r| r.venta_neta).sum();
    let total_items: f64 = table.records.iter().map(|r| r.cantidad).sum();
    let orders: HashSet<&str> = table
        .records
        .iter()
        .map(|r| r.factura_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();
    let total_orders = orders.len();
    let avg_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };

    Kpis {
        total_revenue: round2(total_revenue),
        total_orders,
        total_items: round2(total_items),
        avg_order_value: round2(avg_order_value),
    }
}
