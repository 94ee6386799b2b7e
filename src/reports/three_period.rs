//! Entity revenue across the current month number and the two preceding
//! ones, December wrapping back to January.
//!
//! Windows are calendar month numbers across every year in the table, not
//! rolling 30-day spans, and each window is computed independently.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::loader::table::SalesTable;

use super::activity::EntityKind;
use super::round2;

/// The three month numbers being compared.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PeriodMonths {
    pub actual: u32,
    pub anterior: u32,
    pub hace_2: u32,
}

/// One entity's revenue in each window plus deltas against the two prior
/// periods.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRow {
    pub nombre: String,
    pub mes_actual: f64,
    pub mes_anterior: f64,
    pub hace_2_meses: f64,
    pub cambio_vs_anterior: f64,
    pub cambio_vs_hace_2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreePeriodComparison {
    pub meses: PeriodMonths,
    pub filas: Vec<PeriodRow>,
}

/// 1-based month arithmetic with modulo-12 wrap: January minus one is
/// December.
pub fn month_back(month: u32, offset: u32) -> u32 {
    let m = month as i64 - offset as i64;
    if m <= 0 {
        (m + 12) as u32
    } else {
        m as u32
    }
}

/// Compare the top `cap` entities of the current window against their
/// revenue in the two preceding windows, missing periods filling with zero.
pub fn three_period_comparison(
    table: &SalesTable,
    as_of: NaiveDate,
    kind: EntityKind,
    cap: usize,
) -> ThreePeriodComparison {
    let actual = as_of.month();
    let anterior = month_back(actual, 1);
    let hace_2 = month_back(actual, 2);

    let current = revenue_by_entity(table, kind, actual);
    let previous = revenue_by_entity(table, kind, anterior);
    let two_back = revenue_by_entity(table, kind, hace_2);

    // Top entities of the current window, deterministic on ties
    let mut ranked: Vec<(&String, f64)> = current.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.truncate(cap);

    let filas = ranked
        .into_iter()
        .map(|(nombre, mes_actual)| {
            let mes_anterior = previous.get(nombre).copied().unwrap_or(0.0);
            let hace_2_meses = two_back.get(nombre).copied().unwrap_or(0.0);
            PeriodRow {
                nombre: nombre.clone(),
                mes_actual: round2(mes_actual),
                mes_anterior: round2(mes_anterior),
                hace_2_meses: round2(hace_2_meses),
                cambio_vs_anterior: round2(mes_actual - mes_anterior),
                cambio_vs_hace_2: round2(mes_actual - hace_2_meses),
            }
        })
        .collect();

    ThreePeriodComparison {
        meses: PeriodMonths {
            actual,
            anterior,
            hace_2,
        },
        filas,
    }
}

fn revenue_by_entity(table: &SalesTable, kind: EntityKind, month: u32) -> HashMap<String, f64> {
    let window = table.filter_month_number(month);
    let mut sums: HashMap<String, f64> = HashMap::new();
    for record in &window.records {
        let key = match kind {
            EntityKind::Customers => record.cliente.as_str(),
            EntityKind::Products => record.producto.as_str(),
        };
        if key.is_empty() {
            continue;
        }
        *sums.entry(key.to_string()).or_insert(0.0) += record.venta_neta;
    }
    sums
}
