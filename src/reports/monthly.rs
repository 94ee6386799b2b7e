//! Current-month sales measured against the same month in previous years.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::loader::table::SalesTable;

use super::{round1, round2};

/// One year's totals for the reference month.
#[derive(Debug, Clone, Serialize)]
pub struct YearlySales {
    #[serde(rename = "año")]
    pub anio: i32,
    pub ventas: f64,
    pub transacciones: usize,
    pub cantidad: f64,
}

/// The month-vs-history comparison with target and projection.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyComparison {
    pub mes_actual: String,
    pub numero_mes: u32,
    #[serde(rename = "año_actual")]
    pub anio_actual: i32,
    pub ventas_actuales: f64,
    pub dias_transcurridos: u32,
    pub dias_en_mes: u32,
    pub ventas_proyectadas: f64,
    pub promedio_historico: f64,
    pub maximo_historico: f64,
    pub meta_sugerida: f64,
    pub porcentaje_meta: f64,
    #[serde(rename = "historico_por_año")]
    pub historico_por_anio: Vec<YearlySales>,
}

impl MonthlyComparison {
    /// Zeroed result for a table with no usable dates.
    pub fn empty() -> Self {
        Self {
            mes_actual: String::new(),
            numero_mes: 0,
            anio_actual: 0,
            ventas_actuales: 0.0,
            dias_transcurridos: 0,
            dias_en_mes: 0,
            ventas_proyectadas: 0.0,
            promedio_historico: 0.0,
            maximo_historico: 0.0,
            meta_sugerida: 0.0,
            porcentaje_meta: 0.0,
            historico_por_anio: Vec::new(),
        }
    }
}

/// Compare the as-of month against the same calendar month of every prior
/// year.
///
/// The suggested target is 110% of the historical average; attainment is
/// measured against the average itself. The projection extrapolates the
/// partial total linearly over the true month length, guarding the
/// zero-days-elapsed case.
pub fn monthly_comparison(table: &SalesTable, as_of: NaiveDate) -> MonthlyComparison {
    let current_month = as_of.month();
    let current_year = as_of.year();

    let month_rows = table.filter_month_number(current_month);

    struct YearAgg {
        ventas: f64,
        facturas: HashSet<String>,
        cantidad: f64,
    }

    let mut by_year: BTreeMap<i32, YearAgg> = BTreeMap::new();
    for record in &month_rows.records {
        let year = match record.fecha {
            Some(date) => date.year(),
            None => continue,
        };
        let entry = by_year.entry(year).or_insert(YearAgg {
            ventas: 0.0,
            facturas: HashSet::new(),
            cantidad: 0.0,
        });
        entry.ventas += record.venta_neta;
        entry.cantidad += record.cantidad;
        entry.facturas.insert(record.factura_id.clone());
    }

    // Most recent year first
    let yearly: Vec<YearlySales> = by_year
        .into_iter()
        .rev()
        .map(|(anio, agg)| YearlySales {
            anio,
            ventas: round2(agg.ventas),
            transacciones: agg.facturas.len(),
            cantidad: round2(agg.cantidad),
        })
        .collect();

    let historical: Vec<&YearlySales> = yearly.iter().filter(|y| y.anio < current_year).collect();
    let avg_sales = if historical.is_empty() {
        0.0
    } else {
        historical.iter().map(|y| y.ventas).sum::<f64>() / historical.len() as f64
    };
    let max_sales = historical
        .iter()
        .map(|y| y.ventas)
        .fold(0.0_f64, f64::max);
    let current_sales: f64 = yearly
        .iter()
        .filter(|y| y.anio == current_year)
        .map(|y| y.ventas)
        .sum();

    let dias_en_mes = days_in_month(current_year, current_month);
    let dias_transcurridos = as_of.day();
    let projected = if dias_transcurridos > 0 {
        current_sales / dias_transcurridos as f64 * dias_en_mes as f64
    } else {
        0.0
    };
    let porcentaje_meta = if avg_sales > 0.0 {
        round1(current_sales / avg_sales * 100.0)
    } else {
        0.0
    };

    MonthlyComparison {
        mes_actual: as_of.format("%B").to_string(),
        numero_mes: current_month,
        anio_actual: current_year,
        ventas_actuales: round2(current_sales),
        dias_transcurridos,
        dias_en_mes,
        ventas_proyectadas: round2(projected),
        promedio_historico: round2(avg_sales),
        maximo_historico: round2(max_sales),
        meta_sugerida: round2(avg_sales * 1.1),
        porcentaje_meta,
        historico_por_anio: yearly,
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
