//! The full report bundle: every reminder section assembled under the wire
//! keys the downstream automation consumes.

use std::cmp::Ordering;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::loader::table::SalesTable;

use super::activity::{
    self, EntityKind, EntityStats, CUSTOMER_RELEVANCE, PRODUCT_RELEVANCE, RISK_RELEVANCE,
};
use super::monthly::{monthly_comparison, MonthlyComparison};
use super::rfm::{rfm_scores, segment_distribution, RfmScore, SegmentCount};
use super::round2;
use super::summary::executive_summary;
use super::three_period::{three_period_comparison, PeriodMonths};

const WATCHLIST_CAP: usize = 40;
const RECENT_CAP: usize = 15;
const TOP_CAP: usize = 20;
const RECENT_DAYS: i64 = 7;
const STALE_TOP_N: usize = 50;
const RFM_TOP_CAP: usize = 20;

/// Tunable thresholds for the bundle; everything else is fixed policy.
#[derive(Debug, Clone, Copy)]
pub struct BundleOptions {
    pub dias_clientes_inactivos: i64,
    pub dias_productos_sin_venta: i64,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            dias_clientes_inactivos: 90,
            dias_productos_sin_venta: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodoDatos {
    pub desde: Option<String>,
    pub hasta: Option<String>,
}

/// A list section with its description and total.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    pub descripcion: String,
    pub total: usize,
    pub lista: Vec<T>,
}

/// A list section without a separate total.
#[derive(Debug, Clone, Serialize)]
pub struct ListSection<T> {
    pub descripcion: String,
    pub lista: Vec<T>,
}

/// A three-month comparison section.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSection<T> {
    pub descripcion: String,
    pub meses: PeriodMonths,
    pub lista: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerIdleRow {
    pub cliente: String,
    pub dias_sin_compra: i64,
    pub total_ventas: f64,
    pub transacciones: u64,
    pub ultima_compra: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductIdleRow {
    pub producto: String,
    pub dias_sin_venta: i64,
    pub total_ventas: f64,
    pub transacciones: u64,
    pub ultima_venta: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRecentRow {
    pub cliente: String,
    pub dias_sin_compra: i64,
    pub total_ventas: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductRecentRow {
    pub producto: String,
    pub dias_sin_venta: i64,
    pub total_ventas: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerTopRow {
    pub cliente: String,
    pub total_ventas: f64,
    pub transacciones: u64,
    pub dias_sin_compra: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductTopRow {
    pub producto: String,
    pub total_ventas: f64,
    pub transacciones: u64,
    pub dias_sin_venta: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerPeriodRow {
    pub cliente: String,
    pub mes_actual: f64,
    pub mes_anterior: f64,
    pub hace_2_meses: f64,
    pub cambio_vs_anterior: f64,
    pub cambio_vs_hace_2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductPeriodRow {
    pub producto: String,
    pub mes_actual: f64,
    pub mes_anterior: f64,
    pub hace_2_meses: f64,
    pub cambio_vs_anterior: f64,
    pub cambio_vs_hace_2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RfmSection {
    pub descripcion: String,
    pub total_clientes: usize,
    pub segmentos: Vec<SegmentCount>,
    pub top_clientes: Vec<RfmScore>,
}

/// The complete payload pushed to the automation webhook and served by the
/// reminders query.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub fecha_generacion: String,
    pub periodo_datos: PeriodoDatos,
    pub meta_ventas_mes: MonthlyComparison,
    pub clientes_inactivos_40: Section<CustomerIdleRow>,
    pub productos_sin_movimiento_40: Section<ProductIdleRow>,
    pub clientes_recientes: ListSection<CustomerRecentRow>,
    pub productos_recientes: ListSection<ProductRecentRow>,
    pub top_clientes_historico: ListSection<CustomerTopRow>,
    pub top_productos_historico: ListSection<ProductTopRow>,
    pub comparacion_mensual_clientes: ComparisonSection<CustomerPeriodRow>,
    pub comparacion_mensual_productos: ComparisonSection<ProductPeriodRow>,
    pub segmentacion_rfm: RfmSection,
    pub resumen_ejecutivo: String,
}

impl ReportBundle {
    /// Build the bundle with default thresholds.
    pub fn build(table: &SalesTable) -> Self {
        Self::build_with(table, &BundleOptions::default())
    }

    /// Build the bundle. The as-of date is the table's own maximum date;
    /// a table without one (empty, or no parseable dates) yields a
    /// well-typed empty bundle.
    pub fn build_with(table: &SalesTable, options: &BundleOptions) -> Self {
        let as_of = match table.max_date() {
            Some(as_of) => as_of,
            None => return Self::empty(options),
        };

        let customer_stats = activity::entity_stats(table, EntityKind::Customers, as_of);
        let product_stats = activity::entity_stats(table, EntityKind::Products, as_of);

        let clientes_inactivos = activity::inactivity_watchlist(
            &customer_stats,
            CUSTOMER_RELEVANCE,
            options.dias_clientes_inactivos,
            WATCHLIST_CAP,
        );
        let productos_sin_venta = activity::inactivity_watchlist(
            &product_stats,
            PRODUCT_RELEVANCE,
            options.dias_productos_sin_venta,
            WATCHLIST_CAP,
        );
        let clientes_recientes =
            activity::recent_actives(&customer_stats, CUSTOMER_RELEVANCE, RECENT_DAYS, RECENT_CAP);
        let productos_recientes =
            activity::recent_actives(&product_stats, PRODUCT_RELEVANCE, RECENT_DAYS, RECENT_CAP);
        let top_clientes = activity::top_by_revenue(&customer_stats, CUSTOMER_RELEVANCE, TOP_CAP);
        let top_productos = activity::top_by_revenue(&product_stats, PRODUCT_RELEVANCE, TOP_CAP);

        let comp_clientes = three_period_comparison(table, as_of, EntityKind::Customers, TOP_CAP);
        let comp_productos = three_period_comparison(table, as_of, EntityKind::Products, TOP_CAP);

        let meta_ventas_mes = monthly_comparison(table, as_of);

        // The summary runs on the looser risk cutoffs, same as the
        // prioritized lists it narrates
        let riesgo_clientes = activity::risk_list(
            &customer_stats,
            RISK_RELEVANCE,
            options.dias_clientes_inactivos,
            TOP_CAP,
        );
        let productos_estancados = activity::stale_top_products(
            &product_stats,
            STALE_TOP_N,
            options.dias_productos_sin_venta,
        );
        let resumen_ejecutivo =
            executive_summary(&meta_ventas_mes, &riesgo_clientes, &productos_estancados);

        let scores = rfm_scores(table, as_of);
        let segmentacion_rfm = rfm_section(&scores);

        Self {
            fecha_generacion: Utc::now().to_rfc3339(),
            periodo_datos: PeriodoDatos {
                desde: table.min_date().map(format_date),
                hasta: Some(format_date(as_of)),
            },
            meta_ventas_mes,
            clientes_inactivos_40: Section {
                descripcion: format!(
                    "Top {} clientes importantes sin comprar >={} días, ordenados por días (asc)",
                    WATCHLIST_CAP, options.dias_clientes_inactivos
                ),
                total: clientes_inactivos.len(),
                lista: clientes_inactivos.iter().map(customer_idle_row).collect(),
            },
            productos_sin_movimiento_40: Section {
                descripcion: format!(
                    "Top {} productos importantes sin vender >={} días, ordenados por días (asc)",
                    WATCHLIST_CAP, options.dias_productos_sin_venta
                ),
                total: productos_sin_venta.len(),
                lista: productos_sin_venta.iter().map(product_idle_row).collect(),
            },
            clientes_recientes: ListSection {
                descripcion: format!(
                    "Clientes que compraron en los últimos {} días (top por ventas totales)",
                    RECENT_DAYS
                ),
                lista: clientes_recientes.iter().map(customer_recent_row).collect(),
            },
            productos_recientes: ListSection {
                descripcion: format!(
                    "Productos vendidos en los últimos {} días (top por ventas totales)",
                    RECENT_DAYS
                ),
                lista: productos_recientes.iter().map(product_recent_row).collect(),
            },
            top_clientes_historico: ListSection {
                descripcion: format!(
                    "Top {} clientes por ventas totales (sin importar fecha)",
                    TOP_CAP
                ),
                lista: top_clientes.iter().map(customer_top_row).collect(),
            },
            top_productos_historico: ListSection {
                descripcion: format!(
                    "Top {} productos por ventas totales (sin importar fecha)",
                    TOP_CAP
                ),
                lista: top_productos.iter().map(product_top_row).collect(),
            },
            comparacion_mensual_clientes: ComparisonSection {
                descripcion: format!(
                    "Top {} clientes - comparación 3 meses (mes actual, anterior, hace 2 meses)",
                    TOP_CAP
                ),
                meses: comp_clientes.meses,
                lista: comp_clientes
                    .filas
                    .iter()
                    .map(|row| CustomerPeriodRow {
                        cliente: row.nombre.clone(),
                        mes_actual: row.mes_actual,
                        mes_anterior: row.mes_anterior,
                        hace_2_meses: row.hace_2_meses,
                        cambio_vs_anterior: row.cambio_vs_anterior,
                        cambio_vs_hace_2: row.cambio_vs_hace_2,
                    })
                    .collect(),
            },
            comparacion_mensual_productos: ComparisonSection {
                descripcion: format!(
                    "Top {} productos - comparación 3 meses (mes actual, anterior, hace 2 meses)",
                    TOP_CAP
                ),
                meses: comp_productos.meses,
                lista: comp_productos
                    .filas
                    .iter()
                    .map(|row| ProductPeriodRow {
                        producto: row.nombre.clone(),
                        mes_actual: row.mes_actual,
                        mes_anterior: row.mes_anterior,
                        hace_2_meses: row.hace_2_meses,
                        cambio_vs_anterior: row.cambio_vs_anterior,
                        cambio_vs_hace_2: row.cambio_vs_hace_2,
                    })
                    .collect(),
            },
            segmentacion_rfm,
            resumen_ejecutivo,
        }
    }

    fn empty(options: &BundleOptions) -> Self {
        Self {
            fecha_generacion: Utc::now().to_rfc3339(),
            periodo_datos: PeriodoDatos {
                desde: None,
                hasta: None,
            },
            meta_ventas_mes: MonthlyComparison::empty(),
            clientes_inactivos_40: Section {
                descripcion: format!(
                    "Top {} clientes importantes sin comprar >={} días, ordenados por días (asc)",
                    WATCHLIST_CAP, options.dias_clientes_inactivos
                ),
                total: 0,
                lista: Vec::new(),
            },
            productos_sin_movimiento_40: Section {
                descripcion: format!(
                    "Top {} productos importantes sin vender >={} días, ordenados por días (asc)",
                    WATCHLIST_CAP, options.dias_productos_sin_venta
                ),
                total: 0,
                lista: Vec::new(),
            },
            clientes_recientes: ListSection {
                descripcion: format!(
                    "Clientes que compraron en los últimos {} días (top por ventas totales)",
                    RECENT_DAYS
                ),
                lista: Vec::new(),
            },
            productos_recientes: ListSection {
                descripcion: format!(
                    "Productos vendidos en los últimos {} días (top por ventas totales)",
                    RECENT_DAYS
                ),
                lista: Vec::new(),
            },
            top_clientes_historico: ListSection {
                descripcion: format!(
                    "Top {} clientes por ventas totales (sin importar fecha)",
                    TOP_CAP
                ),
                lista: Vec::new(),
            },
            top_productos_historico: ListSection {
                descripcion: format!(
                    "Top {} productos por ventas totales (sin importar fecha)",
                    TOP_CAP
                ),
                lista: Vec::new(),
            },
            comparacion_mensual_clientes: ComparisonSection {
                descripcion: format!(
                    "Top {} clientes - comparación 3 meses (mes actual, anterior, hace 2 meses)",
                    TOP_CAP
                ),
                meses: PeriodMonths {
                    actual: 0,
                    anterior: 0,
                    hace_2: 0,
                },
                lista: Vec::new(),
            },
            comparacion_mensual_productos: ComparisonSection {
                descripcion: format!(
                    "Top {} productos - comparación 3 meses (mes actual, anterior, hace 2 meses)",
                    TOP_CAP
                ),
                meses: PeriodMonths {
                    actual: 0,
                    anterior: 0,
                    hace_2: 0,
                },
                lista: Vec::new(),
            },
            segmentacion_rfm: rfm_section(&[]),
            resumen_ejecutivo: String::new(),
        }
    }
}

fn rfm_section(scores: &[RfmScore]) -> RfmSection {
    let mut top: Vec<RfmScore> = scores.to_vec();
    top.sort_by(|a, b| {
        b.puntaje
            .cmp(&a.puntaje)
            .then_with(|| b.monetario.partial_cmp(&a.monetario).unwrap_or(Ordering::Equal))
            .then_with(|| a.cliente.cmp(&b.cliente))
    });
    top.truncate(RFM_TOP_CAP);

    RfmSection {
        descripcion: format!(
            "Segmentación RFM de clientes (top {} por puntaje)",
            RFM_TOP_CAP
        ),
        total_clientes: scores.len(),
        segmentos: segment_distribution(scores),
        top_clientes: top,
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn customer_idle_row(stats: &EntityStats) -> CustomerIdleRow {
    CustomerIdleRow {
        cliente: stats.nombre.clone(),
        dias_sin_compra: stats.dias_inactivo.unwrap_or(0),
        total_ventas: round2(stats.total_ventas),
        transacciones: stats.transacciones,
        ultima_compra: stats.ultima_actividad.map(format_date).unwrap_or_default(),
    }
}

fn product_idle_row(stats: &EntityStats) -> ProductIdleRow {
    ProductIdleRow {
        producto: stats.nombre.clone(),
        dias_sin_venta: stats.dias_inactivo.unwrap_or(0),
        total_ventas: round2(stats.total_ventas),
        transacciones: stats.transacciones,
        ultima_venta: stats.ultima_actividad.map(format_date).unwrap_or_default(),
    }
}

fn customer_recent_row(stats: &EntityStats) -> CustomerRecentRow {
    CustomerRecentRow {
        cliente: stats.nombre.clone(),
        dias_sin_compra: stats.dias_inactivo.unwrap_or(0),
        total_ventas: round2(stats.total_ventas),
    }
}

fn product_recent_row(stats: &EntityStats) -> ProductRecentRow {
    ProductRecentRow {
        producto: stats.nombre.clone(),
        dias_sin_venta: stats.dias_inactivo.unwrap_or(0),
        total_ventas: round2(stats.total_ventas),
    }
}

fn customer_top_row(stats: &EntityStats) -> CustomerTopRow {
    CustomerTopRow {
        cliente: stats.nombre.clone(),
        total_ventas: round2(stats.total_ventas),
        transacciones: stats.transacciones,
        dias_sin_compra: stats.dias_inactivo.unwrap_or(0),
    }
}

fn product_top_row(stats: &EntityStats) -> ProductTopRow {
    ProductTopRow {
        producto: stats.nombre.clone(),
        total_ventas: round2(stats.total_ventas),
        transacciones: stats.transacciones,
        dias_sin_venta: stats.dias_inactivo.unwrap_or(0),
    }
}
