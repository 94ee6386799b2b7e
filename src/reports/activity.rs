//! Per-entity activity statistics and the inactivity reports built on them.
//!
//! One parameterized grouping pass serves customers and products alike;
//! the watchlist, the prioritized risk list, recent actives and the
//! historical top lists are all filters and sorts over the same stats.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::loader::table::SalesTable;

/// Which column the grouping key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customers,
    Products,
}

/// Aggregated activity of one customer or product.
///
/// `transacciones` and `ultima_actividad` only consider rows with a valid
/// date; revenue and quantity sum over every row of the entity.
#[derive(Debug, Clone, Serialize)]
pub struct EntityStats {
    pub nombre: String,
    pub total_ventas: f64,
    pub transacciones: u64,
    pub cantidad: f64,
    pub ultima_actividad: Option<NaiveDate>,
    pub dias_inactivo: Option<i64>,
}

/// Relevance cutoffs: an entity matters when it trades often enough OR
/// spends enough (inclusive OR — a high-spend infrequent buyer counts).
#[derive(Debug, Clone, Copy)]
pub struct RelevanceThresholds {
    pub min_transacciones: u64,
    pub min_ventas: f64,
}

impl RelevanceThresholds {
    pub fn is_relevant(&self, stats: &EntityStats) -> bool {
        stats.transacciones > self.min_transacciones || stats.total_ventas > self.min_ventas
    }
}

/// Customers worth watching: >5 transactions or >$5,000 lifetime.
pub const CUSTOMER_RELEVANCE: RelevanceThresholds = RelevanceThresholds {
    min_transacciones: 5,
    min_ventas: 5000.0,
};

/// Products worth watching: >10 transactions or >$5,000 lifetime.
pub const PRODUCT_RELEVANCE: RelevanceThresholds = RelevanceThresholds {
    min_transacciones: 10,
    min_ventas: 5000.0,
};

/// Looser cutoff for the prioritized risk list.
pub const RISK_RELEVANCE: RelevanceThresholds = RelevanceThresholds {
    min_transacciones: 3,
    min_ventas: 5000.0,
};

/// Pass-everything cutoff for unfiltered top lists.
pub const NO_RELEVANCE: RelevanceThresholds = RelevanceThresholds {
    min_transacciones: 0,
    min_ventas: f64::NEG_INFINITY,
};

/// Group the table by entity and compute activity stats.
///
/// Keys iterate in lexicographic order, which keeps every downstream sort
/// deterministic on ties.
pub fn entity_stats(table: &SalesTable, kind: EntityKind, as_of: NaiveDate) -> Vec<EntityStats> {
    struct Agg {
        ventas: f64,
        transacciones: u64,
        cantidad: f64,
        ultima: Option<NaiveDate>,
    }

    let mut groups: BTreeMap<&str, Agg> = BTreeMap::new();

    for record in &table.records {
        let key = match kind {
            EntityKind::Customers => record.cliente.as_str(),
            EntityKind::Products => record.producto.as_str(),
        };
        if key.is_empty() {
            continue;
        }
        let entry = groups.entry(key).or_insert(Agg {
            ventas: 0.0,
            transacciones: 0,
            cantidad: 0.0,
            ultima: None,
        });
        entry.ventas += record.venta_neta;
        entry.cantidad += record.cantidad;
        if let Some(date) = record.fecha {
            entry.transacciones += 1;
            entry.ultima = Some(entry.ultima.map_or(date, |best| best.max(date)));
        }
    }

    groups
        .into_iter()
        .map(|(nombre, agg)| EntityStats {
            nombre: nombre.to_string(),
            total_ventas: agg.ventas,
            transacciones: agg.transacciones,
            cantidad: agg.cantidad,
            ultima_actividad: agg.ultima,
            dias_inactivo: agg.ultima.map(|d| (as_of - d).num_days()),
        })
        .collect()
}

/// Relevant entities idle for at least `min_days`, soonest-lapsed first
/// (ascending days), capped.
pub fn inactivity_watchlist(
    stats: &[EntityStats],
    relevance: RelevanceThresholds,
    min_days: i64,
    cap: usize,
) -> Vec<EntityStats> {
    let mut list: Vec<EntityStats> = stats
        .iter()
        .filter(|s| relevance.is_relevant(s))
        .filter(|s| s.dias_inactivo.map(|d| d >= min_days).unwrap_or(false))
        .cloned()
        .collect();
    list.sort_by_key(|s| s.dias_inactivo);
    list.truncate(cap);
    list
}

/// Prioritized risk list over all relevant entities idle strictly longer
/// than the threshold, ordered by historical revenue.
#[derive(Debug, Clone, Serialize)]
pub struct RiskSummary {
    pub umbral_dias: i64,
    pub total: usize,
    pub valor_en_riesgo: f64,
    pub lista: Vec<EntityStats>,
}

pub fn risk_list(
    stats: &[EntityStats],
    relevance: RelevanceThresholds,
    min_days: i64,
    cap: usize,
) -> RiskSummary {
    let mut inactive: Vec<EntityStats> = stats
        .iter()
        .filter(|s| relevance.is_relevant(s))
        .filter(|s| s.dias_inactivo.map(|d| d > min_days).unwrap_or(false))
        .cloned()
        .collect();
    sort_by_revenue_desc(&mut inactive);

    // Value at risk covers every inactive entity, not only the listed ones
    let valor_en_riesgo: f64 = inactive.iter().map(|s| s.total_ventas).sum();
    let total = inactive.len();
    inactive.truncate(cap);

    RiskSummary {
        umbral_dias: min_days,
        total,
        valor_en_riesgo,
        lista: inactive,
    }
}

/// Popular products gone quiet: the top `top_n` sellers filtered to those
/// idle strictly longer than `min_days`, ordered by revenue.
#[derive(Debug, Clone, Serialize)]
pub struct StaleSummary {
    pub umbral_dias: i64,
    pub total: usize,
    pub lista: Vec<EntityStats>,
}

pub fn stale_top_products(stats: &[EntityStats], top_n: usize, min_days: i64) -> StaleSummary {
    let mut top: Vec<EntityStats> = stats.to_vec();
    sort_by_revenue_desc(&mut top);
    top.truncate(top_n);

    let mut stale: Vec<EntityStats> = top
        .into_iter()
        .filter(|s| s.dias_inactivo.map(|d| d > min_days).unwrap_or(false))
        .collect();
    sort_by_revenue_desc(&mut stale);

    StaleSummary {
        umbral_dias: min_days,
        total: stale.len(),
        lista: stale,
    }
}

/// Relevant entities active within the last `max_days`, biggest spenders
/// first.
pub fn recent_actives(
    stats: &[EntityStats],
    relevance: RelevanceThresholds,
    max_days: i64,
    cap: usize,
) -> Vec<EntityStats> {
    let mut list: Vec<EntityStats> = stats
        .iter()
        .filter(|s| relevance.is_relevant(s))
        .filter(|s| s.dias_inactivo.map(|d| d <= max_days).unwrap_or(false))
        .cloned()
        .collect();
    sort_by_revenue_desc(&mut list);
    list.truncate(cap);
    list
}

/// All-time top relevant entities by revenue.
pub fn top_by_revenue(
    stats: &[EntityStats],
    relevance: RelevanceThresholds,
    cap: usize,
) -> Vec<EntityStats> {
    let mut list: Vec<EntityStats> = stats
        .iter()
        .filter(|s| relevance.is_relevant(s))
        .cloned()
        .collect();
    sort_by_revenue_desc(&mut list);
    list.truncate(cap);
    list
}

fn sort_by_revenue_desc(list: &mut [EntityStats]) {
    list.sort_by(|a, b| {
        b.total_ventas
            .partial_cmp(&a.total_ventas)
            .unwrap_or(Ordering::Equal)
    });
}
