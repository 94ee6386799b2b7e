//! Category breakdowns, plain and grouped by base name.
//!
//! Source categories carry numeric size suffixes ("TELA AUTO-1000",
//! "TELA AUTO-500") that split what is commercially one line; the grouped
//! variant merges them by stripping the trailing digit run.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::loader::table::SalesTable;

use super::round2;

/// Fallback group for rows without a category.
pub const UNCATEGORIZED: &str = "OTROS";

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub categoria: String,
    pub ventas: f64,
    pub cantidad: f64,
    pub transacciones: usize,
    pub clientes: usize,
    pub productos: usize,
}

/// Strip a trailing digit run (and its space/dash separator) off a
/// category name: "TELA AUTO-1000" -> "TELA AUTO". Names without a numeric
/// suffix pass through; a name that is nothing but the suffix keeps its
/// original form.
pub fn base_category(cat: &str) -> String {
    let trimmed = cat.trim();
    let chars: Vec<char> = trimmed.chars().collect();

    let mut end = chars.len();
    let mut digits = 0;
    while end > 0 && chars[end - 1].is_ascii_digit() {
        end -= 1;
        digits += 1;
    }
    if digits == 0 {
        return trimmed.to_string();
    }
    while end > 0 && (chars[end - 1] == ' ' || chars[end - 1] == '-') {
        end -= 1;
    }

    let base: String = chars[..end].iter().collect();
    let base = base.trim().to_string();
    if base.is_empty() {
        trimmed.to_string()
    } else {
        base
    }
}

/// Per-category stats, descending by revenue.
///
/// Plain mode skips rows without a category; grouped mode folds them into
/// [`UNCATEGORIZED`] and merges suffix variants.
pub fn category_stats(table: &SalesTable, grouped: bool) -> Vec<CategoryStats> {
    struct Agg {
        ventas: f64,
        cantidad: f64,
        facturas: HashSet<String>,
        clientes: HashSet<String>,
        productos: HashSet<String>,
    }

    let mut groups: BTreeMap<String, Agg> = BTreeMap::new();

    for record in &table.records {
        let categoria = match (&record.categoria, grouped) {
            (Some(cat), false) => cat.clone(),
            (Some(cat), true) => base_category(cat),
            (None, true) => UNCATEGORIZED.to_string(),
            (None, false) => continue,
        };

        let entry = groups.entry(categoria).or_insert_with(|| Agg {
            ventas: 0.0,
            cantidad: 0.0,
            facturas: HashSet::new(),
            clientes: HashSet::new(),
            productos: HashSet::new(),
        });
        entry.ventas += record.venta_neta;
        entry.cantidad += record.cantidad;
        entry.facturas.insert(record.factura_id.clone());
        entry.clientes.insert(record.cliente.clone());
        entry.productos.insert(record.producto.clone());
    }

    let mut stats: Vec<CategoryStats> = groups
        .into_iter()
        .map(|(categoria, agg)| CategoryStats {
            categoria,
            ventas: round2(agg.ventas),
            cantidad: round2(agg.cantidad),
            transacciones: agg.facturas.len(),
            clientes: agg.clientes.len(),
            productos: agg.productos.len(),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.ventas
            .partial_cmp(&a.ventas)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.categoria.cmp(&b.categoria))
    });
    stats
}
