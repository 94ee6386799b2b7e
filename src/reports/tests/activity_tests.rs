use chrono::Duration;
use pretty_assertions::assert_eq;

use crate::reports::activity::{
    entity_stats, inactivity_watchlist, recent_actives, risk_list, stale_top_products,
    top_by_revenue, EntityKind, RelevanceThresholds, CUSTOMER_RELEVANCE,
};

use super::{date, record, table};

/// Ten dated transactions totalling $8,000, the last one `days_ago` before
/// the as-of date.
fn customer_rows(name: &str, days_ago: i64) -> Vec<crate::loader::table::SaleRecord> {
    let as_of = date(2024, 6, 30);
    let last = as_of - Duration::days(days_ago);
    (0..10)
        .map(|i| {
            let fecha = if i == 9 { last } else { last - Duration::days(30 + i) };
            record(&format!("F-{}", i), name, "TELA CORDOBA", Some(fecha), 1.0, 800.0)
        })
        .collect()
}

#[test]
fn inactive_customer_appears_at_95_days() {
    let as_of = date(2024, 6, 30);
    let stats = entity_stats(&table(customer_rows("Tapicería Norte", 95)), EntityKind::Customers, as_of);

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].transacciones, 10);
    assert_eq!(stats[0].total_ventas, 8000.0);
    assert_eq!(stats[0].dias_inactivo, Some(95));

    let watchlist = inactivity_watchlist(&stats, CUSTOMER_RELEVANCE, 90, 40);
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].nombre, "Tapicería Norte");
}

#[test]
fn customer_at_89_days_is_not_inactive() {
    let as_of = date(2024, 6, 30);
    let stats = entity_stats(&table(customer_rows("Tapicería Norte", 89)), EntityKind::Customers, as_of);

    let watchlist = inactivity_watchlist(&stats, CUSTOMER_RELEVANCE, 90, 40);
    assert!(watchlist.is_empty());
}

#[test]
fn relevance_is_an_inclusive_or() {
    let as_of = date(2024, 6, 30);
    let old = as_of - Duration::days(120);
    // Two transactions only, but far over the revenue cutoff
    let rows = vec![
        record("F-1", "Cliente Grande", "TELA CORDOBA", Some(old), 1.0, 9000.0),
        record("F-2", "Cliente Grande", "TELA CORDOBA", Some(old), 1.0, 9000.0),
        // One-off tiny spender: fails both cutoffs
        record("F-3", "Cliente Chico", "TELA MALAGA", Some(old), 1.0, 10.0),
    ];
    let stats = entity_stats(&table(rows), EntityKind::Customers, as_of);

    let watchlist = inactivity_watchlist(&stats, CUSTOMER_RELEVANCE, 90, 40);
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].nombre, "Cliente Grande");
}

#[test]
fn watchlist_sorts_soonest_lapsed_first() {
    let as_of = date(2024, 6, 30);
    let mut rows = customer_rows("Cliente A", 95);
    rows.extend(customer_rows("Cliente B", 140));
    rows.extend(customer_rows("Cliente C", 91));
    let stats = entity_stats(&table(rows), EntityKind::Customers, as_of);

    let watchlist = inactivity_watchlist(&stats, CUSTOMER_RELEVANCE, 90, 40);
    let names: Vec<&str> = watchlist.iter().map(|s| s.nombre.as_str()).collect();
    assert_eq!(names, vec!["Cliente C", "Cliente A", "Cliente B"]);
}

#[test]
fn risk_list_sorts_by_revenue_and_sums_beyond_the_cap() {
    let as_of = date(2024, 6, 30);
    let old = as_of - Duration::days(120);
    let rows: Vec<_> = (0..5)
        .flat_map(|i| {
            let name = format!("Cliente {}", i);
            (0..4)
                .map(|j| {
                    record(
                        &format!("F-{}-{}", i, j),
                        &name,
                        "TELA CORDOBA",
                        Some(old),
                        1.0,
                        2000.0 * (i + 1) as f64,
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect();
    let stats = entity_stats(&table(rows), EntityKind::Customers, as_of);

    let relevance = RelevanceThresholds {
        min_transacciones: 3,
        min_ventas: 5000.0,
    };
    let risk = risk_list(&stats, relevance, 90, 2);

    assert_eq!(risk.total, 5);
    assert_eq!(risk.lista.len(), 2);
    // Highest lifetime revenue leads the prioritized list
    assert_eq!(risk.lista[0].nombre, "Cliente 4");
    // Value at risk covers all five, not just the two listed
    let expected: f64 = (1..=5).map(|i| 8000.0 * i as f64).sum();
    assert_eq!(risk.valor_en_riesgo, expected);
}

#[test]
fn stale_products_only_considers_the_top_sellers() {
    let as_of = date(2024, 6, 30);
    let old = as_of - Duration::days(120);
    let recent = as_of - Duration::days(5);
    let rows = vec![
        // Big seller gone quiet
        record("F-1", "C", "PVC BONDE 3116", Some(old), 1.0, 50000.0),
        // Big seller still moving
        record("F-2", "C", "TELA CORDOBA", Some(recent), 1.0, 40000.0),
        // Tiny seller gone quiet: outside the top-2 window
        record("F-3", "C", "GOMA EVA 3MM", Some(old), 1.0, 10.0),
    ];
    let stats = entity_stats(&table(rows), EntityKind::Products, as_of);

    let stale = stale_top_products(&stats, 2, 60);
    assert_eq!(stale.total, 1);
    assert_eq!(stale.lista[0].nombre, "PVC BONDE 3116");
}

#[test]
fn recent_actives_and_top_lists() {
    let as_of = date(2024, 6, 30);
    let mut rows = customer_rows("Cliente Activo", 3);
    rows.extend(customer_rows("Cliente Dormido", 200));
    let stats = entity_stats(&table(rows), EntityKind::Customers, as_of);

    let recent = recent_actives(&stats, CUSTOMER_RELEVANCE, 7, 15);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].nombre, "Cliente Activo");

    let top = top_by_revenue(&stats, CUSTOMER_RELEVANCE, 20);
    assert_eq!(top.len(), 2);
}

#[test]
fn rows_without_dates_count_revenue_but_not_activity() {
    let as_of = date(2024, 6, 30);
    let rows = vec![
        record("F-1", "Cliente X", "TELA CORDOBA", Some(as_of), 1.0, 100.0),
        record("F-2", "Cliente X", "TELA CORDOBA", None, 1.0, 900.0),
    ];
    let stats = entity_stats(&table(rows), EntityKind::Customers, as_of);

    assert_eq!(stats[0].total_ventas, 1000.0);
    assert_eq!(stats[0].transacciones, 1);
    assert_eq!(stats[0].dias_inactivo, Some(0));
}

#[test]
fn empty_table_yields_empty_stats() {
    let as_of = date(2024, 6, 30);
    let stats = entity_stats(&table(Vec::new()), EntityKind::Customers, as_of);
    assert!(stats.is_empty());

    let watchlist = inactivity_watchlist(&stats, CUSTOMER_RELEVANCE, 90, 40);
    assert!(watchlist.is_empty());
}
