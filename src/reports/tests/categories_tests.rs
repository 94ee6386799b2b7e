use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::loader::table::SaleRecord;
use crate::reports::categories::{base_category, category_stats, UNCATEGORIZED};

use super::{date, record, table};

fn with_category(mut rec: SaleRecord, categoria: Option<&str>) -> SaleRecord {
    rec.categoria = categoria.map(|c| c.to_string());
    rec
}

#[test_case("TELA AUTO-1000", "TELA AUTO" ; "dash suffix")]
#[test_case("TELA AUTO-500", "TELA AUTO" ; "other dash suffix")]
#[test_case("PVC BONDE -3116", "PVC BONDE" ; "space dash suffix")]
#[test_case("ESPUMAS", "ESPUMAS" ; "no suffix passes through")]
#[test_case("HERRAJES 2024 ", "HERRAJES" ; "trailing space then digits")]
#[test_case("3116", "3116" ; "digits only keeps original")]
fn base_category_strips_numeric_suffixes(input: &str, expected: &str) {
    assert_eq!(base_category(input), expected);
}

#[test]
fn grouped_stats_merge_suffix_variants() {
    let d = date(2024, 6, 1);
    let rows = vec![
        with_category(record("F-1", "C1", "P1", Some(d), 1.0, 100.0), Some("TELA AUTO-1000")),
        with_category(record("F-2", "C2", "P2", Some(d), 1.0, 200.0), Some("TELA AUTO-500")),
        with_category(record("F-3", "C1", "P1", Some(d), 1.0, 50.0), Some("ESPUMAS")),
    ];
    let t = table(rows);

    let plain = category_stats(&t, false);
    assert_eq!(plain.len(), 3);

    let grouped = category_stats(&t, true);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].categoria, "TELA AUTO");
    assert_eq!(grouped[0].ventas, 300.0);
    assert_eq!(grouped[0].clientes, 2);
}

#[test]
fn plain_stats_skip_uncategorized_rows_but_grouped_fold_them() {
    let d = date(2024, 6, 1);
    let rows = vec![
        with_category(record("F-1", "C1", "P1", Some(d), 1.0, 100.0), Some("ESPUMAS")),
        with_category(record("F-2", "C2", "P2", Some(d), 1.0, 999.0), None),
    ];
    let t = table(rows);

    let plain = category_stats(&t, false);
    assert_eq!(plain.len(), 1);

    let grouped = category_stats(&t, true);
    assert_eq!(grouped.len(), 2);
    assert!(grouped.iter().any(|c| c.categoria == UNCATEGORIZED));
}

#[test]
fn stats_sort_descending_by_revenue() {
    let d = date(2024, 6, 1);
    let rows = vec![
        with_category(record("F-1", "C1", "P1", Some(d), 1.0, 100.0), Some("CHICA")),
        with_category(record("F-2", "C2", "P2", Some(d), 1.0, 500.0), Some("GRANDE")),
    ];
    let stats = category_stats(&table(rows), false);
    assert_eq!(stats[0].categoria, "GRANDE");
}
