use pretty_assertions::assert_eq;

use crate::reports::monthly::monthly_comparison;

use super::{date, record, table};

#[test]
fn compares_the_month_across_years() {
    let rows = vec![
        // June 2022 and 2023 are the history
        record("F-1", "C", "TELA CORDOBA", Some(date(2022, 6, 10)), 1.0, 1000.0),
        record("F-2", "C", "TELA CORDOBA", Some(date(2023, 6, 12)), 1.0, 3000.0),
        // June 2024, partial month
        record("F-3", "C", "TELA CORDOBA", Some(date(2024, 6, 5)), 1.0, 500.0),
        record("F-4", "C", "TELA CORDOBA", Some(date(2024, 6, 10)), 1.0, 500.0),
        // Other months never contribute
        record("F-5", "C", "TELA CORDOBA", Some(date(2024, 5, 30)), 1.0, 99999.0),
    ];
    let result = monthly_comparison(&table(rows), date(2024, 6, 10));

    assert_eq!(result.numero_mes, 6);
    assert_eq!(result.anio_actual, 2024);
    assert_eq!(result.mes_actual, "June");
    assert_eq!(result.ventas_actuales, 1000.0);
    assert_eq!(result.promedio_historico, 2000.0);
    assert_eq!(result.maximo_historico, 3000.0);
    // 110% of the historical average
    assert_eq!(result.meta_sugerida, 2200.0);
    // 1000 over 10 of 30 days
    assert_eq!(result.dias_en_mes, 30);
    assert_eq!(result.dias_transcurridos, 10);
    assert_eq!(result.ventas_proyectadas, 3000.0);
    // Attainment against the average itself
    assert_eq!(result.porcentaje_meta, 50.0);

    // Most recent year first
    let years: Vec<i32> = result.historico_por_anio.iter().map(|y| y.anio).collect();
    assert_eq!(years, vec![2024, 2023, 2022]);
}

#[test]
fn no_history_means_zero_average_and_target() {
    let rows = vec![record(
        "F-1",
        "C",
        "TELA CORDOBA",
        Some(date(2024, 6, 5)),
        1.0,
        500.0,
    )];
    let result = monthly_comparison(&table(rows), date(2024, 6, 10));

    assert_eq!(result.promedio_historico, 0.0);
    assert_eq!(result.meta_sugerida, 0.0);
    assert_eq!(result.porcentaje_meta, 0.0);
    assert_eq!(result.ventas_actuales, 500.0);
}

#[test]
fn leap_february_projects_over_29_days() {
    let rows = vec![record(
        "F-1",
        "C",
        "TELA CORDOBA",
        Some(date(2024, 2, 10)),
        1.0,
        1000.0,
    )];
    let result = monthly_comparison(&table(rows), date(2024, 2, 10));

    assert_eq!(result.dias_en_mes, 29);
    assert_eq!(result.ventas_proyectadas, 2900.0);
}

#[test]
fn december_has_31_days() {
    let rows = vec![record(
        "F-1",
        "C",
        "TELA CORDOBA",
        Some(date(2023, 12, 15)),
        1.0,
        100.0,
    )];
    let result = monthly_comparison(&table(rows), date(2023, 12, 15));
    assert_eq!(result.dias_en_mes, 31);
}

#[test]
fn distinct_invoices_count_as_transactions() {
    let rows = vec![
        record("F-1", "C", "TELA CORDOBA", Some(date(2024, 6, 5)), 1.0, 100.0),
        record("F-1", "C", "TELA MALAGA", Some(date(2024, 6, 5)), 1.0, 100.0),
        record("F-2", "C", "TELA CORDOBA", Some(date(2024, 6, 6)), 1.0, 100.0),
    ];
    let result = monthly_comparison(&table(rows), date(2024, 6, 10));
    assert_eq!(result.historico_por_anio[0].transacciones, 2);
}

#[test]
fn empty_table_produces_zeroed_comparison() {
    let result = monthly_comparison(&table(Vec::new()), date(2024, 6, 10));
    assert_eq!(result.ventas_actuales, 0.0);
    assert_eq!(result.ventas_proyectadas, 0.0);
    assert!(result.historico_por_anio.is_empty());
}
