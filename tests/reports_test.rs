use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use ventalytics::commands::report::{report_value, resolve_preset, PresetArg};
use ventalytics::loader::table::{SaleRecord, SalesTable};
use ventalytics::loader::Loader;
use ventalytics::reports::bundle::ReportBundle;
use ventalytics::reports::kpis::kpis;
use ventalytics::reports::{DatePreset, ReportKind};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn record(
    factura_id: &str,
    cliente: &str,
    producto: &str,
    fecha: Option<NaiveDate>,
    venta_neta: f64,
) -> SaleRecord {
    SaleRecord {
        factura_id: factura_id.to_string(),
        cliente: cliente.to_string(),
        producto: producto.to_string(),
        producto_original: producto.to_string(),
        categoria: None,
        fecha,
        cantidad: 1.0,
        venta_neta,
    }
}

#[test]
fn kpis_over_a_small_table() {
    let table = SalesTable::new(vec![
        record("F-1", "A", "P", Some(date(2024, 6, 1)), 100.0),
        record("F-1", "A", "Q", Some(date(2024, 6, 1)), 50.0),
        record("F-2", "B", "P", Some(date(2024, 6, 2)), 150.0),
    ]);
    let k = kpis(&table);

    assert_eq!(k.total_revenue, 300.0);
    assert_eq!(k.total_orders, 2);
    assert_eq!(k.total_items, 3.0);
    assert_eq!(k.avg_order_value, 150.0);
}

#[test]
fn the_full_bundle_assembles_from_a_realistic_table() {
    let as_of = date(2024, 6, 30);
    let mut rows = Vec::new();

    // An inactive big customer
    for i in 0..8 {
        rows.push(record(
            &format!("F-A{}", i),
            "Tapicería Norte",
            "VINIPIEL CLASICA",
            Some(date(2024, 1, 1 + i)),
            1200.0,
        ));
    }
    // A recently active customer
    for i in 0..8 {
        rows.push(record(
            &format!("F-B{}", i),
            "Mueblería Sur",
            "TELA CORDOBA",
            Some(as_of - chrono::Duration::days(i as i64)),
            900.0,
        ));
    }
    let table = SalesTable::new(rows);
    let bundle = ReportBundle::build(&table);

    assert_eq!(bundle.periodo_datos.hasta.as_deref(), Some("2024-06-30"));

    // January buyer has been idle well past 90 days
    assert_eq!(bundle.clientes_inactivos_40.total, 1);
    assert_eq!(
        bundle.clientes_inactivos_40.lista[0].cliente,
        "Tapicería Norte"
    );

    // The June buyer shows up among the recent actives
    assert!(bundle
        .clientes_recientes
        .lista
        .iter()
        .any(|c| c.cliente == "Mueblería Sur"));

    // Both appear in the all-time top list
    assert_eq!(bundle.top_clientes_historico.lista.len(), 2);

    // RFM scored both customers
    assert_eq!(bundle.segmentacion_rfm.total_clientes, 2);

    // The summary narrates the inactive customer
    assert!(bundle.resumen_ejecutivo.contains("clientes sin comprar"));
}

#[test]
fn empty_table_reports_are_well_typed_everywhere() {
    let table = SalesTable::empty();

    let k = kpis(&table);
    assert_eq!(k.total_revenue, 0.0);
    assert_eq!(k.total_orders, 0);

    let bundle = ReportBundle::build(&table);
    assert_eq!(bundle.clientes_inactivos_40.total, 0);
    assert!(bundle.clientes_inactivos_40.lista.is_empty());
    assert!(bundle.resumen_ejecutivo.is_empty());
    assert!(bundle.periodo_datos.desde.is_none());

    // Every report kind serializes without panicking on no data
    for kind in [
        ReportKind::Overview,
        ReportKind::Reminders,
        ReportKind::Categories,
        ReportKind::GroupedCategories,
        ReportKind::Recency,
        ReportKind::Rfm,
    ] {
        let value = report_value(kind, &table);
        assert!(value.is_object());
    }
}

#[test]
fn presets_anchor_to_the_table_not_the_clock() {
    let rows = vec![
        record("F-1", "A", "P", Some(date(2023, 1, 10)), 100.0),
        record("F-2", "A", "P", Some(date(2023, 6, 1)), 200.0),
        record("F-3", "A", "P", Some(date(2023, 6, 20)), 300.0),
    ];
    let table = SalesTable::new(rows);

    // "Last month" means the month before 2023-06-20, whatever today is
    let filtered = DatePreset::UltimoMes.resolve(&table);
    assert_eq!(filtered.len(), 2);

    let this_year = DatePreset::EsteAnio.resolve(&table);
    assert_eq!(this_year.len(), 3);
}

#[test]
fn custom_preset_parses_day_month_year() {
    let preset = resolve_preset(
        PresetArg::Personalizado,
        Some("01/06/2023"),
        Some("30/06/2023"),
    )
    .unwrap();

    match preset {
        DatePreset::Personalizado { desde, hasta } => {
            assert_eq!(desde, date(2023, 6, 1));
            assert_eq!(hasta, date(2023, 6, 30));
        }
        other => panic!("unexpected preset: {:?}", other),
    }

    assert!(resolve_preset(PresetArg::Personalizado, None, None).is_err());
}

#[test]
fn end_to_end_load_then_bundle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("source.csv");
    fs::write(
        &path,
        "factura_id,fecha,cliente_nombre,producto,categoria,cantidad,venta_neta\n\
         F-1,10/01/2024,Tapicería Norte,VINIPIEL CLASICA GRIS,TELA AUTO-1000,2,6000.00\n\
         F-2,11/01/2024,Tapicería Norte,VINIPIEL CLASICA,TELA AUTO-1000,2,6000.00\n\
         F-3,12/01/2024,Tapicería Norte,vinipiel clasica azul,TELA AUTO-1000,2,6000.00\n\
         F-4,28/06/2024,Mueblería Sur,TELA CORDOBA,TELA AUTO-500,1,800.00\n",
    )
    .unwrap();

    let mut loader = Loader::new();
    let outcome = loader.load(&path);
    assert!(outcome.error.is_none());

    let bundle = ReportBundle::build(&outcome.table);

    // All three label variants aggregated under one canonical product
    let top = &bundle.top_productos_historico.lista;
    let vinipiel = top
        .iter()
        .find(|p| p.producto == "VINIPIEL CLASICA")
        .expect("canonical product missing from the top list");
    assert_eq!(vinipiel.total_ventas, 18000.0);
    assert_eq!(vinipiel.transacciones, 3);
}
