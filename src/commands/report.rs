//! The report command: load, filter, compute one report kind, render.

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;

use crate::display;
use crate::loader::csv_reader::DATE_FORMAT;
use crate::loader::table::SalesTable;
use crate::loader::Loader;
use crate::reports::activity::{self, EntityKind, NO_RELEVANCE};
use crate::reports::bundle::ReportBundle;
use crate::reports::{categories, kpis, rfm, trends, DatePreset, ReportKind};

/// Date preset selector as exposed on the command line. `Personalizado`
/// additionally needs --desde/--hasta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    Todos,
    EsteAnio,
    Ultimos6Meses,
    Ultimos3Meses,
    UltimoMes,
    UltimaSemana,
    Personalizado,
}

/// Turn CLI arguments into a resolved preset.
pub fn resolve_preset(
    preset: PresetArg,
    desde: Option<&str>,
    hasta: Option<&str>,
) -> Result<DatePreset> {
    let parse = |label: &str, value: Option<&str>| -> Result<NaiveDate> {
        let value = value.ok_or_else(|| {
            anyhow!("--{} is required with the personalizado preset (format dd/mm/yyyy)", label)
        })?;
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map_err(|_| anyhow!("Invalid --{} value: {} (expected dd/mm/yyyy)", label, value))
    };

    Ok(match preset {
        PresetArg::Todos => DatePreset::Todos,
        PresetArg::EsteAnio => DatePreset::EsteAnio,
        PresetArg::Ultimos6Meses => DatePreset::Ultimos6Meses,
        PresetArg::Ultimos3Meses => DatePreset::Ultimos3Meses,
        PresetArg::UltimoMes => DatePreset::UltimoMes,
        PresetArg::UltimaSemana => DatePreset::UltimaSemana,
        PresetArg::Personalizado => DatePreset::Personalizado {
            desde: parse("desde", desde)?,
            hasta: parse("hasta", hasta)?,
        },
    })
}

/// Run one report against a sales CSV.
pub fn report_command(
    path: &Path,
    kind: ReportKind,
    format: &str,
    preset: DatePreset,
    refresh: bool,
) -> Result<()> {
    let mut loader = Loader::new();
    if refresh {
        loader.invalidate(path);
    }

    let outcome = loader.load(path);
    if let Some(err) = &outcome.error {
        eprintln!("{}", format!("Warning: {}", err).yellow());
        eprintln!("{}", "No data loaded; the report will be empty.".yellow());
    }

    // Recency-anchored kinds always see the whole history; the browsing
    // kinds honor the date filter
    let filtered = preset.resolve(&outcome.table);
    let table: &SalesTable = match kind {
        ReportKind::Overview | ReportKind::Categories | ReportKind::GroupedCategories => &filtered,
        ReportKind::Reminders | ReportKind::Recency | ReportKind::Rfm => outcome.table.as_ref(),
    };

    match format {
        "json" => {
            let value = report_value(kind, table);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        "text" => render_text(kind, table),
        other => {
            println!("Unsupported output format: {}. Using text format instead.", other);
            render_text(kind, table);
        }
    }

    Ok(())
}

/// The report as plain structured data, ready for serialization.
pub fn report_value(kind: ReportKind, table: &SalesTable) -> serde_json::Value {
    let as_of = table.max_date();

    match kind {
        ReportKind::Overview => json!({
            "kpis": kpis::kpis(table),
            "tendencia_mensual": trends::monthly_trend(table),
            "estacionalidad": trends::seasonality(table),
            "top_productos": top_entities(table, EntityKind::Products, 15),
            "top_clientes": top_entities(table, EntityKind::Customers, 10),
        }),
        ReportKind::Reminders => {
            serde_json::to_value(ReportBundle::build(table)).unwrap_or_default()
        }
        ReportKind::Categories => json!({
            "categorias": categories::category_stats(table, false),
        }),
        ReportKind::GroupedCategories => json!({
            "grupos": categories::category_stats(table, true),
        }),
        ReportKind::Recency => match as_of {
            Some(as_of) => json!({
                "fecha_referencia": as_of.format("%Y-%m-%d").to_string(),
                "productos": activity::entity_stats(table, EntityKind::Products, as_of),
                "clientes": activity::entity_stats(table, EntityKind::Customers, as_of),
            }),
            None => json!({ "fecha_referencia": null, "productos": [], "clientes": [] }),
        },
        ReportKind::Rfm => match as_of {
            Some(as_of) => {
                let scores = rfm::rfm_scores(table, as_of);
                json!({
                    "total_clientes": scores.len(),
                    "segmentos": rfm::segment_distribution(&scores),
                    "clientes": scores,
                })
            }
            None => json!({ "total_clientes": 0, "segmentos": [], "clientes": [] }),
        },
    }
}

fn top_entities(table: &SalesTable, kind: EntityKind, cap: usize) -> Vec<activity::EntityStats> {
    match table.max_date() {
        Some(as_of) => {
            let stats = activity::entity_stats(table, kind, as_of);
            activity::top_by_revenue(&stats, NO_RELEVANCE, cap)
        }
        None => Vec::new(),
    }
}

fn render_text(kind: ReportKind, table: &SalesTable) {
    display::print_report_header();

    if table.is_empty() {
        println!("{}", "No data loaded.".yellow());
        return;
    }

    match kind {
        ReportKind::Overview => render_overview(table),
        ReportKind::Reminders => render_reminders(table),
        ReportKind::Categories => render_categories(table, false),
        ReportKind::GroupedCategories => render_categories(table, true),
        ReportKind::Recency => render_recency(table),
        ReportKind::Rfm => render_rfm(table),
    }
}

fn render_overview(table: &SalesTable) {
    let k = kpis::kpis(table);
    println!("\n--- {} ---", "Visión General".green());
    println!("  Ventas totales:   ${:.2}", k.total_revenue);
    println!("  Pedidos:          {}", k.total_orders);
    println!("  Unidades:         {:.0}", k.total_items);
    println!("  Ticket promedio:  ${:.2}", k.avg_order_value);

    println!("\n--- {} ---", "Top Productos".green());
    for stats in top_entities(table, EntityKind::Products, 15) {
        println!("  {:<40} ${:>12.2}", stats.nombre, stats.total_ventas);
    }

    println!("\n--- {} ---", "Top Clientes".green());
    for stats in top_entities(table, EntityKind::Customers, 10) {
        println!("  {:<40} ${:>12.2}", stats.nombre, stats.total_ventas);
    }

    println!("\n--- {} ---", "Estacionalidad".green());
    for row in trends::seasonality(table) {
        println!("  {:<12} ${:>12.2}  {:?}", row.nombre_mes, row.ventas, row.estado);
    }
}

fn render_reminders(table: &SalesTable) {
    let bundle = ReportBundle::build(table);

    println!("\n--- {} ---", "Meta de Ventas del Mes".green());
    let meta = &bundle.meta_ventas_mes;
    println!("  Mes:                {} ({})", meta.mes_actual, meta.numero_mes);
    println!("  Ventas actuales:    ${:.2}", meta.ventas_actuales);
    println!("  Meta sugerida:      ${:.2}", meta.meta_sugerida);
    println!("  Promedio histórico: ${:.2}", meta.promedio_historico);
    println!("  Proyección:         ${:.2}", meta.ventas_proyectadas);
    println!("  % de meta:          {:.1}%", meta.porcentaje_meta);

    println!(
        "\n--- {} ({}) ---",
        "Clientes Inactivos".red(),
        bundle.clientes_inactivos_40.total
    );
    for row in bundle.clientes_inactivos_40.lista.iter().take(15) {
        println!(
            "  {:<35} {:>4} días  ${:>12.2}",
            row.cliente, row.dias_sin_compra, row.total_ventas
        );
    }

    println!(
        "\n--- {} ({}) ---",
        "Productos Sin Movimiento".red(),
        bundle.productos_sin_movimiento_40.total
    );
    for row in bundle.productos_sin_movimiento_40.lista.iter().take(15) {
        println!(
            "  {:<35} {:>4} días  ${:>12.2}",
            row.producto, row.dias_sin_venta, row.total_ventas
        );
    }

    println!("\n--- {} ---", "Resumen Ejecutivo".green());
    println!("  {}", bundle.resumen_ejecutivo);
}

fn render_categories(table: &SalesTable, grouped: bool) {
    let title = if grouped {
        "Categorías Agrupadas"
    } else {
        "Categorías"
    };
    println!("\n--- {} ---", title.green());
    for stats in categories::category_stats(table, grouped).iter().take(20) {
        println!(
            "  {:<30} ${:>12.2}  {:>5} fact.  {:>4} clientes  {:>4} productos",
            stats.categoria, stats.ventas, stats.transacciones, stats.clientes, stats.productos
        );
    }
}

fn render_recency(table: &SalesTable) {
    let as_of = match table.max_date() {
        Some(as_of) => as_of,
        None => {
            println!("{}", "No hay fechas válidas en los datos.".yellow());
            return;
        }
    };

    println!("\n--- {} ---", "Productos por Recencia".green());
    let mut products = activity::entity_stats(table, EntityKind::Products, as_of);
    products.sort_by_key(|s| std::cmp::Reverse(s.dias_inactivo));
    for stats in products.iter().take(20) {
        let dias = stats.dias_inactivo.unwrap_or(0);
        let estado = if dias > 90 {
            "Alerta".red()
        } else {
            "Activo".green()
        };
        println!(
            "  {:<40} {:>4} días  ${:>12.2}  {}",
            stats.nombre, dias, stats.total_ventas, estado
        );
    }
}

fn render_rfm(table: &SalesTable) {
    let as_of = match table.max_date() {
        Some(as_of) => as_of,
        None => {
            println!("{}", "No hay fechas válidas en los datos.".yellow());
            return;
        }
    };

    let scores = rfm::rfm_scores(table, as_of);

    println!("\n--- {} ---", "Segmentos RFM".green());
    for count in rfm::segment_distribution(&scores) {
        println!("  {:<12} {:>5}", count.segmento.name(), count.clientes);
    }

    println!("\n--- {} ---", "Clientes".green());
    for score in scores.iter().take(25) {
        println!(
            "  {:<35} R{} F{} M{}  ${:>12.2}  {}",
            score.cliente, score.r, score.f, score.m, score.monetario, score.segmento
        );
    }
}
