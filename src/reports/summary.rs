//! The executive summary: fixed message templates keyed by threshold
//! bands, composed into one assistant-ready paragraph.

use super::activity::{RiskSummary, StaleSummary};
use super::monthly::MonthlyComparison;

/// Currency with thousands separators and no decimals, the format the
/// summary sentences use.
pub fn format_money(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Compose the summary from the monthly target status, the inactive
/// customer risk and the stale product list. Empty inputs produce an
/// empty string, never an error.
pub fn executive_summary(
    meta: &MonthlyComparison,
    inactivos: &RiskSummary,
    estancados: &StaleSummary,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if meta.numero_mes > 0 {
        if meta.porcentaje_meta < 80.0 {
            parts.push(format!(
                "⚠️ ALERTA: Las ventas de {} están al {}% de la meta. \
                 Ventas actuales: ${}, Meta: ${}.",
                meta.mes_actual,
                meta.porcentaje_meta,
                format_money(meta.ventas_actuales),
                format_money(meta.meta_sugerida),
            ));
        } else if meta.porcentaje_meta >= 100.0 {
            parts.push(format!(
                "✅ EXCELENTE: Las ventas de {} superan la meta ({}%). Ventas: ${}.",
                meta.mes_actual,
                meta.porcentaje_meta,
                format_money(meta.ventas_actuales),
            ));
        } else {
            parts.push(format!(
                "📊 Las ventas de {} están al {}% de la meta. \
                 Faltan ${} para alcanzarla.",
                meta.mes_actual,
                meta.porcentaje_meta,
                format_money(meta.meta_sugerida - meta.ventas_actuales),
            ));
        }
    }

    if inactivos.total > 0 {
        parts.push(format!(
            "👥 Hay {} clientes sin comprar en más de {} días, \
             representando ${} en ventas históricas.",
            inactivos.total,
            inactivos.umbral_dias,
            format_money(inactivos.valor_en_riesgo),
        ));
    }

    if estancados.total > 0 {
        parts.push(format!(
            "📦 {} productos populares no se han vendido en más de {} días. \
             Revisar inventario y promociones.",
            estancados.total, estancados.umbral_dias,
        ));
    }

    parts.join(" ")
}
