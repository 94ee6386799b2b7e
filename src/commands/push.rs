//! The push command: build the full bundle and deliver it to the
//! configured webhook.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use colored::Colorize;

use crate::loader::Loader;
use crate::reports::bundle::{BundleOptions, ReportBundle};
use crate::webhook;

use super::config::AppConfig;

pub fn push_command(path: &Path, config: &AppConfig) -> Result<()> {
    let url = config
        .webhook_url
        .as_deref()
        .ok_or_else(|| anyhow!("webhook_url is not configured (set it in ventalytics.yaml)"))?;

    let mut loader = Loader::new();
    let outcome = loader.load(path);
    if let Some(err) = &outcome.error {
        eprintln!("{}", format!("Warning: {}", err).yellow());
    }

    let options = BundleOptions {
        dias_clientes_inactivos: config.dias_clientes_inactivos,
        dias_productos_sin_venta: config.dias_productos_sin_venta,
    };
    let bundle = ReportBundle::build_with(&outcome.table, &options);

    println!(
        "Pushing {} inactive customers, {} stale products to {}",
        bundle.clientes_inactivos_40.total, bundle.productos_sin_movimiento_40.total, url
    );

    let report = webhook::deliver(
        url,
        &bundle,
        Duration::from_secs(config.webhook_timeout_secs),
    );

    if report.success {
        println!("{}", "Datos enviados exitosamente".green());
        if let Some(status) = report.status {
            println!("  Status: {}", status);
        }
        if let Some(snippet) = &report.response_snippet {
            println!("  Respuesta: {}", snippet);
        }
    } else {
        // Delivery failure is an outcome, not a crash
        println!("{}", "La entrega falló".red());
        if let Some(error) = &report.error {
            println!("  Error: {}", error);
        }
    }

    Ok(())
}
