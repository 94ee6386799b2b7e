//! Synthetic sales dataset generator.
//!
//! Produces a CSV that looks like a real point-of-sale export: day/month/year
//! dates, canonical products decorated with colors, material words, casing
//! noise and the occasional typo, rental-fee lines, and a sprinkling of
//! malformed cells so the coercion paths get exercised.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::CANONICAL_PRODUCTS;

const BUSINESS_TYPES: &[&str] = &[
    "Tapicería",
    "Mueblería",
    "Autotapicería",
    "Decoraciones",
    "Cortinas y Persianas",
    "Talleres",
];

const BUSINESS_NAMES: &[&str] = &[
    "San Miguel",
    "El Águila",
    "Hernández",
    "La Central",
    "Del Valle",
    "Monterrey",
    "Juárez",
    "La Esperanza",
    "Morelos",
    "Las Torres",
];

const COLOR_SUFFIXES: &[&str] = &["NEGRO", "AZUL", "GRIS", "ROJO", "BEIGE", "VINO", "CAFE"];

const NOISE_PREFIXES: &[&str] = &["TAPIZ", "TEXTIL", "IMPORTADO"];

const CATEGORIES: &[&str] = &[
    "TELA AUTO-1000",
    "TELA AUTO-500",
    "PVC BONDE -3116",
    "ESPUMAS",
    "HERRAJES",
    "HILOS Y CIERRES",
    "ADHESIVOS",
];

/// Generate a synthetic sales CSV at `out`.
pub fn generate_command(out: &Path, customers: usize, invoices: usize, days: i64) -> Result<()> {
    println!("Generating synthetic sales data...");
    println!(
        "Parameters: {} customers, {} invoices, {} days of history",
        customers, invoices, days
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let mut rng = rand::thread_rng();
    let end = Utc::now().date_naive();

    let customer_names: Vec<String> = (0..customers.max(1))
        .map(|i| {
            format!(
                "{} {} {}",
                BUSINESS_TYPES[i % BUSINESS_TYPES.len()],
                BUSINESS_NAMES[(i / BUSINESS_TYPES.len()) % BUSINESS_NAMES.len()],
                i + 1
            )
        })
        .collect();

    let mut content =
        String::from("factura_id,fecha,cliente_nombre,producto,categoria,cantidad,venta_neta\n");

    for invoice in 1..=invoices.max(1) {
        let cliente = customer_names
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default();
        let date = end - Duration::days(rng.gen_range(0..days.max(1)));
        let factura_id = format!("F-{:06}", invoice);

        // A few invoices are rental fees with a single line
        if rng.gen_ratio(1, 25) {
            content.push_str(&format!(
                "{},{:02}/{:02}/{:04},\"{}\",ARRENDAMIENTO LOCAL {},SERVICIOS,1,{:.2}\n",
                factura_id,
                date.day(),
                date.month(),
                date.year(),
                cliente,
                rng.gen_range(1..=6),
                rng.gen_range(3000.0..9000.0),
            ));
            continue;
        }

        let lines = rng.gen_range(1..=4);
        for _ in 0..lines {
            let producto = messy_label(&mut rng);
            let categoria = CATEGORIES.choose(&mut rng).copied().unwrap_or("OTROS");
            let cantidad = rng.gen_range(1..=40);
            let venta = cantidad as f64 * rng.gen_range(45.0..320.0);

            // Rare malformed cells: an impossible date, a non-numeric amount
            let fecha_cell = if rng.gen_ratio(1, 80) {
                "31/02/2024".to_string()
            } else {
                format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
            };
            let venta_cell = if rng.gen_ratio(1, 120) {
                "n/a".to_string()
            } else {
                format!("{:.2}", venta)
            };

            content.push_str(&format!(
                "{},{},\"{}\",\"{}\",{},{},{}\n",
                factura_id, fecha_cell, cliente, producto, categoria, cantidad, venta_cell,
            ));
        }
    }

    let mut file =
        File::create(out).with_context(|| format!("Failed to create: {}", out.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write: {}", out.display()))?;

    println!("Created synthetic sales file at {}", out.display());
    Ok(())
}

/// A catalog product dressed up the way point-of-sale exports mangle it.
fn messy_label<R: Rng>(rng: &mut R) -> String {
    // Some labels are services the catalog will never match
    if rng.gen_ratio(1, 20) {
        let services = [
            "SERVICIO DE COSTURA ESPECIAL",
            "FLETE LOCAL",
            "MANO DE OBRA REPARACION",
        ];
        return services.choose(rng).copied().unwrap_or("FLETE LOCAL").to_string();
    }

    let base = CANONICAL_PRODUCTS
        .choose(rng)
        .copied()
        .unwrap_or("TELA CORDOBA");
    let mut label = base.to_string();

    if rng.gen_ratio(1, 3) {
        label = format!(
            "{} {}",
            NOISE_PREFIXES.choose(rng).copied().unwrap_or("TAPIZ"),
            label
        );
    }
    if rng.gen_ratio(1, 2) {
        label = format!(
            "{} {}",
            label,
            COLOR_SUFFIXES.choose(rng).copied().unwrap_or("NEGRO")
        );
    }
    if rng.gen_ratio(1, 4) {
        label = label.to_lowercase();
    }
    if rng.gen_ratio(1, 10) {
        label = swap_adjacent(&label, rng);
    }

    label
}

/// Introduce a single transposition typo.
fn swap_adjacent<R: Rng>(label: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = label.chars().collect();
    if chars.len() < 4 {
        return label.to_string();
    }
    let i = rng.gen_range(1..chars.len() - 1);
    chars.swap(i, i - 1);
    chars.into_iter().collect()
}
