//! CSV ingestion: header normalization, type coercion, product
//! normalization.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::catalog::ProductMatcher;

use super::table::{SaleRecord, SalesTable};

/// Source date format: day/month/year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Read and normalize a sales CSV from disk.
pub fn read_table(path: &Path) -> Result<SalesTable> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read sales file: {}", path.display()))?;
    parse_table(&bytes)
}

/// Parse a sales CSV from raw bytes (BOM-tolerant).
///
/// Per-cell failures are recovered locally: an unparseable date leaves the
/// row with no date, an unparseable number becomes zero. Only structural
/// problems (missing required columns, unreadable headers) fail the load.
pub fn parse_table(bytes: &[u8]) -> Result<SalesTable> {
    let bytes = strip_bom(bytes);

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            // A structurally broken line must not abort the whole load
            Err(_) => continue,
        };
        records.push(columns.record_from_row(&row));
    }

    normalize_products(&mut records);

    Ok(SalesTable::new(records))
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Resolved positions of the recognized columns.
struct ColumnIndex {
    fecha: usize,
    cliente: usize,
    producto: usize,
    cantidad: usize,
    venta_neta: usize,
    factura_id: usize,
    categoria: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        // Header names are matched after trimming and lowercasing
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            by_name.entry(name.trim().to_lowercase()).or_insert(idx);
        }

        let required = |name: &str| -> Result<usize> {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| anyhow!("Missing required column: {}", name))
        };

        Ok(Self {
            fecha: required("fecha")?,
            cliente: required("cliente_nombre")?,
            producto: required("producto")?,
            cantidad: required("cantidad")?,
            venta_neta: required("venta_neta")?,
            factura_id: required("factura_id")?,
            categoria: by_name.get("categoria").copied(),
        })
    }

    fn record_from_row(&self, row: &StringRecord) -> SaleRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let raw_product = cell(self.producto).to_string();
        let categoria = self
            .categoria
            .map(|idx| cell(idx))
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string());

        SaleRecord {
            factura_id: cell(self.factura_id).to_string(),
            cliente: cell(self.cliente).to_string(),
            // Filled by product normalization below
            producto: raw_product.clone(),
            producto_original: raw_product,
            categoria,
            fecha: parse_date(cell(self.fecha)),
            cantidad: parse_number(cell(self.cantidad)),
            venta_neta: parse_number(cell(self.venta_neta)),
        }
    }
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell, DATE_FORMAT).ok()
}

fn parse_number(cell: &str) -> f64 {
    cell.replace(',', "").parse::<f64>().unwrap_or(0.0)
}

/// Resolve every distinct raw label once, then rewrite the working product
/// column across all rows.
fn normalize_products(records: &mut [SaleRecord]) {
    let matcher = ProductMatcher::new();

    let mapping = {
        let mut labels: Vec<&str> = records
            .iter()
            .map(|r| r.producto_original.as_str())
            .filter(|l| !l.is_empty())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        matcher.build_mapping(labels)
    };

    for record in records.iter_mut() {
        if let Some(name) = mapping.get(&record.producto_original) {
            record.producto = name.clone();
        }
    }
}
