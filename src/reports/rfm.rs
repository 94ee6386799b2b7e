//! RFM customer scoring: Recency, Frequency, Monetary quintiles and the
//! segment each customer lands in.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::loader::table::SalesTable;

use super::round2;

/// The eight named segments, assigned by the first matching rule of
/// [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "Loyal")]
    Loyal,
    #[serde(rename = "Potential")]
    Potential,
    #[serde(rename = "New")]
    New,
    #[serde(rename = "At-Risk")]
    AtRisk,
    #[serde(rename = "Dormant")]
    Dormant,
    #[serde(rename = "Lost")]
    Lost,
    #[serde(rename = "Regular")]
    Regular,
}

impl Segment {
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Vip => "VIP",
            Segment::Loyal => "Loyal",
            Segment::Potential => "Potential",
            Segment::New => "New",
            Segment::AtRisk => "At-Risk",
            Segment::Dormant => "Dormant",
            Segment::Lost => "Lost",
            Segment::Regular => "Regular",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One customer's scores.
#[derive(Debug, Clone, Serialize)]
pub struct RfmScore {
    pub cliente: String,
    pub recencia_dias: i64,
    pub frecuencia: u64,
    pub monetario: f64,
    pub r: u8,
    pub f: u8,
    pub m: u8,
    pub codigo: String,
    pub puntaje: u8,
    pub segmento: Segment,
}

/// Segment rule table, evaluated top to bottom — first match wins.
pub fn classify(r: u8, f: u8, m: u8) -> Segment {
    if r >= 4 && f >= 4 && m >= 4 {
        Segment::Vip
    } else if f >= 4 && m >= 4 {
        Segment::Loyal
    } else if r >= 4 && f >= 3 {
        Segment::Potential
    } else if r >= 4 && f <= 1 {
        Segment::New
    } else if r <= 2 && f >= 4 {
        Segment::AtRisk
    } else if r <= 2 && f >= 2 {
        Segment::Dormant
    } else if r == 1 {
        Segment::Lost
    } else {
        Segment::Regular
    }
}

/// Score every customer with at least one dated purchase.
///
/// Recency is days since the last purchase (lower is better, so its
/// quintile is inverted); frequency counts distinct invoices; monetary sums
/// net revenue. Quintiles are rank-based: ties break by rank order (metric,
/// then customer name), never producing duplicate bin edges.
pub fn rfm_scores(table: &SalesTable, as_of: NaiveDate) -> Vec<RfmScore> {
    struct Agg {
        ultima: NaiveDate,
        facturas: HashSet<String>,
        ventas: f64,
    }

    let mut groups: BTreeMap<String, Agg> = BTreeMap::new();
    for record in &table.records {
        let date = match record.fecha {
            Some(date) => date,
            None => continue,
        };
        if record.cliente.is_empty() {
            continue;
        }
        let entry = groups
            .entry(record.cliente.clone())
            .or_insert_with(|| Agg {
                ultima: date,
                facturas: HashSet::new(),
                ventas: 0.0,
            });
        entry.ultima = entry.ultima.max(date);
        entry.facturas.insert(record.factura_id.clone());
        entry.ventas += record.venta_neta;
    }

    let names: Vec<String> = groups.keys().cloned().collect();
    let recency: Vec<f64> = groups
        .values()
        .map(|a| (as_of - a.ultima).num_days() as f64)
        .collect();
    let frequency: Vec<f64> = groups.values().map(|a| a.facturas.len() as f64).collect();
    let monetary: Vec<f64> = groups.values().map(|a| a.ventas).collect();

    if names.is_empty() {
        return Vec::new();
    }

    // Fewest days since purchase scores highest
    let r_scores = quintile_scores(&names, &recency, false);
    let f_scores = quintile_scores(&names, &frequency, true);
    let m_scores = quintile_scores(&names, &monetary, true);

    names
        .iter()
        .enumerate()
        .map(|(i, cliente)| {
            let (r, f, m) = (r_scores[i], f_scores[i], m_scores[i]);
            RfmScore {
                cliente: cliente.clone(),
                recencia_dias: recency[i] as i64,
                frecuencia: frequency[i] as u64,
                monetario: round2(monetary[i]),
                r,
                f,
                m,
                codigo: format!("{}{}{}", r, f, m),
                puntaje: r + f + m,
                segmento: classify(r, f, m),
            }
        })
        .collect()
}

/// Count of customers per segment, in rule-priority order.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentCount {
    pub segmento: Segment,
    pub clientes: usize,
}

pub fn segment_distribution(scores: &[RfmScore]) -> Vec<SegmentCount> {
    const ORDER: [Segment; 8] = [
        Segment::Vip,
        Segment::Loyal,
        Segment::Potential,
        Segment::New,
        Segment::AtRisk,
        Segment::Dormant,
        Segment::Lost,
        Segment::Regular,
    ];

    ORDER
        .iter()
        .map(|&segmento| SegmentCount {
            segmento,
            clientes: scores.iter().filter(|s| s.segmento == segmento).count(),
        })
        .collect()
}

/// Rank-based quintiles, 1 through 5.
///
/// Entries are ordered by metric (direction per `higher_is_better`), ties
/// broken by name for determinism; the score is the ntile of the 1-based
/// rank, so the top-ranked entry always scores 5.
fn quintile_scores(names: &[String], metric: &[f64], higher_is_better: bool) -> Vec<u8> {
    let n = names.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let cmp = metric[a].partial_cmp(&metric[b]).unwrap_or(Ordering::Equal);
        let cmp = if higher_is_better { cmp } else { cmp.reverse() };
        cmp.then_with(|| names[a].cmp(&names[b]))
    });

    let mut scores = vec![0u8; n];
    for (position, &idx) in order.iter().enumerate() {
        let rank = position + 1;
        scores[idx] = ((rank * 5 + n - 1) / n) as u8;
    }
    scores
}
