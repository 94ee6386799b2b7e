//! The master product catalog.
//!
//! One authoritative name per true product identity, fixed at compile time.
//! Changing the catalog requires a rebuild and restart; there is no
//! hot-reload contract. Order matters: when two candidates score the same
//! during fuzzy matching, the one declared first wins.

/// Canonical product names as they appear on invoices and reports.
pub const CANONICAL_PRODUCTS: &[&str] = &[
    "VINIPIEL CLASICA",
    "VINIPIEL PREMIUM",
    "VINIPIEL NAUTICA",
    "VINIPIEL PERLADA",
    "VINIPIEL AUTOMOTRIZ",
    "POLIPIEL ITALIANA",
    "CUERINA ECOLOGICA",
    "TELA CORDOBA",
    "TELA MALAGA",
    "TELA SEVILLA",
    "TELA GRANADA",
    "TELA MICROFIBRA",
    "TELA LINO",
    "TELA JACQUARD",
    "TELA AUTOMOTRIZ 1000",
    "TELA AUTOMOTRIZ 500",
    "PVC BONDE 3116",
    "PVC BONDE 2050",
    "PVC EXPANDIBLE",
    "ESPUMA 1 PLG",
    "ESPUMA 2 PLG",
    "ESPUMA 3 PLG",
    "ESPUMA ALTA DENSIDAD",
    "HULE ESPUMA LAMINADO",
    "HULE CRISTAL",
    "PELLON BONDEADO",
    "PELLON SENCILLO",
    "GUATA ACOLCHADA",
    "FIELTRO GRUESO",
    "FIELTRO DELGADO",
    "HILO NYLON 40",
    "HILO POLIESTER 20",
    "CIERRE CONTINUO 5MM",
    "CIERRE INVISIBLE",
    "PEGAMENTO CONTACTO 1L",
    "PEGAMENTO CONTACTO 4L",
    "PEGAMENTO SPRAY",
    "GRAPAS 80/08",
    "GRAPAS 80/10",
    "RESORTE ZIG ZAG",
    "CINCHO ELASTICO",
    "CINTA TAPICERA",
    "BOTON FORRADO",
    "PATA CROMADA 10CM",
    "MALLA TENSORA",
    "PIOLA ENCERADA",
    "OJILLO METALICO",
    "REMACHE DORADO",
    "TACHUELA DECORATIVA",
    "VELCRO INDUSTRIAL 5CM",
    "GOMA EVA 3MM",
    "ARRENDAMIENTO",
];
