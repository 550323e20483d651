// src/config/consts.rs

// Parsing
pub const MIN_LINE_LEN: usize = 50;
pub const BUILT_AREA_SCALE: f64 = 100_000.0; // five implied decimals
pub const DEFAULT_PROFILE: &str = "standard";

// Classification (matched case-insensitively against file names)
pub const R1_MARKER: &str = "R1";
pub const R2_MARKER: &str = "R2";

// Join / display
pub const R2_SUFFIX: &str = "_R2";
pub const SEARCH_SEP: &str = " | ";
pub const SEARCH_COLUMN: &str = "Busqueda";

// Export
pub const CONSOLIDATED_SHEET: &str = "Consolidado";
pub const R1_SHEET: &str = "R1";
pub const R2_SHEET: &str = "R2";
pub const REPORT_STEM: &str = "Reporte_Catastral";
pub const DEFAULT_VINTAGE: &str = "2024";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv";
pub const TSV_MIME: &str = "text/tab-separated-values";

// Concurrency
pub const WORKERS: usize = 4;
