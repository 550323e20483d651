// src/export.rs
//! Render tables to export bytes.
//!
//! Everything here is in memory: a call yields one or more [`ExportBlob`]s
//! (name + MIME + bytes). Writing them somewhere is `file`'s job.
use rust_xlsxwriter::{ Workbook, Worksheet };

use crate::config::consts::{ CONSOLIDATED_SHEET, DEFAULT_VINTAGE, R1_SHEET, R2_SHEET, REPORT_STEM };
use crate::config::ExportFormat;
use crate::consolidate::{ Consolidated, JoinMode };
use crate::csv;
use crate::error::ExportError;
use crate::ingest::Batch;
use crate::store::{ self, Cell, DataSet };

/// One downloadable file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportBlob {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// The tables that go into one export, already stripped of internal columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportTables {
    pub consolidated: DataSet,
    pub r1: Option<DataSet>,
    pub r2: Option<DataSet>,
}

impl ExportTables {
    /// Consolidated always; raw R1 (and R2, when R2 files were loaded) on request.
    pub fn new(batch: &Batch, c: &Consolidated, include_raw: bool) -> Self {
        let r1 = include_raw.then(|| store::properties_table(&batch.properties));
        let r2 = (include_raw && c.mode == JoinMode::Joined)
            .then(|| store::details_table(&batch.details));
        Self {
            consolidated: store::consolidated_table(c).for_export(),
            r1,
            r2,
        }
    }

    /// A single table exported as the consolidated sheet.
    pub fn single(ds: &DataSet) -> Self {
        Self { consolidated: ds.for_export(), r1: None, r2: None }
    }

    /// `(sheet name, table)` pairs in output order.
    pub fn sheets(&self) -> Vec<(&'static str, &DataSet)> {
        let mut out = vec![(CONSOLIDATED_SHEET, &self.consolidated)];
        if let Some(t) = &self.r1 { out.push((R1_SHEET, t)); }
        if let Some(t) = &self.r2 { out.push((R2_SHEET, t)); }
        out
    }
}

/// Latest four-digit vintage among the properties, else the default year.
pub fn latest_vintage(c: &Consolidated) -> String {
    c.properties()
        .map(|p| p.vintage.as_str())
        .filter(|v| v.len() == 4 && v.bytes().all(|b| b.is_ascii_digit()))
        .max()
        .map(|v| s!(v))
        .unwrap_or_else(|| s!(DEFAULT_VINTAGE))
}

/// `Reporte_Catastral_<vintage>`
pub fn report_stem(c: &Consolidated) -> String {
    join!(REPORT_STEM, "_", &latest_vintage(c))
}

/* ---------------- xlsx ---------------- */

fn fill_sheet(ws: &mut Worksheet, ds: &DataSet) -> Result<(), ExportError> {
    for (c, h) in ds.headers.iter().enumerate() {
        ws.write_string(0, c as u16, h)?;
    }
    for (r, row) in ds.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Text(s) => { ws.write_string(r, c, s)?; }
                Cell::Number(v) => { ws.write_number(r, c, *v)?; }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

/// Workbook with one sheet per table. An empty table still gets its sheet
/// (header row only).
pub fn workbook_bytes(tables: &ExportTables) -> Result<Vec<u8>, ExportError> {
    let mut wb = Workbook::new();
    for (name, ds) in tables.sheets() {
        let ws = wb.add_worksheet();
        ws.set_name(name)?;
        fill_sheet(ws, ds)?;
    }
    Ok(wb.save_to_buffer()?)
}

/* ---------------- Blobs ---------------- */

/// Render `tables` as `<stem>.<ext>`. Delimited formats add one sibling per
/// raw table (`<stem>_R1.<ext>`, `<stem>_R2.<ext>`); xlsx keeps them as sheets.
pub fn render(tables: &ExportTables, stem: &str, format: ExportFormat) -> Result<Vec<ExportBlob>, ExportError> {
    let ext = format.ext();
    let mime = format.mime();

    let Some(sep) = format.delimiter() else {
        return Ok(vec![ExportBlob {
            file_name: join!(stem, ".", ext),
            mime,
            bytes: workbook_bytes(tables)?,
        }]);
    };

    let blob = |name: String, ds: &DataSet| ExportBlob { file_name: name, mime, bytes: csv::to_string(ds, sep).into_bytes() };

    let mut out = vec![blob(join!(stem, ".", ext), &tables.consolidated)];
    if let Some(t) = &tables.r1 { out.push(blob(join!(stem, "_", R1_SHEET, ".", ext), t)); }
    if let Some(t) = &tables.r2 { out.push(blob(join!(stem, "_", R2_SHEET, ".", ext), t)); }
    Ok(out)
}

/// The report a caller offers for download: `Reporte_Catastral_<vintage>.<ext>`.
pub fn export_report(
    batch: &Batch,
    c: &Consolidated,
    format: ExportFormat,
    include_raw: bool,
) -> Result<Vec<ExportBlob>, ExportError> {
    let tables = ExportTables::new(batch, c, include_raw);
    let blobs = render(&tables, &report_stem(c), format)?;
    log::info!(
        "Export: {} row(s) → {}",
        tables.consolidated.nrows(),
        blobs.iter().map(|b| b.file_name.as_str()).collect::<Vec<_>>().join(", ")
    );
    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JoinKey;
    use crate::consolidate::join;

    fn empty() -> Consolidated {
        join(&[], &[], JoinKey::FullCode, JoinMode::PropertyOnly)
    }

    #[test]
    fn default_name_and_mime() {
        let c = empty();
        assert_eq!(report_stem(&c), "Reporte_Catastral_2024");

        let blobs = export_report(&Batch::default(), &c, ExportFormat::Xlsx, false).unwrap();
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].file_name, "Reporte_Catastral_2024.xlsx");
        assert_eq!(blobs[0].mime, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
        // zip container
        assert!(blobs[0].bytes.starts_with(b"PK"));
    }

    #[test]
    fn delimited_siblings() {
        let c = empty();
        let blobs = export_report(&Batch::default(), &c, ExportFormat::Tsv, true).unwrap();
        let names: Vec<&str> = blobs.iter().map(|b| b.file_name.as_str()).collect();
        // R1-only batch: no R2 sibling
        assert_eq!(names, vec!["Reporte_Catastral_2024.tsv", "Reporte_Catastral_2024_R1.tsv"]);
        assert_eq!(blobs[0].mime, "text/tab-separated-values");
        assert!(String::from_utf8_lossy(&blobs[0].bytes).starts_with("Codigo_Catastral_Completo\t"));
    }
}
