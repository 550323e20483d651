// src/store.rs
//! In-memory tables: the shape every view and export consumes.
//!
//! Records are typed; tables are not. A [`DataSet`] is headers plus rows of
//! [`Cell`]s, built on demand from the record collections and never mutated
//! by the consumers (display, export).
use std::fmt;

use crate::config::consts::{ R2_SUFFIX, SEARCH_COLUMN };
use crate::consolidate::{ Consolidated, ConsolidatedRecord, JoinMode };
use crate::lookup::search_label;
use crate::specs::{ DetailRecord, PropertyRecord };

pub const COL_FULL_CODE: &str = "Codigo_Catastral_Completo";
pub const COL_REFERENCE: &str = "Referencia_Catastral";
pub const COL_DEPT_MUNI: &str = "Departamento_Municipio";
pub const COL_OWNER: &str = "Nombre_Propietario";
pub const COL_DOC_TYPE: &str = "Tipo_Documento";
pub const COL_DOC_NUMBER: &str = "Numero_Documento";
pub const COL_ADDRESS: &str = "Direccion_Predio";
pub const COL_DESTINATION: &str = "Destino_Economico";
pub const COL_LAND_AREA: &str = "Area_Terreno";
pub const COL_BUILT_AREA: &str = "Area_Construida";
pub const COL_ASSESSED: &str = "Avaluo";
pub const COL_VINTAGE: &str = "Vigencia";
pub const COL_ADDITIONAL: &str = "Codigo_Adicional";
pub const COL_VARIABLE: &str = "Datos_Variables_R2";

pub const R1_HEADERS: [&str; 12] = [
    COL_FULL_CODE, COL_REFERENCE, COL_DEPT_MUNI, COL_OWNER, COL_DOC_TYPE, COL_DOC_NUMBER,
    COL_ADDRESS, COL_DESTINATION, COL_LAND_AREA, COL_BUILT_AREA, COL_ASSESSED, COL_VINTAGE,
];

pub const R2_HEADERS: [&str; 5] = [
    COL_FULL_CODE, COL_REFERENCE, COL_DEPT_MUNI, COL_ADDITIONAL, COL_VARIABLE,
];

/// Columns that exist for interactive search only; exports drop them.
pub const INTERNAL_COLUMNS: &[&str] = &[SEARCH_COLUMN];

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// No value (e.g. detail columns of an R1 row without a match).
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Empty => Ok(()),
        }
    }
}

fn text(s: &str) -> Cell { Cell::Text(s!(s)) }

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataSet {
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn nrows(&self) -> usize { self.rows.len() }
    pub fn ncols(&self) -> usize { self.headers.len() }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Copy without the named columns (missing names are ignored).
    pub fn without_columns(&self, drop: &[&str]) -> DataSet {
        let keep: Vec<usize> = (0..self.headers.len())
            .filter(|&i| !drop.contains(&self.headers[i].as_str()))
            .collect();
        DataSet {
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self.rows.iter()
                .map(|r| keep.iter().map(|&i| r.get(i).cloned().unwrap_or(Cell::Empty)).collect())
                .collect(),
        }
    }

    /// Table view for export.
    pub fn for_export(&self) -> DataSet {
        self.without_columns(INTERNAL_COLUMNS)
    }
}

/* ---------------- Record → row ---------------- */

pub fn property_cells(p: &PropertyRecord) -> Vec<Cell> {
    vec![
        text(&p.full_code),
        text(&p.reference),
        text(&p.dept_muni),
        text(&p.owner_name),
        text(&p.document_type),
        text(&p.document_number),
        text(&p.address),
        text(&p.economic_destination),
        Cell::Number(p.land_area),
        Cell::Number(p.built_area),
        Cell::Number(p.assessed_value),
        text(&p.vintage),
    ]
}

pub fn detail_cells(d: &DetailRecord) -> Vec<Cell> {
    vec![
        text(&d.full_code),
        text(&d.reference),
        text(&d.dept_muni),
        text(&d.additional_code),
        text(&d.variable_data),
    ]
}

pub fn properties_table(records: &[PropertyRecord]) -> DataSet {
    DataSet {
        headers: R1_HEADERS.iter().map(|h| s!(*h)).collect(),
        rows: records.iter().map(property_cells).collect(),
    }
}

pub fn details_table(records: &[DetailRecord]) -> DataSet {
    DataSet {
        headers: R2_HEADERS.iter().map(|h| s!(*h)).collect(),
        rows: records.iter().map(detail_cells).collect(),
    }
}

/// Right-side headers after a merge: the key column goes (it is shared),
/// names already used on the left get the `_R2` suffix.
pub fn merged_headers(left: &[&str], right: &[&str], key: &str) -> (Vec<String>, Vec<usize>) {
    let mut headers: Vec<String> = left.iter().map(|h| s!(*h)).collect();
    let mut right_ix = Vec::with_capacity(right.len());
    for (i, h) in right.iter().enumerate() {
        if *h == key { continue; }
        right_ix.push(i);
        if left.contains(h) {
            headers.push(join!(*h, R2_SUFFIX));
        } else {
            headers.push(s!(*h));
        }
    }
    (headers, right_ix)
}

fn consolidated_dataset<'a, I>(c: &Consolidated, records: I) -> DataSet
where
    I: Iterator<Item = &'a ConsolidatedRecord>,
{
    if c.mode == JoinMode::PropertyOnly {
        let rows = records.map(|r| property_cells(&r.property)).collect();
        return DataSet { headers: R1_HEADERS.iter().map(|h| s!(*h)).collect(), rows };
    }

    let (headers, right_ix) = merged_headers(&R1_HEADERS, &R2_HEADERS, c.key.column());
    let rows = records.map(|r| {
        let mut row = property_cells(&r.property);
        match &r.detail {
            Some(d) => {
                let cells = detail_cells(d);
                row.extend(right_ix.iter().map(|&i| cells[i].clone()));
            }
            None => row.extend(right_ix.iter().map(|_| Cell::Empty)),
        }
        row
    }).collect();
    DataSet { headers, rows }
}

/// Consolidated table. In R1-only mode this is exactly the R1 table.
pub fn consolidated_table(c: &Consolidated) -> DataSet {
    consolidated_dataset(c, c.records.iter())
}

/// Same columns as [`consolidated_table`], only the rows at `row_ix`
/// (out-of-range indexes are ignored).
pub fn consolidated_subset(c: &Consolidated, row_ix: &[usize]) -> DataSet {
    consolidated_dataset(c, row_ix.iter().filter_map(|&i| c.records.get(i)))
}

/// Consolidated table plus the `Busqueda` helper column (`reference | owner`).
pub fn consolidated_display_table(c: &Consolidated) -> DataSet {
    let mut ds = consolidated_table(c);
    ds.headers.push(s!(SEARCH_COLUMN));
    for (row, rec) in ds.rows.iter_mut().zip(&c.records) {
        row.push(Cell::Text(search_label(&rec.property)));
    }
    ds
}
