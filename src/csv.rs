// src/csv.rs
use std::io::{self, Write};

use crate::store::{ Cell, DataSet };

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_field<W: Write>(w: &mut W, field: &str, sep: char) -> io::Result<()> {
    if needs_quotes(field, sep) {
        let escaped = field.replace('"', "\"\"");
        write!(w, "\"{}\"", escaped)
    } else {
        write!(w, "{}", field)
    }
}

/// Write a single CSV/TSV row of plain strings to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        write_field(&mut w, cell.as_ref(), sep)?;
    }
    writeln!(w)
}

/// Write a row of typed cells. Numbers use their shortest exact form
/// (`12500`, `112.5`); empty cells stay empty.
pub fn write_cells<W: Write>(mut w: W, row: &[Cell], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        match cell {
            Cell::Text(s) => write_field(&mut w, s, sep)?,
            Cell::Number(v) => write!(w, "{}", v)?,
            Cell::Empty => {}
        }
    }
    writeln!(w)
}

/// Header line plus every row.
pub fn write_dataset<W: Write>(mut w: W, ds: &DataSet, sep: char) -> io::Result<()> {
    write_row(&mut w, ds.headers.as_slice(), sep)?;
    for r in &ds.rows {
        write_cells(&mut w, r, sep)?;
    }
    Ok(())
}

/// Whole table as one string (stdout, clipboard-style uses).
pub fn to_string(ds: &DataSet, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_dataset(&mut buf, ds, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
