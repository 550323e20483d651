// tests/common/mod.rs
//
// Fixed-width line builders for integration tests. Fields are placed with
// the profile's own spans so the fixtures move with the offset table.
#![allow(dead_code)]

use std::path::PathBuf;

use cinta_catastral::config::{ FormatProfile, Span };
use cinta_catastral::SourceFile;

pub const CODE_A: &str = "0814100010203000100010001000000001001";
pub const CODE_B: &str = "0814100020203000100020002000000002002";
pub const CODE_C: &str = "0814100030203000100030003000000003003";

/// Line buffer addressed by char position.
pub struct Line(Vec<char>);

impl Line {
    pub fn new(len: usize) -> Self { Line(vec![' '; len]) }

    /// Write `text` left-aligned into `span`, truncated to its width.
    pub fn put(mut self, span: Span, text: &str) -> Self {
        for (i, ch) in text.chars().take(span.1 - span.0).enumerate() {
            let at = span.0 + i;
            if self.0.len() <= at { self.0.resize(at + 1, ' '); }
            self.0[at] = ch;
        }
        self
    }

    pub fn build(self) -> String { self.0.into_iter().collect() }
}

/// Numeric text right-aligned and zero-padded to the span width.
pub fn zeros(span: Span, value: u64) -> String {
    format!("{:0width$}", value, width = span.1 - span.0)
}

pub struct R1 {
    pub code: &'static str,
    pub owner: &'static str,
    pub land: u64,
    /// Raw built-area integer (five implied decimals).
    pub built_raw: u64,
    pub value: u64,
    pub vintage: &'static str,
}

pub fn r1_line(p: &FormatProfile, r: &R1) -> String {
    let f = &p.r1;
    Line::new(f.vintage.1)
        .put(p.identifier.full_code, r.code)
        .put(f.owner_name, r.owner)
        .put(f.document_type, "C")
        .put(f.document_number, "000012345678")
        .put(f.address, "CL 5 # 10-20")
        .put(f.economic_destination, "A")
        .put(f.land_area, &zeros(f.land_area, r.land))
        .put(f.built_area, &zeros(f.built_area, r.built_raw))
        .put(f.assessed_value, &zeros(f.assessed_value, r.value))
        .put(f.vintage, r.vintage)
        .build()
}

pub fn r2_line(p: &FormatProfile, code: &str, additional: &str, rest: &str) -> String {
    let mut line = Line::new(p.r2.variable_data_from)
        .put(p.identifier.full_code, code)
        .put(p.r2.additional_code, additional)
        .build();
    line.push_str(rest);
    line
}

pub fn juan() -> R1 {
    R1 { code: CODE_A, owner: "JUAN PEREZ", land: 12_500, built_raw: 11_200_000, value: 54_000_000, vintage: "2024" }
}

pub fn ana(code: &'static str, value: u64, land: u64) -> R1 {
    R1 { code, owner: "ANA GOMEZ", land, built_raw: 0, value, vintage: "2023" }
}

pub fn file(name: &str, lines: &[String]) -> SourceFile {
    SourceFile::new(name, lines.join("\n").into_bytes())
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cinta_{}_{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
