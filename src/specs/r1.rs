// src/specs/r1.rs
//! Record 1: ownership and core property attributes.
//!
//! Shape (standard profile, chars):
//! ```text
//! [0,37)    full code          → join key
//! [0,5)+[5,9)+[13,24)          → 20-char reference (display only)
//! [37,137)  owner name
//! [138,139) document type      [139,151) document number
//! [151,251) address            [252,253) economic destination
//! [253,268) land area          [268,279) built area (5 implied decimals)
//! [279,292) assessed value     [293,297) vintage
//! ```
use crate::config::{ FormatProfile, JoinKey };
use crate::core::FixedLine;
use crate::core::numeric::{ decode_built_area, decode_plain };

use super::{ check_len, derive_reference, parse_lines, LineError, ParsedLines };

/// One parsed R1 line. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyRecord {
    /// Full original code; the stable join key.
    pub full_code: String,
    /// Derived 20-char cadastral reference shown to users.
    pub reference: String,
    pub dept_muni: String,
    pub owner_name: String,
    pub document_type: String,
    pub document_number: String,
    pub address: String,
    pub economic_destination: String,
    pub land_area: f64,
    pub built_area: f64,
    /// Avalúo.
    pub assessed_value: f64,
    /// Vigencia: the valuation year.
    pub vintage: String,
}

impl PropertyRecord {
    pub fn join_key(&self, key: JoinKey) -> &str {
        match key {
            JoinKey::FullCode  => &self.full_code,
            JoinKey::Reference => &self.reference,
        }
    }

    pub fn display_reference(&self) -> &str { &self.reference }
}

pub fn parse_line(raw: &str, profile: &FormatProfile) -> Result<PropertyRecord, LineError> {
    let line = FixedLine::new(raw);
    check_len(&line, profile)?;

    let id = &profile.identifier;
    let f = &profile.r1;
    Ok(PropertyRecord {
        full_code:            s!(line.field(id.full_code)),
        reference:            derive_reference(&line, id),
        dept_muni:            s!(line.field(id.dept_muni)),
        owner_name:           s!(line.field(f.owner_name)),
        document_type:        s!(line.field(f.document_type)),
        document_number:      s!(line.field(f.document_number)),
        address:              s!(line.field(f.address)),
        economic_destination: s!(line.field(f.economic_destination)),
        land_area:            decode_plain(line.slice(f.land_area)),
        built_area:           decode_built_area(line.slice(f.built_area)),
        assessed_value:       decode_plain(line.slice(f.assessed_value)),
        vintage:              s!(line.field(f.vintage)),
    })
}

/// Parse a whole decoded file.
pub fn parse_text(text: &str, profile: &FormatProfile) -> ParsedLines<PropertyRecord> {
    parse_lines(text, |line| parse_line(line, profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(buf: &mut Vec<char>, at: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            if buf.len() <= at + i { buf.resize(at + i + 1, ' '); }
            buf[at + i] = ch;
        }
    }

    fn sample_line(assessed: &str) -> String {
        let mut b = vec![' '; 297];
        put(&mut b, 0, "0814100010203000100010001000000001001");
        put(&mut b, 37, "JUAN PEREZ");
        put(&mut b, 138, "C");
        put(&mut b, 139, "000012345678");
        put(&mut b, 151, "CL 5 # 10-20");
        put(&mut b, 252, "A");
        put(&mut b, 253, "000000000012500");
        put(&mut b, 268, "00011200000");
        put(&mut b, 279, assessed);
        put(&mut b, 293, "2024");
        b.into_iter().collect()
    }

    #[test]
    fn parses_all_fields() {
        let rec = parse_line(&sample_line("0000054000000"), &FormatProfile::standard()).unwrap();
        assert_eq!(rec.full_code, "0814100010203000100010001000000001001");
        assert_eq!(rec.dept_muni, "08141");
        assert_eq!(rec.reference, "08141000100010001000");
        assert_eq!(rec.reference.len(), 20);
        assert_eq!(rec.owner_name, "JUAN PEREZ");
        assert_eq!(rec.document_type, "C");
        assert_eq!(rec.document_number, "000012345678");
        assert_eq!(rec.address, "CL 5 # 10-20");
        assert_eq!(rec.economic_destination, "A");
        assert_eq!(rec.land_area, 12500.0);
        assert_eq!(rec.built_area, 112.0);
        assert_eq!(rec.assessed_value, 54_000_000.0);
        assert_eq!(rec.vintage, "2024");
    }

    #[test]
    fn audit_profile_reads_ten_digit_value() {
        let rec = parse_line(&sample_line("0054000000"), &FormatProfile::audit_2024()).unwrap();
        assert_eq!(rec.assessed_value, 54_000_000.0);
    }

    #[test]
    fn garbage_numbers_become_zero() {
        let mut line: Vec<char> = sample_line("0000054000000").chars().collect();
        put(&mut line, 253, "ABCDEFGHIJKLMNO");
        put(&mut line, 268, "           ");
        let rec = parse_line(&line.into_iter().collect::<String>(), &FormatProfile::standard()).unwrap();
        assert_eq!(rec.land_area, 0.0);
        assert_eq!(rec.built_area, 0.0);
        assert_eq!(rec.assessed_value, 54_000_000.0);
    }

    #[test]
    fn short_line_is_rejected() {
        let err = parse_line("08141 JUAN", &FormatProfile::standard()).unwrap_err();
        assert_eq!(err, LineError::TooShort { len: 10, min: 50 });
        assert_eq!(parse_line("   ", &FormatProfile::standard()).unwrap_err(), LineError::Blank);
    }

    #[test]
    fn padding_only_line_is_skipped_not_blank() {
        let padding = " ".repeat(300);
        let err = parse_line(&padding, &FormatProfile::standard()).unwrap_err();
        assert_eq!(err, LineError::NoData { len: 300 });

        let text = format!("{}\n{padding}\n\n", sample_line("0000054000000"));
        let out = parse_text(&text, &FormatProfile::standard());
        assert_eq!(out.records.len(), 1);
        assert_eq!((out.blank, out.no_data, out.skipped()), (1, 1, 1));
    }

    #[test]
    fn crlf_is_stripped_before_the_length_guard() {
        let line = format!("{:<49}", "08141000100000000010001000");
        let out = parse_text(&format!("{line}\r\n"), &FormatProfile::standard());
        assert!(out.records.is_empty());
        assert_eq!(out.too_short, 1);
    }

    #[test]
    fn truncated_line_keeps_leading_fields() {
        // 60 chars: code + start of the owner name, nothing numeric.
        let line = format!("{:<37}{:<23}", "08141000100000000010001000", "ANA GOMEZ");
        let rec = parse_line(&line, &FormatProfile::standard()).unwrap();
        assert_eq!(rec.owner_name, "ANA GOMEZ");
        assert_eq!(rec.address, "");
        assert_eq!(rec.assessed_value, 0.0);
        assert_eq!(rec.vintage, "");
    }

    #[test]
    fn parse_text_counts_rejects() {
        let text = format!("{}\r\n\r\nshort\n{}\n", sample_line("0000054000000"), sample_line("0000000000001"));
        let out = parse_text(&text, &FormatProfile::standard());
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.lines, 4);
        assert_eq!(out.blank, 1);
        assert_eq!(out.too_short, 1);
        assert_eq!(out.records[1].assessed_value, 1.0);
    }
}
