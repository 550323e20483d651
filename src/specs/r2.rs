// src/specs/r2.rs
//! Record 2: construction/economic detail, keyed by the same leading code as R1.
//! Only the identifier and a short additional code are positional; the rest of
//! the line is kept verbatim as one opaque string.
use crate::config::{ FormatProfile, JoinKey };
use crate::core::FixedLine;

use super::{ check_len, derive_reference, parse_lines, LineError, ParsedLines };

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRecord {
    pub full_code: String,
    pub reference: String,
    pub dept_muni: String,
    pub additional_code: String,
    pub variable_data: String,
}

impl DetailRecord {
    pub fn join_key(&self, key: JoinKey) -> &str {
        match key {
            JoinKey::FullCode  => &self.full_code,
            JoinKey::Reference => &self.reference,
        }
    }
}

pub fn parse_line(raw: &str, profile: &FormatProfile) -> Result<DetailRecord, LineError> {
    let line = FixedLine::new(raw);
    check_len(&line, profile)?;

    let id = &profile.identifier;
    Ok(DetailRecord {
        full_code:       s!(line.field(id.full_code)),
        reference:       derive_reference(&line, id),
        dept_muni:       s!(line.field(id.dept_muni)),
        additional_code: s!(line.field(profile.r2.additional_code)),
        variable_data:   s!(line.tail(profile.r2.variable_data_from)),
    })
}

pub fn parse_text(text: &str, profile: &FormatProfile) -> ParsedLines<DetailRecord> {
    parse_lines(text, |line| parse_line(line, profile))
}
