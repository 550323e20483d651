// src/lookup.rs
//! Single-property lookup: by full code or by the `reference | owner` label,
//! and the human-formatted sheet shown for the hit.
use crate::config::consts::SEARCH_SEP;
use crate::consolidate::{ Consolidated, ConsolidatedRecord };
use crate::core::format::{ area, money };
use crate::core::sanitize::normalize_ws;
use crate::specs::PropertyRecord;

/// `<reference> | <owner>`, the text users pick from.
pub fn search_label(p: &PropertyRecord) -> String {
    join!(p.display_reference(), SEARCH_SEP, &p.owner_name)
}

/// Unique labels in first-seen order (fan-out rows share one label).
pub fn search_labels(c: &Consolidated) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    c.properties()
        .map(search_label)
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKey<'a> {
    FullCode(&'a str),
    Label(&'a str),
}

/// First consolidated row matching the key. Whitespace runs in the query and
/// the candidates are collapsed before comparing.
pub fn find<'a>(c: &'a Consolidated, key: LookupKey<'_>) -> Option<&'a ConsolidatedRecord> {
    match key {
        LookupKey::FullCode(code) => {
            let want = normalize_ws(code);
            c.records.iter().find(|r| normalize_ws(&r.property.full_code) == want)
        }
        LookupKey::Label(label) => {
            let want = normalize_ws(label);
            c.records.iter().find(|r| normalize_ws(&search_label(&r.property)) == want)
        }
    }
}

/// Display fields of one property ("ficha"), already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySheet {
    pub fields: Vec<(&'static str, String)>,
}

impl PropertySheet {
    pub fn new(p: &PropertyRecord) -> Self {
        let or_dash = |s: &str| if s.is_empty() { s!("-") } else { s!(s) };
        Self {
            fields: vec![
                ("Referencia Catastral", or_dash(p.display_reference())),
                ("Código Completo", or_dash(&p.full_code)),
                ("Propietario", or_dash(&p.owner_name)),
                ("Documento", or_dash(&join!(&p.document_type, " ", &p.document_number).trim().to_string())),
                ("Dirección", or_dash(&p.address)),
                ("Destino Económico", or_dash(&p.economic_destination)),
                ("Área Terreno", area(p.land_area, 0)),
                ("Área Construida", area(p.built_area, 2)),
                ("Avalúo", money(p.assessed_value)),
                ("Vigencia", or_dash(&p.vintage)),
            ],
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.iter().find(|(l, _)| *l == label).map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for PropertySheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.fields.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (label, value) in &self.fields {
            writeln!(f, "{label:<width$}  {value}")?;
        }
        Ok(())
    }
}
