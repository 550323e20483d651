// src/config/profile.rs
//! Offset tables for the cadastral tape.
//!
//! Every field of an R1/R2 line lives at a fixed character span. The spans
//! moved between revisions of the tape (owner, document number and address
//! shift; the assessed value widened), so they are data, not code: a
//! [`FormatProfile`] is picked once per batch and handed to the parsers.
//!
//! Spans are `[start, end)` in characters. A span that runs past the end of a
//! line is clamped, never an error.
//!
//! Custom profiles can be loaded from TOML:
//! ```toml
//! name = "municipal-2019"
//! min_line_len = 50
//!
//! [identifier]
//! full_code = [0, 37]
//! dept_muni = [0, 5]
//! sector = [5, 9]
//! block_property = [13, 24]
//!
//! [r1]
//! owner_name = [37, 137]
//! document_type = [138, 139]
//! document_number = [139, 151]
//! address = [151, 251]
//! economic_destination = [252, 253]
//! land_area = [253, 268]
//! built_area = [268, 279]
//! assessed_value = [279, 292]
//! vintage = [293, 297]
//!
//! [r2]
//! additional_code = [37, 50]
//! variable_data_from = 50
//! ```
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::consts::MIN_LINE_LEN;
use crate::error::ProfileError;

/// Character span `[start, end)`. Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span(pub usize, pub usize);

impl Span {
    #[inline] pub fn start(self) -> usize { self.0 }
    #[inline] pub fn end(self) -> usize { self.1 }
    #[inline] pub fn width(self) -> usize { self.1.saturating_sub(self.0) }
}

/// Leading identifier spans, shared by R1 and R2.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierOffsets {
    /// Full original code; the stable join key.
    pub full_code: Span,
    /// Department + municipality (5 chars).
    pub dept_muni: Span,
    /// Sector (4 chars), second piece of the derived reference.
    pub sector: Span,
    /// Block + property (11 chars), third piece of the derived reference.
    pub block_property: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1Offsets {
    pub owner_name: Span,
    pub document_type: Span,
    pub document_number: Span,
    pub address: Span,
    pub economic_destination: Span,
    pub land_area: Span,
    pub built_area: Span,
    pub assessed_value: Span,
    pub vintage: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R2Offsets {
    pub additional_code: Span,
    /// Everything from here to the end of the line is kept as one opaque string.
    pub variable_data_from: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatProfile {
    pub name: String,
    #[serde(default = "default_min_line_len")]
    pub min_line_len: usize,
    pub identifier: IdentifierOffsets,
    pub r1: R1Offsets,
    pub r2: R2Offsets,
}

fn default_min_line_len() -> usize { MIN_LINE_LEN }

/// Built-in profile names, as accepted on the command line.
pub const BUILTIN_PROFILES: &[&str] = &["standard", "audit-2024"];

impl Default for FormatProfile {
    fn default() -> Self { Self::standard() }
}

impl FormatProfile {
    /// Canonical table: 13-digit assessed value.
    pub fn standard() -> Self {
        Self {
            name: s!("standard"),
            min_line_len: MIN_LINE_LEN,
            identifier: IdentifierOffsets {
                full_code:      Span(0, 37),
                dept_muni:      Span(0, 5),
                sector:         Span(5, 9),
                block_property: Span(13, 24),
            },
            r1: R1Offsets {
                owner_name:           Span(37, 137),
                document_type:        Span(138, 139),
                document_number:      Span(139, 151),
                address:              Span(151, 251),
                economic_destination: Span(252, 253),
                land_area:            Span(253, 268),
                built_area:           Span(268, 279),
                assessed_value:       Span(279, 292),
                vintage:              Span(293, 297),
            },
            r2: R2Offsets {
                additional_code: Span(37, 50),
                variable_data_from: 50,
            },
        }
    }

    /// 2024 audit revision: same layout, assessed value cut to 10 digits.
    pub fn audit_2024() -> Self {
        let mut p = Self::standard();
        p.name = s!("audit-2024");
        p.r1.assessed_value = Span(279, 289);
        p
    }

    pub fn builtin(name: &str) -> Result<Self, ProfileError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::standard()),
            "audit-2024" | "audit2024" => Ok(Self::audit_2024()),
            other => Err(ProfileError::Unknown(s!(other))),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ProfileError> {
        let profile: FormatProfile = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml_str(&text)?;
        log::info!("Loaded format profile '{}' from {}", profile.name, path.display());
        Ok(profile)
    }

    /// Reject inverted spans. A derived reference that is not 20 characters
    /// wide is allowed but logged.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, span) in self.named_spans() {
            if span.start() > span.end() {
                return Err(ProfileError::InvertedSpan { field, start: span.start(), end: span.end() });
            }
        }
        let id = &self.identifier;
        let width = id.dept_muni.width() + id.sector.width() + id.block_property.width();
        if width != 20 {
            log::warn!("Profile '{}': derived reference is {} chars wide, not 20", self.name, width);
        }
        Ok(())
    }

    fn named_spans(&self) -> [(&'static str, Span); 14] {
        let (id, r1, r2) = (&self.identifier, &self.r1, &self.r2);
        [
            ("identifier.full_code", id.full_code),
            ("identifier.dept_muni", id.dept_muni),
            ("identifier.sector", id.sector),
            ("identifier.block_property", id.block_property),
            ("r1.owner_name", r1.owner_name),
            ("r1.document_type", r1.document_type),
            ("r1.document_number", r1.document_number),
            ("r1.address", r1.address),
            ("r1.economic_destination", r1.economic_destination),
            ("r1.land_area", r1.land_area),
            ("r1.built_area", r1.built_area),
            ("r1.assessed_value", r1.assessed_value),
            ("r1.vintage", r1.vintage),
            ("r2.additional_code", r2.additional_code),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_differ_only_in_assessed_value() {
        let std = FormatProfile::standard();
        let audit = FormatProfile::audit_2024();
        assert_eq!(std.r1.assessed_value, Span(279, 292));
        assert_eq!(audit.r1.assessed_value, Span(279, 289));
        assert_eq!(std.identifier, audit.identifier);
        assert_eq!(std.r1.owner_name, audit.r1.owner_name);
        assert_eq!(std.r2, audit.r2);
    }

    #[test]
    fn derived_reference_is_twenty_wide() {
        let id = FormatProfile::standard().identifier;
        assert_eq!(id.dept_muni.width() + id.sector.width() + id.block_property.width(), 20);
    }

    #[test]
    fn every_listed_builtin_resolves() {
        for name in BUILTIN_PROFILES {
            assert_eq!(FormatProfile::builtin(name).unwrap().name, *name);
        }
    }

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        assert_eq!(FormatProfile::builtin("AUDIT-2024").unwrap().name, "audit-2024");
        assert!(matches!(FormatProfile::builtin("v3"), Err(ProfileError::Unknown(_))));
    }
}
