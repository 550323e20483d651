// src/core/numeric.rs
//! Numeric decoding for fixed-width fields.
//!
//! The tape writes numbers as zero-padded digit runs. Two rules apply:
//! - **Plain** fields (land area, assessed value) are literal decimals.
//! - **Built area** carries five implied decimals: the raw integer is divided
//!   by 100 000 when positive; zero or negative raw values decode to `0.0`.
//!
//! Decoding never fails. Blank, garbled or non-finite text (`nan`, `inf`)
//! becomes `0.0`, so downstream sums never see a hole.

use crate::config::consts::BUILT_AREA_SCALE;

/// Literal decimal, `0.0` on anything unparsable.
pub fn decode_plain(raw: &str) -> f64 {
    let t = raw.trim();
    if t.is_empty() { return 0.0; }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Integer with five implied decimals; non-positive values decode to `0.0`.
pub fn decode_built_area(raw: &str) -> f64 {
    let v = decode_plain(raw);
    if v > 0.0 { v / BUILT_AREA_SCALE } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_literal() {
        assert_eq!(decode_plain("000000000012500"), 12500.0);
        assert_eq!(decode_plain("0000054000000"), 54_000_000.0);
        assert_eq!(decode_plain("  42.5 "), 42.5);
        assert_eq!(decode_plain("-7"), -7.0);
    }

    #[test]
    fn plain_swallows_garbage() {
        assert_eq!(decode_plain(""), 0.0);
        assert_eq!(decode_plain("     "), 0.0);
        assert_eq!(decode_plain("12A45"), 0.0);
        assert_eq!(decode_plain("N/A"), 0.0);
        assert_eq!(decode_plain("nan"), 0.0);
        assert_eq!(decode_plain("inf"), 0.0);
    }

    #[test]
    fn built_area_is_scaled() {
        assert_eq!(decode_built_area("00011200000"), 112.0);
        assert_eq!(decode_built_area("00000050000"), 0.5);
        assert_eq!(decode_built_area("00000000000"), 0.0);
        assert_eq!(decode_built_area("-0000100000"), 0.0);
        assert_eq!(decode_built_area("xx"), 0.0);
    }

    #[test]
    fn same_text_decodes_differently_per_rule() {
        assert_eq!(decode_plain("00011200000"), 11_200_000.0);
        assert_eq!(decode_built_area("00011200000"), 112.0);
    }
}
