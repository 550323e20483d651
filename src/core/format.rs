// src/core/format.rs
// Human-facing number formatting for summaries and property sheets.

/// `12500.4` → `"12,500"`, `112.0` with 2 decimals → `"112.00"`.
pub fn thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b != b'0' && b != b'.') {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 { out.push(','); }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// `54000000.0` → `"$54,000,000"`.
pub fn money(value: f64) -> String {
    join!("$", &thousands(value, 0))
}

/// Area in square metres with the given precision.
pub fn area(value: f64, decimals: usize) -> String {
    join!(&thousands(value, decimals), " m²")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_three() {
        assert_eq!(thousands(0.0, 0), "0");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(54_000_000.0, 0), "$54,000,000"[1..]);
        assert_eq!(thousands(1234.567, 2), "1,234.57");
        assert_eq!(thousands(-1500.0, 0), "-1,500");
    }

    #[test]
    fn money_and_area() {
        assert_eq!(money(54_000_000.0), "$54,000,000");
        assert_eq!(area(12_500.0, 0), "12,500 m²");
        assert_eq!(area(112.0, 2), "112.00 m²");
    }
}
