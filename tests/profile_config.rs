// tests/profile_config.rs
mod common;

use cinta_catastral::config::{ AppOptions, FormatProfile, Span };
use cinta_catastral::error::ProfileError;
use cinta_catastral::run;

use common::*;

const SHIFTED: &str = r#"
name = "shifted"

[identifier]
full_code = [0, 37]
dept_muni = [0, 5]
sector = [5, 9]
block_property = [13, 24]

[r1]
owner_name = [40, 140]
document_type = [141, 142]
document_number = [142, 154]
address = [154, 254]
economic_destination = [255, 256]
land_area = [256, 271]
built_area = [271, 282]
assessed_value = [282, 295]
vintage = [296, 300]

[r2]
additional_code = [37, 50]
variable_data_from = 50
"#;

#[test]
fn toml_profile_loads_with_default_min_len() {
    let p = FormatProfile::from_toml_str(SHIFTED).unwrap();
    assert_eq!(p.name, "shifted");
    assert_eq!(p.min_line_len, 50);
    assert_eq!(p.r1.owner_name, Span(40, 140));
}

#[test]
fn loaded_profile_drives_the_parser() {
    let dir = scratch("profile");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("shifted.toml");
    std::fs::write(&path, SHIFTED).unwrap();

    let p = FormatProfile::load(&path).unwrap();
    let mut opts = AppOptions::default();
    opts.ingest.profile = p.clone();

    let files = vec![file("x_R1.txt", &[r1_line(&p, &juan())])];
    let s = run(&files, &opts, None);
    let rec = &s.batch.properties[0];
    assert_eq!(rec.owner_name, "JUAN PEREZ");
    assert_eq!(rec.assessed_value, 54_000_000.0);
    assert_eq!(rec.vintage, "2024");

    // same line read with the standard table lands on the wrong columns
    let s = run(&files, &AppOptions::default(), None);
    assert_ne!(s.batch.properties[0].vintage, "2024");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn inverted_span_is_rejected() {
    let bad = SHIFTED.replace("vintage = [296, 300]", "vintage = [300, 296]");
    match FormatProfile::from_toml_str(&bad) {
        Err(ProfileError::InvertedSpan { field, start, end }) => {
            assert_eq!((field, start, end), ("r1.vintage", 300, 296));
        }
        other => panic!("expected InvertedSpan, got {other:?}"),
    }
}

#[test]
fn missing_file_and_bad_toml_are_errors() {
    let missing = std::env::temp_dir().join("cinta_no_such_profile.toml");
    assert!(matches!(FormatProfile::load(&missing), Err(ProfileError::Read { .. })));
    assert!(matches!(FormatProfile::from_toml_str("name = 3"), Err(ProfileError::Parse(_))));
}
