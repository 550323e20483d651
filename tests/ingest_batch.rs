// tests/ingest_batch.rs
mod common;

use cinta_catastral::config::{ Decoding, FormatProfile, IngestOptions };
use cinta_catastral::ingest::{ ingest, FileNameClassifier, Notice };
use cinta_catastral::specs::RecordKind;
use cinta_catastral::progress::Progress;

use common::*;

fn opts() -> IngestOptions { IngestOptions::default() }

#[test]
fn same_kind_files_concatenate_in_batch_order() {
    let p = FormatProfile::standard();
    let a = r1_line(&p, &juan());
    let b = r1_line(&p, &ana(CODE_B, 1_000, 10));
    let c = r1_line(&p, &ana(CODE_C, 2_000, 20));

    let split = vec![file("lote1_R1.txt", &[a.clone(), b.clone()]), file("lote2_r1.txt", &[c.clone()])];
    let whole = vec![file("todo_R1.txt", &[a, b, c])];

    let x = ingest(&split, &opts(), &FileNameClassifier, None);
    let y = ingest(&whole, &opts(), &FileNameClassifier, None);
    assert_eq!(x.properties, y.properties);
    let codes: Vec<&str> = x.properties.iter().map(|r| r.full_code.as_str()).collect();
    assert_eq!(codes, vec![CODE_A, CODE_B, CODE_C]);
}

#[test]
fn unclassified_files_are_reported_and_left_out() {
    let p = FormatProfile::standard();
    let files = vec![
        file("predios_R1.txt", &[r1_line(&p, &juan())]),
        file("leeme.txt", &[r1_line(&p, &juan())]),
    ];
    let batch = ingest(&files, &opts(), &FileNameClassifier, None);
    assert_eq!(batch.properties.len(), 1);
    assert!(batch.details.is_empty());
    assert_eq!(batch.files[1].kind, None);
    assert_eq!(batch.notices(), vec![Notice::Unclassified { file: "leeme.txt".into() }]);
}

#[test]
fn short_lines_are_counted_per_file() {
    let p = FormatProfile::standard();
    let short = String::from("0814100010");
    let files = vec![
        file("a_R1.txt", &[r1_line(&p, &juan()), String::new(), short.clone()]),
        file("a_R2.txt", &[short, r2_line(&p, CODE_A, "X1", "")]),
    ];
    let batch = ingest(&files, &opts(), &FileNameClassifier, None);

    let r1 = &batch.files[0];
    assert_eq!((r1.kind, r1.lines, r1.records, r1.blank, r1.skipped), (Some(RecordKind::R1), 3, 1, 1, 1));
    let r2 = &batch.files[1];
    assert_eq!((r2.records, r2.skipped), (1, 1));
    assert_eq!(batch.skipped_lines(), 2);
    assert_eq!(batch.notices(), vec![
        Notice::SkippedLines { file: "a_R1.txt".into(), count: 1 },
        Notice::SkippedLines { file: "a_R2.txt".into(), count: 1 },
    ]);
}

#[test]
fn padding_lines_show_up_as_skipped() {
    let p = FormatProfile::standard();
    let padding = " ".repeat(120);
    let files = vec![file("a_R1.txt", &[r1_line(&p, &juan()), padding, String::from("   "), r1_line(&p, &juan())])];
    let batch = ingest(&files, &opts(), &FileNameClassifier, None);

    let r1 = &batch.files[0];
    assert_eq!((r1.lines, r1.records, r1.blank, r1.skipped), (4, 2, 1, 1));
    assert_eq!(batch.notices(), vec![Notice::SkippedLines { file: "a_R1.txt".into(), count: 1 }]);
}

#[test]
fn parallel_matches_sequential() {
    let p = FormatProfile::standard();
    let files: Vec<_> = (0..9)
        .map(|i| {
            let kind = if i % 3 == 0 { "R2" } else { "R1" };
            let lines = if kind == "R1" {
                vec![r1_line(&p, &ana(CODE_B, i, i)), r1_line(&p, &juan())]
            } else {
                vec![r2_line(&p, CODE_A, &i.to_string(), "PISO 1")]
            };
            file(&format!("f{i}_{kind}.txt"), &lines)
        })
        .collect();

    let seq = ingest(&files, &opts(), &FileNameClassifier, None);
    let mut par_opts = opts();
    par_opts.parallel = true;
    let par = ingest(&files, &par_opts, &FileNameClassifier, None);
    assert_eq!(seq, par);
    assert_eq!(par.properties.len(), 12);
    assert_eq!(par.details.len(), 3);
}

#[test]
fn bom_and_crlf_do_not_shift_fields() {
    let p = FormatProfile::standard();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend(r1_line(&p, &juan()).into_bytes());
    bytes.extend(b"\r\n");
    let files = vec![cinta_catastral::SourceFile::new("x_R1.txt", bytes)];
    let batch = ingest(&files, &opts(), &FileNameClassifier, None);
    assert_eq!(batch.properties[0].full_code, CODE_A);
    assert_eq!(batch.properties[0].vintage, "2024");
}

#[test]
fn latin1_keeps_offsets_after_accented_owner() {
    let p = FormatProfile::standard();
    let mut r = juan();
    r.owner = "MARÍA NUÑEZ";
    let line = r1_line(&p, &r);
    // ISO-8859-1: one byte per char
    let bytes: Vec<u8> = line.chars().map(|c| c as u32 as u8).collect();
    let files = vec![cinta_catastral::SourceFile::new("x_R1.txt", bytes)];

    let mut o = opts();
    o.decoding = Decoding::Latin1;
    let batch = ingest(&files, &o, &FileNameClassifier, None);
    assert_eq!(batch.properties[0].owner_name, "MARÍA NUÑEZ");
    assert_eq!(batch.properties[0].assessed_value, 54_000_000.0);
}

#[derive(Default)]
struct Tally { begun: usize, done: Vec<(String, usize)>, skipped: Vec<String>, finished: bool }

impl Progress for Tally {
    fn begin(&mut self, total: usize) { self.begun = total; }
    fn item_done(&mut self, name: &str, records: usize) { self.done.push((name.into(), records)); }
    fn item_skipped(&mut self, name: &str) { self.skipped.push(name.into()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn progress_sees_every_file() {
    let p = FormatProfile::standard();
    let files = vec![file("a_R1.txt", &[r1_line(&p, &juan())]), file("notes.md", &[])];
    let mut t = Tally::default();
    ingest(&files, &opts(), &FileNameClassifier, Some(&mut t));
    assert_eq!(t.begun, 2);
    assert_eq!(t.done, vec![("a_R1.txt".to_string(), 1)]);
    assert_eq!(t.skipped, vec!["notes.md".to_string()]);
    assert!(t.finished);
}
