//! 엑셀 내보내기 회귀 테스트. 기록한 파일을 calamine으로 다시 읽어 요약표와 비교한다.
use std::io::Cursor;

use approx::assert_relative_eq;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use solar_pump_toolbox::calculator::{RoundingMode, SizingInputs};
use solar_pump_toolbox::export::{
    column_widths, export_summary, export_with, write_artifact, ExportEngine, ExportError,
    UmyaEngine, XlsxWriterEngine, EXPORT_FILE_NAME, SHEET_NAME, XLSX_MIME,
};
use solar_pump_toolbox::summary::{build_summary, CellValue, SummaryRow, SUMMARY_COLUMNS};

fn sample_rows() -> Vec<SummaryRow> {
    let inputs = SizingInputs {
        voc: 49.6,
        pm: 550.0,
        k: 1.5,
        pp: 3000.0,
    };
    build_summary(inputs, RoundingMode::HalfEven).rows
}

fn assert_reparses_to(bytes: Vec<u8>, rows: &[SummaryRow]) {
    let mut wb: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open workbook");
    assert_eq!(wb.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = wb.worksheet_range(SHEET_NAME).expect("sheet range");
    let mut sheet_rows = range.rows();

    let header: Vec<String> = sheet_rows
        .next()
        .expect("header row")
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(header, SUMMARY_COLUMNS);

    let data: Vec<&[Data]> = sheet_rows.collect();
    assert_eq!(data.len(), rows.len());
    for (parsed, row) in data.iter().zip(rows) {
        assert_eq!(parsed.len(), SUMMARY_COLUMNS.len());
        for (cell, expected) in parsed.iter().zip(row.cells()) {
            match (cell, expected) {
                (Data::String(s), CellValue::Text(t)) => assert_eq!(s, &t),
                (Data::Float(f), CellValue::Number(v)) => assert_relative_eq!(*f, v),
                (Data::Int(i), CellValue::Number(v)) => assert_eq!(*i as f64, v),
                (Data::Float(f), CellValue::Integer(n)) => assert_eq!(*f, f64::from(n)),
                (Data::Int(i), CellValue::Integer(n)) => assert_eq!(*i, i64::from(n)),
                (other, expected) => panic!("unexpected cell {other:?}, want {expected:?}"),
            }
        }
    }
}

struct BrokenEngine;

impl ExportEngine for BrokenEngine {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn sizes_columns(&self) -> bool {
        true
    }

    fn write(&self, _rows: &[SummaryRow]) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Engine {
            engine: self.name(),
            message: "library unavailable".into(),
        })
    }
}

#[test]
fn primary_engine_round_trip() {
    let rows = sample_rows();
    let bytes = XlsxWriterEngine.write(&rows).expect("write");
    assert_reparses_to(bytes, &rows);
}

#[test]
fn fallback_engine_round_trip() {
    let rows = sample_rows();
    let bytes = UmyaEngine.write(&rows).expect("write");
    assert_reparses_to(bytes, &rows);
}

#[test]
fn export_uses_primary_engine_with_fixed_name_and_mime() {
    let artifact = export_summary(&sample_rows()).expect("export");
    assert_eq!(artifact.engine, "rust_xlsxwriter");
    assert!(artifact.sized_columns);
    assert_eq!(artifact.file_name, EXPORT_FILE_NAME);
    assert_eq!(artifact.mime, XLSX_MIME);
    // xlsx는 zip 컨테이너
    assert_eq!(&artifact.bytes[..2], b"PK");
}

#[test]
fn export_falls_back_when_primary_fails() {
    let rows = sample_rows();
    let artifact = export_with(&rows, &BrokenEngine, &UmyaEngine).expect("fallback export");
    assert_eq!(artifact.engine, "umya-spreadsheet");
    assert!(!artifact.sized_columns);
    assert_reparses_to(artifact.bytes, &rows);
}

#[test]
fn export_fails_when_both_engines_fail() {
    let err = export_with(&sample_rows(), &BrokenEngine, &BrokenEngine).unwrap_err();
    assert!(matches!(err, ExportError::AllEnginesFailed { .. }));
    assert!(err.to_string().contains("library unavailable"));
}

#[test]
fn column_widths_are_clamped() {
    let rows = sample_rows();
    let widths = column_widths(&rows);
    assert_eq!(widths.len(), SUMMARY_COLUMNS.len());
    // "380V Option 1" = 13자 + 2
    assert_eq!(widths[0], 15);
    // "420" 등 짧은 값은 최소 12
    assert_eq!(widths[1], 12);
    assert!(widths.iter().all(|w| (12..=40).contains(w)));
}

fn row_named(profile: &str) -> SummaryRow {
    SummaryRow {
        profile: profile.to_string(),
        base: 420,
        voc: 49.6,
        pm: 550.0,
        k: 1.5,
        pp: 0.0,
        n: 8,
        s: 0,
        pf: 396.8,
        vtoc: 0.0,
        kf: 0.0,
    }
}

#[test]
fn long_cell_is_capped_at_forty() {
    let widths = column_widths(&[row_named(&"x".repeat(38))]);
    assert_eq!(widths[0], 40);
    let widths = column_widths(&[row_named(&"x".repeat(39))]);
    assert_eq!(widths[0], 40);
    let widths = column_widths(&[row_named(&"x".repeat(60)), row_named("short")]);
    assert_eq!(widths[0], 40);
}

#[test]
fn width_grows_past_minimum_from_eleven_chars() {
    assert_eq!(column_widths(&[row_named(&"x".repeat(10))])[0], 12);
    assert_eq!(column_widths(&[row_named(&"x".repeat(11))])[0], 13);
    // 문자 수 기준(바이트 아님)
    assert_eq!(column_widths(&[row_named("Güneş Pompa")])[0], 13);
}

#[test]
fn empty_table_uses_base_width() {
    assert!(column_widths(&[]).iter().all(|w| *w == 14));
}

#[test]
fn artifact_written_into_directory_with_fixed_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = export_summary(&sample_rows()).expect("export");
    let path = write_artifact(&artifact, dir.path()).expect("write");
    assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));
    assert_eq!(std::fs::read(&path).expect("read"), artifact.bytes);

    let explicit = dir.path().join("custom.xlsx");
    let path = write_artifact(&artifact, &explicit).expect("write explicit");
    assert_eq!(path, explicit);
    assert!(explicit.exists());
}
