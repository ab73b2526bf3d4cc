//! 요약표를 엑셀(.xlsx) 파일로 내보낸다.
//!
//! 기본 엔진(rust_xlsxwriter)을 먼저 시도하고, 실패하면 보조 엔진(umya-spreadsheet)으로
//! 같은 내용을 기록한다. 보조 엔진은 열 너비를 지정하지 않는다.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ColNum, RowNum, Workbook, XlsxError};
use thiserror::Error;
use tracing::{info, warn};

use crate::summary::{CellValue, SummaryRow, SUMMARY_COLUMNS};

/// 내려받기 파일 이름(고정).
pub const EXPORT_FILE_NAME: &str = "solar_pump_sizing_summary.xlsx";
/// 표준 스프레드시트 MIME 타입.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// 시트 이름.
pub const SHEET_NAME: &str = "Sizing Summary";

const MIN_COLUMN_WIDTH: usize = 12;
const MAX_COLUMN_WIDTH: usize = 40;

/// 내보내기 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ExportError {
    /// 특정 엔진의 기록 실패
    #[error("{engine} 엔진 오류: {message}")]
    Engine {
        engine: &'static str,
        message: String,
    },
    /// 기본/보조 엔진 모두 실패
    #[error("엑셀 내보내기 실패 (기본: {primary}; 보조: {fallback})")]
    AllEnginesFailed {
        primary: Box<ExportError>,
        fallback: Box<ExportError>,
    },
    /// 파일 저장 오류
    #[error("파일 저장 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// 요약표를 .xlsx 바이트로 기록하는 엔진.
pub trait ExportEngine {
    fn name(&self) -> &'static str;

    /// 열 너비를 내용 길이에 맞추는지 여부.
    fn sizes_columns(&self) -> bool;

    fn write(&self, rows: &[SummaryRow]) -> Result<Vec<u8>, ExportError>;
}

/// 내보내기 결과물. 파일 이름과 MIME 타입은 고정이다.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    /// 실제로 사용된 엔진 이름
    pub engine: &'static str,
    pub sized_columns: bool,
}

/// 기본 엔진.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriterEngine;

/// 보조 엔진.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmyaEngine;

/// 열별 너비: 셀 문자열 최대 길이 + 2, [12, 40] 범위로 제한.
/// 행이 없으면 12를 기준 길이로 본다.
pub fn column_widths(rows: &[SummaryRow]) -> Vec<usize> {
    let cells: Vec<Vec<CellValue>> = rows.iter().map(SummaryRow::cells).collect();
    (0..SUMMARY_COLUMNS.len())
        .map(|col| {
            let longest = cells
                .iter()
                .map(|row| row[col].display().chars().count())
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH);
            (longest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

impl ExportEngine for XlsxWriterEngine {
    fn name(&self) -> &'static str {
        "rust_xlsxwriter"
    }

    fn sizes_columns(&self) -> bool {
        true
    }

    fn write(&self, rows: &[SummaryRow]) -> Result<Vec<u8>, ExportError> {
        let engine_err = |e: XlsxError| ExportError::Engine {
            engine: self.name(),
            message: e.to_string(),
        };
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).map_err(engine_err)?;
        for (col, title) in SUMMARY_COLUMNS.iter().enumerate() {
            sheet
                .write_string(0, col as ColNum, *title)
                .map_err(engine_err)?;
        }
        for (idx, row) in rows.iter().enumerate() {
            let xl_row = idx as RowNum + 1;
            for (col, cell) in row.cells().into_iter().enumerate() {
                match (cell.as_number(), cell) {
                    (Some(v), _) => {
                        sheet
                            .write_number(xl_row, col as ColNum, v)
                            .map_err(engine_err)?;
                    }
                    (None, cell) => {
                        sheet
                            .write_string(xl_row, col as ColNum, cell.display())
                            .map_err(engine_err)?;
                    }
                }
            }
        }
        for (col, width) in column_widths(rows).into_iter().enumerate() {
            sheet
                .set_column_width(col as ColNum, width as f64)
                .map_err(engine_err)?;
        }
        workbook.save_to_buffer().map_err(engine_err)
    }
}

impl ExportEngine for UmyaEngine {
    fn name(&self) -> &'static str {
        "umya-spreadsheet"
    }

    fn sizes_columns(&self) -> bool {
        false
    }

    fn write(&self, rows: &[SummaryRow]) -> Result<Vec<u8>, ExportError> {
        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        let sheet = book.new_sheet(SHEET_NAME).map_err(|e| ExportError::Engine {
            engine: self.name(),
            message: e.to_string(),
        })?;
        // umya 좌표는 (열, 행) 1부터 시작
        for (col, title) in SUMMARY_COLUMNS.iter().enumerate() {
            sheet.get_cell_mut((col as u32 + 1, 1u32)).set_value_string(*title);
        }
        for (idx, row) in rows.iter().enumerate() {
            let xl_row = idx as u32 + 2;
            for (col, cell) in row.cells().into_iter().enumerate() {
                let target = sheet.get_cell_mut((col as u32 + 1, xl_row));
                match cell.as_number() {
                    Some(v) => {
                        target.set_value_number(v);
                    }
                    None => {
                        target.set_value_string(cell.display());
                    }
                }
            }
        }
        let mut buffer = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer).map_err(|e| {
            ExportError::Engine {
                engine: self.name(),
                message: e.to_string(),
            }
        })?;
        Ok(buffer.into_inner())
    }
}

/// 기본 엔진, 실패 시 보조 엔진으로 요약표를 내보낸다.
pub fn export_summary(rows: &[SummaryRow]) -> Result<ExportArtifact, ExportError> {
    export_with(rows, &XlsxWriterEngine, &UmyaEngine)
}

/// 엔진 두 개를 순서대로 시도한다.
pub fn export_with(
    rows: &[SummaryRow],
    primary: &dyn ExportEngine,
    fallback: &dyn ExportEngine,
) -> Result<ExportArtifact, ExportError> {
    let primary_err = match run_engine(rows, primary) {
        Ok(artifact) => return Ok(artifact),
        Err(e) => e,
    };
    warn!(
        engine = primary.name(),
        error = %primary_err,
        fallback = fallback.name(),
        "primary export engine failed, retrying with fallback"
    );
    run_engine(rows, fallback).map_err(|fallback_err| ExportError::AllEnginesFailed {
        primary: Box::new(primary_err),
        fallback: Box::new(fallback_err),
    })
}

fn run_engine(rows: &[SummaryRow], engine: &dyn ExportEngine) -> Result<ExportArtifact, ExportError> {
    let bytes = engine.write(rows)?;
    info!(engine = engine.name(), bytes = bytes.len(), rows = rows.len(), "summary exported");
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime: XLSX_MIME,
        bytes,
        engine: engine.name(),
        sized_columns: engine.sizes_columns(),
    })
}

/// 결과물을 디스크에 저장한다. `target`이 디렉터리면 고정 파일 이름을 붙인다.
pub fn write_artifact(artifact: &ExportArtifact, target: &Path) -> Result<PathBuf, ExportError> {
    let path = if target.is_dir() {
        target.join(artifact.file_name)
    } else {
        target.to_path_buf()
    };
    fs::write(&path, &artifact.bytes)?;
    info!(path = %path.display(), "export file written");
    Ok(path)
}
