//! 다섯 시스템 프로파일에 계산기를 적용하고 요약표를 만든다.

use tracing::debug;

use crate::calculator::{self, RoundingMode, SizingInputs, SizingResult};
use crate::profiles::{SystemProfile, SYSTEM_PROFILES};

/// 요약표/엑셀의 열 이름. 순서가 곧 열 순서다.
pub const SUMMARY_COLUMNS: [&str; 11] = [
    "Profile", "Base", "Voc", "Pm", "K", "Pp", "N", "S", "Pf", "Vtoc", "Kf",
];

/// 프로파일 하나의 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileResult {
    pub profile: SystemProfile,
    pub result: SizingResult,
}

/// 요약표의 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub profile: String,
    pub base: u32,
    pub voc: f64,
    pub pm: f64,
    pub k: f64,
    pub pp: f64,
    pub n: u32,
    pub s: u32,
    pub pf: f64,
    pub vtoc: f64,
    /// 해당 없음(Pp=0)은 0으로 기록한다.
    pub kf: f64,
}

/// 표의 한 칸. 엑셀 기록 시 문자열/숫자 셀을 구분하기 위해 쓴다.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Base, N, S 같은 정수 열
    Integer(u32),
    Number(f64),
}

impl CellValue {
    /// 열 너비 산정에 쓰는 문자열 표현(f64 Display 그대로).
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(v) => format!("{v}"),
        }
    }

    /// 화면 표(CLI/GUI)용 표현. 실수는 소수 둘째 자리로 고정한다.
    pub fn grid_text(&self) -> String {
        match self {
            CellValue::Number(v) => format!("{v:.2}"),
            other => other.display(),
        }
    }

    /// 엑셀 숫자 셀 값. 문자열 셀이면 None.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Text(_) => None,
            CellValue::Integer(n) => Some(f64::from(*n)),
            CellValue::Number(v) => Some(*v),
        }
    }
}

impl SummaryRow {
    fn from_result(inputs: &SizingInputs, pr: &ProfileResult) -> Self {
        Self {
            profile: pr.profile.name.to_string(),
            base: pr.profile.base,
            voc: inputs.voc,
            pm: inputs.pm,
            k: inputs.k,
            pp: inputs.pp,
            n: pr.result.n,
            s: pr.result.s,
            pf: pr.result.pf,
            vtoc: pr.result.vtoc,
            kf: pr.result.kf_or_zero(),
        }
    }

    /// `SUMMARY_COLUMNS` 순서의 셀 목록.
    pub fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.profile.clone()),
            CellValue::Integer(self.base),
            CellValue::Number(self.voc),
            CellValue::Number(self.pm),
            CellValue::Number(self.k),
            CellValue::Number(self.pp),
            CellValue::Integer(self.n),
            CellValue::Integer(self.s),
            CellValue::Number(self.pf),
            CellValue::Number(self.vtoc),
            CellValue::Number(self.kf),
        ]
    }
}

/// 한 번의 제출(계산)에 대한 전체 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub inputs: SizingInputs,
    pub results: Vec<ProfileResult>,
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    /// Voc 또는 Pm이 0 이하이면 프로파일별 결과 대신 경고를 보여야 한다.
    pub fn needs_warning(&self) -> bool {
        !self.inputs.is_computable()
    }
}

/// 모든 고정 프로파일에 같은 입력을 적용해 요약을 만든다.
pub fn build_summary(inputs: SizingInputs, rounding: RoundingMode) -> Summary {
    let results: Vec<ProfileResult> = SYSTEM_PROFILES
        .iter()
        .map(|profile| {
            let result = calculator::compute_with(
                inputs.voc,
                inputs.pm,
                inputs.k,
                inputs.pp,
                profile.base,
                rounding,
            );
            debug!(profile = profile.name, base = profile.base, ?result, "profile sized");
            ProfileResult {
                profile: *profile,
                result,
            }
        })
        .collect();
    let rows = results
        .iter()
        .map(|pr| SummaryRow::from_result(&inputs, pr))
        .collect();
    Summary {
        inputs,
        results,
        rows,
    }
}
