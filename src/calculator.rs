//! 태양광 펌프 시스템 사이징 계산 코어.
//!
//! 네 개의 입력값(Voc, Pm, K, Pp)과 시스템별 기준 전압(base)으로 N, S, Pf, Vtoc, Kf를
//! 계산한다. 순수 함수이며 오류를 반환하지 않는다. 계산 불가능한 입력은 0으로 채운다.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// N, S, Kf 계산에 공통으로 적용하는 반올림 규칙.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// 0.5는 가장 가까운 짝수로 (2.5 -> 2, 3.5 -> 4)
    #[default]
    HalfEven,
    /// 0.5는 0에서 먼 쪽으로 (2.5 -> 3)
    HalfAwayFromZero,
}

impl RoundingMode {
    /// 정수 자리로 반올림한다.
    pub fn round(self, value: f64) -> f64 {
        match self {
            RoundingMode::HalfEven => value.round_ties_even(),
            RoundingMode::HalfAwayFromZero => value.round(),
        }
    }

    /// 소수점 `digits` 자리로 반올림한다. 동점 판정은 f64의 정확한 십진 값으로 한다
    /// (1.925000000000000044 -> 1.93). 결과는 반올림된 십진 문자열에 가장 가까운 f64이고,
    /// 십진 변환이 불가능한 값(NaN, 무한대)은 그대로 돌려준다.
    pub fn round_to(self, value: f64, digits: u32) -> f64 {
        let strategy = match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
        };
        Decimal::from_f64_retain(value)
            .map(|d| d.round_dp_with_strategy(digits, strategy))
            .and_then(|d| d.to_string().parse().ok())
            .unwrap_or(value)
    }
}

/// 폼에서 입력받는 네 가지 값. 모두 0 이상이어야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingInputs {
    /// 패널 개방 전압 Voc [V]
    pub voc: f64,
    /// 패널 정격 출력 Pm [W]
    pub pm: f64,
    /// 안전 계수 K
    pub k: f64,
    /// 펌프 전력 Pp [W], 0 허용
    pub pp: f64,
}

impl Default for SizingInputs {
    fn default() -> Self {
        Self {
            voc: 49.6,
            pm: 550.0,
            k: 1.5,
            pp: 0.0,
        }
    }
}

impl SizingInputs {
    /// Voc와 Pm이 모두 양수일 때만 결과를 보여줄 수 있다.
    pub fn is_computable(&self) -> bool {
        self.voc > 0.0 && self.pm > 0.0
    }
}

/// 한 시스템 프로파일에 대한 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingResult {
    /// 스트링당 직렬 패널 수
    pub n: u32,
    /// 병렬 스트링 수
    pub s: u32,
    /// Voc × N
    pub pf: f64,
    /// N × S × Pm
    pub vtoc: f64,
    /// Vtoc / Pp. Pp가 0이면 해당 없음.
    pub kf: Option<f64>,
}

impl SizingResult {
    /// 화면/엑셀 표기용 Kf. 해당 없음은 0으로 표시한다.
    pub fn kf_or_zero(&self) -> f64 {
        self.kf.unwrap_or(0.0)
    }
}

/// 기본 반올림 규칙(HalfEven)으로 계산한다.
pub fn compute(voc: f64, pm: f64, k: f64, pp: f64, base: u32) -> SizingResult {
    compute_with(voc, pm, k, pp, base, RoundingMode::default())
}

/// 지정한 반올림 규칙으로 N, S, Pf, Vtoc, Kf를 계산한다.
pub fn compute_with(
    voc: f64,
    pm: f64,
    k: f64,
    pp: f64,
    base: u32,
    rounding: RoundingMode,
) -> SizingResult {
    let n = if voc > 0.0 {
        to_count(rounding.round(f64::from(base) / voc))
    } else {
        0
    };
    let s = if pm > 0.0 && n > 0 {
        to_count(rounding.round((k * pp) / (pm * f64::from(n)) + 0.4))
    } else {
        0
    };
    let pf = voc * f64::from(n);
    let vtoc = f64::from(n) * f64::from(s) * pm;
    let kf = if pp > 0.0 {
        Some(rounding.round_to(vtoc / pp, 2))
    } else {
        None
    };
    SizingResult { n, s, pf, vtoc, kf }
}

/// 반올림된 값을 개수로 변환한다. 음수/NaN은 0, 범위를 넘으면 u32::MAX로 포화된다.
fn to_count(rounded: f64) -> u32 {
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else {
        rounded.min(f64::from(u32::MAX)) as u32
    }
}
