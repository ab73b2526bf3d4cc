use std::path::PathBuf;

use clap::Parser;

use crate::calculator::SizingInputs;

/// 태양광 펌프 드라이브 사이징 계산기 (CLI)
#[derive(Debug, Clone, Parser)]
#[command(name = "solar_pump_toolbox_cli", version, about)]
pub struct Args {
    /// 패널 개방 전압 Voc [V]
    #[arg(long, value_parser = parse_non_negative)]
    pub voc: Option<f64>,

    /// 패널 정격 출력 Pm [W]
    #[arg(long, value_parser = parse_non_negative)]
    pub pm: Option<f64>,

    /// 안전 계수 K
    #[arg(long, value_parser = parse_non_negative)]
    pub k: Option<f64>,

    /// 펌프 전력 Pp [W]
    #[arg(long, value_parser = parse_non_negative)]
    pub pp: Option<f64>,

    /// 값을 대화형으로 입력받는다
    #[arg(short, long)]
    pub interactive: bool,

    /// 한 프로파일의 상세 결과만 표시한다 (요약표는 항상 전체)
    #[arg(long)]
    pub profile: Option<String>,

    /// 엑셀 요약을 저장할 파일 또는 디렉터리
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// 언어 (auto/en/tr)
    #[arg(short = 'L', long = "lang")]
    pub lang: Option<String>,

    /// 설정 파일 경로
    #[arg(long, value_name = "PATH", default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl Args {
    /// 숫자 플래그가 하나도 없으면 대화형으로 입력받는다.
    pub fn wants_prompt(&self) -> bool {
        self.interactive
            || (self.voc.is_none() && self.pm.is_none() && self.k.is_none() && self.pp.is_none())
    }

    /// 주어진 플래그로 기본값을 덮어쓴다.
    pub fn merge_into(&self, defaults: SizingInputs) -> SizingInputs {
        SizingInputs {
            voc: self.voc.unwrap_or(defaults.voc),
            pm: self.pm.unwrap_or(defaults.pm),
            k: self.k.unwrap_or(defaults.k),
            pp: self.pp.unwrap_or(defaults.pp),
        }
    }
}

/// 0 이상의 유한한 실수만 허용한다.
pub fn parse_non_negative(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("숫자가 아닙니다: {s}"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("0 이상의 값이어야 합니다: {s}"));
    }
    Ok(v)
}
