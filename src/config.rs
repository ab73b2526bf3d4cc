use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculator::{RoundingMode, SizingInputs};

/// 기본 설정 파일 경로(작업 디렉터리 기준).
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/en/tr)
    pub language: String,
    /// N, S, Kf 반올림 규칙
    pub rounding: RoundingMode,
    /// 엑셀 파일을 저장할 기본 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// tracing 필터 (RUST_LOG가 있으면 무시)
    pub log_level: String,
    /// 입력 폼 기본값
    pub defaults: SizingInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            rounding: RoundingMode::default(),
            export_dir: None,
            log_level: "warn".to_string(),
            defaults: SizingInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 음수 등 허용되지 않는 기본값
    #[error("잘못된 기본 입력값: {0}")]
    InvalidDefaults(&'static str),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 기록한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

/// 지정 경로의 설정을 읽는다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    /// 설정을 지정 경로에 TOML로 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 폼 기본값도 입력 제약(0 이상)을 따라야 한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.defaults;
        let checks = [("voc", d.voc), ("pm", d.pm), ("k", d.k), ("pp", d.pp)];
        for (name, value) in checks {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidDefaults(name));
            }
        }
        Ok(())
    }
}
