use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::cli::Args;
use crate::config::{self, Config, ConfigError};
use crate::export::{self, ExportError};
use crate::i18n::{self, keys, Translator};
use crate::profiles::{self, SystemProfile};
use crate::summary::{self, Summary};
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 엑셀 내보내기 오류
    #[error("내보내기 오류: {0}")]
    Export(#[from] ExportError),
    /// 입력 도중 표준 입력이 닫힘
    #[error("입력이 종료되었습니다")]
    InputClosed,
    /// 존재하지 않는 프로파일 이름
    #[error("알 수 없는 시스템 프로파일: {0}")]
    UnknownProfile(String),
}

/// 언어 플래그와 설정을 바탕으로 번역기를 만든다. 언어팩은 `locales/`에서 찾는다.
pub fn translator_for(cli_lang: Option<&str>, cfg: &Config) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(cfg.language.as_str()));
    Translator::new_with_pack(&lang, Path::new("locales"))
}

/// 입력을 모아 계산하고 결과를 출력한 뒤 필요하면 엑셀로 내보낸다.
pub fn run(args: &Args, cfg: &Config, tr: &Translator) -> Result<Summary, AppError> {
    let only: Option<&SystemProfile> = match args.profile.as_deref() {
        Some(name) => Some(
            profiles::find_profile(name).ok_or_else(|| AppError::UnknownProfile(name.to_string()))?,
        ),
        None => None,
    };

    let defaults = args.merge_into(cfg.defaults);
    let inputs = if args.wants_prompt() {
        ui_cli::prompt_inputs(tr, defaults)?
    } else {
        defaults
    };
    info!(?inputs, rounding = ?cfg.rounding, "calculating");
    let summary = summary::build_summary(inputs, cfg.rounding);
    ui_cli::print_results(tr, &summary, only);

    if let Some(target) = export_target(args, cfg) {
        let artifact = export::export_summary(&summary.rows)?;
        let path = export::write_artifact(&artifact, &target)?;
        println!(
            "\n{}",
            tr.t_with(keys::EXPORT_SAVED, &[("path", path.display().to_string())])
        );
        if !artifact.sized_columns {
            println!("{}", tr.t(keys::EXPORT_FALLBACK_NOTE));
        }
    }
    Ok(summary)
}

/// `--export`가 우선이며, 없으면 설정의 export_dir을 쓴다.
fn export_target(args: &Args, cfg: &Config) -> Option<PathBuf> {
    args.export.clone().or_else(|| cfg.export_dir.clone())
}

/// 설정 파일을 로드한다. CLI에서 지정한 경로가 기본 경로와 같으면 없을 때 새로 만든다.
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let cfg = if path == Path::new(config::DEFAULT_CONFIG_PATH) {
        config::load_or_default()?
    } else {
        config::load_from(path)?
    };
    Ok(cfg)
}
