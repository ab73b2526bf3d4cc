//! 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코드를 쓰도록 한다.

pub mod app;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod export;
pub mod i18n;
pub mod logging;
pub mod profiles;
pub mod summary;
pub mod ui_cli;
