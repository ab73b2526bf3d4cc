//! tracing 구독자 초기화.
//!
//! 기본 레벨은 설정 파일의 `log_level`(기본 "warn")이며, `RUST_LOG` 환경 변수가 있으면
//! 그것이 우선한다. 로그는 결과 출력과 섞이지 않도록 stderr로 보낸다.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// 지정한 필터 문자열로 초기화한다. 두 번째 호출부터는 무시된다.
pub fn init_with_level(level: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    });
}
