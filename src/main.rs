use clap::Parser;
use solar_pump_toolbox::{app, cli::Args, i18n::keys, logging};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let args = Args::parse();
    if let Err(err) = try_run(&args) {
        let tr = app::translator_for(args.lang.as_deref(), &Default::default());
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(args: &Args) -> Result<(), app::AppError> {
    let cfg = app::load_config(&args.config)?;
    logging::init_with_level(&cfg.log_level);
    let tr = app::translator_for(args.lang.as_deref(), &cfg);
    app::run(args, &cfg, &tr)?;
    Ok(())
}
