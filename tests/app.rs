use clap::Parser;
use solar_pump_toolbox::app::{self, AppError};
use solar_pump_toolbox::cli::Args;
use solar_pump_toolbox::config::Config;
use solar_pump_toolbox::export::EXPORT_FILE_NAME;
use solar_pump_toolbox::i18n::Translator;

#[test]
fn flags_run_without_prompt_and_export_to_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dir_arg = dir.path().to_string_lossy().to_string();
    let args = Args::parse_from([
        "cli", "--voc", "49.6", "--pm", "550", "--k", "1.5", "--pp", "2200", "--export", dir_arg.as_str(),
    ]);
    let summary = app::run(&args, &Config::default(), &Translator::new("en")).expect("run");
    assert_eq!(summary.rows.len(), 5);
    assert_eq!(summary.rows[0].s, 1);
    assert!(dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn config_export_dir_is_used_when_flag_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = Config::default();
    cfg.export_dir = Some(dir.path().to_path_buf());
    let args = Args::parse_from(["cli", "--pp", "1000"]);
    app::run(&args, &cfg, &Translator::new("en")).expect("run");
    assert!(dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn unknown_profile_is_rejected() {
    let args = Args::parse_from(["cli", "--voc", "49.6", "--profile", "110V"]);
    let err = app::run(&args, &Config::default(), &Translator::new("en")).unwrap_err();
    assert!(matches!(err, AppError::UnknownProfile(name) if name == "110V"));
}
