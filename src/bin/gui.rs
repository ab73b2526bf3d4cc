#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use solar_pump_toolbox::{
    app,
    calculator::{SizingInputs, SizingResult},
    config, export,
    i18n::{self, keys},
    logging,
    profiles::SYSTEM_PROFILES,
    summary::{self, Summary, SUMMARY_COLUMNS},
};
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/tr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        eprintln!("Config error: {e}");
        config::Config::default()
    });
    logging::init_with_level(&app_cfg.log_level);
    let tr = app::translator_for(cli_lang.as_deref(), &app_cfg);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([860.0, 760.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let title = tr.t(keys::APP_TITLE);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, tr))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["logo.png", "assets/logo.png", "../logo.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 결과 탭에 표시할 (라벨, 값) 목록. N, S는 정수, 나머지는 소수 둘째 자리.
fn metric_rows(tr: &i18n::Translator, r: &SizingResult) -> Vec<(String, String)> {
    vec![
        (tr.t(keys::RESULT_N), r.n.to_string()),
        (tr.t(keys::RESULT_S), r.s.to_string()),
        (tr.t(keys::RESULT_PF), format!("{:.2}", r.pf)),
        (tr.t(keys::RESULT_VTOC), format!("{:.2}", r.vtoc)),
        (tr.t(keys::RESULT_KF), format!("{:.2}", r.kf_or_zero())),
    ]
}

struct ExportStatus {
    message: String,
    is_error: bool,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    inputs: SizingInputs,
    summary: Option<Summary>,
    tab: usize,
    export_status: Option<ExportStatus>,
}

impl GuiApp {
    fn new(config: config::Config, tr: i18n::Translator) -> Self {
        Self {
            inputs: config.defaults,
            config,
            tr,
            summary: None,
            tab: 0,
            export_status: None,
        }
    }

    fn calculate(&mut self) {
        self.summary = Some(summary::build_summary(self.inputs, self.config.rounding));
        self.export_status = None;
    }

    fn export(&mut self) {
        let Some(summary) = &self.summary else {
            return;
        };
        let mut dialog = FileDialog::new()
            .set_file_name(export::EXPORT_FILE_NAME)
            .add_filter("Excel", &["xlsx"]);
        if let Some(dir) = &self.config.export_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            self.export_status = Some(ExportStatus {
                message: self.tr.t(keys::EXPORT_CANCELLED),
                is_error: false,
            });
            return;
        };
        let result = export::export_summary(&summary.rows)
            .and_then(|artifact| export::write_artifact(&artifact, &path).map(|p| (artifact, p)));
        self.export_status = Some(match result {
            Ok((artifact, saved)) => {
                let mut message = self
                    .tr
                    .t_with(keys::EXPORT_SAVED, &[("path", saved.display().to_string())]);
                if !artifact.sized_columns {
                    message.push('\n');
                    message.push_str(&self.tr.t(keys::EXPORT_FALLBACK_NOTE));
                }
                ExportStatus {
                    message,
                    is_error: false,
                }
            }
            Err(e) => ExportStatus {
                message: format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
                is_error: true,
            },
        });
    }

    fn input_form(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::FORM_HEADING));
        ui.label(self.tr.t(keys::FORM_INTRO));
        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                let fields: [(&str, &mut f64); 4] = [
                    (keys::LABEL_VOC, &mut self.inputs.voc),
                    (keys::LABEL_PM, &mut self.inputs.pm),
                    (keys::LABEL_K, &mut self.inputs.k),
                    (keys::LABEL_PP, &mut self.inputs.pp),
                ];
                for (key, value) in fields {
                    ui.label(self.tr.t(key));
                    ui.add(
                        egui::DragValue::new(value)
                            .speed(0.1)
                            .clamp_range(0.0..=f64::MAX)
                            .fixed_decimals(2),
                    );
                    ui.end_row();
                }
            });
        if ui.button(self.tr.t(keys::BUTTON_CALCULATE)).clicked() {
            self.calculate();
        }
    }

    fn profile_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for (idx, profile) in SYSTEM_PROFILES.iter().enumerate() {
                ui.selectable_value(&mut self.tab, idx, profile.name);
            }
        });
        ui.separator();
        let profile = SYSTEM_PROFILES[self.tab];
        let vars = [
            ("name", profile.name.to_string()),
            ("base", profile.base.to_string()),
        ];
        let Some(summary) = &self.summary else {
            ui.label(self.tr.t_with(keys::INFO_BEFORE_SUBMIT, &vars));
            return;
        };
        if summary.needs_warning() {
            ui.colored_label(
                egui::Color32::from_rgb(230, 160, 40),
                self.tr.t(keys::WARNING_VOC_PM),
            );
            return;
        }
        ui.strong(self.tr.t_with(keys::RESULT_HEADING, &vars));
        egui::Grid::new("metric_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in metric_rows(&self.tr, &summary.results[self.tab].result) {
                    ui.label(label);
                    ui.monospace(value);
                    ui.end_row();
                }
            });
    }

    fn summary_section(&mut self, ui: &mut egui::Ui) {
        let Some(summary) = &self.summary else {
            return;
        };
        ui.heading(self.tr.t(keys::SUMMARY_HEADING));
        egui::ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("summary_grid")
                .striped(true)
                .show(ui, |ui| {
                    for title in SUMMARY_COLUMNS {
                        ui.strong(title);
                    }
                    ui.end_row();
                    for row in &summary.rows {
                        for cell in row.cells() {
                            ui.label(cell.grid_text());
                        }
                        ui.end_row();
                    }
                });
        });
        if ui.button(self.tr.t(keys::BUTTON_EXPORT)).clicked() {
            self.export();
        }
        if let Some(status) = &self.export_status {
            if status.is_error {
                ui.colored_label(egui::Color32::RED, &status.message);
            } else {
                ui.label(&status.message);
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.heading(self.tr.t(keys::APP_TITLE));
        });
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.small(self.tr.t(keys::FOOTER));
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.input_form(ui);
                ui.separator();
                self.profile_tabs(ui);
                ui.separator();
                self.summary_section(ui);
            });
        });
    }
}
