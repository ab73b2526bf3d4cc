use std::io::{self, BufRead, Write};

use comfy_table::{modifiers, presets, Cell, CellAlignment, Color, Table};

use crate::app::AppError;
use crate::calculator::SizingInputs;
use crate::i18n::{keys, Translator};
use crate::profiles::SystemProfile;
use crate::summary::{ProfileResult, Summary, SUMMARY_COLUMNS};

/// 네 가지 입력값을 표준 입력에서 받는다. 빈 줄이면 기본값을 쓴다.
pub fn prompt_inputs(tr: &Translator, defaults: SizingInputs) -> Result<SizingInputs, AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    read_inputs(&mut input, &mut output, tr, defaults)
}

pub fn read_inputs<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    tr: &Translator,
    defaults: SizingInputs,
) -> Result<SizingInputs, AppError> {
    writeln!(output, "\n=== {} ===", tr.t(keys::APP_TITLE))?;
    writeln!(output, "{}", tr.t(keys::FORM_INTRO))?;
    Ok(SizingInputs {
        voc: read_non_negative(input, output, tr, &tr.t(keys::LABEL_VOC), defaults.voc)?,
        pm: read_non_negative(input, output, tr, &tr.t(keys::LABEL_PM), defaults.pm)?,
        k: read_non_negative(input, output, tr, &tr.t(keys::LABEL_K), defaults.k)?,
        pp: read_non_negative(input, output, tr, &tr.t(keys::LABEL_PP), defaults.pp)?,
    })
}

fn read_non_negative<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    tr: &Translator,
    label: &str,
    default: f64,
) -> Result<f64, AppError> {
    let hint = tr.t_with(keys::PROMPT_DEFAULT_HINT, &[("default", format!("{default:.2}"))]);
    loop {
        write!(output, "{label} [{hint}]: ")?;
        output.flush()?;
        let mut buf = String::new();
        if input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        let s = buf.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.replace(',', ".").parse::<f64>() {
            Ok(v) if !v.is_finite() => writeln!(output, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
            Ok(v) if v < 0.0 => writeln!(output, "{}", tr.t(keys::ERROR_NEGATIVE))?,
            Ok(v) => return Ok(v),
            Err(_) => writeln!(output, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
        }
    }
}

/// 프로파일 하나의 결과 블록을 만든다. Voc/Pm이 0 이하이면 경고로 대체한다.
pub fn profile_block(tr: &Translator, inputs: &SizingInputs, pr: &ProfileResult) -> String {
    if !inputs.is_computable() {
        return format!("{}\n⚠ {}", pr.profile.name, tr.t(keys::WARNING_VOC_PM));
    }
    let heading = tr.t_with(
        keys::RESULT_HEADING,
        &[
            ("name", pr.profile.name.to_string()),
            ("base", pr.profile.base.to_string()),
        ],
    );
    let r = &pr.result;
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    let rows = [
        (keys::RESULT_N, r.n.to_string()),
        (keys::RESULT_S, r.s.to_string()),
        (keys::RESULT_PF, format!("{:.2}", r.pf)),
        (keys::RESULT_VTOC, format!("{:.2}", r.vtoc)),
        (keys::RESULT_KF, format!("{:.2}", r.kf_or_zero())),
    ];
    for (key, value) in rows {
        table.add_row(vec![
            Cell::new(tr.t(key)),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    format!("{heading}\n{table}")
}

/// 전체 프로파일 요약표.
pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(SUMMARY_COLUMNS.to_vec());
    for row in &summary.rows {
        let zeroed = row.n == 0 || row.s == 0;
        table.add_row(
            row.cells()
                .into_iter()
                .enumerate()
                .map(|(col, cell)| {
                    let cell = if col == 0 {
                        Cell::new(cell.grid_text())
                    } else {
                        Cell::new(cell.grid_text()).set_alignment(CellAlignment::Right)
                    };
                    if zeroed && col >= 6 {
                        cell.fg(Color::DarkYellow)
                    } else {
                        cell
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// 결과를 표준 출력에 찍는다. `only`가 주어지면 해당 프로파일 블록만 보여준다.
pub fn print_results(tr: &Translator, summary: &Summary, only: Option<&SystemProfile>) {
    for pr in &summary.results {
        if only.is_some_and(|p| p != &pr.profile) {
            continue;
        }
        println!("\n{}", profile_block(tr, &summary.inputs, pr));
    }
    println!("\n### {}", tr.t(keys::SUMMARY_HEADING));
    println!("{}", summary_table(summary));
}
