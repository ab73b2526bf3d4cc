use solar_pump_toolbox::calculator::{RoundingMode, SizingInputs};
use solar_pump_toolbox::profiles::{find_profile, SYSTEM_PROFILES};
use solar_pump_toolbox::summary::{build_summary, CellValue, SUMMARY_COLUMNS};

#[test]
fn one_row_per_profile_in_fixed_order() {
    let summary = build_summary(SizingInputs::default(), RoundingMode::HalfEven);
    assert_eq!(summary.rows.len(), 5);
    let names: Vec<&str> = summary.rows.iter().map(|r| r.profile.as_str()).collect();
    assert_eq!(
        names,
        ["220V Pump", "380V Option 1", "380V Option 2", "380V Option 3", "440V Pump"]
    );
    let bases: Vec<u32> = summary.rows.iter().map(|r| r.base).collect();
    assert_eq!(bases, [420, 662, 700, 720, 720]);
    assert!(!summary.needs_warning());
}

#[test]
fn rows_carry_inputs_and_results() {
    let inputs = SizingInputs {
        voc: 49.6,
        pm: 550.0,
        k: 1.5,
        pp: 2200.0,
    };
    let summary = build_summary(inputs, RoundingMode::HalfEven);
    for (row, pr) in summary.rows.iter().zip(&summary.results) {
        assert_eq!(row.voc, 49.6);
        assert_eq!(row.pm, 550.0);
        assert_eq!(row.k, 1.5);
        assert_eq!(row.pp, 2200.0);
        assert_eq!(row.n, pr.result.n);
        assert_eq!(row.s, pr.result.s);
        assert_eq!(row.pf, pr.result.pf);
        assert_eq!(row.vtoc, pr.result.vtoc);
        assert_eq!(row.kf, pr.result.kf_or_zero());
    }
}

#[test]
fn degenerate_inputs_still_produce_zeroed_rows() {
    let inputs = SizingInputs {
        voc: 0.0,
        pm: 550.0,
        k: 1.5,
        pp: 0.0,
    };
    let summary = build_summary(inputs, RoundingMode::HalfEven);
    assert!(summary.needs_warning());
    assert_eq!(summary.rows.len(), 5);
    for row in &summary.rows {
        assert_eq!((row.n, row.s, row.pf, row.vtoc, row.kf), (0, 0, 0.0, 0.0, 0.0));
    }
}

#[test]
fn cells_follow_column_order() {
    let summary = build_summary(SizingInputs::default(), RoundingMode::HalfEven);
    let cells = summary.rows[0].cells();
    assert_eq!(cells.len(), SUMMARY_COLUMNS.len());
    assert_eq!(cells[0], CellValue::Text("220V Pump".into()));
    assert_eq!(cells[1], CellValue::Integer(420));
    assert_eq!(cells[6], CellValue::Integer(8));
    assert_eq!(cells[10], CellValue::Number(0.0));
}

#[test]
fn grid_text_fixes_reals_to_two_decimals() {
    assert_eq!(CellValue::Number(644.8000000000001).grid_text(), "644.80");
    assert_eq!(CellValue::Number(550.0).grid_text(), "550.00");
    assert_eq!(CellValue::Integer(13).grid_text(), "13");
    assert_eq!(CellValue::Text("440V Pump".into()).grid_text(), "440V Pump");
    // 열 너비용 표현은 그대로
    assert_eq!(CellValue::Number(550.0).display(), "550");
}

#[test]
fn profiles_found_by_name() {
    assert_eq!(find_profile("440v pump"), Some(&SYSTEM_PROFILES[4]));
    assert_eq!(find_profile(" 380V Option 2 ").map(|p| p.base), Some(700));
    assert!(find_profile("110V").is_none());
}
