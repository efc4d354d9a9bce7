// SocialGaze - tests/e2e_dashboard.rs
//
// End-to-end tests for the load -> aggregate -> render pipeline.
//
// These tests exercise the real filesystem, real config.toml parsing and
// real CSV decoding -- no mocks, no stubs. Each test starts from a file on
// disk and inspects the finished dashboard report.

use socialgaze::app::source::DataSource;
use socialgaze::app::state::{AppState, DataState, View};
use socialgaze::core::dashboard::{
    DashboardReport, CHART_ACCOUNT_TYPES, CHART_ACTIVITY, CHART_INFLUENCERS, CHART_REGIONS,
};
use socialgaze::core::export::{export_json, export_series_csv};
use socialgaze::core::model::Value;
use socialgaze::platform::config::{load_config_file, AppConfig};
use socialgaze::ui::render::render_view;
use socialgaze::util::error::LoadError;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn loaded_state(path: PathBuf, config: &AppConfig) -> AppState {
    let mut state = AppState::from_config(DataSource::File(path), config);
    state.load();
    state
}

fn ready_report(state: &AppState) -> DashboardReport {
    match state.view() {
        View::Ready { report, .. } => report,
        other => panic!("expected a ready report, got {other:?}"),
    }
}

// =============================================================================
// Fixture dashboard
// =============================================================================

/// The sample fixture produces the expected cards.
#[test]
fn e2e_fixture_cards() {
    let state = loaded_state(fixture("accounts_sample.csv"), &AppConfig::default());
    let report = ready_report(&state);

    assert_eq!(report.total_accounts, 8);
    assert_eq!(report.active_accounts, 5);
    assert_eq!(report.inactive_accounts, 3);
    assert_eq!(report.profile_picture_count, 5);
}

/// Every chart is present, in order, with the expected slices.
#[test]
fn e2e_fixture_charts() {
    let state = loaded_state(fixture("accounts_sample.csv"), &AppConfig::default());
    let report = ready_report(&state);

    let regions = &report.chart(CHART_REGIONS).unwrap().series;
    assert_eq!(regions.value_of("United States"), Some(3));
    assert_eq!(regions.value_of("Canada"), Some(2));
    assert_eq!(regions.value_of("India"), Some(2));
    // The Brazil account is outside the configured regions.
    assert_eq!(regions.total(), 7);

    let activity = &report.chart(CHART_ACTIVITY).unwrap().series;
    assert_eq!(activity.value_of("Active"), Some(5));
    assert_eq!(activity.value_of("Inactive"), Some(3));

    let types = &report.chart(CHART_ACCOUNT_TYPES).unwrap().series;
    assert_eq!(types.value_of("Real"), Some(6));
    assert_eq!(types.value_of("Fake"), Some(2));

    let influencers = &report.chart(CHART_INFLUENCERS).unwrap().series;
    let values: Vec<i64> = influencers.points().iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1, 1, 1]);
}

/// Follower counts are numeric where present and absent where blank.
#[test]
fn e2e_fixture_followers_and_padding() {
    let state = loaded_state(fixture("accounts_sample.csv"), &AppConfig::default());
    let report = ready_report(&state);

    assert_eq!(report.followers[0].name.as_deref(), Some("ana_travels"));
    assert_eq!(report.followers[0].followers, Some(Value::Number(15_400.0)));
    assert_eq!(report.followers[4].followers, None);

    let DataState::Loaded(ref loaded) = state.data else {
        panic!("expected loaded state");
    };
    assert_eq!(loaded.report.rows_padded, 1);
    assert_eq!(loaded.report.malformed_lines, vec![9]);
    assert_eq!(loaded.dataset.records()[7].get("real_account_type"), None);
}

// =============================================================================
// Lifecycle edge cases
// =============================================================================

/// A missing source fails with NotFound and renders an error, not zeros.
#[test]
fn e2e_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let state = loaded_state(dir.path().join("absent.csv"), &AppConfig::default());

    let view = state.view();
    assert!(
        matches!(view, View::Failed(LoadError::NotFound { .. })),
        "expected NotFound, got {view:?}"
    );

    let mut buf = Vec::new();
    render_view(&view, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("Could not load data"));
    assert!(!text.contains("Active Accounts"));
}

/// A header-only file is loaded but reports no data.
#[test]
fn e2e_header_only_is_no_data() {
    let state = loaded_state(fixture("header_only.csv"), &AppConfig::default());
    assert!(matches!(state.view(), View::NoData { .. }));
    assert_eq!(state.dataset().unwrap().columns().len(), 3);
}

/// Semicolon-delimited files are detected without configuration.
#[test]
fn e2e_semicolon_delimiter_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.csv");
    fs::write(
        &path,
        "region;activity_level;profile_pic\nUSA;High;True\nIndia;Low;False\n",
    )
    .unwrap();

    let report = ready_report(&loaded_state(path, &AppConfig::default()));
    assert_eq!(report.active_accounts, 1);
    assert_eq!(report.profile_picture_count, 1);
}

// =============================================================================
// Config and export
// =============================================================================

/// Regions and the malformed-row policy come from config.toml.
#[test]
fn e2e_config_file_drives_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
        [loader]
        malformed_rows = "drop"

        [[dashboard.regions]]
        code = "Brazil"
        label = "Brasil"

        [[dashboard.regions]]
        code = "USA"
        "#,
    )
    .unwrap();

    let (config, warnings) = load_config_file(&config_path).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let state = loaded_state(fixture("accounts_sample.csv"), &config);
    let report = ready_report(&state);

    // The short quiet_user row is dropped.
    assert_eq!(report.total_accounts, 7);
    let regions = &report.chart(CHART_REGIONS).unwrap().series;
    let names: Vec<_> = regions.points().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Brasil", "USA"]);
    assert_eq!(regions.value_of("Brasil"), Some(1));
    assert_eq!(regions.value_of("USA"), Some(2));
}

/// JSON and CSV exports written to disk carry the same numbers.
#[test]
fn e2e_exports_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let state = loaded_state(fixture("accounts_sample.csv"), &AppConfig::default());
    let report = ready_report(&state);

    let json_path = dir.path().join("report.json");
    export_json(&report, fs::File::create(&json_path).unwrap(), "report.json").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["inactive_accounts"], 3);
    assert_eq!(json["charts"][2]["series"][1]["name"], "Fake");
    assert_eq!(json["charts"][2]["series"][1]["value"], 2);

    let csv_path = dir.path().join("report.csv");
    let rows =
        export_series_csv(&report, fs::File::create(&csv_path).unwrap(), "report.csv").unwrap();
    assert_eq!(rows, 13);
    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_text.contains("Number of influencers in each region,India,1\n"));
}
