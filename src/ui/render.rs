// SocialGaze - ui/render.rs
//
// Plain-text rendering of a dashboard view. Consumes finished series only;
// no aggregation happens here.

use crate::app::state::View;
use crate::core::dashboard::{
    Chart, ChartKind, DashboardReport, CARD_ACTIVE, CARD_INACTIVE, CARD_PROFILE_PICTURE,
};
use crate::util::constants;
use std::io::{self, Write};

pub const DASHBOARD_TITLE: &str = "Social Gaze - A Social Media Analyzing Tool";

/// Render any view state. Non-ready states produce a short status line
/// rather than zeroed aggregates.
pub fn render_view<W: Write>(view: &View<'_>, out: &mut W) -> io::Result<()> {
    match view {
        View::Loading => writeln!(out, "Loading..."),
        View::Failed(e) => writeln!(out, "Could not load data: {e}"),
        View::NoData { origin } => writeln!(out, "No accounts found in '{origin}'."),
        View::Ready { origin, report } => render_report(origin, report, out),
    }
}

/// Render a finished report: title, summary cards, then each chart.
pub fn render_report<W: Write>(
    origin: &str,
    report: &DashboardReport,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{DASHBOARD_TITLE}")?;
    writeln!(out, "Source: {origin} ({} accounts)", report.total_accounts)?;
    writeln!(out)?;

    writeln!(out, "Cards")?;
    writeln!(out, "  {CARD_ACTIVE}: {}", report.active_accounts)?;
    writeln!(out, "  {CARD_INACTIVE}: {}", report.inactive_accounts)?;
    writeln!(out, "  {CARD_PROFILE_PICTURE}: {}", report.profile_picture_count)?;

    for chart in &report.charts {
        writeln!(out)?;
        render_chart(chart, out)?;
    }
    Ok(())
}

fn render_chart<W: Write>(chart: &Chart, out: &mut W) -> io::Result<()> {
    let points = chart.series.points();
    let kind = match chart.kind {
        ChartKind::Pie => "pie",
        ChartKind::Bar => "bar",
    };
    writeln!(out, "{} [{kind}]", chart.title)?;

    let label_width = points.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let max = points.iter().map(|p| p.value).max().unwrap_or(0).max(0);
    let total: i64 = points.iter().map(|p| p.value.max(0)).sum();

    for point in points {
        let bar = "#".repeat(bar_len(point.value, max));
        match chart.kind {
            ChartKind::Pie => {
                let share = if total > 0 {
                    point.value.max(0) as f64 * 100.0 / total as f64
                } else {
                    0.0
                };
                writeln!(
                    out,
                    "  {:<label_width$}  {:>6}  {:>5.1}%  {bar}",
                    point.name, point.value, share
                )?;
            }
            ChartKind::Bar => {
                writeln!(out, "  {:<label_width$}  {:>6}  {bar}", point.name, point.value)?;
            }
        }
    }
    Ok(())
}

/// Bar length scaled so the largest value spans `TEXT_BAR_WIDTH`.
fn bar_len(value: i64, max: i64) -> usize {
    if value <= 0 || max <= 0 {
        return 0;
    }
    let width = constants::TEXT_BAR_WIDTH as i64;
    usize::try_from((value * width + max - 1) / max).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dashboard::{build_report, DashboardConfig, CHART_REGIONS};
    use crate::core::model::{Dataset, Record};

    fn render(view: &View<'_>) -> String {
        let mut buf = Vec::new();
        render_view(view, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_loading_and_no_data() {
        assert_eq!(render(&View::Loading), "Loading...\n");
        assert!(render(&View::NoData { origin: "data.csv" }).contains("No accounts"));
    }

    #[test]
    fn test_ready_report() {
        let dataset = Dataset::from_records(vec![
            Record::new().with("region", "USA").with("activity_level", "High"),
            Record::new().with("region", "USA").with("profile_pic", "True"),
            Record::new().with("region", "India"),
        ]);
        let report = build_report(&dataset, &DashboardConfig::default());
        let text = render(&View::Ready {
            origin: "data.csv",
            report,
        });
        assert!(text.starts_with(DASHBOARD_TITLE));
        assert!(text.contains("Source: data.csv (3 accounts)"));
        assert!(text.contains("  Active Accounts: 1\n"));
        assert!(text.contains("  Inactive Accounts: 2\n"));
        assert!(text.contains(&format!("{CHART_REGIONS} [pie]")));
        assert!(text.contains("66.7%"));
    }

    #[test]
    fn test_bar_len_scaling() {
        assert_eq!(bar_len(10, 10), constants::TEXT_BAR_WIDTH);
        assert_eq!(bar_len(1, 1000), 1);
        assert_eq!(bar_len(0, 10), 0);
        assert_eq!(bar_len(-3, 10), 0);
    }
}
