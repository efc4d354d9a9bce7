// SocialGaze - core/export.rs
//
// JSON and CSV handoff of a finished dashboard report.
// Core layer: writes to any Write trait object.

use crate::core::dashboard::DashboardReport;
use crate::core::model::AggregateValue;
use crate::util::error::ExportError;
use std::io::Write;

/// Export the whole report as pretty-printed JSON.
pub fn export_json<W: Write>(
    report: &DashboardReport,
    mut writer: W,
    target: &str,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })?;
    writeln!(writer).map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })
}

/// Export every scalar card and chart point as CSV rows.
///
/// Writes: chart, name, value. Cards use an empty chart column.
/// Returns the number of data rows written.
pub fn export_series_csv<W: Write>(
    report: &DashboardReport,
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        target: target.to_string(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["chart", "name", "value"])
        .map_err(csv_err)?;

    let mut count = 0;
    for result in report.results() {
        match result.value {
            AggregateValue::Scalar(value) => {
                csv_writer
                    .write_record(["", result.name.as_str(), value.to_string().as_str()])
                    .map_err(csv_err)?;
                count += 1;
            }
            AggregateValue::Series(series) => {
                for point in series.points() {
                    csv_writer
                        .write_record([
                            result.name.as_str(),
                            point.name.as_str(),
                            point.value.to_string().as_str(),
                        ])
                        .map_err(csv_err)?;
                    count += 1;
                }
            }
        }
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(count)
}
