// SocialGaze - core/loader.rs
//
// Record loader: turns raw delimited text with a header row into a typed
// Dataset. Core layer: accepts &str content, never touches the filesystem;
// the app layer acquires the text.
//
// Row policy:
//   - Empty cells are absent.
//   - Cells holding a complete numeric literal become numbers; everything
//     else (including "True"/"False") stays text verbatim.
//   - Rows whose field count differs from the header are padded/truncated
//     or dropped, per `MalformedRowPolicy`.
//   - Lines with no non-whitespace field are skipped.
//   - Header names are kept verbatim (a blank name is the "" key); a
//     repeated name is renamed `name_1`, `name_2`, ...

use crate::core::model::{Dataset, Record, Value};
use crate::util::constants;
use crate::util::error::LoadError;
use std::collections::HashSet;

/// What to do with a row whose field count differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Keep the row: missing trailing fields are absent, surplus fields are
    /// discarded.
    #[default]
    Pad,

    /// Discard the row entirely.
    Drop,
}

/// Field delimiter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Detect from the leading lines of the content.
    #[default]
    Auto,

    /// Always use this byte.
    Fixed(u8),
}

/// Parsing options for a single load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub delimiter: Delimiter,
    pub malformed_rows: MalformedRowPolicy,
}

/// Statistics describing how the raw rows were turned into records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Delimiter actually used.
    pub delimiter: u8,

    /// Data rows seen (header excluded, blank lines excluded).
    pub rows_read: usize,

    /// Records placed in the dataset.
    pub rows_loaded: usize,

    /// Short rows kept with absent trailing fields.
    pub rows_padded: usize,

    /// Long rows kept with surplus fields discarded.
    pub rows_truncated: usize,

    /// Rows discarded (policy `Drop`, or undecodable).
    pub rows_dropped: usize,

    /// Source line numbers of malformed rows (capped).
    pub malformed_lines: Vec<u64>,

    /// Repeated header names and the key each was renamed to, in header order.
    pub renamed_columns: Vec<(String, String)>,

    /// Header columns with an empty name, kept as the `""` field key.
    pub blank_columns: usize,
}

impl LoadReport {
    /// Total rows whose shape did not match the header.
    pub fn malformed_count(&self) -> usize {
        self.rows_padded + self.rows_truncated + self.rows_dropped
    }

    fn note_malformed(&mut self, line: u64) {
        if self.malformed_lines.len() < constants::MAX_REPORTED_MALFORMED_ROWS {
            self.malformed_lines.push(line);
        }
    }
}

/// Parse raw delimited text into a dataset.
///
/// The first non-blank line names the columns (used verbatim as field keys,
/// with repeats made unique). Empty content and header-only content both
/// produce an empty dataset.
///
/// # Errors
/// Returns `LoadError::HeaderRead` when the header row cannot be decoded.
pub fn parse_dataset(
    content: &str,
    options: &LoadOptions,
) -> Result<(Dataset, LoadReport), LoadError> {
    let delimiter = match options.delimiter {
        Delimiter::Fixed(d) => d,
        Delimiter::Auto => detect_delimiter(content),
    };
    let mut report = LoadReport {
        delimiter,
        ..Default::default()
    };

    if content.trim().is_empty() {
        tracing::debug!("Source is empty; producing empty dataset");
        return Ok((Dataset::default(), report));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let raw_columns: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::HeaderRead { source: e })?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = unique_columns(raw_columns, &mut report);

    tracing::debug!(
        columns = columns.len(),
        delimiter = %char::from(delimiter).escape_default(),
        "Header parsed"
    );

    let mut records = Vec::new();
    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                report.rows_read += 1;
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                tracing::debug!(line, error = %e, "Skipping undecodable row");
                report.rows_dropped += 1;
                report.note_malformed(line);
                continue;
            }
        };
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.iter().all(|field| field.trim().is_empty()) {
            tracing::trace!(line, "Skipping blank line");
            continue;
        }
        report.rows_read += 1;

        if row.len() != columns.len() {
            tracing::debug!(
                line,
                expected = columns.len(),
                found = row.len(),
                preview = %preview(&row, delimiter),
                "Row field count differs from header"
            );
            report.note_malformed(line);
            match options.malformed_rows {
                MalformedRowPolicy::Drop => {
                    report.rows_dropped += 1;
                    continue;
                }
                MalformedRowPolicy::Pad if row.len() < columns.len() => report.rows_padded += 1,
                MalformedRowPolicy::Pad => report.rows_truncated += 1,
            }
        }

        let mut record = Record::new();
        for (column, raw) in columns.iter().zip(row.iter()) {
            if let Some(value) = infer_value(raw) {
                record.insert(column, value);
            }
        }
        records.push(record);
    }

    report.rows_loaded = records.len();
    if report.malformed_count() > 0 {
        tracing::warn!(
            padded = report.rows_padded,
            truncated = report.rows_truncated,
            dropped = report.rows_dropped,
            "Malformed rows encountered"
        );
    }
    tracing::info!(
        rows = report.rows_loaded,
        columns = columns.len(),
        "Dataset parsed"
    );

    Ok((Dataset::new(columns, records), report))
}

/// Best-effort type inference for one cell.
///
/// Returns `None` for an empty cell. A cell whose trimmed text is a complete
/// numeric literal within ±2^53 becomes a number; anything else is kept as
/// the source text.
pub fn infer_value(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    let trimmed = raw.trim();
    if is_numeric_literal(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.abs() < constants::NUMERIC_INFERENCE_LIMIT {
                return Some(Value::Number(n));
            }
        }
    }
    Some(Value::Text(raw.to_string()))
}

/// `-?(digits[.digits] | .digits)([eE][+-]?digits)?` with at least one
/// mantissa digit. Rejects `inf`, `NaN`, leading `+`, and hex forms.
fn is_numeric_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let mut mantissa_digits = 0;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => mantissa_digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Pick the delimiter that splits the leading lines into a consistent number
/// of fields (at least two). Ties go to the candidate producing more fields.
/// Falls back to `,`.
pub fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(constants::DELIMITER_SAMPLE_LINES)
        .collect();
    if sample.is_empty() {
        return constants::DEFAULT_DELIMITER;
    }

    let mut best: Option<(u8, usize, f64)> = None;
    for &candidate in constants::DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| count_fields(line, candidate))
            .collect();
        let delta: usize = counts.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        let avg = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if avg < 2.0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_delta, best_avg)) => {
                delta < best_delta || (delta == best_delta && avg > best_avg)
            }
        };
        if better {
            best = Some((candidate, delta, avg));
        }
    }

    let chosen = best
        .map(|(d, _, _)| d)
        .unwrap_or(constants::DEFAULT_DELIMITER);
    tracing::debug!(
        delimiter = %char::from(chosen).escape_default(),
        sampled = sample.len(),
        "Delimiter detected"
    );
    chosen
}

/// Count fields on one line, ignoring delimiters inside double quotes.
fn count_fields(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut fields = 1;
    for &b in line.as_bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            fields += 1;
        }
    }
    fields
}

/// Make header names unique. The first occurrence keeps its name; each
/// repeat becomes `name_N` with the smallest N not already in the header.
fn unique_columns(raw: Vec<String>, report: &mut LoadReport) -> Vec<String> {
    let mut taken: HashSet<String> = raw.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut columns = Vec::with_capacity(raw.len());

    for name in raw {
        if name.is_empty() {
            report.blank_columns += 1;
        }
        if seen.insert(name.clone()) {
            columns.push(name);
            continue;
        }
        let renamed = (1..)
            .map(|n| format!("{name}_{n}"))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default();
        taken.insert(renamed.clone());
        seen.insert(renamed.clone());
        report.renamed_columns.push((name, renamed.clone()));
        columns.push(renamed);
    }

    if !report.renamed_columns.is_empty() {
        tracing::warn!(
            renamed = ?report.renamed_columns,
            "Repeated header names renamed"
        );
    }
    if report.blank_columns > 0 {
        tracing::warn!(
            count = report.blank_columns,
            "Header has blank column names"
        );
    }
    columns
}

/// Re-joined row text, truncated for debug output.
fn preview(row: &csv::StringRecord, delimiter: u8) -> String {
    let joined = row
        .iter()
        .collect::<Vec<_>>()
        .join(&char::from(delimiter).to_string());
    joined
        .chars()
        .take(constants::DEBUG_MAX_LINE_PREVIEW)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> (Dataset, LoadReport) {
        parse_dataset(content, &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_numeric_inference() {
        assert_eq!(infer_value("42"), Some(Value::Number(42.0)));
        assert_eq!(infer_value("-3.5"), Some(Value::Number(-3.5)));
        assert_eq!(infer_value(".5"), Some(Value::Number(0.5)));
        assert_eq!(infer_value("1e3"), Some(Value::Number(1000.0)));
        assert_eq!(infer_value(" 7 "), Some(Value::Number(7.0)));
        assert_eq!(infer_value("12abc"), Some(Value::from("12abc")));
        assert_eq!(infer_value("+5"), Some(Value::from("+5")));
        assert_eq!(infer_value("inf"), Some(Value::from("inf")));
        assert_eq!(infer_value("NaN"), Some(Value::from("NaN")));
        assert_eq!(infer_value("1e"), Some(Value::from("1e")));
        assert_eq!(infer_value("."), Some(Value::from(".")));
    }

    #[test]
    fn test_huge_integers_stay_text() {
        assert_eq!(
            infer_value("9007199254740993"),
            Some(Value::from("9007199254740993"))
        );
        assert_eq!(
            infer_value("9007199254740991"),
            Some(Value::Number(9_007_199_254_740_991.0))
        );
    }

    #[test]
    fn test_booleans_stay_literal_text() {
        assert_eq!(infer_value("True"), Some(Value::from("True")));
        assert_eq!(infer_value("false"), Some(Value::from("false")));
    }

    #[test]
    fn test_empty_cell_is_absent() {
        assert_eq!(infer_value(""), None);
        assert_eq!(infer_value("  "), Some(Value::from("  ")));
    }

    #[test]
    fn test_parse_basic_dataset() {
        let (dataset, report) = load(
            "username,follower_count,region,profile_pic\n\
             alice,1200,USA,True\n\
             bob,,Canada,False\n",
        );
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), ["username", "follower_count", "region", "profile_pic"]);
        let bob = &dataset.records()[1];
        assert_eq!(bob.get("follower_count"), None);
        assert_eq!(bob.get("profile_pic"), Some(&Value::from("False")));
        assert_eq!(
            dataset.records()[0].follower_count(),
            Some(&Value::Number(1200.0))
        );
        assert_eq!(report.rows_loaded, 2);
        assert_eq!(report.malformed_count(), 0);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        let (dataset, _) = load("username,region\n");
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns().len(), 2);

        let (dataset, _) = load("");
        assert!(dataset.is_empty());
        assert!(dataset.columns().is_empty());
    }

    #[test]
    fn test_short_and_long_rows_padded() {
        let (dataset, report) = load("a,b,c\n1,2\n1,2,3,4\n");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].get("c"), None);
        assert_eq!(dataset.records()[1].len(), 3);
        assert_eq!(report.rows_padded, 1);
        assert_eq!(report.rows_truncated, 1);
        assert_eq!(report.malformed_lines, vec![2, 3]);
    }

    #[test]
    fn test_malformed_rows_dropped() {
        let options = LoadOptions {
            malformed_rows: MalformedRowPolicy::Drop,
            ..Default::default()
        };
        let (dataset, report) = parse_dataset("a,b\n1\n1,2\n", &options).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.rows_read, 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (dataset, report) = load("a,b\n1,2\n\n3,4\n   \n\t\n\n");
        assert_eq!(dataset.len(), 2);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.malformed_count(), 0);
    }

    #[test]
    fn test_whitespace_line_is_not_an_account() {
        let (dataset, report) = load("region,activity_level\nUSA,High\n   \n");
        assert_eq!(dataset.len(), 1);
        assert_eq!(report.rows_padded, 0);
    }

    #[test]
    fn test_trailing_delimiter_header_loads() {
        let (dataset, report) = load(
            "username,region,activity_level,\n\
             ana,USA,High,\n\
             bob,India,Low,\n",
        );
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), ["username", "region", "activity_level", ""]);
        assert_eq!(report.blank_columns, 1);
        assert_eq!(report.malformed_count(), 0);
        // Empty trailing cells stay absent.
        assert_eq!(dataset.records()[0].len(), 3);
        assert_eq!(dataset.records()[1].get("region"), Some(&Value::from("India")));
    }

    #[test]
    fn test_blank_header_keeps_empty_key() {
        let (dataset, _) = load("a,,c\n1,x,3\n");
        assert_eq!(dataset.records()[0].get(""), Some(&Value::from("x")));
    }

    #[test]
    fn test_repeated_header_names_renamed() {
        let (dataset, report) = load("region,region,region_1,region\nUSA,India,Canada,Peru\n");
        assert_eq!(
            dataset.columns(),
            ["region", "region_2", "region_1", "region_3"]
        );
        assert_eq!(
            report.renamed_columns,
            vec![
                ("region".to_string(), "region_2".to_string()),
                ("region".to_string(), "region_3".to_string()),
            ]
        );
        let record = &dataset.records()[0];
        assert_eq!(record.get("region"), Some(&Value::from("USA")));
        assert_eq!(record.get("region_2"), Some(&Value::from("India")));
        assert_eq!(record.get("region_1"), Some(&Value::from("Canada")));
        assert_eq!(record.get("region_3"), Some(&Value::from("Peru")));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(detect_delimiter("a\tb\n1\t2\n"), b'\t');
        assert_eq!(detect_delimiter("a,b\n1,2\n"), b',');
        assert_eq!(detect_delimiter("single\nvalue\n"), b',');
        // Commas inside quotes are not delimiters.
        assert_eq!(detect_delimiter("a|b\n\"x,y,z\"|2\n"), b'|');
    }

    #[test]
    fn test_fixed_delimiter_used() {
        let options = LoadOptions {
            delimiter: Delimiter::Fixed(b'|'),
            ..Default::default()
        };
        let (dataset, report) = parse_dataset("region|n\nUSA|3\n", &options).unwrap();
        assert_eq!(report.delimiter, b'|');
        assert_eq!(dataset.records()[0].get("n"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn test_quoted_fields_preserved() {
        let (dataset, _) = load("username,region\n\"doe, jane\",USA\n");
        assert_eq!(dataset.records()[0].username().as_deref(), Some("doe, jane"));
    }
}
