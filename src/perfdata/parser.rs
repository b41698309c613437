use chrono::{DateTime, Utc};

use super::model::PerfRecord;

const TIMESTAMP_FIELD: usize = 0;
const HOST_FIELD: usize = 1;
const FIRST_METRIC_FIELD: usize = 2;

// 1900-01-02T00:00:00Z and 9999-12-31T00:00:00Z. The day of slack on each end
// keeps the local wall-clock time inside the range a workbook can store.
const MIN_TIMESTAMP_SECS: i64 = -2_208_902_400;
const MAX_TIMESTAMP_SECS: i64 = 253_402_214_400;

/// Parses a single perfdata line of the form
/// `<unix-ts><delim><host><delim>...<delim>label=value;warn;crit;min;max ...`.
///
/// Perfdata sits in the last field, so fields are searched from the end and a
/// label echoed in the plugin output never wins over it.
///
/// Returns `None` when the timestamp, the host or the requested metric is missing
/// or not numeric, or when the timestamp falls outside 1900..9999.
pub(crate) fn parse_line(line: &str, metric_key: &str, delimiter: char) -> Option<PerfRecord> {
    let fields = line.split(delimiter).collect::<Vec<_>>();
    let timestamp = parse_timestamp(fields.get(TIMESTAMP_FIELD)?)?;
    let host = fields.get(HOST_FIELD)?.trim();
    if host.is_empty() {
        return None;
    }

    let value = fields
        .iter()
        .skip(FIRST_METRIC_FIELD)
        .rev()
        .find_map(|field| find_metric(field, metric_key))?;

    Some(PerfRecord {
        timestamp,
        host: host.to_string(),
        metric: metric_key.to_string(),
        value,
    })
}

fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    let (secs, nanos) = match input.parse::<i64>() {
        Ok(secs) => (secs, 0),
        Err(_) => {
            let secs = input.parse::<f64>().ok().filter(|secs| secs.is_finite())?;
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9).round() as u32;
            (whole as i64, nanos.min(999_999_999))
        }
    };

    if !(MIN_TIMESTAMP_SECS..MAX_TIMESTAMP_SECS).contains(&secs) {
        return None;
    }
    DateTime::from_timestamp(secs, nanos)
}

fn find_metric(field: &str, metric_key: &str) -> Option<f64> {
    field
        .split(|c: char| c == ';' || c.is_whitespace())
        .filter_map(|token| token.split_once('='))
        .find(|(key, _)| key.trim_matches('\'') == metric_key)
        .and_then(|(_, raw_value)| leading_number(raw_value))
}

/// Numeric prefix of a perfdata value, so `23.5C` yields `23.5`.
fn leading_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let sign_len = usize::from(raw.starts_with('-') || raw.starts_with('+'));
    let digits_len = raw[sign_len..]
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len() - sign_len);
    if digits_len == 0 {
        return None;
    }

    raw[..sign_len + digits_len]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
