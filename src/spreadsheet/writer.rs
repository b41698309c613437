use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_xlsxwriter::{
    Color, ExcelDateTime, Format, FormatAlign, FormatBorder, Table, TableColumn, TableStyle,
    Workbook, Worksheet, XlsxError,
};

use crate::config::Report;
use crate::dataset::{summarize, TimeSeriesTable};

use super::error::WriteError;

pub(crate) const DATA_SHEET: &str = "Data";
pub(crate) const SUMMARY_SHEET: &str = "Summary";

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const VALUE_FORMAT: &str = "0.0";
const HEADER_BACKGROUND: u32 = 0xD9E1F2;
const TIMESTAMP_COLUMN_WIDTH: f64 = 21.0;
const HOST_COLUMN_MIN_WIDTH: f64 = 12.0;
const VALUE_COLUMN_WIDTH: f64 = 18.0;

struct Formats {
    header: Format,
    date: Format,
    value: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin)
                .set_background_color(Color::RGB(HEADER_BACKGROUND)),
            date: Format::new().set_num_format(DATE_FORMAT),
            value: Format::new().set_num_format(VALUE_FORMAT),
        }
    }
}

/// Writes the table to `path` as a workbook with a `Data` sheet, one row per
/// (timestamp, host, value), and a per-host `Summary` sheet.
pub fn write_report(
    table: &TimeSeriesTable,
    report: &Report,
    path: &Path,
) -> Result<(), WriteError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    workbook.push_worksheet(data_sheet(table, report, &formats)?);
    workbook.push_worksheet(summary_sheet(table, report, &formats)?);

    workbook.save(path).map_err(|source| WriteError::Save {
        path: path.display().to_string(),
        source,
    })?;

    log::info!(
        "spreadsheet_written path={} rows={} hosts={}",
        path.display(),
        table.point_count(),
        table.series().len()
    );
    Ok(())
}

fn data_sheet(
    table: &TimeSeriesTable,
    report: &Report,
    formats: &Formats,
) -> Result<Worksheet, WriteError> {
    let sheet_error = |source| WriteError::Sheet {
        sheet: DATA_SHEET,
        source,
    };

    let headers = ["Timestamp", "Host", report.y_label.as_str()];
    let mut worksheet = Worksheet::new();
    worksheet.set_name(DATA_SHEET).map_err(sheet_error)?;
    write_headers(&mut worksheet, &headers, formats).map_err(sheet_error)?;

    let rows = table.rows();
    let mut host_width = HOST_COLUMN_MIN_WIDTH;
    for (offset, (series_index, point)) in rows.iter().enumerate() {
        let row = offset as u32 + 1;
        let host = &table.series()[*series_index].host;
        host_width = host_width.max(host.chars().count() as f64 + 2.0);

        let timestamp = excel_datetime(point.timestamp, report.timezone)?;
        worksheet
            .write_datetime_with_format(row, 0, &timestamp, &formats.date)
            .map_err(sheet_error)?;
        worksheet.write_string(row, 1, host).map_err(sheet_error)?;
        worksheet
            .write_number_with_format(row, 2, point.value, &formats.value)
            .map_err(sheet_error)?;
    }

    if !rows.is_empty() {
        let columns = headers
            .iter()
            .map(|header| TableColumn::new().set_header(*header))
            .collect::<Vec<_>>();
        let data_table = Table::new()
            .set_columns(&columns)
            .set_style(TableStyle::Medium9);
        worksheet
            .add_table(0, 0, rows.len() as u32, 2, &data_table)
            .map_err(sheet_error)?;
    }

    worksheet
        .set_column_width(0, TIMESTAMP_COLUMN_WIDTH)
        .map_err(sheet_error)?;
    worksheet.set_column_width(1, host_width).map_err(sheet_error)?;
    worksheet
        .set_column_width(2, VALUE_COLUMN_WIDTH)
        .map_err(sheet_error)?;
    worksheet.set_freeze_panes(1, 0).map_err(sheet_error)?;

    Ok(worksheet)
}

fn summary_sheet(
    table: &TimeSeriesTable,
    report: &Report,
    formats: &Formats,
) -> Result<Worksheet, WriteError> {
    let sheet_error = |source| WriteError::Sheet {
        sheet: SUMMARY_SHEET,
        source,
    };

    let headers = ["Host", "Samples", "Min", "Max", "Avg", "First", "Last"];
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SUMMARY_SHEET).map_err(sheet_error)?;
    write_headers(&mut worksheet, &headers, formats).map_err(sheet_error)?;

    let summaries = table.series().iter().filter_map(summarize);
    for (offset, summary) in summaries.enumerate() {
        let row = offset as u32 + 1;
        worksheet.write_string(row, 0, &summary.host).map_err(sheet_error)?;
        worksheet
            .write_number(row, 1, summary.count as f64)
            .map_err(sheet_error)?;
        for (col, value) in [(2, summary.min), (3, summary.max), (4, summary.avg)] {
            worksheet
                .write_number_with_format(row, col, value, &formats.value)
                .map_err(sheet_error)?;
        }
        for (col, timestamp) in [(5, summary.first), (6, summary.last)] {
            let timestamp = excel_datetime(timestamp, report.timezone)?;
            worksheet
                .write_datetime_with_format(row, col, &timestamp, &formats.date)
                .map_err(sheet_error)?;
        }
    }

    worksheet.set_column_width(0, HOST_COLUMN_MIN_WIDTH).map_err(sheet_error)?;
    for col in 5..=6 {
        worksheet
            .set_column_width(col, TIMESTAMP_COLUMN_WIDTH)
            .map_err(sheet_error)?;
    }

    Ok(worksheet)
}

fn write_headers(
    worksheet: &mut Worksheet,
    headers: &[&str],
    formats: &Formats,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }
    Ok(())
}

/// Excel datetimes carry no zone, so the wall-clock time in `timezone` is stored.
fn excel_datetime(timestamp: DateTime<Utc>, timezone: Tz) -> Result<ExcelDateTime, WriteError> {
    let local_seconds = timestamp
        .with_timezone(&timezone)
        .naive_local()
        .and_utc()
        .timestamp();
    ExcelDateTime::from_timestamp(local_seconds)
        .map_err(|error| WriteError::Timestamp(format!("{}: {}", timestamp.to_rfc3339(), error)))
}
