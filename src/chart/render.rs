use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;

use crate::config::Report;
use crate::dataset::TimeSeriesTable;

use super::error::RenderError;
use super::layout::{series_color, ChartLayout};

struct ChartStyle;

impl ChartStyle {
    const MARGIN: i32 = 16;
    const CAPTION_FONT_FAMILY: &'static str = "sans-serif";
    const CAPTION_FONT_SIZE: i32 = 28;
    const X_LABEL_AREA_SIZE: u32 = 48;
    const Y_LABEL_AREA_SIZE: u32 = 56;
    const X_LABEL_COUNT: usize = 8;
    const Y_LABEL_COUNT: usize = 8;
    const TIME_FORMAT: &'static str = "%d/%m %H:%M";
    const LINE_WIDTH: u32 = 2;
    const POINT_SIZE: u32 = 2;
    const LEGEND_LINE_PX: i32 = 20;
    const LEGEND_ALPHA: f64 = 0.8;
    const BACKGROUND: RGBColor = WHITE;
}

/// Draws one line per host and writes the PNG to `path`.
///
/// Nothing is written when the table is empty, so an earlier chart at `path`
/// survives a run without data.
pub fn render_chart(
    table: &TimeSeriesTable,
    report: &Report,
    path: &Path,
) -> Result<(), RenderError> {
    if table.is_empty() {
        return Err(RenderError::EmptyTable);
    }
    let layout = ChartLayout::from_table(table).ok_or(RenderError::EmptyTable)?;
    let png_bytes = render_png(table, &layout, report)?;

    fs::write(path, png_bytes).map_err(|source| RenderError::Write {
        path: path.display().to_string(),
        source,
    })?;

    log::info!(
        "chart_rendered path={} series={} points={}",
        path.display(),
        table.series().len(),
        table.point_count()
    );
    Ok(())
}

fn render_png(
    table: &TimeSeriesTable,
    layout: &ChartLayout,
    report: &Report,
) -> Result<Vec<u8>, RenderError> {
    let width = report.width;
    let height = report.height;
    let timezone = report.timezone;
    let mut rgb_buffer = vec![255u8; width as usize * height as usize * 3];

    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut rgb_buffer, (width, height)).into_drawing_area();
        drawing_area
            .fill(&ChartStyle::BACKGROUND)
            .map_err(|error| RenderError::from_backend("background fill", format!("{:?}", error)))?;

        let mut chart = ChartBuilder::on(&drawing_area)
            .margin(ChartStyle::MARGIN)
            .caption(
                &report.title,
                (ChartStyle::CAPTION_FONT_FAMILY, ChartStyle::CAPTION_FONT_SIZE),
            )
            .x_label_area_size(ChartStyle::X_LABEL_AREA_SIZE)
            .y_label_area_size(ChartStyle::Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(layout.x_start..layout.x_end, layout.y_min..layout.y_max)
            .map_err(|error| RenderError::from_backend("chart build", format!("{:?}", error)))?;

        let format_time = |timestamp: &DateTime<Utc>| {
            timestamp
                .with_timezone(&timezone)
                .format(ChartStyle::TIME_FORMAT)
                .to_string()
        };

        chart
            .configure_mesh()
            .x_labels(ChartStyle::X_LABEL_COUNT)
            .y_labels(ChartStyle::Y_LABEL_COUNT)
            .x_label_formatter(&format_time)
            .x_desc(format!("Time ({})", timezone.name()))
            .y_desc(&report.y_label)
            .draw()
            .map_err(|error| RenderError::from_backend("mesh draw", format!("{:?}", error)))?;

        for series in table.series() {
            let color = series_color(series);
            chart
                .draw_series(
                    LineSeries::new(
                        series
                            .points
                            .iter()
                            .map(|point| (point.timestamp, point.value)),
                        color.stroke_width(ChartStyle::LINE_WIDTH),
                    )
                    .point_size(ChartStyle::POINT_SIZE),
                )
                .map_err(|error| RenderError::from_backend("series draw", format!("{:?}", error)))?
                .label(series.host.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + ChartStyle::LEGEND_LINE_PX, y)],
                        color.stroke_width(ChartStyle::LINE_WIDTH),
                    )
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(ChartStyle::LEGEND_ALPHA))
            .border_style(&BLACK)
            .draw()
            .map_err(|error| RenderError::from_backend("legend draw", format!("{:?}", error)))?;

        drawing_area
            .present()
            .map_err(|error| RenderError::from_backend("present", format!("{:?}", error)))?;
    }

    let rgb_image = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| RenderError::PngEncoding("image buffer conversion failed".to_string()))?;
    let mut output = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb_image)
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|error| RenderError::PngEncoding(error.to_string()))?;

    Ok(output.into_inner())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::config::Report;
    use crate::dataset::tests::{hosts, record};
    use crate::dataset::TimeSeriesTable;

    use super::{render_chart, RenderError};

    #[test]
    fn rejects_empty_table_without_creating_file() {
        let temp = tempdir().expect("tempdir should be created");
        let path = temp.path().join("chart.png");
        let table = TimeSeriesTable::build(vec![record("other", 0, 1.0)], &hosts(&[("host1", "blue")]));

        let error = render_chart(&table, &Report::default(), &path).expect_err("empty table");
        assert!(matches!(error, RenderError::EmptyTable));
        assert_eq!(error.code(), "CHART_EMPTY_TABLE");
        assert!(!path.exists());
    }

    #[test]
    fn renders_png_with_configured_size() {
        let temp = tempdir().expect("tempdir should be created");
        let path = temp.path().join("chart.png");
        let table = TimeSeriesTable::build(
            vec![record("host1", 0, 45.2), record("host2", 1, 50.1)],
            &hosts(&[("host1", "blue"), ("host2", "green")]),
        );
        let report = Report::default();

        render_chart(&table, &report, &path).expect("chart should render");
        let dimensions = image::image_dimensions(&path).expect("chart should decode as PNG");
        assert_eq!(dimensions, (report.width, report.height));
    }

    #[test]
    fn empty_table_keeps_previous_chart() {
        let temp = tempdir().expect("tempdir should be created");
        let path = temp.path().join("chart.png");
        fs::write(&path, b"previous run").expect("previous chart should be written");
        let table = TimeSeriesTable::build(Vec::new(), &hosts(&[("host1", "blue")]));

        assert!(render_chart(&table, &Report::default(), &path).is_err());
        assert_eq!(fs::read(&path).expect("chart readable"), b"previous run");
    }
}
