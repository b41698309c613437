use chrono::{DateTime, Duration, Utc};
use plotters::style::RGBColor;

use crate::dataset::{HostSeries, TimeSeriesTable};

const MIN_Y_PADDING: f64 = 1.0;
const Y_PADDING_RATIO: f64 = 0.1;

pub(crate) struct ChartLayout {
    pub(crate) x_start: DateTime<Utc>,
    pub(crate) x_end: DateTime<Utc>,
    pub(crate) y_min: f64,
    pub(crate) y_max: f64,
}

impl ChartLayout {
    pub(crate) fn from_table(table: &TimeSeriesTable) -> Option<Self> {
        let (mut x_start, mut x_end) = table.time_bounds()?;
        let (min_value, max_value) = table.value_bounds()?;

        if x_start == x_end {
            x_start -= Duration::seconds(1);
            x_end += Duration::seconds(1);
        }

        let padding = ((max_value - min_value) * Y_PADDING_RATIO).max(MIN_Y_PADDING);
        Some(Self {
            x_start,
            x_end,
            y_min: min_value - padding,
            y_max: max_value + padding,
        })
    }
}

pub(crate) fn series_color(series: &HostSeries) -> RGBColor {
    RGBColor(series.color.r, series.color.g, series.color.b)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::dataset::tests::{hosts, record, t};
    use crate::dataset::TimeSeriesTable;

    use super::{series_color, ChartLayout};

    #[test]
    fn widens_single_instant_and_pads_values() {
        let table = TimeSeriesTable::build(
            vec![record("host1", 0, 45.2), record("host2", 0, 50.1)],
            &hosts(&[("host1", "blue"), ("host2", "green")]),
        );

        let layout = ChartLayout::from_table(&table).expect("layout expected");
        assert_eq!(layout.x_start, t(0) - Duration::seconds(1));
        assert_eq!(layout.x_end, t(0) + Duration::seconds(1));
        assert!(layout.y_min < 45.2 && layout.y_max > 50.1);
        assert!(layout.y_max - layout.y_min > 6.8);
    }

    #[test]
    fn no_layout_for_empty_table() {
        let table = TimeSeriesTable::build(Vec::new(), &hosts(&[("host1", "blue")]));
        assert!(ChartLayout::from_table(&table).is_none());
    }

    #[test]
    fn maps_host_colors() {
        let table = TimeSeriesTable::build(
            vec![record("host1", 0, 1.0)],
            &hosts(&[("host1", "#102030")]),
        );
        let color = series_color(&table.series()[0]);
        assert_eq!((color.0, color.1, color.2), (0x10, 0x20, 0x30));
    }
}
