mod summary;
mod table;

pub use summary::summarize;
pub use table::{HostSeries, TimeSeriesTable};

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::config::{HostColor, HostEntry};
    use crate::perfdata::PerfRecord;

    use super::{summarize, TimeSeriesTable};

    pub(crate) fn t(offset_minutes: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_718_000_000, 0)
            .single()
            .expect("valid base timestamp")
            + Duration::minutes(offset_minutes)
    }

    pub(crate) fn record(host: &str, offset_minutes: i64, value: f64) -> PerfRecord {
        PerfRecord {
            timestamp: t(offset_minutes),
            host: host.to_string(),
            metric: "Ambient_temperatureC".to_string(),
            value,
        }
    }

    pub(crate) fn hosts(names: &[(&str, &str)]) -> Vec<HostEntry> {
        names
            .iter()
            .map(|(name, color)| HostEntry {
                name: name.to_string(),
                color: HostColor::parse(color).expect("test color should parse"),
            })
            .collect()
    }

    #[test]
    fn groups_by_configured_host_in_config_order() {
        let records = vec![
            record("host2", 0, 50.1),
            record("host1", 0, 45.2),
            record("rogue", 0, 99.0),
        ];
        let table = TimeSeriesTable::build(records, &hosts(&[("host1", "blue"), ("host2", "green")]));

        let names = table
            .series()
            .iter()
            .map(|series| series.host.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["host1", "host2"]);
        assert_eq!(table.point_count(), 2);
        assert_eq!(table.series()[1].color, HostColor { r: 0, g: 128, b: 0 });
    }

    #[test]
    fn sorts_each_series_by_timestamp() {
        let records = vec![
            record("host1", 10, 3.0),
            record("host1", 0, 1.0),
            record("host1", 5, 2.0),
        ];
        let table = TimeSeriesTable::build(records, &hosts(&[("host1", "blue")]));

        let series = &table.series()[0];
        assert!(series
            .points
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        assert_eq!(
            series.points.iter().map(|point| point.value).collect::<Vec<_>>(),
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn omits_configured_hosts_without_records() {
        let records = vec![record("host1", 0, 45.2)];
        let table = TimeSeriesTable::build(
            records,
            &hosts(&[("host1", "blue"), ("host2", "green"), ("host3", "red")]),
        );

        assert_eq!(table.series().len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn empty_when_no_host_matches() {
        let table = TimeSeriesTable::build(vec![record("other", 0, 1.0)], &hosts(&[("host1", "blue")]));
        assert!(table.is_empty());
        assert!(table.time_bounds().is_none());
        assert!(table.value_bounds().is_none());
        assert!(table.rows().is_empty());
    }

    #[test]
    fn rows_interleave_hosts_by_timestamp() {
        let records = vec![
            record("host2", 1, 51.0),
            record("host1", 1, 46.0),
            record("host2", 0, 50.1),
            record("host1", 0, 45.2),
        ];
        let table = TimeSeriesTable::build(records, &hosts(&[("host1", "blue"), ("host2", "green")]));

        let rows = table
            .rows()
            .into_iter()
            .map(|(index, point)| (table.series()[index].host.clone(), point.value))
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                ("host1".to_string(), 45.2),
                ("host2".to_string(), 50.1),
                ("host1".to_string(), 46.0),
                ("host2".to_string(), 51.0),
            ]
        );
        assert_eq!(table.time_bounds(), Some((t(0), t(1))));
        assert_eq!(table.value_bounds(), Some((45.2, 51.0)));
    }

    #[test]
    fn summarizes_series() {
        let records = vec![
            record("host1", 0, 10.0),
            record("host1", 1, 30.0),
            record("host1", 2, 20.0),
        ];
        let table = TimeSeriesTable::build(records, &hosts(&[("host1", "blue")]));

        let summary = summarize(&table.series()[0]).expect("summary expected");
        assert_eq!(summary.count, 3);
        assert!((summary.min - 10.0).abs() < f64::EPSILON);
        assert!((summary.max - 30.0).abs() < f64::EPSILON);
        assert!((summary.avg - 20.0).abs() < f64::EPSILON);
        assert_eq!(summary.first, t(0));
        assert_eq!(summary.last, t(2));
    }
}
