use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::config::{HostColor, HostEntry};
use crate::perfdata::PerfRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct HostSeries {
    pub host: String,
    pub color: HostColor,
    pub points: Vec<TimePoint>,
}

/// Per-host series in configuration order. Hosts without data are absent and
/// every series is sorted ascending by timestamp.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesTable {
    series: Vec<HostSeries>,
}

impl TimeSeriesTable {
    pub fn build(records: Vec<PerfRecord>, hosts: &[HostEntry]) -> Self {
        let metric = records.first().map(|record| record.metric.clone());
        let mut points_by_host: HashMap<String, Vec<TimePoint>> = HashMap::new();
        let mut dropped_records = 0usize;
        for record in records {
            if !hosts.iter().any(|host| host.name == record.host) {
                dropped_records += 1;
                continue;
            }
            points_by_host
                .entry(record.host)
                .or_default()
                .push(TimePoint {
                    timestamp: record.timestamp,
                    value: record.value,
                });
        }

        let mut series = Vec::with_capacity(hosts.len());
        for host in hosts {
            let Some(mut points) = points_by_host.remove(&host.name) else {
                log::info!("dataset_host_without_data host={}", host.name);
                continue;
            };
            points.sort_by_key(|point| point.timestamp);
            series.push(HostSeries {
                host: host.name.clone(),
                color: host.color,
                points,
            });
        }

        if dropped_records > 0 {
            log::debug!("dataset_unlisted_records_dropped count={}", dropped_records);
        }
        log::debug!(
            "dataset_built metric={} series={}",
            metric.as_deref().unwrap_or("-"),
            series.len()
        );

        Self { series }
    }

    pub fn series(&self) -> &[HostSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }

    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self
            .series
            .iter()
            .filter_map(|series| series.points.first())
            .map(|point| point.timestamp)
            .min()?;
        let end = self
            .series
            .iter()
            .filter_map(|series| series.points.last())
            .map(|point| point.timestamp)
            .max()?;
        Some((start, end))
    }

    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self
            .series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.value));
        let first = values.next()?;
        Some(values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        }))
    }

    /// All data points as `(series index, point)`, ordered by timestamp and then
    /// by configured host order.
    pub fn rows(&self) -> Vec<(usize, TimePoint)> {
        let mut rows = self
            .series
            .iter()
            .enumerate()
            .flat_map(|(index, series)| series.points.iter().map(move |point| (index, *point)))
            .collect::<Vec<_>>();
        rows.sort_by_key(|(index, point)| (point.timestamp, *index));
        rows
    }
}
