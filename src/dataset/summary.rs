use chrono::{DateTime, Utc};

use super::table::HostSeries;

pub struct SeriesSummary {
    pub host: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
}

pub fn summarize(series: &HostSeries) -> Option<SeriesSummary> {
    let first_point = series.points.first()?;
    let last_point = series.points.last()?;

    let mut min_value = first_point.value;
    let mut max_value = first_point.value;
    let mut sum = 0.0;
    for point in &series.points {
        if point.value < min_value {
            min_value = point.value;
        }
        if point.value > max_value {
            max_value = point.value;
        }
        sum += point.value;
    }

    Some(SeriesSummary {
        host: series.host.clone(),
        count: series.points.len(),
        min: min_value,
        max: max_value,
        avg: sum / series.points.len() as f64,
        first: first_point.timestamp,
        last: last_point.timestamp,
    })
}
