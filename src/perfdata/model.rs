use chrono::{DateTime, Utc};

/// One metric value parsed from a perfdata line.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfRecord {
    pub timestamp: DateTime<Utc>,
    pub host: String,
    pub metric: String,
    pub value: f64,
}
