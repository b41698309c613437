use chrono_tz::Tz;

use super::schema::{Perfdata, Report};

pub(super) fn default_truncate_source() -> bool {
    true
}

pub(super) fn default_cleanup_working_copy() -> bool {
    true
}

pub(super) fn default_smtp_port() -> u16 {
    25
}

pub(super) fn default_smtp_timeout_secs() -> u64 {
    30
}

pub(super) fn default_subject() -> String {
    "CED Temperature Report".to_string()
}

pub(super) fn default_body() -> String {
    "Hello Team,\n\nPlease find attached the temperature graph and data.\n\nBest Regards,\nMonitoring Team"
        .to_string()
}

pub(super) fn default_attach_raw_perfdata() -> bool {
    true
}

pub(super) fn default_metric_key() -> String {
    "Ambient_temperatureC".to_string()
}

pub(super) fn default_delimiter() -> char {
    '\t'
}

pub(super) fn default_report_title() -> String {
    "CED Temperature".to_string()
}

pub(super) fn default_y_label() -> String {
    "Temperature (°C)".to_string()
}

pub(super) fn default_timezone() -> Tz {
    Tz::UTC
}

pub(super) fn default_chart_width() -> u32 {
    1000
}

pub(super) fn default_chart_height() -> u32 {
    600
}

impl Default for Perfdata {
    fn default() -> Self {
        Self {
            metric_key: default_metric_key(),
            delimiter: default_delimiter(),
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            y_label: default_y_label(),
            timezone: default_timezone(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}
