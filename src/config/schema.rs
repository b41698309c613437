use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use super::color::HostColor;
use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(alias = "Paths")]
    pub paths: Paths,
    #[serde(alias = "Email")]
    pub email: Email,
    #[serde(alias = "Hosts")]
    pub hosts: Vec<HostEntry>,
    #[serde(default, alias = "Perfdata")]
    pub perfdata: Perfdata,
    #[serde(default, alias = "Report")]
    pub report: Report,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    #[serde(alias = "source_file")]
    pub original_file: PathBuf,
    #[serde(alias = "working_copy")]
    pub copied_file: PathBuf,
    #[serde(alias = "chart_file")]
    pub graph_file: PathBuf,
    #[serde(alias = "spreadsheet_file")]
    pub excel_file: PathBuf,
    #[serde(default = "default_truncate_source")]
    pub truncate_source: bool,
    #[serde(default = "default_cleanup_working_copy")]
    pub cleanup_working_copy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    #[default]
    None,
    Starttls,
    Tls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Email {
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub security: SmtpSecurity,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_smtp_timeout_secs")]
    pub timeout_secs: u64,
    pub from_email: String,
    #[serde(deserialize_with = "one_or_many")]
    pub to_email: Vec<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_body")]
    pub body: String,
    #[serde(default = "default_attach_raw_perfdata")]
    pub attach_raw_perfdata: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostEntry {
    pub name: String,
    pub color: HostColor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Perfdata {
    #[serde(default = "default_metric_key")]
    pub metric_key: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    #[serde(default = "default_report_title")]
    pub title: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accepts `to_email = "a@x, b@y"` as well as `to_email = ["a@x", "b@y"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => value.split(',').map(str::to_string).collect::<Vec<_>>(),
        OneOrMany::Many(values) => values,
    };

    Ok(raw
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect())
}
