use std::collections::HashSet;
use std::path::Path;

use lettre::message::Mailbox;
use thiserror::Error;

use super::schema::Config;

const MAX_CHART_DIMENSION: u32 = 8192;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path} (expects [paths], [email] and [[hosts]]): {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path("paths.original_file", &self.paths.original_file)?;
        validate_path("paths.copied_file", &self.paths.copied_file)?;
        validate_path("paths.graph_file", &self.paths.graph_file)?;
        validate_path("paths.excel_file", &self.paths.excel_file)?;
        if self.paths.original_file == self.paths.copied_file {
            return Err(ConfigError::Validation(
                "paths.copied_file must differ from paths.original_file".to_string(),
            ));
        }

        if self.email.smtp_server.trim().is_empty() {
            return Err(ConfigError::Validation(
                "email.smtp_server must not be empty".to_string(),
            ));
        }
        if self.email.smtp_port == 0 {
            return Err(ConfigError::Validation(
                "email.smtp_port must be greater than 0".to_string(),
            ));
        }
        if self.email.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "email.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.email.username.is_some() != self.email.password.is_some() {
            return Err(ConfigError::Validation(
                "email.username and email.password must be set together".to_string(),
            ));
        }
        validate_mailbox("email.from_email", &self.email.from_email)?;
        if self.email.to_email.is_empty() {
            return Err(ConfigError::Validation(
                "email.to_email must name at least one recipient".to_string(),
            ));
        }
        for recipient in &self.email.to_email {
            validate_mailbox("email.to_email", recipient)?;
        }

        if self.hosts.is_empty() {
            return Err(ConfigError::Validation(
                "hosts must list at least one host".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.hosts.len());
        for host in &self.hosts {
            if host.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "hosts.name must not be empty".to_string(),
                ));
            }
            if !seen.insert(host.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "host {} is listed more than once",
                    host.name
                )));
            }
        }

        if self.perfdata.metric_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "perfdata.metric_key must not be empty".to_string(),
            ));
        }
        if self.perfdata.delimiter == '=' {
            return Err(ConfigError::Validation(
                "perfdata.delimiter must not be '='".to_string(),
            ));
        }

        for (field, value) in [
            ("report.width", self.report.width),
            ("report.height", self.report.height),
        ] {
            if value == 0 || value > MAX_CHART_DIMENSION {
                return Err(ConfigError::Validation(format!(
                    "{} must be between 1 and {}, got {}",
                    field, MAX_CHART_DIMENSION, value
                )));
            }
        }

        Ok(())
    }
}

fn validate_path(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn validate_mailbox(field: &str, value: &str) -> Result<(), ConfigError> {
    value.parse::<Mailbox>().map_err(|error| {
        ConfigError::Validation(format!("{} has invalid address {}: {}", field, value, error))
    })?;
    Ok(())
}
