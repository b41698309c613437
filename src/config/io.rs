use std::fs;
use std::path::Path;

use super::{schema::Config, validate::ConfigError};

/// Reads, parses and validates the report config at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: origin.clone(),
        source,
    })?;
    parse_config(&raw, origin)
}

fn parse_config(raw: &str, origin: String) -> Result<Config, ConfigError> {
    let config = toml::from_str::<Config>(raw).map_err(|source| ConfigError::Parse {
        path: origin.clone(),
        source,
    })?;
    config.validate()?;
    log::debug!(
        "config_parsed path={} hosts={} recipients={} timezone={}",
        origin,
        config.hosts.len(),
        config.email.to_email.len(),
        config.report.timezone.name()
    );
    Ok(config)
}
