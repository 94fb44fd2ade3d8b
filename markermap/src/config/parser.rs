//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::defaults::MAX_ZOOM;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::dedup::MAX_RINGS;

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses `key` from `section` if present.
fn parse_key<T: FromStr>(
    props: &Properties,
    section: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match props.get(key) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(section, key, v, reason)),
    }
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim().trim_end_matches('/');
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid(
                    "provider",
                    "base_url",
                    v,
                    "must start with http:// or https://",
                ));
            }
            config.provider.base_url = v.to_string();
        }
        if let Some(v) = parse_key::<u64>(section, "provider", "timeout", "expected seconds")? {
            if v == 0 {
                return Err(invalid("provider", "timeout", "0", "must be at least 1 second"));
            }
            config.provider.timeout = v;
        }
        if let Some(v) = section.get("season") {
            let v = v.trim();
            config.provider.season = (!v.is_empty()).then(|| v.to_string());
        }
        if let Some(v) = section.get("regions") {
            config.provider.regions = parse_list(v);
        }
    }

    // [placement] section
    if let Some(section) = ini.section(Some("placement")) {
        if let Some(v) =
            parse_key::<f64>(section, "placement", "dedup_step", "expected degrees, e.g. 0.001")?
        {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(
                    "placement",
                    "dedup_step",
                    &v.to_string(),
                    "must be a positive number of degrees",
                ));
            }
            config.placement.dedup_step = v;
        }
        if let Some(v) =
            parse_key::<u32>(section, "placement", "max_rings", "expected a whole number")?
        {
            if v > MAX_RINGS {
                return Err(invalid(
                    "placement",
                    "max_rings",
                    &v.to_string(),
                    &format!("must be at most {}", MAX_RINGS),
                ));
            }
            config.placement.max_rings = v;
        }
        if let Some(v) = parse_key::<u8>(section, "placement", "focus_zoom", "expected 0-22")? {
            if v > MAX_ZOOM {
                return Err(invalid("placement", "focus_zoom", &v.to_string(), "expected 0-22"));
            }
            config.placement.focus_zoom = v;
        }
    }

    // [loader] section
    if let Some(section) = ini.section(Some("loader")) {
        if let Some(v) =
            parse_key::<u64>(section, "loader", "poll_interval_ms", "expected milliseconds")?
        {
            if v == 0 {
                return Err(invalid("loader", "poll_interval_ms", "0", "must be positive"));
            }
            config.loader.poll_interval_ms = v;
        }
        if let Some(v) = parse_key::<u32>(
            section,
            "loader",
            "max_polls",
            "expected a whole number (0 = unbounded)",
        )? {
            config.loader.max_polls = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Splits a comma-separated list, dropping blanks.
pub(super) fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
