use crate::domain::model::PartialSiteConfig;
use crate::utils::error::{PresserError, Result};
use ini::{Ini, ParseOption, Properties};
use std::path::Path;

pub const SITE_SECTION: &str = "wordpress_site";

/// Reads `[wordpress_site]` from an INI file. Keys that are absent or blank
/// come back as `None`; a missing file or section is an error the resolver
/// turns into a prompt.
pub fn load_site_file(path: &Path) -> Result<PartialSiteConfig> {
    // Values are taken literally so passwords may contain quotes and backslashes.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    };
    let ini = Ini::load_from_file_opt(path, options).map_err(|e| PresserError::ConfigFileError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let section = ini
        .section(Some(SITE_SECTION))
        .ok_or_else(|| PresserError::ConfigFileError {
            path: path.to_path_buf(),
            message: format!("no [{}] section", SITE_SECTION),
        })?;

    Ok(PartialSiteConfig {
        site: lookup(section, "site"),
        username: lookup(section, "username"),
        password: lookup(section, "password"),
    })
}

fn lookup(section: &Properties, key: &str) -> Option<String> {
    section
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
