//! Connection settings resolution.
//!
//! Sources are tried in a fixed order: CLI overrides, then the explicit
//! `--config` file or the first `.ini` found under the search root. Whatever
//! is still missing afterwards has to be asked for interactively.

use crate::config::site_file::load_site_file;
use crate::domain::model::{PartialSiteConfig, SiteConfig};
use crate::domain::ports::Prompter;
use crate::utils::error::{PresserError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const XMLRPC_PATH: &str = "xmlrpc.php";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    Explicit(PathBuf),
    Discovered(PathBuf),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(SiteConfig),
    NeedsPrompt {
        partial: PartialSiteConfig,
        reason: String,
    },
}

/// First regular file with an `.ini` extension under `root`, walking
/// entries in file name order.
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"))
        })
        .map(|entry| entry.into_path())
}

pub fn locate(explicit: Option<&Path>, search_root: &Path) -> ConfigLocation {
    match explicit {
        Some(path) => ConfigLocation::Explicit(path.to_path_buf()),
        None => match find_config_file(search_root) {
            Some(path) => ConfigLocation::Discovered(path),
            None => ConfigLocation::NotFound,
        },
    }
}

/// Builds the XML-RPC endpoint from a site value such as `example.com` or
/// `https://example.com/blog/`.
pub fn normalize_endpoint(site: &str) -> String {
    let trimmed = site.trim().trim_end_matches('/');

    let mut endpoint = if trimmed.ends_with(&format!("/{}", XMLRPC_PATH)) {
        trimmed.to_string()
    } else {
        format!("{}/{}", trimmed, XMLRPC_PATH)
    };

    let lower = endpoint.to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        endpoint.insert_str(0, "http://");
    }
    endpoint
}

pub fn resolve(
    explicit: Option<&Path>,
    search_root: &Path,
    overrides: PartialSiteConfig,
) -> Result<Resolution> {
    let location = locate(explicit, search_root);
    tracing::debug!("Config location: {:?}", location);

    let (from_file, file_problem) = match &location {
        ConfigLocation::Explicit(path) | ConfigLocation::Discovered(path) => {
            if matches!(location, ConfigLocation::Discovered(_)) {
                println!("Found and using config file: {}", path.display());
            }
            match load_site_file(path) {
                Ok(values) => (values, None),
                Err(e) => (PartialSiteConfig::default(), Some(e.to_string())),
            }
        }
        ConfigLocation::NotFound => (
            PartialSiteConfig::default(),
            Some(format!(
                "no .ini configuration file found under {}",
                search_root.display()
            )),
        ),
    };

    let merged = overrides.or(from_file);
    if merged.is_complete() {
        return finish(merged).map(Resolution::Found);
    }

    let reason = match file_problem {
        Some(problem) => problem,
        None => format!("missing configuration keys: {}", merged.missing_fields().join(", ")),
    };
    Ok(Resolution::NeedsPrompt {
        partial: merged,
        reason,
    })
}

/// Asks for every field `partial` lacks. The password prompt does not echo.
pub fn complete_with_prompt(partial: PartialSiteConfig, prompter: &dyn Prompter) -> Result<SiteConfig> {
    let site = match partial.site {
        Some(site) => site,
        None => prompter.input("Full site url")?,
    };
    let username = match partial.username {
        Some(username) => username,
        None => prompter.input("WordPress site username")?,
    };
    let password = match partial.password {
        Some(password) => password,
        None => prompter.password("Enter WordPress site password")?,
    };

    finish(PartialSiteConfig {
        site: Some(site),
        username: Some(username),
        password: Some(password),
    })
}

fn finish(config: PartialSiteConfig) -> Result<SiteConfig> {
    let site = config.site.ok_or_else(|| missing("site"))?;
    let username = config.username.ok_or_else(|| missing("username"))?;
    let password = config.password.ok_or_else(|| missing("password"))?;

    validate_non_empty_string("site", &site)?;
    validate_non_empty_string("username", &username)?;

    let endpoint = normalize_endpoint(&site);
    validate_url("site", &endpoint)?;

    Ok(SiteConfig {
        endpoint,
        username: username.trim().to_string(),
        password,
    })
}

fn missing(field: &str) -> PresserError {
    PresserError::MissingConfigError {
        field: field.to_string(),
    }
}
