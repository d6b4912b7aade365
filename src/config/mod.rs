pub mod prompt;
pub mod resolver;
pub mod site_file;

use crate::core::engine::PostSettings;
use crate::domain::model::{FailurePolicy, PartialSiteConfig, PostStatus, DEFAULT_TITLE};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "presser", version)]
#[command(about = "presser - push WordPress posts from the command line")]
pub struct RunOptions {
    /// INI file with a [wordpress_site] section (searched for under the current directory if omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Title given to every post in this run
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// A space separated list of post files
    #[arg(long, num_args = 1..)]
    pub posts: Vec<PathBuf>,

    /// Post status: draft, publish or private
    #[arg(long, default_value = "draft", value_parser = parse_status)]
    pub status: PostStatus,

    /// Upload the files as-is instead of converting Markdown to HTML
    #[arg(long)]
    pub no_parse: bool,

    /// Print the posts instead of uploading them
    #[arg(long)]
    pub dry_run: bool,

    /// Site address, overrides the config file
    #[arg(long)]
    pub site: Option<String>,

    /// WordPress username, overrides the config file
    #[arg(long)]
    pub username: Option<String>,

    /// What to do when a single post fails: abort or skip
    #[arg(long, default_value = "abort", value_parser = parse_policy)]
    pub on_error: FailurePolicy,

    /// Exit with an error status when --posts is empty
    #[arg(long)]
    pub fail_on_empty: bool,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

fn parse_status(value: &str) -> std::result::Result<PostStatus, String> {
    value.parse()
}

fn parse_policy(value: &str) -> std::result::Result<FailurePolicy, String> {
    value.parse()
}

impl RunOptions {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn post_settings(&self) -> PostSettings {
        PostSettings {
            title: self.title.clone(),
            status: self.status,
            on_error: self.on_error,
        }
    }

    /// Connection values given on the command line. The password is never
    /// accepted as a flag.
    pub fn overrides(&self) -> PartialSiteConfig {
        PartialSiteConfig {
            site: self.site.clone().filter(|s| !s.trim().is_empty()),
            username: self.username.clone().filter(|u| !u.trim().is_empty()),
            password: None,
        }
    }
}

impl Validate for RunOptions {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)?;

        if let Some(timeout) = self.timeout {
            validate_positive_number("timeout", timeout, 1)?;
        }

        if let Some(site) = &self.site {
            validate_url("site", &resolver::normalize_endpoint(site))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RunOptions::try_parse_from(["presser"]).unwrap();
        assert_eq!(options.title, "A new post");
        assert_eq!(options.status, PostStatus::Draft);
        assert_eq!(options.on_error, FailurePolicy::Abort);
        assert!(options.posts.is_empty());
        assert!(!options.no_parse);
        assert!(!options.dry_run);
        assert!(!options.fail_on_empty);
        assert_eq!(options.timeout(), None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_posts_take_multiple_values() {
        let options = RunOptions::try_parse_from([
            "presser", "--posts", "a.md", "b.md", "--status", "publish", "--no-parse", "--dry-run",
        ])
        .unwrap();
        assert_eq!(options.posts, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(options.status, PostStatus::Publish);
        assert!(options.no_parse);
        assert!(options.dry_run);
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(RunOptions::try_parse_from(["presser", "--status", "pending"]).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_blank_title() {
        let options = RunOptions::try_parse_from(["presser", "--timeout", "0"]).unwrap();
        assert!(options.validate().is_err());

        let options = RunOptions::try_parse_from(["presser", "--title", "  "]).unwrap();
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let options =
            RunOptions::try_parse_from(["presser", "--site", "example.com", "--username", " "]).unwrap();
        let overrides = options.overrides();
        assert_eq!(overrides.site.as_deref(), Some("example.com"));
        assert_eq!(overrides.username, None);
        assert_eq!(overrides.password, None);
    }
}
