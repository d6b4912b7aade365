use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TITLE: &str = "A new post";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Publish,
    Private,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
            PostStatus::Private => "private",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "publish" => Ok(PostStatus::Publish),
            "private" => Ok(PostStatus::Private),
            other => Err(format!(
                "invalid post status '{}' (expected draft, publish or private)",
                other
            )),
        }
    }
}

/// What the publisher does when a single post fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Abort,
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            other => Err(format!("invalid failure policy '{}' (expected abort or skip)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

/// Identifier WordPress hands back for a created post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishReceipt {
    Created(PostId),
    Previewed,
}

/// Connection settings with the endpoint already normalized.
#[derive(Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection settings as collected from one source; any field may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PartialSiteConfig {
    pub site: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl PartialSiteConfig {
    /// Fields set on `self` win; gaps are filled from `fallback`.
    pub fn or(self, fallback: PartialSiteConfig) -> Self {
        Self {
            site: self.site.or(fallback.site),
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.site.is_none() {
            missing.push("site");
        }
        if self.username.is_none() {
            missing.push("username");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl fmt::Debug for PartialSiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialSiteConfig")
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub published: Vec<(PathBuf, PostId)>,
    pub previewed: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }

    pub fn processed(&self) -> usize {
        self.published.len() + self.previewed.len()
    }
}
