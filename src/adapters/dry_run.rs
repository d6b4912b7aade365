use crate::domain::model::{PostRequest, PublishReceipt};
use crate::domain::ports::Publisher;
use crate::utils::error::{PresserError, Result};
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::Mutex;

const RETRY_HINT: &str = "If you really want to post try running without --dry-run";

/// Prints each post instead of sending it anywhere.
pub struct DryRunPublisher<W: Write + Send> {
    out: Mutex<W>,
}

impl DryRunPublisher<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> DryRunPublisher<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> Publisher for DryRunPublisher<W> {
    async fn publish(&self, post: &PostRequest) -> Result<PublishReceipt> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| PresserError::IoError(io::Error::other("dry-run output lock poisoned")))?;

        writeln!(out, "Dry run mode:")?;
        writeln!(out, "Post name: {}", post.title)?;
        writeln!(out, "Post content: {}", post.content)?;
        writeln!(out, "Post status: {}", post.status)?;
        writeln!(out, "{}", RETRY_HINT)?;
        out.flush()?;

        Ok(PublishReceipt::Previewed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PostStatus;

    #[tokio::test]
    async fn test_preview_lists_title_content_status() {
        let publisher = DryRunPublisher::new(Vec::new());
        let post = PostRequest {
            title: "A new post".to_string(),
            content: "hello".to_string(),
            status: PostStatus::Draft,
        };

        let receipt = publisher.publish(&post).await.unwrap();
        assert_eq!(receipt, PublishReceipt::Previewed);

        let printed = String::from_utf8(publisher.into_inner()).unwrap();
        assert_eq!(
            printed,
            "Dry run mode:\nPost name: A new post\nPost content: hello\nPost status: draft\n\
             If you really want to post try running without --dry-run\n"
        );
    }
}
