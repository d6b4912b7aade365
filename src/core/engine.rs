use crate::core::{PostRequest, PostStatus, Publisher, Renderer, Result, RunReport};
use crate::domain::model::{FailurePolicy, PublishReceipt};
use crate::utils::error::PresserError;
use std::path::{Path, PathBuf};

/// Per-run values every post shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSettings {
    pub title: String,
    pub status: PostStatus,
    pub on_error: FailurePolicy,
}

pub struct PublishEngine<P: Publisher> {
    publisher: P,
    renderer: Box<dyn Renderer>,
    settings: PostSettings,
}

impl<P: Publisher> PublishEngine<P> {
    pub fn new(publisher: P, renderer: Box<dyn Renderer>, settings: PostSettings) -> Self {
        Self {
            publisher,
            renderer,
            settings,
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Reads one post file and turns it into a request.
    pub async fn prepare(&self, path: &Path) -> Result<PostRequest> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PresserError::PostReadError {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(PostRequest {
            title: self.settings.title.clone(),
            content: self.renderer.render(&source),
            status: self.settings.status,
        })
    }

    /// Processes `posts` strictly in order, one publish call per file.
    pub async fn run(&self, posts: &[PathBuf]) -> Result<RunReport> {
        let mut report = RunReport::default();

        for (index, path) in posts.iter().enumerate() {
            tracing::debug!("Processing post {}/{}: {}", index + 1, posts.len(), path.display());

            let outcome = match self.prepare(path).await {
                Ok(post) => self.publisher.publish(&post).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(PublishReceipt::Created(id)) => {
                    println!("Done uploading: {} (post id {})", path.display(), id);
                    report.published.push((path.clone(), id));
                }
                Ok(PublishReceipt::Previewed) => report.previewed.push(path.clone()),
                Err(e) if self.settings.on_error == FailurePolicy::Skip && !e.is_batch_fatal() => {
                    tracing::warn!("⚠️ Skipping {}: {}", path.display(), e);
                    report.skipped.push((path.clone(), e.to_string()));
                }
                Err(e) => {
                    let remaining = posts.len() - index - 1;
                    if remaining > 0 {
                        tracing::warn!("{} remaining post(s) were not processed", remaining);
                    }
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Processed {} of {} post(s), {} skipped",
            report.processed(),
            posts.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
