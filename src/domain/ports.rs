use crate::domain::model::{PostRequest, PublishReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Turns a post body into the content that gets sent to WordPress.
pub trait Renderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, post: &PostRequest) -> Result<PublishReceipt>;
}

/// Interactive source for connection settings the config file did not provide.
pub trait Prompter {
    fn input(&self, prompt: &str) -> Result<String>;
    fn password(&self, prompt: &str) -> Result<String>;
}
