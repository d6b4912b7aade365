pub mod engine;
pub mod render;

pub use crate::domain::model::{PostRequest, PostStatus, PublishReceipt, RunReport};
pub use crate::domain::ports::{Publisher, Renderer};
pub use crate::utils::error::Result;
