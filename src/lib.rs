pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::runner::{run, RunOutcome};
pub use config::RunOptions;
pub use crate::core::engine::{PostSettings, PublishEngine};
pub use utils::error::{PresserError, Result};
