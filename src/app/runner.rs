use crate::adapters::dry_run::DryRunPublisher;
use crate::adapters::wordpress::WordPressClient;
use crate::config::resolver::{self, Resolution};
use crate::config::RunOptions;
use crate::core::engine::PublishEngine;
use crate::core::render::renderer_for;
use crate::domain::model::{RunReport, SiteConfig};
use crate::domain::ports::Prompter;
use crate::utils::error::{PresserError, Result, EXIT_HINT};
use crate::utils::validation::Validate;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToDo,
    Completed(RunReport),
}

/// Runs one invocation: checks the work list, resolves and checks the site,
/// then publishes (or previews) every post in order.
pub async fn run(options: &RunOptions, prompter: &dyn Prompter, search_root: &Path) -> Result<RunOutcome> {
    options.validate()?;

    if options.posts.is_empty() {
        if options.fail_on_empty {
            return Err(PresserError::NoPostsError);
        }
        println!("No posts to post");
        println!("{}", EXIT_HINT);
        return Ok(RunOutcome::NothingToDo);
    }

    let site = resolve_site(options, prompter, search_root)?;
    println!("connection settings:");
    println!("Site url: {}", site.endpoint);
    println!("User name: {}", site.username);

    let client = WordPressClient::connect(&site, options.timeout()).await?;
    let renderer = renderer_for(options.no_parse);
    let settings = options.post_settings();

    let report = if options.dry_run {
        println!("Running a dry run, won't save any posts.");
        PublishEngine::new(DryRunPublisher::stdout(), renderer, settings)
            .run(&options.posts)
            .await?
    } else {
        PublishEngine::new(client, renderer, settings).run(&options.posts).await?
    };
    Ok(RunOutcome::Completed(report))
}

pub fn resolve_site(options: &RunOptions, prompter: &dyn Prompter, search_root: &Path) -> Result<SiteConfig> {
    match resolver::resolve(options.config.as_deref(), search_root, options.overrides())? {
        Resolution::Found(site) => Ok(site),
        Resolution::NeedsPrompt { partial, reason } => {
            tracing::warn!("{}", reason);
            println!("missing configuration information or file, please input them now:");
            resolver::complete_with_prompt(partial, prompter)
        }
    }
}
