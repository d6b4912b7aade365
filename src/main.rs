use clap::Parser;
use presser::config::prompt::TerminalPrompter;
use presser::utils::logger;
use presser::{RunOptions, RunOutcome};

#[tokio::main]
async fn main() {
    let options = RunOptions::parse();

    logger::init_cli_logger(options.verbose);
    tracing::debug!("CLI options: {:?}", options);

    let search_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("❌ Cannot determine the current directory: {}", e);
            std::process::exit(1);
        }
    };

    match presser::run(&options, &TerminalPrompter, &search_root).await {
        Ok(RunOutcome::NothingToDo) => {}
        Ok(RunOutcome::Completed(report)) => {
            if report.has_failures() {
                eprintln!("⚠️ {} post(s) were skipped:", report.skipped.len());
                for (path, reason) in &report.skipped {
                    eprintln!("  {}: {}", path.display(), reason);
                }
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!("❌ presser failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
