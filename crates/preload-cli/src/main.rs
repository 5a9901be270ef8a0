use preload_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    let file_logging = match logging::init_logging() {
        Ok(()) => true,
        Err(err) => {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
            false
        }
    };

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args(file_logging).await {
        eprintln!("preload error: {:#}", err);
        std::process::exit(1);
    }
}
