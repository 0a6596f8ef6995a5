use clap::Parser;
use readme_gen::cli::{run, Cli};
use readme_gen::render;
use readme_gen_core::ReadmeError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries rendered output. Warnings and
    // errors are already rendered for the user, so logging is opt-in via RUST_LOG.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => tracing::info!("CLI completed successfully"),
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            match e.downcast_ref::<ReadmeError>() {
                Some(err) => eprint!("{}", render::error_message(err)),
                None => eprintln!("[ERROR] {e:#}"),
            }
            std::process::exit(1);
        }
    }
}
