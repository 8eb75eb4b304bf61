use std::process::ExitCode;

use clap::Parser;
use passport_core::UpstreamConfig;
use passport_web::cli::Cli;
use passport_web::logging::init_tracing;
use passport_web::ServerError;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = %error, "passport exited");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), ServerError> {
    // `.env` feeds both the flags' env fallbacks and the upstream config.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(error) if error.not_found() => debug!("no .env file"),
        Err(error) => return Err(error.into()),
    }

    let config = UpstreamConfig::builder().from_env()?.build();
    debug!(?config, "upstream configuration");

    passport_web::serve(cli.bind, &cli.static_dir, config).await
}
