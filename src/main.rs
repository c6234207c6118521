use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockchart::api::AlphaVantageClient;
use stockchart::config::Config;
use stockchart::services::chart_service::PngChartRenderer;
use stockchart::session::{Prompter, Session};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout carries only the prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stockchart=info")),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    info!("📈 Starting stockchart v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => {
            info!("Configuration loaded: {:?}", c);
            c
        }
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = AlphaVantageClient::new(&config);
    let renderer = PngChartRenderer::from_config(&config);

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut session = Session::new(prompter, &client, &renderer);

    match session.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Terminal I/O failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
