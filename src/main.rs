#![warn(clippy::unwrap_used)]

use clap::Parser;
use pagesmith::{configuration::ServiceConfiguration, error::ContextError, server};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, long_about = None)]
struct CliArguments {
    #[arg(
        long = "configuration",
        help = "Path to the configuration file in the JSON format, the defaults are used when absent"
    )]
    configuration_path: Option<PathBuf>,
    #[arg(long = "address", help = "Socket address to listen on, overriding the configuration")]
    address: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = fallible_main().await {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

async fn fallible_main() -> Result<(), ContextError> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli_arguments = CliArguments::parse();
    let mut configuration = match &cli_arguments.configuration_path {
        Some(configuration_path) => ServiceConfiguration::from_path(configuration_path)?,
        None => ServiceConfiguration::default(),
    };
    if let Some(address) = cli_arguments.address {
        configuration.address = address;
    }

    std::fs::create_dir_all(&configuration.output_directory).map_err(|error| {
        ContextError::with_path(
            "Unable to create the output directory",
            &configuration.output_directory,
            &error,
        )
    })?;

    let address = configuration.address.clone();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|error| {
            ContextError::with_error(format!("Unable to listen on {address}"), &error)
        })?;
    log::info!(
        "Listening on {}, documents are written to {:?}",
        address,
        configuration.output_directory
    );

    axum::serve(listener, server::build_router(configuration))
        .await
        .map_err(|error| ContextError::with_error("The server stopped unexpectedly", &error))
}
