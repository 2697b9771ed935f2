mod config;
mod http_server;
mod logging;
mod ports;
mod services;
mod spotify_rs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context, eyre::eyre};

use crate::{
    config::Config,
    http_server::{app::HttpServerConfig, error::ApiError},
    logging::{SERVICE_NAME, init_tracing},
    services::playlist_algebra::{
        SetAlgebraError, SetAlgebraService, SetOperation, SetOperationRequest,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "SETTIFY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, overrides the config file (e.g. `settify=debug`)
    #[arg(long, env = "LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// OTLP gRPC endpoint to export spans to, overrides the config file
    #[arg(long, env = "OTLP_ENDPOINT", global = true)]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the set-operation HTTP API
    Serve {
        /// The port to run the server on, overrides the config file
        #[arg(short, long, env = "SETTIFY_HTTP_PORT")]
        port: Option<u16>,
    },
    /// Run a single set operation and print the new playlist as JSON
    Run {
        /// The operation to apply
        #[arg(short, long, value_enum)]
        operation: SetOperation,

        /// First playlist id (A)
        #[arg(long)]
        first: String,

        /// Second playlist id (B)
        #[arg(long)]
        second: String,

        /// Name of the new playlist, generated when omitted
        #[arg(short, long)]
        name: Option<String>,

        /// Owner of the new playlist, defaults to the token's user
        #[arg(long)]
        owner: Option<String>,

        /// Access token forwarded to the provider
        #[arg(short, long, env = "SPOTIFY_TOKEN", hide_env_values = true)]
        token: String,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load settify config")?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let otlp_endpoint = args
        .otlp_endpoint
        .clone()
        .or_else(|| config.logging.otlp_endpoint.clone());
    let tracer_provider = init_tracing(SERVICE_NAME, otlp_endpoint.as_deref(), &log_level)?;

    let result = run_command(args.command, config).await;

    if let Some(tracer_provider) = tracer_provider
        && let Err(error) = tracer_provider.shutdown()
    {
        eprintln!("Failed to shut down tracer provider: {}", error);
    }

    result
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                tracing::debug!("Creating default config");
                let path = Config::create_default()?;
                tracing::info!("Default config created at {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let providers = services::provider_factory(&config)?;

            tracing::info!("Starting HTTP server on port: {}", port);
            http_server::app::start(HttpServerConfig { port, providers }).await?;
        }
        Commands::Run {
            operation,
            first,
            second,
            name,
            owner,
            token,
        } => {
            let request = SetOperationRequest {
                token,
                first_playlist: first,
                second_playlist: second,
                operation,
                name,
                owner,
            };

            let providers = services::provider_factory(&config)?;
            let result = match providers.connect() {
                Ok(provider) => SetAlgebraService::new(provider).run(&request).await,
                Err(error) => Err(SetAlgebraError::from(error)),
            };

            match result {
                Ok(summary) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&summary)
                            .wrap_err("Failed to serialize result")?
                    );
                }
                Err(error) => {
                    let body = ApiError::from(error).to_response_body();
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&body)
                            .wrap_err("Failed to serialize error")?
                    );
                    return Err(eyre!(
                        "{} failed with status {}: {}",
                        operation,
                        body.error.status,
                        body.error.message
                    ));
                }
            }
        }
    }

    Ok(())
}
