use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatrelay::cli::{self, Commands};
use chatrelay::{
    Container, ContainerConfig, ConversationClient, GenerationConfig, HttpRelayTransport,
    MalformedResponsePolicy, DEFAULT_PERSONA,
};

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            bind,
            api_key,
            model,
            base_url,
            max_output_tokens,
            persona,
            mock_model,
        } => {
            let generation = GenerationConfig::new(
                persona.unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
                max_output_tokens,
            );

            let container = Arc::new(Container::new(ContainerConfig {
                api_key,
                model,
                base_url,
                generation,
                mock_model,
            })?);

            let listener = TcpListener::bind(&bind).await?;
            chatrelay::serve(container, listener).await?;
        }

        Commands::Chat {
            url,
            drop_malformed,
        } => {
            let policy = if drop_malformed {
                MalformedResponsePolicy::Drop
            } else {
                MalformedResponsePolicy::Surface
            };
            info!("Connecting to relay at {}", url);

            let client = ConversationClient::new(Arc::new(HttpRelayTransport::new(url)))
                .with_malformed_response_policy(policy);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            cli::chat::run(&client, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
