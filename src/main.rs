use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// kursor - contact form relay
#[derive(Parser)]
#[command(name = "kursor")]
#[command(about = "Relays contact form submissions to an administrator by email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check the production SMTP settings without sending anything
    Verify,
    /// Submit the contact form to a running server
    Submit(cli::submit::SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = kursor::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    kursor::observability::init_observability(
        "kursor",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.environment,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Verify => cli::verify::verify(config).await,
        Commands::Submit(args) => cli::submit::submit(args).await,
    }
}
