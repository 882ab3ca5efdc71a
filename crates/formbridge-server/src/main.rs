use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use formbridge_server::config::ServerConfig;
use formbridge_server::logging::init_logging;

/// Table to form to row bridge
#[derive(Parser, Debug)]
#[command(name = "formbridge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the host webhooks (default)
    Serve,
    /// Create the initialization form and print its URL
    Install,
    /// Provision a form for a table and mail it to a recipient
    Init {
        /// Table store key
        key: String,
        /// Table name
        table_name: String,
        /// Recipient address
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = ServerConfig::load().context("Failed to load configuration")?;
    init_logging(&config.log_level, config.log_format).context("Failed to initialize logging")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            formbridge_server::run(config).await.context("Server error")?;
        }
        Command::Install => {
            let form = formbridge_server::install(&config)
                .await
                .context("Failed to install initialization form")?;
            println!("{}", form.url);
        }
        Command::Init {
            key,
            table_name,
            email,
        } => {
            let provisioned = formbridge_server::init(&config, &key, &table_name, &email)
                .await
                .context("Failed to provision form")?;
            println!("{}", provisioned.url);
            if !provisioned.delivered {
                eprintln!("warning: form link could not be mailed to {}", email);
            }
        }
    }

    Ok(())
}
