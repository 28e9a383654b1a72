pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::net::SocketAddr;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-site")]
#[command(about = "Render, serve and exercise a personal portfolio site")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render the page to <output-path>/index.html
    Render {
        #[arg(long, help = "Portfolio TOML file (built-in sample data when omitted)")]
        config: Option<PathBuf>,

        #[arg(long, default_value = "./dist")]
        output_path: String,

        #[arg(long, help = "Render with the dark theme")]
        dark: bool,
    },

    /// Serve the page and the contact endpoint locally
    Serve {
        #[arg(long, default_value = "127.0.0.1:8888")]
        addr: SocketAddr,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, help = "Default to the dark theme")]
        dark: bool,

        #[arg(long, help = "Forward accepted submissions to this URL")]
        webhook_url: Option<String>,

        #[arg(long, default_value = "10")]
        webhook_timeout_secs: u64,
    },

    /// Send one contact-form submission to an endpoint
    Submit {
        #[arg(long, default_value = "http://127.0.0.1:8888/.netlify/functions/contact-form")]
        endpoint: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        message: String,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Render { output_path, .. } => {
                validation::validate_non_empty_string("output_path", output_path)?;
            }
            Command::Serve {
                webhook_url,
                webhook_timeout_secs,
                ..
            } => {
                if let Some(url) = webhook_url {
                    validation::validate_url("webhook_url", url)?;
                }
                validation::validate_range("webhook_timeout_secs", *webhook_timeout_secs, 1, 120)?;
            }
            // Empty fields are left to the endpoint to reject.
            Command::Submit { endpoint, .. } => {
                validation::validate_url("endpoint", endpoint)?;
            }
        }
        Ok(())
    }
}
