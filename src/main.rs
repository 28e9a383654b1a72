use clap::Parser;
use portfolio_site::config::{toml_config::PortfolioConfig, Command};
use portfolio_site::core::notify::notifier_for;
use portfolio_site::core::server::{self, AppState};
use portfolio_site::domain::model::{FormState, SubmissionStatus};
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{
    CliConfig, ContactClient, ContactEndpoint, ContactForm, LocalStorage, PortfolioData, SiteBuilder,
    SiteError, Theme, ViewState,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting portfolio-site CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e, 2);
    }

    if let Err(e) = run(config.command).await {
        tracing::error!("❌ Command failed: {}", e);
        exit_with(&e, 1);
    }
}

async fn run(command: Command) -> Result<(), SiteError> {
    match command {
        Command::Render {
            config,
            output_path,
            dark,
        } => {
            let (portfolio, data) = load_portfolio(config.as_deref())?;
            let theme = if dark { Some(Theme::Dark) } else { portfolio.theme() };

            let storage = LocalStorage::new(output_path);
            let site = SiteBuilder::new(storage.clone(), data)
                .with_view(ViewState::from_preference(theme));
            let output = site.build().await?;

            let full_path = storage.resolve(&output.path);
            if output.changed {
                println!("✅ Rendered {} bytes", output.bytes_written);
            } else {
                println!("✅ Already up to date");
            }
            println!("📁 Output saved to: {}", full_path.display());
        }

        Command::Serve {
            addr,
            config,
            dark,
            webhook_url,
            webhook_timeout_secs,
        } => {
            let (portfolio, data) = load_portfolio(config.as_deref())?;
            let delivery = portfolio.delivery.clone().unwrap_or_default();

            // A URL given on the command line wins over the config file.
            let (url, timeout) = match webhook_url {
                Some(url) => (Some(url), Duration::from_secs(webhook_timeout_secs)),
                None => (delivery.webhook_url.clone(), delivery.timeout()),
            };
            let endpoint = ContactEndpoint::new(notifier_for(url.as_deref(), timeout)?);

            let theme = if dark { Some(Theme::Dark) } else { portfolio.theme() };
            let state = Arc::new(AppState::new(data, theme, endpoint));
            server::serve(addr, state).await?;
        }

        Command::Submit {
            endpoint,
            name,
            email,
            message,
        } => {
            let client = ContactClient::with_timeout(endpoint, Duration::from_secs(30))?;
            let mut form = ContactForm::with_state(FormState {
                name,
                email,
                message,
            });

            match form.submit_with(&client).await {
                SubmissionStatus::Success => println!("✅ Message sent successfully!"),
                _ => {
                    return Err(SiteError::DeliveryError {
                        message: format!("{} did not accept the submission", client.endpoint()),
                    })
                }
            }
        }
    }

    Ok(())
}

fn load_portfolio(path: Option<&Path>) -> Result<(PortfolioConfig, PortfolioData), SiteError> {
    match path {
        Some(path) => {
            tracing::info!("Loading portfolio from {}", path.display());
            PortfolioConfig::load(path)
        }
        None => {
            tracing::info!("No config given, using the built-in sample portfolio");
            Ok((PortfolioConfig::default(), PortfolioData::default()))
        }
    }
}

fn exit_with(error: &SiteError, code: i32) -> ! {
    tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(code);
}
