pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, lambda::LambdaConfig, toml_config::PortfolioConfig};
pub use core::{
    contact::{ContactEndpoint, FunctionRequest, FunctionResponse},
    form::{ContactClient, ContactForm},
    render::{render_page, ViewState},
    site::SiteBuilder,
};
pub use domain::model::{PortfolioData, Theme};
pub use utils::error::{Result, SiteError};
