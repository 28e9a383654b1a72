pub mod contact;
pub mod form;
pub mod notify;
pub mod render;
pub mod server;
pub mod site;

pub use crate::domain::model::{ContactSubmission, FormState, PortfolioData};
pub use crate::domain::ports::{Notifier, Storage};
pub use crate::utils::error::Result;
