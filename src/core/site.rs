use crate::core::render::{render_page, ViewState};
use crate::core::Storage;
use crate::domain::model::PortfolioData;
use crate::utils::error::Result;

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub path: String,
    pub bytes_written: usize,
    pub changed: bool,
}

/// Renders the page and publishes it through a [`Storage`] backend.
pub struct SiteBuilder<S: Storage> {
    storage: S,
    data: PortfolioData,
    view: ViewState,
}

impl<S: Storage> SiteBuilder<S> {
    pub fn new(storage: S, data: PortfolioData) -> Self {
        Self {
            storage,
            data,
            view: ViewState::default(),
        }
    }

    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    pub async fn build(&self) -> Result<BuildOutput> {
        tracing::info!(
            "Rendering portfolio for {} ({} projects)",
            self.data.profile.name,
            self.data.projects.len()
        );
        let html = render_page(&self.data, &self.view);

        // Rendering is deterministic, so an identical file means nothing changed.
        if let Ok(existing) = self.storage.read_file(INDEX_FILE).await {
            if existing == html.as_bytes() {
                tracing::info!("{} is up to date", INDEX_FILE);
                return Ok(BuildOutput {
                    path: INDEX_FILE.to_string(),
                    bytes_written: 0,
                    changed: false,
                });
            }
        }

        self.storage.write_file(INDEX_FILE, html.as_bytes()).await?;
        tracing::debug!("Wrote {} bytes to {}", html.len(), INDEX_FILE);

        Ok(BuildOutput {
            path: INDEX_FILE.to_string(),
            bytes_written: html.len(),
            changed: true,
        })
    }
}
