use crate::domain::model::ContactSubmission;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where an accepted contact submission goes once validation passes.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<()>;
}
