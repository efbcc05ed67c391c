use crate::domain::model::{RawAttributes, ScreenResult};
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

pub trait ConfigProvider: Send + Sync {
    fn universe_endpoint(&self) -> &str;
    fn quote_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn universe_label(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn max_tickers(&self) -> Option<usize>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<(String, RawAttributes)>>;
    async fn transform(&self, data: Vec<(String, RawAttributes)>) -> Result<ScreenResult>;
    async fn load(&self, result: ScreenResult) -> Result<String>;
}
