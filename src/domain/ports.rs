use crate::domain::model::{DrawResult, LlmRequest, LlmResponse, PromptInput};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn deck_path(&self) -> &str;
    fn images_dir(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn model_id(&self) -> &str;
    fn temperature(&self) -> f32;
    fn top_p(&self) -> f32;
    fn max_tokens(&self) -> u32;
}

/// One reading = draw → resolve → build → complete, in that order.
/// Only `complete` touches the network.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn draw(&self, count: usize) -> Result<DrawResult>;
    fn resolve(&self, draw: &DrawResult, context: &str) -> PromptInput;
    fn build(&self, input: &PromptInput) -> Result<LlmRequest>;
    async fn complete(&self, request: &LlmRequest) -> LlmResponse;
}
