use async_trait::async_trait;
use veritas_schema::{GeminiGenerateContentRequest, GeminiResponseBody};

use crate::error::DispatchError;

/// One `generateContent` call against one model.
///
/// Implementations issue exactly one upstream attempt and classify failures;
/// choosing the next model is the dispatcher's job.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        body: &GeminiGenerateContentRequest,
    ) -> Result<GeminiResponseBody, DispatchError>;
}

#[async_trait]
impl<T> GenerateContent for std::sync::Arc<T>
where
    T: GenerateContent + ?Sized,
{
    async fn generate_content(
        &self,
        model: &str,
        body: &GeminiGenerateContentRequest,
    ) -> Result<GeminiResponseBody, DispatchError> {
        (**self).generate_content(model, body).await
    }
}
