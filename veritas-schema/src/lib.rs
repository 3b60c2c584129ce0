pub mod gemini;

pub use gemini::{
    GeminiErrorBody, GeminiErrorObject, GeminiGenerateContentRequest, GeminiResponseBody,
    WebSource,
};
