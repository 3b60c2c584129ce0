mod error_body;
mod generate_content_request;
mod generate_content_response;

pub use error_body::{GeminiErrorBody, GeminiErrorObject};
pub use generate_content_request::GeminiGenerateContentRequest;
pub use generate_content_request::{Content, GoogleSearch, Part, Tool};
pub use generate_content_response::{
    Candidate, GeminiResponseBody, GroundingChunk, GroundingMetadata, WebSource,
};
