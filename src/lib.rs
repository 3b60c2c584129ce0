pub mod assistant;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gemini;
pub mod shell;

mod utils;

pub use assistant::Assistant;
pub use config::Config;
pub use dispatch::{Dispatcher, Reply, Request};
pub use error::{DispatchError, ErrorKind, VeritasError};
pub use gemini::{ApiKey, GeminiClient};
