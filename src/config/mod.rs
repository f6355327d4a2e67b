pub mod app;

pub use app::{AppConfig, OpenAiConfig, PLACEHOLDER_API_KEY};
