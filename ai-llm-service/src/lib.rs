//! Text-generation client shared by the review pipeline.
//!
//! - [`config`]: provider kind, model config, env-driven defaults
//! - [`services`]: concrete HTTP clients (OpenAI-compatible, Ollama)
//! - [`llm_client::LlmClient`]: enum dispatch over the concrete clients
//! - [`error_handler`]: unified [`AiLlmError`]

pub mod config;
pub mod error_handler;
pub mod llm_client;
pub mod services;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
pub use llm_client::LlmClient;
