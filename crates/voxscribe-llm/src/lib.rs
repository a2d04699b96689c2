//! LLM integration for voxscribe
//!
//! This module provides blog title suggestions backed by a hosted chat
//! completion model.

pub mod error;
pub mod openai;
pub mod prompts;
pub mod provider;

pub use error::LlmError;
pub use openai::OpenAiTitleProvider;
pub use provider::TitleOracle;
