//! Title oracle trait

use crate::error::LlmError;

/// Capability interface for title generation.
///
/// Implemented by the hosted chat provider and by deterministic stubs in
/// tests.
#[trait_variant::make(TitleOracle: Send)]
pub trait LocalTitleOracle {
    /// Generate title suggestions for a piece of blog content
    async fn suggest_titles(&self, content: &str) -> Result<Vec<String>, LlmError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Model name
    fn model(&self) -> &str;
}
