//! Context assembly from retrieved chunks

use crate::models::SearchResult;

/// Separator placed between chunk texts in the prompt context
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Joins retrieved chunk texts into one context block
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Chunk texts in retrieval order, separated by a blank line
    #[must_use]
    pub fn assemble(&self, results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|result| result.content.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR)
    }
}
