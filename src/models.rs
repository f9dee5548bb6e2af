use serde::Deserialize;
use serde::Serialize;

/// Source metadata carried by every page and every chunk cut from it
///
/// Stored as the chunk's `cmetadata` JSON. `page` is zero-based, `page_label`
/// is the human page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub source: String,
    pub page: usize,
    pub page_label: String,
    pub total_pages: usize,
}

/// Text extracted from one PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPage {
    pub content: String,
    pub metadata: PageMetadata,
}

impl DocumentPage {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// A bounded span of page text, embedded and stored independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    pub content: String,
    pub metadata: PageMetadata,
}

/// One nearest-neighbour hit from the vector store
///
/// `score` is the cosine distance reported by pgvector, so lower is closer.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub content: String,
    pub score: f64,
}
