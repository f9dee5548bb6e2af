//! PDF loading: one `DocumentPage` per PDF page

use std::path::Path;

use lopdf::Document;
use tracing::debug;
use tracing::warn;

use crate::models::DocumentPage;
use crate::models::PageMetadata;
use crate::Result;

/// Loads a PDF file into page documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl PdfLoader {
    /// Load every page of the PDF at `path`, in page order
    ///
    /// A page whose text cannot be extracted yields an empty page rather than
    /// failing the whole document.
    pub fn load(path: &Path) -> Result<Vec<DocumentPage>> {
        let bytes = std::fs::read(path)?;
        Self::load_bytes(&bytes, &path.display().to_string())
    }

    /// Load a PDF already held in memory
    pub fn load_bytes(bytes: &[u8], source: &str) -> Result<Vec<DocumentPage>> {
        let doc = Document::load_mem(bytes)?;
        Ok(Self::pages_from_document(&doc, source))
    }

    fn pages_from_document(doc: &Document, source: &str) -> Vec<DocumentPage> {
        let page_map = doc.get_pages();
        let mut page_numbers: Vec<u32> = page_map.keys().copied().collect();
        page_numbers.sort_unstable();
        let total_pages = page_numbers.len();

        page_numbers
            .iter()
            .enumerate()
            .map(|(idx, page_number)| {
                let content = doc.extract_text(&[*page_number]).unwrap_or_else(|e| {
                    warn!("Could not extract text from page {}: {}", page_number, e);
                    String::new()
                });
                debug!("Page {} extracted: {} chars", page_number, content.len());

                DocumentPage {
                    content,
                    metadata: PageMetadata {
                        source: source.to_string(),
                        page: idx,
                        page_label: (idx + 1).to_string(),
                        total_pages,
                    },
                }
            })
            .collect()
    }
}
