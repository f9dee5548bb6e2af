//! In-memory stand-ins for the embedding, store and chat services

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use pdfrag::database::VectorStore;
use pdfrag::embeddings::Embedder;
use pdfrag::llm::ChatModel;
use pdfrag::models::DocumentChunk;
use pdfrag::models::SearchResult;
use pdfrag::PdfRagError;
use pdfrag::Result;

/// Returns a fixed 3-dimensional vector per text, derived from its length
#[derive(Default)]
pub struct MockEmbedder {
    pub fail: bool,
    pub queries: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn vector_for(text: &str) -> Vec<f32> {
        let len = text.chars().count() as f32;
        vec![len, 1.0, 0.5]
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(PdfRagError::EmbeddingError("embedding service down".to_string()));
        }
        self.queries.lock().unwrap().push(text.to_string());
        Ok(Self::vector_for(text))
    }

    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if self.fail {
            return Err(PdfRagError::EmbeddingError("embedding service down".to_string()));
        }
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }
}

/// Records writes and serves canned search results
#[derive(Default)]
pub struct MockStore {
    pub results: Vec<SearchResult>,
    pub fail_search: bool,
    pub stored: Mutex<Vec<(DocumentChunk, Vec<f32>)>>,
    pub last_k: Mutex<Option<usize>>,
}

impl MockStore {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Self::default()
        }
    }

    pub fn stored_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorStore for MockStore {
    async fn add_embedded_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Vec<String>> {
        let mut stored = self.stored.lock().unwrap();
        let start = stored.len();
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            stored.push((chunk.clone(), embedding));
        }
        Ok((start..stored.len()).map(|i| format!("id-{i}")).collect())
    }

    async fn similarity_search_with_score(
        &self,
        _embedding: Vec<f32>,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        *self.last_k.lock().unwrap() = Some(k);
        if self.fail_search {
            return Err(PdfRagError::Custom("relation does not exist".to_string()));
        }
        Ok(self.results.iter().take(k).cloned().collect())
    }
}

/// Records prompts and replies with a canned answer or an error
pub struct MockChat {
    pub reply: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(PdfRagError::LlmError(reason.clone())),
        }
    }
}

pub fn hit(content: &str, score: f64) -> SearchResult {
    SearchResult {
        content: content.to_string(),
        score,
    }
}

/// Write a PDF with one page per entry of `pages` to `path`
pub fn write_pdf(path: &std::path::Path, pages: &[&str]) {
    use lopdf::content::Content;
    use lopdf::content::Operation;
    use lopdf::dictionary;
    use lopdf::Document;
    use lopdf::Object;
    use lopdf::Stream;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
