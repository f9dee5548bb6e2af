mod common;

use std::path::Path;
use std::sync::Arc;

use common::write_pdf;
use common::MockEmbedder;
use common::MockStore;
use pdfrag::chunking::RecursiveCharacterTextSplitter;
use pdfrag::ingest::IngestOutcome;
use pdfrag::ingest::IngestStage;
use pdfrag::ingest::Ingestor;
use pdfrag::pdf::PdfLoader;
use pdfrag::PdfRagError;

fn ingestor(embedder: MockEmbedder, store: &Arc<MockStore>) -> Ingestor {
    let splitter = RecursiveCharacterTextSplitter::new(1000, 150).unwrap();
    Ingestor::new(splitter, Arc::new(embedder), store.clone())
}

#[tokio::test]
async fn test_missing_file_writes_nothing() {
    let store = Arc::new(MockStore::default());
    let ingestor = ingestor(MockEmbedder::default(), &store);
    let mut stages = Vec::new();

    let outcome = ingestor
        .ingest(Path::new("/no/such/dir/relatorio.pdf"), |s| stages.push(s))
        .await;

    assert!(matches!(outcome, IngestOutcome::FileNotFound(ref p) if p.ends_with("relatorio.pdf")));
    assert_eq!(stages.len(), 1);
    assert!(matches!(stages[0], IngestStage::Started { .. }));
    assert_eq!(store.stored_count(), 0);
}

#[tokio::test]
async fn test_ingest_generated_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.pdf");
    write_pdf(&path, &["Faturamento da empresa Alfa", "Segunda pagina do balanco"]);

    let store = Arc::new(MockStore::default());
    let ingestor = ingestor(MockEmbedder::default(), &store);
    let mut stages = Vec::new();

    let outcome = ingestor.ingest(&path, |s| stages.push(s)).await;

    let (pages, chunks) = match outcome {
        IngestOutcome::Completed { pages, chunks } => (pages, chunks),
        other => panic!("ingestion did not complete: {other:?}"),
    };
    assert_eq!(pages, 2);
    assert_eq!(chunks, 2);
    assert_eq!(store.stored_count(), chunks);

    assert_eq!(
        stages,
        vec![
            IngestStage::Started { path: path.clone() },
            IngestStage::Loading,
            IngestStage::Loaded { pages: 2 },
            IngestStage::Splitting,
            IngestStage::Split { chunks: 2 },
            IngestStage::Storing,
        ]
    );

    let stored = store.stored.lock().unwrap();
    assert!(stored[0].0.content.contains("Alfa"));
    assert_eq!(stored[0].0.metadata.page, 0);
    assert_eq!(stored[1].0.metadata.page, 1);
    assert_eq!(stored[1].0.metadata.page_label, "2");
    assert_eq!(stored[1].0.metadata.total_pages, 2);
}

#[tokio::test]
async fn test_embedding_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.pdf");
    write_pdf(&path, &["Conteudo qualquer"]);

    let store = Arc::new(MockStore::default());
    let ingestor = ingestor(MockEmbedder::failing(), &store);

    let outcome = ingestor.ingest(&path, |_| {}).await;

    assert!(matches!(
        outcome,
        IngestOutcome::Failed(PdfRagError::EmbeddingError(_))
    ));
    assert_eq!(store.stored_count(), 0);
}

#[tokio::test]
async fn test_corrupt_pdf_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.5 truncated").unwrap();

    let store = Arc::new(MockStore::default());
    let ingestor = ingestor(MockEmbedder::default(), &store);

    let outcome = ingestor.ingest(&path, |_| {}).await;

    assert!(matches!(outcome, IngestOutcome::Failed(PdfRagError::Pdf(_))));
    assert_eq!(store.stored_count(), 0);
}

#[test]
fn test_loader_numbers_pages_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tres.pdf");
    write_pdf(&path, &["um", "dois", "tres"]);

    let pages = PdfLoader::load(&path).unwrap();

    assert_eq!(pages.len(), 3);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.metadata.page, i);
        assert_eq!(page.metadata.total_pages, 3);
        assert_eq!(page.metadata.source, path.display().to_string());
    }
    assert!(pages[1].content.contains("dois"));
}

#[tokio::test]
async fn test_credentials_checked_only_when_storing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.pdf");
    write_pdf(&path, &["Balanco anual"]);

    let splitter = RecursiveCharacterTextSplitter::new(1000, 150).unwrap();
    let ingestor = Ingestor::deferred(splitter, || {
        Err(PdfRagError::ConfigError("OPENAI_API_KEY not set".to_string()))
    });
    let mut stages = Vec::new();

    let outcome = ingestor.ingest(&path, |s| stages.push(s)).await;

    assert!(matches!(outcome, IngestOutcome::Failed(PdfRagError::ConfigError(_))));
    assert_eq!(stages.last(), Some(&IngestStage::Storing));
    assert!(stages.contains(&IngestStage::Loaded { pages: 1 }));
}

#[tokio::test]
async fn test_missing_file_never_connects() {
    let connected = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = connected.clone();
    let splitter = RecursiveCharacterTextSplitter::new(1000, 150).unwrap();
    let ingestor = Ingestor::deferred(splitter, move || {
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
        Err(PdfRagError::ConfigError("OPENAI_API_KEY not set".to_string()))
    });

    let outcome = ingestor.ingest(Path::new("nao_existe.pdf"), |_| {}).await;

    assert!(matches!(outcome, IngestOutcome::FileNotFound(_)));
    assert!(!connected.load(std::sync::atomic::Ordering::SeqCst));
}
