use crate::e2e::helpers;

use helpers::{long_document, StubConnector, LANGUAGE_CODE, VOICE};
use longform_tts::domain::tts::{SynthesisOrchestrator, TtsService};
use longform_tts::infrastructure::files::{read_text, write_chunks, WriteReport};
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

fn service(connector: StubConnector, max_chunk_chars: usize) -> TtsService {
    TtsService::new(
        SynthesisOrchestrator::new(Arc::new(connector), None),
        NonZeroUsize::new(max_chunk_chars).unwrap(),
    )
}

fn long_document_connector() -> StubConnector {
    StubConnector::new()
        .with_reply(&"a".repeat(4489), b"A")
        .with_reply(&"b".repeat(4500), b"B")
        .with_reply(&"b".repeat(1010), b"C")
}

#[tokio::test]
async fn it_should_synthesize_a_long_document_in_order() {
    let tts_service = service(long_document_connector(), 4500);
    let text = long_document();

    let chunks = tts_service.chunk_document(&text);
    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(chunk.content.chars().count() <= 4500);
        assert_eq!(chunk.content.trim(), chunk.content);
    }

    let audio = tts_service
        .synthesize_document(&text, VOICE, LANGUAGE_CODE, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(audio, b"ABC".to_vec());
}

#[tokio::test]
async fn it_should_return_no_audio_when_one_of_three_chunks_fails() {
    let connector = StubConnector::new()
        .with_reply(&"a".repeat(4489), b"A")
        .with_failure(&"b".repeat(4500), "internal error")
        .with_reply(&"b".repeat(1010), b"C");
    let tts_service = service(connector, 4500);

    let result = tts_service
        .synthesize_document(&long_document(), VOICE, LANGUAGE_CODE, &CancellationToken::new())
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.chunk_index(), Some(1));
}

#[tokio::test]
async fn it_should_synthesize_an_empty_document_to_empty_audio() {
    let connector = StubConnector::new();
    let stats = Arc::clone(&connector.stats);
    let tts_service = service(connector, 4500);

    let audio = tts_service
        .synthesize_document("   \n ", VOICE, LANGUAGE_CODE, &CancellationToken::new())
        .await
        .unwrap();

    assert!(audio.is_empty());
    assert_eq!(stats.opened(), 0);
}

#[tokio::test]
async fn it_should_cap_chunk_size_at_the_provider_limit() {
    let connector = StubConnector::new().with_max_request_chars(100);
    let tts_service = service(connector, 4500);

    assert_eq!(tts_service.max_chunk_chars().get(), 100);

    let text = "word ".repeat(200);
    let chunks = tts_service.chunk_document(&text);
    assert!(chunks.len() >= 10);
    assert!(chunks.iter().all(|c| c.content.chars().count() <= 100));
}

#[tokio::test]
async fn it_should_keep_a_smaller_configured_chunk_size() {
    let tts_service = service(StubConnector::new().with_max_request_chars(3000), 1200);
    assert_eq!(tts_service.max_chunk_chars().get(), 1200);
}

#[tokio::test]
async fn it_should_write_synthesized_chunks_to_the_out_file() {
    let dir = std::env::temp_dir();
    let text_path = dir.join(format!("longform-tts-{}.txt", Uuid::new_v4()));
    let out_path = dir.join(format!("longform-tts-{}.mp3", Uuid::new_v4()));
    tokio::fs::write(&text_path, long_document()).await.unwrap();

    let tts_service = service(long_document_connector(), 4500);

    let text = read_text(&text_path).await.unwrap();
    let chunks = tts_service.chunk_document(&text);
    let audio = tts_service
        .synthesize_chunks(&chunks, VOICE, LANGUAGE_CODE, &CancellationToken::new())
        .await
        .unwrap();
    let report = write_chunks(&out_path, &audio).await.unwrap();

    assert_eq!(report, WriteReport { written: 3, failed: 0 });
    assert_eq!(tokio::fs::read(&out_path).await.unwrap(), b"ABC".to_vec());

    let _ = tokio::fs::remove_file(&text_path).await;
    let _ = tokio::fs::remove_file(&out_path).await;
}
