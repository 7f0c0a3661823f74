use httpmock::prelude::*;
use tarot_reader::core::deck::Deck;
use tarot_reader::{
    LlmClient, LlmSettings, LocalStorage, ReadingEngine, TarotError, TarotPipeline,
};
use tempfile::TempDir;

const DECK_CSV: &str = "\
card;upright;reversed;symbolism
The Fool;new beginnings;recklessness;innocence
The Magician;willpower;manipulation;focused intent
Death;transformation;resistance to change;endings
";

fn settings(endpoint: String, api_key: &str) -> LlmSettings {
    LlmSettings {
        api_key: api_key.to_string(),
        api_endpoint: endpoint,
        model: "qwen-plus".to_string(),
        temperature: 0.8,
        top_p: 0.8,
        max_tokens: 2000,
    }
}

fn engine_for(server_endpoint: String, api_key: &str) -> ReadingEngine<TarotPipeline> {
    let deck = Deck::from_csv_str(DECK_CSV).unwrap();
    let client = LlmClient::from_settings(settings(server_endpoint, api_key));
    ReadingEngine::new(TarotPipeline::new(deck, client))
}

#[tokio::test]
async fn test_end_to_end_reading_with_mock_backend() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/generation")
            .header("authorization", "Bearer sk-test")
            .body_contains("messages");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "request_id": "test",
                "output": {
                    "choices": [
                        {"message": {"role": "assistant", "content": "The Fool greets a new path."}}
                    ]
                }
            }));
    });

    let engine = engine_for(server.url("/generation"), "sk-test");
    let reading = engine.run(3, "should I take the leap?").await.unwrap();

    api_mock.assert();
    assert_eq!(reading.cards.len(), 3);
    assert_eq!(reading.interpretation, "The Fool greets a new path.");
}

#[tokio::test]
async fn test_backend_http_error_surfaces_as_reading_text() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/generation");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "code": "Throttling",
                "message": "quota exceeded"
            }));
    });

    let engine = engine_for(server.url("/generation"), "sk-test");
    // Backend failures degrade to content, never to an error.
    let reading = engine.run(3, "anything").await.unwrap();

    api_mock.assert();
    assert!(reading.interpretation.contains("API call failed"));
    assert!(reading.interpretation.contains("HTTP status 500"));
    assert!(reading.interpretation.contains("quota exceeded"));
}

#[tokio::test]
async fn test_malformed_success_body_surfaces_as_reading_text() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/generation");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"unexpected": true}));
    });

    let engine = engine_for(server.url("/generation"), "sk-test");
    let reading = engine.run(3, "anything").await.unwrap();

    assert!(reading.interpretation.contains("API call failed"));
    assert!(reading.interpretation.contains("no generated text"));
}

#[tokio::test]
async fn test_missing_api_key_uses_fallback_for_every_call() {
    // Endpoint never contacted; the client degrades at construction time.
    let engine = engine_for("http://127.0.0.1:9/generation".to_string(), "");

    let first = engine.run(3, "first question").await.unwrap();
    let second = engine.run(3, "second question").await.unwrap();

    for reading in [&first, &second] {
        assert!(reading
            .interpretation
            .contains("the AI model is currently unavailable"));
        assert!(reading.interpretation.contains("api_key"));
    }
    assert_eq!(
        first.interpretation, second.interpretation,
        "fallback never retries into a live backend"
    );
}

#[tokio::test]
async fn test_drawing_more_than_the_deck_fails_cleanly() {
    let engine = engine_for("http://127.0.0.1:9/generation".to_string(), "sk-test");

    match engine.run(5, "too greedy").await {
        Err(TarotError::InsufficientCardsError {
            requested,
            available,
        }) => {
            assert_eq!(requested, 5);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_deck_loads_through_local_storage() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("tarots.csv"), DECK_CSV).unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let deck = Deck::load(&storage, "tarots.csv").await.unwrap();
    assert_eq!(deck.len(), 3);
    assert!(deck.get("The Magician").is_some());
}

#[tokio::test]
async fn test_missing_deck_file_is_a_data_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    match Deck::load(&storage, "absent.csv").await {
        Err(TarotError::DataLoadError { message }) => {
            assert!(message.contains("absent.csv"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
