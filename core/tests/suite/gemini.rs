use prospect_core::Geography;
use prospect_core::ProspectError;
use prospect_core::ProspectResearcher;
use prospect_core::api_clients::ApiError;
use prospect_core::api_clients::GeminiClient;
use prospect_core::api_clients::GeminiConfig;
use prospect_core::research::GeminiResearcher;
use prospect_test_support::GEMINI_PATH;
use prospect_test_support::TEST_API_KEY;
use prospect_test_support::gemini_text_response;
use prospect_test_support::mount_gemini;
use prospect_test_support::sample_model_output;
use prospect_test_support::test_config;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn client_for(server: &MockServer) -> GeminiClient {
    let config = test_config(server);
    GeminiClient::with_client(reqwest::Client::new(), GeminiConfig::from(config.gemini))
}

#[tokio::test]
async fn generate_content_sends_key_prompt_and_search_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text_response("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).generate_text("find dealers").await.unwrap();
    assert_eq!(text, "hello");

    let request = &server.received_requests().await.unwrap()[0];
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "find dealers");
    assert_eq!(body["tools"], json!([{ "googleSearch": {} }]));
}

#[tokio::test]
async fn google_error_envelope_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Method doesn't allow unregistered callers.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate_text("x").await.unwrap_err();
    match err {
        ApiError::ApiResponse {
            status,
            message,
            error_type,
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Method doesn't allow unregistered callers.");
            assert_eq!(error_type.as_deref(), Some("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn researcher_parses_fenced_model_output() {
    let server = MockServer::start().await;
    mount_gemini(&server, &sample_model_output()).await;

    let config = test_config(&server);
    let client = GeminiClient::with_client(reqwest::Client::new(), config.gemini.into());
    let researcher = GeminiResearcher::new(client, config.research);

    let rows = researcher
        .research(&Geography::new("Hamburg", "Germany", None))
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].company_name, "Grün & Wasser GmbH");
    assert_eq!(rows[0].competitor_brands, "Hunter, Rain Bird");
    assert_eq!(rows[1].status, "Da contattare");
    assert_eq!(rows[2].status, "Da contattare");
    assert_eq!(rows[2].email, "");

    let request = &server.received_requests().await.unwrap()[0];
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Hamburg, Germany"));
}

#[tokio::test]
async fn researcher_reports_prose_answer_as_invalid_json() {
    let server = MockServer::start().await;
    mount_gemini(&server, "I could not find any companies in that area.").await;

    let config = test_config(&server);
    let client = GeminiClient::with_client(reqwest::Client::new(), config.gemini.into());
    let researcher = GeminiResearcher::new(client, config.research);

    let err = researcher
        .research(&Geography::new("Hamburg", "Germany", None))
        .await
        .unwrap_err();
    assert!(matches!(err, ProspectError::Parse(_)));
    assert_eq!(err.to_string(), "Gemini non ha restituito JSON valido. Riprova.");
}
