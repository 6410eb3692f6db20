use prospect_core::ErrorCategory;
use prospect_core::GenerateRequest;
use prospect_core::PriorityCounts;
use prospect_core::ProspectError;
use prospect_core::ProspectPipeline;
use prospect_test_support::GEMINI_PATH;
use prospect_test_support::mount_gemini;
use prospect_test_support::mount_happy_path;
use prospect_test_support::received_paths;
use prospect_test_support::sample_model_output;
use prospect_test_support::test_config;
use pretty_assertions::assert_eq;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generate_end_to_end_against_mocked_google() {
    let server = MockServer::start().await;
    mount_happy_path(&server, &sample_model_output()).await;

    let pipeline = ProspectPipeline::from_config(&test_config(&server)).unwrap();
    let summary = pipeline
        .generate(&GenerateRequest::new("Hamburg", "Germany", None))
        .await
        .unwrap();

    assert_eq!(summary.url, "https://docs.google.com/spreadsheets/d/sheet-123");
    assert_eq!(summary.total, 3);
    assert_eq!(
        summary.counts,
        PriorityCounts {
            alta: 1,
            media: 1,
            bassa: 1
        }
    );
    assert_eq!(received_paths(&server).await[0], GEMINI_PATH);
}

#[tokio::test]
async fn zero_companies_never_touches_sheets() {
    let server = MockServer::start().await;
    mount_gemini(&server, "```json\n{\"companies\": []}\n```").await;

    let pipeline = ProspectPipeline::from_config(&test_config(&server)).unwrap();
    let err = pipeline
        .generate(&GenerateRequest::new("Atlantis", "Nowhere", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ProspectError::NoProspects));
    assert_eq!(err.category(), ErrorCategory::NoResults);
    assert_eq!(received_paths(&server).await, vec![GEMINI_PATH]);
}

#[tokio::test]
async fn missing_refresh_token_is_internal_failure() {
    let server = MockServer::start().await;
    mount_gemini(&server, &sample_model_output()).await;

    let mut config = test_config(&server);
    config.google.refresh_token.clear();
    let pipeline = ProspectPipeline::from_config(&config).unwrap();

    let err = pipeline
        .generate(&GenerateRequest::new("Hamburg", "Germany", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ProspectError::Auth(_)));
    assert_eq!(err.category(), ErrorCategory::Internal);
}
