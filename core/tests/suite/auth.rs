use prospect_core::provider_auth::AuthError;
use prospect_core::provider_auth::GoogleAuth;
use prospect_core::provider_auth::OAuthClientConfig;
use prospect_test_support::TEST_ACCESS_TOKEN;
use prospect_test_support::TEST_REFRESH_TOKEN;
use prospect_test_support::TOKEN_PATH;
use prospect_test_support::mount_token;
use prospect_test_support::test_config;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_string_contains;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn auth_for(server: &MockServer) -> GoogleAuth {
    let config = test_config(server);
    GoogleAuth::new(reqwest::Client::new(), OAuthClientConfig::from(&config.google))
}

#[tokio::test]
async fn refresh_grant_posts_form_and_returns_token() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let token = auth_for(&server).refresh_token(TEST_REFRESH_TOKEN).await.unwrap();
    assert_eq!(token.access_token, TEST_ACCESS_TOKEN);
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, Some(3599));

    let request = &server.received_requests().await.unwrap()[0];
    let form = String::from_utf8(request.body.clone()).unwrap();
    assert!(form.contains("grant_type=refresh_token"));
    assert!(form.contains("client_secret=test-secret"));
    assert!(form.contains("refresh_token=1%2F%2Ftest-refresh-token"));
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn rejected_refresh_is_oauth_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#,
        ))
        .mount(&server)
        .await;

    let err = auth_for(&server).access_token().await.unwrap_err();
    match err {
        AuthError::OAuth { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_client_id_makes_no_request() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let mut config = test_config(&server);
    config.google.client_id.clear();
    let auth = GoogleAuth::new(reqwest::Client::new(), OAuthClientConfig::from(&config.google));

    let err = auth.access_token().await.unwrap_err();
    assert!(matches!(err, AuthError::NotAuthenticated("client id")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn rotated_refresh_token_is_reported_with_scope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_ACCESS_TOKEN,
            "refresh_token": "1//rotated-refresh-token",
            "expires_in": 3599,
            "scope": "https://www.googleapis.com/auth/spreadsheets"
        })))
        .mount(&server)
        .await;

    let auth = auth_for(&server);
    let token = auth.refresh_token(TEST_REFRESH_TOKEN).await.unwrap();
    assert_eq!(token.refresh_token.as_deref(), Some("1//rotated-refresh-token"));
    assert_eq!(
        token.scope.as_deref(),
        Some("https://www.googleapis.com/auth/spreadsheets")
    );
    assert_eq!(token.token_type, "Bearer");

    assert_eq!(auth.access_token().await.unwrap(), TEST_ACCESS_TOKEN);
}
