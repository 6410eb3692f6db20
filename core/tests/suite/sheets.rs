use prospect_core::Geography;
use prospect_core::GoogleSheetPublisher;
use prospect_core::ProspectError;
use prospect_core::SheetPublisher;
use prospect_core::api_clients::ApiError;
use prospect_core::api_clients::SheetsClient;
use prospect_core::parser::parse_companies;
use prospect_core::provider_auth::GoogleAuth;
use prospect_core::provider_auth::OAuthClientConfig;
use prospect_test_support::TEST_ACCESS_TOKEN;
use prospect_test_support::mount_sheets;
use prospect_test_support::mount_token;
use prospect_test_support::received_paths;
use prospect_test_support::sample_model_output;
use prospect_test_support::test_config;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn publisher_for(server: &MockServer) -> GoogleSheetPublisher {
    let config = test_config(server);
    let client = reqwest::Client::new();
    GoogleSheetPublisher::new(
        GoogleAuth::new(client.clone(), OAuthClientConfig::from(&config.google)),
        SheetsClient::from_settings(client, &config.google),
        config.research.brand,
    )
}

fn body_of(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn publish_creates_writes_formats_and_shares() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_sheets(&server).await;

    let rows = parse_companies(&sample_model_output()).unwrap();
    let url = publisher_for(&server)
        .publish(&Geography::new("Hamburg", "Germany", None), &rows)
        .await
        .unwrap();
    assert_eq!(url, "https://docs.google.com/spreadsheets/d/sheet-123");

    let requests = server.received_requests().await.unwrap();
    let paths = received_paths(&server).await;
    assert_eq!(paths.len(), 5);
    assert_eq!(paths[0], "/token");
    assert_eq!(paths[1], "/v4/spreadsheets");
    assert!(paths[2].starts_with("/v4/spreadsheets/sheet-123/values/"));
    assert_eq!(paths[3], "/v4/spreadsheets/sheet-123:batchUpdate");
    assert_eq!(paths[4], "/drive/v3/files/sheet-123/permissions");

    for request in &requests[1..] {
        assert_eq!(
            request.headers.get("authorization").unwrap().to_str().unwrap(),
            format!("Bearer {TEST_ACCESS_TOKEN}")
        );
    }

    let create = body_of(&requests[1]);
    assert_eq!(create["properties"]["title"], "IREX Prospect Germany – Hamburg");
    assert_eq!(create["sheets"][0]["properties"]["title"], "Prospect");

    assert_eq!(requests[2].url.query(), Some("valueInputOption=RAW"));
    let values = body_of(&requests[2]);
    let grid = values["values"].as_array().unwrap();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0][0], "Nome Azienda");
    assert_eq!(grid[1][0], "Grün & Wasser GmbH");
    assert_eq!(grid[2][13], "Da contattare");

    let format = body_of(&requests[3]);
    let format_requests = format["requests"].as_array().unwrap();
    // header + 3 tier rows + freeze + 14 widths + row height + filter
    assert_eq!(format_requests.len(), 21);
    assert!(format_requests.last().unwrap().get("setBasicFilter").is_some());

    assert_eq!(body_of(&requests[4]), json!({ "type": "anyone", "role": "reader" }));
}

#[tokio::test]
async fn sheets_failure_stops_before_sharing() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Google Sheets API has not been used in project 123 before or it is disabled.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let rows = parse_companies(&sample_model_output()).unwrap();
    let err = publisher_for(&server)
        .publish(&Geography::new("Hamburg", "Germany", None), &rows)
        .await
        .unwrap_err();

    match err {
        ProspectError::Sheets(ApiError::ApiResponse { status, .. }) => assert_eq!(status, 403),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(received_paths(&server).await, vec!["/token", "/v4/spreadsheets"]);
}

#[tokio::test]
async fn create_without_id_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "properties": {} })))
        .mount(&server)
        .await;

    let client = SheetsClient::new(reqwest::Client::new(), server.uri(), server.uri());
    let err = client
        .create_spreadsheet("token", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}
