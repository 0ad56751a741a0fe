use std::time::Duration;

use playground_engine::{ExtractionSettings, FailureKind, RecipeExtractor, ReqwestExtractor};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PASTA_BODY: &str = r#"{
    "recipe": {
        "title": "Pasta",
        "servings": 2,
        "ingredients": [{"name": "spaghetti", "quantity": "200", "unit": "g"}],
        "sections": [{"instructions": [{"text": "Boil water", "optional": false}]}]
    },
    "metadata": {"promptTokenCount": 812, "candidatesTokenCount": 97}
}"#;

fn settings_for(server: &MockServer) -> ExtractionSettings {
    ExtractionSettings::new(Url::parse(&server.uri()).expect("mock uri"))
}

#[test]
fn endpoint_encodes_video_url_as_query() {
    let settings = ExtractionSettings::new(Url::parse("https://api.example.com/v1/").unwrap());
    let endpoint = settings
        .endpoint_for("https://www.youtube.com/watch?v=abc&t=10")
        .unwrap();

    assert_eq!(endpoint.path(), "/v1/recipes/extract");
    let pairs: Vec<_> = endpoint.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![(
            "url".to_string(),
            "https://www.youtube.com/watch?v=abc&t=10".to_string()
        )]
    );
}

#[tokio::test]
async fn extract_sends_bearer_and_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/extract"))
        .and(query_param("url", "https://youtu.be/xyz"))
        .and(header("authorization", "Bearer secret-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(PASTA_BODY, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let extractor = ReqwestExtractor::new(settings_for(&server)).expect("client");
    let response = extractor
        .extract("https://youtu.be/xyz", "secret-key")
        .await
        .expect("extract ok");

    assert_eq!(response.recipe.title, "Pasta");
    assert_eq!(response.recipe.ingredients[0].name, "spaghetti");
    assert_eq!(response.metadata.prompt_token_count, 812);
    assert_eq!(response.metadata.candidates_token_count, 97);
}

#[tokio::test]
async fn extract_fails_on_server_error_even_with_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/extract"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(r#"{"error":"failed to process url"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let extractor = ReqwestExtractor::new(settings_for(&server)).expect("client");
    let err = extractor
        .extract("https://youtu.be/xyz", "key")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn extract_fails_on_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let extractor = ReqwestExtractor::new(settings_for(&server)).expect("client");
    let err = extractor.extract("https://youtu.be/xyz", "").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(401));
}

#[tokio::test]
async fn extract_reports_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let extractor = ReqwestExtractor::new(settings_for(&server)).expect("client");
    let err = extractor
        .extract("https://youtu.be/xyz", "key")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn extract_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(PASTA_BODY, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = ExtractionSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let extractor = ReqwestExtractor::new(settings).expect("client");
    let err = extractor
        .extract("https://youtu.be/xyz", "key")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn extract_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = ExtractionSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let extractor = ReqwestExtractor::new(settings).expect("client");
    let err = extractor
        .extract("https://youtu.be/xyz", "key")
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
