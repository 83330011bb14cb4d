use std::time::Duration;

use pretty_assertions::assert_eq;
use sentiment_engine::{
    Classification, Classifier, ClassifierSettings, FailureKind, ReqwestClassifier,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn classifier_for(server_uri: &str) -> ReqwestClassifier {
    ReqwestClassifier::new(ClassifierSettings {
        endpoint: server_uri.to_string(),
        ..ClassifierSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn classify_posts_tweet_and_returns_sentiment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "tweet": "what a lovely day" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "positive",
            "emoji": "😊",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = classifier_for(&server.uri());
    let classification = classifier
        .classify("what a lovely day")
        .await
        .expect("classify ok");

    assert_eq!(
        classification,
        Classification {
            sentiment: "positive".to_string(),
            emoji: "😊".to_string(),
            processed: None,
        }
    );
}

#[tokio::test]
async fn classify_keeps_processed_text_when_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "Negative",
            "emoji": "😢",
            "processed": "rain ruin weekend",
        })))
        .mount(&server)
        .await;

    let classification = classifier_for(&server.uri())
        .classify("Rain ruined my weekend")
        .await
        .expect("classify ok");

    assert_eq!(classification.sentiment, "Negative");
    assert_eq!(classification.processed.as_deref(), Some("rain ruin weekend"));
}

#[tokio::test]
async fn classify_surfaces_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "model unavailable" })),
        )
        .mount(&server)
        .await;

    let err = classifier_for(&server.uri())
        .classify("hello")
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::Rejected {
            status: 500,
            error: "model unavailable".to_string(),
        }
    );
    assert!(!err.is_transport());
}

#[tokio::test]
async fn classify_treats_bad_request_as_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Tweet too long. Max 500 characters." })),
        )
        .mount(&server)
        .await;

    let err = classifier_for(&server.uri())
        .classify(&"a".repeat(501))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::Rejected { status: 400, ref error } if error.starts_with("Tweet too long")
    ));
}

#[tokio::test]
async fn malformed_success_body_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = classifier_for(&server.uri())
        .classify("hello")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedBody { status: 200 });
    assert!(err.is_transport());
}

#[tokio::test]
async fn success_body_missing_fields_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sentiment": "positive" })))
        .mount(&server)
        .await;

    let err = classifier_for(&server.uri())
        .classify("hello")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedBody { status: 200 });
}

#[tokio::test]
async fn error_status_without_json_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = classifier_for(&server.uri())
        .classify("hello")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedBody { status: 502 });
    assert!(err.is_transport());
}

#[tokio::test]
async fn slow_collaborator_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "sentiment": "positive", "emoji": "😊" })),
        )
        .mount(&server)
        .await;

    let classifier = ReqwestClassifier::new(ClassifierSettings {
        endpoint: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClassifierSettings::default()
    })
    .expect("client");

    let err = classifier.classify("hello").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string(format!(
                    r#"{{"sentiment":"{}","emoji":"x"}}"#,
                    "p".repeat(64)
                )),
        )
        .mount(&server)
        .await;

    let classifier = ReqwestClassifier::new(ClassifierSettings {
        endpoint: server.uri(),
        max_bytes: 16,
        ..ClassifierSettings::default()
    })
    .expect("client");

    let err = classifier.classify("hello").await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn unreachable_collaborator_is_network_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = classifier_for(&uri).classify("hello").await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::Network | FailureKind::Timeout
    ));
    assert!(err.is_transport());
}

#[tokio::test]
async fn health_reports_model_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "model_loaded": true,
            "vectorizer_loaded": true,
            "models_loaded": true,
        })))
        .mount(&server)
        .await;

    let report = classifier_for(&server.uri()).health().await.expect("health ok");
    assert!(report.is_ready());
    assert!(report.vectorizer_loaded);
}

#[tokio::test]
async fn health_reports_missing_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "model_loaded": false,
            "vectorizer_loaded": true,
            "models_loaded": false,
        })))
        .mount(&server)
        .await;

    let report = classifier_for(&server.uri()).health().await.expect("health ok");
    assert!(!report.is_ready());
    assert!(!report.model_loaded);
}

#[tokio::test]
async fn health_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = classifier_for(&server.uri()).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}
