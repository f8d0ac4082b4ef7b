// tests for the http api

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use healthwise::{Classifier, Diagnoser, Error, Generate, Server};

struct Reply(&'static str);

impl Generate for Reply {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Ok(self.0.to_string())
    }
}

struct Down;

impl Generate for Down {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::Provider("connection refused".to_string()))
    }
}

fn app<G: Generate + 'static>(generator: G) -> Router {
    let diagnoser = Diagnoser::new(Classifier::medical().unwrap(), generator);
    Server::router(diagnoser, Server::cors(None).unwrap())
}

fn ok_app() -> Router {
    app(Reply(
        "```json\n{\"diagnoses\":[{\"name\":\"Migraine\",\"confidence\":0.65}],\"shouldSeekProfessionalCare\":true}\n```",
    ))
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/diagnose")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(ok_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_diagnose_ok() {
    let request = post(json!({"symptoms": "throbbing headache", "medicalHistory": "none"}).to_string());
    let (status, body) = send(ok_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["diagnoses"][0]["name"], "Migraine");
    assert_eq!(body["result"]["shouldSeekProfessionalCare"], true);
    // absent optional fields stay absent
    assert!(body["result"].get("advice").is_none());
}

#[tokio::test]
async fn test_off_topic_is_bad_request() {
    let request = post(json!({"symptoms": "Tell me about the stock market"}).to_string());
    let (status, body) = send(ok_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["category"], "out_of_scope");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("This service is only for medical symptoms")
    );
}

#[tokio::test]
async fn test_unusable_bodies_are_invalid_input() {
    let bodies = [
        json!({}).to_string(),
        json!({"symptoms": 42}).to_string(),
        json!({"symptoms": "   "}).to_string(),
        "not json".to_string(),
    ];

    for body in bodies {
        let (status, value) = send(ok_app(), post(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(value["category"], "invalid_input", "body: {body}");
    }
}

#[tokio::test]
async fn test_too_long_is_invalid_input() {
    let symptoms = format!("fever {}", "x".repeat(1000));
    let (status, body) = send(ok_app(), post(json!({"symptoms": symptoms}).to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["category"], "invalid_input");
}

#[tokio::test]
async fn test_provider_down_is_server_error() {
    let request = post(json!({"symptoms": "chest pain"}).to_string());
    let (status, body) = send(app(Down), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["category"], "upstream_unavailable");
    assert_eq!(body["error"], "Something went wrong.");
}

#[tokio::test]
async fn test_garbage_reply_is_server_error() {
    let request = post(json!({"symptoms": "chest pain"}).to_string());
    let (status, body) = send(app(Reply("no idea, sorry")), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["category"], "upstream_parse_failure");
    // the model's text stays in the logs
    assert_eq!(body["error"], "Failed to parse cleaned AI response.");
}

#[test]
fn test_cors_origin() {
    assert!(Server::cors(Some("http://localhost:3000/")).is_ok());
    assert!(matches!(
        Server::cors(Some("http://bad\norigin")),
        Err(Error::Server(_))
    ));
}
