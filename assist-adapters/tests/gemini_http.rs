use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assist_adapters::gemini::{GeminiClient, GeminiConfig};
use assist_adapters::traits::{AdapterError, GenerationClient, GenerationConfig, GenerationRequest};
use assist_primitives::ModelId;
use assist_prompts::OutputContract;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use serde_json::{Value, json};

#[derive(Clone, Debug, Default)]
struct Captured {
    path: String,
    api_key: Option<String>,
    body: Value,
}

/// Serves a single canned response and records what it was sent.
async fn serve(status: StatusCode, reply: Value) -> (SocketAddr, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let sink = Arc::clone(&captured);

    let make = make_service_fn(move |_conn| {
        let sink = Arc::clone(&sink);
        let reply = reply.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                let sink = Arc::clone(&sink);
                let reply = reply.clone();
                async move {
                    let path = req.uri().path().to_owned();
                    let api_key = req
                        .headers()
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    let bytes = hyper::body::to_bytes(req.into_body()).await.unwrap();
                    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
                    *sink.lock().unwrap() = Captured {
                        path,
                        api_key,
                        body,
                    };
                    let response = Response::builder()
                        .status(status)
                        .header("retry-after", "7")
                        .body(Body::from(reply.to_string()))
                        .unwrap();
                    Ok::<_, Infallible>(response)
                }
            }))
        }
    });

    let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make);
    let addr = server.local_addr();
    tokio::spawn(server);
    (addr, captured)
}

fn client(addr: SocketAddr) -> GeminiClient {
    let config = GeminiConfig::new()
        .with_api_key("test-key")
        .with_base_url(format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    GeminiClient::new(config).unwrap()
}

fn model(id: &str) -> ModelId {
    ModelId::new(id).unwrap()
}

#[tokio::test]
async fn posts_structured_request_and_returns_candidate_text() {
    let reply = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "{\"correctedText\": \"சரி\"}"}]},
            "finishReason": "STOP"
        }]
    });
    let (addr, captured) = serve(StatusCode::OK, reply).await;

    let schema = OutputContract::grammar().schema().cloned().unwrap();
    let request = GenerationRequest::new(
        model("gemini-1.5-pro"),
        "prompt text",
        GenerationConfig::json(schema),
    );
    let response = client(addr).generate(request).await.unwrap();
    assert_eq!(response.text(), "{\"correctedText\": \"சரி\"}");

    let captured = captured.lock().unwrap().clone();
    assert_eq!(captured.path, "/v1beta/models/gemini-1.5-pro:generateContent");
    assert_eq!(captured.api_key.as_deref(), Some("test-key"));
    assert_eq!(captured.body["contents"][0]["parts"][0]["text"], "prompt text");
    assert_eq!(
        captured.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
}

#[tokio::test]
async fn freeform_request_sends_no_generation_config() {
    let reply = json!({"candidates": [{"content": {"parts": [{"text": "சுருக்கம்"}]}}]});
    let (addr, captured) = serve(StatusCode::OK, reply).await;

    let request = GenerationRequest::new(model("gemini-1.5-flash"), "p", GenerationConfig::text());
    let response = client(addr).generate(request).await.unwrap();
    assert_eq!(response.into_text(), "சுருக்கம்");
    assert!(captured.lock().unwrap().body.get("generationConfig").is_none());
}

#[tokio::test]
async fn non_success_status_is_a_response_error() {
    let reply = json!({"error": {"code": 400, "message": "API key not valid"}});
    let (addr, _) = serve(StatusCode::BAD_REQUEST, reply).await;

    let request = GenerationRequest::new(model("gemini-1.5-flash"), "p", GenerationConfig::text());
    let err = client(addr).generate(request).await.expect_err("400");
    match err {
        AdapterError::Response { reason } => assert!(reason.contains("API key not valid")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn too_many_requests_reports_retry_after() {
    let (addr, _) = serve(StatusCode::TOO_MANY_REQUESTS, json!({})).await;

    let request = GenerationRequest::new(model("gemini-1.5-flash"), "p", GenerationConfig::text());
    let err = client(addr).generate(request).await.expect_err("429");
    assert!(matches!(
        err,
        AdapterError::RateLimited {
            retry_after: Some(d)
        } if d == Duration::from_secs(7)
    ));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Bind then drop to obtain a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let request = GenerationRequest::new(model("gemini-1.5-flash"), "p", GenerationConfig::text());
    let err = client(addr).generate(request).await.expect_err("refused");
    assert!(matches!(err, AdapterError::Transport { .. }));
}

#[tokio::test]
async fn silent_server_times_out_as_transport_error() {
    // Listening but never accepting: the connection opens and no reply arrives.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let config = GeminiConfig::new()
        .with_api_key("test-key")
        .with_base_url(format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let client = GeminiClient::new(config).unwrap();

    let request = GenerationRequest::new(model("gemini-1.5-flash"), "p", GenerationConfig::text());
    let err = client.generate(request).await.expect_err("timed out");
    match err {
        AdapterError::Transport { reason } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("unexpected error: {other:?}"),
    }
    drop(listener);
}
