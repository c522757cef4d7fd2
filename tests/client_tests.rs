//! Transport tests for Client
//!
//! Cover request construction against a live mock server, the error
//! envelope check, decode failures, cancellation and concurrent use.

use std::future::{ready, Ready};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::Poll;
use std::time::Duration;

use futures::future::join_all;
use http::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::{Layer, Service};
use wechat_oplatform::api::Pages;
use wechat_oplatform::{Client, Context, TransportError, WechatError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(mock_server: &MockServer) -> Client {
    Client::builder()
        .base_url(format!("{}/", mock_server.uri()))
        .build()
        .unwrap()
}

/// Answers every request with a fixed JSON body and counts invocations.
#[derive(Clone)]
struct CannedTransport {
    calls: Arc<AtomicUsize>,
    body: &'static str,
}

impl Layer<reqwest::Client> for CannedTransport {
    type Service = CannedTransport;

    fn layer(&self, _inner: reqwest::Client) -> Self::Service {
        self.clone()
    }
}

impl Service<reqwest::Request> for CannedTransport {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = Ready<Result<reqwest::Response, reqwest::Error>>;

    fn poll_ready(&mut self, _cx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: reqwest::Request) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = http::Response::builder()
            .status(200)
            .header("content-type", "application/json")
            .body(self.body)
            .unwrap();
        ready(Ok(reqwest::Response::from(response)))
    }
}

#[tokio::test]
async fn test_missing_context_makes_no_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = Client::builder()
        .with_middleware(CannedTransport {
            calls: Arc::clone(&calls),
            body: r#"{"page_list":["index"]}"#,
        })
        .build()
        .unwrap();

    let request = client
        .new_request::<()>(Method::GET, "wxa/get_page", None)
        .unwrap();
    let err = client
        .execute::<Pages>(None::<&Context>, request)
        .await
        .unwrap_err();
    assert!(matches!(err, WechatError::MissingContext));

    let request = client
        .new_request::<()>(Method::GET, "wxa/get_page", None)
        .unwrap();
    let err = client
        .execute_discard(None::<&Context>, request)
        .await
        .unwrap_err();
    assert!(matches!(err, WechatError::MissingContext));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let request = client
        .new_request::<()>(Method::GET, "wxa/get_page", None)
        .unwrap();
    let pages = client
        .execute::<Pages>(&Context::background(), request)
        .await
        .unwrap();
    assert_eq!(pages.page_list, Some(vec!["index".to_string()]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_api_error_on_http_200() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wxa/commit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"errcode": -1, "errmsg": "system error"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let request = client
        .new_request(Method::POST, "wxa/commit?access_token=tok", Some(&json!({})))
        .unwrap();
    let err = client
        .execute_discard(&Context::background(), request)
        .await
        .unwrap_err();

    match &err {
        WechatError::Api(api) => {
            assert_eq!(api.code, -1);
            assert_eq!(api.message, "system error");
            assert_eq!(api.response.status(), StatusCode::OK);
            assert_eq!(api.response.method(), Method::POST);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.api_code(), Some(-1));
    assert!(!err.to_string().contains("tok&"));
}

#[tokio::test]
async fn test_http_400_plain_text_is_not_an_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/undocodeaudit"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let request = client
        .new_request::<()>(Method::GET, "wxa/undocodeaudit", None)
        .unwrap();
    let response = client
        .execute_discard(&Context::background(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_http_400_with_envelope_is_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"errcode": 40001, "errmsg": "invalid credential"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client
        .get::<Pages>(&Context::background(), "wxa/get_page")
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some(40001));
    assert_eq!(
        err.response().map(|r| r.status()),
        Some(StatusCode::BAD_REQUEST)
    );
}

#[tokio::test]
async fn test_array_body_is_not_an_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([40001, "x"])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let ids = client
        .get::<Value>(&Context::background(), "ids")
        .await
        .unwrap();

    assert_eq!(ids.into_body(), json!([40001, "x"]));
}

#[tokio::test]
async fn test_success_payload_shares_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 0,
            "errmsg": "ok",
            "page_list": ["index", "page/list"]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let pages = client
        .get::<Pages>(&Context::background(), "wxa/get_page")
        .await
        .unwrap();

    assert_eq!(
        pages.page_list,
        Some(vec!["index".to_string(), "page/list".to_string()])
    );
}

#[tokio::test]
async fn test_decode_error_keeps_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page_list": 5})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client
        .get::<Pages>(&Context::background(), "wxa/get_page")
        .await
        .unwrap_err();

    assert!(matches!(err, WechatError::Decode { .. }));
    assert_eq!(err.response().map(|r| r.status()), Some(StatusCode::OK));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client
        .get::<Pages>(&Context::background(), "wxa/get_page")
        .await
        .unwrap_err();

    assert!(matches!(err, WechatError::Decode { .. }));
}

#[tokio::test]
async fn test_empty_body_decodes_absent_fields() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let pages = client
        .get::<Pages>(&Context::background(), "wxa/get_page")
        .await
        .unwrap();

    assert!(pages.page_list.is_none());
}

#[tokio::test]
async fn test_standard_headers_and_body_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wxa/grayrelease"))
        .and(query_param("access_token", "tok"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(header("user-agent", "platform-test/1.0"))
        .and(body_json(json!({"gray_percentage": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errcode": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(format!("{}/", mock_server.uri()))
        .user_agent("platform-test/1.0")
        .build()
        .unwrap();

    client
        .post::<Value, _>(
            &Context::background(),
            "wxa/grayrelease?access_token=tok",
            &json!({"gray_percentage": 10}),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proxy/wxa/queryquota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rest": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(format!("{}/proxy/", mock_server.uri()))
        .build()
        .unwrap();

    let quota = client
        .code()
        .query_quota(&Context::background(), "tok")
        .await
        .unwrap();
    assert_eq!(quota.rest, Some(1));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::builder()
        .base_url(format!("http://{addr}/"))
        .build()
        .unwrap();

    let err = client
        .get::<Value>(&Context::background(), "wxa/get_page")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WechatError::Transport(TransportError::Http(_))
    ));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_deadline_aborts_slow_exchange() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"page_list": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let ctx = Context::with_timeout(Duration::from_millis(50));
    let err = client.get::<Pages>(&ctx, "wxa/get_page").await.unwrap_err();

    assert!(matches!(
        err,
        WechatError::Transport(TransportError::DeadlineExceeded)
    ));
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_exchange() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wxa/get_page"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let ctx = Context::background();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client.get::<Pages>(&ctx, "wxa/get_page").await.unwrap_err();
    assert!(matches!(
        err,
        WechatError::Transport(TransportError::Cancelled)
    ));
}

#[tokio::test]
async fn test_concurrent_calls_get_their_own_responses() {
    #[derive(Debug, Deserialize)]
    struct Echo {
        n: usize,
    }

    let mock_server = MockServer::start().await;
    for n in 0..16 {
        Mock::given(method("GET"))
            .and(path("/echo"))
            .and(query_param("n", n.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "n": n }))
                    .set_delay(Duration::from_millis((16 - n) as u64 * 5)),
            )
            .mount(&mock_server)
            .await;
    }

    let client = create_test_client(&mock_server);
    let ctx = Context::background();

    let calls = (0..16).map(|n| {
        let client = client.clone();
        let ctx = ctx.clone();
        async move {
            let path = format!("echo?n={n}");
            let echo = client.get::<Echo>(&ctx, &path).await.unwrap();
            (n, echo.into_body().n)
        }
    });

    for (sent, received) in join_all(calls).await {
        assert_eq!(sent, received);
    }
}
