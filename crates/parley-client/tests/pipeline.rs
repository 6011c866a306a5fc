#![allow(non_snake_case)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{client_with, GatedTransport, ScriptedTransport, BASE_URL};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, StatusCode};
use parley_client::api::user;
use parley_client::request::{HttpResponse, OutgoingRequest};
use parley_client::{add_cancel_token, ClientConfig, HttpClient, RequestConfig, RequestError};
use parley_types::{Envelope, MemoryTokenStore, Session, UserInfo};
use serde_json::{json, Value};

#[tokio::test]
async fn success_envelope_resolves_with_data() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": 200, "data": { "username": "a" } }));
    let client = client_with(transport, Session::in_memory());

    let payload: Value = client
        .get("/user/info", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(payload, json!({ "username": "a" }));
}

#[tokio::test]
async fn failure_envelope_rejects_with_server_message() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": 500, "message": "bad" }));
    let client = client_with(transport, Session::in_memory());

    let error = client
        .get::<Value>("/user/info", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "bad");
    assert!(matches!(error, RequestError::Api { code: 500, .. }));
}

#[tokio::test]
async fn textual_failure_code_rejects() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": "500", "message": "bad" }));
    let client = client_with(transport, Session::in_memory());

    let error = client
        .get::<Value>("/user/info", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "bad");
    assert!(matches!(error, RequestError::Api { code: -1, .. }));
}

#[tokio::test]
async fn non_success_status_is_a_transport_failure() {
    let transport = ScriptedTransport::default();
    transport.reply(
        StatusCode::UNAUTHORIZED,
        serde_json::to_value(Envelope::failure(401, "login required")).unwrap(),
    );
    let client = client_with(transport, Session::in_memory());

    let error = client
        .get::<Value>("/user/info", RequestConfig::new())
        .await
        .unwrap_err();

    match &error {
        RequestError::Status { status, .. } => assert_eq!(*status, StatusCode::UNAUTHORIZED),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(error.server_message(), Some("login required"));
}

#[tokio::test]
async fn network_failure_is_forwarded() {
    let transport = ScriptedTransport::default();
    transport.fail(RequestError::Network("connection refused".into()));
    let client = client_with(transport, Session::in_memory());

    let error = client
        .get::<Value>("/user/info", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(error, RequestError::Network(ref reason) if reason == "connection refused"));
}

#[tokio::test]
async fn payload_that_does_not_fit_the_type_is_a_decode_error() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": 200, "data": [1, 2, 3] }));
    let client = client_with(transport, Session::in_memory());

    let error = client
        .get::<UserInfo>("/user/info", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(error, RequestError::Decode(_)));
}

#[tokio::test]
async fn bearer_token_comes_from_the_session() {
    let transport = ScriptedTransport::default();
    transport
        .reply(StatusCode::OK, json!({ "code": 200 }))
        .reply(StatusCode::OK, json!({ "code": 200 }));
    let session = Session::new(MemoryTokenStore::with_token("abc"));
    let client = client_with(transport.clone(), session.clone());

    client.get::<Value>("/user/info", RequestConfig::new()).await.unwrap();
    assert_eq!(transport.last_request().headers[AUTHORIZATION], "Bearer abc");

    session.sign_out();
    client.get::<Value>("/user/info", RequestConfig::new()).await.unwrap();
    assert!(transport.last_request().headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn default_and_call_headers_are_merged() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": 200 }));
    let client = client_with(transport.clone(), Session::in_memory());

    let config = RequestConfig::new().header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    client.get::<Value>("ping", config).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.url, format!("{BASE_URL}/ping"));
    assert_eq!(request.headers[CONTENT_TYPE], "text/plain");
}

#[tokio::test]
async fn custom_stages_run_after_the_built_in_ones() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": 200, "data": { "n": 1 } }));
    let order = Rc::new(RefCell::new(Vec::new()));

    let requestOrder = order.clone();
    let responseOrder = order.clone();
    let client = HttpClient::builder(
        ClientConfig::new(BASE_URL),
        Session::new(MemoryTokenStore::with_token("abc")),
    )
    .transport(transport.clone())
    .request_interceptor(
        move |mut request: OutgoingRequest| -> Result<OutgoingRequest, RequestError> {
            assert!(request.headers.contains_key(AUTHORIZATION));
            request
                .headers
                .insert("x-trace", HeaderValue::from_static("on"));
            requestOrder.borrow_mut().push("request");
            Ok(request)
        },
    )
    .response_interceptor(
        move |outcome: Result<HttpResponse, RequestError>| -> Result<HttpResponse, RequestError> {
            let response = outcome?;
            assert_eq!(response.body, json!({ "n": 1 }));
            responseOrder.borrow_mut().push("response");
            Ok(response)
        },
    )
    .build()
    .unwrap();

    let payload: Value = client.get("/count", RequestConfig::new()).await.unwrap();

    assert_eq!(payload, json!({ "n": 1 }));
    assert_eq!(*order.borrow(), vec!["request", "response"]);
    assert_eq!(transport.last_request().headers["x-trace"], "on");
}

#[tokio::test]
async fn failing_request_stage_never_reaches_the_transport() {
    let transport = ScriptedTransport::default();
    let client = HttpClient::builder(ClientConfig::new(BASE_URL), Session::in_memory())
        .transport(transport.clone())
        .request_interceptor(
            |_request: OutgoingRequest| -> Result<OutgoingRequest, RequestError> {
                Err(RequestError::Build("offline".into()))
            },
        )
        .build()
        .unwrap();

    let error = client
        .get::<Value>("/user/info", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(error, RequestError::Build(_)));
    assert!(transport.seen.borrow().is_empty());
}

#[tokio::test]
async fn cancelling_in_flight_call_rejects_with_cancelled() {
    let (transport, _gate) = GatedTransport::new();
    let client = client_with(transport.clone(), Session::in_memory());

    let call = user::get_user_info(&client);
    let source = call.source.clone();

    let (outcome, _) = tokio::join!(call.request, async move {
        tokio::task::yield_now().await;
        source.cancel();
    });

    assert!(outcome.unwrap_err().is_cancelled());
    assert_eq!(transport.started.get(), 1);
    assert_eq!(transport.settled.get(), 0);
}

#[tokio::test]
async fn cancelling_before_dispatch_skips_the_transport() {
    let (transport, _gate) = GatedTransport::new();
    let client = client_with(transport.clone(), Session::in_memory());

    let call = user::get_register_code(&client, "13800138000");
    call.cancel();

    assert!(call.await.unwrap_err().is_cancelled());
    assert_eq!(transport.started.get(), 0);
}

#[tokio::test]
async fn cancelling_after_settlement_is_a_no_op() {
    let transport = ScriptedTransport::default();
    transport.reply(StatusCode::OK, json!({ "code": 200, "data": { "username": "a" } }));
    let client = client_with(transport, Session::in_memory());

    let (request, source) = user::get_user_info(&client).into_parts();
    let info = request.await.unwrap();
    source.cancel();

    assert_eq!(info.username.as_deref(), Some("a"));
    assert!(source.is_cancelled());
}

#[tokio::test]
async fn gated_call_resolves_when_released() {
    let (transport, gate) = GatedTransport::new();
    let client = client_with(transport.clone(), Session::in_memory());

    let mut config = RequestConfig::new();
    let _source = add_cancel_token(&mut config);
    let request = client.request::<Value>(Method::GET, "/user/info", config);

    gate.send(HttpResponse::new(
        StatusCode::OK,
        json!({ "code": 200, "data": "ready" }),
    ))
    .unwrap();

    assert_eq!(request.await.unwrap(), json!("ready"));
    assert_eq!(transport.settled.get(), 1);
}
