//! Test harness for driving the router in-process.
//!
//! Builds the real router around mock providers and sends requests through
//! `tower::ServiceExt::oneshot`, so no socket is opened.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use server_core::kernel::test_dependencies::{
    MockIdentityService, MockTwilioService, TestDependencies,
};
use server_core::server::build_app;
use tower::ServiceExt;

pub struct TestHarness {
    pub deps: TestDependencies,
    app: Router,
}

impl TestHarness {
    pub fn new(twilio: MockTwilioService, identity: MockIdentityService) -> Self {
        let deps = TestDependencies::new(twilio, identity);
        let app = build_app(deps.server_deps());
        Self { deps, app }
    }

    pub async fn send_raw(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.send_raw(request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// POST a JSON document and decode the JSON reply
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new(MockTwilioService::new(), MockIdentityService::new())
    }
}
