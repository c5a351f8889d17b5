//! Shared wiremock fixtures for integration tests.

#![allow(dead_code)]

use pimcore_client::{ConnectionConfig, PimcoreClient};
use serde_json::{json, Value};
use wiremock::MockServer;

/// API key used by every test client.
pub const TEST_KEY: &str = "fakekey";

/// Base path all REST endpoints live under.
pub const REST: &str = "/webservice/rest";

/// Client wired to a mock server with the standard test key.
pub fn test_client(server: &MockServer) -> PimcoreClient {
    PimcoreClient::with_http_client(
        ConnectionConfig::new(server.uri(), TEST_KEY),
        reqwest::Client::new(),
    )
}

/// Standard success envelope wrapping a `data` member.
pub fn success_body(data: Value) -> Value {
    json!({ "success": true, "data": data, "msg": "ok" })
}

/// Success envelope of a create call, reporting the new id.
pub fn create_reply(id: i64) -> Value {
    json!({ "success": true, "id": id })
}

/// Application-level failure envelope.
pub fn error_body(msg: &str) -> Value {
    json!({ "success": false, "msg": msg })
}

/// Source fixture: object 45 under parent 987, with two direct children.
pub fn source_object() -> Value {
    json!({
        "id": 45,
        "parentId": 987,
        "key": "press-kit",
        "path": "/marketing/press-kit",
        "type": "folder",
        "published": true,
        "childs": [
            { "id": 46, "type": "object" },
            { "id": 47, "type": "object" }
        ]
    })
}

/// Child fixture as fetched by id.
pub fn child_object(id: i64) -> Value {
    json!({
        "id": id,
        "parentId": 45,
        "key": format!("child-{id}"),
        "path": format!("/marketing/press-kit/child-{id}"),
        "type": "object",
        "published": true
    })
}
