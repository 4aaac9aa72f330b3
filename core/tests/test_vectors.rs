//! Verify the client against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use std::cell::RefCell;

use frm_core::{
    normalize_keys, ClientConfig, FrmClient, FrmError, HttpMethod, HttpRequest, HttpResponse,
    OneOrMany, SetSwitchParams, Transport, TransportError,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";
const TOKEN: &str = "vector-token";

/// Replays one simulated response and remembers the request it was given.
struct ReplayTransport {
    response: HttpResponse,
    seen: RefCell<Option<HttpRequest>>,
}

impl ReplayTransport {
    fn new(simulated: &Value) -> Self {
        Self {
            response: HttpResponse {
                status: simulated["status"].as_u64().unwrap() as u16,
                headers: Vec::new(),
                body: simulated["body"].as_str().unwrap().to_string(),
            },
            seen: RefCell::new(None),
        }
    }
}

impl Transport for ReplayTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.seen.borrow_mut() = Some(request.clone());
        Ok(self.response.clone())
    }
}

fn client(simulated: &Value) -> FrmClient<ReplayTransport> {
    FrmClient::with_transport(
        ClientConfig::new().with_token(TOKEN),
        ReplayTransport::new(simulated),
    )
    .unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        "PATCH" => HttpMethod::Patch,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: unexpected body"),
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let once = normalize_keys(&case["input"]);
        assert_eq!(once, case["expected"], "{name}: normalized");
        assert_eq!(normalize_keys(&once), once, "{name}: idempotent");
    }
}

// ---------------------------------------------------------------------------
// setSwitches
// ---------------------------------------------------------------------------

#[test]
fn set_switches_test_vectors() {
    let raw = include_str!("../../test-vectors/set_switches.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: OneOrMany<SetSwitchParams> = match &case["input"] {
            Value::Array(_) => {
                OneOrMany::Many(serde_json::from_value(case["input"].clone()).unwrap())
            }
            _ => OneOrMany::One(serde_json::from_value(case["input"].clone()).unwrap()),
        };

        let c = client(&case["simulated_response"]);
        let states = c.set_switches(input).unwrap();

        let seen = c.transport().seen.borrow();
        assert_request(name, seen.as_ref().unwrap(), &case["expected_request"]);
        assert_eq!(
            serde_json::to_value(&states).unwrap(),
            case["expected_result"],
            "{name}: parsed result"
        );
    }
}

// ---------------------------------------------------------------------------
// getChatMessages
// ---------------------------------------------------------------------------

#[test]
fn chat_messages_test_vectors() {
    let raw = include_str!("../../test-vectors/chat_messages.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let c = client(&case["simulated_response"]);
        let messages = c.get_chat_messages().unwrap();

        let seen = c.transport().seen.borrow();
        assert_request(name, seen.as_ref().unwrap(), &case["expected_request"]);
        assert_eq!(
            serde_json::to_value(&messages).unwrap(),
            case["expected_result"],
            "{name}: parsed result"
        );
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_error"];
        let c = client(&case["simulated_response"]);
        let err = c.get_session_info().unwrap_err();

        match (expected["kind"].as_str().unwrap(), err) {
            ("request", FrmError::Request { status, message, body }) => {
                assert_eq!(u64::from(status), expected["status"].as_u64().unwrap(), "{name}: status");
                assert_eq!(message, expected["message"].as_str().unwrap(), "{name}: message");
                assert_eq!(
                    body,
                    case["simulated_response"]["body"].as_str().unwrap(),
                    "{name}: raw body"
                );
            }
            ("validation", FrmError::Validation { path, .. }) => {
                assert_eq!(path, expected["path"].as_str().unwrap(), "{name}: path");
            }
            (kind, other) => panic!("{name}: expected {kind} error, got {other:?}"),
        }
    }
}
