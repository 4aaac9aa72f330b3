//! Request executor and typed endpoint methods for the FRM API.
//!
//! # Design
//! `FrmClient` holds its immutable configuration, the parsed base URL and a
//! `Transport`. Every call is split the same way the data flows:
//!
//! 1. `build_request` turns endpoint + method + body into an `HttpRequest`
//!    (pure, no I/O);
//! 2. the transport executes it;
//! 3. `parse_response` classifies the `HttpResponse` and parses its body
//!    (pure);
//! 4. `normalize_keys` re-cases the payload and `schema::validate` turns it
//!    into the endpoint's record type.
//!
//! The typed methods fix endpoint, method, auth requirement and result
//! shape. `request` exposes steps 1-3 plus normalization for endpoints that
//! have no typed wrapper.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{FrmError, NO_ERROR_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::normalize::normalize_keys;
use crate::schema::{expect_object, expect_object_array, validate};
use crate::types::{
    ChatMessage, Coordinates, FactoryBuilding, MachineKind, OneOrMany, Player, SendChatMessage,
    SendChatMessageResponse, SessionInfo, SetEnabledParams, SetSwitchParams, Switch, SwitchState,
};

/// Header carrying the raw token on authenticated endpoints.
pub const AUTH_HEADER: &str = "X-FRM-Authorization";

/// Decides whether a response counts as success.
pub type ResponsePredicate = fn(&HttpResponse) -> bool;

/// Accepts anything the server did not fail on (status below 500).
pub fn below_server_error(response: &HttpResponse) -> bool {
    response.status < 500
}

/// Per-call knobs for `FrmClient::request`.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    pub include_auth: bool,
    pub is_ok: ResponsePredicate,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            include_auth: false,
            is_ok: HttpResponse::is_success,
        }
    }
}

impl RequestOptions {
    pub fn authenticated() -> Self {
        Self {
            include_auth: true,
            ..Self::default()
        }
    }

    pub fn accept(mut self, is_ok: ResponsePredicate) -> Self {
        self.is_ok = is_ok;
        self
    }
}

/// Blocking client for one Ficsit Remote Monitoring server.
#[derive(Debug, Clone)]
pub struct FrmClient<T = UreqTransport> {
    config: ClientConfig,
    base_url: Url,
    transport: T,
}

impl FrmClient<UreqTransport> {
    /// Build a client that talks HTTP through `ureq`.
    pub fn new(config: ClientConfig) -> Result<Self, FrmError> {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> FrmClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, FrmError> {
        let raw = config.api_base_url();
        let base_url = Url::parse(&raw)
            .map_err(|e| FrmError::Config(format!("invalid base URL {raw:?}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(FrmError::Config(format!(
                "base URL {raw:?} must look like http://host or https://host"
            )));
        }
        Ok(Self {
            config,
            base_url,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute base every endpoint is resolved against.
    pub fn api_base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve `endpoint` against the base URL. A leading slash is optional.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, FrmError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| FrmError::Config(format!("invalid endpoint {endpoint:?}: {e}")))
    }

    pub fn build_request<B>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
        include_auth: bool,
    ) -> Result<HttpRequest, FrmError>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = Vec::new();
        if include_auth {
            let token = self.config.token.as_deref().ok_or_else(|| {
                FrmError::Config(format!("endpoint {endpoint:?} requires a token, but none was provided"))
            })?;
            headers.push((AUTH_HEADER.to_string(), token.to_string()));
        }

        let body = match body {
            Some(body) => {
                let json =
                    serde_json::to_string(body).map_err(|e| FrmError::Serialization(e.to_string()))?;
                headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(json)
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: self.endpoint_url(endpoint)?.into(),
            headers,
            body,
        })
    }

    /// Classify a response and parse its body.
    ///
    /// The body must be a JSON object or array and `is_ok` must accept the
    /// response; otherwise the result is a `Request` error carrying the
    /// status, the body's `error` string and the raw body.
    pub fn parse_response(
        &self,
        response: HttpResponse,
        is_ok: ResponsePredicate,
    ) -> Result<Value, FrmError> {
        match serde_json::from_str::<Value>(&response.body).ok() {
            Some(value @ (Value::Object(_) | Value::Array(_))) if is_ok(&response) => Ok(value),
            parsed => {
                let message = parsed
                    .as_ref()
                    .and_then(|v| v.get("error"))
                    .and_then(Value::as_str)
                    .unwrap_or(NO_ERROR_MESSAGE)
                    .to_string();
                Err(FrmError::Request {
                    status: response.status,
                    message,
                    body: response.body,
                })
            }
        }
    }
}

impl<T: Transport> FrmClient<T> {
    /// Perform one call and return its normalized body.
    pub fn request<B>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Value, FrmError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(endpoint, method, body, options.include_auth)?;
        let response = self.execute(&request)?;
        let body = self.parse_response(response, options.is_ok)?;
        Ok(normalize_keys(&body))
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FrmError> {
        debug!(
            method = %request.method,
            url = %request.url,
            auth = request.header(AUTH_HEADER).is_some(),
            "sending request"
        );

        let response = self.transport.execute(request).map_err(|err| {
            let err = FrmError::from(err);
            if matches!(err, FrmError::ConnectionRefused { .. }) {
                warn!(url = %request.url, "connection refused by FRM server");
            }
            err
        })?;
        debug!(status = response.status, url = %request.url, "response received");
        Ok(response)
    }

    fn get(&self, endpoint: &str) -> Result<Value, FrmError> {
        self.request(endpoint, HttpMethod::Get, None::<&()>, RequestOptions::default())
    }

    fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, FrmError> {
        self.request(
            endpoint,
            HttpMethod::Post,
            Some(body),
            RequestOptions::authenticated(),
        )
    }

    fn get_list<R: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<R>, FrmError> {
        validate(expect_object_array(self.get(endpoint)?)?)
    }

    /// Round-trip latency to the server in milliseconds.
    ///
    /// Any status below 500 counts as a successful round trip whatever the
    /// body holds (the mod itself answers `/ping` with 404), so this only
    /// proves reachability.
    pub fn ping(&self) -> Result<u64, FrmError> {
        let request = self.build_request("ping", HttpMethod::Get, None::<&()>, false)?;
        let started = Instant::now();
        let response = self.execute(&request)?;
        let elapsed = started.elapsed();
        if !below_server_error(&response) {
            // Always rejected, so this yields the `Request` error.
            return self.parse_response(response, |_| false).map(|_| 0);
        }
        Ok(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    /// Drop a map marker at `position`.
    pub fn create_ping(&self, position: &Coordinates) -> Result<(), FrmError> {
        self.post("createPing", position)?;
        Ok(())
    }

    pub fn set_enabled(
        &self,
        params: impl Into<OneOrMany<SetEnabledParams>>,
    ) -> Result<Vec<SwitchState>, FrmError> {
        let params = params.into();
        validate(expect_object_array(self.post("setEnabled", &params)?)?)
    }

    pub fn set_switches(
        &self,
        params: impl Into<OneOrMany<SetSwitchParams>>,
    ) -> Result<Vec<SwitchState>, FrmError> {
        let params = params.into();
        validate(expect_object_array(self.post("setSwitches", &params)?)?)
    }

    pub fn get_chat_messages(&self) -> Result<Vec<ChatMessage>, FrmError> {
        self.get_list("getChatMessages")
    }

    pub fn send_chat_message(
        &self,
        message: &SendChatMessage,
    ) -> Result<SendChatMessageResponse, FrmError> {
        validate(expect_object(self.post("sendChatMessage", message)?)?)
    }

    pub fn get_session_info(&self) -> Result<SessionInfo, FrmError> {
        validate(expect_object(self.get("getSessionInfo")?)?)
    }

    pub fn get_players(&self) -> Result<Vec<Player>, FrmError> {
        self.get_list("getPlayer")
    }

    /// Every production building in the world.
    pub fn get_factory(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_list("getFactory")
    }

    /// Production buildings of one machine family.
    pub fn get_machines(&self, kind: MachineKind) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_list(kind.endpoint())
    }

    pub fn get_assemblers(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Assembler)
    }

    pub fn get_blenders(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Blender)
    }

    pub fn get_constructors(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Constructor)
    }

    pub fn get_particle_accelerators(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::ParticleAccelerator)
    }

    pub fn get_converters(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Converter)
    }

    pub fn get_foundries(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Foundry)
    }

    pub fn get_manufacturers(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Manufacturer)
    }

    pub fn get_packagers(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Packager)
    }

    pub fn get_refineries(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Refinery)
    }

    pub fn get_smelters(&self) -> Result<Vec<FactoryBuilding>, FrmError> {
        self.get_machines(MachineKind::Smelter)
    }

    pub fn get_switches(&self) -> Result<Vec<Switch>, FrmError> {
        self.get_list("getSwitches")
    }
}
