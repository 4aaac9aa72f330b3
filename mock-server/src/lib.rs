//! In-memory stand-in for the Ficsit Remote Monitoring HTTP server.
//!
//! Serves the same endpoints as the game mod with fixture data in the mod's
//! wire shape. Write endpoints check `X-FRM-Authorization` against the token
//! the app was built with and mutate in-memory switch/chat state.

pub mod fixtures;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub const AUTH_HEADER: &str = "X-FRM-Authorization";

#[derive(Clone, Debug)]
pub struct PowerSwitch {
    pub id: String,
    pub name: String,
    pub is_on: bool,
    pub priority: i64,
    pub primary: i64,
    pub secondary: i64,
    pub connected: (bool, bool),
    pub location: (f64, f64, f64, f64),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatEntry {
    pub time_stamp: f64,
    pub server_time_stamp: f64,
    pub sender: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub message: String,
    pub color: ChatColor,
}

#[derive(Debug, Default)]
pub struct World {
    pub switches: Vec<PowerSwitch>,
    pub chat: Vec<ChatEntry>,
}

impl World {
    pub fn seeded() -> Self {
        Self {
            switches: fixtures::switches(),
            chat: fixtures::chat(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    world: Arc<RwLock<World>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetEnabled {
    #[serde(rename = "ID")]
    pub id: String,
    pub status: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetSwitch {
    #[serde(rename = "ID")]
    pub id: String,
    pub status: Option<bool>,
    pub name: Option<String>,
    pub priority: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SendChat {
    pub message: String,
    #[serde(default)]
    pub sender: String,
    pub color: Option<LowerColor>,
}

#[derive(Debug, Deserialize)]
pub struct LowerColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

type Rejection = (StatusCode, Json<Value>);

pub fn app(token: impl Into<String>) -> Router {
    let state = AppState {
        token: Arc::from(token.into()),
        world: Arc::new(RwLock::new(World::seeded())),
    };
    Router::new()
        .route("/getPlayer", get(get_players))
        .route("/getFactory", get(get_factory))
        .route("/getSwitches", get(get_switches))
        .route("/getChatMessages", get(get_chat_messages))
        .route("/getSessionInfo", get(get_session_info))
        .route("/createPing", post(create_ping))
        .route("/setEnabled", post(set_enabled))
        .route("/setSwitches", post(set_switches))
        .route("/sendChatMessage", post(send_chat_message))
        .route("/{endpoint}", get(get_machines))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: impl Into<String>) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock FRM server listening");
    }
    axum::serve(listener, app(token)).await
}

fn no_endpoint() -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "No matching endpoint found." })),
    )
}

async fn not_found() -> Rejection {
    no_endpoint()
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    let supplied = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());
    if supplied == Some(&*state.token) {
        return Ok(());
    }
    warn!(present = supplied.is_some(), "rejected write with bad token");
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid or missing X-FRM-Authorization token." })),
    ))
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

async fn get_players() -> Json<Vec<Value>> {
    Json(fixtures::players())
}

async fn get_factory() -> Json<Vec<Value>> {
    Json(fixtures::factory())
}

async fn get_machines(Path(endpoint): Path<String>) -> Result<Json<Vec<Value>>, Rejection> {
    fixtures::machines(&endpoint).map(Json).ok_or_else(no_endpoint)
}

async fn get_session_info() -> Json<Value> {
    Json(fixtures::session_info())
}

async fn get_switches(State(state): State<AppState>) -> Json<Vec<Value>> {
    let world = state.world.read().await;
    Json(world.switches.iter().map(PowerSwitch::to_wire).collect())
}

async fn get_chat_messages(State(state): State<AppState>) -> Json<Vec<ChatEntry>> {
    let world = state.world.read().await;
    Json(world.chat.clone())
}

async fn create_ping(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(position): Json<Coordinates>,
) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;
    info!(x = position.x, y = position.y, z = position.z, "map marker placed");
    Ok(Json(json!({ "IsSuccessful": true })))
}

async fn set_enabled(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<OneOrMany<SetEnabled>>,
) -> Result<Json<Vec<Value>>, Rejection> {
    authorize(&state, &headers)?;
    let mut world = state.world.write().await;
    let mut updated = Vec::new();
    for change in input.into_vec() {
        if let Some(switch) = world.switches.iter_mut().find(|s| s.id == change.id) {
            switch.is_on = change.status;
            updated.push(switch.status());
        }
    }
    Ok(Json(updated))
}

async fn set_switches(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<OneOrMany<SetSwitch>>,
) -> Result<Json<Vec<Value>>, Rejection> {
    authorize(&state, &headers)?;
    let mut world = state.world.write().await;
    let mut updated = Vec::new();
    for change in input.into_vec() {
        if let Some(switch) = world.switches.iter_mut().find(|s| s.id == change.id) {
            if let Some(status) = change.status {
                switch.is_on = status;
            }
            if let Some(name) = change.name {
                switch.name = name;
            }
            if let Some(priority) = change.priority {
                switch.priority = priority;
            }
            updated.push(switch.status());
        }
    }
    Ok(Json(updated))
}

async fn send_chat_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SendChat>,
) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;
    let kind = match input.sender.as_str() {
        "" => "System",
        s if s.eq_ignore_ascii_case("ada") => "Ada",
        _ => "Player",
    };
    let color = input
        .color
        .map(|c| ChatColor {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        })
        .unwrap_or(ChatColor {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        });
    let now = now_secs();
    state.world.write().await.chat.push(ChatEntry {
        time_stamp: now,
        server_time_stamp: now,
        sender: input.sender,
        kind: kind.to_string(),
        message: input.message.clone(),
        color,
    });
    Ok(Json(json!({ "IsSent": true, "Message": input.message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_entry_serializes_pascal_case() {
        let json = serde_json::to_value(&fixtures::chat()[0]).unwrap();
        assert_eq!(json["Type"], "System");
        assert_eq!(json["Color"]["G"], 1.0);
        assert!(json.get("TimeStamp").is_some());
    }

    #[test]
    fn one_or_many_accepts_both_shapes() {
        let one: OneOrMany<SetEnabled> =
            serde_json::from_str(r#"{"ID":"a","status":true}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);
        let many: OneOrMany<SetEnabled> =
            serde_json::from_str(r#"[{"ID":"a","status":true},{"ID":"b","status":false}]"#)
                .unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn set_switch_fields_are_optional() {
        let input: SetSwitch = serde_json::from_str(r#"{"ID":"a"}"#).unwrap();
        assert!(input.status.is_none());
        assert!(input.name.is_none());
        assert!(input.priority.is_none());
    }

    #[test]
    fn machine_filter_matches_class() {
        let smelters = fixtures::machines("getSmelter").unwrap();
        assert_eq!(smelters.len(), 1);
        assert_eq!(smelters[0]["ClassName"], "Build_SmelterMk1_C");
        assert!(fixtures::machines("getFactory").is_none());
        assert!(fixtures::machines("getBlender").unwrap().is_empty());
    }

    #[test]
    fn switch_wire_uses_numeric_connectors() {
        let wire = fixtures::switches()[1].to_wire();
        assert_eq!(wire["Connected0"], 1);
        assert_eq!(wire["Connected1"], 0);
    }
}
