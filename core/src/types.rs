//! Typed records for the FRM API.
//!
//! # Design
//! Field names follow the normalized (camelCase) shape, so every record
//! derives `Deserialize` with `rename_all = "camelCase"` and is fed the
//! output of `normalize_keys`. Request payloads serialize to the wire shape
//! directly; that is why the parameter types rename `id` to `ID`.
//!
//! Unknown fields are ignored everywhere. The server adds fields between
//! mod releases and older clients should keep working.
//!
//! The server's actor/building hierarchy is flattened into each record;
//! the `Actor` and `Building` traits give uniform access to the shared
//! part.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{bool_from_int, bool_to_int};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// World position plus yaw in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Coordinates,
    pub max: Coordinates,
}

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// An 8-digit hex color as sent in building color slots, e.g. `FA954900`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() == 8 && value.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(value))
        } else {
            Err(format!("expected 8 hex digits, found {value:?}"))
        }
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub coordinates: Coordinates,
    #[serde(rename = "type")]
    pub kind: GeometryType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Map-marker representation of an actor. Duplicates its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSlot {
    pub primary_color: HexColor,
    pub secondary_color: HexColor,
}

// ---------------------------------------------------------------------------
// Shared actor fields
// ---------------------------------------------------------------------------

/// Fields every world object carries.
pub trait Actor {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn class_name(&self) -> &str;
    fn location(&self) -> &Location;
    fn features(&self) -> &Features;
}

/// Fields every placed building carries on top of `Actor`.
pub trait Building: Actor {
    fn color_slot(&self) -> &ColorSlot;
    fn bounding_box(&self) -> &BoundingBox;
}

macro_rules! impl_actor {
    ($ty:ty) => {
        impl Actor for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn name(&self) -> &str {
                &self.name
            }
            fn class_name(&self) -> &str {
                &self.class_name
            }
            fn location(&self) -> &Location {
                &self.location
            }
            fn features(&self) -> &Features {
                &self.features
            }
        }
    };
}

macro_rules! impl_building {
    ($ty:ty) => {
        impl_actor!($ty);

        impl Building for $ty {
            fn color_slot(&self) -> &ColorSlot {
                &self.color_slot
            }
            fn bounding_box(&self) -> &BoundingBox {
                &self.bounding_box
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    pub name: String,
    pub class_name: String,
    pub amount: f64,
    pub current_prod: f64,
    pub max_prod: f64,
    pub prod_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    pub name: String,
    pub class_name: String,
    pub amount: f64,
    pub current_consumed: f64,
    pub max_consumed: f64,
    pub cons_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    pub class_name: String,
    pub amount: f64,
}

/// Power grid attachment of a building. `-1` ids mean "not connected".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerInfo {
    #[serde(rename = "circuitGroupID")]
    pub circuit_group_id: f64,
    #[serde(rename = "circuitID")]
    pub circuit_id: f64,
    pub fuse_triggered: bool,
    pub power_consumed: f64,
    pub max_power_consumed: f64,
}

/// A production building as returned by `getFactory` and the per-machine
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryBuilding {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub location: Location,
    pub features: Features,
    pub color_slot: ColorSlot,
    pub bounding_box: BoundingBox,
    pub recipe: String,
    pub recipe_class_name: String,
    pub production: Vec<ProductionEntry>,
    pub ingredients: Vec<IngredientEntry>,
    pub input_inventory: Vec<InventoryItem>,
    pub output_inventory: Vec<InventoryItem>,
    pub productivity: f64,
    pub manu_speed: f64,
    pub somersloops: f64,
    pub power_shards: f64,
    pub is_configured: bool,
    pub is_producing: bool,
    pub is_paused: bool,
    pub power_info: PowerInfo,
}

impl_building!(FactoryBuilding);

/// Machine families with a dedicated read endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineKind {
    Assembler,
    Blender,
    Constructor,
    ParticleAccelerator,
    Converter,
    Foundry,
    Manufacturer,
    Packager,
    Refinery,
    Smelter,
}

impl MachineKind {
    pub const ALL: [MachineKind; 10] = [
        MachineKind::Assembler,
        MachineKind::Blender,
        MachineKind::Constructor,
        MachineKind::ParticleAccelerator,
        MachineKind::Converter,
        MachineKind::Foundry,
        MachineKind::Manufacturer,
        MachineKind::Packager,
        MachineKind::Refinery,
        MachineKind::Smelter,
    ];

    /// Endpoint path serving this machine family.
    pub fn endpoint(&self) -> &'static str {
        match self {
            MachineKind::Assembler => "getAssembler",
            MachineKind::Blender => "getBlender",
            MachineKind::Constructor => "getConstructor",
            MachineKind::ParticleAccelerator => "getParticle",
            MachineKind::Converter => "getConverter",
            MachineKind::Foundry => "getFoundry",
            MachineKind::Manufacturer => "getManufacturer",
            MachineKind::Packager => "getPackager",
            MachineKind::Refinery => "getRefinery",
            MachineKind::Smelter => "getSmelter",
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub location: Location,
    pub features: Features,
    #[serde(rename = "playerHP")]
    pub player_hp: f64,
    pub speed: f64,
    pub online: bool,
    pub dead: bool,
    pub inventory: Vec<InventoryItem>,
}

impl_actor!(Player);

// ---------------------------------------------------------------------------
// Switches
// ---------------------------------------------------------------------------

/// A power switch. `connected0`/`connected1` arrive as `0`/`1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Switch {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub location: Location,
    pub features: Features,
    pub color_slot: ColorSlot,
    pub bounding_box: BoundingBox,
    pub switch_tag: String,
    pub is_on: bool,
    #[serde(deserialize_with = "bool_from_int", serialize_with = "bool_to_int")]
    pub connected0: bool,
    #[serde(deserialize_with = "bool_from_int", serialize_with = "bool_to_int")]
    pub connected1: bool,
    /// Circuit id on the first connector.
    pub primary: f64,
    /// Circuit id on the second connector.
    pub secondary: f64,
    pub priority: f64,
}

impl_building!(Switch);

/// Parameters for `setEnabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEnabledParams {
    #[serde(rename = "ID")]
    pub id: String,
    pub status: bool,
}

impl SetEnabledParams {
    pub fn new(id: impl Into<String>, status: bool) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

/// Parameters for `setSwitches`. Omitted fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetSwitchParams {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl SetSwitchParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// State of a switchable building after a write. Only `id` is guaranteed;
/// the server echoes whatever else it knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchState {
    pub id: String,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub priority: Option<f64>,
}

/// A request body that is either one item or a list of items.
///
/// Serializes as whichever shape it holds; a single item is never wrapped
/// into an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        OneOrMany::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMessageType {
    System,
    Ada,
    Player,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub time_stamp: f64,
    pub server_time_stamp: f64,
    pub sender: String,
    #[serde(rename = "type")]
    pub kind: ChatMessageType,
    pub message: String,
    pub color: Color,
}

/// Body of `sendChatMessage`.
///
/// An empty `sender` posts as the server; `"ada"` posts as ADA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendChatMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl SendChatMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sender: None,
            color: None,
        }
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendChatMessageResponse {
    pub is_sent: bool,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_name: String,
    pub map_name: String,
    pub is_paused: bool,
    pub day_length: f64,
    pub night_length: f64,
    pub passed_days: f64,
    pub number_of_days_since_last_death: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub is_day: bool,
    /// Total play time in seconds.
    pub total_play_duration: f64,
    pub total_play_duration_text: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn hex_color_accepts_eight_hex_digits() {
        let color: HexColor = serde_json::from_value(json!("FA954900")).unwrap();
        assert_eq!(color.as_str(), "FA954900");
        assert_eq!(serde_json::to_value(&color).unwrap(), json!("FA954900"));
    }

    #[test]
    fn hex_color_rejects_bad_input() {
        assert!(serde_json::from_value::<HexColor>(json!("FA9549")).is_err());
        assert!(serde_json::from_value::<HexColor>(json!("GGGGGGGG")).is_err());
    }

    #[test]
    fn set_switch_params_wire_shape() {
        let params = SetSwitchParams::new("Build_PowerSwitch_C_1").status(false);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({ "ID": "Build_PowerSwitch_C_1", "status": false })
        );
    }

    #[test]
    fn one_or_many_keeps_received_shape() {
        let one: OneOrMany<SetEnabledParams> = SetEnabledParams::new("A", true).into();
        assert_eq!(
            serde_json::to_value(&one).unwrap(),
            json!({ "ID": "A", "status": true })
        );

        let many: OneOrMany<SetEnabledParams> = vec![SetEnabledParams::new("A", true)].into();
        assert_eq!(
            serde_json::to_value(&many).unwrap(),
            json!([{ "ID": "A", "status": true }])
        );
        assert_eq!(many.len(), 1);
    }

    #[test]
    fn chat_message_type_literals() {
        let kind: ChatMessageType = serde_json::from_value(json!("Ada")).unwrap();
        assert_eq!(kind, ChatMessageType::Ada);
        assert!(serde_json::from_value::<ChatMessageType>(json!("ada")).is_err());
    }

    #[test]
    fn send_chat_message_skips_unset_fields() {
        let body = SendChatMessage::new("hello").sender("ada");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "message": "hello", "sender": "ada" })
        );
    }

    #[test]
    fn machine_endpoints_are_distinct() {
        let mut endpoints: Vec<_> = MachineKind::ALL.iter().map(MachineKind::endpoint).collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), MachineKind::ALL.len());
        assert_eq!(MachineKind::ParticleAccelerator.endpoint(), "getParticle");
    }
}
