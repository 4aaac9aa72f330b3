//! Canned world data in the mod's wire shape.
//!
//! Keys are mixed PascalCase/camelCase on purpose: the real mod is not
//! consistent either (`ID`, `ClassName`, but `location` and `features`).

use serde_json::{json, Value};

use crate::{ChatEntry, ChatColor, PowerSwitch};

/// Machine endpoint name and the building class it serves.
pub const MACHINE_CLASSES: [(&str, &str); 10] = [
    ("getAssembler", "Build_AssemblerMk1_C"),
    ("getBlender", "Build_Blender_C"),
    ("getConstructor", "Build_ConstructorMk1_C"),
    ("getParticle", "Build_HadronCollider_C"),
    ("getConverter", "Build_Converter_C"),
    ("getFoundry", "Build_FoundryMk1_C"),
    ("getManufacturer", "Build_ManufacturerMk1_C"),
    ("getPackager", "Build_Packager_C"),
    ("getRefinery", "Build_OilRefinery_C"),
    ("getSmelter", "Build_SmelterMk1_C"),
];

fn features(name: &str, kind: &str, x: f64, y: f64, z: f64) -> Value {
    json!({
        "properties": { "name": name, "type": kind },
        "geometry": {
            "coordinates": { "X": x, "Y": y, "Z": z },
            "type": "Point"
        }
    })
}

fn bounding_box(x: f64, y: f64, z: f64) -> Value {
    json!({
        "min": { "x": x - 400.0, "y": y - 500.0, "z": z },
        "max": { "x": x + 400.0, "y": y + 500.0, "z": z + 900.0 }
    })
}

fn factory_building(
    index: u32,
    class_name: &str,
    name: &str,
    recipe: (&str, &str),
    product: (&str, &str, f64),
    ingredient: (&str, &str, f64),
    x: f64,
) -> Value {
    let (y, z) = (-1250.5, 300.0);
    let producing = product.2 > 0.0;
    json!({
        "ID": format!("{class_name}_{index}"),
        "Name": name,
        "ClassName": class_name,
        "location": { "x": x, "y": y, "z": z, "rotation": 90 },
        "BoundingBox": bounding_box(x, y, z),
        "ColorSlot": { "PrimaryColor": "FA954900", "SecondaryColor": "5F668C00" },
        "Recipe": recipe.0,
        "RecipeClassName": recipe.1,
        "production": [{
            "Name": product.0,
            "ClassName": product.1,
            "Amount": 2,
            "CurrentProd": product.2,
            "MaxProd": 15.0,
            "ProdPercent": product.2 / 15.0 * 100.0
        }],
        "ingredients": [{
            "Name": ingredient.0,
            "ClassName": ingredient.1,
            "Amount": 4,
            "CurrentConsumed": ingredient.2,
            "MaxConsumed": 30.0,
            "ConsPercent": ingredient.2 / 30.0 * 100.0
        }],
        "InputInventory": [{ "Name": ingredient.0, "ClassName": ingredient.1, "Amount": 48 }],
        "OutputInventory": [],
        "Productivity": if producing { 100.0 } else { 0.0 },
        "ManuSpeed": 100.0,
        "Somersloops": 0,
        "PowerShards": 1,
        "IsConfigured": true,
        "IsProducing": producing,
        "IsPaused": false,
        "PowerInfo": {
            "CircuitGroupID": 1,
            "CircuitID": 4,
            "FuseTriggered": false,
            "PowerConsumed": if producing { 4.0 } else { 0.1 },
            "MaxPowerConsumed": 4.0
        },
        "features": features(name, name, x, y, z)
    })
}

pub fn factory() -> Vec<Value> {
    vec![
        factory_building(
            0,
            "Build_ConstructorMk1_C",
            "Constructor",
            ("Iron Rod", "Recipe_IronRod_C"),
            ("Iron Rod", "Desc_IronRod_C", 15.0),
            ("Iron Ingot", "Desc_IronIngot_C", 15.0),
            1200.0,
        ),
        factory_building(
            1,
            "Build_ConstructorMk1_C",
            "Constructor",
            ("Screw", "Recipe_Screw_C"),
            ("Screw", "Desc_IronScrew_C", 0.0),
            ("Iron Rod", "Desc_IronRod_C", 0.0),
            2000.0,
        ),
        factory_building(
            0,
            "Build_SmelterMk1_C",
            "Smelter",
            ("Iron Ingot", "Recipe_IngotIron_C"),
            ("Iron Ingot", "Desc_IronIngot_C", 30.0),
            ("Iron Ore", "Desc_OreIron_C", 30.0),
            -800.0,
        ),
        factory_building(
            0,
            "Build_AssemblerMk1_C",
            "Assembler",
            ("Reinforced Iron Plate", "Recipe_IronPlateReinforced_C"),
            ("Reinforced Iron Plate", "Desc_IronPlateReinforced_C", 5.0),
            ("Iron Plate", "Desc_IronPlate_C", 30.0),
            3600.0,
        ),
    ]
}

/// Buildings served by one machine endpoint, or `None` if `endpoint` is not
/// a machine endpoint.
pub fn machines(endpoint: &str) -> Option<Vec<Value>> {
    let (_, class_name) = MACHINE_CLASSES.iter().find(|(e, _)| *e == endpoint)?;
    Some(
        factory()
            .into_iter()
            .filter(|b| b["ClassName"] == *class_name)
            .collect(),
    )
}

pub fn players() -> Vec<Value> {
    vec![json!({
        "ID": "Char_Player_C_2147482431",
        "Name": "Pioneer",
        "ClassName": "Char_Player_C",
        "location": { "x": 1520.0, "y": -980.25, "z": 310.0, "rotation": 45 },
        "Online": true,
        "PlayerHP": 100,
        "Speed": 0,
        "Dead": false,
        "Inventory": [
            { "Name": "Iron Plate", "ClassName": "Desc_IronPlate_C", "Amount": 200 },
            { "Name": "Xeno-Zapper", "ClassName": "Desc_ShockShank_C", "Amount": 1 }
        ],
        "features": features("Pioneer", "Player", 1520.0, -980.25, 310.0)
    })]
}

pub fn session_info() -> Value {
    json!({
        "SessionName": "Home Base",
        "MapName": "Persistent_Level",
        "IsPaused": false,
        "DayLength": 50,
        "NightLength": 10,
        "PassedDays": 12,
        "NumberOfDaysSinceLastDeath": 3,
        "Hours": 14,
        "Minutes": 25,
        "Seconds": 31.5,
        "IsDay": true,
        "TotalPlayDuration": 86400,
        "TotalPlayDurationText": "24:00:00"
    })
}

pub fn switches() -> Vec<PowerSwitch> {
    vec![
        PowerSwitch {
            id: "Build_PowerSwitch_C_2147467389".to_string(),
            name: "Main Grid".to_string(),
            is_on: true,
            priority: 0,
            primary: 1,
            secondary: 2,
            connected: (true, true),
            location: (800.0, 400.0, 0.0, 180.0),
        },
        PowerSwitch {
            id: "Build_PowerSwitch_C_2147467390".to_string(),
            name: "Backup Grid".to_string(),
            is_on: false,
            priority: 3,
            primary: 2,
            secondary: -1,
            connected: (true, false),
            location: (900.0, 400.0, 0.0, 180.0),
        },
    ]
}

pub fn chat() -> Vec<ChatEntry> {
    vec![ChatEntry {
        time_stamp: 0.0,
        server_time_stamp: 0.0,
        sender: String::new(),
        kind: "System".to_string(),
        message: "HTTP Service Initiated on Port: 8080".to_string(),
        color: ChatColor {
            r: 0.0,
            g: 1.0,
            b: 0.0,
            a: 1.0,
        },
    }]
}

impl PowerSwitch {
    /// Wire shape served by `getSwitches`.
    pub fn to_wire(&self) -> Value {
        let (x, y, z, rotation) = self.location;
        json!({
            "ID": self.id,
            "Name": self.name,
            "ClassName": "Build_PowerSwitch_C",
            "location": { "x": x, "y": y, "z": z, "rotation": rotation },
            "BoundingBox": bounding_box(x, y, z),
            "ColorSlot": { "PrimaryColor": "FA954900", "SecondaryColor": "5F668C00" },
            "SwitchTag": self.name,
            "IsOn": self.is_on,
            "Connected0": u8::from(self.connected.0),
            "Connected1": u8::from(self.connected.1),
            "Primary": self.primary,
            "Secondary": self.secondary,
            "Priority": self.priority,
            "features": features(&self.name, "Power Switch", x, y, z)
        })
    }

    /// Echo returned by the write endpoints.
    pub fn status(&self) -> Value {
        json!({
            "ID": self.id,
            "Name": self.name,
            "Status": self.is_on,
            "Priority": self.priority
        })
    }
}
