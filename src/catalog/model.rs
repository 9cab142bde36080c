//! Catalog records
//!
//! Entity and action records, plus the wire payloads they are decoded from.

use serde::{Deserialize, Serialize};

/// Name of the stand-in action used when an entity has no actions.
pub const SENTINEL_ACTION: &str = "struggle";

// == Records ==
/// A named action an entity can perform, with the reference used to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    pub name: String,
    pub reference: String,
}

/// A catalog creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub name: String,
    /// Sprite image URL, when the catalog has one
    pub sprite_url: Option<String>,
    pub actions: Vec<ActionRef>,
}

/// Resolved action details. `power` is absent for status-style actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub power: Option<u32>,
}

impl Action {
    pub fn new(name: impl Into<String>, power: Option<u32>) -> Self {
        Self {
            name: name.into(),
            power,
        }
    }

    /// Stand-in for entities that have no actions. Carries no power.
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_ACTION, None)
    }
}

// == Wire Payloads ==
#[derive(Debug, Deserialize)]
pub(crate) struct EntityPayload {
    name: String,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    moves: Vec<MoveSlot>,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    action: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionPayload {
    name: String,
    #[serde(default)]
    power: Option<u32>,
}

impl EntityPayload {
    /// Builds the entity record. The id comes from the request, not the body.
    pub(crate) fn into_entity(self, id: u32) -> Entity {
        Entity {
            id,
            name: self.name,
            sprite_url: self.sprites.front_default,
            actions: self
                .moves
                .into_iter()
                .map(|slot| ActionRef {
                    name: slot.action.name,
                    reference: slot.action.url,
                })
                .collect(),
        }
    }
}

impl From<ActionPayload> for Action {
    fn from(payload: ActionPayload) -> Self {
        Self::new(payload.name, payload.power)
    }
}
