//! Owning factions and the registry that issues their identities.

use serde::{Deserialize, Serialize};

use crate::constants::{COMPUTER_COLOR, NEUTRAL_COLOR, PLAYER_COLOR};

/// Identity of a party. Ownership checks compare these, never names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyId(pub u32);

/// Opaque display token for a party, an ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayAttribute(pub u32);

/// A faction that can own planets and ships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    id: PartyId,
    name: String,
    display: DisplayAttribute,
}

impl Party {
    pub fn id(&self) -> PartyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display(&self) -> DisplayAttribute {
        self.display
    }

    /// The neutral party is the only one without a name.
    pub fn is_neutral(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Party {}

/// Name and color of a non-neutral party as read from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySpec {
    pub name: String,
    pub display: DisplayAttribute,
}

/// Display configuration for the three parties of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartiesConfig {
    pub player: PartySpec,
    pub computer: PartySpec,
    pub neutral: DisplayAttribute,
}

impl Default for PartiesConfig {
    fn default() -> Self {
        Self {
            player: PartySpec {
                name: "player".into(),
                display: DisplayAttribute(PLAYER_COLOR),
            },
            computer: PartySpec {
                name: "computer".into(),
                display: DisplayAttribute(COMPUTER_COLOR),
            },
            neutral: DisplayAttribute(NEUTRAL_COLOR),
        }
    }
}

/// The parties taking part in a simulation: player, computer and the single
/// neutral party owning every planet not assigned at start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRegistry {
    parties: Vec<Party>,
}

impl PartyRegistry {
    const PLAYER: PartyId = PartyId(0);
    const COMPUTER: PartyId = PartyId(1);
    const NEUTRAL: PartyId = PartyId(2);

    pub fn new(config: &PartiesConfig) -> Self {
        let parties = vec![
            Party {
                id: Self::PLAYER,
                name: config.player.name.clone(),
                display: config.player.display,
            },
            Party {
                id: Self::COMPUTER,
                name: config.computer.name.clone(),
                display: config.computer.display,
            },
            Party {
                id: Self::NEUTRAL,
                name: String::new(),
                display: config.neutral,
            },
        ];
        Self { parties }
    }

    pub fn get(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(id.0 as usize)
    }

    pub fn player(&self) -> PartyId {
        Self::PLAYER
    }

    pub fn computer(&self) -> PartyId {
        Self::COMPUTER
    }

    pub fn neutral(&self) -> PartyId {
        Self::NEUTRAL
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.iter()
    }
}

impl Default for PartyRegistry {
    fn default() -> Self {
        Self::new(&PartiesConfig::default())
    }
}
