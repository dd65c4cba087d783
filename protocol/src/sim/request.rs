//! Typed view over |request| payloads
//!
//! The [`super::SimMessage::Request`] element keeps the JSON as a raw string;
//! these types are the opt-in structured decoding of it.

use serde::Deserialize;

use super::battle::{HpStatus, Player};

/// A battle request asking the player to make a decision
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Request ID for choice synchronization
    pub rqid: Option<u64>,

    /// Active pokemon and their available moves
    #[serde(default)]
    pub active: Option<Vec<ActivePokemon>>,

    /// The requesting player's side/team
    pub side: Option<SideInfo>,

    /// Which slots must switch out (doubles/triples)
    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,

    /// Whether this is the team preview decision
    #[serde(default)]
    pub team_preview: bool,

    /// Whether we're waiting for the opponent
    #[serde(default)]
    pub wait: bool,

    #[serde(default)]
    pub no_cancel: bool,
}

impl BattleRequest {
    /// Decode a raw |request| payload
    pub fn parse(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Check if this request requires a decision from the player
    pub fn needs_decision(&self) -> bool {
        !self.wait && (self.team_preview || self.force_switch.is_some() || self.active.is_some())
    }

    /// Check if this is a force switch request
    pub fn is_force_switch(&self) -> bool {
        self.force_switch
            .as_ref()
            .map(|fs| fs.iter().any(|&b| b))
            .unwrap_or(false)
    }

    /// Get the pokemon currently available to switch in
    pub fn available_switches(&self) -> Vec<&SidePokemon> {
        self.side
            .as_ref()
            .map(|s| {
                s.pokemon
                    .iter()
                    .filter(|p| !p.active && !p.is_fainted())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// An active pokemon's decision options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    #[serde(default)]
    pub trapped: bool,

    #[serde(default)]
    pub maybe_trapped: bool,

    #[serde(default)]
    pub can_mega_evo: bool,

    #[serde(default)]
    pub can_dynamax: bool,

    #[serde(default)]
    pub can_terastallize: Option<String>,
}

impl ActivePokemon {
    /// Get available (non-disabled, with PP) moves as 1-based slot numbers
    pub fn available_moves(&self) -> Vec<(usize, &MoveSlot)> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.disabled && m.pp > 0)
            .map(|(i, m)| (i + 1, m))
            .collect()
    }

    pub fn can_switch(&self) -> bool {
        !self.trapped && !self.maybe_trapped
    }
}

/// A move slot on an active pokemon
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    /// Display name of the move
    #[serde(rename = "move")]
    pub name: String,

    /// Move ID (lowercase, no spaces)
    pub id: String,

    pub pp: u32,

    #[serde(rename = "maxpp")]
    pub max_pp: u32,

    /// Target type (normal, self, allySide, ...)
    #[serde(default)]
    pub target: String,

    #[serde(default)]
    pub disabled: bool,
}

/// The requesting player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideInfo {
    pub name: String,

    /// Player ID (p1, p2, ...)
    pub id: String,

    #[serde(default)]
    pub pokemon: Vec<SidePokemon>,
}

impl SideInfo {
    pub fn player(&self) -> Option<Player> {
        Player::parse(&self.id)
    }
}

/// A pokemon on the requesting player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePokemon {
    /// Pokemon identifier (e.g., "p1: Pikachu")
    pub ident: String,

    /// Details string (species, level, gender, shiny)
    pub details: String,

    /// Current condition ("HP/MaxHP STATUS")
    pub condition: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub moves: Vec<String>,

    #[serde(default)]
    pub base_ability: String,

    #[serde(default)]
    pub ability: String,

    #[serde(default)]
    pub item: String,

    #[serde(default)]
    pub pokeball: String,
}

impl SidePokemon {
    /// The condition string decoded through the protocol HP grammar.
    /// Returns `None` for conditions the simulator should never emit.
    pub fn hp_status(&self) -> Option<HpStatus> {
        HpStatus::parse(&self.condition).ok()
    }

    pub fn is_fainted(&self) -> bool {
        self.condition == "0 fnt" || self.condition.ends_with(" fnt")
    }

    /// HP as a percentage (0-100)
    pub fn hp_percent(&self) -> u32 {
        match self.hp_status() {
            Some(HpStatus {
                current,
                max: Some(max),
                ..
            }) if max > 0 => current * 100 / max,
            _ => 0,
        }
    }

    /// Species name from the details string
    pub fn species(&self) -> &str {
        self.details.split(',').next().unwrap_or(&self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "rqid": 3,
        "active": [{
            "moves": [
                {"move": "Thunderbolt", "id": "thunderbolt", "pp": 24, "maxpp": 24, "target": "normal", "disabled": false},
                {"move": "Volt Switch", "id": "voltswitch", "pp": 0, "maxpp": 32, "target": "normal", "disabled": false}
            ],
            "trapped": false
        }],
        "side": {
            "name": "Alice",
            "id": "p1",
            "pokemon": [
                {"ident": "p1: Pikachu", "details": "Pikachu, L50, M", "condition": "110/110", "active": true,
                 "moves": ["thunderbolt", "voltswitch"], "baseAbility": "static", "ability": "static",
                 "item": "lightball", "pokeball": "pokeball"},
                {"ident": "p1: Snorlax", "details": "Snorlax, L50, F", "condition": "0 fnt", "active": false,
                 "moves": ["bodyslam"], "baseAbility": "thickfat", "ability": "thickfat",
                 "item": "leftovers", "pokeball": "pokeball"}
            ]
        }
    }"#;

    #[test]
    fn test_decode_request() {
        let request = BattleRequest::parse(REQUEST).unwrap();
        assert_eq!(request.rqid, Some(3));
        assert!(request.needs_decision());
        assert!(!request.is_force_switch());

        let active = &request.active.as_ref().unwrap()[0];
        let available = active.available_moves();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].0, 1);
        assert_eq!(available[0].1.id, "thunderbolt");

        let side = request.side.as_ref().unwrap();
        assert_eq!(side.player(), Some(Player::P1));
        assert_eq!(side.pokemon[0].species(), "Pikachu");
        assert_eq!(side.pokemon[0].hp_percent(), 100);
        assert!(side.pokemon[1].is_fainted());

        // Fainted pokemon are not switch candidates
        assert!(request.available_switches().is_empty());
    }

    #[test]
    fn test_wait_request_needs_no_decision() {
        let request = BattleRequest::parse(r#"{"wait": true, "side": null}"#).unwrap();
        assert!(!request.needs_decision());
    }
}
