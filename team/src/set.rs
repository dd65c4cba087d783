//! Team member value objects

use serde::{Deserialize, Serialize};

/// Six named stat values, used for both EVs (0-255) and IVs (0-31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTable {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spa: u8,
    pub spd: u8,
    pub spe: u8,
}

impl StatsTable {
    /// All six stats at the same value
    pub fn uniform(value: u8) -> Self {
        StatsTable {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    /// Values in canonical order: hp, atk, def, spa, spd, spe
    pub fn values(&self) -> [u8; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }

    pub fn is_uniform(&self, value: u8) -> bool {
        self.values().iter().all(|&v| v == value)
    }
}

impl Default for StatsTable {
    fn default() -> Self {
        StatsTable::uniform(0)
    }
}

/// One team member, as the simulator's `>player` command accepts it.
///
/// Serializes to the simulator's team JSON with its exact key casing
/// (`hpType`, `dynamaxLevel`, `teraType`); the casing is a wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PokemonSet {
    /// Nickname; falls back to the species when empty
    pub name: String,
    pub species: String,
    pub item: String,
    pub ability: String,
    pub moves: Vec<String>,
    pub nature: String,
    /// "M", "F", or empty for genderless/unspecified
    pub gender: String,
    pub evs: StatsTable,
    pub ivs: StatsTable,
    /// 1-100 in standard play; values up to 9999 are accepted
    pub level: u16,
    pub shiny: bool,
    pub happiness: u8,
    pub pokeball: String,
    /// Hidden Power type override
    pub hp_type: String,
    /// 0-10
    pub dynamax_level: u8,
    pub gigantamax: bool,
    pub tera_type: String,
}

impl Default for PokemonSet {
    fn default() -> Self {
        PokemonSet {
            name: String::new(),
            species: String::new(),
            item: String::new(),
            ability: String::new(),
            moves: Vec::new(),
            nature: String::new(),
            gender: String::new(),
            evs: StatsTable::default(),
            ivs: StatsTable::uniform(31),
            level: 100,
            shiny: false,
            happiness: 255,
            pokeball: String::new(),
            hp_type: String::new(),
            dynamax_level: 10,
            gigantamax: false,
            tera_type: String::new(),
        }
    }
}

impl PokemonSet {
    /// A default set of the given species
    pub fn new(species: impl Into<String>) -> Self {
        PokemonSet {
            species: species.into(),
            ..PokemonSet::default()
        }
    }

    /// Display name: nickname if set, species otherwise
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.species
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let set = PokemonSet::new("Pikachu");
        assert_eq!(set.species, "Pikachu");
        assert_eq!(set.level, 100);
        assert_eq!(set.happiness, 255);
        assert!(set.ivs.is_uniform(31));
        assert!(set.evs.is_uniform(0));
        assert_eq!(set.display_name(), "Pikachu");
    }

    #[test]
    fn test_json_key_casing() {
        let mut set = PokemonSet::new("Charizard");
        set.hp_type = "Fire".to_string();
        set.tera_type = "Dragon".to_string();
        set.dynamax_level = 5;

        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"hpType\":\"Fire\""));
        assert!(json.contains("\"teraType\":\"Dragon\""));
        assert!(json.contains("\"dynamaxLevel\":5"));
        assert!(!json.contains("hp_type"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut set = PokemonSet::new("Garchomp");
        set.moves = vec!["Earthquake".to_string(), "Outrage".to_string()];
        set.evs.atk = 252;
        set.evs.spe = 252;
        set.evs.hp = 4;

        let json = serde_json::to_string(&set).unwrap();
        let back: PokemonSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let set: PokemonSet = serde_json::from_str(r#"{"species":"Ditto"}"#).unwrap();
        assert_eq!(set.species, "Ditto");
        assert_eq!(set.level, 100);
        assert!(set.ivs.is_uniform(31));
    }
}
