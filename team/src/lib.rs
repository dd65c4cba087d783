//! Team set types and serialization for the battle simulator.
//!
//! A [`PokemonSet`] is a pure value object describing one team member; it has
//! no lifecycle beyond construction and serialization. Teams are handed to
//! the simulator either as JSON (see [`to_json`]) or as the packed text
//! format (see [`pack_team`]).

mod pack;
mod set;

pub use pack::{pack_set, pack_team, to_id};
pub use set::{PokemonSet, StatsTable};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeamError {
    #[error("failed to serialize team: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a team to the simulator's team JSON (an array of set objects).
pub fn to_json(team: &[PokemonSet]) -> Result<String, TeamError> {
    Ok(serde_json::to_string(team)?)
}

/// Deserialize a team from the simulator's team JSON.
pub fn from_json(json: &str) -> Result<Vec<PokemonSet>, TeamError> {
    Ok(serde_json::from_str(json)?)
}
