//! Outbound simulator commands
//!
//! Pure string builders for the `>`-prefixed command lines the simulator
//! consumes. The JSON key casing (`formatid`, `name`, `team`) is a wire
//! contract with the simulator, not a style choice.

use serde_json::{Value, json};
use thiserror::Error;

use crate::sim::battle::Player;
use porygon_team::PokemonSet;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("a choice command requires at least one token")]
    EmptyChoice,

    #[error("failed to serialize team: {0}")]
    Team(#[from] serde_json::Error),
}

/// A team payload for the `>player` command: either the packed text format
/// or structured sets serialized to team JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum TeamSpec {
    Packed(String),
    Sets(Vec<PokemonSet>),
}

impl TeamSpec {
    fn to_value(&self) -> Result<Value, EncodeError> {
        match self {
            TeamSpec::Packed(team) => Ok(Value::String(team.clone())),
            TeamSpec::Sets(sets) => Ok(serde_json::to_value(sets)?),
        }
    }
}

/// Encode `>start {"formatid":"<id>"}`
pub fn encode_start(format_id: &str) -> String {
    format!(">start {}", json!({ "formatid": format_id }))
}

/// Encode `>player p<N> {"name":...}`, with a `team` key only when a team
/// is supplied.
pub fn encode_set_player(
    player: Player,
    name: &str,
    team: Option<&TeamSpec>,
) -> Result<String, EncodeError> {
    let mut payload = serde_json::Map::new();
    payload.insert("name".to_string(), Value::String(name.to_string()));

    if let Some(team) = team {
        payload.insert("team".to_string(), team.to_value()?);
    }

    Ok(format!(
        ">player {} {}",
        player.as_str(),
        Value::Object(payload)
    ))
}

/// Encode `>p<N> <token> <token> ...`
///
/// Fails before building anything if no tokens are supplied.
pub fn encode_player_choice<S: AsRef<str>>(
    player: Player,
    tokens: &[S],
) -> Result<String, EncodeError> {
    if tokens.is_empty() {
        return Err(EncodeError::EmptyChoice);
    }

    let joined = tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!(">{} {}", player.as_str(), joined))
}

/// Commands the host sends to the simulator
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// >start {"formatid":FORMAT}
    Start { format_id: String },

    /// >player pN {"name":NAME,"team":TEAM?}
    SetPlayer {
        player: Player,
        name: String,
        team: Option<TeamSpec>,
    },

    /// >pN CHOICE...
    Choose {
        player: Player,
        tokens: Vec<String>,
    },
}

impl SimCommand {
    /// Serialize to the exact wire line
    pub fn to_wire_format(&self) -> Result<String, EncodeError> {
        match self {
            Self::Start { format_id } => Ok(encode_start(format_id)),
            Self::SetPlayer { player, name, team } => {
                encode_set_player(*player, name, team.as_ref())
            }
            Self::Choose { player, tokens } => encode_player_choice(*player, tokens),
        }
    }
}
