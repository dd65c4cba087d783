//! Battle initialization message parsers
//!
//! These messages are sent at the start of a battle to set up the game state.

use super::SimMessage;
use super::battle::{GameType, Player, PokemonDetails, parse_number};
use crate::ParseError;
use anyhow::Result;

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player(parts: &[&str]) -> Result<SimMessage> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()))?;

    let username = parts.get(3).unwrap_or(&"").to_string();
    let avatar = parts.get(4).unwrap_or(&"").to_string();
    let rating = parts.get(5).and_then(|s| s.parse().ok());

    Ok(SimMessage::BattlePlayer {
        player,
        username,
        avatar,
        rating,
    })
}

/// Parse |teamsize|PLAYER|NUMBER
pub fn parse_teamsize(parts: &[&str]) -> Result<SimMessage> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()))?;

    let size = parse_number(parts, 3, "team size")?;

    Ok(SimMessage::TeamSize { player, size })
}

/// Parse |gametype|GAMETYPE
pub fn parse_gametype(parts: &[&str]) -> Result<SimMessage> {
    let raw = parts
        .get(2)
        .ok_or_else(|| ParseError::MissingField("game type".to_string()))?;

    let game_type = GameType::parse(raw).ok_or_else(|| ParseError::UnknownValue {
        field: "game type",
        value: raw.to_string(),
    })?;

    Ok(SimMessage::GameType(game_type))
}

/// Parse |gen|GENNUM
pub fn parse_gen(parts: &[&str]) -> Result<SimMessage> {
    let generation = parse_number(parts, 2, "generation")?;
    Ok(SimMessage::Gen(generation))
}

/// Parse |tier|FORMATNAME
pub fn parse_tier(parts: &[&str]) -> Result<SimMessage> {
    let format = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::Tier(format))
}

/// Parse |rated| or |rated|MESSAGE
pub fn parse_rated(parts: &[&str]) -> Result<SimMessage> {
    let message = parts.get(2).map(|s| s.to_string());
    Ok(SimMessage::Rated(message))
}

/// Parse |rule|RULE: DESCRIPTION
pub fn parse_rule(parts: &[&str]) -> Result<SimMessage> {
    let rule = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::Rule(rule))
}

/// Parse |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(parts: &[&str]) -> Result<SimMessage> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()))?;

    let details = parts
        .get(3)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default();

    let has_item = parts.get(4).map(|s| *s == "item").unwrap_or(false);

    Ok(SimMessage::Poke {
        player,
        details,
        has_item,
    })
}

/// Parse |teampreview or |teampreview|NUMBER
pub fn parse_teampreview(parts: &[&str]) -> Result<SimMessage> {
    let count = parts.get(2).and_then(|s| s.parse().ok());
    Ok(SimMessage::TeamPreview(count))
}
