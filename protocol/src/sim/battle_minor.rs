//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.
//! In the official client, they're usually displayed in smaller font.
//!
//! Trailing bracketed annotations ([from] EFFECT, [of] SOURCE, [silent], ...)
//! are attached verbatim as tags; only |move| interprets its tags.

use super::SimMessage;
use super::battle::{
    PokemonId, Side, Stat, Status, collect_tags, parse_hp_status, parse_number, parse_pokemon,
    parse_stat,
};
use crate::ParseError;
use anyhow::Result;

/// Parse |-fail|POKEMON|ACTION
pub fn parse_fail(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let action = parts.get(3).map(|s| s.to_string());

    Ok(SimMessage::Fail {
        pokemon,
        action,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-block|POKEMON|EFFECT|MOVE|ATTACKER
pub fn parse_block(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let effect = parts.get(3).unwrap_or(&"").to_string();
    let move_name = parts.get(4).map(|s| s.to_string());
    let attacker = parts.get(5).and_then(|s| PokemonId::parse(s));

    Ok(SimMessage::Block {
        pokemon,
        effect,
        move_name,
        attacker,
        tags: collect_tags(parts, 6),
    })
}

/// Parse |-notarget|POKEMON
pub fn parse_notarget(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parts.get(2).and_then(|s| PokemonId::parse(s));
    Ok(SimMessage::NoTarget(pokemon))
}

/// Parse |-miss|SOURCE|TARGET
pub fn parse_miss(parts: &[&str]) -> Result<SimMessage> {
    let source = parse_pokemon(parts, 2)?;
    let target = parts.get(3).and_then(|s| PokemonId::parse(s));

    Ok(SimMessage::Miss { source, target })
}

/// Parse |-damage|POKEMON|HP STATUS
pub fn parse_damage(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp = parse_hp_status(parts, 3)?;

    Ok(SimMessage::Damage {
        pokemon,
        hp,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-heal|POKEMON|HP STATUS
pub fn parse_heal(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp = parse_hp_status(parts, 3)?;

    Ok(SimMessage::Heal {
        pokemon,
        hp,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-sethp|POKEMON|HP
pub fn parse_sethp(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp = parse_hp_status(parts, 3)?;

    Ok(SimMessage::SetHp {
        pokemon,
        hp,
        tags: collect_tags(parts, 4),
    })
}

fn parse_status_token(parts: &[&str], index: usize) -> Result<Status> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField("status".to_string()))?;

    Status::parse(raw)
        .ok_or_else(|| {
            ParseError::UnknownValue {
                field: "status",
                value: raw.to_string(),
            }
        })
        .map_err(Into::into)
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = parse_status_token(parts, 3)?;

    Ok(SimMessage::Status {
        pokemon,
        status,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = parse_status_token(parts, 3)?;

    Ok(SimMessage::CureStatus {
        pokemon,
        status,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-cureteam|POKEMON
pub fn parse_cureteam(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(SimMessage::CureTeam {
        pokemon,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = parse_stat(parts, 3)?;
    let amount = parse_number(parts, 4, "boost amount")?;

    Ok(SimMessage::Boost {
        pokemon,
        stat,
        amount,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = parse_stat(parts, 3)?;
    let amount = parse_number(parts, 4, "boost amount")?;

    Ok(SimMessage::Unboost {
        pokemon,
        stat,
        amount,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |-setboost|POKEMON|STAT|AMOUNT
pub fn parse_setboost(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = parse_stat(parts, 3)?;
    let amount = parse_number(parts, 4, "boost amount")?;

    Ok(SimMessage::SetBoost {
        pokemon,
        stat,
        amount,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |-swapboost|SOURCE|TARGET|STATS
pub fn parse_swapboost(parts: &[&str]) -> Result<SimMessage> {
    let source = parse_pokemon(parts, 2)?;
    let target = parse_pokemon(parts, 3)?;

    let stats = match parts.get(4) {
        Some(list) if !list.is_empty() => list
            .split(',')
            .map(|s| {
                let s = s.trim();
                Stat::parse(s).ok_or_else(|| {
                    anyhow::Error::from(ParseError::UnknownValue {
                        field: "stat",
                        value: s.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?,
        _ => Vec::new(),
    };

    Ok(SimMessage::SwapBoost {
        source,
        target,
        stats,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |-invertboost|POKEMON
pub fn parse_invertboost(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(SimMessage::InvertBoost {
        pokemon,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-clearboost|POKEMON
pub fn parse_clearboost(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(SimMessage::ClearBoost {
        pokemon,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-clearpositiveboost|TARGET|POKEMON|EFFECT
pub fn parse_clearpositiveboost(parts: &[&str]) -> Result<SimMessage> {
    let target = parse_pokemon(parts, 2)?;
    let source = parse_pokemon(parts, 3)?;
    let effect = parts.get(4).unwrap_or(&"").to_string();

    Ok(SimMessage::ClearPositiveBoost {
        target,
        source,
        effect,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |-clearnegativeboost|POKEMON
pub fn parse_clearnegativeboost(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(SimMessage::ClearNegativeBoost {
        pokemon,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-copyboost|SOURCE|TARGET
pub fn parse_copyboost(parts: &[&str]) -> Result<SimMessage> {
    let source = parse_pokemon(parts, 2)?;
    let target = parse_pokemon(parts, 3)?;

    Ok(SimMessage::CopyBoost {
        source,
        target,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-weather|WEATHER with optional [upkeep]
pub fn parse_weather(parts: &[&str]) -> Result<SimMessage> {
    let weather = parts.get(2).unwrap_or(&"none").to_string();

    let mut upkeep = false;
    let mut tags = Vec::new();
    for part in parts.iter().skip(3) {
        if *part == "[upkeep]" {
            upkeep = true;
        } else {
            tags.push(part.to_string());
        }
    }

    Ok(SimMessage::Weather {
        weather,
        upkeep,
        tags,
    })
}

/// Parse |-fieldstart|CONDITION
pub fn parse_fieldstart(parts: &[&str]) -> Result<SimMessage> {
    let condition = parts.get(2).unwrap_or(&"").to_string();

    Ok(SimMessage::FieldStart {
        condition,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-fieldend|CONDITION
pub fn parse_fieldend(parts: &[&str]) -> Result<SimMessage> {
    let condition = parts.get(2).unwrap_or(&"").to_string();

    Ok(SimMessage::FieldEnd {
        condition,
        tags: collect_tags(parts, 3),
    })
}

fn parse_side(parts: &[&str], index: usize) -> Result<Side> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField("side".to_string()))?;

    Side::parse(raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("invalid side: {}", raw)))
        .map_err(Into::into)
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(parts: &[&str]) -> Result<SimMessage> {
    let side = parse_side(parts, 2)?;
    let condition = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::SideStart {
        side,
        condition,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(parts: &[&str]) -> Result<SimMessage> {
    let side = parse_side(parts, 2)?;
    let condition = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::SideEnd {
        side,
        condition,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-start|POKEMON|EFFECT (volatile condition start)
pub fn parse_volatile_start(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let effect = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::VolatileStart {
        pokemon,
        effect,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-end|POKEMON|EFFECT (volatile condition end)
pub fn parse_volatile_end(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let effect = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::VolatileEnd {
        pokemon,
        effect,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-crit|POKEMON
pub fn parse_crit(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::Crit(pokemon))
}

/// Parse |-supereffective|POKEMON
pub fn parse_supereffective(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::SuperEffective(pokemon))
}

/// Parse |-resisted|POKEMON
pub fn parse_resisted(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::Resisted(pokemon))
}

/// Parse |-immune|POKEMON
pub fn parse_immune(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(SimMessage::Immune {
        pokemon,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-item|POKEMON|ITEM
pub fn parse_item(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let item = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::Item {
        pokemon,
        item,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-enditem|POKEMON|ITEM
pub fn parse_enditem(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let item = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::EndItem {
        pokemon,
        item,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let ability = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::Ability {
        pokemon,
        ability,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-endability|POKEMON
pub fn parse_endability(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(SimMessage::EndAbility {
        pokemon,
        tags: collect_tags(parts, 3),
    })
}

/// Parse |-transform|POKEMON|SPECIES
pub fn parse_transform(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let species = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::Transform {
        pokemon,
        species,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |-mega|POKEMON|MEGASTONE
pub fn parse_mega(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let megastone = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::Mega { pokemon, megastone })
}

/// Parse |-primal|POKEMON
pub fn parse_primal(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::Primal(pokemon))
}

/// Parse |-burst|POKEMON|SPECIES|ITEM
pub fn parse_burst(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let species = parts.get(3).unwrap_or(&"").to_string();
    let item = parts.get(4).unwrap_or(&"").to_string();

    Ok(SimMessage::Burst {
        pokemon,
        species,
        item,
    })
}

/// Parse |-zpower|POKEMON
pub fn parse_zpower(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::ZPower(pokemon))
}

/// Parse |-zbroken|POKEMON
pub fn parse_zbroken(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::ZBroken(pokemon))
}

/// Parse |-activate|EFFECT (with optional leading Pokemon)
pub fn parse_activate(parts: &[&str]) -> Result<SimMessage> {
    // First segment might be a Pokemon ident or the effect itself
    let pokemon = parts.get(2).and_then(|s| PokemonId::parse(s));
    let (effect, tag_start) = if pokemon.is_some() {
        (parts.get(3).unwrap_or(&"").to_string(), 4)
    } else {
        (parts.get(2).unwrap_or(&"").to_string(), 3)
    };

    Ok(SimMessage::Activate {
        pokemon,
        effect,
        tags: collect_tags(parts, tag_start),
    })
}

/// Parse |-hint|MESSAGE
pub fn parse_hint(parts: &[&str]) -> Result<SimMessage> {
    let message = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::Hint(message))
}

/// Parse |-message|MESSAGE
pub fn parse_message(parts: &[&str]) -> Result<SimMessage> {
    let message = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::Message(message))
}

/// Parse |-waiting|SOURCE|TARGET
pub fn parse_waiting(parts: &[&str]) -> Result<SimMessage> {
    let source = parse_pokemon(parts, 2)?;
    let target = parse_pokemon(parts, 3)?;

    Ok(SimMessage::Waiting { source, target })
}

/// Parse |-prepare|ATTACKER|MOVE or |-prepare|ATTACKER|MOVE|DEFENDER
pub fn parse_prepare(parts: &[&str]) -> Result<SimMessage> {
    let attacker = parse_pokemon(parts, 2)?;
    let move_name = parts.get(3).unwrap_or(&"").to_string();
    let defender = parts.get(4).and_then(|s| PokemonId::parse(s));

    Ok(SimMessage::Prepare {
        attacker,
        move_name,
        defender,
    })
}

/// Parse |-mustrecharge|POKEMON
pub fn parse_mustrecharge(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::MustRecharge(pokemon))
}

/// Parse |-hitcount|POKEMON|NUM
pub fn parse_hitcount(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let count = parse_number(parts, 3, "hit count")?;

    Ok(SimMessage::HitCount { pokemon, count })
}

/// Parse |-singlemove|POKEMON|MOVE
pub fn parse_singlemove(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::SingleMove { pokemon, move_name })
}

/// Parse |-singleturn|POKEMON|MOVE
pub fn parse_singleturn(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = parts.get(3).unwrap_or(&"").to_string();

    Ok(SimMessage::SingleTurn { pokemon, move_name })
}
