//! Major battle action message parsers
//!
//! These are the primary actions in battle: moves, switches, faints, etc.

use super::SimMessage;
use super::battle::{
    PokemonId, collect_tags, parse_details, parse_hp_status, parse_number, parse_pokemon,
};
use anyhow::Result;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
///
/// [miss], [still] and [anim] are interpreted into dedicated fields; any
/// other trailing segments are kept as raw tags.
pub fn parse_move(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = parts.get(3).unwrap_or(&"").to_string();
    let target = parts.get(4).and_then(|s| PokemonId::parse(s));

    let mut miss = false;
    let mut still = false;
    let mut anim = None;
    let mut tags = Vec::new();

    for part in parts.iter().skip(5) {
        if *part == "[miss]" {
            miss = true;
        } else if *part == "[still]" {
            still = true;
        } else if let Some(anim_move) = part.strip_prefix("[anim] ") {
            anim = Some(anim_move.to_string());
        } else {
            tags.push(part.to_string());
        }
    }

    Ok(SimMessage::Move {
        pokemon,
        move_name,
        target,
        miss,
        still,
        anim,
        tags,
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp = parse_hp_status(parts, 4)?;

    Ok(SimMessage::Switch {
        pokemon,
        details,
        hp,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp = parse_hp_status(parts, 4)?;

    Ok(SimMessage::Drag {
        pokemon,
        details,
        hp,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |detailschange|POKEMON|DETAILS|HP STATUS
pub fn parse_detailschange(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp = parse_hp_status(parts, 4)?;

    Ok(SimMessage::DetailsChange {
        pokemon,
        details,
        hp,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |-formechange|POKEMON|SPECIES|HP STATUS
pub fn parse_formechange(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let species = parts.get(3).unwrap_or(&"").to_string();
    let hp = parse_hp_status(parts, 4)?;

    Ok(SimMessage::FormeChange {
        pokemon,
        species,
        hp,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |replace|POKEMON|DETAILS|HP STATUS
pub fn parse_replace(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp = parse_hp_status(parts, 4)?;

    Ok(SimMessage::Replace {
        pokemon,
        details,
        hp,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |swap|POKEMON|POSITION
pub fn parse_swap(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let position = parse_number(parts, 3, "swap position")?;

    Ok(SimMessage::Swap {
        pokemon,
        position,
        tags: collect_tags(parts, 4),
    })
}

/// Parse |cant|POKEMON|REASON or |cant|POKEMON|REASON|MOVE
pub fn parse_cant(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let reason = parts.get(3).unwrap_or(&"").to_string();
    let move_name = parts.get(4).map(|s| s.to_string());

    Ok(SimMessage::Cant {
        pokemon,
        reason,
        move_name,
        tags: collect_tags(parts, 5),
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<SimMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(SimMessage::Faint(pokemon))
}
