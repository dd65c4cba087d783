//! Packed team text export
//!
//! The simulator's `>player` command accepts teams either as JSON or as the
//! compact packed text format. One set packs to twelve pipe-delimited
//! fields:
//!
//! ```text
//! NICK|SPECIES|ITEM|ABILITY|MOVES|NATURE|EVS|GENDER|IVS|SHINY|LEVEL|MISC
//! ```
//!
//! Default values pack as empty fields (species equal to the nickname,
//! level 100, all-zero EVs, all-31 IVs, happiness 255). The MISC tail is
//! `HAPPINESS,POKEBALL,HPTYPE,GMAX,DMAXLEVEL,TERATYPE` with trailing empty
//! entries trimmed. Sets are joined with `]`.

use crate::set::{PokemonSet, StatsTable};

/// Normalize a display name to the simulator's identifier form:
/// lowercase with everything but letters and digits removed.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn pack_stats(stats: &StatsTable, default: u8) -> String {
    if stats.is_uniform(default) {
        return String::new();
    }

    stats
        .values()
        .iter()
        .map(|&v| {
            if v == default {
                String::new()
            } else {
                v.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn pack_misc(set: &PokemonSet) -> String {
    let mut fields = vec![
        if set.happiness == 255 {
            String::new()
        } else {
            set.happiness.to_string()
        },
        to_id(&set.pokeball),
        set.hp_type.clone(),
        if set.gigantamax {
            "G".to_string()
        } else {
            String::new()
        },
        if set.dynamax_level == 10 {
            String::new()
        } else {
            set.dynamax_level.to_string()
        },
        set.tera_type.clone(),
    ];

    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    fields.join(",")
}

/// Pack a single set into its twelve-field text form.
pub fn pack_set(set: &PokemonSet) -> String {
    let nick = set.display_name();
    let species = if to_id(&set.species) == to_id(nick) {
        String::new()
    } else {
        set.species.clone()
    };

    let moves = set
        .moves
        .iter()
        .map(|m| to_id(m))
        .collect::<Vec<_>>()
        .join(",");

    let fields = [
        nick.to_string(),
        species,
        to_id(&set.item),
        to_id(&set.ability),
        moves,
        set.nature.clone(),
        pack_stats(&set.evs, 0),
        set.gender.clone(),
        pack_stats(&set.ivs, 31),
        if set.shiny { "S".to_string() } else { String::new() },
        if set.level == 100 {
            String::new()
        } else {
            set.level.to_string()
        },
        pack_misc(set),
    ];

    fields.join("|")
}

/// Pack a whole team; sets are joined with `]`.
pub fn pack_team(team: &[PokemonSet]) -> String {
    team.iter().map(pack_set).collect::<Vec<_>>().join("]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("Choice Band"), "choiceband");
        assert_eq!(to_id("Mr. Mime"), "mrmime");
        assert_eq!(to_id("Porygon-Z"), "porygonz");
    }

    #[test]
    fn test_pack_default_set() {
        let mut set = PokemonSet::new("Pikachu");
        set.ability = "Static".to_string();
        set.moves = vec!["Thunderbolt".to_string(), "Surf".to_string()];

        assert_eq!(
            pack_set(&set),
            "Pikachu|||static|thunderbolt,surf|||||||"
        );
    }

    #[test]
    fn test_pack_full_set() {
        let mut set = PokemonSet::new("Garchomp");
        set.name = "Chompy".to_string();
        set.item = "Rocky Helmet".to_string();
        set.ability = "Rough Skin".to_string();
        set.moves = vec!["Earthquake".to_string(), "Outrage".to_string()];
        set.nature = "Jolly".to_string();
        set.gender = "F".to_string();
        set.evs.atk = 252;
        set.evs.spe = 252;
        set.evs.hp = 4;
        set.ivs.spa = 0;
        set.shiny = true;
        set.level = 50;
        set.happiness = 160;
        set.tera_type = "Fire".to_string();

        assert_eq!(
            pack_set(&set),
            "Chompy|Garchomp|rockyhelmet|roughskin|earthquake,outrage|Jolly|4,252,,,,252|F|,,,0,,|S|50|160,,,,,Fire"
        );
    }

    #[test]
    fn test_pack_team_joins_with_bracket() {
        let a = PokemonSet::new("Ditto");
        let b = PokemonSet::new("Porygon");
        let packed = pack_team(&[a, b]);
        assert_eq!(packed.matches(']').count(), 1);
        assert!(packed.starts_with("Ditto|"));
    }

    #[test]
    fn test_misc_tail_trimmed_when_default() {
        let set = PokemonSet::new("Ditto");
        let packed = pack_set(&set);
        assert!(packed.ends_with("||"), "default misc tail should be empty: {packed}");
    }
}
