//! Shared field types for simulator battle messages

use crate::ParseError;

/// Player slot in a battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            "p3" => Some(Player::P3),
            "p4" => Some(Player::P4),
            _ => None,
        }
    }

    /// Construct from a 1-based index (used by outbound `>player pN` commands)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Player::P1),
            2 => Some(Player::P2),
            3 => Some(Player::P3),
            4 => Some(Player::P4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
            Player::P3 => "p3",
            Player::P4 => "p4",
        }
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonId {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a, b, c for active slots, or None if inactive)
    pub position: Option<char>,
    /// Pokemon's name/nickname
    pub name: String,
}

impl PokemonId {
    /// Parse an ident string like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;

        let player = Player::parse(pos_part.get(..2)?)?;
        let position = pos_part.chars().nth(2);

        Some(PokemonId {
            player,
            position,
            name: name.to_string(),
        })
    }
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
    pub tera_type: Option<String>,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny" or "Arceus-*"
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let parts: Vec<&str> = s.split(", ").collect();

        if let Some(species) = parts.first() {
            details.species = species.to_string();
        }

        for part in parts.iter().skip(1) {
            if let Some(level_str) = part.strip_prefix('L') {
                details.level = level_str.parse().ok();
            } else if *part == "M" {
                details.gender = Some('M');
            } else if *part == "F" {
                details.gender = Some('F');
            } else if *part == "shiny" {
                details.shiny = true;
            } else if let Some(tera) = part.strip_prefix("tera:") {
                details.tera_type = Some(tera.to_string());
            }
        }

        details
    }
}

/// Non-volatile status condition identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Burn,
    Paralysis,
    Sleep,
    Freeze,
    Poison,
    Toxic,
    Faint,
}

impl Status {
    /// Parse a status token (case-insensitive). Unknown tokens are a protocol
    /// violation, so callers turn `None` into a fatal error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "brn" => Some(Status::Burn),
            "par" => Some(Status::Paralysis),
            "slp" => Some(Status::Sleep),
            "frz" => Some(Status::Freeze),
            "psn" => Some(Status::Poison),
            "tox" => Some(Status::Toxic),
            "fnt" => Some(Status::Faint),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Burn => "brn",
            Status::Paralysis => "par",
            Status::Sleep => "slp",
            Status::Freeze => "frz",
            Status::Poison => "psn",
            Status::Toxic => "tox",
            Status::Faint => "fnt",
        }
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq)]
pub struct HpStatus {
    /// Current HP (as raw value or percentage depending on context)
    pub current: u32,
    /// Max HP (if known)
    pub max: Option<u32>,
    /// Status condition
    pub status: Option<Status>,
}

impl HpStatus {
    /// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt".
    ///
    /// Malformed HP numbers and unknown status tokens are fatal: the
    /// simulator never emits them, so they signal a protocol mismatch.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let mut parts = s.split_whitespace();
        let hp_part = parts.next().ok_or_else(|| {
            ParseError::InvalidFormat(format!("empty hp status: {:?}", s))
        })?;

        let status = match parts.next() {
            Some(token) => Some(Status::parse(token).ok_or(ParseError::UnknownValue {
                field: "status",
                value: token.to_string(),
            })?),
            None => None,
        };

        let parse_hp = |v: &str| {
            v.parse::<u32>().map_err(|_| ParseError::MalformedNumber {
                field: "hp",
                value: v.to_string(),
            })
        };

        if let Some((current, max)) = hp_part.split_once('/') {
            Ok(HpStatus {
                current: parse_hp(current)?,
                max: Some(parse_hp(max)?),
                status,
            })
        } else {
            Ok(HpStatus {
                current: parse_hp(hp_part)?,
                max: None,
                status,
            })
        }
    }
}

/// Game type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
    Multi,
    FreeForAll,
}

impl GameType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "singles" => Some(GameType::Singles),
            "doubles" => Some(GameType::Doubles),
            "triples" => Some(GameType::Triples),
            "multi" => Some(GameType::Multi),
            "freeforall" => Some(GameType::FreeForAll),
            _ => None,
        }
    }
}

/// Stat abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }
}

/// Side of the field (for side conditions)
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub player: Player,
    pub raw: String,
}

impl Side {
    pub fn parse(s: &str) -> Option<Self> {
        let player = Player::parse(s.get(..2)?)?;

        Some(Side {
            player,
            raw: s.to_string(),
        })
    }
}

/// Helper to parse a PokemonId from message segments
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<PokemonId, anyhow::Error> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()))?;

    PokemonId::parse(raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("invalid pokemon ident: {}", raw)).into())
}

/// Helper to parse PokemonDetails from message segments
pub fn parse_details(parts: &[&str], index: usize) -> PokemonDetails {
    parts
        .get(index)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default()
}

/// Helper to parse an optional HpStatus from message segments.
///
/// A missing segment is `None`; a present-but-malformed segment is fatal.
pub fn parse_hp_status(parts: &[&str], index: usize) -> Result<Option<HpStatus>, anyhow::Error> {
    match parts.get(index) {
        Some(s) if !s.is_empty() => Ok(Some(HpStatus::parse(s)?)),
        _ => Ok(None),
    }
}

/// Helper to parse a Stat from message segments (unknown values are fatal)
pub fn parse_stat(parts: &[&str], index: usize) -> Result<Stat, anyhow::Error> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField("stat".to_string()))?;

    Stat::parse(raw)
        .ok_or_else(|| {
            ParseError::UnknownValue {
                field: "stat",
                value: raw.to_string(),
            }
        })
        .map_err(Into::into)
}

/// Helper to parse a required integer from message segments (malformed is fatal)
pub fn parse_number<T: std::str::FromStr>(
    parts: &[&str],
    index: usize,
    field: &'static str,
) -> Result<T, anyhow::Error> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField(field.to_string()))?;

    raw.parse().map_err(|_| {
        ParseError::MalformedNumber {
            field,
            value: raw.to_string(),
        }
        .into()
    })
}

/// Collect unconsumed trailing segments as raw annotation tags
pub fn collect_tags(parts: &[&str], from: usize) -> Vec<String> {
    if parts.len() <= from {
        return Vec::new();
    }
    parts[from..].iter().map(|s| s.to_string()).collect()
}
