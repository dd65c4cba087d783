//! Inbound simulator stream parsing.
//!
//! The simulator emits newline-separated messages: a leading keyword line
//! (`update`, `sideupdate`, or `end`) followed by pipe-delimited protocol
//! lines. [`parse_sim_frame`] turns one raw message into a [`SimFrame`];
//! [`parse_sim_message`] turns one protocol line into a [`SimMessage`].

pub mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
pub mod request;
mod tests;

use anyhow::Result;

use battle::{GameType, HpStatus, Player, PokemonDetails, PokemonId, Side, Stat, Status};
pub use battle_progress::ChoiceErrorKind;

/// One parsed protocol line from the simulator.
///
/// Unrecognized commands and recognized commands with too few segments both
/// parse to [`SimMessage::Unknown`]; parsing a line never fails for those
/// reasons. Malformed numeric payloads and unknown closed-vocabulary values
/// on a matched command are fatal parse errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SimMessage {
    // === Battle initialization ===
    BattlePlayer {
        player: Player,
        username: String,
        avatar: String,
        rating: Option<u32>,
    },
    TeamSize {
        player: Player,
        size: u8,
    },
    GameType(GameType),
    Gen(u8),
    Tier(String),
    Rated(Option<String>),
    Rule(String),
    ClearPoke,
    Poke {
        player: Player,
        details: PokemonDetails,
        has_item: bool,
    },
    TeamPreview(Option<u8>),
    BattleStart,

    // === Battle progress ===
    /// Raw JSON payload of a |request| line. See [`request::BattleRequest`]
    /// for the typed view.
    Request(String),
    Inactive(String),
    InactiveOff(String),
    Upkeep,
    Turn(u32),
    Win(String),
    Tie,
    /// |t:| unix timestamp
    Timestamp(i64),
    Debug(String),
    Error {
        kind: ChoiceErrorKind,
        message: String,
    },

    // === Major actions ===
    Move {
        pokemon: PokemonId,
        move_name: String,
        target: Option<PokemonId>,
        miss: bool,
        still: bool,
        anim: Option<String>,
        tags: Vec<String>,
    },
    Switch {
        pokemon: PokemonId,
        details: PokemonDetails,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    Drag {
        pokemon: PokemonId,
        details: PokemonDetails,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    DetailsChange {
        pokemon: PokemonId,
        details: PokemonDetails,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    FormeChange {
        pokemon: PokemonId,
        species: String,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    Replace {
        pokemon: PokemonId,
        details: PokemonDetails,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    Swap {
        pokemon: PokemonId,
        position: u8,
        tags: Vec<String>,
    },
    Cant {
        pokemon: PokemonId,
        reason: String,
        move_name: Option<String>,
        tags: Vec<String>,
    },
    Faint(PokemonId),

    // === Minor actions ===
    Fail {
        pokemon: PokemonId,
        action: Option<String>,
        tags: Vec<String>,
    },
    Block {
        pokemon: PokemonId,
        effect: String,
        move_name: Option<String>,
        attacker: Option<PokemonId>,
        tags: Vec<String>,
    },
    NoTarget(Option<PokemonId>),
    Miss {
        source: PokemonId,
        target: Option<PokemonId>,
    },
    Damage {
        pokemon: PokemonId,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    Heal {
        pokemon: PokemonId,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    SetHp {
        pokemon: PokemonId,
        hp: Option<HpStatus>,
        tags: Vec<String>,
    },
    Status {
        pokemon: PokemonId,
        status: Status,
        tags: Vec<String>,
    },
    CureStatus {
        pokemon: PokemonId,
        status: Status,
        tags: Vec<String>,
    },
    CureTeam {
        pokemon: PokemonId,
        tags: Vec<String>,
    },
    Boost {
        pokemon: PokemonId,
        stat: Stat,
        amount: i8,
        tags: Vec<String>,
    },
    Unboost {
        pokemon: PokemonId,
        stat: Stat,
        amount: i8,
        tags: Vec<String>,
    },
    SetBoost {
        pokemon: PokemonId,
        stat: Stat,
        amount: i8,
        tags: Vec<String>,
    },
    SwapBoost {
        source: PokemonId,
        target: PokemonId,
        stats: Vec<Stat>,
        tags: Vec<String>,
    },
    InvertBoost {
        pokemon: PokemonId,
        tags: Vec<String>,
    },
    ClearBoost {
        pokemon: PokemonId,
        tags: Vec<String>,
    },
    ClearAllBoost,
    ClearPositiveBoost {
        target: PokemonId,
        source: PokemonId,
        effect: String,
        tags: Vec<String>,
    },
    ClearNegativeBoost {
        pokemon: PokemonId,
        tags: Vec<String>,
    },
    CopyBoost {
        source: PokemonId,
        target: PokemonId,
        tags: Vec<String>,
    },
    Weather {
        weather: String,
        upkeep: bool,
        tags: Vec<String>,
    },
    FieldStart {
        condition: String,
        tags: Vec<String>,
    },
    FieldEnd {
        condition: String,
        tags: Vec<String>,
    },
    SideStart {
        side: Side,
        condition: String,
        tags: Vec<String>,
    },
    SideEnd {
        side: Side,
        condition: String,
        tags: Vec<String>,
    },
    SwapSideConditions,
    VolatileStart {
        pokemon: PokemonId,
        effect: String,
        tags: Vec<String>,
    },
    VolatileEnd {
        pokemon: PokemonId,
        effect: String,
        tags: Vec<String>,
    },
    Crit(PokemonId),
    SuperEffective(PokemonId),
    Resisted(PokemonId),
    Immune {
        pokemon: PokemonId,
        tags: Vec<String>,
    },
    Item {
        pokemon: PokemonId,
        item: String,
        tags: Vec<String>,
    },
    EndItem {
        pokemon: PokemonId,
        item: String,
        tags: Vec<String>,
    },
    Ability {
        pokemon: PokemonId,
        ability: String,
        tags: Vec<String>,
    },
    EndAbility {
        pokemon: PokemonId,
        tags: Vec<String>,
    },
    Transform {
        pokemon: PokemonId,
        species: String,
        tags: Vec<String>,
    },
    Mega {
        pokemon: PokemonId,
        megastone: String,
    },
    Primal(PokemonId),
    Burst {
        pokemon: PokemonId,
        species: String,
        item: String,
    },
    ZPower(PokemonId),
    ZBroken(PokemonId),
    Activate {
        pokemon: Option<PokemonId>,
        effect: String,
        tags: Vec<String>,
    },
    Hint(String),
    Center,
    Message(String),
    Combine,
    Waiting {
        source: PokemonId,
        target: PokemonId,
    },
    Prepare {
        attacker: PokemonId,
        move_name: String,
        defender: Option<PokemonId>,
    },
    MustRecharge(PokemonId),
    Nothing,
    HitCount {
        pokemon: PokemonId,
        count: u8,
    },
    SingleMove {
        pokemon: PokemonId,
        move_name: String,
    },
    SingleTurn {
        pokemon: PokemonId,
        move_name: String,
    },

    // === Structural ===
    /// A |split| construct: a privileged and a redacted view of the same event
    Split(SplitMessage),
    /// Empty command segment (block separator)
    Spacer,
    /// Any command we don't recognize, carrying the original trimmed line
    Unknown(String),
}

impl SimMessage {
    /// Whether this message is a "minor action" (the dash-prefixed commands,
    /// rendered in small font by the official client). Classification only;
    /// parsing never branches on it.
    pub fn is_minor_action(&self) -> bool {
        matches!(
            self,
            SimMessage::Fail { .. }
                | SimMessage::Block { .. }
                | SimMessage::NoTarget(_)
                | SimMessage::Miss { .. }
                | SimMessage::Damage { .. }
                | SimMessage::Heal { .. }
                | SimMessage::SetHp { .. }
                | SimMessage::Status { .. }
                | SimMessage::CureStatus { .. }
                | SimMessage::CureTeam { .. }
                | SimMessage::Boost { .. }
                | SimMessage::Unboost { .. }
                | SimMessage::SetBoost { .. }
                | SimMessage::SwapBoost { .. }
                | SimMessage::InvertBoost { .. }
                | SimMessage::ClearBoost { .. }
                | SimMessage::ClearAllBoost
                | SimMessage::ClearPositiveBoost { .. }
                | SimMessage::ClearNegativeBoost { .. }
                | SimMessage::CopyBoost { .. }
                | SimMessage::Weather { .. }
                | SimMessage::FieldStart { .. }
                | SimMessage::FieldEnd { .. }
                | SimMessage::SideStart { .. }
                | SimMessage::SideEnd { .. }
                | SimMessage::SwapSideConditions
                | SimMessage::VolatileStart { .. }
                | SimMessage::VolatileEnd { .. }
                | SimMessage::Crit(_)
                | SimMessage::SuperEffective(_)
                | SimMessage::Resisted(_)
                | SimMessage::Immune { .. }
                | SimMessage::Item { .. }
                | SimMessage::EndItem { .. }
                | SimMessage::Ability { .. }
                | SimMessage::EndAbility { .. }
                | SimMessage::Transform { .. }
                | SimMessage::Mega { .. }
                | SimMessage::Primal(_)
                | SimMessage::Burst { .. }
                | SimMessage::ZPower(_)
                | SimMessage::ZBroken(_)
                | SimMessage::Activate { .. }
                | SimMessage::Hint(_)
                | SimMessage::Center
                | SimMessage::Message(_)
                | SimMessage::Combine
                | SimMessage::Waiting { .. }
                | SimMessage::Prepare { .. }
                | SimMessage::MustRecharge(_)
                | SimMessage::Nothing
                | SimMessage::HitCount { .. }
                | SimMessage::SingleMove { .. }
                | SimMessage::SingleTurn { .. }
                | SimMessage::FormeChange { .. }
        )
    }
}

/// A |split| construct: the same event as seen by the addressed player
/// (`secret`, full information) and by everyone else (`public`, redacted).
/// Both sides always hold the same [`SimMessage`] kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitMessage {
    pub player: Player,
    pub secret: Box<SimMessage>,
    pub public: Box<SimMessage>,
}

/// One complete parsed message from the simulator.
#[derive(Debug, Clone, PartialEq)]
pub enum SimFrame {
    /// Omniscient update, visible to all observers
    Update { messages: Vec<SimMessage> },
    /// Update visible only to one player
    SideUpdate {
        player: Player,
        messages: Vec<SimMessage>,
    },
    /// End of battle; carries the full battle log as an opaque string
    End { log: String },
}

/// Parse a complete raw simulator message into a frame.
///
/// Returns `Ok(None)` for empty input, an unrecognized leading keyword, or a
/// `sideupdate` with an unparseable player token. Errors only propagate from
/// malformed payloads on matched element commands.
pub fn parse_sim_frame(raw: &str) -> Result<Option<SimFrame>> {
    let lines: Vec<&str> = raw.lines().collect();

    let Some(keyword_index) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return Ok(None);
    };

    match lines[keyword_index].trim() {
        "update" => {
            let rest = protocol_lines(&lines[keyword_index + 1..]);
            Ok(Some(SimFrame::Update {
                messages: collect_messages(&rest)?,
            }))
        }
        "sideupdate" => {
            let rest = protocol_lines(&lines[keyword_index + 1..]);
            let Some(token) = rest.first() else {
                return Ok(None);
            };
            let Some(player) = Player::parse(token) else {
                return Ok(None);
            };
            Ok(Some(SimFrame::SideUpdate {
                player,
                messages: collect_messages(&rest[1..])?,
            }))
        }
        "end" => Ok(Some(SimFrame::End {
            log: lines[keyword_index + 1..].join("\n"),
        })),
        _ => Ok(None),
    }
}

/// Trimmed, non-empty lines of an update body
fn protocol_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Walk the element lines of an update, advancing by one line normally and by
/// three across a |split| construct. Order is preserved.
fn collect_messages(lines: &[&str]) -> Result<Vec<SimMessage>> {
    let mut messages = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some(token) = lines[i].strip_prefix("|split|") {
            if let Some(split) = parse_split(token, lines.get(i + 1), lines.get(i + 2)) {
                messages.push(SimMessage::Split(split));
            }
            i += 3;
            continue;
        }

        if let Some(message) = parse_sim_message(lines[i])? {
            messages.push(message);
        }
        i += 1;
    }

    Ok(messages)
}

/// Parse the two lines following a |split| header. A missing line, a failed
/// sub-parse, or a secret/public kind mismatch drops the whole construct;
/// truncated splits commonly occur at stream boundaries and are not errors.
fn parse_split(token: &str, secret: Option<&&str>, public: Option<&&str>) -> Option<SplitMessage> {
    let player = Player::parse(token.split('|').next().unwrap_or(token))?;

    let secret = match parse_sim_message(secret?) {
        Ok(Some(message)) => message,
        _ => return None,
    };
    let public = match parse_sim_message(public?) {
        Ok(Some(message)) => message,
        _ => return None,
    };

    if std::mem::discriminant(&secret) != std::mem::discriminant(&public) {
        return None;
    }

    Some(SplitMessage {
        player,
        secret: Box::new(secret),
        public: Box::new(public),
    })
}

/// Parse a single protocol line into a message.
///
/// Lines that do not start with `|` are not protocol lines and yield
/// `Ok(None)`. A |split| header is only meaningful with its two trailing
/// lines and is handled by [`parse_sim_frame`]; in isolation it parses as
/// [`SimMessage::Unknown`].
pub fn parse_sim_message(line: &str) -> Result<Option<SimMessage>> {
    let line = line.trim();

    if !line.starts_with('|') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split('|').collect();
    let command = parts[1];

    // Minor actions carry a leading dash; dispatch on the bare keyword so
    // both |-damage| and |damage| hit the same entry. Commands that exist in
    // both spellings (start) are disambiguated by segment count.
    let key = command.strip_prefix('-').unwrap_or(command);
    let len = parts.len();

    let message = match key {
        "" => SimMessage::Spacer,

        // Battle initialization
        "player" if len >= 3 => battle_init::parse_player(&parts)?,
        "teamsize" if len >= 4 => battle_init::parse_teamsize(&parts)?,
        "gametype" if len >= 3 => battle_init::parse_gametype(&parts)?,
        "gen" if len >= 3 => battle_init::parse_gen(&parts)?,
        "tier" if len >= 3 => battle_init::parse_tier(&parts)?,
        "rated" => battle_init::parse_rated(&parts)?,
        "clearpoke" => SimMessage::ClearPoke,
        "rule" if len >= 3 => battle_init::parse_rule(&parts)?,
        "poke" if len >= 4 => battle_init::parse_poke(&parts)?,
        "teampreview" => battle_init::parse_teampreview(&parts)?,
        "start" if len >= 4 => battle_minor::parse_volatile_start(&parts)?,
        "start" => SimMessage::BattleStart,

        // Battle progress
        "request" if len >= 3 => battle_progress::parse_request(&parts)?,
        "inactive" => battle_progress::parse_inactive(&parts)?,
        "inactiveoff" => battle_progress::parse_inactiveoff(&parts)?,
        "upkeep" => SimMessage::Upkeep,
        "turn" if len >= 3 => battle_progress::parse_turn(&parts)?,
        "win" if len >= 3 => battle_progress::parse_win(&parts)?,
        "tie" => SimMessage::Tie,
        "t:" if len >= 3 => battle_progress::parse_timestamp(&parts)?,
        "debug" if len >= 3 => battle_progress::parse_debug(&parts)?,
        "error" if len >= 3 => battle_progress::parse_error(&parts)?,

        // Major actions
        "move" if len >= 4 => battle_major::parse_move(&parts)?,
        "switch" if len >= 4 => battle_major::parse_switch(&parts)?,
        "drag" if len >= 4 => battle_major::parse_drag(&parts)?,
        "detailschange" if len >= 4 => battle_major::parse_detailschange(&parts)?,
        "formechange" if len >= 4 => battle_major::parse_formechange(&parts)?,
        "replace" if len >= 4 => battle_major::parse_replace(&parts)?,
        "swap" if len >= 4 => battle_major::parse_swap(&parts)?,
        "cant" if len >= 4 => battle_major::parse_cant(&parts)?,
        "faint" if len >= 3 => battle_major::parse_faint(&parts)?,

        // Minor actions
        "fail" if len >= 3 => battle_minor::parse_fail(&parts)?,
        "block" if len >= 4 => battle_minor::parse_block(&parts)?,
        "notarget" => battle_minor::parse_notarget(&parts)?,
        "miss" if len >= 3 => battle_minor::parse_miss(&parts)?,
        "damage" if len >= 3 => battle_minor::parse_damage(&parts)?,
        "heal" if len >= 3 => battle_minor::parse_heal(&parts)?,
        "sethp" if len >= 3 => battle_minor::parse_sethp(&parts)?,
        "status" if len >= 4 => battle_minor::parse_status(&parts)?,
        "curestatus" if len >= 4 => battle_minor::parse_curestatus(&parts)?,
        "cureteam" if len >= 3 => battle_minor::parse_cureteam(&parts)?,
        "boost" if len >= 5 => battle_minor::parse_boost(&parts)?,
        "unboost" if len >= 5 => battle_minor::parse_unboost(&parts)?,
        "setboost" if len >= 5 => battle_minor::parse_setboost(&parts)?,
        "swapboost" if len >= 4 => battle_minor::parse_swapboost(&parts)?,
        "invertboost" if len >= 3 => battle_minor::parse_invertboost(&parts)?,
        "clearboost" if len >= 3 => battle_minor::parse_clearboost(&parts)?,
        "clearallboost" => SimMessage::ClearAllBoost,
        "clearpositiveboost" if len >= 5 => battle_minor::parse_clearpositiveboost(&parts)?,
        "clearnegativeboost" if len >= 3 => battle_minor::parse_clearnegativeboost(&parts)?,
        "copyboost" if len >= 4 => battle_minor::parse_copyboost(&parts)?,
        "weather" if len >= 3 => battle_minor::parse_weather(&parts)?,
        "fieldstart" if len >= 3 => battle_minor::parse_fieldstart(&parts)?,
        "fieldend" if len >= 3 => battle_minor::parse_fieldend(&parts)?,
        "sidestart" if len >= 4 => battle_minor::parse_sidestart(&parts)?,
        "sideend" if len >= 4 => battle_minor::parse_sideend(&parts)?,
        "swapsideconditions" => SimMessage::SwapSideConditions,
        "end" if len >= 4 => battle_minor::parse_volatile_end(&parts)?,
        "crit" if len >= 3 => battle_minor::parse_crit(&parts)?,
        "supereffective" if len >= 3 => battle_minor::parse_supereffective(&parts)?,
        "resisted" if len >= 3 => battle_minor::parse_resisted(&parts)?,
        "immune" if len >= 3 => battle_minor::parse_immune(&parts)?,
        "item" if len >= 4 => battle_minor::parse_item(&parts)?,
        "enditem" if len >= 4 => battle_minor::parse_enditem(&parts)?,
        "ability" if len >= 4 => battle_minor::parse_ability(&parts)?,
        "endability" if len >= 3 => battle_minor::parse_endability(&parts)?,
        "transform" if len >= 4 => battle_minor::parse_transform(&parts)?,
        "mega" if len >= 4 => battle_minor::parse_mega(&parts)?,
        "primal" if len >= 3 => battle_minor::parse_primal(&parts)?,
        "burst" if len >= 4 => battle_minor::parse_burst(&parts)?,
        "zpower" if len >= 3 => battle_minor::parse_zpower(&parts)?,
        "zbroken" if len >= 3 => battle_minor::parse_zbroken(&parts)?,
        "activate" if len >= 3 => battle_minor::parse_activate(&parts)?,
        "hint" if len >= 3 => battle_minor::parse_hint(&parts)?,
        "center" => SimMessage::Center,
        "message" if len >= 3 => battle_minor::parse_message(&parts)?,
        "combine" => SimMessage::Combine,
        "waiting" if len >= 4 => battle_minor::parse_waiting(&parts)?,
        "prepare" if len >= 4 => battle_minor::parse_prepare(&parts)?,
        "mustrecharge" if len >= 3 => battle_minor::parse_mustrecharge(&parts)?,
        "nothing" => SimMessage::Nothing,
        "hitcount" if len >= 4 => battle_minor::parse_hitcount(&parts)?,
        "singlemove" if len >= 4 => battle_minor::parse_singlemove(&parts)?,
        "singleturn" if len >= 4 => battle_minor::parse_singleturn(&parts)?,

        _ => SimMessage::Unknown(line.to_string()),
    };

    Ok(Some(message))
}
