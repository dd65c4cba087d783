use thiserror::Error;

pub mod command;
pub mod sim;

pub use command::{
    EncodeError, SimCommand, TeamSpec, encode_player_choice, encode_set_player, encode_start,
};
pub use sim::battle::{GameType, HpStatus, Player, PokemonDetails, PokemonId, Side, Stat, Status};
pub use sim::request::BattleRequest;
pub use sim::{
    ChoiceErrorKind, SimFrame, SimMessage, SplitMessage, parse_sim_frame, parse_sim_message,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Malformed number in {field}: {value}")]
    MalformedNumber { field: &'static str, value: String },

    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}
