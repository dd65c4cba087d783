//! Battle progress message parsers
//!
//! These messages track the flow and state of a battle, plus the simulator's
//! debug/error feedback on submitted choices.

use super::SimMessage;
use super::battle::parse_number;
use anyhow::Result;

/// Sub-classification of |error| payloads by their bracketed prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceErrorKind {
    /// [Invalid choice]: the submitted choice was syntactically wrong
    InvalidChoice,
    /// [Unavailable choice]: the choice was valid but cannot be taken now
    UnavailableChoice,
    /// Anything else; the full message is retained
    Other,
}

/// Parse |request|REQUEST (JSON)
///
/// The payload is kept as a raw string; JSON strings may themselves contain
/// pipe characters, so everything after the command is rejoined.
pub fn parse_request(parts: &[&str]) -> Result<SimMessage> {
    Ok(SimMessage::Request(parts[2..].join("|")))
}

/// Parse |inactive|MESSAGE
pub fn parse_inactive(parts: &[&str]) -> Result<SimMessage> {
    let message = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::Inactive(message))
}

/// Parse |inactiveoff|MESSAGE
pub fn parse_inactiveoff(parts: &[&str]) -> Result<SimMessage> {
    let message = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::InactiveOff(message))
}

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<SimMessage> {
    let turn = parse_number(parts, 2, "turn number")?;
    Ok(SimMessage::Turn(turn))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<SimMessage> {
    let user = parts.get(2).unwrap_or(&"").to_string();
    Ok(SimMessage::Win(user))
}

/// Parse |t:|TIMESTAMP
pub fn parse_timestamp(parts: &[&str]) -> Result<SimMessage> {
    let timestamp = parse_number(parts, 2, "timestamp")?;
    Ok(SimMessage::Timestamp(timestamp))
}

/// Parse |debug|MESSAGE
pub fn parse_debug(parts: &[&str]) -> Result<SimMessage> {
    Ok(SimMessage::Debug(parts[2..].join("|")))
}

/// Parse |error|MESSAGE
pub fn parse_error(parts: &[&str]) -> Result<SimMessage> {
    let message = parts[2..].join("|");

    let kind = if message.starts_with("[Invalid choice]") {
        ChoiceErrorKind::InvalidChoice
    } else if message.starts_with("[Unavailable choice]") {
        ChoiceErrorKind::UnavailableChoice
    } else {
        ChoiceErrorKind::Other
    };

    Ok(SimMessage::Error { kind, message })
}
