//! Async driver for a battle simulator speaking the stream protocol.
//!
//! The simulator itself is an external collaborator; this crate only knows
//! it as a [`SimulatorLink`]: a duplex text channel with a write for
//! outbound command lines and an async pull of raw inbound messages. A
//! [`BattleSession`] layers the codec from `porygon-protocol` on top of a
//! link: commands go out encoded, messages come back parsed into frames.
//!
//! Process management, sandboxing, and restart policy for the simulator all
//! belong to whoever constructs the link.
//!
//! # Example
//!
//! ```ignore
//! use porygon_driver::{BattleSession, ChannelLink};
//! use porygon_protocol::Player;
//!
//! let (host, sim) = ChannelLink::pair(64);
//! let mut session = BattleSession::new(host);
//!
//! session.start("gen7randombattle").await?;
//! session.set_player(Player::P1, "Alice", None).await?;
//!
//! while let Some(frame) = session.next_frame().await? {
//!     // react to the frame, submit choices with session.choose(...)
//! }
//! ```

mod link;
mod session;

pub use link::{ChannelLink, SimulatorLink};
pub use session::BattleSession;

pub use porygon_protocol::{SimFrame, SimMessage};
