use anyhow::Result;
use tracing::debug;

use crate::link::SimulatorLink;
use porygon_protocol::command::{TeamSpec, encode_player_choice, encode_set_player, encode_start};
use porygon_protocol::{Player, SimFrame, parse_sim_frame};

/// One battle conversation with the simulator.
///
/// Encodes outbound commands and decodes inbound messages over a
/// [`SimulatorLink`]. The session is a thin, stateless pipe: it tracks no
/// battle state and performs no retries. Messages are pulled and parsed one
/// at a time; each is a complete, self-contained unit.
pub struct BattleSession<L> {
    link: L,
}

impl<L: SimulatorLink> BattleSession<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    /// Start a battle in the given format
    pub async fn start(&mut self, format_id: &str) -> Result<()> {
        self.send_command(encode_start(format_id)).await
    }

    /// Register a player, optionally with a team
    pub async fn set_player(
        &mut self,
        player: Player,
        name: &str,
        team: Option<&TeamSpec>,
    ) -> Result<()> {
        let line = encode_set_player(player, name, team)?;
        self.send_command(line).await
    }

    /// Submit a player's choice for the current decision
    pub async fn choose<S: AsRef<str>>(&mut self, player: Player, tokens: &[S]) -> Result<()> {
        let line = encode_player_choice(player, tokens)?;
        self.send_command(line).await
    }

    async fn send_command(&mut self, line: String) -> Result<()> {
        debug!(command = line.as_str(), "sending simulator command");
        self.link.send(&line).await
    }

    /// Pull the next parseable frame from the simulator.
    ///
    /// Messages with an unrecognized leading keyword are skipped with a log
    /// line; `Ok(None)` means the stream ended. Parse errors propagate.
    pub async fn next_frame(&mut self) -> Result<Option<SimFrame>> {
        while let Some(raw) = self.link.recv().await {
            match parse_sim_frame(&raw)? {
                Some(frame) => return Ok(Some(frame)),
                None => debug!(message = raw.as_str(), "skipping unrecognized simulator message"),
            }
        }

        Ok(None)
    }

    /// Give the underlying link back to the caller
    pub fn into_link(self) -> L {
        self.link
    }
}
