use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A duplex text channel to the simulator.
///
/// Implementations wrap whatever actually hosts the simulator (a child
/// process, an embedded script engine, an in-process task). The link never
/// owns the simulator's lifecycle: `recv` returning `None` means the other
/// side is gone, and that's all the driver learns about it.
#[async_trait]
pub trait SimulatorLink: Send {
    /// Write one outbound command line
    async fn send(&mut self, line: &str) -> Result<()>;

    /// Pull the next raw inbound message; `None` signals end of stream
    async fn recv(&mut self) -> Option<String>;
}

/// In-process [`SimulatorLink`] over a pair of tokio mpsc channels.
pub struct ChannelLink {
    outgoing: mpsc::Sender<String>,
    incoming: mpsc::Receiver<String>,
}

impl ChannelLink {
    pub fn new(outgoing: mpsc::Sender<String>, incoming: mpsc::Receiver<String>) -> Self {
        Self { outgoing, incoming }
    }

    /// Create two cross-wired links: what one sends, the other receives.
    /// One end plays the host, the other stands in for the simulator.
    pub fn pair(buffer: usize) -> (ChannelLink, ChannelLink) {
        let (a_tx, a_rx) = mpsc::channel(buffer);
        let (b_tx, b_rx) = mpsc::channel(buffer);

        (ChannelLink::new(a_tx, b_rx), ChannelLink::new(b_tx, a_rx))
    }
}

#[async_trait]
impl SimulatorLink for ChannelLink {
    async fn send(&mut self, line: &str) -> Result<()> {
        self.outgoing
            .send(line.to_string())
            .await
            .map_err(|_| anyhow::anyhow!("simulator link closed"))
    }

    async fn recv(&mut self) -> Option<String> {
        self.incoming.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pair_is_cross_wired() {
        let (mut host, mut sim) = ChannelLink::pair(8);

        host.send(">start {}").await.unwrap();
        assert_eq!(sim.recv().await.as_deref(), Some(">start {}"));

        sim.send("update\n|turn|1").await.unwrap();
        assert_eq!(host.recv().await.as_deref(), Some("update\n|turn|1"));
    }

    #[tokio::test]
    async fn test_recv_after_peer_drop_is_end_of_stream() {
        let (mut host, sim) = ChannelLink::pair(8);
        drop(sim);
        assert!(host.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_send_after_peer_drop_fails() {
        let (mut host, sim) = ChannelLink::pair(8);
        drop(sim);
        assert!(host.send(">start {}").await.is_err());
    }
}
