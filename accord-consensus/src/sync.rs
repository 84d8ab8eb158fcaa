use std::collections::HashMap;
use std::sync::Arc;

use accord_ledger::Ledger;
use accord_p2p::PeerClient;
use tracing::{info, warn};

/// Terminal states of the bootstrap: either the ledger was seeded from the
/// majority peer, or this node minted the starting state itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    SeededFromPeer { endpoint: String, accounts: usize },
    Genesis,
}

/// Startup bootstrap. Runs exactly once, before the node starts accepting
/// requests: asks every configured peer for its fingerprint, picks the
/// fingerprint held by the most peers, and pulls the full snapshot from
/// its first holder.
pub struct SyncCoordinator<P: PeerClient> {
    peers: Arc<Vec<P>>,
}

impl<P: PeerClient> SyncCoordinator<P> {
    pub fn new(peers: Arc<Vec<P>>) -> Self {
        Self { peers }
    }

    /// Seeds `ledger` from the network. Peers that do not answer are
    /// excluded from the tally; there is no retry loop. Ties break towards
    /// the fingerprint that reached the leading count first, in
    /// configuration order.
    pub async fn run(&self, ledger: &mut Ledger) -> SyncOutcome {
        let mut tally: HashMap<String, usize> = HashMap::new();
        let mut lead_count = 0usize;
        let mut lead_peer: Option<&P> = None;

        for peer in self.peers.iter() {
            let Some(fingerprint) = peer.fetch_fingerprint().await else {
                continue;
            };
            let count = tally.entry(fingerprint).or_insert(0);
            *count += 1;
            if *count > lead_count {
                lead_count = *count;
                lead_peer = Some(peer);
            }
        }

        let Some(peer) = lead_peer else {
            info!(
                "network empty ({} peers configured), starting from genesis",
                self.peers.len()
            );
            ledger.init_genesis();
            return SyncOutcome::Genesis;
        };

        match peer.fetch_snapshot().await {
            Some(records) => {
                ledger.load(records);
                info!(
                    "synced {} accounts from {} ({} peers agree)",
                    ledger.len(),
                    peer.endpoint(),
                    lead_count
                );
                SyncOutcome::SeededFromPeer {
                    endpoint: peer.endpoint().to_string(),
                    accounts: ledger.len(),
                }
            }
            None => {
                warn!(
                    "leading peer {} dropped before the snapshot fetch, starting from genesis",
                    peer.endpoint()
                );
                ledger.init_genesis();
                SyncOutcome::Genesis
            }
        }
    }
}
