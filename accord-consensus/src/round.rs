use std::collections::HashMap;
use std::sync::Arc;

use accord_common::Transfer;
use accord_ledger::{Ledger, TransferError};
use accord_p2p::PeerClient;
use futures::future::join_all;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum RoundError {
    /// Local admission check failed; no network traffic was generated.
    #[error(transparent)]
    Rejected(#[from] TransferError),

    /// The peer majority did not confirm the local result. The transfer
    /// has been reverted and the ledger is back at its pre-round state.
    #[error("No agreement with peer majority, transfer reverted")]
    Disagreement,
}

/// Per-transfer agreement round: apply locally, broadcast to every peer,
/// compare fingerprints, commit or revert.
///
/// Invoked for client-initiated transfers only. Transfers received from
/// peers apply directly and are never re-broadcast, which bounds
/// replication to one hop.
pub struct ConsensusCoordinator<P: PeerClient> {
    ledger: Arc<RwLock<Ledger>>,
    peers: Arc<Vec<P>>,
    // Serializes client rounds so that concurrent transfers cannot
    // interleave between the local apply and the reconcile step.
    gate: Mutex<()>,
}

impl<P: PeerClient> ConsensusCoordinator<P> {
    pub fn new(ledger: Arc<RwLock<Ledger>>, peers: Arc<Vec<P>>) -> Self {
        Self {
            ledger,
            peers,
            gate: Mutex::new(()),
        }
    }

    /// Runs one consensus round. The local mutation always happens first;
    /// the round then either confirms it or applies the exact inverse
    /// transfer. Between apply and reconcile, reads of local state observe
    /// the tentative value.
    pub async fn execute(&self, transfer: &Transfer) -> Result<String, RoundError> {
        let _round = self.gate.lock().await;

        let local = self.ledger.write().await.apply(transfer)?;

        // A node with no peers configured has nobody to disagree with;
        // distinct from peers configured but unreachable, which is treated
        // as disagreement below.
        if self.peers.is_empty() {
            debug!("no peers configured, committing locally");
            return Ok(local);
        }

        let submissions = self.peers.iter().map(|peer| peer.submit_transfer(transfer));
        let returned: Vec<String> = join_all(submissions)
            .await
            .into_iter()
            .flatten()
            .collect();

        match self.leading_fingerprint(&returned) {
            Some((consensus, votes)) if consensus == local => {
                info!("reached consensus on {} ({} votes)", consensus, votes);
                Ok(local)
            }
            answer => {
                let votes = answer.map(|(_, count)| count).unwrap_or(0);
                warn!(
                    "no consensus for local result ({} of {} peers answered, {} agree on another state), reverting",
                    returned.len(),
                    self.peers.len(),
                    votes
                );
                self.revert(transfer).await;
                Err(RoundError::Disagreement)
            }
        }
    }

    /// The fingerprint with the highest vote count among peer answers.
    /// Ties break towards the answer that reached the leading count first.
    fn leading_fingerprint(&self, returned: &[String]) -> Option<(String, usize)> {
        let mut tally: HashMap<&str, usize> = HashMap::new();
        let mut lead: Option<(&str, usize)> = None;

        for fingerprint in returned {
            let count = tally.entry(fingerprint.as_str()).or_insert(0);
            *count += 1;
            if lead.map_or(true, |(_, best)| *count > best) {
                lead = Some((fingerprint.as_str(), *count));
            }
        }

        lead.map(|(fingerprint, count)| (fingerprint.to_string(), count))
    }

    async fn revert(&self, transfer: &Transfer) {
        let mut ledger = self.ledger.write().await;
        if let Err(e) = ledger.apply(&transfer.inverse()) {
            // The receiver was credited by this round, so the inverse can
            // only fail if something else drained the account meanwhile.
            error!("rollback of {:?} failed: {}", transfer, e);
        }
    }
}
