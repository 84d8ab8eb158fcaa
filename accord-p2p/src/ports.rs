use accord_common::{AccountRecord, Transfer};
use async_trait::async_trait;

/// One remote participant and the three operations it supports.
///
/// Every call is advisory: a connection error, timeout, non-2xx status or
/// malformed body resolves to `None`, never an error. One unreachable peer
/// must not block bootstrap or a consensus round.
#[async_trait]
pub trait PeerClient: Send + Sync {
    fn endpoint(&self) -> &str;

    /// Current ledger fingerprint of the peer.
    async fn fetch_fingerprint(&self) -> Option<String>;

    /// Full account dump of the peer, in its fingerprint order.
    async fn fetch_snapshot(&self) -> Option<Vec<AccountRecord>>;

    /// Asks the peer to apply the same transfer to its own ledger and
    /// return its resulting fingerprint.
    async fn submit_transfer(&self, transfer: &Transfer) -> Option<String>;
}
