use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use accord_common::{AccordError, Result};
use accord_consensus::{ConsensusCoordinator, SyncCoordinator, SyncOutcome};
use accord_ledger::Ledger;
use accord_p2p::HttpPeer;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::rest::{router, AppState};
use crate::config::Config;

/// A running node: bootstrap already completed, HTTP surface serving.
pub struct AccordRuntime {
    pub addr: SocketAddr,
    pub state: AppState,
    pub sync_outcome: SyncOutcome,
    server: JoinHandle<std::io::Result<()>>,
}

impl AccordRuntime {
    /// Blocks until the HTTP server task exits.
    pub async fn wait(self) -> Result<()> {
        self.server
            .await
            .map_err(|e| AccordError::Other(format!("server task: {e}")))??;
        Ok(())
    }

    pub fn shutdown(&self) {
        self.server.abort();
    }
}

/// Wires the node together: builds the peer clients, seeds the ledger from
/// the network, then binds the listener. The listener does not start until
/// the bootstrap has finished.
pub async fn build_runtime(config: Config) -> Result<AccordRuntime> {
    let timeout = Duration::from_secs(config.peer_timeout_secs);
    let peers = config
        .peers
        .iter()
        .map(|endpoint| HttpPeer::new(endpoint, timeout))
        .collect::<Result<Vec<_>>>()?;
    let peers = Arc::new(peers);

    info!("syncing with {} configured peers", peers.len());
    let mut ledger = Ledger::new();
    let sync_outcome = SyncCoordinator::new(Arc::clone(&peers))
        .run(&mut ledger)
        .await;

    let ledger = Arc::new(RwLock::new(ledger));
    let consensus = Arc::new(ConsensusCoordinator::new(Arc::clone(&ledger), peers));
    let state = AppState { ledger, consensus };

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;

    let app = router(state.clone());
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(AccordRuntime {
        addr,
        state,
        sync_outcome,
        server,
    })
}
