use std::sync::Arc;

use accord_common::{AccountRecord, Transfer};
use accord_consensus::{ConsensusCoordinator, RoundError};
use accord_ledger::Ledger;
use accord_p2p::HttpPeer;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub consensus: Arc<ConsensusCoordinator<HttpPeer>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Root listing doubles as the peer bootstrap fetch.
        .route("/", get(list_accounts))
        .route("/all", get(list_accounts))
        .route("/hash", get(current_fingerprint))
        .route("/{address}", get(account_balance))
        .route(
            "/{sender}/{receiver}/{amount}",
            post(submit_transfer).put(apply_transfer),
        )
        .with_state(state)
}

/// Current database of all accounts and balances.
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountRecord>> {
    Json(state.ledger.read().await.snapshot())
}

/// Current database fingerprint.
async fn current_fingerprint(State(state): State<AppState>) -> String {
    state.ledger.read().await.fingerprint()
}

/// Balance of one specific account.
async fn account_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Response {
    match state.ledger.read().await.balance(&address) {
        Some(balance) => balance.to_string().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Client-initiated transfer: runs the full consensus round.
async fn submit_transfer(
    State(state): State<AppState>,
    Path((sender, receiver, amount)): Path<(String, String, u64)>,
) -> Response {
    let transfer = Transfer::new(sender, receiver, amount);
    match state.consensus.execute(&transfer).await {
        Ok(fingerprint) => (StatusCode::OK, fingerprint).into_response(),
        Err(RoundError::Rejected(e)) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e @ RoundError::Disagreement) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
    }
}

/// Called by other nodes when replicating a transfer: applies locally and
/// answers with the resulting fingerprint. Never re-broadcast.
async fn apply_transfer(
    State(state): State<AppState>,
    Path((sender, receiver, amount)): Path<(String, String, u64)>,
) -> Response {
    let transfer = Transfer::new(sender, receiver, amount);
    match state.ledger.write().await.apply(&transfer) {
        Ok(fingerprint) => (StatusCode::OK, fingerprint).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}
