use thiserror::Error;

/// Admission failures for a transfer. These are checked before any state
/// is touched; a rejected transfer leaves the ledger byte-for-byte intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Unknown sender: {0}")]
    UnknownSender(String),

    #[error("Insufficient balance: {address} holds {balance}, transfer needs {requested}")]
    InsufficientBalance {
        address: String,
        balance: u64,
        requested: u64,
    },
}
