use std::collections::BTreeMap;

use accord_common::{AccountRecord, Transfer};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::TransferError;

pub const GENESIS_ADDRESS: &str = "root";
pub const GENESIS_BALANCE: u64 = 1000;

/// Authoritative local account state: address to balance, in minor units.
///
/// The map is ordered by address, so `fingerprint` and `snapshot` enumerate
/// entries identically on every node regardless of the history that built
/// them. Entries are never removed; a receiver unknown at transfer time is
/// created with balance zero before being credited.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    accounts: BTreeMap<String, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a transfer and returns the resulting fingerprint.
    ///
    /// Rejected without mutation when the sender is unknown or its balance
    /// is below the requested amount. Callers must check the result; the
    /// ledger never panics on bad input.
    pub fn apply(&mut self, transfer: &Transfer) -> Result<String, TransferError> {
        let balance = match self.accounts.get(&transfer.sender) {
            Some(balance) => *balance,
            None => return Err(TransferError::UnknownSender(transfer.sender.clone())),
        };

        if balance < transfer.amount {
            return Err(TransferError::InsufficientBalance {
                address: transfer.sender.clone(),
                balance,
                requested: transfer.amount,
            });
        }

        self.accounts
            .insert(transfer.sender.clone(), balance - transfer.amount);
        *self.accounts.entry(transfer.receiver.clone()).or_insert(0) += transfer.amount;

        info!(
            "transferred {} from {} to {}",
            transfer.amount, transfer.sender, transfer.receiver
        );
        Ok(self.fingerprint())
    }

    /// Content hash of the current state: `address:balance;` for every
    /// account in address order, digested with SHA-256. Two ledgers holding
    /// the same (address, balance) set produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut content = String::new();
        for (address, balance) in &self.accounts {
            content.push_str(address);
            content.push(':');
            content.push_str(&balance.to_string());
            content.push(';');
        }
        hex::encode(Sha256::digest(content.as_bytes()))
    }

    /// Full dump in the same enumeration order the fingerprint uses.
    pub fn snapshot(&self) -> Vec<AccountRecord> {
        self.accounts
            .iter()
            .map(|(address, balance)| AccountRecord {
                address: address.clone(),
                balance: *balance,
            })
            .collect()
    }

    /// Seeds the single genesis account. Used only when bootstrap finds no
    /// peer state anywhere on the network.
    pub fn init_genesis(&mut self) {
        self.accounts.clear();
        self.accounts
            .insert(GENESIS_ADDRESS.to_string(), GENESIS_BALANCE);
    }

    /// Replaces the entire map with the given entries. Used once, during
    /// bootstrap, with a snapshot pulled from the majority peer.
    pub fn load(&mut self, records: Vec<AccountRecord>) {
        self.accounts = records
            .into_iter()
            .map(|record| (record.address, record.balance))
            .collect();
    }

    pub fn balance(&self, address: &str) -> Option<u64> {
        self.accounts.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
