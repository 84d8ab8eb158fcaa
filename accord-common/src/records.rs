use serde::{Deserialize, Serialize};

/// One account as it travels over the wire: snapshot entries, bootstrap
/// payloads and the `/all` listing all use this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub address: String,
    pub balance: u64,
}

/// A transfer intent. Lives only for the duration of one request and the
/// consensus round it triggers; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
}

impl Transfer {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }

    /// The exact inverse transfer, used to revert a failed round.
    pub fn inverse(&self) -> Transfer {
        Transfer {
            sender: self.receiver.clone(),
            receiver: self.sender.clone(),
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_swaps_parties_and_keeps_amount() {
        let transfer = Transfer::new("alice", "bob", 42);
        let inverse = transfer.inverse();
        assert_eq!(inverse.sender, "bob");
        assert_eq!(inverse.receiver, "alice");
        assert_eq!(inverse.amount, 42);
    }
}
