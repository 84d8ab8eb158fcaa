pub mod round;
pub mod sync;

pub use round::{ConsensusCoordinator, RoundError};
pub use sync::{SyncCoordinator, SyncOutcome};
