pub mod error;
pub mod records;

pub use error::{AccordError, Result};
pub use records::{AccountRecord, Transfer};
