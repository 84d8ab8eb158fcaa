pub mod api;
pub mod cli;
pub mod config;
pub mod runtime;

pub use config::Config;
pub use runtime::{build_runtime, AccordRuntime};
