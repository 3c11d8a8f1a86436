pub mod classify;
pub mod concurrent;
pub mod config;
pub mod error;
pub mod http_client;
pub mod output;
pub mod probe;
pub mod scan;
pub mod utils;

pub use crate::classify::{classify, Verdict, VerdictLevel};
pub use crate::concurrent::{DispatchSummary, Dispatcher};
pub use crate::config::RunConfig;
pub use crate::error::{ScanError, TransportError};
pub use crate::scan::Scan;
