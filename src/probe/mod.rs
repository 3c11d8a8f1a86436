pub mod http_probe;
pub mod request;

pub use http_probe::{probe, ProbeOutcome, ResponseTiming};
pub use request::ProbeRequest;
