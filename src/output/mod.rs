pub mod console;
pub mod writer_jsonl;

pub use console::{format_summary, format_verdict};
pub use writer_jsonl::spawn_jsonl_writer;
