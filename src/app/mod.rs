//! Binary-local application orchestration.
//!
//! `main.rs` only parses arguments; everything else starts in `entry`.

pub(crate) mod entry;
pub(crate) mod repl_loop;
