#![allow(clippy::needless_lifetimes, clippy::too_many_arguments)]

/// Use mimalloc as the global allocator, carried from the workspace's
/// perf-sensitive defaults. Every `ProfilePair` and canonical key is a
/// small, short-lived heap allocation on the hot merge path.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod canon;
pub mod cli;
pub mod discover;
pub mod error;
pub mod heap;
pub mod limits;
pub mod merge;
pub mod output;
pub mod profile;
pub mod report;
pub mod source;
