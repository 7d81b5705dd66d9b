// Library surface for headless/integration tests and reuse.
// Terminal setup and rendering stay in the binary.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod logging;
pub mod passage;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod words;

/// Default countdown recomputation interval
pub const TICK_RATE_MS: u64 = 100;
