pub mod cmd_back;
pub mod cmd_config;
pub mod cmd_hook;
pub mod cmd_log;
pub mod cmd_undo;
mod context;
mod render;

pub use context::{init_tracing, Context, LOG_ENV};
