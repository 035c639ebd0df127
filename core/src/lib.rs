//! Launches counting tasks around fixed pauses and a completion signal whose bookkeeping
//! does not add up.

pub mod config;
pub mod config_option;
pub mod counting;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod orchestrator;
pub mod sink;

pub use config::*;
pub use config_option::*;
pub use counting::*;
pub use dispatch::*;
pub use error::*;
pub use orchestrator::*;
pub use sink::*;

pub use spawn_order_utils_rs::{DoneGuard, WaitGroup};
