pub mod concurrent;

pub use concurrent::{DoneGuard, WaitGroup};
