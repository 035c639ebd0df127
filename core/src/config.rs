use std::time::Duration;

use crate::config_option::ConfigOption;

/// Labels of the four counting tasks, in launch order.
pub const DEFAULT_LABELS: [&str; 4] = ["cv", "vf", "f", "fd"];
/// Values the orchestrator prints itself, in program order.
pub const ORCHESTRATOR_LITERALS: [usize; 3] = [434, 5556, 444];
pub const TASK_COUNT: usize = 4;

/// How the completion signal is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionMode {
  /// `add(4)` followed by a single decrement deferred until the orchestrator returns.
  /// The wait therefore never reaches zero on its own.
  #[default]
  Literal,
  /// `add(1)` before each launch and `done()` from each task when it finishes.
  PerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub labels: Vec<String>,
  pub short_pause: Duration,
  pub long_pause: Duration,
  pub literals: [usize; 3],
  pub signal_increment: usize,
  pub completion_mode: CompletionMode,
  pub wait_timeout: Option<Duration>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
      short_pause: Duration::from_nanos(2),
      long_pause: Duration::from_nanos(5),
      literals: ORCHESTRATOR_LITERALS,
      signal_increment: TASK_COUNT,
      completion_mode: CompletionMode::Literal,
      wait_timeout: Some(Duration::from_secs(2)),
    }
  }
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_reproduce_the_plain_program() {
    let config = Config::default();
    let lengths = config.labels.iter().map(|l| l.len()).collect::<Vec<_>>();
    assert_eq!(lengths, vec![2, 2, 1, 2]);
    assert_eq!(config.labels, vec!["cv", "vf", "f", "fd"]);
    assert_eq!(config.short_pause, Duration::from_nanos(2));
    assert_eq!(config.long_pause, Duration::from_nanos(5));
    assert_eq!(config.literals, [434, 5556, 444]);
    assert_eq!(config.signal_increment, 4);
    assert_eq!(config.completion_mode, CompletionMode::Literal);
    assert!(config.short_pause < config.long_pause);
    assert_eq!(config.wait_timeout, Some(Duration::from_secs(2)));
  }

  #[test]
  fn options_override_defaults() {
    let config = Config::from(vec![
      ConfigOption::with_short_pause(Duration::from_millis(1)),
      ConfigOption::with_long_pause(Duration::from_millis(2)),
      ConfigOption::with_wait_timeout(None),
      ConfigOption::with_completion_mode(CompletionMode::PerTask),
    ]);
    assert_eq!(config.short_pause, Duration::from_millis(1));
    assert_eq!(config.long_pause, Duration::from_millis(2));
    assert_eq!(config.wait_timeout, None);
    assert_eq!(config.completion_mode, CompletionMode::PerTask);
    assert_eq!(config.labels, Config::default().labels);
  }
}
