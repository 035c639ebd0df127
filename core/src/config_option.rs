use std::time::Duration;

use crate::config::{CompletionMode, Config};

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetShortPause(Duration),
  SetLongPause(Duration),
  SetWaitTimeout(Option<Duration>),
  SetCompletionMode(CompletionMode),
  SetLabels(Vec<String>),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetShortPause(pause) => {
        config.short_pause = *pause;
      }
      ConfigOption::SetLongPause(pause) => {
        config.long_pause = *pause;
      }
      ConfigOption::SetWaitTimeout(timeout) => {
        config.wait_timeout = *timeout;
      }
      ConfigOption::SetCompletionMode(mode) => {
        config.completion_mode = *mode;
      }
      ConfigOption::SetLabels(labels) => {
        config.labels = labels.clone();
      }
    }
  }

  pub fn with_short_pause(pause: Duration) -> ConfigOption {
    ConfigOption::SetShortPause(pause)
  }

  pub fn with_long_pause(pause: Duration) -> ConfigOption {
    ConfigOption::SetLongPause(pause)
  }

  pub fn with_wait_timeout(timeout: Option<Duration>) -> ConfigOption {
    ConfigOption::SetWaitTimeout(timeout)
  }

  pub fn with_completion_mode(mode: CompletionMode) -> ConfigOption {
    ConfigOption::SetCompletionMode(mode)
  }

  pub fn with_labels<I, S>(labels: I) -> ConfigOption
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    ConfigOption::SetLabels(labels.into_iter().map(Into::into).collect())
  }
}
