use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
  #[error("completion signal still at {outstanding} after waiting {waited:?}")]
  CompletionSignalStalled { outstanding: usize, waited: Duration },
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}

impl OrchestratorError {
  pub fn outstanding(&self) -> Option<usize> {
    match self {
      OrchestratorError::CompletionSignalStalled { outstanding, .. } => Some(*outstanding),
      OrchestratorError::InvalidConfig(_) => None,
    }
  }
}

static_assertions::assert_impl_all!(OrchestratorError: Send, Sync);
