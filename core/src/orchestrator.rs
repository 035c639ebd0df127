use std::time::{Duration, Instant};

use spawn_order_utils_rs::WaitGroup;
use tokio::time::{sleep, timeout};

use crate::config::{CompletionMode, Config, TASK_COUNT};
use crate::counting::count_from_label;
use crate::dispatch::{Dispatcher, DispatcherHandle, Runnable};
use crate::error::OrchestratorError;
use crate::sink::{Origin, OutputSink, OutputSinkHandle};

/// Bookkeeping of one [`Orchestrator::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
  pub launched: usize,
  /// Total added to the completion signal.
  pub increments: usize,
  /// Decrements registered against the completion signal, deferred or per task.
  pub decrements_registered: usize,
  pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
  config: Config,
  dispatcher: DispatcherHandle,
  sink: OutputSinkHandle,
}

impl Orchestrator {
  pub fn new(config: Config, dispatcher: DispatcherHandle, sink: OutputSinkHandle) -> Result<Self, OrchestratorError> {
    if config.labels.len() != TASK_COUNT {
      return Err(OrchestratorError::InvalidConfig(format!(
        "expected {} labels, got {}",
        TASK_COUNT,
        config.labels.len()
      )));
    }
    if config.signal_increment == 0 {
      // a deferred decrement on an untouched signal would take it below zero
      return Err(OrchestratorError::InvalidConfig(
        "signal_increment must be at least 1".to_string(),
      ));
    }
    Ok(Self {
      config,
      dispatcher,
      sink,
    })
  }

  /// Launches the four counting tasks around the fixed pauses and waits on `signal`.
  ///
  /// In [`CompletionMode::Literal`] the signal is raised by `signal_increment` while the
  /// only decrement is deferred until this method returns, so the wait cannot reach zero.
  /// With a `wait_timeout` this surfaces as [`OrchestratorError::CompletionSignalStalled`];
  /// without one the call never returns.
  pub async fn run(&self, signal: &WaitGroup) -> Result<RunReport, OrchestratorError> {
    let started = Instant::now();
    let mut report = RunReport::default();
    tracing::info!(mode = ?self.config.completion_mode, "run started");

    self.launch(0, signal, &mut report).await;
    self.pause(self.config.short_pause).await;
    self.emit_literal(0);

    self.launch(1, signal, &mut report).await;
    self.pause(self.config.long_pause).await;

    // dropped when `run` returns, after the wait below
    let _deferred_done = match self.config.completion_mode {
      CompletionMode::Literal => {
        signal.add(self.config.signal_increment);
        report.increments += self.config.signal_increment;
        report.decrements_registered += 1;
        tracing::debug!(
          added = self.config.signal_increment,
          count = signal.count(),
          "completion signal raised, one decrement deferred"
        );
        Some(signal.defer_done())
      }
      CompletionMode::PerTask => None,
    };
    self.emit_literal(1);

    self.launch(2, signal, &mut report).await;
    self.emit_literal(2);
    self.launch(3, signal, &mut report).await;

    self.await_signal(signal).await?;
    report.elapsed = started.elapsed();
    tracing::info!(elapsed = ?report.elapsed, "run finished");
    Ok(report)
  }

  async fn launch(&self, index: usize, signal: &WaitGroup, report: &mut RunReport) {
    let label = self.config.labels[index].clone();
    let sink = self.sink.clone();
    let guard = match self.config.completion_mode {
      CompletionMode::PerTask => {
        signal.add(1);
        report.increments += 1;
        report.decrements_registered += 1;
        Some(signal.defer_done())
      }
      CompletionMode::Literal => None,
    };
    tracing::debug!(index, label = %label, "launching counting task");
    self
      .dispatcher
      .schedule(Runnable::new(move || async move {
        count_from_label(&label, &sink, Origin::Task(index));
        drop(guard);
      }))
      .await;
    report.launched += 1;
  }

  async fn pause(&self, duration: Duration) {
    tracing::debug!(?duration, "pausing");
    sleep(duration).await;
  }

  fn emit_literal(&self, position: usize) {
    self.sink.emit(Origin::Orchestrator, self.config.literals[position]);
  }

  async fn await_signal(&self, signal: &WaitGroup) -> Result<(), OrchestratorError> {
    match self.config.wait_timeout {
      Some(limit) => match timeout(limit, signal.wait()).await {
        Ok(()) => Ok(()),
        Err(_) => {
          let outstanding = signal.count();
          tracing::warn!(
            outstanding,
            waited = ?limit,
            "completion signal never reached zero: more was added than will ever be marked done"
          );
          Err(OrchestratorError::CompletionSignalStalled {
            outstanding,
            waited: limit,
          })
        }
      },
      None => {
        if self.config.completion_mode == CompletionMode::Literal {
          tracing::warn!(
            outstanding = signal.count(),
            "waiting without a timeout on a signal no task decrements; this wait does not return"
          );
        }
        signal.wait().await;
        Ok(())
      }
    }
  }
}
