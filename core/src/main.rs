use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use spawn_order_core_rs::log::init_tracing;
use spawn_order_core_rs::{
  CompletionMode, Config, ConfigOption, DispatcherHandle, Orchestrator, OutputSinkHandle, StdoutSink,
  TokioRuntimeContextDispatcher, WaitGroup,
};

#[derive(Parser, Debug)]
#[command(
  name = "spawn-order",
  about = "Launches counting tasks around fixed pauses and waits on a completion signal"
)]
struct Args {
  /// Pause after the first launch, before 434 is printed
  #[arg(long, value_parser = humantime::parse_duration)]
  short_pause: Option<Duration>,

  /// Pause after the second launch, before the signal is raised
  #[arg(long, value_parser = humantime::parse_duration)]
  long_pause: Option<Duration>,

  /// Give up on the completion signal after this long
  #[arg(long, value_parser = humantime::parse_duration, conflicts_with = "no_timeout")]
  wait_timeout: Option<Duration>,

  /// Wait on the completion signal forever
  #[arg(long)]
  no_timeout: bool,

  /// Have each task mark itself done instead of the single deferred decrement
  #[arg(long)]
  per_task: bool,
}

impl Args {
  fn into_options(self) -> Vec<ConfigOption> {
    let mut options = Vec::new();
    if let Some(pause) = self.short_pause {
      options.push(ConfigOption::with_short_pause(pause));
    }
    if let Some(pause) = self.long_pause {
      options.push(ConfigOption::with_long_pause(pause));
    }
    if self.no_timeout {
      options.push(ConfigOption::with_wait_timeout(None));
    } else if let Some(limit) = self.wait_timeout {
      options.push(ConfigOption::with_wait_timeout(Some(limit)));
    }
    if self.per_task {
      options.push(ConfigOption::with_completion_mode(CompletionMode::PerTask));
    }
    options
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  init_tracing();
  let config = Config::from(Args::parse().into_options());

  let orchestrator = match Orchestrator::new(
    config,
    DispatcherHandle::new(TokioRuntimeContextDispatcher::new()),
    OutputSinkHandle::new(StdoutSink),
  ) {
    Ok(orchestrator) => orchestrator,
    Err(err) => {
      tracing::error!("{}", err);
      return ExitCode::FAILURE;
    }
  };

  let signal = WaitGroup::new();
  match orchestrator.run(&signal).await {
    Ok(report) => {
      tracing::info!(?report, "done");
      ExitCode::SUCCESS
    }
    Err(err) => {
      tracing::error!("{}", err);
      ExitCode::FAILURE
    }
  }
}
