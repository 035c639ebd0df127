use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, Mutex};

/// Who emitted a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
  Orchestrator,
  Task(usize),
}

impl Display for Origin {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Origin::Orchestrator => write!(f, "orchestrator"),
      Origin::Task(index) => write!(f, "task-{}", index),
    }
  }
}

pub trait OutputSink: Debug + Send + Sync + 'static {
  fn emit(&self, origin: Origin, value: usize);
}

#[derive(Debug, Clone)]
pub struct OutputSinkHandle(Arc<dyn OutputSink>);

impl OutputSinkHandle {
  pub fn new(sink: impl OutputSink) -> Self {
    Self(Arc::new(sink))
  }
}

impl OutputSink for OutputSinkHandle {
  fn emit(&self, origin: Origin, value: usize) {
    self.0.emit(origin, value);
  }
}

/// Prints each value on its own line.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
  fn emit(&self, _: Origin, value: usize) {
    println!("{}", value);
  }
}

/// Keeps every emission in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
  records: Arc<Mutex<Vec<(Origin, usize)>>>,
}

impl RecordingSink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn records(&self) -> Vec<(Origin, usize)> {
    self.lock().clone()
  }

  pub fn values(&self) -> Vec<usize> {
    self.lock().iter().map(|(_, value)| *value).collect()
  }

  pub fn values_from(&self, origin: Origin) -> Vec<usize> {
    self
      .lock()
      .iter()
      .filter(|(o, _)| *o == origin)
      .map(|(_, value)| *value)
      .collect()
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Origin, usize)>> {
    // a panicking emitter cannot leave the vector half-written
    self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl OutputSink for RecordingSink {
  fn emit(&self, origin: Origin, value: usize) {
    self.lock().push((origin, value));
  }
}
