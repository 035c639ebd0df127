use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Counted completion signal.
///
/// `add(n)` raises the counter, `done()` lowers it by one and `wait()` suspends until it
/// reads zero. Clones share the same counter.
#[derive(Clone)]
pub struct WaitGroup {
  inner: Arc<Inner>,
}

struct Inner {
  count: AtomicUsize,
  notify: Notify,
}

impl Debug for WaitGroup {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WaitGroup").field("count", &self.count()).finish()
  }
}

impl PartialEq for WaitGroup {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Eq for WaitGroup {}

impl Default for WaitGroup {
  fn default() -> Self {
    Self::new()
  }
}

impl WaitGroup {
  pub fn new() -> Self {
    Self::with_count(0)
  }

  pub fn with_count(count: usize) -> Self {
    Self {
      inner: Arc::new(Inner {
        count: AtomicUsize::new(count),
        notify: Notify::new(),
      }),
    }
  }

  pub fn add(&self, n: usize) {
    let prev = self.inner.count.fetch_add(n, Ordering::SeqCst);
    tracing::trace!(prev, added = n, "WaitGroup::add");
  }

  /// Lowers the counter by one and wakes every waiter when it reaches zero.
  ///
  /// # Panics
  ///
  /// Panics if the counter is already zero.
  pub fn done(&self) {
    let prev = self
      .inner
      .count
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| count.checked_sub(1))
      .unwrap_or_else(|_| panic!("WaitGroup::done called more times than add"));
    tracing::trace!(prev, "WaitGroup::done");
    if prev == 1 {
      self.inner.notify.notify_waiters();
    }
  }

  pub fn count(&self) -> usize {
    self.inner.count.load(Ordering::SeqCst)
  }

  pub async fn wait(&self) {
    loop {
      if self.count() == 0 {
        return;
      }
      // register before the second check so a concurrent `done` cannot slip between them
      let notified = self.inner.notify.notified();
      if self.count() == 0 {
        return;
      }
      notified.await;
    }
  }

  /// Returns a guard that calls [`WaitGroup::done`] once when it is dropped.
  pub fn defer_done(&self) -> DoneGuard {
    DoneGuard { wg: Some(self.clone()) }
  }
}

/// Deferred decrement of a [`WaitGroup`].
#[derive(Debug)]
#[must_use = "dropping the guard immediately decrements the wait group"]
pub struct DoneGuard {
  wg: Option<WaitGroup>,
}

impl DoneGuard {
  /// Consumes the guard without decrementing.
  pub fn disarm(mut self) {
    self.wg.take();
  }
}

impl Drop for DoneGuard {
  fn drop(&mut self) {
    if let Some(wg) = self.wg.take() {
      wg.done();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::WaitGroup;
  use rstest::rstest;
  use std::time::Duration;
  use tokio::join;
  use tokio::time::timeout;

  #[tokio::test]
  async fn wait_group_completes() {
    let wg = WaitGroup::new();
    wg.add(2);
    let worker_wg = wg.clone();

    let wait_fut = wg.wait();
    let worker = async move {
      worker_wg.done();
      worker_wg.done();
    };

    join!(worker, wait_fut);
    assert_eq!(wg.count(), 0);
  }

  #[tokio::test]
  async fn wait_returns_immediately_at_zero() {
    let wg = WaitGroup::new();
    timeout(Duration::from_millis(100), wg.wait())
      .await
      .expect("wait on an empty group should not block");
  }

  #[rstest]
  #[case(1)]
  #[case(4)]
  #[case(16)]
  #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
  async fn wait_released_by_spawned_workers(#[case] workers: usize) {
    let wg = WaitGroup::new();
    for _ in 0..workers {
      wg.add(1);
      let wg = wg.clone();
      tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        wg.done();
      });
    }
    timeout(Duration::from_secs(5), wg.wait())
      .await
      .expect("all workers should have called done");
  }

  #[tokio::test]
  async fn wait_stays_pending_while_outstanding() {
    let wg = WaitGroup::new();
    wg.add(4);
    let _guard = wg.defer_done();
    let result = timeout(Duration::from_millis(50), wg.wait()).await;
    assert!(result.is_err());
    assert_eq!(wg.count(), 4);
  }

  #[test]
  fn guard_decrements_once_on_drop() {
    let wg = WaitGroup::with_count(4);
    {
      let _guard = wg.defer_done();
      assert_eq!(wg.count(), 4);
    }
    assert_eq!(wg.count(), 3);
  }

  #[test]
  fn disarmed_guard_leaves_counter() {
    let wg = WaitGroup::with_count(1);
    wg.defer_done().disarm();
    assert_eq!(wg.count(), 1);
  }

  #[test]
  #[should_panic(expected = "done called more times than add")]
  fn done_past_zero_panics() {
    let wg = WaitGroup::new();
    wg.done();
  }

  #[test]
  fn clones_share_the_counter() {
    let wg = WaitGroup::new();
    let other = wg.clone();
    other.add(3);
    assert_eq!(wg.count(), 3);
    assert_eq!(wg, other);
    assert_ne!(wg, WaitGroup::new());
  }
}
