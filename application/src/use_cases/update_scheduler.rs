//! Throttled update scheduler.
//!
//! Launches live-message renders as independent tasks so the fragment pull
//! loop never waits on the chat platform, and joins every one of them before
//! the session is allowed to finish.
//!
//! Renders may land out of dispatch order. That is tolerated because each
//! render is a full overwrite and the session's final render is only issued
//! after [`UpdateScheduler::drain`].

use crate::ports::message_sink::SinkError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

/// Tally of dispatched renders and how they settled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub dispatched: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl DrainReport {
    /// Units that reached a terminal state
    pub fn settled(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Units still running
    pub fn pending(&self) -> usize {
        self.dispatched - self.settled()
    }
}

/// Tracks in-flight render tasks for one session.
///
/// With a non-zero cap, [`dispatch`](Self::dispatch) waits for a free slot
/// before spawning; the pull loop is suspended while the cap is reached.
pub struct UpdateScheduler {
    tasks: JoinSet<Result<(), SinkError>>,
    slots: Option<Arc<Semaphore>>,
    report: DrainReport,
}

impl UpdateScheduler {
    /// Create a scheduler; `max_in_flight == 0` means unbounded.
    ///
    /// Caps above [`Semaphore::MAX_PERMITS`] are clamped to it.
    pub fn new(max_in_flight: usize) -> Self {
        let slots = (max_in_flight > 0)
            .then(|| Arc::new(Semaphore::new(max_in_flight.min(Semaphore::MAX_PERMITS))));
        Self {
            tasks: JoinSet::new(),
            slots,
            report: DrainReport::default(),
        }
    }

    /// Launch `work` without waiting for it to finish.
    pub async fn dispatch<F>(&mut self, work: F)
    where
        F: Future<Output = Result<(), SinkError>> + Send + 'static,
    {
        self.reap_finished();

        let permit = match &self.slots {
            Some(slots) => Arc::clone(slots).acquire_owned().await.ok(),
            None => None,
        };

        self.tasks.spawn(async move {
            let _permit = permit;
            work.await
        });
        self.report.dispatched += 1;
        debug!(
            "Dispatched update #{} ({} in flight)",
            self.report.dispatched,
            self.tasks.len()
        );
    }

    /// Wait for every dispatched unit, swallowing their failures.
    ///
    /// Safe to call repeatedly; returns the cumulative report.
    pub async fn drain(&mut self) -> DrainReport {
        while let Some(result) = self.tasks.join_next().await {
            self.record(result);
        }
        self.report
    }

    pub fn report(&self) -> DrainReport {
        self.report
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            self.record(result);
        }
    }

    fn record(&mut self, result: Result<Result<(), SinkError>, JoinError>) {
        match result {
            Ok(Ok(())) => self.report.succeeded += 1,
            Ok(Err(e)) => {
                warn!("Live message update failed: {}", e);
                self.report.failed += 1;
            }
            Err(e) => {
                warn!("Live message update task did not complete: {}", e);
                self.report.failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn drain_settles_every_dispatched_unit() {
        let mut scheduler = UpdateScheduler::new(0);
        let k = 12;
        for i in 0..k {
            scheduler
                .dispatch(async move {
                    tokio::time::sleep(Duration::from_millis((k - i) as u64 * 2)).await;
                    if i % 3 == 0 {
                        Err(SinkError::Rejected(format!("update {}", i)))
                    } else {
                        Ok(())
                    }
                })
                .await;
        }

        let report = scheduler.drain().await;
        assert_eq!(report.dispatched, k);
        assert_eq!(report.settled(), k);
        assert_eq!(report.pending(), 0);
        assert_eq!(report.failed, 4);
        assert_eq!(report.succeeded, 8);
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[tokio::test]
    async fn drain_is_idempotent() {
        let mut scheduler = UpdateScheduler::new(4);
        scheduler.dispatch(async { Ok(()) }).await;

        let first = scheduler.drain().await;
        let second = scheduler.drain().await;
        assert_eq!(first, second);
        assert_eq!(second.settled(), 1);
    }

    #[tokio::test]
    async fn drain_with_nothing_dispatched() {
        let mut scheduler = UpdateScheduler::new(0);
        assert_eq!(scheduler.drain().await, DrainReport::default());
    }

    #[tokio::test]
    async fn panicking_unit_counts_as_failed() {
        let mut scheduler = UpdateScheduler::new(0);
        let explode = true;
        scheduler
            .dispatch(async move {
                if explode {
                    panic!("render blew up");
                }
                Ok(())
            })
            .await;
        scheduler.dispatch(async { Ok(()) }).await;

        let report = scheduler.drain().await;
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.pending(), 0);
    }

    #[tokio::test]
    async fn cap_bounds_concurrent_units() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let mut scheduler = UpdateScheduler::new(2);

        for _ in 0..8 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            scheduler
                .dispatch(async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
                .await;
        }

        let report = scheduler.drain().await;
        assert_eq!(report.succeeded, 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn cap_above_permit_limit_is_clamped() {
        let mut scheduler = UpdateScheduler::new(usize::MAX);
        for _ in 0..3 {
            scheduler.dispatch(async { Ok(()) }).await;
        }
        let report = scheduler.drain().await;
        assert_eq!(report.succeeded, 3);
    }

    #[tokio::test]
    async fn dispatch_does_not_wait_for_completion() {
        let mut scheduler = UpdateScheduler::new(0);
        let started = tokio::time::Instant::now();
        scheduler
            .dispatch(async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            })
            .await;
        assert!(started.elapsed() < Duration::from_millis(100));
        assert_eq!(scheduler.report().pending(), 1);
        scheduler.drain().await;
    }
}
