use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::error::SortError;
use tokio::sync::watch;

/// Source of animation cadence. Every comparison and swap awaits one pause.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self) -> Result<(), SortError>;
}

/// Sleeps for a fixed delay on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct TimerPacer {
    delay: Duration,
}

impl TimerPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for TimerPacer {
    async fn pause(&self) -> Result<(), SortError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

/// Yields to the scheduler without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self) -> Result<(), SortError> {
        tokio::task::yield_now().await;
        Ok(())
    }
}

/// Races each inner pause against a cancel signal.
pub struct CancellablePacer {
    inner: Arc<dyn Pacer>,
    cancel: watch::Receiver<bool>,
}

impl CancellablePacer {
    pub fn new(inner: Arc<dyn Pacer>, cancel: watch::Receiver<bool>) -> Self {
        Self { inner, cancel }
    }
}

#[async_trait]
impl Pacer for CancellablePacer {
    async fn pause(&self) -> Result<(), SortError> {
        let mut cancel = self.cancel.clone();
        if *cancel.borrow_and_update() {
            return Err(SortError::Cancelled);
        }

        let cancelled = tokio::select! {
            result = self.inner.pause() => return result,
            changed = cancel.wait_for(|cancelled| *cancelled) => changed.is_ok(),
        };

        if cancelled {
            Err(SortError::Cancelled)
        } else {
            // Sender dropped without cancelling; let the step finish.
            self.inner.pause().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancellable_pacer_passes_through_until_cancelled() {
        let (tx, rx) = watch::channel(false);
        let pacer = CancellablePacer::new(Arc::new(InstantPacer), rx);

        pacer.pause().await.expect("not cancelled yet");
        tx.send(true).expect("send cancel");
        assert_eq!(pacer.pause().await, Err(SortError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_a_long_pause() {
        let (tx, rx) = watch::channel(false);
        let pacer = Arc::new(CancellablePacer::new(
            Arc::new(TimerPacer::new(Duration::from_secs(3600))),
            rx,
        ));

        let task = tokio::spawn({
            let pacer = pacer.clone();
            async move { pacer.pause().await }
        });
        tokio::task::yield_now().await;
        tx.send(true).expect("send cancel");

        let result = task.await.expect("join");
        assert_eq!(result, Err(SortError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_pacer_waits_for_delay() {
        let pacer = TimerPacer::new(Duration::from_millis(40));
        let started = tokio::time::Instant::now();
        pacer.pause().await.expect("pause");
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
